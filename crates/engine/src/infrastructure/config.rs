//! Engine configuration from environment variables.
//!
//! `.env` / `.env.local` at the repo root are loaded by `main` before this runs.

use std::str::FromStr;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_DB: &str = "taleforge.db";

/// Which encounter store backs the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StoreBackend {
    #[default]
    Sqlite,
    Memory,
}

impl FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sqlite" => Ok(StoreBackend::Sqlite),
            "memory" | "in-memory" | "in_memory" => Ok(StoreBackend::Memory),
            other => Err(format!("unknown store backend '{other}'")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    pub server_host: String,
    pub server_port: u16,
    pub store_backend: StoreBackend,
    pub encounter_db: String,
    /// Comma-separated origins, or `*`. `None` disables the CORS layer.
    pub cors_allowed_origins: Option<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            server_host: DEFAULT_HOST.to_string(),
            server_port: DEFAULT_PORT,
            store_backend: StoreBackend::default(),
            encounter_db: DEFAULT_DB.to_string(),
            cors_allowed_origins: None,
        }
    }
}

impl EngineConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let defaults = Self::default();

        let server_port = match var("SERVER_PORT").or_else(|| var("PORT")) {
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                tracing::warn!(
                    value = %raw,
                    default = DEFAULT_PORT,
                    "Invalid server port, using default"
                );
                DEFAULT_PORT
            }),
            None => DEFAULT_PORT,
        };

        let store_backend = match var("STORE_BACKEND") {
            Some(raw) => raw.parse().unwrap_or_else(|e: String| {
                tracing::warn!(error = %e, "Invalid STORE_BACKEND, using sqlite");
                StoreBackend::default()
            }),
            None => StoreBackend::default(),
        };

        Self {
            server_host: var("SERVER_HOST").unwrap_or(defaults.server_host),
            server_port,
            store_backend,
            encounter_db: var("ENCOUNTER_DB").unwrap_or(defaults.encounter_db),
            cors_allowed_origins: var("CORS_ALLOWED_ORIGINS"),
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}
