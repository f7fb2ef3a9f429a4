//! Taleforge Engine - Main entry point.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::{HeaderValue, Method};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use taleforge_engine::api;
use taleforge_engine::infrastructure::{
    clock::SystemClock,
    config::{EngineConfig, StoreBackend},
    memory::InMemoryStore,
    ports::ClockPort,
    sqlite::SqliteRepositories,
};
use taleforge_engine::App;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment from repo root (the engine may run from `crates/engine`).
    load_dotenv_from_repo_root();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "taleforge_engine=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Taleforge Engine");

    // Load configuration
    let config = EngineConfig::from_env();
    let clock: Arc<dyn ClockPort> = Arc::new(SystemClock::new());

    let app = match config.store_backend {
        StoreBackend::Sqlite => {
            tracing::info!(path = %config.encounter_db, "Opening SQLite encounter store");
            let repos = SqliteRepositories::connect(&config.encounter_db).await?;
            App::new(repos.encounter, repos.character, repos.world_time, clock)
        }
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory store; encounters are lost on restart");
            let store = InMemoryStore::new();
            App::new(store.clone(), store.clone(), store, clock)
        }
    };

    let mut router = api::http::routes()
        .with_state(Arc::new(app))
        .layer(TraceLayer::new_for_http());

    if let Some(cors) = build_cors_layer(config.cors_allowed_origins.as_deref()) {
        router = router.layer(cors);
    }

    // Start server
    let addr: SocketAddr = config.bind_address().parse()?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}

fn load_dotenv_from_repo_root() {
    let repo_root = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..");

    // Prefer local overrides.
    for filename in [".env.local", ".env"] {
        let path = repo_root.join(filename);
        if path.exists() {
            let _ = dotenvy::from_path(path);
        }
    }
}

fn build_cors_layer(allowed_origins: Option<&str>) -> Option<CorsLayer> {
    let allowed_origins = allowed_origins?;

    let mut cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([axum::http::header::CONTENT_TYPE]);

    if allowed_origins == "*" {
        cors = cors.allow_origin(Any);
    } else {
        let origins: Vec<HeaderValue> = allowed_origins
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .filter_map(|s| HeaderValue::from_str(s).ok())
            .collect();

        if origins.is_empty() {
            tracing::warn!("CORS_ALLOWED_ORIGINS has no valid origins; CORS disabled");
            return None;
        }

        cors = cors.allow_origin(origins);
    }

    Some(cors)
}
