//! SQLite database implementations.

use sqlx::SqlitePool;
use std::sync::Arc;

use crate::infrastructure::ports::RepoError;

mod character_repo;
mod encounter_repo;
mod world_time_repo;

pub use character_repo::SqliteCharacterRepo;
pub use encounter_repo::SqliteEncounterRepo;
pub use world_time_repo::SqliteWorldTimeRepo;

/// Tables the engine owns (`encounters`) and the read-side tables it shares
/// with the character and chronicle subsystems.
const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS encounters (
        id TEXT PRIMARY KEY,
        world_id TEXT NOT NULL,
        status TEXT NOT NULL,
        version INTEGER NOT NULL,
        document TEXT NOT NULL,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    )
    "#,
    r#"
    CREATE UNIQUE INDEX IF NOT EXISTS idx_encounters_active_world
        ON encounters(world_id) WHERE status = 'active'
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS characters (
        id TEXT PRIMARY KEY,
        world_id TEXT NOT NULL,
        name TEXT NOT NULL,
        attributes_json TEXT NOT NULL DEFAULT '[]',
        statuses_json TEXT NOT NULL DEFAULT '[]'
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS events (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        world_id TEXT NOT NULL,
        game_time INTEGER NOT NULL
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_events_world ON events(world_id, game_time)",
    r#"
    CREATE TABLE IF NOT EXISTS chronicles (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        world_id TEXT NOT NULL,
        game_time_start INTEGER NOT NULL,
        game_time_end INTEGER NOT NULL
    )
    "#,
];

/// Ensure tables and indexes exist. Safe to run on every startup.
pub async fn ensure_schema(pool: &SqlitePool) -> Result<(), RepoError> {
    for statement in SCHEMA {
        sqlx::query(statement)
            .execute(pool)
            .await
            .map_err(|e| RepoError::database("ensure_schema", e))?;
    }
    tracing::info!("SQLite schema ensured");
    Ok(())
}

/// Create all SQLite repositories from one pool.
pub struct SqliteRepositories {
    pub encounter: Arc<SqliteEncounterRepo>,
    pub character: Arc<SqliteCharacterRepo>,
    pub world_time: Arc<SqliteWorldTimeRepo>,
}

impl SqliteRepositories {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            encounter: Arc::new(SqliteEncounterRepo::new(pool.clone())),
            character: Arc::new(SqliteCharacterRepo::new(pool.clone())),
            world_time: Arc::new(SqliteWorldTimeRepo::new(pool)),
        }
    }

    /// Open (creating if needed) the database file and ensure the schema.
    pub async fn connect(db_path: &str) -> Result<Self, RepoError> {
        let pool = SqlitePool::connect(&format!("sqlite:{}?mode=rwc", db_path))
            .await
            .map_err(|e| RepoError::database("connect", e))?;
        ensure_schema(&pool).await?;
        Ok(Self::new(pool))
    }
}
