//! Encounter persistence.
//!
//! The aggregate is stored as a JSON document. `world_id`, `status` and
//! `version` are copied into columns for the active-encounter index and the
//! conditional update; the `version` column is authoritative.

use async_trait::async_trait;
use sqlx::{Row, SqlitePool};
use taleforge_domain::{Encounter, EncounterId, WorldId};

use crate::infrastructure::ports::{EncounterRepo, RepoError};

pub struct SqliteEncounterRepo {
    pool: SqlitePool,
}

impl SqliteEncounterRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn row_to_encounter(row: &sqlx::sqlite::SqliteRow) -> Result<Encounter, RepoError> {
        let document: String = row.get("document");
        let version: i64 = row.get("version");
        let encounter: Encounter = serde_json::from_str(&document)
            .map_err(|e| RepoError::Serialization(e.to_string()))?;
        let version = u64::try_from(version)
            .map_err(|_| RepoError::serialization(format!("negative version {version}")))?;
        Ok(encounter.with_version(version))
    }

    async fn exists(&self, id: EncounterId) -> Result<bool, RepoError> {
        let row = sqlx::query("SELECT 1 FROM encounters WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepoError::database("encounter.exists", e))?;
        Ok(row.is_some())
    }
}

fn to_i64(version: u64) -> Result<i64, RepoError> {
    i64::try_from(version)
        .map_err(|_| RepoError::serialization(format!("version {version} overflows")))
}

/// Unique violations come from the one-active-per-world index or a reused id.
fn write_error(operation: &'static str, id: EncounterId, e: sqlx::Error) -> RepoError {
    if let sqlx::Error::Database(db) = &e {
        if db.is_unique_violation() {
            return RepoError::conflict("Encounter", id);
        }
    }
    RepoError::database(operation, e)
}

#[async_trait]
impl EncounterRepo for SqliteEncounterRepo {
    async fn insert(&self, encounter: &Encounter) -> Result<(), RepoError> {
        let document = serde_json::to_string(encounter)
            .map_err(|e| RepoError::Serialization(e.to_string()))?;

        sqlx::query(
            r#"
            INSERT INTO encounters (id, world_id, status, version, document, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(encounter.id().to_string())
        .bind(encounter.world_id().to_string())
        .bind(encounter.status().as_str())
        .bind(to_i64(encounter.version())?)
        .bind(document)
        .bind(encounter.created_at().to_rfc3339())
        .bind(encounter.updated_at().to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| write_error("encounter.insert", encounter.id(), e))?;

        Ok(())
    }

    async fn get(&self, id: EncounterId) -> Result<Option<Encounter>, RepoError> {
        let row = sqlx::query("SELECT document, version FROM encounters WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepoError::database("encounter.get", e))?;

        row.as_ref().map(Self::row_to_encounter).transpose()
    }

    async fn find_active_for_world(
        &self,
        world_id: WorldId,
    ) -> Result<Option<Encounter>, RepoError> {
        let row = sqlx::query(
            "SELECT document, version FROM encounters WHERE world_id = ? AND status = 'active' LIMIT 1",
        )
        .bind(world_id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepoError::database("encounter.find_active", e))?;

        row.as_ref().map(Self::row_to_encounter).transpose()
    }

    async fn update(&self, encounter: &Encounter) -> Result<(), RepoError> {
        let id = encounter.id();
        let next = encounter.clone().with_version(encounter.version() + 1);
        let document =
            serde_json::to_string(&next).map_err(|e| RepoError::Serialization(e.to_string()))?;

        let result = sqlx::query(
            r#"
            UPDATE encounters
            SET status = ?, version = ?, document = ?, updated_at = ?
            WHERE id = ? AND version = ?
            "#,
        )
        .bind(next.status().as_str())
        .bind(to_i64(next.version())?)
        .bind(document)
        .bind(next.updated_at().to_rfc3339())
        .bind(id.to_string())
        .bind(to_i64(encounter.version())?)
        .execute(&self.pool)
        .await
        .map_err(|e| write_error("encounter.update", id, e))?;

        if result.rows_affected() == 0 {
            return if self.exists(id).await? {
                Err(RepoError::conflict("Encounter", id))
            } else {
                Err(RepoError::not_found("Encounter", id))
            };
        }

        Ok(())
    }
}
