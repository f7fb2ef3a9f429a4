//! Narrative clock derived from the event log and chronicles.

use async_trait::async_trait;
use sqlx::{Row, SqlitePool};
use taleforge_domain::{NarrativeTime, WorldId};

use crate::infrastructure::ports::{RepoError, WorldTimeRepo};

pub struct SqliteWorldTimeRepo {
    pool: SqlitePool,
}

impl SqliteWorldTimeRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn record_event(
        &self,
        world_id: WorldId,
        game_time: NarrativeTime,
    ) -> Result<(), RepoError> {
        sqlx::query("INSERT INTO events (world_id, game_time) VALUES (?, ?)")
            .bind(world_id.to_string())
            .bind(game_time.seconds())
            .execute(&self.pool)
            .await
            .map_err(|e| RepoError::database("events.insert", e))?;
        Ok(())
    }

    pub async fn record_chronicle(
        &self,
        world_id: WorldId,
        start: NarrativeTime,
        end: NarrativeTime,
    ) -> Result<(), RepoError> {
        sqlx::query(
            "INSERT INTO chronicles (world_id, game_time_start, game_time_end) VALUES (?, ?, ?)",
        )
        .bind(world_id.to_string())
        .bind(start.seconds())
        .bind(end.seconds())
        .execute(&self.pool)
        .await
        .map_err(|e| RepoError::database("chronicles.insert", e))?;
        Ok(())
    }
}

#[async_trait]
impl WorldTimeRepo for SqliteWorldTimeRepo {
    /// Max of the latest event time and the end of the latest chronicle.
    async fn current_game_time(&self, world_id: WorldId) -> Result<NarrativeTime, RepoError> {
        let world = world_id.to_string();

        let row = sqlx::query("SELECT MAX(game_time) AS latest FROM events WHERE world_id = ?")
            .bind(&world)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| RepoError::database("world_time.events", e))?;
        let latest_event: Option<i64> = row.get("latest");

        let row = sqlx::query(
            "SELECT game_time_end FROM chronicles WHERE world_id = ? ORDER BY id DESC LIMIT 1",
        )
        .bind(&world)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepoError::database("world_time.chronicles", e))?;
        let chronicle_end: Option<i64> = row.map(|r| r.get("game_time_end"));

        let seconds = latest_event
            .into_iter()
            .chain(chronicle_end)
            .fold(0, i64::max);
        Ok(NarrativeTime::from_seconds(seconds))
    }
}
