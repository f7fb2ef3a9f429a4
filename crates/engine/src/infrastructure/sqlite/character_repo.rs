//! Read-only character lookup over the shared `characters` table.

use async_trait::async_trait;
use serde_json::Value;
use sqlx::{Row, SqlitePool};
use taleforge_domain::CharacterId;

use crate::infrastructure::ports::{CharacterProfile, CharacterRepo, RepoError};

const HP_ATTRIBUTE: &str = "hp";

pub struct SqliteCharacterRepo {
    pool: SqlitePool,
}

impl SqliteCharacterRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Write a character row. The character subsystem owns this table; the
    /// engine only uses this for fixtures and local seeding.
    pub async fn upsert(
        &self,
        id: CharacterId,
        world_id: taleforge_domain::WorldId,
        name: &str,
        attributes: &Value,
        statuses: &Value,
    ) -> Result<(), RepoError> {
        sqlx::query(
            r#"
            INSERT INTO characters (id, world_id, name, attributes_json, statuses_json)
            VALUES (?, ?, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                attributes_json = excluded.attributes_json,
                statuses_json = excluded.statuses_json
            "#,
        )
        .bind(id.to_string())
        .bind(world_id.to_string())
        .bind(name)
        .bind(attributes.to_string())
        .bind(statuses.to_string())
        .execute(&self.pool)
        .await
        .map_err(|e| RepoError::database("character.upsert", e))?;
        Ok(())
    }
}

/// Attribute values are free-form; accept integers, floats and numeric strings.
fn as_number(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn hp_from_attributes(attributes: &Value) -> (Option<i64>, Option<i64>) {
    let hp = attributes.as_array().and_then(|attrs| {
        attrs.iter().find(|a| {
            a.get("name")
                .and_then(Value::as_str)
                .is_some_and(|n| n.eq_ignore_ascii_case(HP_ATTRIBUTE))
        })
    });
    match hp {
        Some(attr) => (
            attr.get("value").and_then(as_number),
            attr.get("max").and_then(as_number),
        ),
        None => (None, None),
    }
}

/// Statuses are stored either as plain names or as `{ "name": ... }` objects.
fn status_names(statuses: &Value) -> Vec<String> {
    statuses
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(|s| s.as_str().or_else(|| s.get("name").and_then(Value::as_str)))
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

#[async_trait]
impl CharacterRepo for SqliteCharacterRepo {
    async fn get_profile(&self, id: CharacterId) -> Result<Option<CharacterProfile>, RepoError> {
        let row = sqlx::query(
            "SELECT name, attributes_json, statuses_json FROM characters WHERE id = ?",
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepoError::database("character.get_profile", e))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let name: String = row.get("name");
        let attributes: String = row.get("attributes_json");
        let statuses: String = row.get("statuses_json");

        let attributes: Value = serde_json::from_str(&attributes)
            .map_err(|e| RepoError::Serialization(e.to_string()))?;
        let statuses: Value = serde_json::from_str(&statuses)
            .map_err(|e| RepoError::Serialization(e.to_string()))?;

        let (hp, hp_max) = hp_from_attributes(&attributes);
        Ok(Some(CharacterProfile {
            name,
            hp,
            hp_max,
            statuses: status_names(&statuses),
        }))
    }
}
