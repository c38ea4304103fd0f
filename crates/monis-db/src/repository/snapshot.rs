//! # Snapshot Repository
//!
//! Key-value persistence for workspace snapshots.
//!
//! The engine itself is persistence-agnostic: it only exposes a
//! serializable [`WorkspaceSnapshot`]. The composing layer saves one here
//! after each mutation and loads it back at startup. Only the configuration
//! and rental period are in the payload; step cursor and modal flags are
//! transient and never stored.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::{debug, warn};

use crate::error::DbResult;
use monis_core::WorkspaceSnapshot;

/// Repository for persisted workspace snapshots.
#[derive(Debug, Clone)]
pub struct SnapshotRepository {
    pool: SqlitePool,
}

impl SnapshotRepository {
    /// Creates a new SnapshotRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SnapshotRepository { pool }
    }

    /// Saves a snapshot under the given key, replacing any previous value.
    pub async fn save(&self, key: &str, snapshot: &WorkspaceSnapshot) -> DbResult<()> {
        let payload = serde_json::to_string(snapshot)?;
        let now = Utc::now();

        sqlx::query(
            r#"
            INSERT INTO workspace_snapshots (key, payload, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(key) DO UPDATE SET
                payload = excluded.payload,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(key)
        .bind(payload)
        .bind(now)
        .execute(&self.pool)
        .await?;

        debug!(key = %key, "Snapshot saved");
        Ok(())
    }

    /// Loads the snapshot stored under the given key, if any.
    ///
    /// A corrupt payload is discarded (logged, returned as `None`) rather
    /// than failing startup: losing a draft configuration is preferable to
    /// an unusable configurator.
    pub async fn load(&self, key: &str) -> DbResult<Option<WorkspaceSnapshot>> {
        let payload: Option<String> =
            sqlx::query_scalar("SELECT payload FROM workspace_snapshots WHERE key = ?1")
                .bind(key)
                .fetch_optional(&self.pool)
                .await?;

        let Some(payload) = payload else {
            return Ok(None);
        };

        match serde_json::from_str(&payload) {
            Ok(snapshot) => Ok(Some(snapshot)),
            Err(e) => {
                warn!(key = %key, error = %e, "Discarding corrupt workspace snapshot");
                Ok(None)
            }
        }
    }

    /// Deletes the snapshot stored under the given key, if any.
    pub async fn clear(&self, key: &str) -> DbResult<()> {
        sqlx::query("DELETE FROM workspace_snapshots WHERE key = ?1")
            .bind(key)
            .execute(&self.pool)
            .await?;

        debug!(key = %key, "Snapshot cleared");
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use monis_core::catalog::builtin_catalog;
    use monis_core::{RentalPeriod, WorkspaceConfig, SNAPSHOT_KEY};

    fn snapshot() -> WorkspaceSnapshot {
        let desk = builtin_catalog()
            .into_iter()
            .find(|p| p.id == "desk-compact")
            .unwrap();

        WorkspaceSnapshot {
            config: WorkspaceConfig {
                desk: Some(desk),
                chair: None,
                accessories: Vec::new(),
            },
            rental_period: RentalPeriod::ThreeMonths,
        }
    }

    #[tokio::test]
    async fn test_save_load_roundtrip() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let snap = snapshot();

        db.snapshots().save(SNAPSHOT_KEY, &snap).await.unwrap();
        let loaded = db.snapshots().load(SNAPSHOT_KEY).await.unwrap().unwrap();

        assert_eq!(loaded, snap);
    }

    #[tokio::test]
    async fn test_save_replaces_previous_value() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        db.snapshots()
            .save(SNAPSHOT_KEY, &snapshot())
            .await
            .unwrap();

        let updated = WorkspaceSnapshot {
            config: WorkspaceConfig::default(),
            rental_period: RentalPeriod::OneWeek,
        };
        db.snapshots().save(SNAPSHOT_KEY, &updated).await.unwrap();

        let loaded = db.snapshots().load(SNAPSHOT_KEY).await.unwrap().unwrap();
        assert_eq!(loaded, updated);
    }

    #[tokio::test]
    async fn test_load_missing_key_is_none() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        assert!(db.snapshots().load("nothing-here").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_corrupt_payload_is_discarded() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        sqlx::query(
            "INSERT INTO workspace_snapshots (key, payload, updated_at) VALUES (?1, ?2, ?3)",
        )
        .bind(SNAPSHOT_KEY)
        .bind("{not json")
        .bind(Utc::now())
        .execute(db.pool())
        .await
        .unwrap();

        assert!(db.snapshots().load(SNAPSHOT_KEY).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_clear_is_idempotent() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        db.snapshots()
            .save(SNAPSHOT_KEY, &snapshot())
            .await
            .unwrap();
        db.snapshots().clear(SNAPSHOT_KEY).await.unwrap();
        assert!(db.snapshots().load(SNAPSHOT_KEY).await.unwrap().is_none());

        // Clearing again is a no-op
        db.snapshots().clear(SNAPSHOT_KEY).await.unwrap();
    }
}
