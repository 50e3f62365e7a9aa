// SPDX-FileCopyrightText: 2026 Aivy Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite implementation of the StorageAdapter trait.

use async_trait::async_trait;
use tokio::sync::OnceCell;
use tracing::debug;

use aivy_config::model::StorageConfig;
use aivy_core::types::{ContactId, ConversationTurn, LeadContact, Schedule, Session, Task};
use aivy_core::{AdapterType, AivyError, HealthStatus, PluginAdapter, StorageAdapter};

use crate::database::Database;
use crate::queries;

/// SQLite-backed storage adapter.
///
/// Wraps a [`Database`] handle and delegates all query operations to the
/// typed query modules. The database is lazily initialized on the first
/// call to [`StorageAdapter::initialize`].
pub struct SqliteStorage {
    config: StorageConfig,
    db: OnceCell<Database>,
}

impl SqliteStorage {
    /// Create a new SqliteStorage with the given configuration.
    ///
    /// The database connection is not opened until [`StorageAdapter::initialize`]
    /// is called.
    pub fn new(config: StorageConfig) -> Self {
        Self {
            config,
            db: OnceCell::new(),
        }
    }

    /// Returns a reference to the underlying Database, or an error if not initialized.
    fn db(&self) -> Result<&Database, AivyError> {
        self.db.get().ok_or_else(|| AivyError::Storage {
            source: "storage not initialized -- call initialize() first".into(),
        })
    }

    /// Returns the initialized Database for wiring components that share
    /// the single writer thread (e.g. the knowledge store).
    pub fn database(&self) -> Result<&Database, AivyError> {
        self.db()
    }
}

#[async_trait]
impl PluginAdapter for SqliteStorage {
    fn name(&self) -> &str {
        "sqlite"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Storage
    }

    async fn health_check(&self) -> Result<HealthStatus, AivyError> {
        let db = self.db()?;
        db.connection()
            .call(|conn| {
                conn.execute_batch("SELECT 1;")?;
                Ok(())
            })
            .await
            .map_err(crate::database::map_tr_err)?;
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), AivyError> {
        // Shutdown delegates to close if the DB was initialized.
        if let Some(db) = self.db.get() {
            db.close().await?;
            debug!("shutdown: WAL checkpoint complete");
        }
        Ok(())
    }
}

#[async_trait]
impl StorageAdapter for SqliteStorage {
    async fn initialize(&self) -> Result<(), AivyError> {
        let db = Database::open(&self.config.database_path).await?;
        self.db.set(db).map_err(|_| AivyError::Storage {
            source: "storage already initialized".into(),
        })?;
        debug!(path = %self.config.database_path, "SQLite storage initialized");
        Ok(())
    }

    async fn close(&self) -> Result<(), AivyError> {
        self.db()?.close().await
    }

    // --- Session operations ---

    async fn upsert_session(
        &self,
        session_token: &str,
        user_id: Option<&str>,
    ) -> Result<Session, AivyError> {
        queries::sessions::upsert_session(self.db()?, session_token, user_id).await
    }

    async fn get_session(&self, id: &str) -> Result<Option<Session>, AivyError> {
        queries::sessions::get_session(self.db()?, id).await
    }

    async fn update_session_context(
        &self,
        id: &str,
        executive_profile: &str,
        conversation_state: &str,
    ) -> Result<(), AivyError> {
        queries::sessions::update_session_context(
            self.db()?,
            id,
            executive_profile,
            conversation_state,
        )
        .await
    }

    async fn set_session_contact(&self, id: &str, contact_id: &str) -> Result<(), AivyError> {
        queries::sessions::set_session_contact(self.db()?, id, contact_id).await
    }

    // --- Turn operations ---

    async fn insert_turn(&self, turn: &ConversationTurn) -> Result<(), AivyError> {
        queries::turns::insert_turn(self.db()?, turn).await
    }

    async fn get_turn(&self, id: &str) -> Result<Option<ConversationTurn>, AivyError> {
        queries::turns::get_turn(self.db()?, id).await
    }

    async fn recent_turns(
        &self,
        session_id: &str,
        limit: i64,
    ) -> Result<Vec<ConversationTurn>, AivyError> {
        queries::turns::recent_turns(self.db()?, session_id, limit).await
    }

    // --- Lead contact operations ---

    async fn upsert_lead_contact(&self, contact: &LeadContact) -> Result<ContactId, AivyError> {
        queries::contacts::upsert_lead_contact(self.db()?, contact).await
    }

    async fn get_lead_contact(
        &self,
        session_id: &str,
    ) -> Result<Option<LeadContact>, AivyError> {
        queries::contacts::get_lead_contact(self.db()?, session_id).await
    }

    // --- Handler side effects ---

    async fn insert_schedule(&self, details: &str) -> Result<Schedule, AivyError> {
        queries::schedules::insert_schedule(self.db()?, details).await
    }

    async fn insert_task(
        &self,
        contact_id: &str,
        title: &str,
        description: Option<&str>,
    ) -> Result<Task, AivyError> {
        queries::tasks::insert_task(self.db()?, contact_id, title, description).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use tempfile::tempdir;

    fn make_config(path: &str) -> StorageConfig {
        StorageConfig {
            database_path: path.to_string(),
            wal_mode: true,
        }
    }

    async fn initialized_storage(dir: &tempfile::TempDir, file: &str) -> SqliteStorage {
        let db_path = dir.path().join(file);
        let storage = SqliteStorage::new(make_config(db_path.to_str().unwrap()));
        storage.initialize().await.unwrap();
        storage
    }

    #[tokio::test]
    async fn implements_plugin_adapter() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("plugin.db");
        let storage = SqliteStorage::new(make_config(db_path.to_str().unwrap()));

        assert_eq!(storage.name(), "sqlite");
        assert_eq!(storage.version(), semver::Version::new(0, 1, 0));
        assert_eq!(storage.adapter_type(), AdapterType::Storage);
    }

    #[tokio::test]
    async fn initialize_twice_returns_error() {
        let dir = tempdir().unwrap();
        let storage = initialized_storage(&dir, "double_init.db").await;
        assert!(storage.initialize().await.is_err());
    }

    #[tokio::test]
    async fn health_check_fails_when_not_initialized() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("no_init.db");
        let storage = SqliteStorage::new(make_config(db_path.to_str().unwrap()));
        assert!(storage.health_check().await.is_err());
    }

    #[tokio::test]
    async fn health_check_returns_healthy_when_initialized() {
        let dir = tempdir().unwrap();
        let storage = initialized_storage(&dir, "health.db").await;
        assert_eq!(storage.health_check().await.unwrap(), HealthStatus::Healthy);
    }

    #[tokio::test]
    async fn full_conversation_lifecycle_through_adapter() {
        let dir = tempdir().unwrap();
        let storage = initialized_storage(&dir, "lifecycle.db").await;

        // Get-or-create a session.
        let session = storage.upsert_session("tok-life", Some("user-1")).await.unwrap();
        assert_eq!(session.session_token, "tok-life");

        // Append a turn and read it back through recent_turns.
        let turn = ConversationTurn {
            id: "t1".to_string(),
            session_id: session.id.clone(),
            user_query: "what does the platform do?".to_string(),
            response_content: "It unifies enrollment and analytics.".to_string(),
            intent_analysis: "{}".to_string(),
            knowledge_sources: "[]".to_string(),
            response_metrics: "{}".to_string(),
            parent_turn_id: None,
            created_at: "2026-01-01T00:00:01.000Z".to_string(),
        };
        storage.insert_turn(&turn).await.unwrap();

        let turns = storage.recent_turns(&session.id, 5).await.unwrap();
        assert_eq!(turns.len(), 1);
        assert_eq!(turns[0].id, "t1");

        // Capture a lead contact and link it.
        let contact = LeadContact {
            id: "c1".to_string(),
            session_id: session.id.clone(),
            name: "Dana Osei".to_string(),
            phone: "555-0100".to_string(),
            email: None,
            organization: None,
            role: None,
            created_at: "2026-01-01T00:00:02.000Z".to_string(),
            updated_at: "2026-01-01T00:00:02.000Z".to_string(),
        };
        let contact_id = storage.upsert_lead_contact(&contact).await.unwrap();
        storage.set_session_contact(&session.id, &contact_id.0).await.unwrap();

        let updated = storage.get_session(&session.id).await.unwrap().unwrap();
        assert_eq!(updated.lead_contact_id, Some("c1".to_string()));

        // Handler side effects.
        storage.insert_schedule("demo on Friday").await.unwrap();
        storage
            .insert_task(&contact_id.0, "Send deck", None)
            .await
            .unwrap();

        storage.close().await.unwrap();
    }

    #[tokio::test]
    async fn concurrent_upserts_with_same_token_yield_one_session() {
        let dir = tempdir().unwrap();
        let storage = Arc::new(initialized_storage(&dir, "race.db").await);

        let mut handles = Vec::new();
        for _ in 0..8 {
            let storage = storage.clone();
            handles.push(tokio::spawn(async move {
                storage.upsert_session("tok-race", None).await.unwrap().id
            }));
        }

        let mut ids = Vec::new();
        for handle in handles {
            ids.push(handle.await.unwrap());
        }
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 1, "all concurrent calls must resolve to one session");
    }

    #[tokio::test]
    async fn shutdown_runs_checkpoint() {
        let dir = tempdir().unwrap();
        let storage = initialized_storage(&dir, "shutdown.db").await;
        storage.upsert_session("tok-shutdown", None).await.unwrap();
        storage.shutdown().await.unwrap();
    }
}
