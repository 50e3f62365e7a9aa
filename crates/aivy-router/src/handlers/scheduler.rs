// SPDX-FileCopyrightText: 2026 Aivy Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Scheduler handler: records meeting requests.
//!
//! The entire message is treated as opaque meeting details; parsing dates
//! and attendees is left to the humans who follow up.

use tracing::debug;

use aivy_core::StorageAdapter;

use super::HandlerOutcome;

/// Record the message as a meeting request.
pub async fn handle(storage: &dyn StorageAdapter, message: &str) -> HandlerOutcome {
    match storage.insert_schedule(message).await {
        Ok(schedule) => {
            debug!(schedule_id = %schedule.id, "meeting request recorded");
            HandlerOutcome::text(
                "I've noted your meeting request and our team will reach out shortly to \
                 confirm a time. Is there anything else I can help you with in the meantime?",
            )
        }
        Err(error) => HandlerOutcome::Failure { error },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aivy_config::model::StorageConfig;
    use aivy_core::AivyError;
    use aivy_storage::SqliteStorage;
    use tempfile::tempdir;

    async fn storage(dir: &tempfile::TempDir) -> SqliteStorage {
        let db_path = dir.path().join("scheduler.db");
        let storage = SqliteStorage::new(StorageConfig {
            database_path: db_path.to_str().unwrap().to_string(),
            wal_mode: true,
        });
        storage.initialize().await.unwrap();
        storage
    }

    #[tokio::test]
    async fn successful_insert_yields_confirmation_text() {
        let dir = tempdir().unwrap();
        let storage = storage(&dir).await;

        let outcome = handle(&storage, "schedule a demo next Tuesday at 10am").await;
        match outcome {
            HandlerOutcome::Success { response, .. } => {
                assert!(response.contains("meeting request"));
                // The raw storage record id never leaks into chat text.
                assert!(!response.contains("schedules"));
            }
            HandlerOutcome::Failure { .. } => panic!("insert should succeed"),
        }
    }

    #[tokio::test]
    async fn storage_failure_is_a_tagged_failure_not_chat_text() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("uninitialized.db");
        // Never initialized: every operation fails with a storage error.
        let storage = SqliteStorage::new(StorageConfig {
            database_path: db_path.to_str().unwrap().to_string(),
            wal_mode: true,
        });

        let outcome = handle(&storage, "schedule a call").await;
        match outcome {
            HandlerOutcome::Failure { error } => {
                assert!(matches!(error, AivyError::Storage { .. }));
            }
            HandlerOutcome::Success { .. } => {
                panic!("storage failure must not surface as a success response")
            }
        }
    }
}
