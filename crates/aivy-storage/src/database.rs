// SPDX-FileCopyrightText: 2026 Aivy Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Database connection management with PRAGMA setup, WAL mode, and lifecycle.
//!
//! All writes are serialized through tokio-rusqlite's single background thread.
//! Do NOT create additional Connection instances for writes.

use aivy_core::AivyError;
use tokio_rusqlite::Connection;
use tracing::debug;

use crate::migrations;

/// Helper to convert tokio_rusqlite errors into AivyError::Storage.
pub fn map_tr_err(e: tokio_rusqlite::Error) -> AivyError {
    AivyError::Storage {
        source: Box::new(e),
    }
}

/// A single-writer SQLite database handle.
///
/// Opening the database applies PRAGMAs (WAL, foreign keys) and runs all
/// pending embedded migrations. Query modules accept `&Database` and
/// funnel every statement through [`Database::connection`].
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Opens (or creates) the database at the given path and runs migrations.
    pub async fn open(path: &str) -> Result<Self, AivyError> {
        if let Some(parent) = std::path::Path::new(path).parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| AivyError::Storage {
                source: Box::new(e),
            })?;
        }

        let conn = Connection::open(path).await.map_err(|e| AivyError::Storage {
            source: Box::new(e),
        })?;

        conn.call(|conn| {
            conn.execute_batch(
                "PRAGMA journal_mode = WAL;
                 PRAGMA synchronous = NORMAL;
                 PRAGMA foreign_keys = ON;",
            )?;
            Ok(migrations::run_migrations(conn))
        })
        .await
        .map_err(map_tr_err)??;

        debug!(path, "database opened, migrations applied");
        Ok(Self { conn })
    }

    /// Opens an in-memory database with migrations applied (tests only).
    pub async fn open_in_memory() -> Result<Self, AivyError> {
        let conn = Connection::open_in_memory().await.map_err(map_tr_err)?;
        conn.call(|conn| {
            conn.execute_batch("PRAGMA foreign_keys = ON;")?;
            migrations::run_migrations(conn)
                .map_err(|e| tokio_rusqlite::Error::Other(e.into()))?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)?;
        Ok(Self { conn })
    }

    /// Returns the underlying connection handle.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Checkpoints the WAL and releases the connection.
    pub async fn close(&self) -> Result<(), AivyError> {
        self.conn
            .call(|conn| {
                conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
                Ok(())
            })
            .await
            .map_err(map_tr_err)?;
        debug!("WAL checkpoint complete");
        Ok(())
    }
}
