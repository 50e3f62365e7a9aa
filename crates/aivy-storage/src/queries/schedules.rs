// SPDX-FileCopyrightText: 2026 Aivy Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Schedule insert operations for the scheduler handler.

use aivy_core::AivyError;
use aivy_core::types::Schedule;
use rusqlite::params;

use crate::database::Database;

/// Record a meeting request with the raw details text.
pub async fn insert_schedule(db: &Database, details: &str) -> Result<Schedule, AivyError> {
    let schedule = Schedule {
        id: uuid::Uuid::new_v4().to_string(),
        details: details.to_string(),
        created_at: chrono::Utc::now().to_rfc3339(),
    };
    let row = schedule.clone();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO schedules (id, details, created_at) VALUES (?1, ?2, ?3)",
                params![row.id, row.details, row.created_at],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)?;
    Ok(schedule)
}
