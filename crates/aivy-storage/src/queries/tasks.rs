// SPDX-FileCopyrightText: 2026 Aivy Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Task insert operations for the task-manager handler.

use aivy_core::AivyError;
use aivy_core::types::Task;
use rusqlite::params;

use crate::database::Database;

/// Record a follow-up task linked to a lead contact.
pub async fn insert_task(
    db: &Database,
    contact_id: &str,
    title: &str,
    description: Option<&str>,
) -> Result<Task, AivyError> {
    let task = Task {
        id: uuid::Uuid::new_v4().to_string(),
        contact_id: contact_id.to_string(),
        title: title.to_string(),
        description: description.map(String::from),
        created_at: chrono::Utc::now().to_rfc3339(),
    };
    let row = task.clone();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO tasks (id, contact_id, title, description, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![row.id, row.contact_id, row.title, row.description, row.created_at],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)?;
    Ok(task)
}

/// Count tasks linked to a contact (used by tests and reporting).
pub async fn count_tasks_for_contact(db: &Database, contact_id: &str) -> Result<i64, AivyError> {
    let contact_id = contact_id.to_string();
    db.connection()
        .call(move |conn| {
            let n = conn.query_row(
                "SELECT count(*) FROM tasks WHERE contact_id = ?1",
                params![contact_id],
                |row| row.get(0),
            )?;
            Ok(n)
        })
        .await
        .map_err(crate::database::map_tr_err)
}
