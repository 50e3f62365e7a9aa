// SPDX-FileCopyrightText: 2026 Aivy Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Session CRUD operations.

use aivy_core::AivyError;
use aivy_core::types::Session;
use rusqlite::params;

use crate::database::Database;

fn row_to_session(row: &rusqlite::Row) -> Result<Session, rusqlite::Error> {
    Ok(Session {
        id: row.get(0)?,
        session_token: row.get(1)?,
        user_id: row.get(2)?,
        lead_contact_id: row.get(3)?,
        executive_profile: row.get(4)?,
        conversation_state: row.get(5)?,
        created_at: row.get(6)?,
        updated_at: row.get(7)?,
    })
}

const SESSION_COLUMNS: &str = "id, session_token, user_id, lead_contact_id, \
     executive_profile, conversation_state, created_at, updated_at";

/// Atomic get-or-create keyed by the session token.
///
/// The conditional insert and the follow-up select run in one closure on
/// the single writer thread; the UNIQUE constraint on `session_token`
/// guarantees that concurrent calls with the same token resolve to the
/// same row.
pub async fn upsert_session(
    db: &Database,
    session_token: &str,
    user_id: Option<&str>,
) -> Result<Session, AivyError> {
    let token = session_token.to_string();
    let user_id = user_id.map(String::from);
    let new_id = uuid::Uuid::new_v4().to_string();
    let now = chrono::Utc::now().to_rfc3339();

    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO conversation_sessions
                     (id, session_token, user_id, executive_profile, conversation_state,
                      created_at, updated_at)
                 VALUES (?1, ?2, ?3, '{}', '{}', ?4, ?4)
                 ON CONFLICT(session_token) DO NOTHING",
                params![new_id, token, user_id, now],
            )?;
            let session = conn.query_row(
                &format!(
                    "SELECT {SESSION_COLUMNS} FROM conversation_sessions WHERE session_token = ?1"
                ),
                params![token],
                row_to_session,
            )?;
            Ok(session)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Get a session by ID.
pub async fn get_session(db: &Database, id: &str) -> Result<Option<Session>, AivyError> {
    let id = id.to_string();
    db.connection()
        .call(move |conn| {
            let result = conn.query_row(
                &format!("SELECT {SESSION_COLUMNS} FROM conversation_sessions WHERE id = ?1"),
                params![id],
                row_to_session,
            );
            match result {
                Ok(session) => Ok(Some(session)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e.into()),
            }
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Replace a session's executive profile and conversation state JSON.
pub async fn update_session_context(
    db: &Database,
    id: &str,
    executive_profile: &str,
    conversation_state: &str,
) -> Result<(), AivyError> {
    let id = id.to_string();
    let profile = executive_profile.to_string();
    let state = conversation_state.to_string();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "UPDATE conversation_sessions
                 SET executive_profile = ?1, conversation_state = ?2,
                     updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
                 WHERE id = ?3",
                params![profile, state, id],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Associate a lead contact with a session.
pub async fn set_session_contact(
    db: &Database,
    id: &str,
    contact_id: &str,
) -> Result<(), AivyError> {
    let id = id.to_string();
    let contact_id = contact_id.to_string();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "UPDATE conversation_sessions
                 SET lead_contact_id = ?1,
                     updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
                 WHERE id = ?2",
                params![contact_id, id],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}
