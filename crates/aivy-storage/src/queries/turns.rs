// SPDX-FileCopyrightText: 2026 Aivy Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Conversation turn operations. Turns are append-only.

use aivy_core::AivyError;
use aivy_core::types::ConversationTurn;
use rusqlite::params;

use crate::database::Database;

fn row_to_turn(row: &rusqlite::Row) -> Result<ConversationTurn, rusqlite::Error> {
    Ok(ConversationTurn {
        id: row.get(0)?,
        session_id: row.get(1)?,
        user_query: row.get(2)?,
        response_content: row.get(3)?,
        intent_analysis: row.get(4)?,
        knowledge_sources: row.get(5)?,
        response_metrics: row.get(6)?,
        parent_turn_id: row.get(7)?,
        created_at: row.get(8)?,
    })
}

const TURN_COLUMNS: &str = "id, session_id, user_query, response_content, intent_analysis, \
     knowledge_sources, response_metrics, parent_turn_id, created_at";

/// Append a conversation turn.
pub async fn insert_turn(db: &Database, turn: &ConversationTurn) -> Result<(), AivyError> {
    let turn = turn.clone();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO conversation_turns
                     (id, session_id, user_query, response_content, intent_analysis,
                      knowledge_sources, response_metrics, parent_turn_id, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                params![
                    turn.id,
                    turn.session_id,
                    turn.user_query,
                    turn.response_content,
                    turn.intent_analysis,
                    turn.knowledge_sources,
                    turn.response_metrics,
                    turn.parent_turn_id,
                    turn.created_at,
                ],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Get a turn by ID.
pub async fn get_turn(db: &Database, id: &str) -> Result<Option<ConversationTurn>, AivyError> {
    let id = id.to_string();
    db.connection()
        .call(move |conn| {
            let result = conn.query_row(
                &format!("SELECT {TURN_COLUMNS} FROM conversation_turns WHERE id = ?1"),
                params![id],
                row_to_turn,
            );
            match result {
                Ok(turn) => Ok(Some(turn)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e.into()),
            }
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Get the most recent turns for a session, newest first.
///
/// Insertion order (rowid) breaks created_at ties so ordering stays
/// stable for turns recorded within the same millisecond.
pub async fn recent_turns(
    db: &Database,
    session_id: &str,
    limit: i64,
) -> Result<Vec<ConversationTurn>, AivyError> {
    let session_id = session_id.to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {TURN_COLUMNS} FROM conversation_turns
                 WHERE session_id = ?1
                 ORDER BY created_at DESC, rowid DESC
                 LIMIT ?2"
            ))?;
            let rows = stmt.query_map(params![session_id, limit], row_to_turn)?;
            let mut turns = Vec::new();
            for row in rows {
                turns.push(row?);
            }
            Ok(turns)
        })
        .await
        .map_err(crate::database::map_tr_err)
}
