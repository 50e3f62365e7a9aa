// SPDX-FileCopyrightText: 2026 Aivy Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Storage adapter trait for persistence backends (SQLite, etc.).

use async_trait::async_trait;

use crate::error::AivyError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{ContactId, ConversationTurn, LeadContact, Schedule, Session, Task};

/// Adapter for storage and persistence backends.
///
/// Storage adapters manage the lifecycle of database connections and
/// provide the typed operations behind conversation memory, lead capture,
/// and the scheduler/task handlers.
#[async_trait]
pub trait StorageAdapter: PluginAdapter {
    /// Initializes the storage backend (migrations, connection pool, etc.).
    async fn initialize(&self) -> Result<(), AivyError>;

    /// Closes the storage backend, flushing pending writes and releasing connections.
    async fn close(&self) -> Result<(), AivyError>;

    // --- Session operations ---

    /// Atomic get-or-create keyed by the caller-supplied session token.
    ///
    /// Two near-simultaneous calls with the same token must resolve to the
    /// same session row; the implementation must enforce this at the
    /// storage layer (unique constraint + conflict-free insert), not as a
    /// read-then-write in application code.
    async fn upsert_session(
        &self,
        session_token: &str,
        user_id: Option<&str>,
    ) -> Result<Session, AivyError>;

    /// Fetches a session by its identifier.
    async fn get_session(&self, id: &str) -> Result<Option<Session>, AivyError>;

    /// Replaces the session's executive profile and conversation state JSON.
    async fn update_session_context(
        &self,
        id: &str,
        executive_profile: &str,
        conversation_state: &str,
    ) -> Result<(), AivyError>;

    /// Associates a lead contact with the session.
    async fn set_session_contact(&self, id: &str, contact_id: &str) -> Result<(), AivyError>;

    // --- Turn operations ---

    /// Appends one conversation turn. Turns are never mutated after creation.
    async fn insert_turn(&self, turn: &ConversationTurn) -> Result<(), AivyError>;

    /// Fetches a turn by its identifier.
    async fn get_turn(&self, id: &str) -> Result<Option<ConversationTurn>, AivyError>;

    /// Returns the most recent turns for a session, newest first.
    async fn recent_turns(
        &self,
        session_id: &str,
        limit: i64,
    ) -> Result<Vec<ConversationTurn>, AivyError>;

    // --- Lead contact operations ---

    /// Inserts or refreshes the session's lead contact (one per session).
    async fn upsert_lead_contact(&self, contact: &LeadContact) -> Result<ContactId, AivyError>;

    /// Returns the session's lead contact, or `None` if none was captured yet.
    async fn get_lead_contact(&self, session_id: &str)
    -> Result<Option<LeadContact>, AivyError>;

    // --- Handler side effects ---

    /// Records a meeting request.
    async fn insert_schedule(&self, details: &str) -> Result<Schedule, AivyError>;

    /// Records a follow-up task linked to a lead contact.
    async fn insert_task(
        &self,
        contact_id: &str,
        title: &str,
        description: Option<&str>,
    ) -> Result<Task, AivyError>;
}
