// SPDX-FileCopyrightText: 2026 Aivy Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types used across adapter traits and the Aivy conversational core.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Unique identifier for a conversation session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub String);

/// Unique identifier for a conversation turn.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TurnId(pub String);

/// Unique identifier for a lead contact.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContactId(pub String);

/// Health status reported by adapter health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Adapter is fully operational.
    Healthy,
    /// Adapter is operational but experiencing issues.
    Degraded(String),
    /// Adapter is not operational.
    Unhealthy(String),
}

/// Identifies the type of adapter behind a trait object.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
pub enum AdapterType {
    Storage,
    Embedding,
    Generation,
}

// --- Storage rows ---

/// One continuous conversation, identified by a caller-supplied opaque token.
///
/// Sessions are created on first contact (get-or-create keyed by the token)
/// and mutated as the conversation evolves. They are never hard-deleted by
/// the core.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
    /// Client-supplied opaque token; unique across sessions.
    pub session_token: String,
    pub user_id: Option<String>,
    /// Set once a lead contact has been captured for this session.
    pub lead_contact_id: Option<String>,
    /// Executive profile as a JSON document.
    pub executive_profile: String,
    /// Conversation state as a JSON document.
    pub conversation_state: String,
    /// ISO 8601 creation timestamp.
    pub created_at: String,
    /// ISO 8601 last-update timestamp.
    pub updated_at: String,
}

/// One user-query/agent-response exchange within a session. Append-only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub id: String,
    pub session_id: String,
    pub user_query: String,
    pub response_content: String,
    /// Intent analysis result as a JSON document.
    pub intent_analysis: String,
    /// Knowledge sources used for the response, as a JSON array.
    pub knowledge_sources: String,
    /// Response metrics as a JSON document (opaque to the core).
    pub response_metrics: String,
    /// When present, references a prior turn in the same session.
    pub parent_turn_id: Option<String>,
    /// ISO 8601 creation timestamp.
    pub created_at: String,
}

/// A prospective customer captured during conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeadContact {
    pub id: String,
    pub session_id: String,
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub organization: Option<String>,
    pub role: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// A meeting request recorded by the scheduler handler.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Schedule {
    pub id: String,
    /// Raw meeting details as provided by the visitor.
    pub details: String,
    pub created_at: String,
}

/// A follow-up task linked to a lead contact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub contact_id: String,
    pub title: String,
    pub description: Option<String>,
    pub created_at: String,
}

// --- Retrieval and generation types ---

/// A knowledge-base passage returned by similarity search.
///
/// Read-only view object: not owned or persisted by the core, it exists
/// only during a single retrieval+generation cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct RetrievedChunk {
    pub content: String,
    /// Similarity score in [0, 1].
    pub similarity: f32,
}

/// Who authored a message in the bounded conversation history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatRole {
    User,
    Assistant,
}

impl ChatRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChatRole::User => "user",
            ChatRole::Assistant => "assistant",
        }
    }
}

/// One role-tagged entry in the conversation history handed to the generator.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

/// A request to the RAG response generator.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    /// The raw user message.
    pub query: String,
    /// Prioritized knowledge chunks to condition the response on.
    pub chunks: Vec<RetrievedChunk>,
    /// Bounded conversation history, chronological, most recent last.
    pub history: Vec<ChatMessage>,
    /// Executive context bundle (profile + state + intent) as a JSON document.
    pub executive_context: String,
}
