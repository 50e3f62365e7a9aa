// SPDX-FileCopyrightText: 2026 Aivy Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Conversation memory service.
//!
//! Owns session identity resolution, turn persistence, lead-contact
//! capture, and contextual summarization for the agent dispatcher. The
//! storage adapter is injected explicitly so the service can be exercised
//! with fakes in tests.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use aivy_config::model::MemoryConfig;
use aivy_core::executive::{ConversationState, ExecutiveProfile, IntentAnalysis};
use aivy_core::types::{ContactId, ConversationTurn, LeadContact, SessionId, TurnId};
use aivy_core::{AivyError, StorageAdapter};

use crate::state::{evolve_profile, evolve_state};

/// Everything a handler needs to know about the session before responding.
#[derive(Debug, Clone)]
pub struct SessionContext {
    pub session_id: String,
    pub executive_profile: ExecutiveProfile,
    pub conversation_state: ConversationState,
    /// Bounded window of prior turns, chronological, most recent last.
    pub recent_history: Vec<ConversationTurn>,
    pub lead_contact_id: Option<String>,
}

/// Contact details collected from the visitor during onboarding.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewLeadContact {
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub organization: Option<String>,
    pub role: Option<String>,
}

/// Heuristic quality metrics recorded with every turn.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseMetrics {
    pub word_count: usize,
    pub executive_appropriate: f64,
    pub conversational_flow: f64,
    pub action_oriented: f64,
    pub strategic_insight: f64,
}

impl ResponseMetrics {
    /// Score a response against executive-communication heuristics.
    pub fn from_response(response: &str, intent: &IntentAnalysis) -> Self {
        let word_count = response.split_whitespace().count();
        Self {
            word_count,
            executive_appropriate: if (50..=200).contains(&word_count) { 1.0 } else { 0.5 },
            conversational_flow: if response.contains('?') { 1.0 } else { 0.5 },
            action_oriented: if response.contains("next step") || response.contains("consider")
            {
                1.0
            } else {
                0.5
            },
            strategic_insight: if intent.strategic_focus.is_empty() { 0.5 } else { 1.0 },
        }
    }
}

/// Session lifecycle, turn history, and lead-contact association.
pub struct ConversationMemory {
    storage: Arc<dyn StorageAdapter>,
    history_limit: usize,
}

impl ConversationMemory {
    /// Creates a new conversation memory service over the given storage.
    pub fn new(storage: Arc<dyn StorageAdapter>, config: MemoryConfig) -> Self {
        Self {
            storage,
            history_limit: config.history_limit,
        }
    }

    /// Idempotent lookup-or-insert keyed by the caller-supplied token.
    ///
    /// User identifiers that are not UUIDs are treated as anonymous; the
    /// widget sends ephemeral browser ids before a durable identity exists.
    pub async fn get_or_create_session(
        &self,
        session_token: &str,
        user_id: Option<&str>,
    ) -> Result<SessionId, AivyError> {
        let user_id = user_id.filter(|u| uuid::Uuid::parse_str(u).is_ok());
        let session = self.storage.upsert_session(session_token, user_id).await?;
        Ok(SessionId(session.id))
    }

    /// Load session attributes plus a bounded window of prior turns.
    pub async fn session_context(&self, session_id: &str) -> Result<SessionContext, AivyError> {
        let session = self
            .storage
            .get_session(session_id)
            .await?
            .ok_or_else(|| AivyError::NotFound {
                entity: "session",
                id: session_id.to_string(),
            })?;

        let executive_profile: ExecutiveProfile =
            serde_json::from_str(&session.executive_profile).unwrap_or_default();
        let conversation_state: ConversationState =
            serde_json::from_str(&session.conversation_state).unwrap_or_default();

        // Storage returns newest first; reverse into chronological order.
        let mut recent_history = self
            .storage
            .recent_turns(session_id, self.history_limit as i64)
            .await?;
        recent_history.reverse();

        Ok(SessionContext {
            session_id: session.id,
            executive_profile,
            conversation_state,
            recent_history,
            lead_contact_id: session.lead_contact_id,
        })
    }

    /// Capture the session's lead contact, idempotently per session.
    ///
    /// Requires at minimum a name and a phone number. Repeated submissions
    /// refresh the existing contact rather than duplicating it.
    pub async fn create_lead_contact(
        &self,
        session_id: &str,
        contact: NewLeadContact,
    ) -> Result<ContactId, AivyError> {
        if contact.name.trim().is_empty() {
            return Err(AivyError::Validation(
                "lead contact requires a name".to_string(),
            ));
        }
        if contact.phone.trim().is_empty() {
            return Err(AivyError::Validation(
                "lead contact requires a phone number".to_string(),
            ));
        }

        if self.storage.get_session(session_id).await?.is_none() {
            return Err(AivyError::NotFound {
                entity: "session",
                id: session_id.to_string(),
            });
        }

        let now = chrono::Utc::now().to_rfc3339();
        let row = LeadContact {
            id: uuid::Uuid::new_v4().to_string(),
            session_id: session_id.to_string(),
            name: contact.name,
            phone: contact.phone,
            email: contact.email,
            organization: contact.organization,
            role: contact.role,
            created_at: now.clone(),
            updated_at: now,
        };
        let contact_id = self.storage.upsert_lead_contact(&row).await?;
        self.storage
            .set_session_contact(session_id, &contact_id.0)
            .await?;

        debug!(session_id, contact_id = %contact_id.0, "lead contact captured");
        Ok(contact_id)
    }

    /// Returns the session's lead contact, or `None` if none exists yet.
    pub async fn lead_contact(
        &self,
        session_id: &str,
    ) -> Result<Option<LeadContact>, AivyError> {
        self.storage.get_lead_contact(session_id).await
    }

    /// Append one turn, best-effort.
    ///
    /// The response has already been delivered to the caller by the time
    /// this runs; persistence failures are logged and swallowed so they
    /// never surface as chat errors. Returns the turn id when the write
    /// succeeded.
    pub async fn save_turn(
        &self,
        session_id: &str,
        user_query: &str,
        response: &str,
        intent: &IntentAnalysis,
        knowledge_sources: &[String],
        parent_turn_id: Option<&str>,
    ) -> Option<TurnId> {
        match self
            .try_save_turn(
                session_id,
                user_query,
                response,
                intent,
                knowledge_sources,
                parent_turn_id,
            )
            .await
        {
            Ok(turn_id) => Some(turn_id),
            Err(e) => {
                warn!(session_id, error = %e, "failed to persist conversation turn");
                None
            }
        }
    }

    async fn try_save_turn(
        &self,
        session_id: &str,
        user_query: &str,
        response: &str,
        intent: &IntentAnalysis,
        knowledge_sources: &[String],
        parent_turn_id: Option<&str>,
    ) -> Result<TurnId, AivyError> {
        // A parent turn must belong to the same session.
        if let Some(parent_id) = parent_turn_id {
            let parent = self.storage.get_turn(parent_id).await?.ok_or_else(|| {
                AivyError::Validation(format!("parent turn {parent_id} does not exist"))
            })?;
            if parent.session_id != session_id {
                return Err(AivyError::Validation(format!(
                    "parent turn {parent_id} belongs to a different session"
                )));
            }
        }

        let metrics = ResponseMetrics::from_response(response, intent);
        let turn = ConversationTurn {
            id: uuid::Uuid::new_v4().to_string(),
            session_id: session_id.to_string(),
            user_query: user_query.to_string(),
            response_content: response.to_string(),
            intent_analysis: serde_json::to_string(intent)
                .unwrap_or_else(|_| "{}".to_string()),
            knowledge_sources: serde_json::to_string(knowledge_sources)
                .unwrap_or_else(|_| "[]".to_string()),
            response_metrics: serde_json::to_string(&metrics)
                .unwrap_or_else(|_| "{}".to_string()),
            parent_turn_id: parent_turn_id.map(String::from),
            created_at: chrono::Utc::now().to_rfc3339(),
        };
        self.storage.insert_turn(&turn).await?;

        // Evolve conversation state and profile; failures here are logged
        // but the turn is already safely recorded.
        if let Err(e) = self.update_after_turn(session_id, intent, user_query).await {
            warn!(session_id, error = %e, "failed to update conversation state");
        }

        Ok(TurnId(turn.id))
    }

    async fn update_after_turn(
        &self,
        session_id: &str,
        intent: &IntentAnalysis,
        user_query: &str,
    ) -> Result<(), AivyError> {
        let session = self
            .storage
            .get_session(session_id)
            .await?
            .ok_or_else(|| AivyError::NotFound {
                entity: "session",
                id: session_id.to_string(),
            })?;

        let state: ConversationState =
            serde_json::from_str(&session.conversation_state).unwrap_or_default();
        let profile: ExecutiveProfile =
            serde_json::from_str(&session.executive_profile).unwrap_or_default();

        let next_state = evolve_state(state, intent, user_query);
        let next_profile = evolve_profile(profile, user_query);

        let state_json = serde_json::to_string(&next_state)
            .map_err(|e| AivyError::Internal(format!("state serialization failed: {e}")))?;
        let profile_json = serde_json::to_string(&next_profile)
            .map_err(|e| AivyError::Internal(format!("profile serialization failed: {e}")))?;

        self.storage
            .update_session_context(session_id, &profile_json, &state_json)
            .await
    }
}

/// Produce a new globally-unique opaque token for anonymous visitors.
pub fn generate_session_identifier() -> String {
    format!("anon_{}", uuid::Uuid::new_v4())
}
