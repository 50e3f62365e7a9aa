// SPDX-FileCopyrightText: 2026 Aivy Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Agent dispatcher: per-message routing from classified intent to handler.
//!
//! Each inbound message moves through a small per-message FSM:
//! Received -> Classified -> Dispatched -> {Handled | HandlerFailed} -> Persisted.
//! `Persisted` is the success terminal; `HandlerFailed` is terminal for a
//! message whose handler failed -- a best-effort fallback response is still
//! produced and persistence is still attempted.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, error, info};

use aivy_config::model::GenerationConfig;
use aivy_core::types::TurnId;
use aivy_core::{AivyError, GenerationAdapter, StorageAdapter};
use aivy_knowledge::KnowledgeRetriever;
use aivy_memory::{ConversationMemory, analyze_intent};

use crate::classifier::{Intent, IntentClassifier};
use crate::handlers::{self, HandlerOutcome};

/// States in the per-message dispatch FSM.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchState {
    /// Message received, session resolved.
    Received,
    /// Intent classified.
    Classified,
    /// Handler selected and invoked.
    Dispatched,
    /// Handler produced a normal response.
    Handled,
    /// Handler failed; a fallback response was produced.
    HandlerFailed,
    /// Response delivered and turn persistence attempted.
    Persisted,
}

impl std::fmt::Display for DispatchState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            DispatchState::Received => "received",
            DispatchState::Classified => "classified",
            DispatchState::Dispatched => "dispatched",
            DispatchState::Handled => "handled",
            DispatchState::HandlerFailed => "handler_failed",
            DispatchState::Persisted => "persisted",
        };
        f.write_str(s)
    }
}

/// Outcome of dispatching one message.
#[derive(Debug)]
pub struct DispatchReport {
    /// The response text delivered to the visitor.
    pub response: String,
    /// The routing intent the message was classified as.
    pub intent: Intent,
    /// Terminal FSM state for this message.
    pub state: DispatchState,
    /// Session the message belongs to.
    pub session_id: String,
    /// Persisted turn id, when the best-effort write succeeded.
    pub turn_id: Option<TurnId>,
}

/// Routes classified messages to specialized handlers and persists turns.
pub struct AgentDispatcher {
    memory: Arc<ConversationMemory>,
    storage: Arc<dyn StorageAdapter>,
    retriever: Arc<KnowledgeRetriever>,
    generator: Arc<dyn GenerationAdapter>,
    classifier: IntentClassifier,
    generation_timeout: Duration,
}

impl AgentDispatcher {
    /// Creates a new dispatcher over the injected collaborators.
    pub fn new(
        memory: Arc<ConversationMemory>,
        storage: Arc<dyn StorageAdapter>,
        retriever: Arc<KnowledgeRetriever>,
        generator: Arc<dyn GenerationAdapter>,
        config: &GenerationConfig,
    ) -> Self {
        Self {
            memory,
            storage,
            retriever,
            generator,
            classifier: IntentClassifier::new(),
            generation_timeout: Duration::from_secs(config.timeout_secs),
        }
    }

    /// Handle one inbound chat message end to end.
    ///
    /// Session resolution and context loading are prerequisites and
    /// propagate their errors; everything after the handler runs is
    /// best-effort so the visitor always gets a response once one exists.
    pub async fn handle_message(
        &self,
        message: &str,
        session_token: &str,
        user_id: Option<&str>,
        parent_turn_id: Option<&str>,
    ) -> Result<DispatchReport, AivyError> {
        let session_id = self
            .memory
            .get_or_create_session(session_token, user_id)
            .await?;
        let context = self.memory.session_context(&session_id.0).await?;
        let mut state = DispatchState::Received;
        debug!(session_id = %session_id.0, state = %state, "message received");

        let intent = self.classifier.classify(message);
        state = DispatchState::Classified;
        debug!(session_id = %session_id.0, intent = %intent, state = %state, "intent classified");

        let analysis = analyze_intent(message, &context.executive_profile);

        state = DispatchState::Dispatched;
        debug!(session_id = %session_id.0, state = %state, "handler selected");
        let outcome = match intent {
            Intent::Scheduling => {
                handlers::scheduler::handle(self.storage.as_ref(), message).await
            }
            Intent::TaskManagement => {
                handlers::tasks::handle(self.storage.as_ref(), message, &context).await
            }
            Intent::GeneralInquiry => {
                handlers::visitor::handle(
                    self.retriever.as_ref(),
                    self.generator.clone(),
                    self.generation_timeout,
                    message,
                    &context,
                    &analysis,
                )
                .await
            }
        };

        let (response, knowledge_sources) = match outcome {
            HandlerOutcome::Success {
                response,
                knowledge_sources,
            } => {
                state = DispatchState::Handled;
                (response, knowledge_sources)
            }
            HandlerOutcome::Failure { error: e } => {
                error!(session_id = %session_id.0, intent = %intent, error = %e, "handler failed");
                state = DispatchState::HandlerFailed;
                (fallback_response(intent), Vec::new())
            }
        };

        // Best-effort persistence: the response is delivered regardless.
        let turn_id = self
            .memory
            .save_turn(
                &session_id.0,
                message,
                &response,
                &analysis,
                &knowledge_sources,
                parent_turn_id,
            )
            .await;

        if state == DispatchState::Handled {
            state = DispatchState::Persisted;
        }

        info!(
            session_id = %session_id.0,
            intent = %intent,
            state = %state,
            persisted = turn_id.is_some(),
            "message dispatched"
        );

        Ok(DispatchReport {
            response,
            intent,
            state,
            session_id: session_id.0,
            turn_id,
        })
    }
}

/// Phrase a handler failure for the visitor without leaking internals.
fn fallback_response(intent: Intent) -> String {
    match intent {
        Intent::Scheduling => "I wasn't able to save your meeting request just now. \
             Could you share your preferred time again in a moment?"
            .to_string(),
        Intent::TaskManagement => {
            "I couldn't record that task right now. Please try again shortly.".to_string()
        }
        Intent::GeneralInquiry => "I'm having trouble putting an answer together right now. \
             Please try again in a moment."
            .to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dispatch_state_display() {
        assert_eq!(DispatchState::Received.to_string(), "received");
        assert_eq!(DispatchState::HandlerFailed.to_string(), "handler_failed");
        assert_eq!(DispatchState::Persisted.to_string(), "persisted");
    }

    #[test]
    fn fallback_responses_never_leak_error_detail() {
        for intent in [
            Intent::Scheduling,
            Intent::TaskManagement,
            Intent::GeneralInquiry,
        ] {
            let text = fallback_response(intent);
            assert!(!text.to_lowercase().contains("error"));
            assert!(!text.to_lowercase().contains("storage"));
        }
    }
}
