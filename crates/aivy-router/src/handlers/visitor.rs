// SPDX-FileCopyrightText: 2026 Aivy Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Visitor-engagement handler: the retrieval-augmented generation path.
//!
//! Embeds the query, retrieves knowledge chunks (two-tier threshold),
//! prioritizes them for the executive persona, assembles a bounded
//! role-tagged conversation history, and calls the generator under a
//! timeout.

use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use aivy_core::GenerationAdapter;
use aivy_core::executive::{ExecutiveContext, IntentAnalysis};
use aivy_core::types::{ChatMessage, ChatRole, ConversationTurn, GenerationRequest};
use aivy_core::AivyError;
use aivy_knowledge::{KnowledgeRetriever, prioritize_for_executive};
use aivy_memory::SessionContext;

use super::HandlerOutcome;

/// Answer a general inquiry through the RAG pipeline.
pub async fn handle(
    retriever: &KnowledgeRetriever,
    generator: Arc<dyn GenerationAdapter>,
    generation_timeout: Duration,
    message: &str,
    context: &SessionContext,
    intent: &IntentAnalysis,
) -> HandlerOutcome {
    // Retrieval never fails the turn: errors degrade to zero chunks.
    let chunks = retriever.retrieve(message).await;
    debug!(count = chunks.len(), "chunks retrieved for general inquiry");

    let executive_context = ExecutiveContext {
        profile: context.executive_profile.clone(),
        state: context.conversation_state.clone(),
        intent: intent.clone(),
    };
    let prioritized = prioritize_for_executive(chunks, &executive_context);
    let knowledge_sources: Vec<String> =
        prioritized.iter().map(|c| c.content.clone()).collect();

    let request = GenerationRequest {
        query: message.to_string(),
        chunks: prioritized,
        history: build_history(&context.recent_history),
        executive_context: serde_json::to_string(&executive_context)
            .unwrap_or_else(|_| "{}".to_string()),
    };

    match tokio::time::timeout(generation_timeout, generator.generate(request)).await {
        Ok(Ok(response)) => HandlerOutcome::Success {
            response,
            knowledge_sources,
        },
        Ok(Err(error)) => HandlerOutcome::Failure { error },
        Err(_) => HandlerOutcome::Failure {
            error: AivyError::Timeout {
                duration: generation_timeout,
            },
        },
    }
}

/// Convert stored turns into role-tagged generator history.
///
/// Each turn expands to a user message and an assistant message, keeping
/// the bounded window's chronological order.
fn build_history(recent_history: &[ConversationTurn]) -> Vec<ChatMessage> {
    let mut history = Vec::with_capacity(recent_history.len() * 2);
    for turn in recent_history {
        history.push(ChatMessage {
            role: ChatRole::User,
            content: turn.user_query.clone(),
        });
        history.push(ChatMessage {
            role: ChatRole::Assistant,
            content: turn.response_content.clone(),
        });
    }
    history
}
