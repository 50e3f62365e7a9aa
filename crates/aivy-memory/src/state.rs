// SPDX-FileCopyrightText: 2026 Aivy Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Conversation-state evolution.
//!
//! After every persisted turn, the session's conversation state and
//! executive profile are advanced from the detected intent and the raw
//! query. Pure functions over owned values; the memory service writes the
//! result back to storage.

use aivy_core::executive::{
    ConversationState, EngagementLevel, ExecutiveProfile, IntentAnalysis, PrimaryIntent,
};

const CHALLENGE_MARKERS: &[&str] = &["challenge", "problem", "issue", "difficult", "struggle"];

/// Maximum characters of a query kept as a challenge summary.
const CHALLENGE_SUMMARY_LEN: usize = 100;

/// Advance the conversation state from one interaction.
pub fn evolve_state(
    mut state: ConversationState,
    intent: &IntentAnalysis,
    user_query: &str,
) -> ConversationState {
    // Engagement deepens with decision-support and relationship signals.
    state.engagement_level = match (state.engagement_level, intent.primary_intent) {
        (EngagementLevel::Initial, PrimaryIntent::DecisionSupport) => EngagementLevel::Exploring,
        (_, PrimaryIntent::RelationshipBuilding) => EngagementLevel::Evaluating,
        (level, _) => level,
    };

    // Accumulate discussed topics without duplicates.
    for topic in &intent.key_topics {
        if !state.discussed_topics.contains(topic) {
            state.discussed_topics.push(topic.clone());
        }
    }

    // Capture newly expressed challenges as truncated query summaries.
    let lower = user_query.to_lowercase();
    if CHALLENGE_MARKERS.iter().any(|m| lower.contains(m)) {
        let already_covered = state
            .expressed_challenges
            .iter()
            .any(|c| lower.contains(&c.to_lowercase()));
        if !already_covered {
            let summary: String = user_query.chars().take(CHALLENGE_SUMMARY_LEN).collect();
            state.expressed_challenges.push(summary);
        }
    }

    state
}

/// Infer profile updates from language patterns in the query.
pub fn evolve_profile(mut profile: ExecutiveProfile, user_query: &str) -> ExecutiveProfile {
    let lower = user_query.to_lowercase();

    if lower.contains("multi-campus") || lower.contains("multiple campus") {
        profile.institution_size = Some("large".to_string());
    }

    // First-person institutional language suggests a senior administrator
    // when no role was stated yet.
    if (lower.contains("my institution") || lower.contains("we are")) && profile.role.is_none() {
        profile.role = Some("senior_administrator".to_string());
    }

    profile
}
