// SPDX-FileCopyrightText: 2026 Aivy Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Executive knowledge prioritization.
//!
//! Re-orders retrieved chunks for a senior-decision-maker audience using
//! zero-cost keyword scoring. Pure function of its inputs: no I/O, no
//! hidden state.

use aivy_core::executive::{DecisionStage, ExecutiveContext, PrimaryIntent, Urgency};
use aivy_core::types::RetrievedChunk;

/// Maximum number of chunks handed to the generator.
const MAX_PRIORITIZED: usize = 5;

/// Strategic leadership keywords (high weight).
const STRATEGIC_KEYWORDS: &[&str] = &[
    "strategic", "leadership", "executive", "decision", "roi", "business case",
    "competitive advantage", "market position", "institutional excellence",
    "transformation", "innovation", "scalability", "growth", "efficiency",
];

/// Decision-support content markers.
const DECISION_KEYWORDS: &[&str] =
    &["implementation", "cost", "timeline", "resource", "risk", "benefit"];

/// Problem-solving content markers.
const SOLUTION_KEYWORDS: &[&str] =
    &["solution", "challenge", "problem", "resolve", "address", "overcome"];

/// Relationship-building content markers.
const RELATIONSHIP_KEYWORDS: &[&str] =
    &["partnership", "collaboration", "support", "service", "relationship"];

/// Markers boosted when the executive signals high urgency.
const URGENCY_KEYWORDS: &[&str] = &["immediate", "quick", "fast", "rapid", "urgent"];

/// Markers relevant during vendor comparison.
const EVALUATION_KEYWORDS: &[&str] = &["comparison", "vs", "alternative", "option", "evaluate"];

/// Markers relevant when closing a decision.
const CLOSING_KEYWORDS: &[&str] =
    &["pricing", "contract", "agreement", "implementation", "onboarding"];

/// Overly technical content is penalized for an executive audience.
const TECHNICAL_KEYWORDS: &[&str] = &[
    "api", "database", "server", "configuration", "technical implementation",
    "code", "developer", "programming", "debugging",
];

/// Business-outcome content is boosted.
const BUSINESS_OUTCOME_KEYWORDS: &[&str] = &[
    "result", "outcome", "impact", "benefit", "value", "return",
    "improvement", "success", "achievement", "performance", "metric",
];

/// Keyword sets per strategic focus area.
const FOCUS_KEYWORDS: &[(&str, &[&str])] = &[
    ("scalability", &["scale", "growth", "expansion", "multiple", "campus"]),
    ("operational_efficiency", &["efficiency", "streamline", "optimize", "automate"]),
    ("student_success", &["student success", "outcomes", "achievement", "performance"]),
    ("competitive_advantage", &["competitive", "advantage", "differentiate", "unique"]),
];

/// Prioritizes knowledge chunks for executive relevance.
///
/// Combined score = similarity * 0.6 + executive score * 0.4; output is
/// sorted by combined score descending and truncated to the generator's
/// context budget. The output never exceeds the input in length and never
/// contains a chunk that was not in the input.
pub fn prioritize_for_executive(
    chunks: Vec<RetrievedChunk>,
    context: &ExecutiveContext,
) -> Vec<RetrievedChunk> {
    let mut scored: Vec<(RetrievedChunk, f32)> = chunks
        .into_iter()
        .map(|chunk| {
            let executive_score = executive_score(&chunk, context);
            (chunk, executive_score)
        })
        .collect();

    scored.sort_by(|a, b| {
        let score_a = a.0.similarity * 0.6 + a.1 * 0.4;
        let score_b = b.0.similarity * 0.6 + b.1 * 0.4;
        score_b.partial_cmp(&score_a).unwrap_or(std::cmp::Ordering::Equal)
    });

    scored.truncate(MAX_PRIORITIZED);
    scored.into_iter().map(|(chunk, _)| chunk).collect()
}

/// Calculates executive relevance for one chunk, clamped to [0, 1].
fn executive_score(chunk: &RetrievedChunk, context: &ExecutiveContext) -> f32 {
    let content = chunk.content.to_lowercase();
    let mut score = 0.0_f32;

    score += 0.15 * count_matches(&content, STRATEGIC_KEYWORDS);

    // Intent-specific scoring.
    let intent_keywords = match context.intent.primary_intent {
        PrimaryIntent::DecisionSupport => Some(DECISION_KEYWORDS),
        PrimaryIntent::ProblemSolving => Some(SOLUTION_KEYWORDS),
        PrimaryIntent::RelationshipBuilding => Some(RELATIONSHIP_KEYWORDS),
        PrimaryIntent::InformationSeeking => None,
    };
    if let Some(keywords) = intent_keywords {
        score += 0.12 * count_matches(&content, keywords);
    }

    if context.intent.urgency == Urgency::High {
        score += 0.10 * count_matches(&content, URGENCY_KEYWORDS);
    }

    match context.intent.decision_stage {
        DecisionStage::Evaluation => {
            score += 0.08 * count_matches(&content, EVALUATION_KEYWORDS);
        }
        DecisionStage::Decision => {
            score += 0.08 * count_matches(&content, CLOSING_KEYWORDS);
        }
        _ => {}
    }

    // Institution size relevance.
    match context.profile.institution_size.as_deref() {
        Some("large") if content.contains("multi-campus") => score += 0.10,
        Some("small") if content.contains("single campus") => score += 0.08,
        _ => {}
    }

    // Continuity bonus for previously discussed topics.
    for topic in &context.state.discussed_topics {
        if content.contains(&topic.to_lowercase()) {
            score += 0.05;
        }
    }

    // Strategic focus areas detected in the intent analysis.
    for focus in &context.intent.strategic_focus {
        if let Some((_, keywords)) = FOCUS_KEYWORDS.iter().find(|(name, _)| name == focus) {
            score += 0.07 * count_matches(&content, keywords);
        }
    }

    score -= 0.05 * count_matches(&content, TECHNICAL_KEYWORDS);
    score += 0.08 * count_matches(&content, BUSINESS_OUTCOME_KEYWORDS);

    score.clamp(0.0, 1.0)
}

fn count_matches(content: &str, keywords: &[&str]) -> f32 {
    keywords.iter().filter(|k| content.contains(**k)).count() as f32
}
