// SPDX-FileCopyrightText: 2026 Aivy Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Executive intent analysis.
//!
//! Rule-based classification of a user message against the session's
//! executive profile. Zero-cost and deterministic; the result is stored
//! with the turn and biases knowledge prioritization and generation tone.

use aivy_core::executive::{
    AuthorityLevel, DecisionStage, ExecutiveProfile, IntentAnalysis, PrimaryIntent, Urgency,
};

const DECISION_SUPPORT_MARKERS: &[&str] = &[
    "roi", "cost", "budget", "implementation", "timeline", "decision", "evaluate",
];

const PROBLEM_SOLVING_MARKERS: &[&str] = &[
    "challenge", "problem", "struggling", "difficult", "issue", "solution",
];

const RELATIONSHIP_MARKERS: &[&str] = &[
    "partner", "work together", "collaboration", "next step", "meeting", "demo",
];

const HIGH_URGENCY_MARKERS: &[&str] = &["urgent", "immediate", "asap", "quickly"];

const LOW_URGENCY_MARKERS: &[&str] = &["future", "eventually", "planning", "considering"];

const EVALUATION_MARKERS: &[&str] = &["compare", "vs", "alternative", "option"];

const CONSIDERATION_MARKERS: &[&str] = &["how", "implementation", "process", "step"];

const DECISION_MARKERS: &[&str] = &["approve", "buy", "purchase", "contract"];

/// Topic vocabularies keyed by the topic label recorded in the analysis.
const TOPIC_PATTERNS: &[(&str, &[&str])] = &[
    ("enrollment", &["enrollment", "student registration", "admission"]),
    ("financial", &["financial", "fee", "tuition", "payment", "billing"]),
    ("academic", &["academic", "curriculum", "course", "grading", "assessment"]),
    ("analytics", &["analytics", "reporting", "data", "insights", "metrics"]),
    ("communication", &["communication", "notification", "messaging", "engagement"]),
    ("multi-campus", &["multi-campus", "multiple campus", "branch", "location"]),
    ("ai", &["ai", "artificial intelligence", "automation", "intelligent"]),
];

fn contains_any(text: &str, markers: &[&str]) -> bool {
    markers.iter().any(|m| text.contains(m))
}

/// Analyze one user message against the executive profile.
pub fn analyze_intent(query: &str, profile: &ExecutiveProfile) -> IntentAnalysis {
    let lower = query.to_lowercase();

    let (primary_intent, confidence) = if contains_any(&lower, DECISION_SUPPORT_MARKERS) {
        (PrimaryIntent::DecisionSupport, 0.85)
    } else if contains_any(&lower, PROBLEM_SOLVING_MARKERS) {
        (PrimaryIntent::ProblemSolving, 0.8)
    } else if contains_any(&lower, RELATIONSHIP_MARKERS) {
        (PrimaryIntent::RelationshipBuilding, 0.75)
    } else {
        (PrimaryIntent::InformationSeeking, 0.7)
    };

    let urgency = if contains_any(&lower, HIGH_URGENCY_MARKERS) {
        Urgency::High
    } else if contains_any(&lower, LOW_URGENCY_MARKERS) {
        Urgency::Low
    } else {
        Urgency::Medium
    };

    let decision_stage = if contains_any(&lower, EVALUATION_MARKERS) {
        DecisionStage::Evaluation
    } else if contains_any(&lower, CONSIDERATION_MARKERS) {
        DecisionStage::Consideration
    } else if contains_any(&lower, DECISION_MARKERS) {
        DecisionStage::Decision
    } else {
        DecisionStage::Awareness
    };

    let role = profile
        .role
        .as_deref()
        .map(str::to_lowercase)
        .unwrap_or_default();
    let authority_level = if ["president", "ceo", "chancellor"]
        .iter()
        .any(|r| role.contains(r))
    {
        AuthorityLevel::BudgetHolder
    } else if ["director", "dean"].iter().any(|r| role.contains(r))
        || lower.contains("budget")
        || lower.contains("funding")
    {
        AuthorityLevel::DecisionMaker
    } else {
        AuthorityLevel::Influencer
    };

    let key_topics = TOPIC_PATTERNS
        .iter()
        .filter(|(_, patterns)| contains_any(&lower, patterns))
        .map(|(topic, _)| topic.to_string())
        .collect();

    let mut strategic_focus = Vec::new();
    if contains_any(&lower, &["scale", "growth", "expansion"]) {
        strategic_focus.push("scalability".to_string());
    }
    if contains_any(&lower, &["efficiency", "streamline", "optimize"]) {
        strategic_focus.push("operational_efficiency".to_string());
    }
    if lower.contains("student") && (lower.contains("success") || lower.contains("outcome")) {
        strategic_focus.push("student_success".to_string());
    }
    if contains_any(&lower, &["competitive", "advantage", "differentiate"]) {
        strategic_focus.push("competitive_advantage".to_string());
    }

    IntentAnalysis {
        primary_intent,
        confidence,
        urgency,
        decision_stage,
        authority_level,
        key_topics,
        strategic_focus,
    }
}
