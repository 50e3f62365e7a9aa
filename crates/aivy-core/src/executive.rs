// SPDX-FileCopyrightText: 2026 Aivy Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Executive-context domain types.
//!
//! These model the persona bundle used to bias retrieval ranking and
//! generation tone toward a senior-decision-maker audience. They are
//! serialized as JSON documents into the session row and into the
//! generation request.

use serde::{Deserialize, Serialize};

/// Profile of the executive on the other side of the conversation.
///
/// Accumulated across turns; every field is optional because the profile
/// starts empty and is inferred incrementally.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExecutiveProfile {
    pub role: Option<String>,
    pub institution_type: Option<String>,
    pub institution_size: Option<String>,
    pub current_challenges: Vec<String>,
    pub decision_criteria: Vec<String>,
    pub budget: Option<String>,
    pub timeline: Option<String>,
    pub stakeholders: Vec<String>,
}

/// How deep into the qualification funnel the conversation has moved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EngagementLevel {
    #[default]
    Initial,
    Exploring,
    Evaluating,
    Committed,
}

impl EngagementLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            EngagementLevel::Initial => "initial",
            EngagementLevel::Exploring => "exploring",
            EngagementLevel::Evaluating => "evaluating",
            EngagementLevel::Committed => "committed",
        }
    }
}

/// Evolving state of one conversation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversationState {
    pub engagement_level: EngagementLevel,
    pub discussed_topics: Vec<String>,
    pub expressed_challenges: Vec<String>,
    pub decision_criteria: Vec<String>,
    pub institution_context: serde_json::Map<String, serde_json::Value>,
}

/// Primary purpose detected in a single user message.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrimaryIntent {
    #[default]
    InformationSeeking,
    DecisionSupport,
    RelationshipBuilding,
    ProblemSolving,
}

/// How quickly the executive needs to move.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    Low,
    #[default]
    Medium,
    High,
}

/// Where the executive sits in the buying journey.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionStage {
    #[default]
    Awareness,
    Consideration,
    Evaluation,
    Decision,
}

/// How much purchasing authority the executive appears to hold.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthorityLevel {
    #[default]
    Influencer,
    DecisionMaker,
    BudgetHolder,
}

/// Result of analyzing one user message against the session context.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntentAnalysis {
    pub primary_intent: PrimaryIntent,
    pub confidence: f64,
    pub urgency: Urgency,
    pub decision_stage: DecisionStage,
    pub authority_level: AuthorityLevel,
    pub key_topics: Vec<String>,
    pub strategic_focus: Vec<String>,
}

/// Context bundle handed to the knowledge prioritizer and the generator.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExecutiveContext {
    pub profile: ExecutiveProfile,
    pub state: ConversationState,
    pub intent: IntentAnalysis,
}
