// SPDX-FileCopyrightText: 2026 Aivy Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Heuristic intent classification.
//!
//! Maps free-text user input to one of a small closed set of routing
//! intents using word-boundary keyword matching. No LLM pre-call, no
//! network, no latency. Categories are checked in a fixed priority order
//! (scheduling before task management) so classification is deterministic
//! and fixtures stay reproducible.

use regex::Regex;

/// Routing intents mapped to specialized handlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// Meeting and demo requests.
    Scheduling,
    /// Follow-up task creation for a captured contact.
    TaskManagement,
    /// Everything else: the RAG visitor-engagement path (default).
    GeneralInquiry,
}

impl Intent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::Scheduling => "scheduling",
            Intent::TaskManagement => "task_management",
            Intent::GeneralInquiry => "general_inquiry",
        }
    }
}

impl std::fmt::Display for Intent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Scheduling vocabulary (word-boundary, case-insensitive).
const SCHEDULING_PATTERN: &str = r"(?i)\b(schedule|meeting|demo|call)\b";

/// Task-management vocabulary (word-boundary, case-insensitive).
const TASK_PATTERN: &str = r"(?i)\b(task|assign|to-do|reminder)\b";

/// Deterministic keyword classifier with zero cost and zero latency.
pub struct IntentClassifier {
    scheduling: Regex,
    task_management: Regex,
}

impl IntentClassifier {
    /// Create a new classifier with the fixed vocabularies.
    pub fn new() -> Self {
        Self {
            // Both patterns are compile-time literals; construction cannot fail.
            scheduling: Regex::new(SCHEDULING_PATTERN).expect("scheduling pattern is valid"),
            task_management: Regex::new(TASK_PATTERN).expect("task pattern is valid"),
        }
    }

    /// Classify a message. First matching category wins; scheduling is
    /// checked before task management, and no match falls back to
    /// general inquiry.
    pub fn classify(&self, message: &str) -> Intent {
        if self.scheduling.is_match(message) {
            return Intent::Scheduling;
        }
        if self.task_management.is_match(message) {
            return Intent::TaskManagement;
        }
        Intent::GeneralInquiry
    }
}

impl Default for IntentClassifier {
    fn default() -> Self {
        Self::new()
    }
}
