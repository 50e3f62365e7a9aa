// SPDX-FileCopyrightText: 2026 Aivy Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Specialized agent handlers invoked by the dispatcher.

pub mod scheduler;
pub mod tasks;
pub mod visitor;

use aivy_core::AivyError;

/// Result of one handler invocation.
///
/// Handlers never string-format operational errors into chat text; a
/// failed side effect comes back as `Failure` and the dispatcher decides
/// how to phrase it to the end user.
#[derive(Debug)]
pub enum HandlerOutcome {
    /// The handler produced a normal response.
    Success {
        response: String,
        /// Knowledge sources used to produce the response, if any.
        knowledge_sources: Vec<String>,
    },
    /// The handler's side effect or generation call failed.
    Failure { error: AivyError },
}

impl HandlerOutcome {
    /// Convenience constructor for a plain text success with no sources.
    pub fn text(response: impl Into<String>) -> Self {
        HandlerOutcome::Success {
            response: response.into(),
            knowledge_sources: Vec::new(),
        }
    }
}
