// SPDX-FileCopyrightText: 2026 Aivy Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Intent classification and agent dispatch for the Aivy conversational core.
//!
//! This crate provides:
//! - [`IntentClassifier`]: deterministic keyword routing (zero-cost, zero-latency)
//! - [`AgentDispatcher`]: per-message routing to the scheduler, task-manager,
//!   and visitor-engagement handlers, with best-effort turn persistence
//!
//! The dispatcher sits between the chat surface and the specialized
//! handlers, classifying each message before any LLM call is made.

pub mod classifier;
pub mod dispatcher;
pub mod handlers;

pub use classifier::{Intent, IntentClassifier};
pub use dispatcher::{AgentDispatcher, DispatchReport, DispatchState};
pub use handlers::HandlerOutcome;
