// SPDX-FileCopyrightText: 2026 Aivy Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Generation adapter trait for the RAG response generator.

use async_trait::async_trait;

use crate::error::AivyError;
use crate::traits::adapter::PluginAdapter;
use crate::types::GenerationRequest;

/// Adapter for the language-model generation call.
///
/// Treated as a black box that may be slow; callers must bound the await
/// with a timeout since generation otherwise dominates end-to-end latency
/// with no upper limit.
#[async_trait]
pub trait GenerationAdapter: PluginAdapter {
    /// Produces response text conditioned on the query, retrieved chunks,
    /// conversation history, and executive context.
    async fn generate(&self, request: GenerationRequest) -> Result<String, AivyError>;
}
