// SPDX-FileCopyrightText: 2026 Aivy Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Embedding adapter trait for vector embedding generation.

use async_trait::async_trait;

use crate::error::AivyError;
use crate::traits::adapter::PluginAdapter;

/// Adapter for converting text into fixed-length embedding vectors.
///
/// Implementations must be deterministic for identical input within a
/// model version (not byte-identical across model versions).
#[async_trait]
pub trait EmbeddingAdapter: PluginAdapter {
    /// Generates an embedding vector for the given text.
    async fn embed(&self, text: &str) -> Result<Vec<f32>, AivyError>;
}
