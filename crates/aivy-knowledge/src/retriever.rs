// SPDX-FileCopyrightText: 2026 Aivy Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Two-tier knowledge retrieval.
//!
//! The retriever embeds the query, searches at the primary similarity
//! threshold, and when that starves the generator of context, retries once
//! at a relaxed threshold. A recall/precision tradeoff: prefer precise
//! matches, fall back to broader recall only when the precise query
//! returns nothing.

use std::sync::Arc;

use tracing::{debug, warn};

use aivy_config::model::RetrievalConfig;
use aivy_core::EmbeddingAdapter;
use aivy_core::types::RetrievedChunk;

use crate::store::KnowledgeStore;

/// Retrieves relevant knowledge chunks for a user query.
///
/// Retrieval failures are recoverable by design: an embedding or search
/// error degrades to "no context retrieved" so the conversation continues
/// with reduced quality rather than breaking the chat experience.
pub struct KnowledgeRetriever {
    store: Arc<KnowledgeStore>,
    embedder: Arc<dyn EmbeddingAdapter>,
    config: RetrievalConfig,
}

impl KnowledgeRetriever {
    /// Creates a new retriever.
    pub fn new(
        store: Arc<KnowledgeStore>,
        embedder: Arc<dyn EmbeddingAdapter>,
        config: RetrievalConfig,
    ) -> Self {
        Self {
            store,
            embedder,
            config,
        }
    }

    /// Retrieve chunks for the query, never failing the turn.
    ///
    /// 1. Embed the query text
    /// 2. Search at the primary threshold, capped at `max_results`
    /// 3. If zero chunks come back, retry once at the fallback threshold
    pub async fn retrieve(&self, query: &str) -> Vec<RetrievedChunk> {
        let embedding = match self.embedder.embed(query).await {
            Ok(v) => v,
            Err(e) => {
                warn!(error = %e, "embedding failed, continuing without retrieved context");
                return Vec::new();
            }
        };

        let primary = self
            .search(&embedding, self.config.similarity_threshold as f32)
            .await;
        if !primary.is_empty() {
            debug!(count = primary.len(), "primary-threshold retrieval hit");
            return primary;
        }

        let fallback = self
            .search(&embedding, self.config.fallback_threshold as f32)
            .await;
        debug!(count = fallback.len(), "fallback-threshold retrieval");
        fallback
    }

    async fn search(&self, embedding: &[f32], threshold: f32) -> Vec<RetrievedChunk> {
        match self
            .store
            .search_similar(embedding, threshold, self.config.max_results)
            .await
        {
            Ok(chunks) => chunks,
            Err(e) => {
                warn!(error = %e, threshold, "knowledge search failed, treating as empty");
                Vec::new()
            }
        }
    }
}
