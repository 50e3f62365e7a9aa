// SPDX-FileCopyrightText: 2026 Aivy Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Knowledge retrieval for the Aivy conversational core.
//!
//! Provides SQLite chunk storage with vector similarity search, an HTTP
//! embedding client, two-tier threshold retrieval, and executive-context
//! prioritization of retrieved chunks.
//!
//! ## Architecture
//!
//! - **KnowledgeStore**: SQLite persistence with BLOB vectors
//! - **HttpEmbedder**: OpenAI-compatible embeddings endpoint client
//! - **KnowledgeRetriever**: primary/fallback threshold search
//! - **prioritizer**: pure executive re-ranking of retrieved chunks

pub mod embedder;
pub mod prioritizer;
pub mod retriever;
pub mod store;
pub mod types;

pub use embedder::HttpEmbedder;
pub use prioritizer::prioritize_for_executive;
pub use retriever::KnowledgeRetriever;
pub use store::KnowledgeStore;
pub use types::*;
