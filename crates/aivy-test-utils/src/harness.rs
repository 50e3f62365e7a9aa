// SPDX-FileCopyrightText: 2026 Aivy Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end test harness.
//!
//! Wires temp SQLite storage, a seeded knowledge store, mock embedding
//! and generation adapters, conversation memory, and the dispatcher into
//! one isolated pipeline per test.

use std::sync::Arc;

use aivy_config::model::{GenerationConfig, MemoryConfig, RetrievalConfig, StorageConfig};
use aivy_core::{AivyError, EmbeddingAdapter, StorageAdapter};
use aivy_knowledge::types::KnowledgeChunk;
use aivy_knowledge::{KnowledgeRetriever, KnowledgeStore};
use aivy_memory::ConversationMemory;
use aivy_router::{AgentDispatcher, DispatchReport};
use aivy_storage::SqliteStorage;

use crate::mock_embedder::MockEmbedder;
use crate::mock_generator::MockGenerator;

/// A fully wired Aivy pipeline over temp storage and mock adapters.
pub struct TestHarness {
    pub storage: Arc<SqliteStorage>,
    pub memory: Arc<ConversationMemory>,
    pub knowledge: Arc<KnowledgeStore>,
    pub embedder: Arc<MockEmbedder>,
    pub generator: Arc<MockGenerator>,
    pub dispatcher: AgentDispatcher,
    _dir: tempfile::TempDir,
}

impl TestHarness {
    /// Start building a harness.
    pub fn builder() -> TestHarnessBuilder {
        TestHarnessBuilder::default()
    }

    /// Dispatch one chat message through the full pipeline.
    pub async fn send_message(
        &self,
        session_token: &str,
        message: &str,
    ) -> Result<DispatchReport, AivyError> {
        self.dispatcher
            .handle_message(message, session_token, None, None)
            .await
    }
}

/// Builder for [`TestHarness`].
pub struct TestHarnessBuilder {
    responses: Vec<String>,
    chunks: Vec<(String, Vec<f32>)>,
    default_embedding: Vec<f32>,
    generation_timeout_secs: u64,
}

impl Default for TestHarnessBuilder {
    fn default() -> Self {
        Self {
            responses: Vec::new(),
            chunks: Vec::new(),
            default_embedding: vec![1.0, 0.0],
            generation_timeout_secs: 5,
        }
    }
}

impl TestHarnessBuilder {
    /// Queue mock generator responses, returned FIFO.
    pub fn with_mock_responses(mut self, responses: Vec<String>) -> Self {
        self.responses = responses;
        self
    }

    /// Seed a knowledge chunk with an explicit embedding.
    pub fn with_chunk(mut self, content: &str, embedding: Vec<f32>) -> Self {
        self.chunks.push((content.to_string(), embedding));
        self
    }

    /// Vector the mock embedder returns for any query text.
    pub fn with_default_embedding(mut self, vector: Vec<f32>) -> Self {
        self.default_embedding = vector;
        self
    }

    /// Generation timeout in seconds (default 5).
    pub fn with_generation_timeout(mut self, secs: u64) -> Self {
        self.generation_timeout_secs = secs;
        self
    }

    /// Build the harness: temp SQLite, migrations, seeded chunks, mocks.
    pub async fn build(self) -> Result<TestHarness, AivyError> {
        let dir = tempfile::tempdir()
            .map_err(|e| AivyError::Internal(format!("tempdir failed: {e}")))?;
        let db_path = dir.path().join("harness.db");

        let storage = Arc::new(SqliteStorage::new(StorageConfig {
            database_path: db_path.to_string_lossy().into_owned(),
            wal_mode: true,
        }));
        storage.initialize().await?;

        let knowledge = Arc::new(KnowledgeStore::from_database(storage.database()?));
        for (i, (content, embedding)) in self.chunks.into_iter().enumerate() {
            knowledge
                .insert_chunk(&KnowledgeChunk {
                    id: format!("chunk-{i}"),
                    content,
                    embedding,
                    source_document: None,
                    created_at: chrono::Utc::now().to_rfc3339(),
                })
                .await?;
        }

        let embedder = Arc::new(MockEmbedder::new(self.default_embedding));
        let generator = Arc::new(MockGenerator::with_responses(self.responses));

        let embedder_adapter: Arc<dyn EmbeddingAdapter> = embedder.clone();
        let retriever = Arc::new(KnowledgeRetriever::new(
            knowledge.clone(),
            embedder_adapter,
            RetrievalConfig::default(),
        ));

        let storage_adapter: Arc<dyn StorageAdapter> = storage.clone();
        let memory = Arc::new(ConversationMemory::new(
            storage_adapter.clone(),
            MemoryConfig::default(),
        ));

        let dispatcher = AgentDispatcher::new(
            memory.clone(),
            storage_adapter,
            retriever,
            generator.clone(),
            &GenerationConfig {
                timeout_secs: self.generation_timeout_secs,
                ..GenerationConfig::default()
            },
        );

        Ok(TestHarness {
            storage,
            memory,
            knowledge,
            embedder,
            generator,
            dispatcher,
            _dir: dir,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn harness_builds_and_answers() {
        let harness = TestHarness::builder()
            .with_mock_responses(vec!["Hello from Aivy!".to_string()])
            .build()
            .await
            .unwrap();

        let report = harness
            .send_message("tok-harness", "what can the platform do?")
            .await
            .unwrap();
        assert_eq!(report.response, "Hello from Aivy!");
    }

    #[tokio::test]
    async fn seeded_chunks_are_searchable() {
        let harness = TestHarness::builder()
            .with_chunk("enrollment analytics overview", vec![1.0, 0.0])
            .build()
            .await
            .unwrap();
        assert_eq!(harness.knowledge.count().await.unwrap(), 1);
    }
}
