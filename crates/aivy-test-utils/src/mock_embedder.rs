// SPDX-FileCopyrightText: 2026 Aivy Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock embedding adapter for deterministic testing.
//!
//! `MockEmbedder` implements `EmbeddingAdapter` with a fixture map from
//! text to vectors, enabling fast, CI-runnable tests without external
//! API calls.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;

use aivy_core::{AdapterType, AivyError, EmbeddingAdapter, HealthStatus, PluginAdapter};

/// A mock embedder returning fixture vectors.
///
/// Unknown texts map to the configured default vector, so tests control
/// similarity geometry precisely.
pub struct MockEmbedder {
    fixtures: HashMap<String, Vec<f32>>,
    default_vector: Vec<f32>,
    fail: Arc<AtomicBool>,
}

impl MockEmbedder {
    /// Create a mock embedder with the given default vector.
    pub fn new(default_vector: Vec<f32>) -> Self {
        Self {
            fixtures: HashMap::new(),
            default_vector,
            fail: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Register a fixture vector for an exact text.
    pub fn with_fixture(mut self, text: &str, vector: Vec<f32>) -> Self {
        self.fixtures.insert(text.to_string(), vector);
        self
    }

    /// Make every subsequent embed call fail (provider outage simulation).
    pub fn set_failing(&self, failing: bool) {
        self.fail.store(failing, Ordering::SeqCst);
    }
}

#[async_trait]
impl PluginAdapter for MockEmbedder {
    fn name(&self) -> &str {
        "mock-embedder"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Embedding
    }

    async fn health_check(&self) -> Result<HealthStatus, AivyError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), AivyError> {
        Ok(())
    }
}

#[async_trait]
impl EmbeddingAdapter for MockEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, AivyError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(AivyError::Embedding {
                message: "mock embedder configured to fail".to_string(),
                source: None,
            });
        }
        Ok(self
            .fixtures
            .get(text)
            .cloned()
            .unwrap_or_else(|| self.default_vector.clone()))
    }
}
