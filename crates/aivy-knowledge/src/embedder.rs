// SPDX-FileCopyrightText: 2026 Aivy Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for an OpenAI-compatible embeddings API.
//!
//! Provides [`HttpEmbedder`] which handles request construction,
//! authentication, and transient error retry.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use aivy_config::model::EmbeddingConfig;
use aivy_core::{AdapterType, AivyError, EmbeddingAdapter, HealthStatus, PluginAdapter};

/// Request body for the embeddings endpoint.
#[derive(Debug, Serialize)]
struct EmbeddingsRequest<'a> {
    model: &'a str,
    input: &'a str,
    encoding_format: &'a str,
}

/// Response body from the embeddings endpoint.
#[derive(Debug, Deserialize)]
struct EmbeddingsResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
}

/// HTTP embedding adapter against an OpenAI-compatible `/embeddings` endpoint.
///
/// Manages authentication headers, connection pooling, and retry logic
/// for transient errors (429, 500, 503).
#[derive(Debug, Clone)]
pub struct HttpEmbedder {
    client: reqwest::Client,
    base_url: String,
    model: String,
    dimensions: usize,
    max_retries: u32,
}

impl HttpEmbedder {
    /// Creates a new embedding client from configuration.
    pub fn new(config: &EmbeddingConfig) -> Result<Self, AivyError> {
        let mut headers = HeaderMap::new();
        headers.insert("content-type", HeaderValue::from_static("application/json"));
        if let Some(ref api_key) = config.api_key {
            let value = HeaderValue::from_str(&format!("Bearer {api_key}")).map_err(|e| {
                AivyError::Config(format!("invalid API key header value: {e}"))
            })?;
            headers.insert("authorization", value);
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AivyError::Embedding {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            dimensions: config.dimensions,
            max_retries: 1,
        })
    }

    /// Expected embedding dimensionality.
    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    async fn request_embedding(&self, text: &str) -> Result<Vec<f32>, AivyError> {
        let url = format!("{}/embeddings", self.base_url);
        let body = EmbeddingsRequest {
            model: &self.model,
            input: text,
            encoding_format: "float",
        };

        let mut last_error = None;

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                warn!(attempt, "retrying embedding request after transient error");
                tokio::time::sleep(Duration::from_secs(1)).await;
            }

            let response = self
                .client
                .post(&url)
                .json(&body)
                .send()
                .await
                .map_err(|e| AivyError::Embedding {
                    message: format!("HTTP request failed: {e}"),
                    source: Some(Box::new(e)),
                })?;

            let status = response.status();
            debug!(status = %status, attempt, "embedding response received");

            if status.is_success() {
                let parsed: EmbeddingsResponse =
                    response.json().await.map_err(|e| AivyError::Embedding {
                        message: format!("malformed embedding response: {e}"),
                        source: Some(Box::new(e)),
                    })?;
                let embedding = parsed
                    .data
                    .into_iter()
                    .next()
                    .map(|d| d.embedding)
                    .ok_or_else(|| AivyError::Embedding {
                        message: "no embedding data received".to_string(),
                        source: None,
                    })?;
                if embedding.len() != self.dimensions {
                    warn!(
                        expected = self.dimensions,
                        actual = embedding.len(),
                        "embedding dimensionality differs from configuration"
                    );
                }
                return Ok(embedding);
            }

            if is_transient_error(status) && attempt < self.max_retries {
                let text = response.text().await.unwrap_or_default();
                warn!(status = %status, body = %text, "transient error, will retry");
                last_error = Some(AivyError::Embedding {
                    message: format!("API returned {status}: {text}"),
                    source: None,
                });
                continue;
            }

            let text = response.text().await.unwrap_or_default();
            return Err(AivyError::Embedding {
                message: format!("API returned {status}: {text}"),
                source: None,
            });
        }

        Err(last_error.unwrap_or_else(|| AivyError::Embedding {
            message: "embedding request failed after retries".to_string(),
            source: None,
        }))
    }
}

/// Whether an HTTP status warrants a retry.
fn is_transient_error(status: reqwest::StatusCode) -> bool {
    status.as_u16() == 429 || status.is_server_error()
}

#[async_trait]
impl PluginAdapter for HttpEmbedder {
    fn name(&self) -> &str {
        "http-embeddings"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Embedding
    }

    async fn health_check(&self) -> Result<HealthStatus, AivyError> {
        // No dedicated health endpoint on OpenAI-compatible APIs; the
        // client existing with valid configuration is the best signal.
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), AivyError> {
        Ok(())
    }
}

#[async_trait]
impl EmbeddingAdapter for HttpEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, AivyError> {
        self.request_embedding(text).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config_for(server: &MockServer) -> EmbeddingConfig {
        EmbeddingConfig {
            base_url: server.uri(),
            api_key: Some("test-key".to_string()),
            model: "test-embed".to_string(),
            dimensions: 3,
            timeout_secs: 5,
        }
    }

    #[tokio::test]
    async fn embed_parses_response_vector() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/embeddings"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": [{"embedding": [0.1, 0.2, 0.3], "index": 0, "object": "embedding"}]
            })))
            .mount(&server)
            .await;

        let embedder = HttpEmbedder::new(&config_for(&server)).unwrap();
        let embedding = embedder.embed("hello world").await.unwrap();
        assert_eq!(embedding, vec![0.1, 0.2, 0.3]);
    }

    #[tokio::test]
    async fn embed_retries_once_on_transient_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/embeddings"))
            .respond_with(ResponseTemplate::new(503))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/embeddings"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": [{"embedding": [1.0, 0.0, 0.0]}]
            })))
            .mount(&server)
            .await;

        let embedder = HttpEmbedder::new(&config_for(&server)).unwrap();
        let embedding = embedder.embed("retry me").await.unwrap();
        assert_eq!(embedding, vec![1.0, 0.0, 0.0]);
    }

    #[tokio::test]
    async fn embed_fails_on_non_transient_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/embeddings"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let embedder = HttpEmbedder::new(&config_for(&server)).unwrap();
        let err = embedder.embed("unauthorized").await.unwrap_err();
        assert!(matches!(err, AivyError::Embedding { .. }));
    }

    #[tokio::test]
    async fn embed_fails_on_empty_data() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/embeddings"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"data": []})),
            )
            .mount(&server)
            .await;

        let embedder = HttpEmbedder::new(&config_for(&server)).unwrap();
        let err = embedder.embed("empty").await.unwrap_err();
        assert!(err.to_string().contains("no embedding data"));
    }

    #[test]
    fn transient_status_detection() {
        assert!(is_transient_error(reqwest::StatusCode::TOO_MANY_REQUESTS));
        assert!(is_transient_error(reqwest::StatusCode::INTERNAL_SERVER_ERROR));
        assert!(is_transient_error(reqwest::StatusCode::SERVICE_UNAVAILABLE));
        assert!(!is_transient_error(reqwest::StatusCode::BAD_REQUEST));
        assert!(!is_transient_error(reqwest::StatusCode::UNAUTHORIZED));
    }
}
