// SPDX-FileCopyrightText: 2026 Aivy Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Aivy conversational core.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level Aivy configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable
/// overrides. All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AivyConfig {
    /// Agent identity and behavior settings.
    #[serde(default)]
    pub agent: AgentConfig,

    /// Storage backend settings.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Embedding provider settings.
    #[serde(default)]
    pub embedding: EmbeddingConfig,

    /// Response generation settings.
    #[serde(default)]
    pub generation: GenerationConfig,

    /// Knowledge retrieval settings.
    #[serde(default)]
    pub retrieval: RetrievalConfig,

    /// Conversation memory settings.
    #[serde(default)]
    pub memory: MemoryConfig,
}

/// Agent identity and behavior configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AgentConfig {
    /// Display name of the agent.
    #[serde(default = "default_agent_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            name: default_agent_name(),
            log_level: default_log_level(),
        }
    }
}

fn default_agent_name() -> String {
    "aivy".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Storage backend configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_database_path")]
    pub database_path: String,

    /// Enable WAL (Write-Ahead Logging) mode for SQLite.
    #[serde(default = "default_wal_mode")]
    pub wal_mode: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            wal_mode: default_wal_mode(),
        }
    }
}

fn default_database_path() -> String {
    dirs::data_dir()
        .map(|p| p.join("aivy").join("aivy.db"))
        .unwrap_or_else(|| std::path::PathBuf::from("aivy.db"))
        .to_string_lossy()
        .into_owned()
}

fn default_wal_mode() -> bool {
    true
}

/// Embedding provider configuration.
///
/// The provider is an OpenAI-compatible embeddings endpoint; the API key
/// is usually supplied via the `AIVY_EMBEDDING_API_KEY` environment variable.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct EmbeddingConfig {
    /// Base URL of the embeddings API.
    #[serde(default = "default_embedding_base_url")]
    pub base_url: String,

    /// API key for the embedding provider. `None` requires environment variable.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Embedding model identifier.
    #[serde(default = "default_embedding_model")]
    pub model: String,

    /// Expected embedding dimensionality.
    #[serde(default = "default_embedding_dimensions")]
    pub dimensions: usize,

    /// Per-request timeout in seconds.
    #[serde(default = "default_embedding_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            base_url: default_embedding_base_url(),
            api_key: None,
            model: default_embedding_model(),
            dimensions: default_embedding_dimensions(),
            timeout_secs: default_embedding_timeout_secs(),
        }
    }
}

fn default_embedding_base_url() -> String {
    "https://api.deepinfra.com/v1/openai".to_string()
}

fn default_embedding_model() -> String {
    "google/embeddinggemma-300m".to_string()
}

fn default_embedding_dimensions() -> usize {
    1024
}

fn default_embedding_timeout_secs() -> u64 {
    30
}

/// Response generation configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GenerationConfig {
    /// Generation model identifier.
    #[serde(default = "default_generation_model")]
    pub model: String,

    /// Maximum tokens to generate per response.
    #[serde(default = "default_generation_max_tokens")]
    pub max_tokens: u32,

    /// Upper bound on the generation call, in seconds.
    #[serde(default = "default_generation_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            model: default_generation_model(),
            max_tokens: default_generation_max_tokens(),
            timeout_secs: default_generation_timeout_secs(),
        }
    }
}

fn default_generation_model() -> String {
    "gemini-flash-latest".to_string()
}

fn default_generation_max_tokens() -> u32 {
    1024
}

fn default_generation_timeout_secs() -> u64 {
    60
}

/// Knowledge retrieval configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RetrievalConfig {
    /// Primary minimum cosine similarity for knowledge search (0.0-1.0).
    #[serde(default = "default_similarity_threshold")]
    pub similarity_threshold: f64,

    /// Relaxed threshold used for the single fallback search when the
    /// primary search returns nothing (0.0-1.0).
    #[serde(default = "default_fallback_threshold")]
    pub fallback_threshold: f64,

    /// Maximum number of chunks returned per search.
    #[serde(default = "default_max_results")]
    pub max_results: usize,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: default_similarity_threshold(),
            fallback_threshold: default_fallback_threshold(),
            max_results: default_max_results(),
        }
    }
}

fn default_similarity_threshold() -> f64 {
    0.7
}

fn default_fallback_threshold() -> f64 {
    0.5
}

fn default_max_results() -> usize {
    5
}

/// Conversation memory configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct MemoryConfig {
    /// Number of recent turns loaded into session context.
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            history_limit: default_history_limit(),
        }
    }
}

fn default_history_limit() -> usize {
    5
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_expected_values() {
        let config = AivyConfig::default();
        assert_eq!(config.agent.name, "aivy");
        assert_eq!(config.retrieval.similarity_threshold, 0.7);
        assert_eq!(config.retrieval.fallback_threshold, 0.5);
        assert_eq!(config.retrieval.max_results, 5);
        assert_eq!(config.memory.history_limit, 5);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let toml_str = r#"
[agent]
name = "aivy-staging"
"#;
        let config: AivyConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.agent.name, "aivy-staging");
        assert_eq!(config.agent.log_level, "info");
        assert!(config.storage.wal_mode);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let toml_str = r#"
[retrieval]
similarity_threshold = 0.8
match_count = 5
"#;
        let result = toml::from_str::<AivyConfig>(toml_str);
        assert!(result.is_err(), "unknown key should be rejected");
    }

    #[test]
    fn retrieval_overrides_parse() {
        let toml_str = r#"
[retrieval]
similarity_threshold = 0.8
fallback_threshold = 0.6
max_results = 10
"#;
        let config: AivyConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.retrieval.similarity_threshold, 0.8);
        assert_eq!(config.retrieval.fallback_threshold, 0.6);
        assert_eq!(config.retrieval.max_results, 10);
    }
}
