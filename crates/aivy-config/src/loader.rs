// SPDX-FileCopyrightText: 2026 Aivy Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./aivy.toml` > `~/.config/aivy/aivy.toml` > `/etc/aivy/aivy.toml`
//! with environment variable overrides via `AIVY_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::AivyConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/aivy/aivy.toml` (system-wide)
/// 3. `~/.config/aivy/aivy.toml` (user XDG config)
/// 4. `./aivy.toml` (local directory)
/// 5. `AIVY_*` environment variables
pub fn load_config() -> Result<AivyConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(AivyConfig::default()))
        .merge(Toml::file("/etc/aivy/aivy.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("aivy/aivy.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("aivy.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no XDG lookup).
///
/// Used for testing and explicit config specification.
pub fn load_config_from_str(toml_content: &str) -> Result<AivyConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(AivyConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<AivyConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(AivyConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for section-to-dot mapping.
///
/// Uses `Env::map()` NOT `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names. For example, `AIVY_EMBEDDING_API_KEY`
/// must map to `embedding.api_key`, not `embedding.api.key`.
fn env_provider() -> Env {
    Env::prefixed("AIVY_").map(|key| {
        // `key` is the lowercased env var name with prefix stripped.
        // Example: AIVY_EMBEDDING_API_KEY -> "embedding_api_key"
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("agent_", "agent.", 1)
            .replacen("storage_", "storage.", 1)
            .replacen("embedding_", "embedding.", 1)
            .replacen("generation_", "generation.", 1)
            .replacen("retrieval_", "retrieval.", 1)
            .replacen("memory_", "memory.", 1);
        mapped.into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_defaults_from_empty_string() {
        let config = load_config_from_str("").unwrap();
        assert_eq!(config.agent.name, "aivy");
    }

    #[test]
    fn string_config_overrides_defaults() {
        let config = load_config_from_str(
            r#"
[storage]
database_path = "/tmp/aivy-test.db"

[generation]
timeout_secs = 15
"#,
        )
        .unwrap();
        assert_eq!(config.storage.database_path, "/tmp/aivy-test.db");
        assert_eq!(config.generation.timeout_secs, 15);
        // Untouched sections keep defaults
        assert_eq!(config.retrieval.max_results, 5);
    }

    #[test]
    fn invalid_toml_is_an_error() {
        let result = load_config_from_str("[retrieval]\nsimilarity_threshold = \"high\"");
        assert!(result.is_err());
    }
}
