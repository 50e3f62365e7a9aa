// SPDX-FileCopyrightText: 2026 Aivy Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes, such as threshold ranges and non-empty paths.

use thiserror::Error;

use crate::model::AivyConfig;

/// A single configuration error discovered at load or validation time.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config deserialized but a semantic constraint is violated.
    #[error("invalid configuration: {message}")]
    Validation { message: String },

    /// Figment failed to parse or merge the config sources.
    #[error("failed to load configuration: {message}")]
    Load { message: String },
}

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &AivyConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if config.storage.database_path.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "storage.database_path must not be empty".to_string(),
        });
    }

    if config.embedding.base_url.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "embedding.base_url must not be empty".to_string(),
        });
    }

    if config.embedding.dimensions == 0 {
        errors.push(ConfigError::Validation {
            message: "embedding.dimensions must be positive".to_string(),
        });
    }

    for (key, value) in [
        (
            "retrieval.similarity_threshold",
            config.retrieval.similarity_threshold,
        ),
        (
            "retrieval.fallback_threshold",
            config.retrieval.fallback_threshold,
        ),
    ] {
        if !(0.0..=1.0).contains(&value) {
            errors.push(ConfigError::Validation {
                message: format!("{key} must be within [0.0, 1.0], got {value}"),
            });
        }
    }

    if config.retrieval.fallback_threshold > config.retrieval.similarity_threshold {
        errors.push(ConfigError::Validation {
            message: format!(
                "retrieval.fallback_threshold ({}) must not exceed retrieval.similarity_threshold ({})",
                config.retrieval.fallback_threshold, config.retrieval.similarity_threshold
            ),
        });
    }

    if config.retrieval.max_results == 0 {
        errors.push(ConfigError::Validation {
            message: "retrieval.max_results must be positive".to_string(),
        });
    }

    if config.memory.history_limit == 0 {
        errors.push(ConfigError::Validation {
            message: "memory.history_limit must be positive".to_string(),
        });
    }

    if config.generation.timeout_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "generation.timeout_secs must be positive".to_string(),
        });
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_validates() {
        let config = AivyConfig::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn empty_database_path_fails_validation() {
        let mut config = AivyConfig::default();
        config.storage.database_path = "".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(
            |e| matches!(e, ConfigError::Validation { message } if message.contains("database_path"))
        ));
    }

    #[test]
    fn out_of_range_threshold_fails_validation() {
        let mut config = AivyConfig::default();
        config.retrieval.similarity_threshold = 1.3;
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(
            |e| matches!(e, ConfigError::Validation { message } if message.contains("similarity_threshold"))
        ));
    }

    #[test]
    fn fallback_above_primary_fails_validation() {
        let mut config = AivyConfig::default();
        config.retrieval.similarity_threshold = 0.5;
        config.retrieval.fallback_threshold = 0.7;
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(
            |e| matches!(e, ConfigError::Validation { message } if message.contains("fallback_threshold"))
        ));
    }

    #[test]
    fn zero_history_limit_fails_validation() {
        let mut config = AivyConfig::default();
        config.memory.history_limit = 0;
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(
            |e| matches!(e, ConfigError::Validation { message } if message.contains("history_limit"))
        ));
    }

    #[test]
    fn collects_multiple_errors() {
        let mut config = AivyConfig::default();
        config.storage.database_path = "".to_string();
        config.retrieval.max_results = 0;
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.len() >= 2);
    }
}
