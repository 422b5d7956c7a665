//! Configuration validation module
//!
//! This module provides validation functions for application configuration
//! to ensure all required settings are properly configured.

use crate::utils::errors::{StyleBuddyError, Result};
use super::Settings;

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_database_config(&settings.database)?;
    validate_openai_config(&settings.openai)?;
    validate_dialogue_config(&settings.dialogue)?;
    validate_logging_config(&settings.logging)?;

    Ok(())
}

/// Validate database configuration
fn validate_database_config(config: &super::DatabaseConfig) -> Result<()> {
    if config.url.is_empty() {
        return Err(StyleBuddyError::Config(
            "Database URL is required".to_string()
        ));
    }

    if config.max_connections == 0 {
        return Err(StyleBuddyError::Config(
            "Max connections must be greater than 0".to_string()
        ));
    }

    if config.min_connections > config.max_connections {
        return Err(StyleBuddyError::Config(
            "Min connections cannot be greater than max connections".to_string()
        ));
    }

    Ok(())
}

/// Validate language-model API configuration
///
/// An empty API key is allowed and puts the client in disabled mode;
/// the deterministic fallbacks handle every request in that case.
fn validate_openai_config(config: &super::OpenAiConfig) -> Result<()> {
    if config.api_url.is_empty() {
        return Err(StyleBuddyError::Config(
            "Language model API URL is required".to_string()
        ));
    }

    if config.model.is_empty() {
        return Err(StyleBuddyError::Config(
            "Language model name is required".to_string()
        ));
    }

    if config.timeout_seconds == 0 {
        return Err(StyleBuddyError::Config(
            "Language model timeout must be greater than 0".to_string()
        ));
    }

    Ok(())
}

/// Validate dialogue manager configuration
fn validate_dialogue_config(config: &super::DialogueConfig) -> Result<()> {
    if config.history_window == 0 {
        return Err(StyleBuddyError::Config(
            "History window must be greater than 0".to_string()
        ));
    }

    if config.max_products_shown == 0 {
        return Err(StyleBuddyError::Config(
            "Max products shown must be greater than 0".to_string()
        ));
    }

    if config.search_limit <= 0 {
        return Err(StyleBuddyError::Config(
            "Search limit must be greater than 0".to_string()
        ));
    }

    if config.session_ttl_seconds == 0 {
        return Err(StyleBuddyError::Config(
            "Session TTL must be greater than 0".to_string()
        ));
    }

    if config.cleanup_interval_seconds == 0 {
        return Err(StyleBuddyError::Config(
            "Cleanup interval must be greater than 0".to_string()
        ));
    }

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    if config.level.is_empty() {
        return Err(StyleBuddyError::Config(
            "Log level is required".to_string()
        ));
    }

    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.level.as_str()) {
        return Err(StyleBuddyError::Config(
            format!("Invalid log level: {}. Valid levels: {:?}", config.level, valid_levels)
        ));
    }

    Ok(())
}
