//! Application settings management
//!
//! This module defines the configuration structure and provides methods
//! for loading settings from TOML files and environment variables.

use serde::{Deserialize, Serialize};

/// Main application configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    pub database: DatabaseConfig,
    pub openai: OpenAiConfig,
    pub dialogue: DialogueConfig,
    pub logging: LoggingConfig,
}

/// Database configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

/// Language-model API configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OpenAiConfig {
    pub api_url: String,
    pub api_key: String,
    pub model: String,
    pub timeout_seconds: u64,
    pub max_tokens: u32,
}

/// Dialogue manager configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DialogueConfig {
    /// How many recent turns downstream components consult
    pub history_window: usize,
    /// Upper bound on products rendered in a single reply
    pub max_products_shown: usize,
    /// Row limit for product searches
    pub search_limit: i64,
    /// Idle time after which a session is evicted
    pub session_ttl_seconds: u64,
    /// Background sweep interval for expired sessions
    pub cleanup_interval_seconds: u64,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
    pub file_path: String,
    pub max_file_size: String,
    pub max_files: u32,
}

impl Settings {
    /// Load settings from configuration file and environment variables
    pub fn new() -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name("config").required(false))
            .add_source(config::Environment::with_prefix("STYLEBUDDY"))
            .build()?;

        settings.try_deserialize()
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<(), crate::utils::errors::StyleBuddyError> {
        super::validation::validate_settings(self)
    }

    /// Whether the language-model service is configured
    pub fn llm_enabled(&self) -> bool {
        !self.openai.api_key.is_empty()
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            database: DatabaseConfig {
                url: "postgresql://localhost/stylebuddy".to_string(),
                max_connections: 10,
                min_connections: 1,
            },
            openai: OpenAiConfig {
                api_url: "https://api.openai.com/v1".to_string(),
                api_key: String::new(),
                model: "gpt-4o-mini".to_string(),
                timeout_seconds: 30,
                max_tokens: 1000,
            },
            dialogue: DialogueConfig {
                history_window: 6,
                max_products_shown: 5,
                search_limit: 10,
                session_ttl_seconds: 1800,
                cleanup_interval_seconds: 300,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                file_path: "/var/log/stylebuddy.log".to_string(),
                max_file_size: "10MB".to_string(),
                max_files: 5,
            },
        }
    }
}
