//! Logging configuration and setup
//!
//! This module provides logging initialization and structured logging utilities
//! for the StyleBuddy application.

use tracing::{info, warn, error, debug};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use crate::config::LoggingConfig;
use crate::utils::errors::Result;

/// Initialize logging based on configuration
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let file_appender = tracing_appender::rolling::daily(&config.file_path, "stylebuddy.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.level))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stdout))
        .with(tracing_subscriber::fmt::layer().with_writer(non_blocking))
        .init();

    info!("Logging initialized with level: {}", config.level);
    Ok(())
}

/// Log chat turns with structured data
pub fn log_chat_turn(user_id: i64, intent: &str, confidence: f64, fallback_used: bool) {
    info!(
        user_id = user_id,
        intent = intent,
        confidence = confidence,
        fallback_used = fallback_used,
        "Chat turn handled"
    );
}

/// Log a fallback engaging after a language-model failure
pub fn log_llm_fallback(operation: &str, reason: &str) {
    warn!(
        operation = operation,
        reason = reason,
        "Language model unavailable, using deterministic fallback"
    );
}

/// Log cart mutations
pub fn log_cart_action(user_id: i64, action: &str, product_ids: &[i64]) {
    info!(
        user_id = user_id,
        action = action,
        product_ids = ?product_ids,
        "Cart action performed"
    );
}

/// Log slot-filling progress
pub fn log_slot_filling(user_id: i64, missing_slot: &str) {
    debug!(
        user_id = user_id,
        missing_slot = missing_slot,
        "Asking clarifying question"
    );
}

/// Log session lifecycle events
pub fn log_session_event(user_id: i64, event: &str, details: Option<&str>) {
    info!(
        user_id = user_id,
        event = event,
        details = details,
        "Session event occurred"
    );
}

/// Log API errors with context
pub fn log_api_error(api: &str, error: &str, context: Option<&str>) {
    error!(
        api = api,
        error = error,
        context = context,
        "API error occurred"
    );
}
