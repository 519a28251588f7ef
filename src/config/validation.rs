//! Configuration validation module
//!
//! This module provides validation functions for application configuration
//! to ensure all required settings are properly configured.

use url::Url;

use crate::utils::errors::{TransitBuddyError, Result};
use super::Settings;

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_bot_config(&settings.bot)?;
    validate_database_config(&settings.database)?;
    validate_schedule_config(&settings.schedule)?;
    validate_search_config(&settings.search)?;
    validate_logging_config(&settings.logging)?;

    Ok(())
}

/// Validate bot configuration
fn validate_bot_config(config: &super::BotConfig) -> Result<()> {
    if config.token.is_empty() {
        return Err(TransitBuddyError::Config(
            "Bot token is required".to_string()
        ));
    }

    Ok(())
}

/// Validate database configuration
fn validate_database_config(config: &super::DatabaseConfig) -> Result<()> {
    if config.url.is_empty() {
        return Err(TransitBuddyError::Config(
            "Database URL is required".to_string()
        ));
    }

    if config.max_connections == 0 {
        return Err(TransitBuddyError::Config(
            "Max connections must be greater than 0".to_string()
        ));
    }

    if config.min_connections > config.max_connections {
        return Err(TransitBuddyError::Config(
            "Min connections cannot be greater than max connections".to_string()
        ));
    }

    Ok(())
}

/// Validate schedule API configuration
fn validate_schedule_config(config: &super::ScheduleApiConfig) -> Result<()> {
    if config.api_key.is_empty() {
        return Err(TransitBuddyError::Config(
            "Schedule API key is required".to_string()
        ));
    }

    Url::parse(&config.base_url).map_err(|e| {
        TransitBuddyError::Config(format!("Invalid schedule API base URL: {}", e))
    })?;

    if config.timeout_seconds == 0 {
        return Err(TransitBuddyError::Config(
            "Schedule API timeout must be greater than 0".to_string()
        ));
    }

    Ok(())
}

/// Validate search flow configuration
fn validate_search_config(config: &super::SearchConfig) -> Result<()> {
    if config.page_size == 0 {
        return Err(TransitBuddyError::Config(
            "Page size must be greater than 0".to_string()
        ));
    }

    if config.history_limit <= 0 {
        return Err(TransitBuddyError::Config(
            "History limit must be greater than 0".to_string()
        ));
    }

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    if config.level.is_empty() {
        return Err(TransitBuddyError::Config(
            "Logging level is required".to_string()
        ));
    }

    if config.file_path.is_empty() {
        return Err(TransitBuddyError::Config(
            "Logging file path is required".to_string()
        ));
    }

    Ok(())
}
