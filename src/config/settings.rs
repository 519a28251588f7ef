//! Application settings management
//!
//! This module defines the configuration structure and provides methods
//! for loading settings from TOML files and environment variables.

use serde::{Deserialize, Serialize};

/// Main application configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    pub bot: BotConfig,
    pub database: DatabaseConfig,
    pub schedule: ScheduleApiConfig,
    pub search: SearchConfig,
    pub logging: LoggingConfig,
}

/// Telegram bot configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BotConfig {
    pub token: String,
}

/// Database configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

/// Schedule API configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ScheduleApiConfig {
    pub base_url: String,
    pub api_key: String,
    pub timeout_seconds: u64,
}

/// Search flow tuning
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchConfig {
    /// Entries per result page; also the inline/paginated threshold
    pub page_size: usize,
    /// Last calendar year for which travel dates are accepted
    pub horizon_year: i32,
    /// How many history entries /history shows
    pub history_limit: i64,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
    pub file_path: String,
}

impl Settings {
    /// Load settings from configuration file and environment variables
    pub fn new() -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name("config").required(false))
            .add_source(config::Environment::with_prefix("TRANSITBUDDY").separator("__"))
            .build()?;

        settings.try_deserialize()
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<(), crate::utils::errors::TransitBuddyError> {
        super::validation::validate_settings(self)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bot: BotConfig {
                token: String::new(),
            },
            database: DatabaseConfig {
                url: "postgresql://localhost/transitbuddy".to_string(),
                max_connections: 10,
                min_connections: 1,
            },
            schedule: ScheduleApiConfig {
                base_url: "https://api.rasp.yandex-net.ru/v3.0/".to_string(),
                api_key: String::new(),
                timeout_seconds: 10,
            },
            search: SearchConfig {
                page_size: 5,
                horizon_year: 2026,
                history_limit: 10,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                file_path: "/var/log/transitbuddy".to_string(),
            },
        }
    }
}
