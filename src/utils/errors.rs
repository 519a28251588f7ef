//! Error handling for TransitBuddy
//!
//! This module defines the main error types used throughout the application
//! and provides a unified error handling strategy.

use thiserror::Error;

/// Main error type for the TransitBuddy application
#[derive(Error, Debug)]
pub enum TransitBuddyError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Database migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Telegram API error: {0}")]
    Telegram(#[from] teloxide::RequestError),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Schedule search failed: {0}")]
    SearchFailed(String),

    #[error("Itinerary lookup failed: {0}")]
    ItineraryFailed(String),
}

/// Result type alias for TransitBuddy operations
pub type Result<T> = std::result::Result<T, TransitBuddyError>;
