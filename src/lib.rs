//! TransitBuddy Telegram Bot
//!
//! A Telegram bot that turns a guided multi-step dialog into structured
//! queries against a transportation-schedule API and renders paged results
//! back to the user. This library provides the conversation engine, session
//! state management, result pagination, and the surrounding services.

#![allow(non_snake_case)]

pub mod config;
pub mod database;
pub mod engine;
pub mod handlers;
pub mod models;
pub mod render;
pub mod services;
pub mod state;
pub mod utils;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{TransitBuddyError, Result};

// Re-export main components for easy access
pub use database::DatabaseService;
pub use engine::ConversationEngine;
pub use services::ServiceFactory;
pub use state::{SessionState, SessionStore};

/// The engine wired to its production collaborators
pub type AppEngine = ConversationEngine<
    services::DirectoryService,
    services::ScheduleService,
    services::ScheduleService,
    services::HistoryService,
>;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}
