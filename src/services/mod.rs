//! Services module
//!
//! This module contains business logic services

pub mod directory;
pub mod history;
pub mod schedule;
pub mod user;

// Re-export commonly used services
pub use directory::DirectoryService;
pub use history::HistoryService;
pub use schedule::ScheduleService;
pub use user::UserService;

use crate::config::settings::Settings;
use crate::database::DatabaseService;
use crate::utils::errors::Result;

/// Service factory for creating and managing all services
#[derive(Debug, Clone)]
pub struct ServiceFactory {
    pub schedule_service: ScheduleService,
    pub directory_service: DirectoryService,
    pub history_service: HistoryService,
    pub user_service: UserService,
}

impl ServiceFactory {
    /// Create a new ServiceFactory with all services initialized
    pub fn new(settings: &Settings, database: &DatabaseService) -> Result<Self> {
        let schedule_service =
            ScheduleService::new(settings.schedule.clone(), database.stations.clone())?;
        let directory_service =
            DirectoryService::new(settings.schedule.clone(), database.stations.clone())?;
        let history_service =
            HistoryService::new(database.searches.clone(), settings.search.history_limit);
        let user_service = UserService::new(database.users.clone());

        Ok(Self {
            schedule_service,
            directory_service,
            history_service,
            user_service,
        })
    }
}
