//! Database service layer
//!
//! This module provides a high-level interface to database operations

use crate::database::{DatabasePool, SearchRepository, StationRepository, UserRepository};

#[derive(Debug, Clone)]
pub struct DatabaseService {
    pub users: UserRepository,
    pub stations: StationRepository,
    pub searches: SearchRepository,
}

impl DatabaseService {
    pub fn new(pool: DatabasePool) -> Self {
        Self {
            users: UserRepository::new(pool.clone()),
            stations: StationRepository::new(pool.clone()),
            searches: SearchRepository::new(pool),
        }
    }
}
