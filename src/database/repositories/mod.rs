//! Repository modules for database operations

pub mod search;
pub mod station;
pub mod user;

pub use search::SearchRepository;
pub use station::StationRepository;
pub use user::UserRepository;
