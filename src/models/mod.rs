//! Data models module
//!
//! This module contains all data structures used throughout the application

pub mod result;
pub mod search;
pub mod station;
pub mod transport;
pub mod user;

// Re-export commonly used models
pub use result::{Itinerary, ResultList, RouteThread, Segment, StopPoint};
pub use search::{ConversationType, CreateSearchRequest, SearchRecord};
pub use station::StationRecord;
pub use transport::TransportMode;
pub use user::User;
