//! Station directory model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One row of the station directory
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct StationRecord {
    pub id: i64,
    pub title: String,
    pub code: String,
    pub transport_type: String,
}
