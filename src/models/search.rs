//! Search history models

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::transport::TransportMode;

/// Which guided flow a conversation runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversationType {
    /// Point-to-point schedule search with a travel date
    RoutesBetween,
    /// Stop-by-stop itinerary lookup for a chosen route
    RouteStations,
}

impl ConversationType {
    /// Storage code
    pub fn code(&self) -> &'static str {
        match self {
            ConversationType::RoutesBetween => "routes_between",
            ConversationType::RouteStations => "route_stations",
        }
    }
}

/// A persisted completed search, as read back for /history
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SearchRecord {
    pub id: i64,
    pub user_id: i64,
    pub search_type: String,
    pub departure_station: String,
    pub arrival_station: String,
    pub date: Option<NaiveDate>,
    pub transport: String,
    pub created_at: DateTime<Utc>,
}

impl std::fmt::Display for SearchRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let transport = TransportMode::from_code(&self.transport)
            .map(|m| m.name_ru())
            .unwrap_or(self.transport.as_str());

        if self.search_type == ConversationType::RoutesBetween.code() {
            let date = self
                .date
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default();
            write!(
                f,
                "{}. Рейсы на {} {} - {} на {}",
                self.id, transport, self.departure_station, self.arrival_station, date
            )
        } else {
            write!(
                f,
                "{}. Маршрут для: {} {} - {}",
                self.id, transport, self.departure_station, self.arrival_station
            )
        }
    }
}

/// Insert payload for a completed search
#[derive(Debug, Clone)]
pub struct CreateSearchRequest {
    pub user_id: i64,
    pub search_type: ConversationType,
    pub departure_station: String,
    pub arrival_station: String,
    pub date: Option<NaiveDate>,
    pub transport: TransportMode,
}
