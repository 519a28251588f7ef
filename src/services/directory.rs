//! Station directory service implementation
//!
//! Bootstraps the station directory from the schedule API's `stations_list`
//! endpoint and answers existence checks during input validation.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{info, warn};

use crate::config::ScheduleApiConfig;
use crate::database::repositories::station::NewStation;
use crate::database::StationRepository;
use crate::engine::DirectoryLookup;
use crate::models::TransportMode;
use crate::utils::errors::{TransitBuddyError, Result};

/// `stations_list` response: countries -> regions -> settlements -> stations
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct StationsListResponse {
    #[serde(default)]
    pub countries: Vec<ApiCountry>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ApiCountry {
    #[serde(default)]
    pub regions: Vec<ApiRegion>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ApiRegion {
    #[serde(default)]
    pub settlements: Vec<ApiSettlement>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ApiSettlement {
    #[serde(default)]
    pub stations: Vec<ApiDirectoryStation>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ApiDirectoryStation {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub codes: ApiStationCodes,
    #[serde(default)]
    pub transport_type: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ApiStationCodes {
    #[serde(default)]
    pub yandex_code: String,
}

/// Station directory service
#[derive(Debug, Clone)]
pub struct DirectoryService {
    client: Client,
    config: ScheduleApiConfig,
    stations: StationRepository,
}

impl DirectoryService {
    /// Create a new DirectoryService instance
    pub fn new(config: ScheduleApiConfig, stations: StationRepository) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent("TransitBuddy-Bot/1.0")
            .build()
            .map_err(TransitBuddyError::Http)?;

        Ok(Self { client, config, stations })
    }

    /// Download the directory and replace the stations table.
    ///
    /// On any failure the previous directory stays in place.
    pub async fn load_stations(&self) -> Result<u64> {
        info!("Loading station directory from the schedule API...");

        let url = format!("{}stations_list/", self.config.base_url);
        let params = [
            ("apikey", self.config.api_key.as_str()),
            ("lang", "ru_RU"),
            ("format", "json"),
        ];

        let response = self.client.get(url).query(&params).send().await?;
        if !response.status().is_success() {
            return Err(TransitBuddyError::Config(format!(
                "stations_list endpoint returned {}",
                response.status()
            )));
        }

        let directory: StationsListResponse = response.json().await?;
        let stations = flatten_directory(directory);

        if stations.is_empty() {
            warn!("Station directory download produced no entries, keeping old table");
            return Err(TransitBuddyError::Config(
                "stations_list produced an empty directory".to_string(),
            ));
        }

        let inserted = self.stations.replace_all(&stations).await?;
        info!(count = inserted, "Station directory reloaded");
        Ok(inserted)
    }

    /// Directory size
    pub async fn count(&self) -> Result<i64> {
        self.stations.count().await
    }
}

/// Flatten the nested directory to station rows; entries without a title or
/// code are skipped.
pub fn flatten_directory(directory: StationsListResponse) -> Vec<NewStation> {
    let mut stations = Vec::new();

    for country in directory.countries {
        for region in country.regions {
            for settlement in region.settlements {
                for station in settlement.stations {
                    if station.title.is_empty() || station.codes.yandex_code.is_empty() {
                        continue;
                    }
                    stations.push(NewStation {
                        title: station.title,
                        code: station.codes.yandex_code,
                        transport_type: station.transport_type,
                    });
                }
            }
        }
    }

    stations
}

#[async_trait]
impl DirectoryLookup for DirectoryService {
    async fn exists(&self, title: &str, mode: Option<TransportMode>) -> Result<bool> {
        self.stations.exists(title, mode).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flatten_skips_incomplete_entries() {
        let raw = r#"{
            "countries": [{
                "regions": [{
                    "settlements": [{
                        "stations": [
                            {
                                "title": "Казань",
                                "codes": {"yandex_code": "s9600731"},
                                "transport_type": "train"
                            },
                            {
                                "title": "",
                                "codes": {"yandex_code": "s123"},
                                "transport_type": "bus"
                            },
                            {
                                "title": "Без кода",
                                "codes": {},
                                "transport_type": "bus"
                            }
                        ]
                    }]
                }]
            }]
        }"#;

        let directory: StationsListResponse = serde_json::from_str(raw).unwrap();
        let stations = flatten_directory(directory);

        assert_eq!(stations.len(), 1);
        assert_eq!(stations[0].title, "Казань");
        assert_eq!(stations[0].code, "s9600731");
        assert_eq!(stations[0].transport_type, "train");
    }
}
