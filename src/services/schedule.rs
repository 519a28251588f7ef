//! Schedule API service implementation
//!
//! This service handles the transportation-schedule HTTP API: point-to-point
//! searches, route-thread itinerary lookups, response parsing, and the
//! station-code resolution that precedes every search.

use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::ScheduleApiConfig;
use crate::database::StationRepository;
use crate::engine::{ItineraryLookup, ScheduleSearch};
use crate::models::{
    ConversationType, Itinerary, ResultList, RouteThread, Segment, StopPoint, TransportMode,
};
use crate::utils::errors::{TransitBuddyError, Result};

/// `search` endpoint response structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub segments: Vec<ApiSegment>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ApiSegment {
    #[serde(default)]
    pub thread: ApiThread,
    #[serde(default)]
    pub from: ApiPoint,
    #[serde(default)]
    pub to: ApiPoint,
    #[serde(default)]
    pub departure: String,
    #[serde(default)]
    pub arrival: String,
    #[serde(default)]
    pub duration: f64,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ApiThread {
    #[serde(default)]
    pub uid: String,
    #[serde(default)]
    pub number: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub carrier: ApiCarrier,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ApiCarrier {
    #[serde(default)]
    pub title: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ApiPoint {
    #[serde(default)]
    pub title: String,
}

/// `thread` endpoint response structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ThreadResponse {
    #[serde(default)]
    pub stops: Vec<ApiStop>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ApiStop {
    #[serde(default)]
    pub station: ApiPoint,
    #[serde(default)]
    pub duration: Option<f64>,
    #[serde(default)]
    pub stop_time: Option<f64>,
}

/// Schedule API service
#[derive(Debug, Clone)]
pub struct ScheduleService {
    client: Client,
    config: ScheduleApiConfig,
    stations: StationRepository,
}

impl ScheduleService {
    /// Create a new ScheduleService instance
    pub fn new(config: ScheduleApiConfig, stations: StationRepository) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent("TransitBuddy-Bot/1.0")
            .build()
            .map_err(TransitBuddyError::Http)?;

        Ok(Self { client, config, stations })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url, path)
    }

    /// Raw `search` call with already-resolved station codes
    pub async fn fetch_segments(
        &self,
        from_code: &str,
        to_code: &str,
        mode: TransportMode,
        date: Option<NaiveDate>,
    ) -> Result<SearchResponse> {
        let mut params = vec![
            ("apikey", self.config.api_key.clone()),
            ("from", from_code.to_string()),
            ("to", to_code.to_string()),
            ("transport_types", mode.code().to_string()),
        ];
        if let Some(date) = date {
            params.push(("date", date.format("%Y-%m-%d").to_string()));
        }

        let response = self
            .client
            .get(self.endpoint("search/"))
            .query(&params)
            .send()
            .await
            .map_err(|e| TransitBuddyError::SearchFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(TransitBuddyError::SearchFailed(format!(
                "search endpoint returned {}",
                response.status()
            )));
        }

        response
            .json::<SearchResponse>()
            .await
            .map_err(|e| TransitBuddyError::SearchFailed(e.to_string()))
    }

    /// Raw `thread` call for a route uid
    pub async fn fetch_thread(&self, uid: &str) -> Result<ThreadResponse> {
        let params = [("apikey", self.config.api_key.as_str()), ("uid", uid)];

        let response = self
            .client
            .get(self.endpoint("thread/"))
            .query(&params)
            .send()
            .await
            .map_err(|e| TransitBuddyError::ItineraryFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(TransitBuddyError::ItineraryFailed(format!(
                "thread endpoint returned {}",
                response.status()
            )));
        }

        response
            .json::<ThreadResponse>()
            .await
            .map_err(|e| TransitBuddyError::ItineraryFailed(e.to_string()))
    }

    async fn resolve_code(&self, title: &str, mode: TransportMode) -> Result<String> {
        match self.stations.find_code(title, mode).await {
            Ok(Some(code)) => Ok(code),
            Ok(None) => Err(TransitBuddyError::SearchFailed(format!(
                "no station code for {:?} with mode {}",
                title,
                mode.code()
            ))),
            Err(error) => {
                warn!(error = %error, title, "Station code lookup failed");
                Err(TransitBuddyError::SearchFailed(error.to_string()))
            }
        }
    }
}

/// Map decoded segments to the domain shape, order preserved
pub fn segments_from_response(response: SearchResponse) -> Vec<Segment> {
    response
        .segments
        .into_iter()
        .map(|segment| Segment {
            number: segment.thread.number,
            from_title: segment.from.title,
            to_title: segment.to.title,
            departure: segment.departure,
            arrival: segment.arrival,
            duration: segment.duration,
            carrier: segment.thread.carrier.title,
        })
        .collect()
}

/// Fold raw segments into unique route threads.
///
/// The dateless search returns one segment per departure; the itinerary flow
/// wants each recurring route once. First occurrence wins, order preserved,
/// keyed by the thread uid used for the follow-up lookup.
pub fn threads_from_response(response: SearchResponse) -> Vec<RouteThread> {
    let mut seen = std::collections::HashSet::new();
    let mut threads = Vec::new();

    for segment in response.segments {
        if segment.thread.uid.is_empty() || !seen.insert(segment.thread.uid.clone()) {
            continue;
        }
        threads.push(RouteThread {
            number: segment.thread.number,
            title: segment.thread.title,
            carrier: segment.thread.carrier.title,
            uid: segment.thread.uid,
        });
    }

    threads
}

/// Map a decoded thread response to the domain itinerary
pub fn itinerary_from_response(response: ThreadResponse) -> Itinerary {
    Itinerary {
        stops: response
            .stops
            .into_iter()
            .map(|stop| StopPoint {
                title: stop.station.title,
                elapsed: stop.duration,
                dwell: stop.stop_time,
            })
            .collect(),
    }
}

#[async_trait]
impl ScheduleSearch for ScheduleService {
    async fn query(
        &self,
        kind: ConversationType,
        from_title: &str,
        to_title: &str,
        mode: TransportMode,
        date: Option<NaiveDate>,
    ) -> Result<ResultList> {
        let from_code = self.resolve_code(from_title, mode).await?;
        let to_code = self.resolve_code(to_title, mode).await?;

        debug!(
            from = %from_code,
            to = %to_code,
            mode = mode.code(),
            kind = kind.code(),
            "Querying schedule API"
        );

        let response = self.fetch_segments(&from_code, &to_code, mode, date).await?;

        Ok(match kind {
            ConversationType::RoutesBetween => {
                ResultList::Segments(segments_from_response(response))
            }
            ConversationType::RouteStations => {
                ResultList::Threads(threads_from_response(response))
            }
        })
    }
}

#[async_trait]
impl ItineraryLookup for ScheduleService {
    async fn fetch_itinerary(&self, uid: &str) -> Result<Itinerary> {
        let response = self.fetch_thread(uid).await?;
        Ok(itinerary_from_response(response))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api_segment(uid: &str, number: &str) -> ApiSegment {
        ApiSegment {
            thread: ApiThread {
                uid: uid.to_string(),
                number: number.to_string(),
                title: "Москва - Казань".to_string(),
                carrier: ApiCarrier { title: "РЖД".to_string() },
            },
            from: ApiPoint { title: "Москва (Казанский вокзал)".to_string() },
            to: ApiPoint { title: "Казань".to_string() },
            departure: "2026-06-15T08:10:00+03:00".to_string(),
            arrival: "2026-06-15T20:40:00+03:00".to_string(),
            duration: 45000.0,
        }
    }

    #[test]
    fn duplicate_uids_fold_to_first_occurrence() {
        let response = SearchResponse {
            segments: vec![
                api_segment("uid-a", "101"),
                api_segment("uid-b", "102"),
                api_segment("uid-a", "101"),
            ],
        };

        let threads = threads_from_response(response);
        assert_eq!(threads.len(), 2);
        assert_eq!(threads[0].uid, "uid-a");
        assert_eq!(threads[1].uid, "uid-b");
    }

    #[test]
    fn segments_keep_api_order() {
        let response = SearchResponse {
            segments: vec![api_segment("uid-a", "101"), api_segment("uid-b", "102")],
        };

        let segments = segments_from_response(response);
        assert_eq!(segments[0].number, "101");
        assert_eq!(segments[1].number, "102");
        assert_eq!(segments[0].carrier, "РЖД");
    }

    #[test]
    fn search_response_decodes_from_api_json() {
        let raw = r#"{
            "segments": [{
                "thread": {
                    "uid": "7012_0_9600731_g26_4",
                    "number": "7012",
                    "title": "Москва - Казань",
                    "carrier": {"title": "РЖД"}
                },
                "from": {"title": "Москва (Казанский вокзал)"},
                "to": {"title": "Казань"},
                "departure": "2026-06-15T08:10:00+03:00",
                "arrival": "2026-06-15T20:40:00+03:00",
                "duration": 45000
            }]
        }"#;

        let response: SearchResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(response.segments.len(), 1);
        assert_eq!(response.segments[0].thread.number, "7012");
        assert_eq!(response.segments[0].duration, 45000.0);
    }

    #[test]
    fn thread_response_tolerates_missing_durations() {
        let raw = r#"{
            "stops": [
                {"station": {"title": "Москва"}, "duration": null, "stop_time": 600},
                {"station": {"title": "Казань"}, "duration": 45000}
            ]
        }"#;

        let response: ThreadResponse = serde_json::from_str(raw).unwrap();
        let itinerary = itinerary_from_response(response);
        assert_eq!(itinerary.stops.len(), 2);
        assert_eq!(itinerary.stops[0].elapsed, None);
        assert_eq!(itinerary.stops[0].dwell, Some(600.0));
        assert_eq!(itinerary.stops[1].elapsed, Some(45000.0));
        assert_eq!(itinerary.stops[1].dwell, None);
    }
}
