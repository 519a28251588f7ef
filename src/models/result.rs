//! Search result models
//!
//! Typed shapes for what the schedule API returns: point-to-point segments
//! for departure searches and route threads for itinerary searches.

use serde::{Deserialize, Serialize};

/// One scheduled trip between two stops
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// Route/thread number, e.g. "7012"
    pub number: String,
    pub from_title: String,
    pub to_title: String,
    /// ISO-8601 instants exactly as received
    pub departure: String,
    pub arrival: String,
    /// Trip duration in seconds
    pub duration: f64,
    pub carrier: String,
}

/// A recurring named route; `uid` resolves it to a full stop sequence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteThread {
    pub number: String,
    pub title: String,
    pub carrier: String,
    pub uid: String,
}

/// An ordered search result, homogeneous by construction.
///
/// Ordering is preserved exactly as received from the schedule API.
#[derive(Debug, Clone, PartialEq)]
pub enum ResultList {
    Segments(Vec<Segment>),
    Threads(Vec<RouteThread>),
}

impl ResultList {
    pub fn len(&self) -> usize {
        match self {
            ResultList::Segments(items) => items.len(),
            ResultList::Threads(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// One stop on a route itinerary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StopPoint {
    pub title: String,
    /// Seconds in transit since the previous stop, when reported
    pub elapsed: Option<f64>,
    /// Seconds the vehicle dwells at this stop, when reported
    pub dwell: Option<f64>,
}

/// Full stop-by-stop itinerary for one route thread
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Itinerary {
    pub stops: Vec<StopPoint>,
}
