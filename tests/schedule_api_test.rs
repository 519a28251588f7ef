//! Schedule API client tests against a mocked HTTP server.

use assert_matches::assert_matches;
use sqlx::postgres::PgPoolOptions;
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

use TransitBuddy::config::ScheduleApiConfig;
use TransitBuddy::database::StationRepository;
use TransitBuddy::models::TransportMode;
use TransitBuddy::services::ScheduleService;
use TransitBuddy::utils::errors::TransitBuddyError;

/// Service pointed at the mock server. The station repository rides on a lazy
/// pool that is never touched by the raw endpoint calls.
fn service_for(server: &MockServer) -> ScheduleService {
    let pool = PgPoolOptions::new()
        .connect_lazy("postgresql://localhost/transitbuddy_test")
        .expect("lazy pool");

    let config = ScheduleApiConfig {
        base_url: format!("{}/", server.uri()),
        api_key: "test-key".to_string(),
        timeout_seconds: 5,
    };

    ScheduleService::new(config, StationRepository::new(pool)).expect("service")
}

fn search_body() -> serde_json::Value {
    serde_json::json!({
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
    })
}

#[tokio::test]
async fn search_request_decodes_segments() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search/"))
        .and(query_param("apikey", "test-key"))
        .and(query_param("from", "s2000003"))
        .and(query_param("to", "s9600731"))
        .and(query_param("transport_types", "train"))
        .and(query_param("date", "2026-06-15"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_body()))
        .mount(&server)
        .await;

    let service = service_for(&server);
    let date = chrono::NaiveDate::from_ymd_opt(2026, 6, 15).unwrap();
    let response = service
        .fetch_segments("s2000003", "s9600731", TransportMode::Train, Some(date))
        .await
        .unwrap();

    assert_eq!(response.segments.len(), 1);
    assert_eq!(response.segments[0].thread.number, "7012");
    assert_eq!(response.segments[0].from.title, "Москва (Казанский вокзал)");
    assert_eq!(response.segments[0].duration, 45000.0);
}

#[tokio::test]
async fn dateless_search_omits_the_date_parameter() {
    let server = MockServer::start().await;

    // Only a date-free request matches; a stray date parameter would miss the
    // mock and surface as a search failure below.
    Mock::given(method("GET"))
        .and(path("/search/"))
        .and(query_param("transport_types", "bus"))
        .and(query_param_is_missing("date"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"segments": []})))
        .mount(&server)
        .await;

    let service = service_for(&server);
    let response = service
        .fetch_segments("s1", "s2", TransportMode::Bus, None)
        .await
        .unwrap();

    assert!(response.segments.is_empty());
}

#[tokio::test]
async fn failed_search_status_maps_to_search_failure() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search/"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let service = service_for(&server);
    let error = service
        .fetch_segments("s1", "s2", TransportMode::Train, None)
        .await
        .unwrap_err();

    assert_matches!(error, TransitBuddyError::SearchFailed(_));
}

#[tokio::test]
async fn thread_request_decodes_stops() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/thread/"))
        .and(query_param("apikey", "test-key"))
        .and(query_param("uid", "7012_0_9600731_g26_4"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "stops": [
                {"station": {"title": "Москва (Казанский вокзал)"}, "duration": null, "stop_time": 600},
                {"station": {"title": "Казань"}, "duration": 45000, "stop_time": null}
            ]
        })))
        .mount(&server)
        .await;

    let service = service_for(&server);
    let response = service.fetch_thread("7012_0_9600731_g26_4").await.unwrap();

    assert_eq!(response.stops.len(), 2);
    assert_eq!(response.stops[0].station.title, "Москва (Казанский вокзал)");
    assert_eq!(response.stops[0].stop_time, Some(600.0));
    assert_eq!(response.stops[1].duration, Some(45000.0));
}

#[tokio::test]
async fn failed_thread_status_maps_to_itinerary_failure() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/thread/"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let service = service_for(&server);
    let error = service.fetch_thread("missing").await.unwrap_err();

    assert_matches!(error, TransitBuddyError::ItineraryFailed(_));
}
