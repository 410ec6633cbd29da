use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
};

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
};
use journey::{ResolutionError, ResolutionResult, Resolver};
use model::coordinate::Coordinate;
use serde_json::{json, Value};
use tower::ServiceExt;
use web::{api::v1::journey::JourneyDto, router, WebConfig, WebState};

const JFK: Coordinate = Coordinate {
    latitude: 40.6413,
    longitude: -73.7781,
};
const ORD: Coordinate = Coordinate {
    latitude: 41.9742,
    longitude: -87.9073,
};
const LAX: Coordinate = Coordinate {
    latitude: 33.9416,
    longitude: -118.4085,
};

struct AirportTable {
    airports: HashMap<&'static str, Coordinate>,
    calls: AtomicUsize,
}

#[async_trait]
impl Resolver for AirportTable {
    async fn resolve(&self, name: &str) -> ResolutionResult<Coordinate> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.airports
            .get(name)
            .copied()
            .ok_or_else(|| ResolutionError::not_found(name))
    }
}

// floats may lose their last digit on the way through JSON
fn same_position(a: &Coordinate, b: &Coordinate) -> bool {
    (a.latitude - b.latitude).abs() < 1e-9 && (a.longitude - b.longitude).abs() < 1e-9
}

fn airports() -> Arc<AirportTable> {
    Arc::new(AirportTable {
        airports: HashMap::from([
            ("JFK Airport", JFK),
            ("O'Hare Airport", ORD),
            ("LAX Airport", LAX),
        ]),
        calls: AtomicUsize::new(0),
    })
}

fn test_app(resolver: Arc<AirportTable>) -> axum::Router {
    router(WebState::new(resolver), &WebConfig::default())
}

fn post_journey(body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/v1/journey")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), 1024 * 1024).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn ping_answers_pong() {
    let request = Request::builder()
        .uri("/api/ping")
        .body(Body::empty())
        .unwrap();

    let response = test_app(airports()).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, json!({"message": "pong!"}));
}

#[tokio::test]
async fn journey_endpoint_returns_legs_and_total() {
    let payload = json!({
        "waypoints": [
            {"id": "a", "name": "JFK Airport"},
            {"id": "b", "name": "O'Hare Airport"},
            {"id": "c", "name": "LAX Airport"},
            {"id": "d", "name": ""}
        ]
    });

    let response = test_app(airports())
        .oneshot(post_journey(payload))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body: JourneyDto = serde_json::from_value(json_body(response).await).unwrap();
    let expected = JFK.distance_to(&ORD) + ORD.distance_to(&LAX);
    assert!((body.journey.total_distance() - expected).abs() < 1e-6);
    assert_eq!(body.journey.results().len(), 3);
    assert_eq!(body.path.len(), 3);
    assert!(body
        .path
        .iter()
        .zip([JFK, ORD, LAX].iter())
        .all(|(actual, expected)| same_position(actual, expected)));
    assert!(body.errors.is_empty());
    assert!(body.total_distance_label.ends_with(" Nautical Miles"));
    let bounds = body.bounds.unwrap();
    assert!(same_position(&bounds.south_west, &Coordinate::new(33.9416, -118.4085)));
    assert!(same_position(&bounds.north_east, &Coordinate::new(41.9742, -73.7781)));
}

#[tokio::test]
async fn unresolvable_waypoints_are_reported() {
    let payload = json!({
        "waypoints": [
            {"id": "a", "name": "JFK Airport"},
            {"id": "b", "name": "Atlantis"},
            {"id": "c", "name": "LAX Airport"}
        ]
    });

    let response = test_app(airports())
        .oneshot(post_journey(payload))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["results"]["b"], json!({}));
    assert_eq!(
        body["errors"],
        json!(["Could not find the position of \"Atlantis\"."])
    );
    let leg = body["results"]["c"]["distanceFromPrevious"].as_f64().unwrap();
    assert!((leg - JFK.distance_to(&LAX)).abs() < 1e-6);
}

#[tokio::test]
async fn resolutions_are_cached_across_requests() {
    let resolver = airports();
    let app = test_app(resolver.clone());
    let payload = json!({
        "waypoints": [
            {"id": "a", "name": "JFK Airport"},
            {"id": "b", "name": "LAX Airport"}
        ]
    });

    for _ in 0..3 {
        let response = app.clone().oneshot(post_journey(payload.clone())).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
    assert_eq!(resolver.calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn empty_journey_has_zero_total() {
    let response = test_app(airports())
        .oneshot(post_journey(json!({"waypoints": []})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["results"], json!({}));
    assert_eq!(body["totalDistance"], json!(0.0));
    assert_eq!(body["totalDistanceLabel"], json!("~0 Nautical Miles"));
    assert!(body.get("bounds").is_none());
}

#[tokio::test]
async fn duplicate_ids_are_rejected() {
    let payload = json!({
        "waypoints": [
            {"id": "a", "name": "JFK Airport"},
            {"id": "a", "name": "LAX Airport"}
        ]
    });

    let response = test_app(airports())
        .oneshot(post_journey(payload))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = json_body(response).await;
    assert_eq!(body["message"], json!("Waypoint ids must be unique."));
    assert_eq!(body["requestedUri"], json!("/api/v1/journey"));
}

#[tokio::test]
async fn malformed_bodies_are_rejected() {
    let request = Request::builder()
        .method("POST")
        .uri("/api/v1/journey")
        .header("content-type", "application/json")
        .body(Body::from("{\"waypoints\": 12}"))
        .unwrap();

    let response = test_app(airports()).oneshot(request).await.unwrap();
    assert!(response.status().is_client_error());

    let body = json_body(response).await;
    assert_eq!(body["message"], json!("The request body is not valid."));
}

#[tokio::test]
async fn unknown_api_routes_are_json_404s() {
    let request = Request::builder()
        .uri("/api/v1/nowhere")
        .body(Body::empty())
        .unwrap();

    let response = test_app(airports()).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = json_body(response).await;
    assert_eq!(body["message"], json!("Not Found"));
    assert_eq!(body["httpMethod"], json!("GET"));
}

#[tokio::test]
async fn schema_is_served() {
    let request = Request::builder()
        .uri("/api/v1/journey/schema")
        .body(Body::empty())
        .unwrap();

    let response = test_app(airports()).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["title"], json!("JourneyDto"));
}
