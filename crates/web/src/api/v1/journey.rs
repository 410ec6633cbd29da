use std::{collections::HashSet, sync::Arc};

use axum::{
    extract::{rejection::JsonRejection, OriginalUri, State},
    http::Method,
    routing::{get, on, post},
    Json, Router,
};
use journey::{aggregator::JourneyAggregator, cache::ResolutionCache, notification};
use model::{
    coordinate::{Bounds, Coordinate},
    format_nautical_miles,
    journey::JourneyResult,
    waypoint::Waypoint,
    ExampleData,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{
    common::{route_not_found, schema, RouteErrorResponse, RouteResult, METHOD_FILTER_ALL},
    WebState,
};

pub(crate) fn routes(state: WebState) -> Router {
    Router::new()
        .route("/", post(compute_journey))
        .route("/schema", get(schema::<JourneyDto>))
        .with_state(state)
        .fallback_service(on(METHOD_FILTER_ALL, route_not_found))
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct JourneyRequest {
    pub waypoints: Vec<Waypoint>,
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct JourneyDto {
    #[serde(flatten)]
    pub journey: JourneyResult,
    pub total_distance_label: String,
    /// Resolved stops in travel order, the route line on the map.
    pub path: Vec<Coordinate>,
    pub bounds: Option<Bounds>,
    /// One message per waypoint that could not be resolved.
    pub errors: Vec<String>,
}

impl JourneyDto {
    pub fn new(journey: JourneyResult, waypoints: &[Waypoint], errors: Vec<String>) -> Self {
        Self {
            total_distance_label: format_nautical_miles(journey.total_distance()),
            path: journey.path(waypoints),
            bounds: journey.bounds(waypoints),
            journey,
            errors,
        }
    }
}

impl ExampleData for JourneyDto {
    fn example_data() -> Self {
        let waypoints = vec![
            Waypoint::example_data(),
            Waypoint::new("1", "Los Angeles International Airport"),
        ];
        Self::new(JourneyResult::example_data(), &waypoints, vec![])
    }
}

async fn compute_journey(
    OriginalUri(original_uri): OriginalUri,
    State(resolution_cache): State<Arc<ResolutionCache>>,
    payload: Result<Json<JourneyRequest>, JsonRejection>,
) -> RouteResult<Json<JourneyDto>> {
    let Json(request) = payload.map_err(|why| {
        RouteErrorResponse::from(why)
            .with_method(&Method::POST)
            .with_uri(original_uri.path())
    })?;

    let mut seen = HashSet::new();
    if let Some(duplicate) = request
        .waypoints
        .iter()
        .find(|waypoint| !seen.insert(&waypoint.id))
    {
        return Err(RouteErrorResponse::bad_request("Waypoint ids must be unique.")
            .with_method(&Method::POST)
            .with_uri(original_uri.path())
            .with_detailed_information(format!("duplicate id '{}'", duplicate.id)));
    }

    let (notifier, mut notifications) = notification::channel();
    let journey = JourneyAggregator::new(resolution_cache, notifier)
        .compute_journey(&request.waypoints)
        .await;
    let errors = notifications
        .drain()
        .into_iter()
        .map(|notification| notification.message)
        .collect::<Vec<_>>();

    Ok(Json(JourneyDto::new(journey, &request.waypoints, errors)))
}
