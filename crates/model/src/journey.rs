use indexmap::IndexMap;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use utility::id::Id;

use crate::{
    coordinate::{Bounds, Coordinate},
    waypoint::Waypoint,
    ExampleData,
};

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct WaypointResult {
    /// `None` while pending or if the name could not be resolved.
    pub coordinate: Option<Coordinate>,
    /// Nautical miles from the closest preceding resolved waypoint.
    pub distance_from_previous: Option<f64>,
}

impl WaypointResult {
    pub fn unresolved() -> Self {
        Self::default()
    }

    pub fn resolved(coordinate: Coordinate, distance_from_previous: Option<f64>) -> Self {
        Self {
            coordinate: Some(coordinate),
            distance_from_previous,
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.coordinate.is_some()
    }
}

/// Per-waypoint results of a journey plus the total distance.
///
/// The total is always derived from the results when the journey is built, so
/// it can not drift from the leg distances.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct JourneyResult {
    results: IndexMap<Id<Waypoint>, WaypointResult>,
    total_distance: f64,
}

impl JourneyResult {
    pub fn new(results: IndexMap<Id<Waypoint>, WaypointResult>) -> Self {
        let total_distance = results
            .values()
            .filter_map(|result| result.distance_from_previous)
            .sum();
        Self {
            results,
            total_distance,
        }
    }

    pub fn results(&self) -> &IndexMap<Id<Waypoint>, WaypointResult> {
        &self.results
    }

    pub fn get(&self, id: &Id<Waypoint>) -> Option<&WaypointResult> {
        self.results.get(id)
    }

    pub fn total_distance(&self) -> f64 {
        self.total_distance
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn resolved_count(&self) -> usize {
        self.results
            .values()
            .filter(|result| result.is_resolved())
            .count()
    }

    /// Resolved coordinates in the order of `waypoints`, i.e. the vertices of
    /// the route line drawn on a map.
    pub fn path(&self, waypoints: &[Waypoint]) -> Vec<Coordinate> {
        waypoints
            .iter()
            .filter_map(|waypoint| self.results.get(&waypoint.id))
            .filter_map(|result| result.coordinate)
            .collect()
    }

    pub fn bounds(&self, waypoints: &[Waypoint]) -> Option<Bounds> {
        Bounds::from_coordinates(self.path(waypoints))
    }
}

impl ExampleData for JourneyResult {
    fn example_data() -> Self {
        let jfk = Coordinate::example_data();
        let lax = Coordinate::new(33.9416, -118.4085);
        let mut results = IndexMap::new();
        results.insert(Id::from("0"), WaypointResult::resolved(jfk, None));
        results.insert(
            Id::from("1"),
            WaypointResult::resolved(lax, Some(jfk.distance_to(&lax))),
        );
        Self::new(results)
    }
}
