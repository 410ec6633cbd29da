use std::sync::Arc;

use futures::future::join_all;
use indexmap::IndexMap;
use model::{
    coordinate::Coordinate,
    journey::{JourneyResult, WaypointResult},
    waypoint::Waypoint,
};

use crate::{
    cache::ResolutionCache,
    notification::{Notification, Notifier},
};

/// Turns an ordered list of waypoints into leg distances and a total.
#[derive(Clone)]
pub struct JourneyAggregator {
    cache: Arc<ResolutionCache>,
    notifier: Notifier,
}

impl JourneyAggregator {
    pub fn new(cache: Arc<ResolutionCache>, notifier: Notifier) -> Self {
        Self { cache, notifier }
    }

    pub fn cache(&self) -> &Arc<ResolutionCache> {
        &self.cache
    }

    /// Resolves all named waypoints concurrently and chains the distances.
    ///
    /// A waypoint that can not be resolved is reported through the notifier
    /// and kept without coordinate or distance. The next resolved waypoint
    /// measures from the last one that did resolve. Never fails as a whole.
    pub async fn compute_journey(&self, waypoints: &[Waypoint]) -> JourneyResult {
        let named = waypoints
            .iter()
            .filter(|waypoint| waypoint.is_specified())
            .collect::<Vec<_>>();

        let resolutions = join_all(
            named
                .iter()
                .map(|waypoint| self.cache.resolve_cached(&waypoint.name)),
        )
        .await;

        let mut results = IndexMap::with_capacity(named.len());
        let mut previous: Option<Coordinate> = None;
        for (waypoint, resolution) in named.into_iter().zip(resolutions) {
            let result = match resolution {
                Ok(coordinate) => {
                    let distance =
                        previous.map(|previous| previous.distance_to(&coordinate));
                    previous = Some(coordinate);
                    WaypointResult::resolved(coordinate, distance)
                }
                Err(why) => {
                    log::warn!("waypoint {} is unresolved: {}", waypoint.id, why);
                    self.notifier
                        .notify(Notification::new(waypoint.id.clone(), why.to_string()));
                    WaypointResult::unresolved()
                }
            };
            results.insert(waypoint.id.clone(), result);
        }

        let journey = JourneyResult::new(results);
        log::debug!(
            "journey over {} waypoints ({} resolved): {:.1} nm",
            journey.results().len(),
            journey.resolved_count(),
            journey.total_distance()
        );
        journey
    }
}
