use std::sync::atomic::{AtomicU64, Ordering};

use model::{journey::JourneyResult, waypoint::Waypoint};
use tokio::sync::watch;

use crate::aggregator::JourneyAggregator;

/// The journey published for a certain version of the waypoint list.
#[derive(Debug, Clone, Default)]
pub struct PlannedJourney {
    /// Zero until the first computation was published.
    pub generation: u64,
    pub waypoints: Vec<Waypoint>,
    pub result: JourneyResult,
}

/// Recomputes the journey whenever the waypoint list changes and publishes
/// the result of the latest list only.
///
/// Each update is tagged with a generation. An update that finishes after a
/// newer one was started is discarded, so a slow computation for an old list
/// never overwrites the journey of the current one.
pub struct JourneyPlanner {
    aggregator: JourneyAggregator,
    generation: AtomicU64,
    latest: watch::Sender<PlannedJourney>,
}

impl JourneyPlanner {
    pub fn new(aggregator: JourneyAggregator) -> Self {
        let (latest, _) = watch::channel(PlannedJourney::default());
        Self {
            aggregator,
            generation: AtomicU64::new(0),
            latest,
        }
    }

    /// Computes the journey for `waypoints`. Returns `None` if a newer update
    /// was started in the meantime and this result was discarded.
    pub async fn update(&self, waypoints: Vec<Waypoint>) -> Option<JourneyResult> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let result = self.aggregator.compute_journey(&waypoints).await;

        let published = self.latest.send_if_modified(|latest| {
            if self.generation.load(Ordering::SeqCst) != generation {
                return false;
            }
            *latest = PlannedJourney {
                generation,
                waypoints,
                result: result.clone(),
            };
            true
        });

        if published {
            Some(result)
        } else {
            log::debug!("discarding journey of superseded generation {}", generation);
            None
        }
    }

    /// The most recently published journey.
    pub fn latest(&self) -> PlannedJourney {
        self.latest.borrow().clone()
    }

    /// Receives every journey published from now on.
    pub fn subscribe(&self) -> watch::Receiver<PlannedJourney> {
        self.latest.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use std::{sync::Arc, time::Duration};

    use utility::id::Id;

    use super::*;
    use crate::{
        cache::ResolutionCache,
        notification::Notifier,
        testing::{TableResolver, JFK, LAX, ORD},
    };

    fn planner(resolver: Arc<TableResolver>) -> JourneyPlanner {
        JourneyPlanner::new(JourneyAggregator::new(
            Arc::new(ResolutionCache::new(resolver)),
            Notifier::discarding(),
        ))
    }

    #[tokio::test]
    async fn publishes_each_update() {
        let planner = planner(TableResolver::airports().shared());
        let mut updates = planner.subscribe();
        assert_eq!(planner.latest().generation, 0);

        let result = planner
            .update(vec![
                Waypoint::new("a", "JFK Airport"),
                Waypoint::new("b", "LAX Airport"),
            ])
            .await
            .unwrap();
        assert_eq!(result.total_distance(), JFK.distance_to(&LAX));
        assert!(updates.has_changed().unwrap());
        assert_eq!(updates.borrow_and_update().generation, 1);

        planner
            .update(vec![
                Waypoint::new("a", "JFK Airport"),
                Waypoint::new("b", "O'Hare Airport"),
            ])
            .await
            .unwrap();
        let latest = planner.latest();
        assert_eq!(latest.generation, 2);
        assert_eq!(latest.waypoints.len(), 2);
        assert_eq!(latest.result.total_distance(), JFK.distance_to(&ORD));
    }

    #[tokio::test]
    async fn stale_update_does_not_overwrite_newer_one() {
        let resolver = TableResolver::airports()
            .with("Slow Airport", ORD)
            .delayed("Slow Airport", Duration::from_millis(200))
            .shared();
        let planner = planner(resolver);

        let older = planner.update(vec![
            Waypoint::new("a", "Slow Airport"),
            Waypoint::new("b", "JFK Airport"),
        ]);
        let newer = async {
            tokio::time::sleep(Duration::from_millis(20)).await;
            planner
                .update(vec![
                    Waypoint::new("a", "LAX Airport"),
                    Waypoint::new("b", "JFK Airport"),
                ])
                .await
        };
        let (older, newer) = tokio::join!(older, newer);

        assert!(older.is_none());
        assert!(newer.is_some());
        let latest = planner.latest();
        assert_eq!(latest.generation, 2);
        assert_eq!(
            latest.result.get(&Id::from("a")).unwrap().coordinate,
            Some(LAX)
        );
    }
}
