use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
    time::Duration,
};

use async_trait::async_trait;
use model::coordinate::Coordinate;

use crate::{ResolutionError, ResolutionResult, Resolver};

pub(crate) const JFK: Coordinate = Coordinate {
    latitude: 40.6413,
    longitude: -73.7781,
};
pub(crate) const LAX: Coordinate = Coordinate {
    latitude: 33.9416,
    longitude: -118.4085,
};
pub(crate) const ORD: Coordinate = Coordinate {
    latitude: 41.9742,
    longitude: -87.9073,
};

/// Resolves from a fixed table and counts how often each name was asked for.
#[derive(Default)]
pub(crate) struct TableResolver {
    coordinates: HashMap<String, Coordinate>,
    delays: HashMap<String, Duration>,
    calls: Mutex<HashMap<String, usize>>,
}

impl TableResolver {
    pub(crate) fn airports() -> Self {
        Self::default()
            .with("JFK Airport", JFK)
            .with("LAX Airport", LAX)
            .with("O'Hare Airport", ORD)
    }

    pub(crate) fn with(mut self, name: &str, coordinate: Coordinate) -> Self {
        self.coordinates.insert(name.to_owned(), coordinate);
        self
    }

    pub(crate) fn delayed(mut self, name: &str, delay: Duration) -> Self {
        self.delays.insert(name.to_owned(), delay);
        self
    }

    pub(crate) fn calls(&self, name: &str) -> usize {
        self.calls.lock().unwrap().get(name).copied().unwrap_or(0)
    }

    pub(crate) fn shared(self) -> Arc<Self> {
        Arc::new(self)
    }
}

#[async_trait]
impl Resolver for TableResolver {
    async fn resolve(&self, name: &str) -> ResolutionResult<Coordinate> {
        *self.calls.lock().unwrap().entry(name.to_owned()).or_default() += 1;
        match self.delays.get(name) {
            Some(delay) => tokio::time::sleep(*delay).await,
            None => tokio::task::yield_now().await,
        }
        self.coordinates
            .get(name)
            .copied()
            .ok_or_else(|| ResolutionError::not_found(name))
    }
}
