use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
};

use futures::{
    future::{BoxFuture, Shared},
    FutureExt,
};
use model::coordinate::Coordinate;
use tokio::sync::Mutex;

use crate::{ResolutionResult, Resolver};

type PendingResolution = Shared<BoxFuture<'static, ResolutionResult<Coordinate>>>;

enum Entry {
    Resolved(Coordinate),
    /// A lookup is in flight. The ticket tells apart two lookups of the same
    /// name started one after the other, so a finished lookup only settles
    /// the entry it created.
    Pending {
        ticket: u64,
        resolution: PendingResolution,
    },
}

/// Memoizes a [`Resolver`].
///
/// Successful lookups are kept for the lifetime of the cache, failures are
/// forgotten so they can be retried. Concurrent lookups of a name that is not
/// cached yet share a single call to the resolver.
pub struct ResolutionCache {
    resolver: Arc<dyn Resolver>,
    entries: Mutex<HashMap<String, Entry>>,
    next_ticket: AtomicU64,
}

impl ResolutionCache {
    pub fn new(resolver: Arc<dyn Resolver>) -> Self {
        Self {
            resolver,
            entries: Mutex::new(HashMap::new()),
            next_ticket: AtomicU64::new(0),
        }
    }

    /// Resolves `name`, keyed by the exact string.
    pub async fn resolve_cached(&self, name: &str) -> ResolutionResult<Coordinate> {
        let (ticket, resolution) = {
            let mut entries = self.entries.lock().await;
            match entries.get(name) {
                Some(Entry::Resolved(coordinate)) => {
                    log::trace!("cache hit for {:?}", name);
                    return Ok(*coordinate);
                }
                Some(Entry::Pending { ticket, resolution }) => {
                    log::trace!("joining pending lookup of {:?}", name);
                    (*ticket, resolution.clone())
                }
                None => {
                    log::debug!("cache miss for {:?}, asking resolver", name);
                    let ticket = self.next_ticket.fetch_add(1, Ordering::Relaxed);
                    let resolution = self.start_resolution(name);
                    entries.insert(
                        name.to_owned(),
                        Entry::Pending {
                            ticket,
                            resolution: resolution.clone(),
                        },
                    );
                    (ticket, resolution)
                }
            }
        };

        let result = resolution.await;
        self.settle(name, ticket, &result).await;
        result
    }

    /// Returns the cached coordinate without asking the resolver.
    pub async fn cached(&self, name: &str) -> Option<Coordinate> {
        match self.entries.lock().await.get(name) {
            Some(Entry::Resolved(coordinate)) => Some(*coordinate),
            _ => None,
        }
    }

    /// Number of names resolved successfully so far.
    pub async fn resolved_len(&self) -> usize {
        self.entries
            .lock()
            .await
            .values()
            .filter(|entry| matches!(entry, Entry::Resolved(_)))
            .count()
    }

    fn start_resolution(&self, name: &str) -> PendingResolution {
        let resolver = self.resolver.clone();
        let name = name.to_owned();
        async move { resolver.resolve(&name).await }.boxed().shared()
    }

    async fn settle(
        &self,
        name: &str,
        ticket: u64,
        result: &ResolutionResult<Coordinate>,
    ) {
        let mut entries = self.entries.lock().await;
        let is_current = matches!(
            entries.get(name),
            Some(Entry::Pending { ticket: current, .. }) if *current == ticket
        );
        // someone waiting on the same lookup got here first
        if !is_current {
            return;
        }
        match result {
            Ok(coordinate) => {
                entries.insert(name.to_owned(), Entry::Resolved(*coordinate));
            }
            Err(why) => {
                log::debug!("not caching failed lookup of {:?}: {}", name, why);
                entries.remove(name);
            }
        }
    }
}
