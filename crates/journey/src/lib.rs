use std::{error::Error, fmt, sync::Arc};

use async_trait::async_trait;
use model::coordinate::Coordinate;

pub mod aggregator;
pub mod cache;
pub mod notification;
pub mod planner;

#[cfg(test)]
pub(crate) mod testing;

/// A name could not be mapped to a coordinate.
///
/// Clone, because a single failed lookup is handed to every caller that was
/// waiting on it.
#[derive(Debug, Clone)]
pub enum ResolutionError {
    NotFound {
        name: String,
    },
    Upstream {
        name: String,
        reason: Arc<dyn Error + Send + Sync>,
    },
}

impl ResolutionError {
    pub fn not_found<S: Into<String>>(name: S) -> Self {
        Self::NotFound { name: name.into() }
    }

    pub fn upstream<S, E>(name: S, why: E) -> Self
    where
        S: Into<String>,
        E: Error + Send + Sync + 'static,
    {
        Self::Upstream {
            name: name.into(),
            reason: Arc::new(why),
        }
    }

    /// The name that failed to resolve.
    pub fn name(&self) -> &str {
        match self {
            Self::NotFound { name } => name,
            Self::Upstream { name, .. } => name,
        }
    }
}

impl Error for ResolutionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::NotFound { .. } => None,
            Self::Upstream { reason, .. } => Some(reason.as_ref()),
        }
    }
}

impl fmt::Display for ResolutionError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::NotFound { name } => {
                write!(f, "Could not find the position of \"{}\".", name)
            }
            Self::Upstream { name, reason } => {
                write!(f, "Could not resolve \"{}\": {}", name, reason)
            }
        }
    }
}

pub type ResolutionResult<O> = Result<O, ResolutionError>;

/// The external capability that maps a free text place name to a coordinate.
#[async_trait]
pub trait Resolver: Send + Sync {
    async fn resolve(&self, name: &str) -> ResolutionResult<Coordinate>;
}
