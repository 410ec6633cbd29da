use std::error;
use std::fmt;
use std::sync::Arc;

use crate::model::GeocodeStatus;

pub mod client;
pub mod model;
pub mod resolver;

#[derive(Debug, Clone)]
pub enum ApiError {
    RequestError(Arc<reqwest::Error>),
    JsonError(Arc<serde_json::Error>),
    InvalidResponse {
        status_code: reqwest::StatusCode,
        url: String,
        response: Option<String>,
    },
    /// The api answered, but refused to geocode.
    Status {
        status: GeocodeStatus,
        message: Option<String>,
    },
    RateLimitReached,
    Configuration(String),
}

impl error::Error for ApiError {}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ApiError::RequestError(e) => write!(f, "HTTP request error: {}", e),
            ApiError::JsonError(e) => write!(f, "JSON parse error: {}", e),
            ApiError::InvalidResponse {
                status_code,
                url,
                response,
            } => match response {
                Some(text) => {
                    write!(f, "Invalid Response ({}) {}: {}", status_code, text, url)
                }
                None => write!(f, "Invalid Response({}) {}", status_code, url),
            },
            ApiError::Status { status, message } => match message {
                Some(message) => write!(f, "Geocoding failed ({}): {}", status, message),
                None => write!(f, "Geocoding failed ({})", status),
            },
            ApiError::RateLimitReached => write!(f, "Rate limit reached."),
            ApiError::Configuration(e) => write!(f, "Invalid configuration: {e}"),
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        ApiError::RequestError(Arc::new(e))
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::JsonError(Arc::new(e))
    }
}
