use std::env;
use std::time::Duration;

use serde::Deserialize;
use serde::Serialize;

use tokio::sync::RwLock;
use tokio::time::Instant;

use crate::{model::GeocodeResponse, ApiError};

pub const GEOCODING_API_URL: &str =
    "https://maps.googleapis.com/maps/api/geocode/json";

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeocodingCredentials {
    pub api_key: String,
    pub rate_limit_per_minute: Option<u64>,
    /// Region bias as ccTLD, e.g. `us`.
    pub region: Option<String>,
    pub proxy: Option<String>,
    /// Overrides [`GEOCODING_API_URL`].
    pub endpoint: Option<String>,
}

impl GeocodingCredentials {
    pub fn new<S: Into<String>>(api_key: S) -> Self {
        Self {
            api_key: api_key.into(),
            rate_limit_per_minute: None,
            region: None,
            proxy: None,
            endpoint: None,
        }
    }

    /// Reads `GOOGLE_MAPS_API_KEY` and the optional
    /// `GEOCODING_RATE_LIMIT_PER_MINUTE`, `GEOCODING_REGION` and
    /// `GEOCODING_PROXY`.
    pub fn env() -> Result<Self, ApiError> {
        let api_key = env::var("GOOGLE_MAPS_API_KEY").map_err(|_| {
            ApiError::Configuration("Expected GOOGLE_MAPS_API_KEY.".to_owned())
        })?;
        let rate_limit_per_minute = env::var("GEOCODING_RATE_LIMIT_PER_MINUTE")
            .ok()
            .map(|limit| limit.parse::<u64>())
            .transpose()
            .map_err(|why| {
                ApiError::Configuration(format!(
                    "GEOCODING_RATE_LIMIT_PER_MINUTE is not a number: {why}"
                ))
            })?;

        Ok(Self {
            api_key,
            rate_limit_per_minute,
            region: env::var("GEOCODING_REGION").ok(),
            proxy: env::var("GEOCODING_PROXY").ok(),
            endpoint: None,
        })
    }
}

struct GeocodingClientState {
    pub available_requests: u64,
    pub last_refill: Instant,
}

pub struct GeocodingClient {
    pub credentials: GeocodingCredentials,
    http: reqwest::Client,
    state: RwLock<GeocodingClientState>,
}

impl GeocodingClient {
    pub fn new(credentials: &GeocodingCredentials) -> Result<Self, ApiError> {
        /* build the http client with optional proxy */
        let http = match &credentials.proxy {
            Some(proxy_url) => reqwest::Client::builder()
                .proxy(reqwest::Proxy::all(proxy_url)?)
                .build()?,
            None => reqwest::Client::new(),
        };

        Ok(Self {
            credentials: credentials.clone(),
            http,
            state: RwLock::new(GeocodingClientState {
                available_requests: credentials.rate_limit_per_minute.unwrap_or(0),
                last_refill: Instant::now(),
            }),
        })
    }

    pub async fn available_requests(&self) -> u64 {
        self.state.read().await.available_requests
    }

    pub(crate) async fn try_decrement_available_requests(&self) -> Result<(), ApiError> {
        if let Some(rate_limit_per_minute) = self.credentials.rate_limit_per_minute {
            let mut state = self.state.write().await;

            if state.last_refill.elapsed() >= Duration::from_secs(60) {
                state.available_requests = rate_limit_per_minute;
                state.last_refill = Instant::now();
            }

            if state.available_requests != 0 {
                state.available_requests -= 1;
            } else {
                return Err(ApiError::RateLimitReached);
            }
        }
        Ok(())
    }

    fn endpoint(&self) -> &str {
        self.credentials
            .endpoint
            .as_deref()
            .unwrap_or(GEOCODING_API_URL)
    }

    /// Looks up an address. The raw api status is returned as is, see
    /// [`crate::resolver`] for its interpretation.
    pub async fn geocode(&self, address: &str) -> Result<GeocodeResponse, ApiError> {
        self.try_decrement_available_requests().await?;

        let url = self.endpoint();
        log::debug!("Requesting geocode for '{address}'.");

        let mut query = vec![
            ("address", address),
            ("key", self.credentials.api_key.as_str()),
        ];
        if let Some(region) = &self.credentials.region {
            query.push(("region", region.as_str()));
        }

        /* perform get-request */
        let response = self.http.get(url).query(&query).send().await?;

        /* parse response */
        match response.status() {
            reqwest::StatusCode::OK => {
                Ok(serde_json::from_str(&response.text().await?)?)
            }
            other => match response.text().await {
                Ok(val) => Err(ApiError::InvalidResponse {
                    status_code: other,
                    url: url.to_owned(),
                    response: Some(val),
                }),
                Err(_) => Err(ApiError::InvalidResponse {
                    status_code: other,
                    url: url.to_owned(),
                    response: None,
                }),
            },
        }
    }
}
