use async_trait::async_trait;
use journey::{ResolutionError, ResolutionResult, Resolver};
use model::coordinate::Coordinate;

use crate::{
    client::GeocodingClient,
    model::{GeocodeResponse, GeocodeStatus},
    ApiError,
};

#[async_trait]
impl Resolver for GeocodingClient {
    async fn resolve(&self, name: &str) -> ResolutionResult<Coordinate> {
        let response = self
            .geocode(name)
            .await
            .map_err(|why| ResolutionError::upstream(name, why))?;
        let coordinate = coordinate_from_response(name, response)?;
        log::info!(
            "geocoded '{}' to ({}, {})",
            name,
            coordinate.latitude,
            coordinate.longitude
        );
        Ok(coordinate)
    }
}

/// Takes the position of the best match. An empty answer means the name is
/// unknown, any other non-`OK` status is a failure of the api itself.
pub fn coordinate_from_response(
    name: &str,
    response: GeocodeResponse,
) -> ResolutionResult<Coordinate> {
    match response.status {
        GeocodeStatus::Ok | GeocodeStatus::ZeroResults => response
            .results
            .first()
            .map(|result| Coordinate::from(result.geometry.location))
            .ok_or_else(|| ResolutionError::not_found(name)),
        status => Err(ResolutionError::upstream(
            name,
            ApiError::Status {
                status,
                message: response.error_message,
            },
        )),
    }
}
