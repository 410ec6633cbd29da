use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use utility::geo;

use crate::ExampleData;

/// A position on the earth in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Great-circle distance in nautical miles.
    pub fn distance_to(&self, other: &Coordinate) -> f64 {
        geo::haversine_distance(
            self.latitude,
            self.longitude,
            other.latitude,
            other.longitude,
        )
    }
}

impl ExampleData for Coordinate {
    fn example_data() -> Self {
        Self::new(40.6413, -73.7781)
    }
}

/// The smallest latitude/longitude box containing a set of coordinates.
/// Used by map views to fit all markers on screen.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Bounds {
    pub south_west: Coordinate,
    pub north_east: Coordinate,
}

impl Bounds {
    pub fn from_coordinate(coordinate: Coordinate) -> Self {
        Self {
            south_west: coordinate,
            north_east: coordinate,
        }
    }

    pub fn extend(&mut self, coordinate: Coordinate) {
        self.south_west.latitude = self.south_west.latitude.min(coordinate.latitude);
        self.south_west.longitude =
            self.south_west.longitude.min(coordinate.longitude);
        self.north_east.latitude = self.north_east.latitude.max(coordinate.latitude);
        self.north_east.longitude =
            self.north_east.longitude.max(coordinate.longitude);
    }

    pub fn from_coordinates<I>(coordinates: I) -> Option<Self>
    where
        I: IntoIterator<Item = Coordinate>,
    {
        let mut coordinates = coordinates.into_iter();
        let mut bounds = Self::from_coordinate(coordinates.next()?);
        for coordinate in coordinates {
            bounds.extend(coordinate);
        }
        Some(bounds)
    }

    pub fn contains(&self, coordinate: &Coordinate) -> bool {
        (self.south_west.latitude..=self.north_east.latitude)
            .contains(&coordinate.latitude)
            && (self.south_west.longitude..=self.north_east.longitude)
                .contains(&coordinate.longitude)
    }
}
