use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use utility::id::{HasId, Id};

use crate::ExampleData;

/// One user-specified stop of a journey.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Waypoint {
    pub id: Id<Waypoint>,
    /// Free text name of the airport. Empty while not yet specified.
    #[serde(default)]
    pub name: String,
}

impl Waypoint {
    pub fn new<I, S>(id: I, name: S) -> Self
    where
        I: Into<Id<Waypoint>>,
        S: Into<String>,
    {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }

    pub fn is_specified(&self) -> bool {
        !self.name.is_empty()
    }
}

impl HasId for Waypoint {
    type IdType = String;
}

impl ExampleData for Waypoint {
    fn example_data() -> Self {
        Self::new("0", "John F Kennedy International Airport")
    }
}
