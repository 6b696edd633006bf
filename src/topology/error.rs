use thiserror::Error;

use super::city::CityId;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum TopologyError {
    #[error("City name already exists: {0}")]
    DuplicateCity(String),

    #[error("Unknown city: {0}")]
    UnknownCity(CityId),

    #[error("Route from {0} to itself is not allowed")]
    SelfLoop(CityId),

    #[error("Invalid route length {length} between {from} and {to}")]
    InvalidLength { from: CityId, to: CityId, length: f64 },

    #[error("Topology is disconnected: {components} components")]
    Disconnected { components: usize },

    #[error("Cannot build topology: no cities")]
    Empty,
}
