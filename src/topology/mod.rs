//! City graph the vehicle drives on.

mod city;
mod error;
mod graph;

pub use city::{City, CityId};
pub use error::TopologyError;
pub use graph::{Topology, TopologyBuilder};
