//! reactive-planner - offline MDP planning for a reactive delivery vehicle
//!
//! Computes, by value iteration over a city graph with stochastic task
//! arrivals, whether a vehicle should deliver the task on offer or relocate
//! empty, and replays the resulting policy in a seeded simulation.

pub mod algorithms;
pub mod distribution;
pub mod task;
pub mod topology;
pub mod vehicle;

pub use task::Task;
pub use topology::{CityId, Topology};
pub use vehicle::VehicleProfile;

/// Identifier type used for tasks.
pub type Id = String;

/// Generates a new unique identifier (UUID v4).
pub fn generate_id() -> Id {
    uuid::Uuid::new_v4().to_string()
}
