//! Immediate payoff of a move or a pickup.

use super::types::{Action, ActionKind};
use crate::topology::{CityId, Topology};
use crate::vehicle::VehicleProfile;

/// Computes one-step rewards for the planner and the agent.
pub struct RewardComputer;

impl RewardComputer {
    /// Driving empty over `distance`: `-distance × cost_per_distance`.
    pub fn move_reward(vehicle: &VehicleProfile, distance: f64) -> f64 {
        -vehicle.cost(distance)
    }

    /// Delivering a task paying `task_reward` over `distance`.
    pub fn pickup_reward(vehicle: &VehicleProfile, distance: f64, task_reward: f64) -> f64 {
        task_reward - vehicle.cost(distance)
    }

    /// Reward of an action kind; `task_reward` is ignored for moves.
    pub fn immediate(
        kind: ActionKind,
        vehicle: &VehicleProfile,
        distance: f64,
        task_reward: f64,
    ) -> f64 {
        match kind {
            ActionKind::Move => Self::move_reward(vehicle, distance),
            ActionKind::Pickup => Self::pickup_reward(vehicle, distance, task_reward),
        }
    }

    /// Realised reward of `action` taken at `from`.
    ///
    /// Returns `None` if either end of the trip is unknown to `topology`.
    pub fn for_action(
        action: &Action,
        from: CityId,
        topology: &Topology,
        vehicle: &VehicleProfile,
    ) -> Option<f64> {
        let distance = topology.distance(from, action.destination())?;
        Some(match action {
            Action::Move(_) => Self::move_reward(vehicle, distance),
            Action::Pickup(task) => Self::pickup_reward(vehicle, distance, task.reward),
        })
    }
}
