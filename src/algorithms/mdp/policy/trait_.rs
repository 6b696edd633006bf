//! Policy trait for the reactive agent.

use rand::RngCore;

use crate::algorithms::mdp::error::PolicyError;
use crate::algorithms::mdp::types::Action;
use crate::task::Task;
use crate::topology::CityId;

/// Chooses what the vehicle does at one decision tick.
///
/// Implementations are read-only once built, so a single policy can serve
/// concurrent decisions. Any randomness comes from the caller's `rng`.
pub trait Policy: Send + Sync {
    /// Selects an action for a vehicle at `current`.
    ///
    /// # Arguments
    ///
    /// * `current` - City the vehicle is in
    /// * `task` - Task available at `current` this tick, if any
    /// * `rng` - Random source for tie-breaking or exploration
    fn choose_action(
        &self,
        current: CityId,
        task: Option<&Task>,
        rng: &mut dyn RngCore,
    ) -> Result<Action, PolicyError>;

    /// Returns a human-readable name for this policy.
    fn name(&self) -> &str;
}
