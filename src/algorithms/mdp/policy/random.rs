//! Random policy for baselines.

use rand::seq::SliceRandom;
use rand::{Rng, RngCore};

use super::trait_::Policy;
use crate::algorithms::mdp::error::{ConfigError, PolicyError};
use crate::algorithms::mdp::types::Action;
use crate::task::Task;
use crate::topology::{CityId, Topology};

/// Takes a feasible task with a fixed probability, otherwise relocates to a
/// uniformly random neighbor.
///
/// Ignores any plan; used as a lower-bound baseline for the planned policy.
#[derive(Debug, Clone)]
pub struct RandomPolicy<'a> {
    topology: &'a Topology,
    capacity: f64,
    pickup_probability: f64,
}

impl<'a> RandomPolicy<'a> {
    /// # Errors
    ///
    /// `InvalidPickupProbability` unless `pickup_probability` is in `[0, 1]`.
    pub fn new(
        topology: &'a Topology,
        capacity: f64,
        pickup_probability: f64,
    ) -> Result<Self, ConfigError> {
        if !(0.0..=1.0).contains(&pickup_probability) {
            return Err(ConfigError::InvalidPickupProbability(pickup_probability));
        }
        Ok(Self {
            topology,
            capacity,
            pickup_probability,
        })
    }

    pub fn pickup_probability(&self) -> f64 {
        self.pickup_probability
    }
}

impl Policy for RandomPolicy<'_> {
    fn choose_action(
        &self,
        current: CityId,
        task: Option<&Task>,
        rng: &mut dyn RngCore,
    ) -> Result<Action, PolicyError> {
        if let Some(task) = task {
            if task.origin != current {
                return Err(PolicyError::TaskOriginMismatch {
                    origin: task.origin,
                    current,
                });
            }
            if task.fits(self.capacity) && rng.gen::<f64>() < self.pickup_probability {
                return Ok(Action::Pickup(task.clone()));
            }
        }

        let neighbors = self
            .topology
            .neighbors(current)
            .ok_or(PolicyError::UnknownCity(current))?;
        neighbors
            .choose(rng)
            .map(|&n| Action::Move(n))
            .ok_or(PolicyError::NoNeighbors(current))
    }

    fn name(&self) -> &str {
        "random"
    }
}
