//! The single vehicle the planner is bound to.

use crate::algorithms::mdp::ConfigError;

/// Capacity and running cost of the vehicle.
///
/// Bound once to a planner and constant for its lifetime.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VehicleProfile {
    /// Maximum task weight the vehicle can carry.
    pub capacity: f64,
    /// Cost per unit of route length.
    pub cost_per_distance: f64,
}

impl VehicleProfile {
    pub fn new(capacity: f64, cost_per_distance: f64) -> Self {
        Self {
            capacity,
            cost_per_distance,
        }
    }

    /// Cost of driving `distance`.
    pub fn cost(&self, distance: f64) -> f64 {
        distance * self.cost_per_distance
    }

    pub fn can_carry(&self, weight: f64) -> bool {
        weight <= self.capacity
    }

    /// Both fields must be finite and non-negative.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.capacity.is_finite() || self.capacity < 0.0 {
            return Err(ConfigError::InvalidCapacity(self.capacity));
        }
        if !self.cost_per_distance.is_finite() || self.cost_per_distance < 0.0 {
            return Err(ConfigError::InvalidCostPerDistance(self.cost_per_distance));
        }
        Ok(())
    }
}
