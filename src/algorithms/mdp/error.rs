use thiserror::Error;

use super::types::ActionKind;
use crate::topology::CityId;

/// Invalid planner inputs, detected before any iteration runs.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Discount factor must lie strictly between 0 and 1, got {0}")]
    InvalidDiscountFactor(f64),

    #[error("Convergence tolerance must be positive and finite, got {0}")]
    InvalidEpsilon(f64),

    #[error("Iteration cap must be at least 1")]
    ZeroIterationCap,

    #[error("Vehicle capacity must be finite and non-negative, got {0}")]
    InvalidCapacity(f64),

    #[error("Cost per distance must be finite and non-negative, got {0}")]
    InvalidCostPerDistance(f64),

    #[error("Topology needs at least 2 cities, got {0}")]
    TooFewCities(usize),

    #[error("Probability of {origin} -> {destination} must lie in [0, 1], got {value}")]
    InvalidProbability {
        origin: CityId,
        destination: CityId,
        value: f64,
    },

    #[error("Reward of {origin} -> {destination} must be finite and non-negative, got {value}")]
    InvalidReward {
        origin: CityId,
        destination: CityId,
        value: f64,
    },

    #[error("Weight of {origin} -> {destination} must be finite and non-negative, got {value}")]
    InvalidWeight {
        origin: CityId,
        destination: CityId,
        value: f64,
    },

    #[error("Task probabilities leaving {origin} sum to {total}, more than 1")]
    ProbabilityMassExceeded { origin: CityId, total: f64 },

    #[error("Pickup probability must lie in [0, 1], got {0}")]
    InvalidPickupProbability(f64),

    #[error("Cannot parse property {key}={value}")]
    InvalidProperty { key: String, value: String },
}

/// Failures of [`Planner::plan`](super::Planner::plan).
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PlanError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Value iteration did not converge after {iterations} iterations (last delta {delta})")]
    NotConverged { iterations: usize, delta: f64 },
}

/// Failures while choosing an action from a plan.
///
/// These indicate the policy was queried with cities or tasks that do not
/// belong to the planned topology.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PolicyError {
    #[error("Unknown city: {0}")]
    UnknownCity(CityId),

    #[error("No {kind} entry for decision state ({from}, {to})")]
    MissingEntry {
        from: CityId,
        to: CityId,
        kind: ActionKind,
    },

    #[error("Task starts at {origin} but the vehicle is at {current}")]
    TaskOriginMismatch { origin: CityId, current: CityId },

    #[error("City {0} has no neighbors to move to")]
    NoNeighbors(CityId),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_converts_into_plan_error() {
        let e: PlanError = ConfigError::ZeroIterationCap.into();
        assert_eq!(e, PlanError::Config(ConfigError::ZeroIterationCap));
        assert_eq!(e.to_string(), "Iteration cap must be at least 1");
    }

    #[test]
    fn missing_entry_display() {
        let e = PolicyError::MissingEntry {
            from: CityId::new(0),
            to: CityId::new(4),
            kind: ActionKind::Move,
        };
        assert_eq!(e.to_string(), "No move entry for decision state (#0, #4)");
    }

    #[test]
    fn not_converged_display() {
        let e = PlanError::NotConverged {
            iterations: 10,
            delta: 0.5,
        };
        assert!(e.to_string().contains("after 10 iterations"));
    }
}
