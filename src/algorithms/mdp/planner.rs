//! Bellman value iteration over the city graph.

use tracing::{debug, info, warn};

use super::config::PlannerConfig;
use super::error::{ConfigError, PlanError};
use super::reward::RewardComputer;
use super::tables::{QTable, ValueTable};
use super::types::{ActionKind, QKey};
use crate::distribution::TaskDistribution;
use crate::topology::{CityId, Topology};
use crate::vehicle::VehicleProfile;


/// Slack allowed on the total outgoing task probability of a city.
const PROBABILITY_MASS_TOLERANCE: f64 = 1e-9;

/// Converged output of the planner.
///
/// Immutable once returned; policies borrow it.
#[derive(Debug, Clone, PartialEq)]
pub struct Plan {
    q_table: QTable,
    values: ValueTable,
    iterations: usize,
    deltas: Vec<f64>,
}

impl Plan {
    pub fn q_table(&self) -> &QTable {
        &self.q_table
    }

    pub fn values(&self) -> &ValueTable {
        &self.values
    }

    /// Number of Bellman sweeps performed.
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Largest per-city value change of each sweep, first sweep first.
    pub fn deltas(&self) -> &[f64] {
        &self.deltas
    }

    pub fn final_delta(&self) -> f64 {
        self.deltas.last().copied().unwrap_or(0.0)
    }

    pub fn into_tables(self) -> (QTable, ValueTable) {
        (self.q_table, self.values)
    }
}

/// Value-iteration planner bound to one topology, task oracle and vehicle.
///
/// # Example
///
/// ```
/// use reactive_planner::algorithms::mdp::{Planner, PlannerConfig};
/// use reactive_planner::distribution::{TaskProfile, TaskTable};
/// use reactive_planner::topology::Topology;
/// use reactive_planner::vehicle::VehicleProfile;
///
/// let mut builder = Topology::builder();
/// let a = builder.add_city("A").unwrap();
/// let b = builder.add_city("B").unwrap();
/// builder.add_route(a, b, 1.0).unwrap();
/// let topology = builder.build().unwrap();
///
/// let tasks = TaskTable::for_topology(&topology).with(a, b, TaskProfile::new(1.0, 10.0, 1.0));
/// let vehicle = VehicleProfile::new(5.0, 1.0);
///
/// let plan = Planner::new(&topology, &tasks, vehicle, PlannerConfig::new(0.9, 1e-6))
///     .plan()
///     .unwrap();
/// assert_eq!(plan.values().len(), 2);
/// ```
pub struct Planner<'a, D: TaskDistribution + ?Sized> {
    topology: &'a Topology,
    distribution: &'a D,
    vehicle: VehicleProfile,
    config: PlannerConfig,
}

impl<'a, D: TaskDistribution + ?Sized> Planner<'a, D> {
    pub fn new(
        topology: &'a Topology,
        distribution: &'a D,
        vehicle: VehicleProfile,
        config: PlannerConfig,
    ) -> Self {
        Self {
            topology,
            distribution,
            vehicle,
            config,
        }
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    pub fn vehicle(&self) -> &VehicleProfile {
        &self.vehicle
    }

    /// Checks every input the iteration depends on.
    ///
    /// # Errors
    ///
    /// The first [`ConfigError`] found, in the order: planner config,
    /// vehicle, topology size, then oracle values per ordered city pair.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.config.validate()?;
        self.vehicle.validate()?;
        if self.topology.len() < 2 {
            return Err(ConfigError::TooFewCities(self.topology.len()));
        }

        for origin in self.topology.city_ids() {
            let mut total = 0.0;
            for destination in self.destinations(origin) {
                let probability = self.distribution.probability(origin, destination);
                if !(0.0..=1.0).contains(&probability) {
                    return Err(ConfigError::InvalidProbability {
                        origin,
                        destination,
                        value: probability,
                    });
                }
                let reward = self.distribution.reward(origin, destination);
                if !reward.is_finite() || reward < 0.0 {
                    return Err(ConfigError::InvalidReward {
                        origin,
                        destination,
                        value: reward,
                    });
                }
                let weight = self.distribution.weight(origin, destination);
                if !weight.is_finite() || weight < 0.0 {
                    return Err(ConfigError::InvalidWeight {
                        origin,
                        destination,
                        value: weight,
                    });
                }
                total += probability;
            }
            if total > 1.0 + PROBABILITY_MASS_TOLERANCE {
                return Err(ConfigError::ProbabilityMassExceeded { origin, total });
            }
        }
        Ok(())
    }

    /// Runs value iteration to convergence.
    ///
    /// # Errors
    ///
    /// - `Config` if [`validate`](Self::validate) fails; nothing is iterated
    /// - `NotConverged` if `max_iterations` sweeps leave a delta ≥ `epsilon`
    pub fn plan(&self) -> Result<Plan, PlanError> {
        self.validate()?;

        let n = self.topology.len();
        let mut values = ValueTable::zeros(n);
        let mut deltas = Vec::new();

        for iteration in 1..=self.config.max_iterations {
            let previous = values.clone();
            let q_table = self.sweep(&previous, &mut values);

            let delta = values.max_abs_diff(&previous);
            deltas.push(delta);
            debug!(iteration, delta, "value iteration sweep");

            if delta < self.config.epsilon {
                info!(
                    iterations = iteration,
                    delta,
                    cities = n,
                    entries = q_table.len(),
                    "value iteration converged"
                );
                return Ok(Plan {
                    q_table,
                    values,
                    iterations: iteration,
                    deltas,
                });
            }
        }

        let delta = deltas.last().copied().unwrap_or(f64::INFINITY);
        warn!(
            iterations = self.config.max_iterations,
            delta, "value iteration hit the iteration cap"
        );
        Err(PlanError::NotConverged {
            iterations: self.config.max_iterations,
            delta,
        })
    }

    /// One Bellman backup of every decision state against `previous`.
    ///
    /// Writes the new per-city maxima into `values` and returns the fresh
    /// Q-table.
    fn sweep(&self, previous: &ValueTable, values: &mut ValueTable) -> QTable {
        let gamma = self.config.discount_factor;
        let tails: Vec<f64> = self
            .topology
            .city_ids()
            .map(|d| gamma * self.expected_future(d, previous))
            .collect();

        let mut q_table = QTable::new();
        for from in self.topology.city_ids() {
            let mut best = f64::NEG_INFINITY;
            for to in self.destinations(from) {
                let distance = self.distance(from, to);
                let tail = tails[to.index()];

                let move_value = RewardComputer::move_reward(&self.vehicle, distance) + tail;
                q_table.insert(QKey::new(from, to, ActionKind::Move), move_value);
                best = best.max(move_value);

                if self.vehicle.can_carry(self.distribution.weight(from, to)) {
                    let reward = self.distribution.reward(from, to);
                    let pickup_value =
                        RewardComputer::pickup_reward(&self.vehicle, distance, reward) + tail;
                    q_table.insert(QKey::new(from, to, ActionKind::Pickup), pickup_value);
                    best = best.max(pickup_value);
                }
            }
            values.set(from, best);
        }
        q_table
    }

    /// `Σ_n P(city → n) · V(n)`: value of arriving empty at `city` and
    /// facing its next task draw.
    fn expected_future(&self, city: CityId, values: &ValueTable) -> f64 {
        self.destinations(city)
            .map(|next| {
                self.distribution.probability(city, next) * values.get(next).unwrap_or(0.0)
            })
            .sum()
    }

    fn destinations(&self, from: CityId) -> impl Iterator<Item = CityId> + 'a {
        self.topology.city_ids().filter(move |&to| to != from)
    }

    fn distance(&self, from: CityId, to: CityId) -> f64 {
        // Both ids come from the topology itself.
        self.topology.distance(from, to).unwrap_or(f64::INFINITY)
    }
}

/// Plans with the default iteration cap.
///
/// Shorthand for [`Planner::new`] followed by [`Planner::plan`].
pub fn plan<D: TaskDistribution + ?Sized>(
    topology: &Topology,
    distribution: &D,
    vehicle: VehicleProfile,
    discount_factor: f64,
    epsilon: f64,
) -> Result<Plan, PlanError> {
    Planner::new(
        topology,
        distribution,
        vehicle,
        PlannerConfig::new(discount_factor, epsilon),
    )
    .plan()
}
