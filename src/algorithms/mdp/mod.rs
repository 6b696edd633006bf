//! MDP planning for a single reactive delivery vehicle.
//!
//! The vehicle sits in a city, sees at most one task on offer, and either
//! delivers it or drives empty elsewhere. Planning happens once, offline:
//!
//! 1. **Planner**: Bellman value iteration over decision states
//!    `(city, destination)` with the per-city values as the fixed point:
//!    - `Q(c, d, Move)   = -cost(c, d) + γ Σ_n P(d → n) V(n)`
//!    - `Q(c, d, Pickup) = reward(c, d) - cost(c, d) + γ Σ_n P(d → n) V(n)`,
//!      only when the expected load fits the vehicle
//!    - `V(c) = max` over every entry leaving `c`
//!
//!    Sweeps stop once the largest per-city change drops below ε; running
//!    out of sweeps first is an error, never a partial plan.
//!
//! 2. **Policy**: a [`PolicyEvaluator`] reads the frozen [`Plan`] at every
//!    tick. It holds only shared references, so one plan can serve any
//!    number of concurrent decisions.
//!
//! 3. **Agent and simulation**: [`ReactiveAgent`] books the profit of each
//!    decision; [`Simulation`] replays a seeded stream of tasks against it.
//!
//! # Module Structure
//!
//! - [`config`] - Planner stopping controls
//! - [`types`] - Actions and Q-table keys
//! - [`tables`] - Q-table and V-table
//! - [`reward`] - One-step rewards
//! - [`planner`] - Value iteration
//! - [`policy`] - Planned and random policies
//! - [`agent`] - Profit bookkeeping
//! - [`simulation`] - Seeded single-vehicle runs

pub mod agent;
pub mod config;
pub mod error;
pub mod planner;
pub mod policy;
pub mod reward;
pub mod simulation;
pub mod tables;
pub mod types;

pub use agent::{ProfitStats, ReactiveAgent};
pub use config::PlannerConfig;
pub use error::{ConfigError, PlanError, PolicyError};
pub use planner::{plan, Plan, Planner};
pub use policy::{Policy, PolicyEvaluator, RandomPolicy};
pub use reward::RewardComputer;
pub use simulation::{Simulation, SimulationReport};
pub use tables::{QTable, ValueTable};
pub use types::{Action, ActionKind, QKey};
