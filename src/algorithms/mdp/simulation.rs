//! Single-vehicle simulation driving a [`ReactiveAgent`].
//!
//! Each tick: draw the task on offer at the vehicle's city → ask the agent →
//! drive to the action's destination.

use std::fmt;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;

use super::agent::ReactiveAgent;
use super::error::PolicyError;
use super::policy::Policy;
use crate::distribution::TaskDistribution;
use crate::task::Task;
use crate::topology::{CityId, Topology, TopologyError};

/// Aggregate outcome of [`Simulation::run`].
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationReport {
    pub policy: String,
    pub ticks: usize,
    pub tasks_offered: usize,
    pub tasks_picked_up: usize,
    pub total_profit: f64,
    pub total_distance: f64,
}

impl SimulationReport {
    pub fn average_profit(&self) -> f64 {
        if self.ticks == 0 {
            0.0
        } else {
            self.total_profit / self.ticks as f64
        }
    }

    /// Share of offered tasks that were accepted, in percent.
    pub fn pct_picked_up(&self) -> f64 {
        if self.tasks_offered == 0 {
            0.0
        } else {
            self.tasks_picked_up as f64 / self.tasks_offered as f64 * 100.0
        }
    }
}

impl fmt::Display for SimulationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Simulation ({}, {} ticks) ===", self.policy, self.ticks)?;
        writeln!(f, "  Tasks offered:     {}", self.tasks_offered)?;
        writeln!(
            f,
            "  Tasks picked up:   {} ({:.1}%)",
            self.tasks_picked_up,
            self.pct_picked_up()
        )?;
        writeln!(f, "  Total profit:      {:.2}", self.total_profit)?;
        writeln!(f, "  Average profit:    {:.2}", self.average_profit())?;
        writeln!(f, "  Distance driven:   {:.2}", self.total_distance)
    }
}

/// Drives one vehicle over a topology, drawing tasks from `distribution`.
///
/// Fully reproducible for a given seed.
pub struct Simulation<'a, D: TaskDistribution + ?Sized> {
    topology: &'a Topology,
    distribution: &'a D,
    current: CityId,
    rng: StdRng,
}

impl<'a, D: TaskDistribution + ?Sized> Simulation<'a, D> {
    /// # Errors
    ///
    /// `UnknownCity` if `start` is not part of `topology`.
    pub fn new(
        topology: &'a Topology,
        distribution: &'a D,
        start: CityId,
        seed: u64,
    ) -> Result<Self, TopologyError> {
        if !topology.contains(start) {
            return Err(TopologyError::UnknownCity(start));
        }
        Ok(Self {
            topology,
            distribution,
            current: start,
            rng: StdRng::seed_from_u64(seed),
        })
    }

    pub fn current_city(&self) -> CityId {
        self.current
    }

    /// Draws the task available at the current city, if any.
    ///
    /// Destinations are tried in id order; the first one whose cumulative
    /// probability exceeds a uniform draw wins. The leftover mass means no
    /// task.
    pub fn sample_task(&mut self) -> Option<Task> {
        let origin = self.current;
        let u: f64 = self.rng.gen();
        let mut cumulative = 0.0;
        for destination in self.topology.city_ids().filter(|&d| d != origin) {
            cumulative += self.distribution.probability(origin, destination);
            if u < cumulative {
                return Some(Task::new(
                    origin,
                    destination,
                    self.distribution.reward(origin, destination),
                    self.distribution.weight(origin, destination),
                ));
            }
        }
        None
    }

    /// Runs `ticks` decisions and reports what happened during them.
    ///
    /// The agent's own [`ProfitStats`](super::agent::ProfitStats) keep
    /// accumulating across runs; the report covers this run only.
    pub fn run<P: Policy>(
        &mut self,
        agent: &mut ReactiveAgent<'_, P>,
        ticks: usize,
    ) -> Result<SimulationReport, PolicyError> {
        let start = agent.stats().clone();
        let mut tasks_offered = 0;

        for _ in 0..ticks {
            let task = self.sample_task();
            if task.is_some() {
                tasks_offered += 1;
            }
            let action = agent.act(self.current, task.as_ref(), &mut self.rng)?;
            self.current = action.destination();
        }

        let stats = agent.stats();
        let report = SimulationReport {
            policy: agent.policy().name().to_string(),
            ticks,
            tasks_offered,
            tasks_picked_up: (stats.pickups - start.pickups) as usize,
            total_profit: stats.total_profit - start.total_profit,
            total_distance: stats.total_distance - start.total_distance,
        };
        info!(
            policy = %report.policy,
            ticks,
            total_profit = report.total_profit,
            average_profit = report.average_profit(),
            "simulation finished"
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::mdp::planner::Planner;
    use crate::algorithms::mdp::policy::{PolicyEvaluator, RandomPolicy};
    use crate::algorithms::mdp::PlannerConfig;
    use crate::distribution::{TaskProfile, TaskTable};
    use crate::vehicle::VehicleProfile;

    fn two_cities() -> (Topology, CityId, CityId, TaskTable) {
        let mut b = Topology::builder();
        let a = b.add_city("A").unwrap();
        let c = b.add_city("B").unwrap();
        b.add_route(a, c, 1.0).unwrap();
        let topo = b.build().unwrap();
        let tasks = TaskTable::for_topology(&topo).with(a, c, TaskProfile::new(1.0, 10.0, 1.0));
        (topo, a, c, tasks)
    }

    #[test]
    fn unknown_start_rejected() {
        let (topo, _, _, tasks) = two_cities();
        assert!(matches!(
            Simulation::new(&topo, &tasks, CityId::new(3), 0),
            Err(TopologyError::UnknownCity(_))
        ));
    }

    #[test]
    fn sample_respects_probabilities() {
        let (topo, a, c, tasks) = two_cities();
        let mut sim = Simulation::new(&topo, &tasks, a, 0).unwrap();
        for _ in 0..10 {
            let task = sim.sample_task().unwrap();
            assert_eq!((task.origin, task.destination), (a, c));
            assert_eq!(task.reward, 10.0);
        }

        let mut sim = Simulation::new(&topo, &tasks, c, 0).unwrap();
        for _ in 0..10 {
            assert!(sim.sample_task().is_none());
        }
    }

    #[test]
    fn planned_agent_shuttles_between_two_cities() {
        let (topo, a, _, tasks) = two_cities();
        let vehicle = VehicleProfile::new(5.0, 1.0);
        let plan = Planner::new(&topo, &tasks, vehicle, PlannerConfig::new(0.9, 1e-9))
            .plan()
            .unwrap();
        let policy = PolicyEvaluator::new(&plan, &topo, vehicle);
        let mut agent = ReactiveAgent::new(&topo, vehicle, policy);

        let mut sim = Simulation::new(&topo, &tasks, a, 42).unwrap();
        let report = sim.run(&mut agent, 10).unwrap();

        // Pickup A->B (+9), then an empty move back (-1), five times.
        assert_eq!(report.tasks_offered, 5);
        assert_eq!(report.tasks_picked_up, 5);
        assert!((report.total_profit - 40.0).abs() < 1e-9);
        assert!((report.average_profit() - 4.0).abs() < 1e-9);
        assert_eq!(sim.current_city(), a);
        assert!(report.to_string().contains("value_iteration"));
    }

    #[test]
    fn same_seed_same_report() {
        let mut b = Topology::builder();
        let ids: Vec<CityId> = ["A", "B", "C", "D"]
            .iter()
            .map(|n| b.add_city(*n).unwrap())
            .collect();
        for w in ids.windows(2) {
            b.add_route(w[0], w[1], 2.0).unwrap();
        }
        b.add_route(ids[3], ids[0], 3.0).unwrap();
        let topo = b.build().unwrap();
        let tasks = TaskTable::uniform(4, TaskProfile::new(0.2, 6.0, 1.0));
        let vehicle = VehicleProfile::new(3.0, 1.0);

        let run = |seed| {
            let policy = RandomPolicy::new(&topo, vehicle.capacity, 0.5).unwrap();
            let mut agent = ReactiveAgent::new(&topo, vehicle, policy);
            let mut sim = Simulation::new(&topo, &tasks, ids[0], seed).unwrap();
            sim.run(&mut agent, 200).unwrap()
        };
        assert_eq!(run(9), run(9));
    }
}
