//! A policy bound to one vehicle, with profit bookkeeping.

use rand::RngCore;
use tracing::debug;

use super::error::PolicyError;
use super::policy::Policy;
use super::reward::RewardComputer;
use super::types::Action;
use crate::task::Task;
use crate::topology::{CityId, Topology};
use crate::vehicle::VehicleProfile;

/// Running totals of the actions an agent has taken.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfitStats {
    pub actions: u64,
    pub pickups: u64,
    pub total_profit: f64,
    pub total_distance: f64,
}

impl ProfitStats {
    /// Mean profit per action; zero before the first action.
    pub fn average_profit(&self) -> f64 {
        if self.actions == 0 {
            0.0
        } else {
            self.total_profit / self.actions as f64
        }
    }

    /// Profit per unit of distance driven.
    pub fn profit_per_distance(&self) -> f64 {
        if self.total_distance > 0.0 {
            self.total_profit / self.total_distance
        } else {
            0.0
        }
    }

    fn record(&mut self, action: &Action, profit: f64, distance: f64) {
        self.actions += 1;
        if action.is_pickup() {
            self.pickups += 1;
        }
        self.total_profit += profit;
        self.total_distance += distance;
    }
}

/// Reactive agent: one vehicle, one policy.
pub struct ReactiveAgent<'a, P: Policy> {
    topology: &'a Topology,
    vehicle: VehicleProfile,
    policy: P,
    stats: ProfitStats,
}

impl<'a, P: Policy> ReactiveAgent<'a, P> {
    pub fn new(topology: &'a Topology, vehicle: VehicleProfile, policy: P) -> Self {
        Self {
            topology,
            vehicle,
            policy,
            stats: ProfitStats::default(),
        }
    }

    /// Chooses an action at `current` and books its profit.
    ///
    /// # Errors
    ///
    /// Whatever the policy reports, or `UnknownCity` if the chosen action
    /// leads outside the topology.
    pub fn act(
        &mut self,
        current: CityId,
        task: Option<&Task>,
        rng: &mut dyn RngCore,
    ) -> Result<Action, PolicyError> {
        let action = self.policy.choose_action(current, task, rng)?;
        let destination = action.destination();
        let distance = self
            .topology
            .distance(current, destination)
            .ok_or(PolicyError::UnknownCity(destination))?;
        let profit = RewardComputer::for_action(&action, current, self.topology, &self.vehicle)
            .ok_or(PolicyError::UnknownCity(destination))?;

        self.stats.record(&action, profit, distance);
        debug!(
            policy = self.policy.name(),
            %action,
            profit,
            actions = self.stats.actions,
            total_profit = self.stats.total_profit,
            average_profit = self.stats.average_profit(),
            "agent acted"
        );
        Ok(action)
    }

    pub fn stats(&self) -> &ProfitStats {
        &self.stats
    }

    pub fn policy(&self) -> &P {
        &self.policy
    }

    pub fn vehicle(&self) -> &VehicleProfile {
        &self.vehicle
    }

    pub fn reset_stats(&mut self) {
        self.stats = ProfitStats::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::mdp::policy::RandomPolicy;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn average_profit_before_any_action_is_zero() {
        assert_eq!(ProfitStats::default().average_profit(), 0.0);
        assert_eq!(ProfitStats::default().profit_per_distance(), 0.0);
    }

    #[test]
    fn act_books_pickup_and_move() {
        let mut b = Topology::builder();
        let a = b.add_city("A").unwrap();
        let c = b.add_city("C").unwrap();
        b.add_route(a, c, 2.0).unwrap();
        let topo = b.build().unwrap();
        let vehicle = VehicleProfile::new(5.0, 1.5);
        let policy = RandomPolicy::new(&topo, vehicle.capacity, 1.0).unwrap();
        let mut agent = ReactiveAgent::new(&topo, vehicle, policy);
        let mut rng = StdRng::seed_from_u64(0);

        let task = Task::new(a, c, 10.0, 1.0);
        let first = agent.act(a, Some(&task), &mut rng).unwrap();
        assert!(first.is_pickup());
        let second = agent.act(c, None, &mut rng).unwrap();
        assert_eq!(second, Action::Move(a));

        let stats = agent.stats();
        assert_eq!(stats.actions, 2);
        assert_eq!(stats.pickups, 1);
        assert!((stats.total_profit - (7.0 - 3.0)).abs() < 1e-12);
        assert!((stats.total_distance - 4.0).abs() < 1e-12);
        assert!((stats.average_profit() - 2.0).abs() < 1e-12);

        agent.reset_stats();
        assert_eq!(agent.stats(), &ProfitStats::default());
    }
}
