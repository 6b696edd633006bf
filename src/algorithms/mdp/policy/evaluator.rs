//! Greedy lookup of a converged plan.

use rand::seq::SliceRandom;
use rand::RngCore;

use super::trait_::Policy;
use crate::algorithms::mdp::error::PolicyError;
use crate::algorithms::mdp::planner::Plan;
use crate::algorithms::mdp::types::{Action, ActionKind};
use crate::task::Task;
use crate::topology::{CityId, Topology};
use crate::vehicle::VehicleProfile;

/// Picks the higher-valued action from a converged [`Plan`].
///
/// With a task on offer, the vehicle picks it up only when the planned
/// pickup value is strictly greater than the value of driving empty to the
/// same destination, and never when the task is too heavy. Without a task it
/// moves to the neighbor with the highest planned move value; ties go to the
/// lowest [`CityId`].
///
/// When every neighbor has exactly the same move value the plan expresses no
/// preference at all, and the neighbor is drawn uniformly at random from the
/// caller's random source. This keeps the behaviour of a plain reactive
/// agent that relocates to a random neighbor.
#[derive(Debug, Clone)]
pub struct PolicyEvaluator<'a> {
    plan: &'a Plan,
    topology: &'a Topology,
    vehicle: VehicleProfile,
}

impl<'a> PolicyEvaluator<'a> {
    /// `vehicle` must be the profile the plan was computed for.
    pub fn new(plan: &'a Plan, topology: &'a Topology, vehicle: VehicleProfile) -> Self {
        Self {
            plan,
            topology,
            vehicle,
        }
    }

    pub fn plan(&self) -> &Plan {
        self.plan
    }

    /// Planned value of driving empty from `from` to `to`.
    ///
    /// # Errors
    ///
    /// `UnknownCity` for cities outside the topology, `MissingEntry` if the
    /// plan has no such decision state.
    pub fn move_value(&self, from: CityId, to: CityId) -> Result<f64, PolicyError> {
        self.check_city(from)?;
        self.check_city(to)?;
        self.plan
            .q_table()
            .get(from, to, ActionKind::Move)
            .ok_or(PolicyError::MissingEntry {
                from,
                to,
                kind: ActionKind::Move,
            })
    }

    /// Planned value of delivering a task `from -> to`.
    ///
    /// `None` means the pickup is ineligible: the planner excluded it because
    /// the expected load exceeds capacity.
    pub fn pickup_value(&self, from: CityId, to: CityId) -> Option<f64> {
        self.plan.q_table().get(from, to, ActionKind::Pickup)
    }

    /// Neighbor to relocate to when no task is available.
    pub fn best_move(&self, current: CityId, rng: &mut dyn RngCore) -> Result<CityId, PolicyError> {
        let neighbors = self
            .topology
            .neighbors(current)
            .ok_or(PolicyError::UnknownCity(current))?;

        let candidates = neighbors
            .iter()
            .map(|&n| self.move_value(current, n).map(|v| (n, v)))
            .collect::<Result<Vec<_>, _>>()?;

        select_neighbor(&candidates, rng).ok_or(PolicyError::NoNeighbors(current))
    }

    fn check_city(&self, id: CityId) -> Result<(), PolicyError> {
        if self.topology.contains(id) {
            Ok(())
        } else {
            Err(PolicyError::UnknownCity(id))
        }
    }
}

impl Policy for PolicyEvaluator<'_> {
    fn choose_action(
        &self,
        current: CityId,
        task: Option<&Task>,
        rng: &mut dyn RngCore,
    ) -> Result<Action, PolicyError> {
        let Some(task) = task else {
            return self.best_move(current, rng).map(Action::Move);
        };

        if task.origin != current {
            return Err(PolicyError::TaskOriginMismatch {
                origin: task.origin,
                current,
            });
        }

        let move_value = self.move_value(current, task.destination)?;
        if !self.vehicle.can_carry(task.weight) {
            return Ok(Action::Move(task.destination));
        }

        match self.pickup_value(current, task.destination) {
            Some(pickup_value) if pickup_value > move_value => Ok(Action::Pickup(task.clone())),
            _ => Ok(Action::Move(task.destination)),
        }
    }

    fn name(&self) -> &str {
        "value_iteration"
    }
}

/// Highest-valued candidate, lowest id on partial ties, uniform draw when
/// all candidates tie.
///
/// `candidates` must be sorted by id.
pub(crate) fn select_neighbor(
    candidates: &[(CityId, f64)],
    rng: &mut dyn RngCore,
) -> Option<CityId> {
    let best = candidates
        .iter()
        .map(|(_, v)| *v)
        .reduce(f64::max)?;

    if candidates.iter().all(|(_, v)| *v == best) {
        return candidates.choose(rng).map(|(id, _)| *id);
    }
    candidates
        .iter()
        .find(|(_, v)| *v == best)
        .map(|(id, _)| *id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn c(i: usize) -> CityId {
        CityId::new(i)
    }

    #[test]
    fn select_prefers_highest_value() {
        let mut rng = StdRng::seed_from_u64(1);
        let candidates = [(c(1), -3.0), (c(2), -1.0), (c(4), -2.0)];
        assert_eq!(select_neighbor(&candidates, &mut rng), Some(c(2)));
    }

    #[test]
    fn select_breaks_partial_ties_by_lowest_id() {
        let mut rng = StdRng::seed_from_u64(1);
        let candidates = [(c(1), -3.0), (c(2), 5.0), (c(3), 5.0)];
        for _ in 0..20 {
            assert_eq!(select_neighbor(&candidates, &mut rng), Some(c(2)));
        }
    }

    #[test]
    fn select_draws_uniformly_without_preference() {
        let candidates = [(c(1), 0.0), (c(2), 0.0), (c(3), 0.0)];
        let mut rng = StdRng::seed_from_u64(7);
        let mut seen = [false; 4];
        for _ in 0..200 {
            let id = select_neighbor(&candidates, &mut rng).unwrap();
            seen[id.index()] = true;
        }
        assert_eq!(seen, [false, true, true, true]);
    }

    #[test]
    fn select_is_reproducible_with_same_seed() {
        let candidates = [(c(1), 0.0), (c(2), 0.0), (c(3), 0.0)];
        let draw = |seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            (0..10)
                .map(|_| select_neighbor(&candidates, &mut rng).unwrap())
                .collect::<Vec<_>>()
        };
        assert_eq!(draw(42), draw(42));
    }

    #[test]
    fn select_empty_is_none() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(select_neighbor(&[], &mut rng), None);
    }
}
