use crate::topology::{CityId, Topology};

use super::traits::TaskDistribution;

/// Statistics of the tasks travelling along one ordered city pair.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TaskProfile {
    pub probability: f64,
    pub reward: f64,
    pub weight: f64,
}

impl TaskProfile {
    pub fn new(probability: f64, reward: f64, weight: f64) -> Self {
        Self {
            probability,
            reward,
            weight,
        }
    }
}

/// Dense `n × n` task distribution.
///
/// Unset pairs, and pairs involving a city outside `0..n`, report a zero
/// profile: no task, no reward, no weight.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskTable {
    n: usize,
    profiles: Vec<TaskProfile>,
}

impl TaskTable {
    pub fn new(n: usize) -> Self {
        Self {
            n,
            profiles: vec![TaskProfile::default(); n * n],
        }
    }

    /// Empty table sized for every city of `topology`.
    pub fn for_topology(topology: &Topology) -> Self {
        Self::new(topology.len())
    }

    /// Same profile on every ordered pair of distinct cities.
    pub fn uniform(n: usize, profile: TaskProfile) -> Self {
        let mut table = Self::new(n);
        for origin in 0..n {
            for destination in (0..n).filter(|&d| d != origin) {
                table.profiles[origin * n + destination] = profile;
            }
        }
        table
    }

    pub fn city_count(&self) -> usize {
        self.n
    }

    /// Sets the profile of `origin -> destination`.
    ///
    /// Pairs outside the table are ignored; values are checked by the planner,
    /// not here.
    pub fn set(&mut self, origin: CityId, destination: CityId, profile: TaskProfile) {
        if let Some(i) = self.slot(origin, destination) {
            self.profiles[i] = profile;
        }
    }

    /// Builder-style [`set`](Self::set).
    pub fn with(mut self, origin: CityId, destination: CityId, profile: TaskProfile) -> Self {
        self.set(origin, destination, profile);
        self
    }

    pub fn profile(&self, origin: CityId, destination: CityId) -> TaskProfile {
        self.slot(origin, destination)
            .map(|i| self.profiles[i])
            .unwrap_or_default()
    }

    fn slot(&self, origin: CityId, destination: CityId) -> Option<usize> {
        (origin.index() < self.n && destination.index() < self.n)
            .then(|| origin.index() * self.n + destination.index())
    }
}

impl TaskDistribution for TaskTable {
    fn probability(&self, origin: CityId, destination: CityId) -> f64 {
        self.profile(origin, destination).probability
    }

    fn reward(&self, origin: CityId, destination: CityId) -> f64 {
        self.profile(origin, destination).reward
    }

    fn weight(&self, origin: CityId, destination: CityId) -> f64 {
        self.profile(origin, destination).weight
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(i: usize) -> CityId {
        CityId::new(i)
    }

    #[test]
    fn unset_pairs_are_zero() {
        let table = TaskTable::new(3);
        assert_eq!(table.probability(c(0), c(1)), 0.0);
        assert_eq!(table.reward(c(2), c(0)), 0.0);
    }

    #[test]
    fn set_is_directional() {
        let table = TaskTable::new(2).with(c(0), c(1), TaskProfile::new(0.5, 10.0, 2.0));
        assert_eq!(table.probability(c(0), c(1)), 0.5);
        assert_eq!(table.weight(c(0), c(1)), 2.0);
        assert_eq!(table.probability(c(1), c(0)), 0.0);
    }

    #[test]
    fn out_of_range_is_ignored() {
        let mut table = TaskTable::new(2);
        table.set(c(0), c(5), TaskProfile::new(1.0, 1.0, 1.0));
        assert_eq!(table.profile(c(0), c(5)), TaskProfile::default());
    }

    #[test]
    fn uniform_skips_diagonal() {
        let table = TaskTable::uniform(3, TaskProfile::new(0.2, 4.0, 1.0));
        assert_eq!(table.probability(c(1), c(1)), 0.0);
        assert_eq!(table.probability(c(1), c(2)), 0.2);
        assert_eq!(table.reward(c(2), c(0)), 4.0);
    }
}
