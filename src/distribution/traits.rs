use crate::topology::CityId;

/// Source of task statistics for ordered city pairs.
///
/// For a fixed origin the probabilities over all destinations need not sum
/// to one; the remainder is the chance that no task appears. Pairs with
/// `origin == destination` are never queried.
pub trait TaskDistribution {
    /// Probability in `[0, 1]` that a task `origin -> destination` is available.
    fn probability(&self, origin: CityId, destination: CityId) -> f64;

    /// Expected payment for delivering such a task.
    fn reward(&self, origin: CityId, destination: CityId) -> f64;

    /// Expected load of such a task.
    fn weight(&self, origin: CityId, destination: CityId) -> f64;
}

impl<D: TaskDistribution + ?Sized> TaskDistribution for &D {
    fn probability(&self, origin: CityId, destination: CityId) -> f64 {
        (**self).probability(origin, destination)
    }

    fn reward(&self, origin: CityId, destination: CityId) -> f64 {
        (**self).reward(origin, destination)
    }

    fn weight(&self, origin: CityId, destination: CityId) -> f64 {
        (**self).weight(origin, destination)
    }
}
