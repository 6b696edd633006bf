//! Delivery tasks.

use std::fmt;

use crate::topology::CityId;
use crate::Id;

/// A delivery request from `origin` to `destination`.
///
/// Tasks are ephemeral: the simulation creates one when it appears at the
/// vehicle's city and drops it once the agent has decided.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Task {
    pub id: Id,
    pub origin: CityId,
    pub destination: CityId,
    /// Payment received on delivery.
    pub reward: f64,
    /// Load units occupied while carried.
    pub weight: f64,
}

impl Task {
    /// Creates a task with an auto-generated id.
    pub fn new(origin: CityId, destination: CityId, reward: f64, weight: f64) -> Self {
        Self::with_id(crate::generate_id(), origin, destination, reward, weight)
    }

    pub fn with_id(
        id: Id,
        origin: CityId,
        destination: CityId,
        reward: f64,
        weight: f64,
    ) -> Self {
        Self {
            id,
            origin,
            destination,
            reward,
            weight,
        }
    }

    /// Returns true if a vehicle with `capacity` can carry this task.
    pub fn fits(&self, capacity: f64) -> bool {
        self.weight <= capacity
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Task[{} -> {}, reward {:.2}, weight {:.2}]",
            self.origin, self.destination, self.reward, self.weight
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_tasks_get_distinct_ids() {
        let a = Task::new(CityId::new(0), CityId::new(1), 10.0, 1.0);
        let b = Task::new(CityId::new(0), CityId::new(1), 10.0, 1.0);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn fits_is_inclusive() {
        let task = Task::with_id("t".into(), CityId::new(0), CityId::new(1), 1.0, 5.0);
        assert!(task.fits(5.0));
        assert!(!task.fits(4.9));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn task_serializes_to_json() {
        let task = Task::with_id("t1".into(), CityId::new(0), CityId::new(2), 3.0, 1.0);
        let json = serde_json::to_string(&task).unwrap();
        assert!(json.contains("\"destination\":2"));
        let back: Task = serde_json::from_str(&json).unwrap();
        assert_eq!(back, task);
    }
}
