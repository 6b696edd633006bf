//! Actions and decision-state keys.

use std::fmt;

use crate::task::Task;
use crate::topology::CityId;

/// Payload-free tag of an [`Action`], used as part of Q-table keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionKind {
    Move,
    Pickup,
}

impl ActionKind {
    pub fn all() -> [ActionKind; 2] {
        [ActionKind::Move, ActionKind::Pickup]
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionKind::Move => write!(f, "move"),
            ActionKind::Pickup => write!(f, "pickup"),
        }
    }
}

/// What the vehicle does at a decision tick.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Action {
    /// Drive empty to the given city.
    Move(CityId),
    /// Take the task and deliver it to its destination.
    Pickup(Task),
}

impl Action {
    pub fn kind(&self) -> ActionKind {
        match self {
            Action::Move(_) => ActionKind::Move,
            Action::Pickup(_) => ActionKind::Pickup,
        }
    }

    /// City the vehicle ends up in after the action.
    pub fn destination(&self) -> CityId {
        match self {
            Action::Move(to) => *to,
            Action::Pickup(task) => task.destination,
        }
    }

    pub fn is_pickup(&self) -> bool {
        matches!(self, Action::Pickup(_))
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Move(to) => write!(f, "Move({})", to),
            Action::Pickup(task) => write!(f, "Pickup({})", task),
        }
    }
}

/// Composite Q-table key: decision state `(from, to)` plus action kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct QKey {
    pub from: CityId,
    pub to: CityId,
    pub kind: ActionKind,
}

impl QKey {
    pub fn new(from: CityId, to: CityId, kind: ActionKind) -> Self {
        Self { from, to, kind }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_destination() {
        let task = Task::with_id("t".into(), CityId::new(0), CityId::new(2), 1.0, 1.0);
        assert_eq!(Action::Move(CityId::new(1)).destination(), CityId::new(1));
        assert_eq!(Action::Pickup(task).destination(), CityId::new(2));
    }

    #[test]
    fn keys_order_by_state_then_kind() {
        let a = QKey::new(CityId::new(0), CityId::new(1), ActionKind::Pickup);
        let b = QKey::new(CityId::new(0), CityId::new(2), ActionKind::Move);
        let c = QKey::new(CityId::new(0), CityId::new(1), ActionKind::Move);
        assert!(c < a);
        assert!(a < b);
    }

    #[test]
    fn action_display() {
        assert_eq!(Action::Move(CityId::new(3)).to_string(), "Move(#3)");
    }
}
