pub mod mdp;

pub use mdp::{Planner, PolicyEvaluator};
