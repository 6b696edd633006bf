//! Policy trait and implementations.

pub mod evaluator;
pub mod random;
pub mod trait_;

pub use evaluator::PolicyEvaluator;
pub use random::RandomPolicy;
pub use trait_::Policy;
