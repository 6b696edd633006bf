//! Task distribution oracle: where tasks appear, what they pay, how heavy they are.

mod table;
mod traits;

pub use table::{TaskProfile, TaskTable};
pub use traits::TaskDistribution;
