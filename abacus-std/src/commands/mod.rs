//! Standard commands

mod math;
mod stats;

pub use math::{Sqrt, Power};
pub use stats::Stats;
