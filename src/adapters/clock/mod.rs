//! Clock adapters.

mod fixed;
mod system;

pub use fixed::FixedClock;
pub use system::SystemClock;
