//! Reward policy
//!
//! Time-gated evaluation of the step count and the progress bar it drives.

pub mod cycle;
pub mod progress;

pub use cycle::{RewardCycle, RewardOutcome};
pub use progress::ProgressBar;
