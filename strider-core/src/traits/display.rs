//! Display sink trait

use crate::motion::ClassificationResult;

/// Receiver for everything the watch face shows
pub trait DisplaySink {
    /// Show the outcome of a classified batch
    ///
    /// Called once per batch with the step count, the clock label row, and
    /// the reward level that drives the progress bar.
    fn show_classification(&mut self, result: &ClassificationResult);

    /// Show the wall-clock time
    fn show_time(&mut self, now_s: u32);
}
