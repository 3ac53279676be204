//! Motion sensor trait

use crate::motion::Sample;

/// Three-axis accelerometer
///
/// Readings are in milli-g, matching the scale the classifier thresholds
/// and the display mapping are tuned for.
#[allow(async_fn_in_trait)]
pub trait MotionSensor {
    /// Bus or device error
    type Error;

    /// Read one sample
    async fn read_sample(&mut self) -> Result<Sample, Self::Error>;
}
