//! Accelerometer sampling task
//!
//! Reads the LIS3DH at the configured rate and forwards each sample to the
//! controller. Read failures are logged and skipped.

use defmt::*;
use embassy_rp::i2c::{Async, I2c};
use embassy_rp::peripherals::I2C0;
use embassy_time::{Duration, Ticker};

use strider_core::config::SamplingConfig;
use strider_core::traits::MotionSensor;
use strider_drivers::accel::Lis3dh;

use crate::channels::SAMPLE_CHANNEL;

/// Accelerometer on the board's I2C0 bus
pub type Accelerometer = Lis3dh<I2c<'static, I2C0, Async>>;

/// Sampler task - periodic accelerometer reads
#[embassy_executor::task]
pub async fn sampler_task(mut accel: Accelerometer, sampling: SamplingConfig) {
    info!("Sampler task started at {} Hz", sampling.rate_hz);

    let mut ticker = Ticker::every(Duration::from_millis(u64::from(sampling.interval_ms())));
    let mut dropped: u32 = 0;

    loop {
        ticker.next().await;

        match accel.read_sample().await {
            Ok(sample) => {
                trace!("Sample: {:?}", sample);
                if SAMPLE_CHANNEL.try_send(sample).is_err() {
                    dropped = dropped.wrapping_add(1);
                    warn!("Sample channel full, dropped {} so far", dropped);
                }
            }
            Err(e) => {
                warn!("Accelerometer read failed: {:?}", Debug2Format(&e));
            }
        }
    }
}
