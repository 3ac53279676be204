//! Haptic task
//!
//! Runs the vibration motor for one pulse per request.

use defmt::*;
use embassy_rp::gpio::Output;
use embassy_time::Delay;

use strider_core::config::HapticConfig;
use strider_drivers::haptic::VibrationMotor;

use crate::channels::HAPTIC_PULSE;

/// Haptic task - waits for pulse requests and drives the motor
#[embassy_executor::task]
pub async fn haptic_task(mut motor: VibrationMotor<Output<'static>>, config: HapticConfig) {
    info!("Haptic task started ({} ms pulses)", config.pulse_ms);

    let mut delay = Delay;

    loop {
        HAPTIC_PULSE.wait().await;
        debug!("Haptic pulse");

        if motor
            .pulse(&mut delay, u32::from(config.pulse_ms))
            .await
            .is_err()
        {
            error!("Vibration motor pin error");
        }
    }
}
