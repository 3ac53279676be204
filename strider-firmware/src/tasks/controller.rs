//! Main controller task
//!
//! Owns the watch controller. Feeds it samples and clock ticks, and pushes
//! its output into the shared watch face.

use defmt::*;
use embassy_futures::select::{select, Either};

use strider_core::config::WatchConfig;
use strider_core::watch::WatchController;

use crate::channels::{SharedFace, FACE_UPDATE, SAMPLE_CHANNEL};
use crate::platform::{SignalHaptics, UptimeClock};
use crate::tasks::tick::TICK_SIGNAL;

/// Controller task - main coordination loop
#[embassy_executor::task]
pub async fn controller_task(config: WatchConfig, face: &'static SharedFace) {
    info!("Controller task started");

    let clock = UptimeClock;
    let mut haptics = SignalHaptics;
    let mut watch = WatchController::new(&config, &clock);

    loop {
        match select(SAMPLE_CHANNEL.receive(), TICK_SIGNAL.wait()).await {
            Either::First(sample) => {
                let mut face_guard = face.lock().await;
                let outcome = watch.on_sample(sample, &clock, &mut haptics, &mut *face_guard);
                let dirty = face_guard.is_dirty();
                drop(face_guard);

                if let Some(result) = outcome {
                    debug!(
                        "Batch: steps={} y={} level={} step={}",
                        result.step_count, result.y_pos, result.reward_level, result.step_detected
                    );
                    if result.reward_granted {
                        info!("Too still, nudging (level {})", result.reward_level);
                    }
                    if result.cycle_reset {
                        info!("Active enough, reward window restarted");
                    }
                }

                if dirty {
                    FACE_UPDATE.signal(());
                }
            }

            Either::Second(uptime_s) => {
                trace!("Tick at {} s", uptime_s);
                let mut face_guard = face.lock().await;
                watch.on_tick(&clock, &mut *face_guard);
                let dirty = face_guard.is_dirty();
                drop(face_guard);

                if dirty {
                    FACE_UPDATE.signal(());
                }
            }
        }
    }
}
