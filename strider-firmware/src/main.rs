//! Strider - Step-Nudging Watch Firmware
//!
//! Main firmware binary for RP2040-based wrist boards with a LIS3DH
//! accelerometer, a 144x168 Sharp memory LCD and a vibration motor.
//!
//! The watch counts steps from wrist motion, moves its clock label with
//! the wrist angle, and buzzes when the wearer has been still too long.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Level, Output};
use embassy_rp::i2c::{self, I2c};
use embassy_rp::peripherals::I2C0;
use embassy_rp::spi::{self, Spi};
use embassy_sync::mutex::Mutex;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use strider_core::config::{load_config, WatchConfig};
use strider_display::WatchFace;
use strider_drivers::accel::{Lis3dh, Lis3dhConfig};
use strider_drivers::display::SharpMemoryDisplay;
use strider_drivers::haptic::VibrationMotor;

use crate::channels::SharedFace;

/// Embedded configuration (compiled into firmware)
/// Edit watch.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../watch.toml");

/// LCD SPI clock; the panel is rated for 2 MHz
const LCD_SPI_HZ: u32 = 2_000_000;

/// Accelerometer I2C clock
const ACCEL_I2C_HZ: u32 = 400_000;

mod channels;
mod platform;
mod tasks;

bind_interrupts!(struct Irqs {
    I2C0_IRQ => i2c::InterruptHandler<I2C0>;
});

// Shared watch face (must live forever for task references)
static WATCH_FACE: StaticCell<SharedFace> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Strider firmware starting...");

    // Initialize RP2040 peripherals
    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config = load_watch_config();
    info!(
        "Config: thresholds={}/{}/{} mg, {} Hz, min_steps={}",
        config.thresholds.x,
        config.thresholds.y,
        config.thresholds.z,
        config.sampling.rate_hz,
        config.reward.min_steps
    );

    // Accelerometer on I2C0 (board-specific: SDA=GPIO4, SCL=GPIO5)
    let mut i2c_config = i2c::Config::default();
    i2c_config.frequency = ACCEL_I2C_HZ;
    let i2c = I2c::new_async(p.I2C0, p.PIN_5, p.PIN_4, Irqs, i2c_config);

    let mut accel = Lis3dh::new(
        i2c,
        Lis3dhConfig::for_watch(&config.sampling, config.display.full_scale),
    );
    match accel.init().await {
        Ok(()) => info!("LIS3DH initialized"),
        // Keep going: the clock still works and reads are retried
        Err(e) => error!("LIS3DH init failed: {:?}", Debug2Format(&e)),
    }

    // Sharp LCD on SPI0 (board-specific: SCK=GPIO18, MOSI=GPIO19, CS=GPIO17)
    let mut spi_config = spi::Config::default();
    spi_config.frequency = LCD_SPI_HZ;
    let spi = Spi::new_txonly(p.SPI0, p.PIN_18, p.PIN_19, p.DMA_CH0, spi_config);
    let cs = Output::new(p.PIN_17, Level::Low);
    let lcd = SharpMemoryDisplay::new(spi, cs);
    info!("LCD SPI initialized");

    // Vibration motor (board-specific: GPIO15 via MOSFET)
    let Ok(motor) = VibrationMotor::new_active_high(Output::new(p.PIN_15, Level::Low));
    info!("Vibration motor initialized");

    let face: &'static SharedFace = WATCH_FACE.init(Mutex::new(WatchFace::new(&config)));

    // Spawn tasks
    spawner.spawn(unwrap!(tasks::tick_task()));
    spawner.spawn(unwrap!(tasks::sampler_task(accel, config.sampling)));
    spawner.spawn(unwrap!(tasks::haptic_task(motor, config.haptic)));
    spawner.spawn(unwrap!(tasks::display_task(lcd, face)));
    spawner.spawn(unwrap!(tasks::controller_task(config, face)));

    info!("All tasks spawned, firmware running");

    // Main task has nothing else to do - all work happens in spawned tasks
    loop {
        embassy_time::Timer::after_secs(60).await;
        trace!("Main loop heartbeat");
    }
}

/// Parse the embedded watch.toml
///
/// build.rs already rejects invalid files, so the fallback only triggers
/// when the firmware parser and the build-time check disagree.
fn load_watch_config() -> WatchConfig {
    match load_config(EMBEDDED_CONFIG) {
        Ok(config) => {
            info!("Parsed embedded configuration successfully");
            config
        }
        Err(e) => {
            error!("Failed to parse embedded config: {:?}", e);
            error!("Using default configuration");
            WatchConfig::default()
        }
    }
}
