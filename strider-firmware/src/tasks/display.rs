//! Display task
//!
//! Redraws the Sharp LCD when the watch face changes and inverts VCOM once
//! per second, which the panel needs even when the image is static.

use defmt::*;
use embassy_futures::select::{select, Either};
use embassy_rp::gpio::Output;
use embassy_rp::peripherals::SPI0;
use embassy_rp::spi::{Async, Spi};
use embassy_time::{Duration, Ticker};

use strider_display::EgBackend;
use strider_drivers::display::SharpMemoryDisplay;

use crate::channels::{SharedFace, FACE_UPDATE};

/// VCOM inversion interval in milliseconds
const VCOM_INTERVAL_MS: u64 = 1000;

/// Sharp memory LCD on SPI0 with a GPIO chip select
pub type Lcd = SharpMemoryDisplay<Spi<'static, SPI0, Async>, Output<'static>>;

/// Display task - renders the face and keeps the panel biased
#[embassy_executor::task]
pub async fn display_task(mut lcd: Lcd, face: &'static SharedFace) {
    info!("Display task started");

    if let Err(e) = lcd.init().await {
        error!("LCD init failed: {:?}", Debug2Format(&e));
    }

    // init() blanked the panel; draw whatever the face holds now
    face.lock().await.mark_dirty();
    redraw(&mut lcd, face).await;

    let mut vcom = Ticker::every(Duration::from_millis(VCOM_INTERVAL_MS));

    loop {
        match select(FACE_UPDATE.wait(), vcom.next()).await {
            Either::First(()) => redraw(&mut lcd, face).await,
            Either::Second(()) => {
                if let Err(e) = lcd.toggle_vcom().await {
                    warn!("VCOM toggle failed: {:?}", Debug2Format(&e));
                }
            }
        }
    }
}

/// Render the face into the framebuffer and flush changed lines
async fn redraw(lcd: &mut Lcd, face: &'static SharedFace) {
    {
        let mut face = face.lock().await;
        if !face.is_dirty() {
            return;
        }
        let mut backend = EgBackend::new(lcd);
        if let Err(e) = face.render(&mut backend) {
            warn!("Face render failed: {:?}", e);
            return;
        }
    }

    match lcd.flush().await {
        Ok(lines) => trace!("Flushed {} lines", lines),
        Err(e) => warn!("LCD flush failed: {:?}", Debug2Format(&e)),
    }
}
