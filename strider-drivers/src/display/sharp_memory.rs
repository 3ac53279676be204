//! Sharp memory LCD driver (SPI)
//!
//! Driver for 144x168 Sharp memory-in-pixel LCDs (LS013B7DH05 and
//! relatives). The panel keeps its image without refresh, but the VCOM
//! polarity must be inverted at least once per second to avoid DC bias.
//!
//! # SPI Protocol
//!
//! Chip select is active HIGH, so the driver toggles it itself instead of
//! relying on an `SpiDevice`. The bus must be MSB-first, mode 0, <= 2 MHz.
//!
//! Multi-line write:
//! - Mode byte: write flag + current VCOM bit
//! - Per line: gate address (sent LSB-first, so bit-reversed here),
//!   18 data bytes, one dummy byte
//! - One extra dummy byte at the end
//!
//! Pixel bits: 1 = white (reflective), 0 = black.

use embedded_graphics::{pixelcolor::BinaryColor, prelude::*, Pixel};
use embedded_hal::digital::OutputPin;
use embedded_hal_async::spi::SpiBus;

/// Display width in pixels
pub const WIDTH: usize = 144;

/// Display height in pixels
pub const HEIGHT: usize = 168;

/// Bytes per display line
pub const LINE_BYTES: usize = WIDTH / 8;

/// Bytes in one line frame (address + data + dummy)
pub const LINE_FRAME_LEN: usize = LINE_BYTES + 2;

/// Mode byte flags, MSB-first
pub mod cmd {
    /// Write lines
    pub const WRITE: u8 = 0x80;
    /// VCOM high
    pub const VCOM: u8 = 0x40;
    /// Clear all pixels to white
    pub const CLEAR: u8 = 0x20;
}

/// Sharp display driver errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SharpError<BusE, PinE> {
    /// SPI bus error
    Bus(BusE),
    /// Chip select pin error
    Pin(PinE),
}

/// Mode byte for `command` with the given VCOM state
pub fn mode_byte(command: u8, vcom: bool) -> u8 {
    if vcom {
        command | cmd::VCOM
    } else {
        command
    }
}

/// Build the frame for one line; `row` is 0-based
pub fn line_frame(row: usize, data: &[u8; LINE_BYTES]) -> [u8; LINE_FRAME_LEN] {
    let mut frame = [0u8; LINE_FRAME_LEN];
    // Gate lines are numbered from 1
    frame[0] = ((row + 1) as u8).reverse_bits();
    frame[1..=LINE_BYTES].copy_from_slice(data);
    frame
}

/// Sharp memory LCD driver with a local framebuffer
pub struct SharpMemoryDisplay<SPI, CS> {
    spi: SPI,
    cs: CS,
    /// 1 bit per pixel, row-major, MSB is the leftmost pixel
    buffer: [[u8; LINE_BYTES]; HEIGHT],
    /// Lines changed since the last flush
    dirty: [bool; HEIGHT],
    /// Current VCOM polarity
    vcom: bool,
}

impl<SPI, CS> SharpMemoryDisplay<SPI, CS>
where
    SPI: SpiBus,
    CS: OutputPin,
{
    /// Create a new driver with a white framebuffer
    pub fn new(spi: SPI, cs: CS) -> Self {
        Self {
            spi,
            cs,
            buffer: [[0xFF; LINE_BYTES]; HEIGHT],
            dirty: [false; HEIGHT],
            vcom: false,
        }
    }

    /// Deselect the panel and clear it
    pub async fn init(&mut self) -> Result<(), SharpError<SPI::Error, CS::Error>> {
        self.cs.set_low().map_err(SharpError::Pin)?;
        self.clear_display().await
    }

    /// Clear the panel and the framebuffer to white
    pub async fn clear_display(&mut self) -> Result<(), SharpError<SPI::Error, CS::Error>> {
        for line in self.buffer.iter_mut() {
            line.fill(0xFF);
        }
        self.dirty = [false; HEIGHT];

        let frame = [mode_byte(cmd::CLEAR, self.vcom), 0x00];
        self.send(&frame).await
    }

    /// Invert VCOM; call at least once per second
    pub async fn toggle_vcom(&mut self) -> Result<(), SharpError<SPI::Error, CS::Error>> {
        self.vcom = !self.vcom;
        let frame = [mode_byte(0, self.vcom), 0x00];
        self.send(&frame).await
    }

    /// Send changed lines to the panel
    ///
    /// Returns the number of lines written.
    pub async fn flush(&mut self) -> Result<usize, SharpError<SPI::Error, CS::Error>> {
        let count = self.dirty.iter().filter(|d| **d).count();
        if count == 0 {
            return Ok(0);
        }

        self.cs.set_high().map_err(SharpError::Pin)?;
        let result = self.write_dirty_lines().await;
        let deselect = self.cs.set_low().map_err(SharpError::Pin);
        result.map_err(SharpError::Bus)?;
        deselect?;

        self.dirty = [false; HEIGHT];
        Ok(count)
    }

    /// Current VCOM polarity
    pub fn vcom(&self) -> bool {
        self.vcom
    }

    /// Number of lines waiting for `flush`
    pub fn dirty_lines(&self) -> usize {
        self.dirty.iter().filter(|d| **d).count()
    }

    /// Read back a framebuffer pixel
    pub fn pixel(&self, x: usize, y: usize) -> Option<BinaryColor> {
        let byte = self.buffer.get(y)?.get(x / 8)?;
        let white = byte & (0x80 >> (x % 8)) != 0;
        Some(if white {
            BinaryColor::Off
        } else {
            BinaryColor::On
        })
    }

    /// Release the bus and chip select
    pub fn release(self) -> (SPI, CS) {
        (self.spi, self.cs)
    }

    fn set_pixel(&mut self, x: usize, y: usize, color: BinaryColor) {
        if x >= WIDTH || y >= HEIGHT {
            return;
        }
        let mask = 0x80 >> (x % 8);
        let byte = &mut self.buffer[y][x / 8];
        let before = *byte;
        match color {
            BinaryColor::On => *byte &= !mask,
            BinaryColor::Off => *byte |= mask,
        }
        if *byte != before {
            self.dirty[y] = true;
        }
    }

    async fn write_dirty_lines(&mut self) -> Result<(), SPI::Error> {
        self.spi.write(&[mode_byte(cmd::WRITE, self.vcom)]).await?;
        for row in 0..HEIGHT {
            if self.dirty[row] {
                let frame = line_frame(row, &self.buffer[row]);
                self.spi.write(&frame).await?;
            }
        }
        self.spi.write(&[0x00]).await?;
        self.spi.flush().await
    }

    async fn send(&mut self, frame: &[u8]) -> Result<(), SharpError<SPI::Error, CS::Error>> {
        self.cs.set_high().map_err(SharpError::Pin)?;
        let mut result = self.spi.write(frame).await;
        if result.is_ok() {
            result = self.spi.flush().await;
        }
        let deselect = self.cs.set_low().map_err(SharpError::Pin);
        result.map_err(SharpError::Bus)?;
        deselect
    }
}

impl<SPI, CS> OriginDimensions for SharpMemoryDisplay<SPI, CS> {
    fn size(&self) -> Size {
        Size::new(WIDTH as u32, HEIGHT as u32)
    }
}

impl<SPI, CS> DrawTarget for SharpMemoryDisplay<SPI, CS>
where
    SPI: SpiBus,
    CS: OutputPin,
{
    type Color = BinaryColor;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if point.x >= 0 && point.y >= 0 {
                self.set_pixel(point.x as usize, point.y as usize, color);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embassy_futures::block_on;
    use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
    use embedded_hal::digital::ErrorType as PinErrorType;
    use embedded_hal_async::spi::{ErrorKind, ErrorType};

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    struct MockError;

    impl embedded_hal::spi::Error for MockError {
        fn kind(&self) -> ErrorKind {
            ErrorKind::Other
        }
    }

    #[derive(Default)]
    struct MockSpi {
        /// Bytes written per chip-select window
        written: Vec<u8>,
        fail: bool,
    }

    impl ErrorType for MockSpi {
        type Error = MockError;
    }

    impl SpiBus for MockSpi {
        async fn read(&mut self, words: &mut [u8]) -> Result<(), Self::Error> {
            words.fill(0);
            Ok(())
        }

        async fn write(&mut self, words: &[u8]) -> Result<(), Self::Error> {
            if self.fail {
                return Err(MockError);
            }
            self.written.extend_from_slice(words);
            Ok(())
        }

        async fn transfer(&mut self, read: &mut [u8], write: &[u8]) -> Result<(), Self::Error> {
            read.fill(0);
            self.write(write).await
        }

        async fn transfer_in_place(&mut self, words: &mut [u8]) -> Result<(), Self::Error> {
            self.written.extend_from_slice(words);
            Ok(())
        }

        async fn flush(&mut self) -> Result<(), Self::Error> {
            Ok(())
        }
    }

    #[derive(Default)]
    struct MockPin {
        high: bool,
        transitions: Vec<bool>,
    }

    impl PinErrorType for MockPin {
        type Error = core::convert::Infallible;
    }

    impl OutputPin for MockPin {
        fn set_low(&mut self) -> Result<(), Self::Error> {
            self.high = false;
            self.transitions.push(false);
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Self::Error> {
            self.high = true;
            self.transitions.push(true);
            Ok(())
        }
    }

    fn display() -> SharpMemoryDisplay<MockSpi, MockPin> {
        SharpMemoryDisplay::new(MockSpi::default(), MockPin::default())
    }

    #[test]
    fn test_line_frame_address() {
        let data = [0xAA; LINE_BYTES];
        let frame = line_frame(0, &data);
        // Line 1 sent LSB-first
        assert_eq!(frame[0], 0x80);
        assert_eq!(&frame[1..=LINE_BYTES], &data);
        assert_eq!(frame[LINE_FRAME_LEN - 1], 0x00);

        // Line 168 = 0b1010_1000
        assert_eq!(line_frame(167, &data)[0], 0b0001_0101);
    }

    #[test]
    fn test_mode_byte() {
        assert_eq!(mode_byte(cmd::WRITE, false), 0x80);
        assert_eq!(mode_byte(cmd::WRITE, true), 0xC0);
        assert_eq!(mode_byte(cmd::CLEAR, true), 0x60);
        assert_eq!(mode_byte(0, true), 0x40);
    }

    #[test]
    fn test_draw_marks_lines_dirty() {
        let mut lcd = display();
        assert_eq!(lcd.dirty_lines(), 0);

        Rectangle::new(Point::new(0, 2), Size::new(8, 3))
            .into_styled(PrimitiveStyle::with_fill(BinaryColor::On))
            .draw(&mut lcd)
            .unwrap();

        assert_eq!(lcd.dirty_lines(), 3);
        assert_eq!(lcd.pixel(0, 2), Some(BinaryColor::On));
        assert_eq!(lcd.pixel(8, 2), Some(BinaryColor::Off));
        assert_eq!(lcd.pixel(0, 1), Some(BinaryColor::Off));
    }

    #[test]
    fn test_redraw_same_color_stays_clean() {
        let mut lcd = display();
        Pixel(Point::new(3, 3), BinaryColor::Off)
            .draw(&mut lcd)
            .unwrap();
        assert_eq!(lcd.dirty_lines(), 0);
    }

    #[test]
    fn test_out_of_bounds_pixels_ignored() {
        let mut lcd = display();
        lcd.draw_iter([
            Pixel(Point::new(-1, 0), BinaryColor::On),
            Pixel(Point::new(0, -1), BinaryColor::On),
            Pixel(Point::new(144, 0), BinaryColor::On),
            Pixel(Point::new(0, 168), BinaryColor::On),
        ])
        .unwrap();
        assert_eq!(lcd.dirty_lines(), 0);
    }

    #[test]
    fn test_flush_sends_only_dirty_lines() {
        let mut lcd = display();
        Pixel(Point::new(0, 0), BinaryColor::On).draw(&mut lcd).unwrap();
        Pixel(Point::new(143, 10), BinaryColor::On).draw(&mut lcd).unwrap();

        assert_eq!(block_on(lcd.flush()), Ok(2));
        assert_eq!(lcd.dirty_lines(), 0);

        let (spi, cs) = lcd.release();
        assert_eq!(spi.written.len(), 1 + 2 * LINE_FRAME_LEN + 1);
        assert_eq!(spi.written[0], cmd::WRITE);

        let first = &spi.written[1..1 + LINE_FRAME_LEN];
        assert_eq!(first[0], 0x80);
        assert_eq!(first[1], 0x7F);

        let second = &spi.written[1 + LINE_FRAME_LEN..1 + 2 * LINE_FRAME_LEN];
        assert_eq!(second[0], 11u8.reverse_bits());
        assert_eq!(second[LINE_BYTES], 0xFE);

        assert_eq!(cs.transitions, vec![true, false]);
        assert!(!cs.high);
    }

    #[test]
    fn test_flush_without_changes_is_silent() {
        let mut lcd = display();
        assert_eq!(block_on(lcd.flush()), Ok(0));
        let (spi, cs) = lcd.release();
        assert!(spi.written.is_empty());
        assert!(cs.transitions.is_empty());
    }

    #[test]
    fn test_toggle_vcom() {
        let mut lcd = display();
        block_on(lcd.toggle_vcom()).unwrap();
        assert!(lcd.vcom());
        block_on(lcd.toggle_vcom()).unwrap();
        assert!(!lcd.vcom());

        let (spi, _) = lcd.release();
        assert_eq!(spi.written, vec![0x40, 0x00, 0x00, 0x00]);
    }

    #[test]
    fn test_write_carries_vcom() {
        let mut lcd = display();
        block_on(lcd.toggle_vcom()).unwrap();
        Pixel(Point::new(0, 0), BinaryColor::On).draw(&mut lcd).unwrap();
        block_on(lcd.flush()).unwrap();

        let (spi, _) = lcd.release();
        assert_eq!(spi.written[2], cmd::WRITE | cmd::VCOM);
    }

    #[test]
    fn test_init_clears_panel_and_buffer() {
        let mut lcd = display();
        Pixel(Point::new(5, 5), BinaryColor::On).draw(&mut lcd).unwrap();
        block_on(lcd.init()).unwrap();

        assert_eq!(lcd.pixel(5, 5), Some(BinaryColor::Off));
        assert_eq!(lcd.dirty_lines(), 0);

        let (spi, cs) = lcd.release();
        assert_eq!(spi.written, vec![cmd::CLEAR, 0x00]);
        assert_eq!(cs.transitions, vec![false, true, false]);
    }

    #[test]
    fn test_bus_error_deselects() {
        let mut lcd = display();
        Pixel(Point::new(0, 0), BinaryColor::On).draw(&mut lcd).unwrap();
        lcd.spi.fail = true;

        assert_eq!(block_on(lcd.flush()), Err(SharpError::Bus(MockError)));
        assert_eq!(lcd.dirty_lines(), 1);
        let (_, cs) = lcd.release();
        assert!(!cs.high);
    }
}
