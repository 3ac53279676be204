//! Graphics backend trait
//!
//! Defines the interface the watch face renders through.

/// Display backend errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Communication error with display
    Communication,
}

/// Axis-aligned rectangle in display pixels
///
/// `y` is signed: the clock label row can move above the top edge when the
/// wrist points down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Same rectangle with a different width
    pub const fn with_width(self, width: u32) -> Self {
        Self { width, ..self }
    }

    /// Whether any pixel of this rectangle lies on a `width` x `height` screen
    pub fn intersects_screen(&self, width: u32, height: u32) -> bool {
        if self.width == 0 || self.height == 0 {
            return false;
        }
        let right = self.x.saturating_add(self.width as i32);
        let bottom = self.y.saturating_add(self.height as i32);
        right > 0 && bottom > 0 && self.x < width as i32 && self.y < height as i32
    }
}

/// Horizontal text alignment within a rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TextAlign {
    Left,
    Center,
}

/// Font size class
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TextSize {
    /// Status text
    Body,
    /// Clock label
    Large,
}

/// Graphics backend trait
///
/// Provides a hardware-agnostic interface for drawing the watch face.
/// Drawing is buffered; pushing pixels to the panel is left to the driver.
pub trait GraphicsBackend {
    /// Clear the entire display to the background color
    fn clear(&mut self) -> Result<(), DisplayError>;

    /// Fill a rectangle with the foreground color
    fn fill_rect(&mut self, rect: Rect) -> Result<(), DisplayError>;

    /// Draw a one-pixel rectangle outline
    fn stroke_rect(&mut self, rect: Rect) -> Result<(), DisplayError>;

    /// Draw text starting at the top of `rect`
    ///
    /// Text that does not fit the rectangle width is clipped, not wrapped.
    fn draw_text(
        &mut self,
        rect: Rect,
        text: &str,
        size: TextSize,
        align: TextAlign,
    ) -> Result<(), DisplayError>;

    /// Get the display dimensions in pixels as (width, height)
    fn dimensions(&self) -> (u32, u32);
}
