//! `embedded-graphics` backend
//!
//! Renders onto any monochrome `DrawTarget`. `BinaryColor::On` is ink,
//! `BinaryColor::Off` is background.

use embedded_graphics::{
    mono_font::{
        ascii::{FONT_10X20, FONT_7X13},
        MonoTextStyle,
    },
    pixelcolor::BinaryColor,
    prelude::*,
    primitives::{PrimitiveStyle, Rectangle},
    text::{Alignment, Baseline, Text, TextStyleBuilder},
};

use crate::backend::{DisplayError, GraphicsBackend, Rect, TextAlign, TextSize};

/// Graphics backend over a borrowed draw target
pub struct EgBackend<'a, D> {
    target: &'a mut D,
}

impl<'a, D> EgBackend<'a, D>
where
    D: DrawTarget<Color = BinaryColor>,
{
    pub fn new(target: &'a mut D) -> Self {
        Self { target }
    }
}

fn to_rectangle(rect: Rect) -> Rectangle {
    Rectangle::new(Point::new(rect.x, rect.y), Size::new(rect.width, rect.height))
}

impl<D> GraphicsBackend for EgBackend<'_, D>
where
    D: DrawTarget<Color = BinaryColor>,
{
    fn clear(&mut self) -> Result<(), DisplayError> {
        self.target
            .clear(BinaryColor::Off)
            .map_err(|_| DisplayError::Communication)
    }

    fn fill_rect(&mut self, rect: Rect) -> Result<(), DisplayError> {
        to_rectangle(rect)
            .into_styled(PrimitiveStyle::with_fill(BinaryColor::On))
            .draw(self.target)
            .map_err(|_| DisplayError::Communication)
    }

    fn stroke_rect(&mut self, rect: Rect) -> Result<(), DisplayError> {
        to_rectangle(rect)
            .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 1))
            .draw(self.target)
            .map_err(|_| DisplayError::Communication)
    }

    fn draw_text(
        &mut self,
        rect: Rect,
        text: &str,
        size: TextSize,
        align: TextAlign,
    ) -> Result<(), DisplayError> {
        let font = match size {
            TextSize::Body => &FONT_7X13,
            TextSize::Large => &FONT_10X20,
        };
        let character_style = MonoTextStyle::new(font, BinaryColor::On);

        let (position, alignment) = match align {
            TextAlign::Left => (Point::new(rect.x, rect.y), Alignment::Left),
            TextAlign::Center => (
                Point::new(rect.x + (rect.width / 2) as i32, rect.y),
                Alignment::Center,
            ),
        };
        let text_style = TextStyleBuilder::new()
            .alignment(alignment)
            .baseline(Baseline::Top)
            .build();

        let area = to_rectangle(rect);
        let mut clipped = self.target.clipped(&area);
        Text::with_text_style(text, position, character_style, text_style)
            .draw(&mut clipped)
            .map(|_| ())
            .map_err(|_| DisplayError::Communication)
    }

    fn dimensions(&self) -> (u32, u32) {
        let size = self.target.bounding_box().size;
        (size.width, size.height)
    }
}
