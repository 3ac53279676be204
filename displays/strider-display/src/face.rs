//! Watch face screen model
//!
//! Holds everything the face shows and draws it through a
//! `GraphicsBackend`:
//! - Status text (step count, or a placeholder before the first batch)
//! - Progress bar along the top edge, one segment per reward level
//! - Clock label whose row follows the vertical axis

use core::fmt::Write;

use heapless::String;
use strider_core::config::{ClockConfig, DisplayMapping, WatchConfig};
use strider_core::motion::{display_row, ClassificationResult};
use strider_core::reward::ProgressBar;
use strider_core::traits::DisplaySink;

use crate::backend::{DisplayError, GraphicsBackend, Rect, TextAlign, TextSize};
use crate::clock::{TimeOfDay, CLOCK_TEXT_LEN};

/// Face width in pixels
pub const FACE_WIDTH: u32 = 144;

/// Face height in pixels
pub const FACE_HEIGHT: u32 = 168;

/// Progress bar outline
pub const PROGRESS_RECT: Rect = Rect::new(0, 0, FACE_WIDTH, 10);

/// Status text area, inset from the sides and below the progress bar
pub const STATUS_RECT: Rect = Rect::new(5, 12, FACE_WIDTH - 10, FACE_HEIGHT - 12);

/// Clock label height
pub const CLOCK_LABEL_HEIGHT: u32 = 50;

/// Text shown before the first batch is classified
pub const PLACEHOLDER_TEXT: &str = "No data yet.";

/// Maximum status text length
const STATUS_LEN: usize = 32;

/// Watch face state
#[derive(Debug, Clone)]
pub struct WatchFace {
    /// Status line
    status: String<STATUS_LEN>,
    /// Formatted clock, empty until the first tick
    clock: String<CLOCK_TEXT_LEN>,
    /// Top row of the clock label
    y_pos: i32,
    /// Progress bar segments
    progress: ProgressBar,
    /// Clock style and offset
    clock_config: ClockConfig,
    /// Segment count for the progress bar
    max_bars: u8,
    /// Whether the face needs to be redrawn
    dirty: bool,
}

impl WatchFace {
    /// Create a face showing the placeholder text and an empty bar
    pub fn new(config: &WatchConfig) -> Self {
        let mut status = String::new();
        let _ = status.push_str(PLACEHOLDER_TEXT);

        Self {
            status,
            clock: String::new(),
            y_pos: initial_row(&config.display),
            progress: ProgressBar::from_level(0, config.reward.max_bars),
            clock_config: config.clock,
            max_bars: config.reward.max_bars,
            dirty: true,
        }
    }

    /// Current status text
    pub fn status_text(&self) -> &str {
        self.status.as_str()
    }

    /// Current clock text
    pub fn clock_text(&self) -> &str {
        self.clock.as_str()
    }

    /// Current progress bar
    pub fn progress(&self) -> ProgressBar {
        self.progress
    }

    /// Rectangle of the clock label
    pub fn clock_rect(&self) -> Rect {
        Rect::new(0, self.y_pos, FACE_WIDTH, CLOCK_LABEL_HEIGHT)
    }

    /// Check if the face needs redrawing
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Force a full redraw, e.g. after the panel was cleared
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Draw the full face and mark it clean
    pub fn render<B: GraphicsBackend>(&mut self, backend: &mut B) -> Result<(), DisplayError> {
        let (width, height) = backend.dimensions();

        backend.clear()?;

        backend.draw_text(STATUS_RECT, self.status.as_str(), TextSize::Body, TextAlign::Left)?;

        backend.stroke_rect(PROGRESS_RECT)?;
        let fill = self.progress.fill_width(PROGRESS_RECT.width);
        if fill > 0 {
            backend.fill_rect(PROGRESS_RECT.with_width(fill))?;
        }

        // The label may sit partly or wholly off screen when tilted
        let label = self.clock_rect();
        if !self.clock.is_empty() && label.intersects_screen(width, height) {
            backend.draw_text(label, self.clock.as_str(), TextSize::Large, TextAlign::Center)?;
        }

        self.dirty = false;
        Ok(())
    }

    fn set_status(&mut self, step_count: u32) {
        let mut status: String<STATUS_LEN> = String::new();
        let _ = write!(status, "Steps: {}", step_count);
        if status != self.status {
            self.status = status;
            self.dirty = true;
        }
    }
}

impl DisplaySink for WatchFace {
    fn show_classification(&mut self, result: &ClassificationResult) {
        self.set_status(result.step_count);

        if result.y_pos != self.y_pos {
            self.y_pos = result.y_pos;
            self.dirty = true;
        }

        let progress = ProgressBar::from_level(result.reward_level, self.max_bars);
        if progress != self.progress {
            self.progress = progress;
            self.dirty = true;
        }
    }

    fn show_time(&mut self, now_s: u32) {
        let local = now_s.wrapping_add(self.clock_config.epoch_offset_s);
        let text = TimeOfDay::from_epoch_seconds(local).format(self.clock_config.style);
        if text != self.clock {
            self.clock = text;
            self.dirty = true;
        }
    }
}

/// Label row for a level wrist, used until the first batch arrives
fn initial_row(mapping: &DisplayMapping) -> i32 {
    display_row(0, mapping)
}

#[cfg(test)]
mod tests {
    use super::*;
    use strider_core::config::ClockStyle;

    #[derive(Debug, Clone, PartialEq)]
    enum Op {
        Clear,
        Fill(Rect),
        Stroke(Rect),
        Text(Rect, std::string::String, TextSize, TextAlign),
    }

    #[derive(Default)]
    struct RecordingBackend {
        ops: Vec<Op>,
    }

    impl GraphicsBackend for RecordingBackend {
        fn clear(&mut self) -> Result<(), DisplayError> {
            self.ops.push(Op::Clear);
            Ok(())
        }

        fn fill_rect(&mut self, rect: Rect) -> Result<(), DisplayError> {
            self.ops.push(Op::Fill(rect));
            Ok(())
        }

        fn stroke_rect(&mut self, rect: Rect) -> Result<(), DisplayError> {
            self.ops.push(Op::Stroke(rect));
            Ok(())
        }

        fn draw_text(
            &mut self,
            rect: Rect,
            text: &str,
            size: TextSize,
            align: TextAlign,
        ) -> Result<(), DisplayError> {
            self.ops.push(Op::Text(rect, text.into(), size, align));
            Ok(())
        }

        fn dimensions(&self) -> (u32, u32) {
            (FACE_WIDTH, FACE_HEIGHT)
        }
    }

    struct FailingBackend;

    impl GraphicsBackend for FailingBackend {
        fn clear(&mut self) -> Result<(), DisplayError> {
            Err(DisplayError::Communication)
        }

        fn fill_rect(&mut self, _rect: Rect) -> Result<(), DisplayError> {
            Ok(())
        }

        fn stroke_rect(&mut self, _rect: Rect) -> Result<(), DisplayError> {
            Ok(())
        }

        fn draw_text(
            &mut self,
            _rect: Rect,
            _text: &str,
            _size: TextSize,
            _align: TextAlign,
        ) -> Result<(), DisplayError> {
            Ok(())
        }

        fn dimensions(&self) -> (u32, u32) {
            (FACE_WIDTH, FACE_HEIGHT)
        }
    }

    fn result(step_count: u32, y_pos: i32, reward_level: u32) -> ClassificationResult {
        ClassificationResult {
            step_count,
            y_pos,
            reward_level,
            reward_granted: false,
            step_detected: false,
            cycle_reset: false,
        }
    }

    fn fills(backend: &RecordingBackend) -> Vec<Rect> {
        backend
            .ops
            .iter()
            .filter_map(|op| match op {
                Op::Fill(rect) => Some(*rect),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_initial_face() {
        let face = WatchFace::new(&WatchConfig::default());
        assert_eq!(face.status_text(), "No data yet.");
        assert_eq!(face.clock_text(), "");
        assert_eq!(face.clock_rect(), Rect::new(0, 60, 144, 50));
        assert_eq!(face.progress().filled(), 0);
        assert!(face.is_dirty());
    }

    #[test]
    fn test_classification_updates_face() {
        let mut face = WatchFace::new(&WatchConfig::default());
        face.show_classification(&result(7, 102, 2));

        assert_eq!(face.status_text(), "Steps: 7");
        assert_eq!(face.clock_rect().y, 102);
        assert_eq!(face.progress().filled(), 2);
    }

    #[test]
    fn test_identical_result_keeps_face_clean() {
        let mut face = WatchFace::new(&WatchConfig::default());
        let mut backend = RecordingBackend::default();
        face.show_classification(&result(3, 80, 1));
        face.render(&mut backend).unwrap();
        assert!(!face.is_dirty());

        face.show_classification(&result(3, 80, 1));
        assert!(!face.is_dirty());

        face.show_classification(&result(4, 80, 1));
        assert!(face.is_dirty());
    }

    #[test]
    fn test_time_uses_style_and_offset() {
        let mut config = WatchConfig::default();
        config.clock.style = ClockStyle::TwelveHour;
        config.clock.epoch_offset_s = 3600;
        let mut face = WatchFace::new(&config);

        face.show_time(22 * 3600 + 30 * 60);
        assert_eq!(face.clock_text(), "11:30");

        face.show_time(23 * 3600);
        assert_eq!(face.clock_text(), "12:00");
    }

    #[test]
    fn test_tick_within_same_minute_is_clean() {
        let mut face = WatchFace::new(&WatchConfig::default());
        let mut backend = RecordingBackend::default();
        face.show_time(60);
        face.render(&mut backend).unwrap();

        face.show_time(61);
        assert!(!face.is_dirty());
        face.show_time(120);
        assert!(face.is_dirty());
    }

    #[test]
    fn test_render_draws_all_layers() {
        let mut face = WatchFace::new(&WatchConfig::default());
        face.show_classification(&result(12, 90, 1));
        face.show_time(9 * 3600 + 41 * 60);

        let mut backend = RecordingBackend::default();
        face.render(&mut backend).unwrap();

        assert_eq!(
            backend.ops,
            vec![
                Op::Clear,
                Op::Text(STATUS_RECT, "Steps: 12".into(), TextSize::Body, TextAlign::Left),
                Op::Stroke(Rect::new(0, 0, 144, 10)),
                Op::Fill(Rect::new(0, 0, 48, 10)),
                Op::Text(
                    Rect::new(0, 90, 144, 50),
                    "09:41".into(),
                    TextSize::Large,
                    TextAlign::Center
                ),
            ]
        );
    }

    #[test]
    fn test_progress_fill_widths() {
        for (level, expected) in [(1, 48), (2, 96), (3, 144), (9, 144)] {
            let mut face = WatchFace::new(&WatchConfig::default());
            face.show_classification(&result(0, 60, level));
            let mut backend = RecordingBackend::default();
            face.render(&mut backend).unwrap();
            assert_eq!(fills(&backend), vec![Rect::new(0, 0, expected, 10)]);
        }
    }

    #[test]
    fn test_empty_bar_not_filled() {
        let mut face = WatchFace::new(&WatchConfig::default());
        let mut backend = RecordingBackend::default();
        face.render(&mut backend).unwrap();
        assert!(fills(&backend).is_empty());
        assert!(backend.ops.contains(&Op::Stroke(PROGRESS_RECT)));
    }

    #[test]
    fn test_offscreen_label_skipped() {
        let mut face = WatchFace::new(&WatchConfig::default());
        face.show_time(0);
        face.show_classification(&result(0, -108, 0));

        let mut backend = RecordingBackend::default();
        face.render(&mut backend).unwrap();
        assert!(!backend
            .ops
            .iter()
            .any(|op| matches!(op, Op::Text(_, _, TextSize::Large, _))));
    }

    #[test]
    fn test_failed_render_stays_dirty() {
        let mut face = WatchFace::new(&WatchConfig::default());
        assert_eq!(face.render(&mut FailingBackend), Err(DisplayError::Communication));
        assert!(face.is_dirty());
    }

    #[test]
    fn test_forced_redraw_repeats_full_face() {
        let mut face = WatchFace::new(&WatchConfig::default());
        face.show_classification(&result(3, 70, 2));

        let mut first = RecordingBackend::default();
        face.render(&mut first).unwrap();
        assert!(!face.is_dirty());

        face.mark_dirty();
        assert!(face.is_dirty());

        let mut second = RecordingBackend::default();
        face.render(&mut second).unwrap();
        assert_eq!(second.ops, first.ops);
        assert!(!face.is_dirty());
    }
}
