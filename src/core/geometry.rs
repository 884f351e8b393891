//! Mapping between timeline minutes and widget pixels.
//!
//! Everything here is pure and recomputed on every paint; nothing is cached
//! across frames.

use crate::constants::{BAR_HEIGHT_PX, BAR_MARGIN_PX};
use crate::state::Segment;

/// Axis-aligned rectangle in widget coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Edges count as inside.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x && x <= self.right() && y >= self.y && y <= self.bottom()
    }
}

/// Layout of the horizontal bar inside a widget of a given size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarGeometry {
    total_minutes: u32,
    widget_width: f64,
    widget_height: f64,
    margin: f64,
    bar_height: f64,
}

impl BarGeometry {
    pub fn new(total_minutes: u32, widget_width: f64, widget_height: f64) -> Self {
        Self {
            total_minutes: total_minutes.max(1),
            widget_width,
            widget_height,
            margin: BAR_MARGIN_PX,
            bar_height: BAR_HEIGHT_PX,
        }
    }

    pub fn total_minutes(&self) -> u32 {
        self.total_minutes
    }

    pub fn widget_width(&self) -> f64 {
        self.widget_width
    }

    pub fn widget_height(&self) -> f64 {
        self.widget_height
    }

    pub fn margin(&self) -> f64 {
        self.margin
    }

    pub fn bar_height(&self) -> f64 {
        self.bar_height
    }

    /// Usable bar width; a widget narrower than both margins yields 0.
    pub fn bar_pixel_width(&self) -> f64 {
        (self.widget_width - 2.0 * self.margin).max(0.0)
    }

    /// Top edge of the bar, centered vertically (integer halves, like the
    /// widget's own pixel grid).
    pub fn bar_y(&self) -> f64 {
        (self.widget_height / 2.0).floor() - (self.bar_height / 2.0).floor()
    }

    pub fn bar_rect(&self) -> Rect {
        Rect::new(self.margin, self.bar_y(), self.bar_pixel_width(), self.bar_height)
    }

    /// Pixel width of a span of `minutes`.
    pub fn span_width(&self, minutes: u32) -> f64 {
        f64::from(minutes) / f64::from(self.total_minutes) * self.bar_pixel_width()
    }

    pub fn x_of(&self, minute: f64) -> f64 {
        self.margin + minute / f64::from(self.total_minutes) * self.bar_pixel_width()
    }

    /// Inverse of [`x_of`](Self::x_of). A collapsed bar maps everything to 0.
    pub fn minute_of(&self, x: f64) -> f64 {
        let width = self.bar_pixel_width();
        if width <= 0.0 {
            return 0.0;
        }
        (x - self.margin) / width * f64::from(self.total_minutes)
    }

    pub fn segment_rect(&self, segment: &Segment) -> Rect {
        let x_start = self.x_of(f64::from(segment.start));
        let x_end = self.x_of(f64::from(segment.end()));
        Rect::new(x_start, self.bar_y(), x_end - x_start, self.bar_height)
    }

    /// Index of the first segment whose rectangle contains the point.
    pub fn hit_test(&self, segments: &[Segment], x: f64, y: f64) -> Option<usize> {
        segments
            .iter()
            .position(|segment| self.segment_rect(segment).contains(x, y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::color::harmonic_color;

    fn segment(start: u32, duration: u32) -> Segment {
        Segment::new(start, duration, "S", harmonic_color(0))
    }

    #[test]
    fn test_bar_layout() {
        let geometry = BarGeometry::new(120, 1300.0, 340.0);
        assert_eq!(geometry.bar_pixel_width(), 1140.0);
        assert_eq!(geometry.bar_y(), 110.0);
        assert_eq!(geometry.x_of(0.0), 80.0);
        assert_eq!(geometry.x_of(120.0), 1220.0);
        assert_eq!(geometry.x_of(60.0), 650.0);
    }

    #[test]
    fn test_odd_height_uses_integer_halves() {
        let geometry = BarGeometry::new(60, 400.0, 341.0);
        assert_eq!(geometry.bar_y(), 110.0);
    }

    #[test]
    fn test_segment_rect() {
        let geometry = BarGeometry::new(100, 1160.0, 340.0);
        let rect = geometry.segment_rect(&segment(10, 20));
        assert_eq!(rect.x, 180.0);
        assert_eq!(rect.width, 200.0);
        assert_eq!(rect.y, 110.0);
        assert_eq!(rect.height, 120.0);
    }

    #[test]
    fn test_narrow_widget_collapses_to_zero_width() {
        let geometry = BarGeometry::new(100, 100.0, 340.0);
        assert_eq!(geometry.bar_pixel_width(), 0.0);
        assert_eq!(geometry.x_of(50.0), 80.0);
        assert_eq!(geometry.minute_of(200.0), 0.0);
    }

    #[test]
    fn test_minute_round_trip() {
        for width in [161.0, 640.0, 1300.0, 2733.5] {
            let geometry = BarGeometry::new(97, width, 340.0);
            for (start, duration) in [(0, 1), (13, 29), (42, 55)] {
                let s = segment(start, duration);
                let back_start = geometry.minute_of(geometry.x_of(f64::from(s.start)));
                let back_end = geometry.minute_of(geometry.x_of(f64::from(s.end())));
                assert!((back_start - f64::from(s.start)).abs() < 1e-9);
                assert!((back_end - f64::from(s.end())).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn test_hit_test_prefers_first_on_shared_edge() {
        let geometry = BarGeometry::new(100, 1160.0, 340.0);
        let segments = vec![segment(0, 10), segment(10, 20)];
        assert_eq!(geometry.hit_test(&segments, 130.0, 150.0), Some(0));
        assert_eq!(geometry.hit_test(&segments, 180.0, 150.0), Some(0));
        assert_eq!(geometry.hit_test(&segments, 181.0, 150.0), Some(1));
        assert_eq!(geometry.hit_test(&segments, 181.0, 50.0), None);
        assert_eq!(geometry.hit_test(&segments, 500.0, 150.0), None);
    }
}
