//! Touch Double-Tap Merging
//!
//! Two taps on touch hardware rarely land on the same pixel. A press that
//! arrives within [`DOUBLE_TAP_WINDOW`] of the previous one and within
//! [`DOUBLE_TAP_DISTANCE`] physical pixels of it is snapped onto the earlier
//! position, so the pair reaches the remote side as a clean double click.

use std::time::{Duration, Instant};

use tracing::{debug, trace};

use crate::input::coordinates::{effective_pixel_ratio, Position};
use crate::input::timer::Timer;

/// How long a tap stays eligible for merging
pub const DOUBLE_TAP_WINDOW: Duration = Duration::from_millis(500);

/// Merge radius in CSS pixels, scaled by the device pixel ratio
pub const DOUBLE_TAP_DISTANCE: f64 = 20.0;

/// Double-tap merger state
#[derive(Debug, Default)]
pub struct TouchMerger {
    last_position: Option<Position>,
    expiry: Timer,
}

impl TouchMerger {
    /// Create an idle merger
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle a touch press and return the position to report.
    ///
    /// Idle: the press is recorded and returned unchanged. Pending: the
    /// expiry is cancelled and the press snaps onto the previous position when
    /// close enough. Both paths arm a fresh window.
    pub fn on_touch_press(&mut self, position: Position, pixel_ratio: f64, now: Instant) -> Position {
        self.poll(now);

        let effective = if self.expiry.cancel() {
            let last = self.last_position.unwrap_or(position);
            let distance = last.distance_to(position);
            let threshold = DOUBLE_TAP_DISTANCE * effective_pixel_ratio(pixel_ratio);

            if distance < threshold {
                debug!(
                    "Double tap merged: ({}, {}) -> ({}, {}), distance {:.1} < {:.1}",
                    position.x, position.y, last.x, last.y, distance, threshold
                );
                last
            } else {
                position
            }
        } else {
            position
        };

        self.last_position = Some(effective);
        self.expiry.arm(now, DOUBLE_TAP_WINDOW);
        trace!("Double tap window armed until {:?}", self.expiry.deadline());

        effective
    }

    /// Expire the merge window if its deadline has passed
    pub fn poll(&mut self, now: Instant) -> bool {
        if self.expiry.fire(now) {
            trace!("Double tap window expired");
            self.last_position = None;
            true
        } else {
            false
        }
    }

    /// Cancel the merge window and forget the last tap
    pub fn cancel(&mut self) -> bool {
        self.last_position = None;
        self.expiry.cancel()
    }

    /// Whether a merge window is open
    pub fn is_pending(&self) -> bool {
        self.expiry.is_armed()
    }

    /// Position of the last recorded tap
    pub fn last_position(&self) -> Option<Position> {
        self.last_position
    }

    /// Expiry of the merge window
    pub fn deadline(&self) -> Option<Instant> {
        self.expiry.deadline()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS_200: Duration = Duration::from_millis(200);

    #[test]
    fn test_first_tap_unchanged() {
        let mut merger = TouchMerger::new();
        let t = Instant::now();

        let pos = merger.on_touch_press(Position::new(100, 100), 1.0, t);
        assert_eq!(pos, Position::new(100, 100));
        assert!(merger.is_pending());
        assert_eq!(merger.deadline(), Some(t + DOUBLE_TAP_WINDOW));
    }

    #[test]
    fn test_close_second_tap_snaps() {
        let mut merger = TouchMerger::new();
        let t = Instant::now();

        merger.on_touch_press(Position::new(100, 100), 1.0, t);
        let pos = merger.on_touch_press(Position::new(105, 102), 1.0, t + MS_200);
        assert_eq!(pos, Position::new(100, 100));
    }

    #[test]
    fn test_identical_taps_snap() {
        let mut merger = TouchMerger::new();
        let t = Instant::now();

        merger.on_touch_press(Position::new(40, 40), 1.0, t);
        let pos = merger.on_touch_press(Position::new(40, 40), 1.0, t + MS_200);
        assert_eq!(pos, Position::new(40, 40));
    }

    #[test]
    fn test_far_second_tap_not_snapped() {
        let mut merger = TouchMerger::new();
        let t = Instant::now();

        merger.on_touch_press(Position::new(100, 100), 1.0, t);
        let pos = merger.on_touch_press(Position::new(120, 100), 1.0, t + MS_200);
        assert_eq!(pos, Position::new(120, 100));
        assert_eq!(merger.last_position(), Some(Position::new(120, 100)));
    }

    #[test]
    fn test_pixel_ratio_widens_radius() {
        let mut merger = TouchMerger::new();
        let t = Instant::now();

        merger.on_touch_press(Position::new(100, 100), 2.0, t);
        let pos = merger.on_touch_press(Position::new(130, 100), 2.0, t + MS_200);
        assert_eq!(pos, Position::new(100, 100));
    }

    #[test]
    fn test_invalid_pixel_ratio_defaults_to_one() {
        let mut merger = TouchMerger::new();
        let t = Instant::now();

        merger.on_touch_press(Position::new(100, 100), 0.0, t);
        let pos = merger.on_touch_press(Position::new(125, 100), 0.0, t + MS_200);
        assert_eq!(pos, Position::new(125, 100));
    }

    #[test]
    fn test_tap_after_window_starts_fresh() {
        let mut merger = TouchMerger::new();
        let t = Instant::now();

        merger.on_touch_press(Position::new(100, 100), 1.0, t);
        let pos = merger.on_touch_press(Position::new(101, 101), 1.0, t + DOUBLE_TAP_WINDOW);
        assert_eq!(pos, Position::new(101, 101));
    }

    #[test]
    fn test_poll_expires_window() {
        let mut merger = TouchMerger::new();
        let t = Instant::now();

        merger.on_touch_press(Position::new(100, 100), 1.0, t);
        assert!(!merger.poll(t + MS_200));
        assert!(merger.poll(t + DOUBLE_TAP_WINDOW));
        assert!(!merger.is_pending());
        assert_eq!(merger.last_position(), None);
    }

    #[test]
    fn test_second_tap_rearms_window() {
        let mut merger = TouchMerger::new();
        let t = Instant::now();

        merger.on_touch_press(Position::new(100, 100), 1.0, t);
        merger.on_touch_press(Position::new(102, 100), 1.0, t + MS_200);
        assert_eq!(merger.deadline(), Some(t + MS_200 + DOUBLE_TAP_WINDOW));

        let pos = merger.on_touch_press(Position::new(103, 100), 1.0, t + MS_200 + MS_200);
        assert_eq!(pos, Position::new(100, 100));
    }

    #[test]
    fn test_cancel() {
        let mut merger = TouchMerger::new();
        let t = Instant::now();

        merger.on_touch_press(Position::new(100, 100), 1.0, t);
        assert!(merger.cancel());
        assert!(!merger.cancel());

        let pos = merger.on_touch_press(Position::new(101, 100), 1.0, t + MS_200);
        assert_eq!(pos, Position::new(101, 100));
    }
}
