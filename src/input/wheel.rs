//! Wheel Step Accumulation
//!
//! The wire protocol only knows discrete wheel clicks, so continuous wheel
//! deltas are accumulated per axis and quantized into step events. An axis
//! steps immediately once its accumulated delta exceeds
//! [`WHEEL_STEP_THRESHOLD`]; otherwise a flush after [`WHEEL_STEP_TIMEOUT`]
//! emits whatever has accumulated, so slow scrolling is never dropped.

use std::time::{Duration, Instant};

use tracing::{debug, trace};

use crate::input::coordinates::Position;
use crate::input::event::DeltaMode;
use crate::input::mapper::ButtonMask;
use crate::input::timer::{earliest, Timer};

/// Accumulated pixels required for an immediate step
pub const WHEEL_STEP_THRESHOLD: f64 = 10.0;

/// Delay before accumulated motion is flushed
pub const WHEEL_STEP_TIMEOUT: Duration = Duration::from_millis(50);

/// Pixels per line for line and page delta modes
pub const WHEEL_LINE_HEIGHT: f64 = 19.0;

/// Wheel axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WheelAxis {
    /// Horizontal
    X,
    /// Vertical
    Y,
}

impl WheelAxis {
    /// Mask for a step in the negative direction
    pub fn negative_mask(self) -> ButtonMask {
        match self {
            WheelAxis::X => ButtonMask::WHEEL_LEFT,
            WheelAxis::Y => ButtonMask::WHEEL_UP,
        }
    }

    /// Mask for a step in the positive direction
    pub fn positive_mask(self) -> ButtonMask {
        match self {
            WheelAxis::X => ButtonMask::WHEEL_RIGHT,
            WheelAxis::Y => ButtonMask::WHEEL_DOWN,
        }
    }
}

/// One discrete wheel click, reported as a press+release of `mask`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WheelStep {
    /// Axis that stepped
    pub axis: WheelAxis,
    /// Position recorded with the last delta on this axis
    pub position: Position,
    /// Direction mask
    pub mask: ButtonMask,
}

/// Per-axis accumulator
#[derive(Debug)]
struct AxisState {
    axis: WheelAxis,
    accumulated: f64,
    flush: Timer,
    last_position: Position,
}

impl AxisState {
    fn new(axis: WheelAxis) -> Self {
        Self {
            axis,
            accumulated: 0.0,
            flush: Timer::new(),
            last_position: Position::default(),
        }
    }

    fn accumulate(&mut self, delta: f64, position: Position, now: Instant) -> Option<WheelStep> {
        self.flush.cancel();

        self.accumulated += delta;
        self.last_position = position;

        if self.accumulated.abs() > WHEEL_STEP_THRESHOLD {
            self.step()
        } else {
            self.flush.arm(now, WHEEL_STEP_TIMEOUT);
            trace!(
                "Wheel {:?} flush armed, accumulated {:.2}",
                self.axis,
                self.accumulated
            );
            None
        }
    }

    /// Emit a step for the accumulated direction and reset
    fn step(&mut self) -> Option<WheelStep> {
        let mask = if self.accumulated < 0.0 {
            Some(self.axis.negative_mask())
        } else if self.accumulated > 0.0 {
            Some(self.axis.positive_mask())
        } else {
            None
        };
        self.accumulated = 0.0;

        mask.map(|mask| {
            debug!(
                "Wheel step {:?} at ({}, {}) mask {}",
                self.axis, self.last_position.x, self.last_position.y, mask
            );
            WheelStep {
                axis: self.axis,
                position: self.last_position,
                mask,
            }
        })
    }

    fn poll(&mut self, now: Instant) -> Option<WheelStep> {
        if self.flush.fire(now) {
            self.step()
        } else {
            None
        }
    }

    fn reset(&mut self) -> bool {
        self.accumulated = 0.0;
        self.flush.cancel()
    }
}

/// Two-axis wheel accumulator
#[derive(Debug)]
pub struct WheelAccumulator {
    x: AxisState,
    y: AxisState,
}

impl WheelAccumulator {
    /// Create an accumulator with both axes at rest
    pub fn new() -> Self {
        Self {
            x: AxisState::new(WheelAxis::X),
            y: AxisState::new(WheelAxis::Y),
        }
    }

    /// Feed one wheel event. Returns the steps that fire immediately, at most
    /// one per axis; axes that stay below the threshold get a flush armed.
    pub fn on_wheel(
        &mut self,
        delta_x: f64,
        delta_y: f64,
        mode: DeltaMode,
        position: Position,
        now: Instant,
    ) -> Vec<WheelStep> {
        let mut steps = self.poll(now);

        let scale = match mode {
            DeltaMode::Pixel => 1.0,
            DeltaMode::Line | DeltaMode::Page => WHEEL_LINE_HEIGHT,
        };

        steps.extend(self.x.accumulate(finite(delta_x) * scale, position, now));
        steps.extend(self.y.accumulate(finite(delta_y) * scale, position, now));
        steps
    }

    /// Flush every axis whose timer is due
    pub fn poll(&mut self, now: Instant) -> Vec<WheelStep> {
        let mut steps = Vec::new();
        steps.extend(self.x.poll(now));
        steps.extend(self.y.poll(now));
        steps
    }

    /// Cancel both flush timers and zero both accumulators. Returns the number
    /// of timers that were armed.
    pub fn reset(&mut self) -> usize {
        usize::from(self.x.reset()) + usize::from(self.y.reset())
    }

    /// Accumulated delta on an axis, in pixels
    pub fn accumulated(&self, axis: WheelAxis) -> f64 {
        self.axis(axis).accumulated
    }

    /// Whether an axis has a flush pending
    pub fn is_pending(&self, axis: WheelAxis) -> bool {
        self.axis(axis).flush.is_armed()
    }

    /// Earliest pending flush
    pub fn deadline(&self) -> Option<Instant> {
        earliest(self.x.flush.deadline(), self.y.flush.deadline())
    }

    /// Number of armed flush timers
    pub fn pending_timers(&self) -> usize {
        usize::from(self.x.flush.is_armed()) + usize::from(self.y.flush.is_armed())
    }

    fn axis(&self, axis: WheelAxis) -> &AxisState {
        match axis {
            WheelAxis::X => &self.x,
            WheelAxis::Y => &self.y,
        }
    }
}

impl Default for WheelAccumulator {
    fn default() -> Self {
        Self::new()
    }
}

fn finite(delta: f64) -> f64 {
    if delta.is_finite() {
        delta
    } else {
        0.0
    }
}
