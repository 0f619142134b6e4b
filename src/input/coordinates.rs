//! Coordinate Resolution
//!
//! Maps raw client coordinates onto the target surface. Every coordinate is
//! clipped independently per axis so the resolved position always lies within
//! `[0, width - 1] x [0, height - 1]`.

use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::input::error::{InputError, Result};
use crate::input::event::ClientPoint;

/// Largest surface extent whose positions fit in `i32`
pub const MAX_EXTENT: f64 = i32::MAX as f64;

/// Bounding rectangle of the target surface in client coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge
    pub left: f64,
    /// Top edge
    pub top: f64,
    /// Width
    pub width: f64,
    /// Height
    pub height: f64,
}

impl Rect {
    /// Create a rectangle from origin and extent
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Right edge (exclusive)
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    /// Bottom edge (exclusive)
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Check the rectangle is usable for clipping.
    ///
    /// Resolved positions are `i32`, so extents above [`MAX_EXTENT`] are
    /// rejected. An unvalidated `Rect` used directly as geometry saturates
    /// at `i32::MAX` instead.
    pub fn validate(&self) -> Result<()> {
        let finite = [self.left, self.top, self.width, self.height]
            .iter()
            .all(|v| v.is_finite());
        if !finite {
            return Err(InputError::InvalidSurface(format!(
                "non-finite bounds {:?}",
                self
            )));
        }
        if self.width < 0.0 || self.height < 0.0 {
            return Err(InputError::InvalidSurface(format!(
                "negative extent {}x{}",
                self.width, self.height
            )));
        }
        if self.width > MAX_EXTENT || self.height > MAX_EXTENT {
            return Err(InputError::InvalidSurface(format!(
                "extent {}x{} exceeds {}",
                self.width, self.height, MAX_EXTENT
            )));
        }
        Ok(())
    }
}

/// Surface-relative pointer position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    /// X coordinate
    pub x: i32,
    /// Y coordinate
    pub y: i32,
}

impl Position {
    /// Create a new position
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another position
    pub fn distance_to(&self, other: Position) -> f64 {
        let dx = f64::from(self.x) - f64::from(other.x);
        let dy = f64::from(self.y) - f64::from(other.y);
        dx.hypot(dy)
    }
}

/// Geometry queries answered by the host for the target surface
pub trait SurfaceGeometry: Send + Sync {
    /// Current bounding rectangle in client coordinates
    fn bounds(&self) -> Rect;

    /// Device pixel ratio of the display showing the surface
    fn pixel_ratio(&self) -> f64 {
        1.0
    }
}

impl SurfaceGeometry for Rect {
    fn bounds(&self) -> Rect {
        *self
    }
}

#[derive(Debug)]
struct SurfaceState {
    bounds: Rect,
    pixel_ratio: f64,
}

/// Surface geometry shared with the host, updated on resize or DPI change
#[derive(Debug, Clone)]
pub struct SharedSurface {
    state: Arc<RwLock<SurfaceState>>,
}

impl SharedSurface {
    /// Create a shared surface
    pub fn new(bounds: Rect, pixel_ratio: f64) -> Result<Self> {
        bounds.validate()?;
        Ok(Self {
            state: Arc::new(RwLock::new(SurfaceState {
                bounds,
                pixel_ratio,
            })),
        })
    }

    /// Replace the bounding rectangle
    pub fn set_bounds(&self, bounds: Rect) -> Result<()> {
        bounds.validate()?;
        self.state.write().bounds = bounds;
        Ok(())
    }

    /// Replace the device pixel ratio
    pub fn set_pixel_ratio(&self, ratio: f64) {
        self.state.write().pixel_ratio = ratio;
    }
}

impl SurfaceGeometry for SharedSurface {
    fn bounds(&self) -> Rect {
        self.state.read().bounds
    }

    fn pixel_ratio(&self) -> f64 {
        self.state.read().pixel_ratio
    }
}

/// Pixel ratio with unusable host values replaced by 1
pub fn effective_pixel_ratio(ratio: f64) -> f64 {
    if ratio.is_finite() && ratio > 0.0 {
        ratio
    } else {
        1.0
    }
}

/// Clip one axis: below `min` maps to 0, at or past `min + extent` maps to
/// `extent - 1`, anything else is made relative to `min`.
pub fn clip_axis(coord: f64, min: f64, extent: f64) -> i32 {
    let last = (extent - 1.0).max(0.0).floor();
    if coord.is_nan() || coord < min {
        0
    } else if coord >= min + extent {
        last as i32
    } else {
        (coord - min).floor().clamp(0.0, last) as i32
    }
}

/// Resolve a client point against the target bounds
pub fn resolve(point: ClientPoint, bounds: &Rect) -> Position {
    Position {
        x: clip_axis(point.x, bounds.left, bounds.width),
        y: clip_axis(point.y, bounds.top, bounds.height),
    }
}
