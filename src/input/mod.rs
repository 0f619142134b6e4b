//! Pointer Input Normalization
//!
//! Translates raw host pointer input (mouse buttons, touch taps, wheel deltas)
//! into the two events a remote desktop wire protocol understands: button-mask
//! press/release and absolute move.
//!
//! # Architecture
//!
//! ```text
//! Host Events (mousedown, touchstart, wheel, ...)
//!       ↓
//! ┌─────────────────────────┐
//! │  MouseCoordinator       │ ← focus gate, grab lifecycle
//! └─────────────────────────┘
//!       ↓
//! ┌─────────────────────────┐
//! │  Position Resolver      │ ← clip to target surface
//! └─────────────────────────┘
//!       ↓            ↓              ↓
//! ┌──────────┐ ┌────────────┐ ┌──────────────┐
//! │  Touch   │ │   Button   │ │    Wheel     │
//! │  Merger  │ │   Mapper   │ │ Accumulator  │
//! └──────────┘ └────────────┘ └──────────────┘
//!       ↓
//! on_button(x, y, down, mask) / on_move(x, y)
//! ```
//!
//! # Usage Example
//!
//! ```rust
//! use std::sync::Arc;
//! use std::time::Instant;
//! use lamco_pointer_input::input::{
//!     ListenerSet, MouseCoordinator, MouseOptions, RawWheelEvent, Rect,
//! };
//!
//! let target = Arc::new(Rect::new(0.0, 0.0, 1024.0, 768.0));
//! let mut mouse = MouseCoordinator::new(target, MouseOptions::default());
//! mouse.set_on_button(|x, y, down, mask| {
//!     println!("button ({x}, {y}) down={down} mask={mask}");
//! });
//!
//! let mut listeners = ListenerSet::new();
//! mouse.grab(&mut listeners);
//!
//! // One wheel notch down: a press+release of bit 4
//! mouse.handle_wheel(&RawWheelEvent::pixels(100.0, 100.0, 0.0, 53.0), Instant::now());
//!
//! mouse.ungrab(&mut listeners);
//! ```

pub mod coordinates;
pub mod error;
pub mod event;
pub mod listener;
pub mod mapper;
pub mod mouse;
pub mod timer;
pub mod touch;
pub mod wheel;

pub use coordinates::{Position, Rect, SharedSurface, SurfaceGeometry};
pub use error::{InputError, Result};
pub use event::{
    ButtonInfo, ClientPoint, DeltaMode, HostEvent, PointerEvent, Propagation, RawPointerEvent,
    RawWheelEvent, TouchData,
};
pub use listener::{HostEventKind, Listener, ListenerRegistry, ListenerScope, ListenerSet};
pub use mapper::ButtonMask;
pub use mouse::{MouseCoordinator, MouseOptions, PointerStats};
pub use timer::Timer;
pub use touch::TouchMerger;
pub use wheel::{WheelAccumulator, WheelAxis, WheelStep};
