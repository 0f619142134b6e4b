//! Pointer Event Types
//!
//! Raw host events as delivered by the embedding environment, and the
//! normalized events handed to the transport.

use serde::{Deserialize, Serialize};

use crate::input::listener::HostEventKind;
use crate::input::mapper::ButtonMask;

/// Absolute client coordinates reported by the host
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ClientPoint {
    /// Horizontal client coordinate
    pub x: f64,
    /// Vertical client coordinate
    pub y: f64,
}

impl ClientPoint {
    /// Create a new client point
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Button identification carried by a raw press/release
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ButtonInfo {
    /// Modern button index (0 = left, 1 = middle, 2 = right)
    Index(u8),
    /// Legacy bitfield (bit 0 = left, bit 1 = right, bit 2 = middle)
    Legacy(u8),
    /// No recognizable button information
    #[default]
    Unknown,
}

/// Touch point lists attached to a touch event
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TouchData {
    /// Points currently on the surface
    #[serde(default)]
    pub touches: Vec<ClientPoint>,
    /// Points that changed in this event
    #[serde(default)]
    pub changed_touches: Vec<ClientPoint>,
}

impl TouchData {
    /// Touch data with a single changed point
    pub fn single(point: ClientPoint) -> Self {
        Self {
            touches: vec![point],
            changed_touches: vec![point],
        }
    }

    /// First changed touch, falling back to the first active touch
    pub fn primary_point(&self) -> Option<ClientPoint> {
        self.changed_touches
            .first()
            .or_else(|| self.touches.first())
            .copied()
    }
}

/// Raw press, release or motion event
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RawPointerEvent {
    /// Client coordinates of the event
    pub client: ClientPoint,
    /// Button information, ignored for motion
    #[serde(default)]
    pub button: ButtonInfo,
    /// Touch lists; present only for touch-originated events
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub touch: Option<TouchData>,
}

impl RawPointerEvent {
    /// Mouse event with no button information
    pub fn at(x: f64, y: f64) -> Self {
        Self {
            client: ClientPoint::new(x, y),
            ..Self::default()
        }
    }

    /// Mouse event using the modern button index
    pub fn mouse(x: f64, y: f64, button: u8) -> Self {
        Self {
            client: ClientPoint::new(x, y),
            button: ButtonInfo::Index(button),
            touch: None,
        }
    }

    /// Mouse event using the legacy button bitfield
    pub fn legacy(x: f64, y: f64, buttons: u8) -> Self {
        Self {
            client: ClientPoint::new(x, y),
            button: ButtonInfo::Legacy(buttons),
            touch: None,
        }
    }

    /// Single-finger touch event
    pub fn touch(x: f64, y: f64) -> Self {
        let point = ClientPoint::new(x, y);
        Self {
            client: point,
            button: ButtonInfo::Unknown,
            touch: Some(TouchData::single(point)),
        }
    }

    /// Whether the event originated from a touch surface
    pub fn is_touch(&self) -> bool {
        self.touch.is_some()
    }

    /// Coordinates used for position resolution
    pub fn point(&self) -> ClientPoint {
        self.touch
            .as_ref()
            .and_then(TouchData::primary_point)
            .unwrap_or(self.client)
    }
}

/// Unit of a wheel delta
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeltaMode {
    /// Deltas are in pixels
    #[default]
    Pixel,
    /// Deltas are in lines
    Line,
    /// Deltas are in pages
    Page,
}

/// Raw wheel event
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RawWheelEvent {
    /// Client coordinates of the event
    pub client: ClientPoint,
    /// Horizontal delta
    #[serde(default)]
    pub delta_x: f64,
    /// Vertical delta
    #[serde(default)]
    pub delta_y: f64,
    /// Unit of both deltas
    #[serde(default)]
    pub delta_mode: DeltaMode,
}

impl RawWheelEvent {
    /// Wheel event with pixel deltas
    pub fn pixels(x: f64, y: f64, delta_x: f64, delta_y: f64) -> Self {
        Self {
            client: ClientPoint::new(x, y),
            delta_x,
            delta_y,
            delta_mode: DeltaMode::Pixel,
        }
    }

    /// Wheel event with line deltas
    pub fn lines(x: f64, y: f64, delta_x: f64, delta_y: f64) -> Self {
        Self {
            delta_mode: DeltaMode::Line,
            ..Self::pixels(x, y, delta_x, delta_y)
        }
    }
}

/// Event delivered by the host to a grabbed coordinator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HostEvent {
    /// Mouse button or touch press
    ButtonDown(RawPointerEvent),
    /// Mouse button or touch release
    ButtonUp(RawPointerEvent),
    /// Mouse or touch motion
    Move(RawPointerEvent),
    /// Wheel scroll
    Wheel(RawWheelEvent),
    /// Document-level click
    Click {
        /// Whether the click was aimed at the target surface
        on_target: bool,
    },
    /// Context menu request
    ContextMenu {
        /// Whether the request was aimed at the target surface
        on_target: bool,
    },
}

impl HostEvent {
    /// Listener kind that delivers this event
    pub fn kind(&self) -> HostEventKind {
        match self {
            HostEvent::ButtonDown(e) => button_kind(e.is_touch(), true),
            HostEvent::ButtonUp(e) => button_kind(e.is_touch(), false),
            HostEvent::Move(e) => move_kind(e.is_touch()),
            HostEvent::Wheel(_) => HostEventKind::Wheel,
            HostEvent::Click { .. } => HostEventKind::Click,
            HostEvent::ContextMenu { .. } => HostEventKind::ContextMenu,
        }
    }
}

pub(crate) fn button_kind(is_touch: bool, down: bool) -> HostEventKind {
    match (is_touch, down) {
        (true, true) => HostEventKind::TouchStart,
        (true, false) => HostEventKind::TouchEnd,
        (false, true) => HostEventKind::MouseDown,
        (false, false) => HostEventKind::MouseUp,
    }
}

pub(crate) fn move_kind(is_touch: bool) -> HostEventKind {
    if is_touch {
        HostEventKind::TouchMove
    } else {
        HostEventKind::MouseMove
    }
}

/// Whether the host should stop default handling of an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Propagation {
    /// Event consumed; stop propagation and default action
    Stop,
    /// Event ignored; let the host handle it
    Continue,
}

/// Normalized event for the wire protocol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PointerEvent {
    /// Button press or release
    Button {
        /// Surface-relative X
        x: i32,
        /// Surface-relative Y
        y: i32,
        /// Press (true) or release (false)
        down: bool,
        /// Button mask for this event
        mask: ButtonMask,
    },
    /// Absolute pointer motion
    Move {
        /// Surface-relative X
        x: i32,
        /// Surface-relative Y
        y: i32,
    },
}
