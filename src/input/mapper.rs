//! Button Mask Encoding
//!
//! Maps mouse, legacy and touch button identification onto the canonical
//! wire bitmask:
//!
//! | Bit | Meaning                 |
//! |-----|-------------------------|
//! | 0   | Left button             |
//! | 1   | Middle button           |
//! | 2   | Right button            |
//! | 3   | Wheel up (Y negative)   |
//! | 4   | Wheel down (Y positive) |
//! | 5   | Wheel left (X negative) |
//! | 6   | Wheel right (X positive)|

use std::fmt;
use std::ops::{BitOr, BitOrAssign};

use serde::{Deserialize, Serialize};

use crate::input::error::{InputError, Result};
use crate::input::event::ButtonInfo;

/// Canonical button bitmask
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ButtonMask(u32);

impl ButtonMask {
    /// No buttons
    pub const NONE: Self = Self(0);
    /// Left button (bit 0)
    pub const LEFT: Self = Self(1 << 0);
    /// Middle button (bit 1)
    pub const MIDDLE: Self = Self(1 << 1);
    /// Right button (bit 2)
    pub const RIGHT: Self = Self(1 << 2);
    /// Wheel up (bit 3)
    pub const WHEEL_UP: Self = Self(1 << 3);
    /// Wheel down (bit 4)
    pub const WHEEL_DOWN: Self = Self(1 << 4);
    /// Wheel left (bit 5)
    pub const WHEEL_LEFT: Self = Self(1 << 5);
    /// Wheel right (bit 6)
    pub const WHEEL_RIGHT: Self = Self(1 << 6);

    /// Create a mask from raw bits
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    /// Raw bits
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Whether no bit is set
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Whether every bit of `other` is set
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Validate a touch button setting; only 0 (disabled), left, middle or
    /// right are accepted
    pub fn touch_button(bits: u32) -> Result<Self> {
        match bits {
            0 | 1 | 2 | 4 => Ok(Self(bits)),
            other => Err(InputError::InvalidTouchButton(other)),
        }
    }
}

impl BitOr for ButtonMask {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for ButtonMask {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl fmt::Display for ButtonMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:02X}", self.0)
    }
}

/// Encode a modern button index as `1 << index`
pub fn from_button_index(index: u8) -> ButtonMask {
    ButtonMask(1u32.checked_shl(u32::from(index)).unwrap_or(0))
}

/// Decompose a legacy bitfield. Legacy right (bit 1) and middle (bit 2) are
/// swapped relative to the canonical encoding.
pub fn from_legacy_buttons(buttons: u8) -> ButtonMask {
    let buttons = u32::from(buttons);
    let left = buttons & 0x1;
    let middle = (buttons & 0x4) >> 1;
    let right = (buttons & 0x2) << 1;
    ButtonMask(left | middle | right)
}

/// Encode the button of a raw press or release.
///
/// Touch events always map to `touch_button`, even when it is empty; whether
/// an empty mask suppresses the event is up to the caller.
pub fn encode(button: ButtonInfo, is_touch: bool, touch_button: ButtonMask) -> ButtonMask {
    if is_touch {
        return touch_button;
    }

    match button {
        ButtonInfo::Index(index) => from_button_index(index),
        ButtonInfo::Legacy(buttons) => from_legacy_buttons(buttons),
        ButtonInfo::Unknown => ButtonMask::NONE,
    }
}
