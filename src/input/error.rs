//! Input Handling Error Types
//!
//! Event processing never fails: malformed host input degrades to "no event
//! emitted". Errors only surface from configuration setters and from the
//! async driver handle.

use thiserror::Error;

/// Result type for input operations
pub type Result<T> = std::result::Result<T, InputError>;

/// Input module error types
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InputError {
    /// Touch button mask outside of {0, 1, 2, 4}
    #[error("Invalid touch button mask: {0} (expected 0, 1, 2 or 4)")]
    InvalidTouchButton(u32),

    /// Surface geometry that cannot be used for clipping
    #[error("Invalid surface geometry: {0}")]
    InvalidSurface(String),

    /// The driver task has stopped and no longer accepts commands
    #[error("Pointer driver is closed")]
    DriverClosed,
}

/// Error classification for callers deciding how to react
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorType {
    /// Rejected configuration value, previous value still in effect
    Configuration,
    /// Driver lifecycle errors
    Lifecycle,
}

/// Classify error
pub fn classify_error(error: &InputError) -> ErrorType {
    match error {
        InputError::InvalidTouchButton(_) | InputError::InvalidSurface(_) => {
            ErrorType::Configuration
        }
        InputError::DriverClosed => ErrorType::Lifecycle,
    }
}
