//! # lamco-pointer-input
//!
//! Pointer input normalization for remote desktop clients.
//!
//! Raw, device-dependent pointer input from the host (mouse buttons, legacy
//! button bitfields, touch taps, pixel/line wheel deltas) is reduced to the
//! two events a remote framebuffer protocol can carry:
//!
//! - button-mask press/release at a surface-relative position
//! - absolute move to a surface-relative position
//!
//! # Architecture
//!
//! ```text
//! lamco-pointer-input
//!   ├─> input    (coordinator, resolver, mask encoder, touch merger, wheel accumulator)
//!   ├─> driver   (tokio task owning a coordinator and its timers)
//!   ├─> replay   (deterministic replay of recorded host events)
//!   └─> config   (TOML configuration)
//! ```
//!
//! # Data Flow
//!
//! **Input Path:** Host → MouseCoordinator → on_button / on_move → Transport

#![warn(missing_docs)]
#![warn(clippy::all)]

/// Configuration
pub mod config;

/// Async driver
///
/// Runs a coordinator on a tokio task and turns timer deadlines into sleeps.
pub mod driver;

/// Pointer input normalization
pub mod input;

/// Replay of recorded host event streams
pub mod replay;
