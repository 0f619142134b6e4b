//! Mouse Coordinator
//!
//! Receives raw host events for one target surface and turns them into
//! button-mask and absolute-move callbacks. Owns the double-tap merger, the
//! wheel accumulator and the grab lifecycle.
//!
//! All handlers are synchronous and take the current time explicitly. Timers
//! are deadlines: the host calls [`MouseCoordinator::poll_timers`] once
//! [`MouseCoordinator::next_deadline`] has passed.

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info};

use crate::input::coordinates::{resolve, Position, SurfaceGeometry};
use crate::input::error::Result;
use crate::input::event::{
    button_kind, move_kind, HostEvent, Propagation, RawPointerEvent, RawWheelEvent,
};
use crate::input::listener::{grab_listeners, HostEventKind, Listener, ListenerRegistry};
use crate::input::mapper::{self, ButtonMask};
use crate::input::timer::earliest;
use crate::input::touch::TouchMerger;
use crate::input::wheel::{WheelAccumulator, WheelStep};

/// Button callback: `(x, y, down, mask)`
pub type ButtonCallback = Box<dyn FnMut(i32, i32, bool, ButtonMask) + Send>;

/// Move callback: `(x, y)`
pub type MoveCallback = Box<dyn FnMut(i32, i32) + Send>;

/// Called with the event kind before every processed pointer event
pub type NotifyCallback = Box<dyn FnMut(HostEventKind) + Send>;

/// Runtime options of a coordinator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseOptions {
    /// Process events at all
    pub focused: bool,
    /// Mask reported for every touch press and release; empty disables touch clicks
    pub touch_button: ButtonMask,
    /// Attach touch listeners on grab
    pub touch_capable: bool,
}

impl Default for MouseOptions {
    fn default() -> Self {
        Self {
            focused: true,
            touch_button: ButtonMask::LEFT,
            touch_capable: false,
        }
    }
}

/// Event counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PointerStats {
    /// Pointer events that passed the focus gate
    pub events_processed: u64,
    /// Pointer events dropped by the focus gate
    pub events_ignored: u64,
    /// Button callbacks delivered, wheel steps included
    pub buttons_emitted: u64,
    /// Move callbacks delivered
    pub moves_emitted: u64,
    /// Wheel steps emitted
    pub wheel_steps: u64,
    /// Touch presses snapped onto a previous tap
    pub taps_snapped: u64,
}

/// Pointer event coordinator for a single target surface
pub struct MouseCoordinator {
    target: Arc<dyn SurfaceGeometry>,
    options: MouseOptions,

    on_button: Option<ButtonCallback>,
    on_move: Option<MoveCallback>,
    on_notify: Option<NotifyCallback>,

    touch: TouchMerger,
    wheel: WheelAccumulator,

    /// Listeners attached by the current grab
    grabbed: Option<Vec<Listener>>,

    stats: PointerStats,
}

impl MouseCoordinator {
    /// Create a coordinator for `target`
    pub fn new(target: Arc<dyn SurfaceGeometry>, options: MouseOptions) -> Self {
        Self {
            target,
            options,
            on_button: None,
            on_move: None,
            on_notify: None,
            touch: TouchMerger::new(),
            wheel: WheelAccumulator::new(),
            grabbed: None,
            stats: PointerStats::default(),
        }
    }

    /// Target surface
    pub fn target(&self) -> &Arc<dyn SurfaceGeometry> {
        &self.target
    }

    /// Current options
    pub fn options(&self) -> MouseOptions {
        self.options
    }

    /// Whether events are processed
    pub fn focused(&self) -> bool {
        self.options.focused
    }

    /// Enable or disable event processing
    pub fn set_focused(&mut self, focused: bool) {
        self.options.focused = focused;
    }

    /// Mask used for touch presses
    pub fn touch_button(&self) -> ButtonMask {
        self.options.touch_button
    }

    /// Set the touch button mask (0, 1, 2 or 4). Invalid values are rejected
    /// and the previous mask stays in effect.
    pub fn set_touch_button(&mut self, bits: u32) -> Result<()> {
        self.options.touch_button = ButtonMask::touch_button(bits)?;
        Ok(())
    }

    /// Register the button callback
    pub fn set_on_button(&mut self, callback: impl FnMut(i32, i32, bool, ButtonMask) + Send + 'static) {
        self.on_button = Some(Box::new(callback));
    }

    /// Register the move callback
    pub fn set_on_move(&mut self, callback: impl FnMut(i32, i32) + Send + 'static) {
        self.on_move = Some(Box::new(callback));
    }

    /// Register the notify hook
    pub fn set_on_notify(&mut self, callback: impl FnMut(HostEventKind) + Send + 'static) {
        self.on_notify = Some(Box::new(callback));
    }

    /// Drop all registered callbacks
    pub fn clear_callbacks(&mut self) {
        self.on_button = None;
        self.on_move = None;
        self.on_notify = None;
    }

    /// Event counters
    pub fn stats(&self) -> PointerStats {
        self.stats
    }

    /// Whether listeners are attached
    pub fn is_grabbed(&self) -> bool {
        self.grabbed.is_some()
    }

    /// Attach all listeners. Grabbing twice is a no-op.
    pub fn grab(&mut self, registry: &mut dyn ListenerRegistry) {
        if self.grabbed.is_some() {
            debug!("Pointer already grabbed");
            return;
        }

        let listeners = grab_listeners(self.options.touch_capable);
        for listener in &listeners {
            registry.attach(*listener);
        }
        info!("Pointer grabbed ({} listeners)", listeners.len());
        self.grabbed = Some(listeners);
    }

    /// Detach listeners and cancel every pending timer. Safe to call
    /// repeatedly.
    pub fn ungrab(&mut self, registry: &mut dyn ListenerRegistry) {
        if let Some(listeners) = self.grabbed.take() {
            for listener in listeners.iter().rev() {
                registry.detach(*listener);
            }
            info!("Pointer released ({} listeners)", listeners.len());
        }

        let cancelled = self.cancel_timers();
        if cancelled > 0 {
            debug!("Cancelled {} pending pointer timers", cancelled);
        }
    }

    /// Dispatch a host event to its handler
    pub fn handle_event(&mut self, event: &HostEvent, now: Instant) -> Propagation {
        match event {
            HostEvent::ButtonDown(e) => self.handle_button(e, true, now),
            HostEvent::ButtonUp(e) => self.handle_button(e, false, now),
            HostEvent::Move(e) => self.handle_move(e),
            HostEvent::Wheel(e) => self.handle_wheel(e, now),
            HostEvent::Click { on_target } | HostEvent::ContextMenu { on_target } => {
                self.handle_suppressor(*on_target)
            }
        }
    }

    /// Handle a press or release
    pub fn handle_button(&mut self, event: &RawPointerEvent, down: bool, now: Instant) -> Propagation {
        let is_touch = event.is_touch();
        if !self.accept(button_kind(is_touch, down)) {
            return Propagation::Continue;
        }

        let mut position = resolve(event.point(), &self.target.bounds());

        if is_touch && down {
            let merged = self
                .touch
                .on_touch_press(position, self.target.pixel_ratio(), now);
            if merged != position {
                self.stats.taps_snapped += 1;
            }
            position = merged;
        }

        let mask = mapper::encode(event.button, is_touch, self.options.touch_button);

        debug!(
            "Pointer button {}: ({}, {}) mask {}{}",
            if down { "down" } else { "up" },
            position.x,
            position.y,
            mask,
            if is_touch { " (touch)" } else { "" }
        );

        if is_touch && mask.is_empty() {
            debug!("Touch clicks disabled, dropping button event");
        } else {
            self.emit_button(position, down, mask);
        }

        Propagation::Stop
    }

    /// Handle motion
    pub fn handle_move(&mut self, event: &RawPointerEvent) -> Propagation {
        if !self.accept(move_kind(event.is_touch())) {
            return Propagation::Continue;
        }

        let position = resolve(event.point(), &self.target.bounds());
        if let Some(on_move) = self.on_move.as_mut() {
            on_move(position.x, position.y);
            self.stats.moves_emitted += 1;
        }

        Propagation::Stop
    }

    /// Handle a wheel event
    pub fn handle_wheel(&mut self, event: &RawWheelEvent, now: Instant) -> Propagation {
        if !self.accept(HostEventKind::Wheel) {
            return Propagation::Continue;
        }

        let position = resolve(event.client, &self.target.bounds());
        let steps = self
            .wheel
            .on_wheel(event.delta_x, event.delta_y, event.delta_mode, position, now);
        self.emit_steps(steps);

        Propagation::Stop
    }

    /// Swallow clicks and context menus aimed at the target surface
    pub fn handle_suppressor(&mut self, on_target: bool) -> Propagation {
        if on_target {
            Propagation::Stop
        } else {
            Propagation::Continue
        }
    }

    /// Fire every timer whose deadline has passed
    pub fn poll_timers(&mut self, now: Instant) {
        self.touch.poll(now);
        let steps = self.wheel.poll(now);
        self.emit_steps(steps);
    }

    /// Earliest pending timer deadline
    pub fn next_deadline(&self) -> Option<Instant> {
        earliest(self.touch.deadline(), self.wheel.deadline())
    }

    /// Number of armed timers
    pub fn pending_timers(&self) -> usize {
        usize::from(self.touch.is_pending()) + self.wheel.pending_timers()
    }

    fn cancel_timers(&mut self) -> usize {
        usize::from(self.touch.cancel()) + self.wheel.reset()
    }

    /// Focus gate, notify hook and counters shared by all pointer handlers
    fn accept(&mut self, kind: HostEventKind) -> bool {
        if !self.options.focused {
            self.stats.events_ignored += 1;
            return false;
        }

        self.stats.events_processed += 1;
        if let Some(on_notify) = self.on_notify.as_mut() {
            on_notify(kind);
        }
        true
    }

    fn emit_steps(&mut self, steps: Vec<WheelStep>) {
        for step in steps {
            self.stats.wheel_steps += 1;
            self.emit_button(step.position, true, step.mask);
            self.emit_button(step.position, false, step.mask);
        }
    }

    fn emit_button(&mut self, position: Position, down: bool, mask: ButtonMask) {
        if let Some(on_button) = self.on_button.as_mut() {
            on_button(position.x, position.y, down, mask);
            self.stats.buttons_emitted += 1;
        }
    }
}

impl fmt::Debug for MouseCoordinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MouseCoordinator")
            .field("bounds", &self.target.bounds())
            .field("options", &self.options)
            .field("touch", &self.touch)
            .field("wheel", &self.wheel)
            .field("grabbed", &self.grabbed.is_some())
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}
