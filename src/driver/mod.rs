//! Async Pointer Driver
//!
//! Runs a [`MouseCoordinator`] on its own tokio task so hosts with an async
//! event source do not need to schedule timers themselves.
//!
//! # Architecture
//!
//! ```text
//! Host ──> PointerDriver (handle) ──mpsc──> driver task
//!                                            ├─> MouseCoordinator
//!                                            └─> sleep_until(next_deadline)
//!                                                      │
//! Transport <──────────────mpsc──────────── PointerEvent
//! ```
//!
//! The task is the only owner of the coordinator, so commands and timer
//! expiries are processed strictly one at a time.

use std::time::Instant;

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::input::{
    ButtonMask, HostEvent, InputError, ListenerRegistry, MouseCoordinator, PointerEvent,
    PointerStats, Result,
};

/// Commands accepted by the driver task
#[derive(Debug)]
enum PointerCommand {
    Event(HostEvent),
    SetFocused(bool),
    SetTouchButton(ButtonMask),
    Grab,
    Ungrab,
    Stats(oneshot::Sender<PointerStats>),
    Shutdown,
}

/// Handle to a running pointer driver
#[derive(Debug)]
pub struct PointerDriver {
    commands: mpsc::UnboundedSender<PointerCommand>,
    task: JoinHandle<()>,
}

impl PointerDriver {
    /// Spawn the driver task and grab the target.
    ///
    /// The coordinator's button and move callbacks are replaced by the
    /// returned event channel. Must be called from within a tokio runtime.
    pub fn spawn<R>(
        mut coordinator: MouseCoordinator,
        registry: R,
    ) -> (Self, mpsc::UnboundedReceiver<PointerEvent>)
    where
        R: ListenerRegistry + Send + 'static,
    {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let (command_tx, command_rx) = mpsc::unbounded_channel();

        let button_tx = event_tx.clone();
        coordinator.set_on_button(move |x, y, down, mask| {
            // Receiver gone means the transport is shutting down
            let _ = button_tx.send(PointerEvent::Button { x, y, down, mask });
        });
        coordinator.set_on_move(move |x, y| {
            let _ = event_tx.send(PointerEvent::Move { x, y });
        });

        let task = tokio::spawn(run(coordinator, registry, command_rx));

        (
            Self {
                commands: command_tx,
                task,
            },
            event_rx,
        )
    }

    /// Forward a host event
    pub fn send_event(&self, event: HostEvent) -> Result<()> {
        self.send(PointerCommand::Event(event))
    }

    /// Enable or disable event processing
    pub fn set_focused(&self, focused: bool) -> Result<()> {
        self.send(PointerCommand::SetFocused(focused))
    }

    /// Change the touch button mask (0, 1, 2 or 4)
    pub fn set_touch_button(&self, bits: u32) -> Result<()> {
        let mask = ButtonMask::touch_button(bits)?;
        self.send(PointerCommand::SetTouchButton(mask))
    }

    /// Attach listeners again after an ungrab
    pub fn grab(&self) -> Result<()> {
        self.send(PointerCommand::Grab)
    }

    /// Detach listeners and cancel pending timers
    pub fn ungrab(&self) -> Result<()> {
        self.send(PointerCommand::Ungrab)
    }

    /// Snapshot of the coordinator's counters
    pub async fn stats(&self) -> Result<PointerStats> {
        let (tx, rx) = oneshot::channel();
        self.send(PointerCommand::Stats(tx))?;
        rx.await.map_err(|_| InputError::DriverClosed)
    }

    /// Whether the driver task has exited
    pub fn is_closed(&self) -> bool {
        self.commands.is_closed()
    }

    /// Ungrab and stop the driver task
    pub async fn shutdown(self) -> Result<()> {
        // Task may already be gone; joining below still reports that
        let _ = self.commands.send(PointerCommand::Shutdown);
        self.task.await.map_err(|e| {
            warn!("Pointer driver task failed: {}", e);
            InputError::DriverClosed
        })
    }

    fn send(&self, command: PointerCommand) -> Result<()> {
        self.commands
            .send(command)
            .map_err(|_| InputError::DriverClosed)
    }
}

async fn run<R: ListenerRegistry>(
    mut coordinator: MouseCoordinator,
    mut registry: R,
    mut commands: mpsc::UnboundedReceiver<PointerCommand>,
) {
    coordinator.grab(&mut registry);
    info!("Pointer driver started");

    loop {
        let deadline = coordinator.next_deadline();

        tokio::select! {
            command = commands.recv() => {
                let Some(command) = command else {
                    debug!("Pointer driver handle dropped");
                    break;
                };
                if !apply(&mut coordinator, &mut registry, command) {
                    break;
                }
            }
            _ = sleep_until(deadline) => {
                coordinator.poll_timers(now());
            }
        }
    }

    coordinator.ungrab(&mut registry);
    info!("Pointer driver stopped: {:?}", coordinator.stats());
}

/// Apply a command, returning false on shutdown
fn apply<R: ListenerRegistry>(
    coordinator: &mut MouseCoordinator,
    registry: &mut R,
    command: PointerCommand,
) -> bool {
    match command {
        PointerCommand::Event(event) => {
            // Ungrabbed: listeners are detached and queued events are stale
            if coordinator.is_grabbed() {
                coordinator.handle_event(&event, now());
            } else {
                debug!("Dropping {:?} event while ungrabbed", event.kind());
            }
        }
        PointerCommand::SetFocused(focused) => {
            debug!("Pointer focus: {}", focused);
            coordinator.set_focused(focused);
        }
        PointerCommand::SetTouchButton(mask) => {
            if let Err(e) = coordinator.set_touch_button(mask.bits()) {
                warn!("Rejected touch button: {}", e);
            }
        }
        PointerCommand::Grab => coordinator.grab(registry),
        PointerCommand::Ungrab => coordinator.ungrab(registry),
        PointerCommand::Stats(reply) => {
            let _ = reply.send(coordinator.stats());
        }
        PointerCommand::Shutdown => return false,
    }
    true
}

fn now() -> Instant {
    tokio::time::Instant::now().into_std()
}

async fn sleep_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(tokio::time::Instant::from_std(deadline)).await,
        None => std::future::pending().await,
    }
}
