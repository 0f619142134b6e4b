//! Recorded Event Replay
//!
//! Feeds a recorded host event stream through a coordinator on a virtual
//! clock. Used by the `lamco-pointer-replay` tool to reproduce input issues
//! without a live client.
//!
//! Input is JSON lines:
//!
//! ```text
//! {"at_ms": 0,  "event": {"type": "wheel", "client": {"x": 10.0, "y": 10.0}, "delta_y": 3.0}}
//! {"at_ms": 20, "event": {"type": "wheel", "client": {"x": 10.0, "y": 10.0}, "delta_y": 4.0}}
//! ```

use std::io::BufRead;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::input::{HostEvent, ListenerSet, MouseCoordinator, PointerEvent};

/// One recorded host event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplayRecord {
    /// Milliseconds since the start of the recording
    pub at_ms: u64,
    /// Host event
    pub event: HostEvent,
}

/// Parse JSON-lines records, skipping blank lines and `#` comments
pub fn read_records(reader: impl BufRead) -> Result<Vec<ReplayRecord>> {
    let mut records = Vec::new();

    for (index, line) in reader.lines().enumerate() {
        let line = line.context("Failed to read replay input")?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let record: ReplayRecord = serde_json::from_str(line)
            .with_context(|| format!("Invalid replay record on line {}", index + 1))?;
        records.push(record);
    }

    Ok(records)
}

/// Replay records through `coordinator` and collect the emitted events.
///
/// Due timers fire before each record is handled, and every timer still
/// pending after the last record is drained. Records must be ordered by
/// `at_ms`; an out-of-order record is handled at the current virtual time.
pub fn replay(coordinator: &mut MouseCoordinator, records: &[ReplayRecord]) -> Vec<PointerEvent> {
    let emitted: Arc<Mutex<Vec<PointerEvent>>> = Arc::default();

    let sink = emitted.clone();
    coordinator.set_on_button(move |x, y, down, mask| {
        sink.lock().push(PointerEvent::Button { x, y, down, mask });
    });
    let sink = emitted.clone();
    coordinator.set_on_move(move |x, y| {
        sink.lock().push(PointerEvent::Move { x, y });
    });

    let mut registry = ListenerSet::new();
    coordinator.grab(&mut registry);

    let start = Instant::now();
    let mut now = start;

    for record in records {
        let at = (start + Duration::from_millis(record.at_ms)).max(now);
        fire_timers_until(coordinator, at);
        now = at;

        trace!("Replay t={}ms {:?}", record.at_ms, record.event.kind());
        coordinator.handle_event(&record.event, now);
    }

    while let Some(deadline) = coordinator.next_deadline() {
        coordinator.poll_timers(deadline);
    }

    coordinator.ungrab(&mut registry);
    coordinator.clear_callbacks();

    let events = std::mem::take(&mut *emitted.lock());
    debug!("Replayed {} records, {} events emitted", records.len(), events.len());
    events
}

/// Fire timers in deadline order up to and including `until`
fn fire_timers_until(coordinator: &mut MouseCoordinator, until: Instant) {
    while let Some(deadline) = coordinator.next_deadline() {
        if deadline > until {
            break;
        }
        coordinator.poll_timers(deadline);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{ButtonMask, MouseOptions, RawPointerEvent, RawWheelEvent, Rect};

    fn coordinator() -> MouseCoordinator {
        MouseCoordinator::new(Arc::new(Rect::new(0.0, 0.0, 200.0, 200.0)), MouseOptions::default())
    }

    fn record(at_ms: u64, event: HostEvent) -> ReplayRecord {
        ReplayRecord { at_ms, event }
    }

    #[test]
    fn test_read_records_skips_comments() {
        let input = "# wheel burst\n\n{\"at_ms\": 5, \"event\": {\"type\": \"click\", \"on_target\": true}}\n";
        let records = read_records(input.as_bytes()).unwrap();
        assert_eq!(records, vec![record(5, HostEvent::Click { on_target: true })]);
    }

    #[test]
    fn test_read_records_reports_line() {
        let input = "{\"at_ms\": 0, \"event\": {\"type\": \"click\", \"on_target\": true}}\nnot json\n";
        let err = read_records(input.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn test_flush_between_records() {
        let records = vec![
            record(0, HostEvent::Wheel(RawWheelEvent::pixels(10.0, 10.0, 0.0, 3.0))),
            record(100, HostEvent::Wheel(RawWheelEvent::pixels(20.0, 20.0, 0.0, 3.0))),
        ];

        let events = replay(&mut coordinator(), &records);
        assert_eq!(
            events,
            vec![
                PointerEvent::Button { x: 10, y: 10, down: true, mask: ButtonMask::WHEEL_DOWN },
                PointerEvent::Button { x: 10, y: 10, down: false, mask: ButtonMask::WHEEL_DOWN },
                PointerEvent::Button { x: 20, y: 20, down: true, mask: ButtonMask::WHEEL_DOWN },
                PointerEvent::Button { x: 20, y: 20, down: false, mask: ButtonMask::WHEEL_DOWN },
            ]
        );
    }

    #[test]
    fn test_moves_and_clicks() {
        let records = vec![
            record(0, HostEvent::Move(RawPointerEvent::at(50.0, 60.0))),
            record(10, HostEvent::ButtonDown(RawPointerEvent::mouse(50.0, 60.0, 0))),
            record(20, HostEvent::ButtonUp(RawPointerEvent::mouse(50.0, 60.0, 0))),
        ];

        let mut coordinator = coordinator();
        let events = replay(&mut coordinator, &records);
        assert_eq!(events.len(), 3);
        assert_eq!(events[0], PointerEvent::Move { x: 50, y: 60 });
        assert!(!coordinator.is_grabbed());
        assert_eq!(coordinator.pending_timers(), 0);
    }
}
