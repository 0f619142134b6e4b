//! Replay integration tests
//!
//! Config file and recorded input on disk, run through the same path the
//! replay tool uses.

use std::fs::File;
use std::io::{BufReader, Write};
use std::sync::Arc;

use tempfile::NamedTempFile;

use lamco_pointer_input::config::Config;
use lamco_pointer_input::input::{ButtonMask, MouseCoordinator, PointerEvent};
use lamco_pointer_input::replay::{read_records, replay};

fn write_temp(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

fn run(config: &Config, input: &NamedTempFile) -> (Vec<PointerEvent>, MouseCoordinator) {
    let records = read_records(BufReader::new(File::open(input.path()).unwrap())).unwrap();
    let surface = config.to_surface().unwrap();
    let mut coordinator =
        MouseCoordinator::new(Arc::new(surface), config.to_mouse_options().unwrap());
    let events = replay(&mut coordinator, &records);
    (events, coordinator)
}

fn button(x: i32, y: i32, down: bool, mask: ButtonMask) -> PointerEvent {
    PointerEvent::Button { x, y, down, mask }
}

const CONFIG: &str = r#"
[pointer]
touch_button = 4
touch_capable = true

[surface]
left = 100.0
top = 50.0
width = 640.0
height = 480.0
pixel_ratio = 2.0
"#;

#[test]
fn test_replay_with_offset_surface() {
    let config_file = write_temp(CONFIG);
    let config = Config::load(config_file.path().to_str().unwrap()).unwrap();

    let input = write_temp(concat!(
        "# move, right click, then a slow scroll\n",
        r#"{"at_ms": 0, "event": {"type": "move", "client": {"x": 150, "y": 60}}}"#, "\n",
        r#"{"at_ms": 5, "event": {"type": "button_down", "client": {"x": 150, "y": 60}, "button": {"kind": "index", "value": 2}}}"#, "\n",
        r#"{"at_ms": 9, "event": {"type": "button_up", "client": {"x": 150, "y": 60}, "button": {"kind": "index", "value": 2}}}"#, "\n",
        r#"{"at_ms": 20, "event": {"type": "context_menu", "on_target": true}}"#, "\n",
        "\n",
        r#"{"at_ms": 30, "event": {"type": "wheel", "client": {"x": 900, "y": 10}, "delta_y": -4}}"#, "\n",
        r#"{"at_ms": 40, "event": {"type": "wheel", "client": {"x": 900, "y": 10}, "delta_y": -4}}"#, "\n",
    ));

    let (events, coordinator) = run(&config, &input);

    assert_eq!(
        events,
        vec![
            PointerEvent::Move { x: 50, y: 10 },
            button(50, 10, true, ButtonMask::RIGHT),
            button(50, 10, false, ButtonMask::RIGHT),
            button(639, 0, true, ButtonMask::WHEEL_UP),
            button(639, 0, false, ButtonMask::WHEEL_UP),
        ]
    );
    assert_eq!(coordinator.stats().wheel_steps, 1);
    assert!(!coordinator.is_grabbed());
}

#[test]
fn test_replay_touch_uses_configured_button_and_ratio() {
    let config = Config::load(write_temp(CONFIG).path().to_str().unwrap()).unwrap();

    // 30px apart: outside the unscaled radius, inside it at pixel ratio 2
    let input = write_temp(concat!(
        r#"{"at_ms": 0, "event": {"type": "button_down", "client": {"x": 200, "y": 100}, "touch": {"changed_touches": [{"x": 200, "y": 100}]}}}"#, "\n",
        r#"{"at_ms": 50, "event": {"type": "button_up", "client": {"x": 200, "y": 100}, "touch": {"changed_touches": [{"x": 200, "y": 100}]}}}"#, "\n",
        r#"{"at_ms": 300, "event": {"type": "button_down", "client": {"x": 230, "y": 100}, "touch": {"changed_touches": [{"x": 230, "y": 100}]}}}"#, "\n",
        r#"{"at_ms": 350, "event": {"type": "button_up", "client": {"x": 230, "y": 100}, "touch": {"changed_touches": [{"x": 230, "y": 100}]}}}"#, "\n",
    ));

    let (events, coordinator) = run(&config, &input);

    assert_eq!(
        events,
        vec![
            button(100, 50, true, ButtonMask::RIGHT),
            button(100, 50, false, ButtonMask::RIGHT),
            button(100, 50, true, ButtonMask::RIGHT),
            button(130, 50, false, ButtonMask::RIGHT),
        ]
    );
    assert_eq!(coordinator.stats().taps_snapped, 1);
}

#[test]
fn test_unfocused_override_drops_everything() {
    let config = Config::default_config()
        .unwrap()
        .with_overrides(Some(false), None);
    config.validate().unwrap();

    let input = write_temp(concat!(
        r#"{"at_ms": 0, "event": {"type": "wheel", "client": {"x": 1, "y": 1}, "delta_y": 40}}"#, "\n",
        r#"{"at_ms": 1, "event": {"type": "button_down", "client": {"x": 1, "y": 1}}}"#, "\n",
    ));

    let (events, coordinator) = run(&config, &input);
    assert!(events.is_empty());
    assert_eq!(coordinator.stats().events_ignored, 2);
}

#[test]
fn test_invalid_touch_button_in_config_rejected() {
    let config_file = write_temp("[pointer]\ntouch_button = 3\n");
    let err = Config::load(config_file.path().to_str().unwrap()).unwrap_err();
    assert!(format!("{:#}", err).contains("touch_button"));
}
