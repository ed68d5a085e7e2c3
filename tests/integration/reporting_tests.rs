//! Reporter-side integration: real sinks fed by a running control loop,
//! plus the published status snapshot.

use crate::mock_hw::{MockHardware, RecordingSink};

use thermoreg::adapters::json_sink::{self, JsonLineSink};
use thermoreg::adapters::log_sink::{format_status_line, LogEventSink};
use thermoreg::app::events::AppEvent;
use thermoreg::app::ports::EventSink;
use thermoreg::app::service::ControlLoop;
use thermoreg::config::SystemConfig;
use thermoreg::control::{Alarm, Sample};
use thermoreg::status::StatusBoard;

#[test]
fn every_cycle_produces_a_status_line() {
    let mut hw = MockHardware::scripted([
        Sample::from_raw(16.0, 6.5),
        Sample::new(None, Some(6.5)),
        Sample::from_raw(16.0, 7.5),
    ]);
    let mut ctl = ControlLoop::new(SystemConfig::REFERENCE);
    let mut sink = (LogEventSink::new(), RecordingSink::new());
    ctl.start(&mut hw, &mut sink);

    let lines: Vec<String> = (0..3)
        .map(|i| format_status_line(&ctl.run_cycle(i * 2000, &mut hw, &mut sink)).to_string())
        .collect();

    assert_eq!(lines[0], "T=16.0\u{00b0}C | I=6.5A | peltier=ON | cooler=ON");
    assert_eq!(lines[1], "T=ERR | I=6.5A | peltier=ON | cooler=ON");
    assert_eq!(lines[2], "T=16.0\u{00b0}C | I=7.5A | peltier=OFF | cooler=OFF");

    let cycles = sink.1.count(|e| matches!(e, AppEvent::Cycle(_)));
    assert_eq!(cycles, 3);
}

#[test]
fn alarms_are_reported_only_in_the_cycle_they_hold() {
    let mut hw = MockHardware::scripted([
        Sample::from_raw(20.1, 6.5),
        Sample::from_raw(19.0, 6.5),
    ]);
    let mut ctl = ControlLoop::new(SystemConfig::REFERENCE);
    let mut sink = RecordingSink::new();
    ctl.start(&mut hw, &mut sink);

    let first = ctl.run_cycle(0, &mut hw, &mut sink);
    let second = ctl.run_cycle(2000, &mut hw, &mut sink);
    assert_eq!(first.alarms.iter().collect::<Vec<_>>(), [Alarm::TempCriticalHigh]);
    assert!(second.alarms.is_empty());
}

#[test]
fn telemetry_line_matches_cycle_report() {
    let mut hw = MockHardware::scripted([Sample::from_raw(16.0, 6.5)]);
    let mut ctl = ControlLoop::new(SystemConfig::REFERENCE);
    let mut sink = (LogEventSink::new(), JsonLineSink::new());
    ctl.start(&mut hw, &mut sink);

    let report = ctl.run_cycle(0, &mut hw, &mut sink);
    let v: serde_json::Value =
        serde_json::from_str(&json_sink::render(&report).unwrap()).unwrap();
    assert_eq!(v["cycle"], 1);
    assert_eq!(v["state"]["peltier_on"], true);
    assert_eq!(v["alarms"], serde_json::json!([]));

    // Non-cycle events are ignored by the telemetry sink.
    sink.1.emit(&AppEvent::Started(SystemConfig::REFERENCE));
}

#[test]
fn status_board_tracks_last_published_cycle() {
    let board = StatusBoard::new();
    assert!(board.latest().is_none());

    let mut hw = MockHardware::scripted([
        Sample::from_raw(16.0, 6.5),
        Sample::from_raw(10.0, 6.5),
    ]);
    let mut ctl = ControlLoop::new(SystemConfig::REFERENCE);
    let mut sink = RecordingSink::new();
    ctl.start(&mut hw, &mut sink);

    for now in [0u32, 2000] {
        if let Some(report) = ctl.poll(now, &mut hw, &mut sink) {
            board.publish(report);
        }
    }
    let latest = board.latest().unwrap();
    assert_eq!(latest.cycle, 2);
    assert_eq!(latest.sample.temperature_c, Some(10.0));
    assert!(latest.state.peltier_on, "dead band holds the engaged state");
}
