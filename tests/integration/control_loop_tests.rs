//! Integration tests for the Sampler → Regulator → Actuator pipeline.
//!
//! These run on the host and drive [`ControlLoop`] through scripted
//! temperature/current sequences, asserting on the physical write log
//! and the emitted events.

use crate::mock_hw::{MockHardware, RecordingSink, Write};

use thermoreg::app::events::AppEvent;
use thermoreg::app::service::ControlLoop;
use thermoreg::config::SystemConfig;
use thermoreg::control::{ActuatorState, Alarm, PeltierState, Sample};

const PERIOD: u32 = 2000;

fn started(hw: &mut MockHardware) -> (ControlLoop, RecordingSink) {
    let mut ctl = ControlLoop::new(SystemConfig::REFERENCE);
    let mut sink = RecordingSink::new();
    ctl.start(hw, &mut sink);
    (ctl, sink)
}

fn s(t: f32, c: f32) -> Sample {
    Sample::from_raw(t, c)
}

// ── Start-up ──────────────────────────────────────────────────

#[test]
fn start_drives_both_outputs_low_and_announces_config() {
    let mut hw = MockHardware::new();
    let (ctl, sink) = started(&mut hw);

    assert_eq!(hw.writes, [Write::Peltier(false), Write::Cooler(false)]);
    assert_eq!(ctl.state(), ActuatorState::OFF);
    assert!(matches!(sink.events.as_slice(), [AppEvent::Started(c)] if *c == SystemConfig::REFERENCE));
    assert_eq!(hw.samples_taken, 0, "start must not sample");
}

// ── Cadence ───────────────────────────────────────────────────

#[test]
fn poll_runs_one_cycle_per_period() {
    let mut hw = MockHardware::new();
    let (mut ctl, mut sink) = started(&mut hw);

    let mut ran = 0;
    for now in (0..=10_000u32).step_by(100) {
        if ctl.poll(now, &mut hw, &mut sink).is_some() {
            ran += 1;
        }
    }
    // Cycles at 0, 2000, 4000, 6000, 8000, 10000.
    assert_eq!(ran, 6);
    assert_eq!(ctl.cycles(), 6);
    assert_eq!(hw.samples_taken, 6);
}

#[test]
fn poll_survives_tick_rollover() {
    let mut hw = MockHardware::new();
    let (mut ctl, mut sink) = started(&mut hw);

    let start = u32::MAX - 500;
    assert!(ctl.poll(start, &mut hw, &mut sink).is_some());
    assert!(ctl.poll(start.wrapping_add(1999), &mut hw, &mut sink).is_none());
    assert!(ctl.poll(start.wrapping_add(PERIOD), &mut hw, &mut sink).is_some());
}

// ── Regulation sequences ──────────────────────────────────────

#[test]
fn warm_up_then_cool_down_cycle() {
    let mut hw = MockHardware::scripted([
        s(10.0, 6.5), // dead band, stays off
        s(15.6, 6.5), // above 15.5, engage
        s(12.0, 6.5), // dead band, stays on
        s(1.4, 6.5),  // below 1.5, disengage
        s(10.0, 6.5), // dead band, stays off
    ]);
    let (mut ctl, mut sink) = started(&mut hw);

    let states: Vec<bool> = (0..5)
        .map(|i| ctl.run_cycle(i * PERIOD, &mut hw, &mut sink).state.peltier_on)
        .collect();
    assert_eq!(states, [false, true, true, false, false]);

    let transitions: Vec<(PeltierState, PeltierState)> = sink
        .events
        .iter()
        .filter_map(|e| match e {
            AppEvent::PeltierChanged { from, to } => Some((*from, *to)),
            _ => None,
        })
        .collect();
    assert_eq!(
        transitions,
        [
            (PeltierState::Disengaged, PeltierState::Engaged),
            (PeltierState::Engaged, PeltierState::Disengaged),
        ]
    );
}

#[test]
fn outputs_rewritten_every_cycle_even_when_unchanged() {
    let mut hw = MockHardware::scripted([s(10.0, 6.5), s(10.0, 6.5), s(10.0, 6.5)]);
    let (mut ctl, mut sink) = started(&mut hw);
    hw.writes.clear();

    for i in 0..3 {
        ctl.run_cycle(i * PERIOD, &mut hw, &mut sink);
    }
    assert_eq!(hw.writes.len(), 6);
    assert_eq!(hw.outputs(), ActuatorState::OFF);
}

#[test]
fn engage_writes_cooler_before_peltier() {
    let mut hw = MockHardware::scripted([s(16.0, 6.5)]);
    let (mut ctl, mut sink) = started(&mut hw);
    hw.writes.clear();

    ctl.run_cycle(0, &mut hw, &mut sink);
    assert_eq!(hw.writes, [Write::Cooler(true), Write::Peltier(true)]);
}

#[test]
fn current_excursion_disengages_peltier_first() {
    let mut hw = MockHardware::scripted([s(16.0, 6.5), s(16.0, 7.5)]);
    let (mut ctl, mut sink) = started(&mut hw);

    ctl.run_cycle(0, &mut hw, &mut sink);
    hw.writes.clear();
    let report = ctl.run_cycle(PERIOD, &mut hw, &mut sink);

    assert_eq!(hw.writes, [Write::Peltier(false), Write::Cooler(false)]);
    assert!(report.alarms.contains(Alarm::CurrentHigh));
    assert_eq!(hw.outputs(), ActuatorState::OFF);
}

#[test]
fn hot_chamber_runs_cooler_without_peltier_when_current_is_low() {
    let mut hw = MockHardware::scripted([s(18.0, 5.0)]);
    let (mut ctl, mut sink) = started(&mut hw);

    let report = ctl.run_cycle(0, &mut hw, &mut sink);
    assert_eq!(
        report.state,
        ActuatorState { peltier_on: false, cooler_on: true }
    );
    assert_eq!(hw.outputs(), report.state);
    assert!(report.alarms.is_empty(), "CurrentLow needs an engaged element");
}

#[test]
fn sensor_fault_holds_outputs_and_recovers() {
    let mut hw = MockHardware::scripted([
        s(16.0, 6.5),
        Sample::new(None, Some(6.5)),
        Sample::new(None, Some(6.5)),
        s(1.0, 6.5),
    ]);
    let (mut ctl, mut sink) = started(&mut hw);

    ctl.run_cycle(0, &mut hw, &mut sink);
    for i in 1..3 {
        let r = ctl.run_cycle(i * PERIOD, &mut hw, &mut sink);
        assert!(r.state.peltier_on && r.state.cooler_on, "held across fault");
        assert!(r.alarms.contains(Alarm::SensorFault));
        assert_eq!(r.sample.temperature_c, None);
    }
    let r = ctl.run_cycle(3 * PERIOD, &mut hw, &mut sink);
    assert!(!r.state.peltier_on);
    assert!(!r.alarms.contains(Alarm::SensorFault), "alarms are not latched");
}

#[test]
fn sensor_fault_holds_through_current_excursion_until_temperature_returns() {
    let mut hw = MockHardware::scripted([
        s(16.0, 6.5),
        Sample::new(None, Some(8.0)),
        s(16.0, 8.0),
    ]);
    let (mut ctl, mut sink) = started(&mut hw);

    ctl.run_cycle(0, &mut hw, &mut sink);
    let r = ctl.run_cycle(PERIOD, &mut hw, &mut sink);
    assert_eq!(r.state, ActuatorState { peltier_on: true, cooler_on: true });
    assert!(r.alarms.contains(Alarm::SensorFault));
    assert!(r.alarms.contains(Alarm::CurrentHigh), "current alarms still evaluated");

    let r = ctl.run_cycle(2 * PERIOD, &mut hw, &mut sink);
    assert!(!r.state.peltier_on, "interlock acts once temperature is valid");
}

#[test]
fn lost_current_sense_disengages() {
    let mut hw = MockHardware::scripted([s(16.0, 6.5), Sample::new(Some(16.0), None)]);
    let (mut ctl, mut sink) = started(&mut hw);

    ctl.run_cycle(0, &mut hw, &mut sink);
    let r = ctl.run_cycle(PERIOD, &mut hw, &mut sink);
    assert!(!r.state.peltier_on);
    assert!(r.alarms.contains(Alarm::CurrentSenseFault));
}

// ── Actuator faults ───────────────────────────────────────────

#[test]
fn broken_cooler_never_leaves_peltier_energised() {
    let mut hw = MockHardware::scripted([s(16.0, 6.5), s(16.0, 6.5)]);
    let (mut ctl, mut sink) = started(&mut hw);
    hw.broken = Some("cooler");

    for i in 0..2 {
        ctl.run_cycle(i * PERIOD, &mut hw, &mut sink);
        assert!(!hw.outputs().peltier_on);
    }
    assert_eq!(
        sink.count(|e| matches!(e, AppEvent::ActuatorFault(_))),
        2,
        "one fault per failed cycle"
    );
    assert_eq!(ctl.cycles(), 2, "loop keeps running");
}

#[test]
fn actuator_fault_recovers_on_next_cycle() {
    let mut hw = MockHardware::scripted([s(16.0, 6.5), s(16.0, 6.5)]);
    let (mut ctl, mut sink) = started(&mut hw);

    hw.broken = Some("peltier");
    ctl.run_cycle(0, &mut hw, &mut sink);
    assert!(!hw.outputs().peltier_on);

    hw.broken = None;
    ctl.run_cycle(PERIOD, &mut hw, &mut sink);
    assert_eq!(
        hw.outputs(),
        ActuatorState { peltier_on: true, cooler_on: true }
    );
}
