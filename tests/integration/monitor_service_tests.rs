//! MonitorService against the mock board: boot, input, zones, faults.

use zonewatch::app::events::MonitorEvent;
use zonewatch::app::service::{LoopStatus, MonitorService};
use zonewatch::config::MonitorConfig;
use zonewatch::drivers::indicator::INDICATOR_LEVEL;
use zonewatch::drivers::matrix::{zone_pattern, BLANK, INTERIOR_CELLS};
use zonewatch::error::{ActuatorError, DisplayError, Error, SensorError};
use zonewatch::input::{Button, EdgeQueue};
use zonewatch::state::SystemState;
use zonewatch::zone::Zone;

use super::mock_hw::{position, texts, timeline, Call, EventLog, MockBoard, MockClock};

const LIT: u16 = INDICATOR_LEVEL;

/// Press Button A once and wipe the timeline, leaving an active monitor
/// with an inverted panel (dark text on a lit background).
fn activate(
    svc: &mut MonitorService<'_>,
    hw: &mut MockBoard,
    clock: &MockClock<'_>,
    sink: &mut EventLog,
) {
    clock.press_now(Button::A);
    svc.service_input(hw, sink).unwrap();
    hw.timeline.borrow_mut().clear();
}

fn sleep_total(calls: &[Call]) -> u32 {
    calls
        .iter()
        .map(|c| match c {
            Call::Sleep(ms) => *ms,
            _ => 0,
        })
        .sum()
}

// ── Boot ──────────────────────────────────────────────────────

#[test]
fn boot_parks_outputs_then_shows_splash() {
    let state = SystemState::new();
    let queue = EdgeQueue::new();
    let tl = timeline();
    let mut hw = MockBoard::new(tl.clone());
    let mut clock = MockClock::new(tl.clone(), &queue);
    let mut sink = EventLog::new();
    let mut svc = MonitorService::new(MonitorConfig::default(), &state, &queue);

    svc.boot(&mut hw, &mut clock, &mut sink).unwrap();

    let calls = tl.borrow();
    assert_eq!(calls[0], Call::SetIndicator(0, 0, 0));
    assert_eq!(calls[1], Call::BuzzerOff);
    assert_eq!(calls[2], Call::Sleep(100));
    assert_eq!(calls[3], Call::ShowMatrix(BLANK));
    assert_eq!(calls[4], Call::Fill(false));
    assert_eq!(
        texts(&calls),
        vec![
            ("SISTEMA".to_owned(), 25, 20, true),
            ("ENERGIZADO".to_owned(), 20, 30, true),
        ]
    );
    assert_eq!(calls.last(), Some(&Call::Commit));
    assert_eq!(sink.events, vec![MonitorEvent::Booted]);
    assert!(!state.is_active());
}

#[test]
fn idle_loop_polls_without_sampling() {
    let state = SystemState::new();
    let queue = EdgeQueue::new();
    let tl = timeline();
    let mut hw = MockBoard::new(tl.clone());
    let mut clock = MockClock::new(tl.clone(), &queue);
    let mut sink = EventLog::new();
    let mut svc = MonitorService::new(MonitorConfig::default(), &state, &queue);

    for _ in 0..5 {
        assert_eq!(svc.run_once(&mut hw, &mut clock, &mut sink), Ok(LoopStatus::Idle));
    }
    assert_eq!(*tl.borrow(), vec![Call::Sleep(10); 5]);
    assert_eq!(clock.now, 50);
}

// ── Input ─────────────────────────────────────────────────────

#[test]
fn button_a_activates_and_shows_banner_inverted() {
    let state = SystemState::new();
    let queue = EdgeQueue::new();
    let tl = timeline();
    let mut hw = MockBoard::new(tl.clone());
    let clock = MockClock::new(tl.clone(), &queue);
    let mut sink = EventLog::new();
    let mut svc = MonitorService::new(MonitorConfig::default(), &state, &queue);

    clock.press_now(Button::A);
    svc.service_input(&mut hw, &mut sink).unwrap();

    assert!(state.is_active());
    assert!(state.panel_inverted());
    let calls = tl.borrow();
    assert_eq!(calls[0], Call::Fill(true));
    assert_eq!(texts(&calls), vec![("SISTEMA ATIVO".to_owned(), 15, 30, false)]);
    assert_eq!(
        sink.events,
        vec![MonitorEvent::Activated { inverted: true, first: true }]
    );
}

#[test]
fn double_press_within_window_counts_once() {
    let state = SystemState::new();
    let queue = EdgeQueue::new();
    let tl = timeline();
    let mut hw = MockBoard::new(tl.clone());
    let mut clock = MockClock::new(tl.clone(), &queue);
    let mut sink = EventLog::new();
    let mut svc = MonitorService::new(MonitorConfig::default(), &state, &queue);

    clock.now = 1_000;
    clock.press_now(Button::A);
    clock.now = 1_050;
    clock.press_now(Button::A);
    svc.service_input(&mut hw, &mut sink).unwrap();

    assert_eq!(
        sink.count(|e| matches!(e, MonitorEvent::Activated { .. })),
        1
    );
    assert!(state.panel_inverted(), "polarity flipped exactly once");

    // Outside the window the next press flips it back.
    clock.now = 1_200;
    clock.press_now(Button::A);
    svc.service_input(&mut hw, &mut sink).unwrap();
    assert!(!state.panel_inverted());
    assert_eq!(
        sink.events.last(),
        Some(&MonitorEvent::Activated { inverted: false, first: false })
    );
}

#[test]
fn button_b_while_idle_reboots() {
    let state = SystemState::new();
    let queue = EdgeQueue::new();
    let tl = timeline();
    let mut hw = MockBoard::new(tl.clone());
    let mut clock = MockClock::new(tl.clone(), &queue);
    let mut sink = EventLog::new();
    let mut svc = MonitorService::new(MonitorConfig::default(), &state, &queue);

    clock.press_now(Button::B);
    assert_eq!(
        svc.run_once(&mut hw, &mut clock, &mut sink),
        Ok(LoopStatus::Rebooting)
    );
    assert_eq!(hw.reboots, 1);
    assert!(svc.reboot_requested());
    assert!(!tl.borrow().contains(&Call::ReadSample));
    assert_eq!(sink.events, vec![MonitorEvent::RebootRequested]);
}

#[test]
fn button_b_during_cadence_pause_cuts_it_short() {
    let state = SystemState::new();
    let queue = EdgeQueue::new();
    let tl = timeline();
    let mut hw = MockBoard::new(tl.clone());
    let mut clock = MockClock::new(tl.clone(), &queue);
    let mut sink = EventLog::new();
    let mut svc = MonitorService::new(MonitorConfig::default(), &state, &queue);
    hw.idle_sample = 1000;

    activate(&mut svc, &mut hw, &clock, &mut sink);
    clock.press_at(Button::B, 300);

    let first = svc.run_once(&mut hw, &mut clock, &mut sink).unwrap();
    assert!(matches!(first, LoopStatus::Sampled(r) if r.zone == Zone::Alert));
    assert_eq!(clock.now, 250);

    assert_eq!(
        svc.run_once(&mut hw, &mut clock, &mut sink),
        Ok(LoopStatus::Rebooting)
    );
    assert_eq!(hw.reboots, 1);
    assert_eq!(clock.now, 300, "pause abandoned once the reset was issued");
    let reads = tl.borrow().iter().filter(|c| **c == Call::ReadSample).count();
    assert_eq!(reads, 2);
}

// ── Zones ─────────────────────────────────────────────────────

#[test]
fn critical_sample_drives_red_and_buzzer() {
    let state = SystemState::new();
    let queue = EdgeQueue::new();
    let tl = timeline();
    let mut hw = MockBoard::new(tl.clone());
    let mut clock = MockClock::new(tl.clone(), &queue);
    let mut sink = EventLog::new();
    let mut svc = MonitorService::new(MonitorConfig::default(), &state, &queue);
    activate(&mut svc, &mut hw, &clock, &mut sink);

    hw.push_sample(17);
    let reading = svc.tick(&mut hw, &mut clock, &mut sink).unwrap();
    assert_eq!(reading.zone, Zone::Critical);

    let calls = tl.borrow();
    assert_eq!(calls[0], Call::ReadSample);
    assert_eq!(calls[1], Call::SetIndicator(LIT, 0, 0));
    let Call::ShowMatrix(frame) = &calls[2] else {
        panic!("expected matrix frame, got {:?}", calls[2]);
    };
    for (i, cell) in frame.iter().enumerate() {
        let want = if INTERIOR_CELLS.contains(&i) { (12, 0, 0) } else { (0, 0, 0) };
        assert_eq!(*cell, want, "cell {i}");
    }
    assert_eq!(calls[3], Call::BuzzerOn);
    assert_eq!(
        texts(&calls),
        vec![
            ("ZONA CRITICA".to_owned(), 20, 30, false),
            ("CORRENTE EM 0A".to_owned(), 5, 40, false),
        ]
    );
    assert_eq!(calls.iter().filter(|c| **c == Call::Commit).count(), 1);
    assert!(state.buzzer_on());
    assert!(sink.events.contains(&MonitorEvent::BuzzerSwitched(true)));
}

#[test]
fn safe_sample_pauses_before_redraw() {
    let state = SystemState::new();
    let queue = EdgeQueue::new();
    let tl = timeline();
    let mut hw = MockBoard::new(tl.clone());
    let mut clock = MockClock::new(tl.clone(), &queue);
    let mut sink = EventLog::new();
    let mut svc = MonitorService::new(MonitorConfig::default(), &state, &queue);
    activate(&mut svc, &mut hw, &clock, &mut sink);

    hw.push_sample(2000);
    let reading = svc.tick(&mut hw, &mut clock, &mut sink).unwrap();
    assert_eq!(reading.zone, Zone::Safe);

    let calls = tl.borrow();
    assert_eq!(calls[1], Call::SetIndicator(0, LIT, 0));
    assert_eq!(calls[2], Call::ShowMatrix(zone_pattern((0, 255, 0))));
    assert_eq!(calls[3], Call::BuzzerOff);

    let matrix_at = 2;
    let fill_at = position(&calls, matrix_at, |c| matches!(c, Call::Fill(_))).unwrap();
    assert_eq!(sleep_total(&calls[matrix_at..fill_at]), 500);
    assert_eq!(
        texts(&calls),
        vec![
            ("ZONA SEGURA".to_owned(), 20, 30, false),
            ("CORRENTE EM 10A".to_owned(), 5, 40, false),
        ]
    );
    assert!(!state.buzzer_on());
}

#[test]
fn alert_sample_drives_yellow() {
    let state = SystemState::new();
    let queue = EdgeQueue::new();
    let tl = timeline();
    let mut hw = MockBoard::new(tl.clone());
    let mut clock = MockClock::new(tl.clone(), &queue);
    let mut sink = EventLog::new();
    let mut svc = MonitorService::new(MonitorConfig::default(), &state, &queue);
    activate(&mut svc, &mut hw, &clock, &mut sink);

    hw.push_sample(1000);
    svc.tick(&mut hw, &mut clock, &mut sink).unwrap();

    let calls = tl.borrow();
    assert_eq!(calls[1], Call::SetIndicator(LIT, LIT, 0));
    assert_eq!(calls[2], Call::ShowMatrix(zone_pattern((255, 255, 0))));
    assert_eq!(
        texts(&calls),
        vec![
            ("ZONA DE ALERTA".to_owned(), 10, 30, false),
            ("CORRENTE EM 5A".to_owned(), 5, 40, false),
        ]
    );
    assert_eq!(sleep_total(&calls), 0, "only Safe waits before the redraw");
}

#[test]
fn cadence_pause_is_sliced_at_poll_interval() {
    let state = SystemState::new();
    let queue = EdgeQueue::new();
    let tl = timeline();
    let mut hw = MockBoard::new(tl.clone());
    let mut clock = MockClock::new(tl.clone(), &queue);
    let mut sink = EventLog::new();
    let mut svc = MonitorService::new(MonitorConfig::default(), &state, &queue);
    hw.idle_sample = 17;
    activate(&mut svc, &mut hw, &clock, &mut sink);

    svc.run_once(&mut hw, &mut clock, &mut sink).unwrap();

    let calls = tl.borrow();
    let sleeps: Vec<_> = calls.iter().filter(|c| matches!(c, Call::Sleep(_))).collect();
    assert_eq!(sleeps.len(), 25);
    assert!(sleeps.iter().all(|c| **c == Call::Sleep(10)));
    assert_eq!(sleep_total(&calls), 250);
}

#[test]
fn buzzer_only_reconfigured_on_change() {
    let state = SystemState::new();
    let queue = EdgeQueue::new();
    let tl = timeline();
    let mut hw = MockBoard::new(tl.clone());
    let mut clock = MockClock::new(tl.clone(), &queue);
    let mut sink = EventLog::new();
    let mut svc = MonitorService::new(MonitorConfig::default(), &state, &queue);
    activate(&mut svc, &mut hw, &clock, &mut sink);

    for raw in [17, 4000, 1000, 1100] {
        hw.push_sample(raw);
        svc.tick(&mut hw, &mut clock, &mut sink).unwrap();
    }

    assert_eq!(hw.buzzer_transitions, 2);
    let switched: Vec<_> = sink
        .events
        .iter()
        .filter_map(|e| match e {
            MonitorEvent::BuzzerSwitched(on) => Some(*on),
            _ => None,
        })
        .collect();
    assert_eq!(switched, vec![true, false]);
    assert!(!state.buzzer_on());
}

#[test]
fn zone_changes_reported_once_per_transition() {
    let state = SystemState::new();
    let queue = EdgeQueue::new();
    let tl = timeline();
    let mut hw = MockBoard::new(tl.clone());
    let mut clock = MockClock::new(tl.clone(), &queue);
    let mut sink = EventLog::new();
    let mut svc = MonitorService::new(MonitorConfig::default(), &state, &queue);
    activate(&mut svc, &mut hw, &clock, &mut sink);

    for raw in [1000, 1100, 17] {
        hw.push_sample(raw);
        svc.tick(&mut hw, &mut clock, &mut sink).unwrap();
    }

    let changes: Vec<_> = sink
        .events
        .iter()
        .filter(|e| matches!(e, MonitorEvent::ZoneChanged { .. }))
        .cloned()
        .collect();
    assert_eq!(
        changes,
        vec![
            MonitorEvent::ZoneChanged { from: None, to: Zone::Alert },
            MonitorEvent::ZoneChanged { from: Some(Zone::Alert), to: Zone::Critical },
        ]
    );
    assert_eq!(svc.last_zone(), Some(Zone::Critical));
    assert_eq!(sink.count(|e| matches!(e, MonitorEvent::Sampled(_))), 3);
}

#[test]
fn undefined_sample_freezes_outputs() {
    let state = SystemState::new();
    let queue = EdgeQueue::new();
    let tl = timeline();
    let mut hw = MockBoard::new(tl.clone());
    let mut clock = MockClock::new(tl.clone(), &queue);
    let mut sink = EventLog::new();
    let mut svc = MonitorService::new(MonitorConfig::default(), &state, &queue);
    activate(&mut svc, &mut hw, &clock, &mut sink);

    hw.push_sample(17);
    svc.tick(&mut hw, &mut clock, &mut sink).unwrap();
    tl.borrow_mut().clear();

    hw.push_sample(5);
    hw.push_sample(10);
    let r = svc.tick(&mut hw, &mut clock, &mut sink).unwrap();
    assert_eq!(r.zone, Zone::Undefined);
    assert!(r.current_a < 0.0);
    svc.tick(&mut hw, &mut clock, &mut sink).unwrap();

    assert_eq!(*tl.borrow(), vec![Call::ReadSample, Call::ReadSample]);
    assert!(state.buzzer_on(), "buzzer left as it was");
    assert_eq!(
        sink.count(|e| matches!(e, MonitorEvent::UndefinedSample(_))),
        1,
        "warned once on entry"
    );

    // Leaving and re-entering warns again.
    hw.push_sample(1000);
    hw.push_sample(3);
    svc.tick(&mut hw, &mut clock, &mut sink).unwrap();
    svc.tick(&mut hw, &mut clock, &mut sink).unwrap();
    assert_eq!(sink.count(|e| matches!(e, MonitorEvent::UndefinedSample(_))), 2);
}

// ── Faults ────────────────────────────────────────────────────

#[test]
fn sensor_failure_is_fatal_and_shown() {
    let state = SystemState::new();
    let queue = EdgeQueue::new();
    let tl = timeline();
    let mut hw = MockBoard::new(tl.clone());
    let mut clock = MockClock::new(tl.clone(), &queue);
    let mut sink = EventLog::new();
    let mut svc = MonitorService::new(MonitorConfig::default(), &state, &queue);
    activate(&mut svc, &mut hw, &clock, &mut sink);

    hw.push_sensor_fault();
    assert_eq!(
        svc.run_once(&mut hw, &mut clock, &mut sink),
        Err(Error::Sensor(SensorError::AdcReadFailed))
    );

    let calls = tl.borrow();
    assert_eq!(texts(&calls), vec![("FALHA SENSOR".to_owned(), 15, 30, false)]);
    assert!(!calls.iter().any(|c| matches!(c, Call::SetIndicator(..) | Call::ShowMatrix(_))));
    assert!(sink
        .events
        .contains(&MonitorEvent::SensorFault(SensorError::AdcReadFailed)));
}

#[test]
fn commit_failure_retried_once() {
    let state = SystemState::new();
    let queue = EdgeQueue::new();
    let tl = timeline();
    let mut hw = MockBoard::new(tl.clone());
    let mut clock = MockClock::new(tl.clone(), &queue);
    let mut sink = EventLog::new();
    let mut svc = MonitorService::new(MonitorConfig::default(), &state, &queue);
    activate(&mut svc, &mut hw, &clock, &mut sink);

    hw.commit_failures = 1;
    hw.push_sample(1000);
    assert!(svc.tick(&mut hw, &mut clock, &mut sink).is_ok());
    assert_eq!(tl.borrow().iter().filter(|c| **c == Call::Commit).count(), 2);

    hw.commit_failures = 2;
    hw.push_sample(1000);
    assert_eq!(
        svc.tick(&mut hw, &mut clock, &mut sink),
        Err(Error::Display(DisplayError::CommitFailed))
    );
}

#[test]
fn actuator_failure_does_not_stop_the_tick() {
    let state = SystemState::new();
    let queue = EdgeQueue::new();
    let tl = timeline();
    let mut hw = MockBoard::new(tl.clone());
    let mut clock = MockClock::new(tl.clone(), &queue);
    let mut sink = EventLog::new();
    let mut svc = MonitorService::new(MonitorConfig::default(), &state, &queue);
    activate(&mut svc, &mut hw, &clock, &mut sink);

    hw.fail_indicator = true;
    hw.push_sample(17);
    assert!(svc.tick(&mut hw, &mut clock, &mut sink).is_ok());

    let calls = tl.borrow();
    assert!(calls.iter().any(|c| matches!(c, Call::ShowMatrix(_))));
    assert!(calls.contains(&Call::BuzzerOn));
    assert_eq!(calls.last(), Some(&Call::Commit));
    assert!(sink
        .events
        .contains(&MonitorEvent::ActuatorFault(ActuatorError::PwmWriteFailed)));
}

#[test]
fn second_press_flips_reading_polarity() {
    let state = SystemState::new();
    let queue = EdgeQueue::new();
    let tl = timeline();
    let mut hw = MockBoard::new(tl.clone());
    let mut clock = MockClock::new(tl.clone(), &queue);
    let mut sink = EventLog::new();
    let mut svc = MonitorService::new(MonitorConfig::default(), &state, &queue);
    hw.idle_sample = 1000;
    activate(&mut svc, &mut hw, &clock, &mut sink);

    // Second press lands mid-pause; the next frame is drawn upright.
    clock.press_at(Button::A, 400);
    svc.run_once(&mut hw, &mut clock, &mut sink).unwrap();
    svc.run_once(&mut hw, &mut clock, &mut sink).unwrap();
    tl.borrow_mut().clear();
    svc.run_once(&mut hw, &mut clock, &mut sink).unwrap();

    assert!(!state.panel_inverted());
    let calls = tl.borrow();
    assert!(texts(&calls).contains(&("ZONA DE ALERTA".to_owned(), 10, 30, true)));
}
