//! Integration tests for the reading → controller → output pipeline.
//!
//! Drive a `ResetController` with scripted readings and a hand-moved
//! clock, then assert on the exact output command history.

use hardreset::config::MIN_OFF_INTERVAL_MS;
use hardreset::diagnostics::ResetHistory;
use hardreset::{Error, Level, OutputError, ResetAction, ResetConfig, ResetController};

use crate::mock_hw::{ManualClock, MockOutput, OutputCall};

const GAP: u32 = MIN_OFF_INTERVAL_MS as u32;
const NAN: f32 = f32::NAN;

fn make_controller(
    max_attempts: u8,
    clock: &ManualClock,
) -> ResetController<MockOutput, &ManualClock> {
    let config = ResetConfig::new(4)
        .with_off_interval_ms(500)
        .with_max_attempts(max_attempts);
    ResetController::new(config, MockOutput::new(), clock).unwrap()
}

// ── Construction / activation ─────────────────────────────────

#[test]
fn construction_configures_line_without_writing() {
    let clock = ManualClock::at(0);
    let ctl = make_controller(2, &clock);
    assert_eq!(ctl.output().calls, vec![OutputCall::Configure { line: 4 }]);
    assert_eq!(ctl.off_interval_ms(), MIN_OFF_INTERVAL_MS);
}

#[test]
fn begin_energizes_line() {
    let clock = ManualClock::at(0);
    let mut ctl = make_controller(0, &clock);
    ctl.begin().unwrap();
    assert_eq!(
        ctl.output().calls[1..],
        [
            OutputCall::Configure { line: 4 },
            OutputCall::Write {
                line: 4,
                level: Level::Energized
            },
        ]
    );
    assert!(ctl.is_energized());
}

// ── Bounded streak, end to end ────────────────────────────────

#[test]
fn bounded_streak_stops_then_valid_reading_rearms() {
    let clock = ManualClock::at(0);
    let mut ctl = make_controller(2, &clock);

    // t = 0: nothing has elapsed since the implicit toggle at 0.
    assert_eq!(ctl.reset_vcc(NAN).unwrap(), ResetAction::RateLimited);
    assert_eq!(ctl.output().write_count(), 0);

    let expected = [
        ResetAction::PowerOff,
        ResetAction::PowerOn { attempt: 1 },
        ResetAction::PowerOff,
        ResetAction::PowerOn { attempt: 2 },
    ];
    for action in expected {
        clock.advance(GAP);
        assert_eq!(ctl.reset_vcc(NAN).unwrap(), action);
    }
    assert_eq!(ctl.attempt_count(), 2);
    assert_eq!(ctl.total_resets(), 2);
    assert!(ctl.is_exhausted());

    // A further streak's worth of NaN past the gate does nothing.
    for _ in 0..4 {
        clock.advance(GAP);
        assert_eq!(ctl.reset_vcc(NAN).unwrap(), ResetAction::Exhausted);
    }
    assert_eq!(
        ctl.output().writes(),
        vec![
            Level::DeEnergized,
            Level::Energized,
            Level::DeEnergized,
            Level::Energized
        ]
    );
    assert_eq!(ctl.attempt_count(), 2);

    assert_eq!(
        ctl.reset_vcc(18.0).unwrap(),
        ResetAction::Recovered { attempts: 2 }
    );
    assert_eq!(ctl.attempt_count(), 0);
    assert!(!ctl.is_exhausted());

    clock.advance(GAP);
    assert_eq!(ctl.reset_vcc(NAN).unwrap(), ResetAction::PowerOff);
    clock.advance(GAP);
    assert_eq!(
        ctl.reset_vcc(NAN).unwrap(),
        ResetAction::PowerOn { attempt: 1 }
    );
    assert_eq!(ctl.total_resets(), 3);
}

// ── Unbounded ─────────────────────────────────────────────────

#[test]
fn unbounded_streak_alternates_forever() {
    let clock = ManualClock::at(0);
    let mut ctl = make_controller(0, &clock);

    for _ in 0..600 {
        clock.advance(GAP);
        assert!(ctl.reset_vcc(NAN).unwrap().toggled());
    }

    let writes = ctl.output().writes();
    assert_eq!(writes.len(), 600);
    for pair in writes.chunks(2) {
        assert_eq!(pair, [Level::DeEnergized, Level::Energized]);
    }
    assert_eq!(ctl.total_resets(), 300);
    assert!(ctl.is_energized());
    assert!(!ctl.is_exhausted());
}

#[test]
fn readings_between_gates_are_ignored() {
    let clock = ManualClock::at(0);
    let mut ctl = make_controller(0, &clock);

    clock.set(GAP);
    ctl.reset_vcc(NAN).unwrap();
    for offset in [1, 500, GAP - 1] {
        clock.set(GAP + offset);
        assert_eq!(ctl.reset_vcc(NAN).unwrap(), ResetAction::RateLimited);
    }
    assert_eq!(ctl.output().write_count(), 1);
    assert_eq!(ctl.last_toggle_ms(), GAP);
}

#[test]
fn valid_readings_never_write() {
    let clock = ManualClock::at(GAP * 10);
    let mut ctl = make_controller(3, &clock);
    for reading in [0.0, -40.0, 85.5, f32::INFINITY, f32::NEG_INFINITY] {
        assert_eq!(ctl.reset_vcc(reading).unwrap(), ResetAction::Healthy);
    }
    assert_eq!(ctl.output().write_count(), 0);
}

// ── Clock wrap ────────────────────────────────────────────────

#[test]
fn cycle_spans_clock_wraparound() {
    let clock = ManualClock::at(u32::MAX - 10);
    let mut ctl = make_controller(0, &clock);

    assert_eq!(ctl.reset_vcc(NAN).unwrap(), ResetAction::PowerOff);
    clock.advance(GAP - 1);
    assert_eq!(ctl.reset_vcc(NAN).unwrap(), ResetAction::RateLimited);
    clock.advance(1);
    assert_eq!(
        ctl.reset_vcc(NAN).unwrap(),
        ResetAction::PowerOn { attempt: 1 }
    );
    assert_eq!(ctl.last_toggle_ms(), GAP - 11);
}

// ── Driver failure ────────────────────────────────────────────

#[test]
fn failing_driver_surfaces_error_and_keeps_state() {
    let clock = ManualClock::at(GAP);
    let mut output = MockOutput::new();
    output.fail_writes = true;
    let mut ctl = ResetController::new(ResetConfig::new(4), output, &clock).unwrap();

    assert_eq!(
        ctl.begin(),
        Err(Error::Output(OutputError::WriteFailed(4)))
    );

    clock.set(u32::from(ctl.off_interval_ms()));
    assert!(ctl.reset_vcc(NAN).is_err());
    assert!(ctl.is_energized());
    assert_eq!(ctl.last_toggle_ms(), 0);
    assert_eq!(ctl.total_resets(), 0);
}

// ── Diagnostics ───────────────────────────────────────────────

#[test]
fn history_and_stats_follow_a_streak() {
    let clock = ManualClock::at(0);
    let mut ctl = make_controller(1, &clock);
    let mut history = ResetHistory::new();

    for _ in 0..5 {
        clock.advance(GAP);
        let action = ctl.reset_vcc(NAN).unwrap();
        history.record(clock.now(), action);
    }
    let action = ctl.reset_vcc(20.0).unwrap();
    history.record(clock.now(), action);

    let actions: Vec<ResetAction> = history.iter().map(|e| e.action).collect();
    assert_eq!(
        actions,
        vec![
            ResetAction::PowerOff,
            ResetAction::PowerOn { attempt: 1 },
            ResetAction::Exhausted,
            ResetAction::Recovered { attempts: 1 },
        ]
    );

    let stats = ctl.stats();
    assert_eq!(stats.total_resets, 1);
    assert_eq!(stats.attempt_count, 0);
    assert!(!stats.exhausted);
    assert!(stats.energized);
    assert_eq!(stats.last_toggle_ms, 5 * GAP);
}
