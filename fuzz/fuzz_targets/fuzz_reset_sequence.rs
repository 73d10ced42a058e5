//! Fuzz target: `ResetController::reset_vcc` over arbitrary poll sequences
//!
//! The first 3 bytes pick the configuration (off-interval, max attempts);
//! every following 5-byte chunk is one poll: a little-endian clock step
//! (u16, scaled so gates open regularly) plus a reading byte, where an odd
//! byte means NaN.
//!
//! Invariants checked:
//! - No panics, including across clock wraparound
//! - `attempt_count <= max_attempts` whenever the budget is bounded
//! - `total_resets` never decreases
//! - A valid reading never writes the line and always clears the streak
//! - The last level written always matches `is_energized()`
//!
//! cargo fuzz run fuzz_reset_sequence

#![no_main]

use std::cell::Cell;

use hardreset::{ClockPort, Level, OutputError, OutputPort, ResetConfig, ResetController};
use libfuzzer_sys::fuzz_target;

#[derive(Default)]
struct Sink {
    writes: Vec<Level>,
}

impl OutputPort for Sink {
    fn configure_output(&mut self, _line: u8) -> Result<(), OutputError> {
        Ok(())
    }

    fn write_output(&mut self, _line: u8, level: Level) -> Result<(), OutputError> {
        self.writes.push(level);
        Ok(())
    }
}

struct FuzzClock(Cell<u32>);

impl ClockPort for FuzzClock {
    fn now_ms(&self) -> u32 {
        self.0.get()
    }
}

fuzz_target!(|data: &[u8]| {
    if data.len() < 3 {
        return;
    }
    let (head, polls) = data.split_at(3);
    let interval = u16::from_le_bytes([head[0], head[1]]);
    let max_attempts = head[2] % 8;

    // Start near the wrap point so long inputs cross it.
    let clock = FuzzClock(Cell::new(u32::MAX - 50_000));
    let config = ResetConfig::new(4)
        .with_off_interval_ms(interval)
        .with_max_attempts(max_attempts);
    let mut ctl = ResetController::new(config, Sink::default(), &clock).unwrap();

    let mut prev_total = 0;
    for chunk in polls.chunks_exact(5) {
        let step = u32::from(u16::from_le_bytes([chunk[0], chunk[1]])) / 8;
        clock.0.set(clock.0.get().wrapping_add(step));
        let valid = chunk[4] % 2 == 0;
        let reading = if valid { f32::from(chunk[3]) } else { f32::NAN };

        let before = ctl.output().writes.len();
        ctl.reset_vcc(reading).unwrap();

        if max_attempts != 0 {
            assert!(ctl.attempt_count() <= max_attempts);
        }
        assert!(ctl.total_resets() >= prev_total);
        prev_total = ctl.total_resets();

        if valid {
            assert_eq!(ctl.output().writes.len(), before);
            assert_eq!(ctl.attempt_count(), 0);
        }
        if let Some(last) = ctl.output().writes.last() {
            assert_eq!(last.is_energized(), ctl.is_energized());
        }
    }
});
