//! Controller driving a real embedded-hal pin through `HalOutput`.

use std::cell::RefCell;
use std::convert::Infallible;
use std::rc::Rc;

use embedded_hal::digital::{ErrorType, OutputPin};
use hardreset::adapters::output::HalOutput;
use hardreset::config::MIN_OFF_INTERVAL_MS;
use hardreset::{Error, OutputError, OutputPort, ResetConfig, ResetController};

use crate::mock_hw::ManualClock;

/// Pin whose level history is shared with the test.
#[derive(Clone, Default)]
struct TracePin {
    levels: Rc<RefCell<Vec<bool>>>,
}

impl ErrorType for TracePin {
    type Error = Infallible;
}

impl OutputPin for TracePin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.levels.borrow_mut().push(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.levels.borrow_mut().push(true);
        Ok(())
    }
}

#[test]
fn power_cycle_reaches_the_pin() {
    let pin = TracePin::default();
    let clock = ManualClock::at(0);
    let config = ResetConfig::new(4).with_max_attempts(1);
    let mut ctl = ResetController::new(config, HalOutput::new(4, pin.clone()), &clock).unwrap();

    ctl.begin().unwrap();
    let gap = u32::from(ctl.off_interval_ms());
    for _ in 0..4 {
        clock.advance(gap);
        ctl.reset_vcc(f32::NAN).unwrap();
    }

    assert_eq!(*pin.levels.borrow(), vec![true, false, true]);
    assert_eq!(ctl.total_resets(), 1);
}

#[test]
fn controller_on_foreign_line_fails_at_construction() {
    let clock = ManualClock::at(0);
    let result = ResetController::new(
        ResetConfig::new(5),
        HalOutput::new(4, TracePin::default()),
        &clock,
    );
    assert!(matches!(
        result,
        Err(Error::Output(OutputError::UnknownLine(5)))
    ));
}

#[test]
fn borrowed_output_can_be_inspected_after_release() {
    let clock = ManualClock::at(u32::from(MIN_OFF_INTERVAL_MS));
    let mut output = HalOutput::new(4, TracePin::default());
    {
        let mut ctl = ResetController::new(
            ResetConfig::new(4).with_off_interval_ms(0),
            &mut output,
            &clock,
        )
        .unwrap();
        ctl.reset_vcc(f32::NAN).unwrap();
        assert!(!ctl.is_energized());
    }
    assert_eq!(*output.pin().levels.borrow(), vec![false]);
    output.write_output(4, hardreset::Level::Energized).unwrap();
    assert_eq!(*output.pin().levels.borrow(), vec![false, true]);
}
