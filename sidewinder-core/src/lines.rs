//! Gameport signal lines as seen by the decoder.
//!
//! | Line | Direction | Role |
//! |------|-----------|------|
//! | timing | out, idle high | pulsed low to request a frame |
//! | clock | in, rising edge | one pulse per transmitted bit |
//! | data | in, level | bit value, sampled on each clock edge |
//! | recv indicator | out, optional | held high while a complete frame is published |
//! | clock indicator | out, optional | pulsed once per accepted edge |
//!
//! The clock line itself is not part of [`GameportLines`]: whoever waits for
//! its edges calls [`crate::Decoder::on_clock_edge`] and checks
//! [`GameportLines::edges_armed`] to know whether to wait at all. Lines that
//! capture the data level in hardware at the edge skip [`DataLine`] and hand
//! the level to [`crate::Decoder::on_sampled_edge`] instead.

use core::convert::Infallible;

use embedded_hal::digital::{ErrorType, InputPin, OutputPin};

/// Line operations the timing controller and edge sampler need.
///
/// Every call is bounded-time and infallible from the decoder's point of
/// view.
pub trait GameportLines {
    /// Drive the timing line.
    fn set_trigger(&mut self, high: bool);

    /// Allow clock edges to reach the decoder.
    fn arm_edges(&mut self);

    /// Stop delivering clock edges.
    fn disarm_edges(&mut self);

    fn edges_armed(&self) -> bool;

    /// Drop edges captured or latched while edges were disarmed.
    fn clear_pending_edge(&mut self) {}

    fn set_recv_indicator(&mut self, _on: bool) {}

    fn pulse_clock_indicator(&mut self) {}
}

/// Data line sampled in software when an edge is reported.
pub trait DataLine {
    /// Sample the data line now.
    fn read_data(&mut self) -> bool;
}

/// Placeholder for a diagnostic output that is not wired.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoPin;

impl ErrorType for NoPin {
    type Error = Infallible;
}

impl OutputPin for NoPin {
    #[inline]
    fn set_low(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    #[inline]
    fn set_high(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// [`GameportLines`] over `embedded-hal` pins.
///
/// Pin errors are dropped: a failed write leaves the line as it was and a
/// failed data read samples low. Edge arming is a flag the edge context
/// consults before waiting on the clock line.
pub struct PinLines<T, D, R = NoPin, C = NoPin> {
    trigger: T,
    data: D,
    recv_indicator: R,
    clock_indicator: C,
    armed: bool,
}

impl<T, D> PinLines<T, D>
where
    T: OutputPin,
    D: InputPin,
{
    /// Lines without diagnostic outputs. Drives the timing line high.
    pub fn new(trigger: T, data: D) -> Self {
        Self::with_indicators(trigger, data, NoPin, NoPin)
    }
}

impl<T, D, R, C> PinLines<T, D, R, C>
where
    T: OutputPin,
    D: InputPin,
    R: OutputPin,
    C: OutputPin,
{
    /// Lines with receive and clock indicator outputs. Drives the timing
    /// line high and both indicators low.
    pub fn with_indicators(trigger: T, data: D, recv_indicator: R, clock_indicator: C) -> Self {
        let mut lines = Self {
            trigger,
            data,
            recv_indicator,
            clock_indicator,
            armed: false,
        };
        lines.set_trigger(true);
        lines.set_recv_indicator(false);
        let _ = lines.clock_indicator.set_low();
        lines
    }
}

impl<T, D, R, C> GameportLines for PinLines<T, D, R, C>
where
    T: OutputPin,
    D: InputPin,
    R: OutputPin,
    C: OutputPin,
{
    #[inline]
    fn set_trigger(&mut self, high: bool) {
        let _ = if high {
            self.trigger.set_high()
        } else {
            self.trigger.set_low()
        };
    }

    #[inline]
    fn arm_edges(&mut self) {
        self.armed = true;
    }

    #[inline]
    fn disarm_edges(&mut self) {
        self.armed = false;
    }

    #[inline]
    fn edges_armed(&self) -> bool {
        self.armed
    }

    #[inline]
    fn set_recv_indicator(&mut self, on: bool) {
        let _ = if on {
            self.recv_indicator.set_high()
        } else {
            self.recv_indicator.set_low()
        };
    }

    #[inline]
    fn pulse_clock_indicator(&mut self) {
        let _ = self.clock_indicator.set_high();
        let _ = self.clock_indicator.set_low();
    }
}

impl<T, D, R, C> DataLine for PinLines<T, D, R, C>
where
    D: InputPin,
{
    #[inline]
    fn read_data(&mut self) -> bool {
        self.data.is_high().unwrap_or(false)
    }
}

#[cfg(test)]
pub(crate) mod mock {
    //! Shared-state mock pins for host tests.

    extern crate std;

    use core::convert::Infallible;
    use embedded_hal::digital::{ErrorType, InputPin, OutputPin};
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;
    use std::vec::Vec;

    /// Output pin recording every level it was driven to.
    #[derive(Clone, Default)]
    pub struct MockOutput {
        pub history: Rc<RefCell<Vec<bool>>>,
    }

    impl MockOutput {
        pub fn level(&self) -> Option<bool> {
            self.history.borrow().last().copied()
        }

        pub fn rising_edges(&self) -> usize {
            self.history
                .borrow()
                .windows(2)
                .filter(|w| !w[0] && w[1])
                .count()
        }
    }

    impl ErrorType for MockOutput {
        type Error = Infallible;
    }

    impl OutputPin for MockOutput {
        fn set_low(&mut self) -> Result<(), Self::Error> {
            self.history.borrow_mut().push(false);
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Self::Error> {
            self.history.borrow_mut().push(true);
            Ok(())
        }
    }

    /// Input pin whose level the test sets.
    #[derive(Clone, Default)]
    pub struct MockInput {
        pub level: Rc<Cell<bool>>,
    }

    impl ErrorType for MockInput {
        type Error = Infallible;
    }

    impl InputPin for MockInput {
        fn is_high(&mut self) -> Result<bool, Self::Error> {
            Ok(self.level.get())
        }

        fn is_low(&mut self) -> Result<bool, Self::Error> {
            Ok(!self.level.get())
        }
    }

    /// Input pin that always fails to read.
    pub struct BrokenInput;

    impl ErrorType for BrokenInput {
        type Error = embedded_hal::digital::ErrorKind;
    }

    impl InputPin for BrokenInput {
        fn is_high(&mut self) -> Result<bool, Self::Error> {
            Err(embedded_hal::digital::ErrorKind::Other)
        }

        fn is_low(&mut self) -> Result<bool, Self::Error> {
            Err(embedded_hal::digital::ErrorKind::Other)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::mock::{BrokenInput, MockInput, MockOutput};
    use super::*;

    #[test]
    fn test_new_drives_trigger_high() {
        let trigger = MockOutput::default();
        let _lines = PinLines::new(trigger.clone(), MockInput::default());
        assert_eq!(trigger.level(), Some(true));
    }

    #[test]
    fn test_read_data_follows_input() {
        let data = MockInput::default();
        let mut lines = PinLines::new(MockOutput::default(), data.clone());
        assert!(!lines.read_data());
        data.level.set(true);
        assert!(lines.read_data());
    }

    #[test]
    fn test_failed_read_samples_low() {
        let mut lines = PinLines::new(MockOutput::default(), BrokenInput);
        assert!(!lines.read_data());
    }

    #[test]
    fn test_arming_flag() {
        let mut lines = PinLines::new(MockOutput::default(), MockInput::default());
        assert!(!lines.edges_armed());
        lines.arm_edges();
        assert!(lines.edges_armed());
        lines.disarm_edges();
        assert!(!lines.edges_armed());
    }

    #[test]
    fn test_clock_indicator_pulses() {
        let clock = MockOutput::default();
        let mut lines = PinLines::with_indicators(
            MockOutput::default(),
            MockInput::default(),
            MockOutput::default(),
            clock.clone(),
        );
        lines.pulse_clock_indicator();
        lines.pulse_clock_indicator();
        assert_eq!(clock.rising_edges(), 2);
        assert_eq!(clock.level(), Some(false));
    }
}
