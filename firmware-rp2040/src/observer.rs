//! Decoder callbacks for the firmware.

use embassy_rp::gpio::{Level, Output};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use sidewinder_core::{JoystickSample, SampleObserver};

/// Wakes the logger on every completed frame and mirrors the fire button
/// on an active-low LED.
///
/// Runs in the decoder's interrupt context; everything here is
/// non-blocking.
pub struct FrameNotifier {
    ready: &'static Signal<CriticalSectionRawMutex, ()>,
    fire_led: Output<'static>,
}

impl FrameNotifier {
    /// Turns the LED off.
    #[must_use]
    pub fn new(
        ready: &'static Signal<CriticalSectionRawMutex, ()>,
        mut fire_led: Output<'static>,
    ) -> Self {
        fire_led.set_level(Level::High);
        Self { ready, fire_led }
    }
}

impl SampleObserver for FrameNotifier {
    fn sample_valid(&mut self, sample: &JoystickSample) {
        let level = if sample.fire { Level::Low } else { Level::High };
        self.fire_led.set_level(level);
        self.ready.signal(());
    }

    fn sample_invalid(&mut self) {
        self.ready.reset();
    }
}
