//! Consumer-side access to the decoder's published samples.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use sidewinder_core::{JoystickSample, SampleSlot, SampleSource, SourceError};

/// Waits for the decoder to publish a frame and copies it out of the slot.
pub struct SnapshotSource {
    slot: &'static SampleSlot<CriticalSectionRawMutex>,
    ready: &'static Signal<CriticalSectionRawMutex, ()>,
}

impl SnapshotSource {
    #[must_use]
    pub fn new(
        slot: &'static SampleSlot<CriticalSectionRawMutex>,
        ready: &'static Signal<CriticalSectionRawMutex, ()>,
    ) -> Self {
        Self { slot, ready }
    }

    /// Last published sample, valid or not.
    #[inline]
    #[must_use]
    pub fn read_sample(&self) -> JoystickSample {
        self.slot.read()
    }
}

impl SampleSource for SnapshotSource {
    async fn receive(&mut self) -> Result<JoystickSample, SourceError> {
        self.ready.wait().await;
        // the next transmission request may already have invalidated it
        self.slot.latest().ok_or(SourceError::Stale)
    }

    fn is_valid(&self) -> bool {
        self.slot.is_valid()
    }
}
