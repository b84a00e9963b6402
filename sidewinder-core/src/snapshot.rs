//! Tear-free handoff of completed frames to the consumer.
//!
//! The decoder is the only writer, the consumer the only reader. Every access
//! copies the whole published value inside the mutex, so a reader never sees
//! bits from two different frames. There is no queue: a slow reader simply
//! misses intermediate frames.

use core::cell::Cell;

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::blocking_mutex::Mutex;
use sidewinder_proto::{decode, JoystickSample, FRAME_BYTES};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Published {
    sample: JoystickSample,
    valid: bool,
    generation: u32,
}

impl Published {
    const EMPTY: Self = Self {
        sample: JoystickSample::empty(),
        valid: false,
        generation: 0,
    };
}

/// Last completely captured frame, shared between decoder and consumer.
///
/// With `CriticalSectionRawMutex` every access runs with interrupts masked,
/// which is what makes it safe to share with the decoder's interrupt
/// context.
///
/// # Example
///
/// ```
/// use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
/// use sidewinder_core::SampleSlot;
///
/// let slot: SampleSlot<CriticalSectionRawMutex> = SampleSlot::new();
/// assert!(!slot.is_valid());
///
/// slot.publish(&[0x01, 0, 0, 0, 0, 0]);
/// assert!(slot.is_valid());
/// assert!(slot.read().fire);
///
/// slot.invalidate();
/// assert_eq!(slot.latest(), None);
/// // the last published sample stays readable
/// assert!(slot.read().fire);
/// ```
pub struct SampleSlot<M: RawMutex> {
    inner: Mutex<M, Cell<Published>>,
}

impl<M: RawMutex> SampleSlot<M> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(Cell::new(Published::EMPTY)),
        }
    }

    /// Decode a complete frame and make it the published sample.
    ///
    /// Returns the decoded sample.
    pub fn publish(&self, frame: &[u8; FRAME_BYTES]) -> JoystickSample {
        let sample = decode(frame);
        self.inner.lock(|cell| {
            let previous = cell.get();
            cell.set(Published {
                sample,
                valid: true,
                generation: previous.generation.wrapping_add(1),
            });
        });
        sample
    }

    /// Mark the published sample stale. The sample itself is kept.
    pub fn invalidate(&self) {
        self.inner.lock(|cell| {
            let mut published = cell.get();
            published.valid = false;
            cell.set(published);
        });
    }

    /// Copy out the last published sample, valid or not.
    ///
    /// Returns an all-zero sample if nothing was ever published.
    #[must_use]
    pub fn read(&self) -> JoystickSample {
        self.inner.lock(|cell| cell.get().sample)
    }

    /// Copy out the published sample if it has not been invalidated since.
    #[must_use]
    pub fn latest(&self) -> Option<JoystickSample> {
        self.inner.lock(|cell| {
            let published = cell.get();
            published.valid.then_some(published.sample)
        })
    }

    /// Whether a publish happened since the last invalidate.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.inner.lock(|cell| cell.get().valid)
    }

    /// Number of frames published so far (wrapping). Diagnostic only.
    #[must_use]
    pub fn generation(&self) -> u32 {
        self.inner.lock(|cell| cell.get().generation)
    }
}

impl<M: RawMutex> Default for SampleSlot<M> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
    use sidewinder_proto::encode;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::thread;

    type Slot = SampleSlot<CriticalSectionRawMutex>;

    fn sample(x: u16, y: u16, m: u8, fire: bool) -> JoystickSample {
        JoystickSample {
            fire,
            x,
            y,
            m,
            r: (x % 64) as u8,
            head: (y % 16) as u8,
            ..JoystickSample::empty()
        }
    }

    #[test]
    fn test_starts_invalid_and_empty() {
        let slot = Slot::new();
        assert!(!slot.is_valid());
        assert_eq!(slot.latest(), None);
        assert_eq!(slot.read(), JoystickSample::empty());
        assert_eq!(slot.generation(), 0);
    }

    #[test]
    fn test_publish_then_invalidate() {
        let slot = Slot::new();
        let a = sample(100, 200, 3, true);

        slot.publish(&encode(&a));
        assert!(slot.is_valid());
        assert_eq!(slot.latest(), Some(a));
        assert_eq!(slot.generation(), 1);

        slot.invalidate();
        assert!(!slot.is_valid());
        assert_eq!(slot.latest(), None);
        assert_eq!(slot.read(), a);
    }

    #[test]
    fn test_last_write_wins() {
        let slot = Slot::new();
        let a = sample(1, 2, 3, false);
        let b = sample(1000, 999, 127, true);

        slot.publish(&encode(&a));
        slot.publish(&encode(&b));
        assert_eq!(slot.read(), b);
        assert_eq!(slot.generation(), 2);
    }

    #[test]
    fn test_concurrent_reads_never_tear() {
        let slot = Slot::new();
        // every field differs between frames so a mix would be detectable
        let frames = [
            sample(0x3FF, 0x000, 0x7F, true),
            sample(0x000, 0x3FF, 0x00, false),
            sample(0x155, 0x2AA, 0x55, true),
        ];
        let done = AtomicBool::new(false);

        thread::scope(|s| {
            s.spawn(|| {
                for round in 0..20_000 {
                    slot.publish(&encode(&frames[round % frames.len()]));
                    if round % 7 == 0 {
                        slot.invalidate();
                    }
                }
                done.store(true, Ordering::Release);
            });

            s.spawn(|| {
                let mut reads = 0u32;
                while !done.load(Ordering::Acquire) || reads < 1000 {
                    let seen = slot.read();
                    assert!(
                        seen == JoystickSample::empty() || frames.contains(&seen),
                        "torn read: {:?}",
                        seen
                    );
                    if let Some(latest) = slot.latest() {
                        assert!(frames.contains(&latest));
                    }
                    reads += 1;
                }
            });
        });

        assert_eq!(slot.generation(), 20_000);
    }
}
