//! Notification hooks fired by the decoder.
//!
//! Hooks run synchronously in the decoder's execution context (on target,
//! with the decoder's interrupt priority or with interrupts masked). Keep
//! them short and never block in them.

use sidewinder_proto::JoystickSample;

/// Receives the decoder's valid/invalid transitions.
pub trait SampleObserver {
    /// A complete frame was just published.
    fn sample_valid(&mut self, sample: &JoystickSample);

    /// The published sample is stale from now on: a new transmission was
    /// requested and the working frame is about to be cleared.
    fn sample_invalid(&mut self);
}

/// Observer that ignores every notification.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoCallbacks;

impl SampleObserver for NoCallbacks {
    #[inline]
    fn sample_valid(&mut self, _sample: &JoystickSample) {}

    #[inline]
    fn sample_invalid(&mut self) {}
}

/// A pair of closures used as an observer.
///
/// Built by [`crate::Decoder::register_callbacks`].
pub struct Callbacks<V, I> {
    on_valid: V,
    on_invalid: I,
}

impl<V, I> Callbacks<V, I>
where
    V: FnMut(&JoystickSample),
    I: FnMut(),
{
    pub fn new(on_valid: V, on_invalid: I) -> Self {
        Self {
            on_valid,
            on_invalid,
        }
    }
}

impl<V, I> SampleObserver for Callbacks<V, I>
where
    V: FnMut(&JoystickSample),
    I: FnMut(),
{
    #[inline]
    fn sample_valid(&mut self, sample: &JoystickSample) {
        (self.on_valid)(sample)
    }

    #[inline]
    fn sample_invalid(&mut self) {
        (self.on_invalid)()
    }
}

impl<T: SampleObserver + ?Sized> SampleObserver for &mut T {
    #[inline]
    fn sample_valid(&mut self, sample: &JoystickSample) {
        (**self).sample_valid(sample)
    }

    #[inline]
    fn sample_invalid(&mut self) {
        (**self).sample_invalid()
    }
}
