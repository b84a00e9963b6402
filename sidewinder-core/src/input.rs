//! Sample source trait and error types.

use core::future::Future;
use sidewinder_proto::JoystickSample;

/// Error type for sample sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SourceError {
    /// The published sample was invalidated before it could be read.
    Stale,
    /// Transport error between decoder and consumer.
    Io,
}

/// Async source of decoded joystick samples.
///
/// Implementations wait for the decoder to publish and copy the sample out;
/// a sample that went stale in the meantime is reported as
/// [`SourceError::Stale`] rather than returned.
pub trait SampleSource {
    /// Wait for and return the next published sample.
    fn receive(&mut self) -> impl Future<Output = Result<JoystickSample, SourceError>>;

    /// Whether the last published sample is still current.
    fn is_valid(&self) -> bool;
}
