//! Sample sink trait and error types.

use core::future::Future;
use sidewinder_proto::{JoystickSample, SerializeError};

/// Error type for sample sinks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SinkError {
    /// Serial/transport write failed.
    Io,
    /// Sink not ready to accept data.
    NotReady,
    /// Sample could not be rendered into the sink's buffer.
    Serialize,
}

impl From<SerializeError> for SinkError {
    fn from(err: SerializeError) -> Self {
        match err {
            SerializeError::BufferTooSmall => SinkError::Serialize,
            SerializeError::WriteError => SinkError::Io,
        }
    }
}

/// Async destination for decoded joystick samples (serial log, HID, ...).
pub trait SampleSink {
    /// Emit one sample. May wait until the previous one has been written.
    fn send(&mut self, sample: &JoystickSample) -> impl Future<Output = Result<(), SinkError>>;

    /// Check if the sink is ready to accept data.
    fn is_ready(&self) -> bool;
}
