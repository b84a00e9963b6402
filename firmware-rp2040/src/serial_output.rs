//! Serial log output for decoded samples.
//!
//! One line per forwarded sample, in the format written by
//! [`Serialize`]:
//!
//! ```text
//! x=<x> y=<y> r=<r> m=<m>\n
//! ```
//!
//! # Pins
//!
//! Uses UART0 TX on GPIO 0. Nothing is read back.

use embassy_rp::uart::{Async, UartTx};
use sidewinder_core::{JoystickSample, SampleSink, SinkError};
use sidewinder_proto::{Serialize, MAX_LINE_SIZE, READY_BANNER};

/// UART-backed [`SampleSink`].
pub struct UartLogSink<'d> {
    tx: UartTx<'d, Async>,
    buffer: [u8; MAX_LINE_SIZE],
}

impl<'d> UartLogSink<'d> {
    #[must_use]
    pub fn new(tx: UartTx<'d, Async>) -> Self {
        Self {
            tx,
            buffer: [0; MAX_LINE_SIZE],
        }
    }

    /// Announce that the logger is up.
    pub async fn write_banner(&mut self) -> Result<(), SinkError> {
        self.tx.write(READY_BANNER).await.map_err(|_| SinkError::Io)
    }
}

impl SampleSink for UartLogSink<'_> {
    async fn send(&mut self, sample: &JoystickSample) -> Result<(), SinkError> {
        let len = sample.serialize(&mut self.buffer)?;
        self.tx
            .write(&self.buffer[..len])
            .await
            .map_err(|_| SinkError::Io)
    }

    fn is_ready(&self) -> bool {
        // UART TX is always ready if we have the peripheral
        true
    }
}
