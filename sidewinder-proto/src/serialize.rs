//! Serial log line serialization for decoded samples.
//!
//! # Line Format
//!
//! ```text
//! x=<x> y=<y> r=<r> m=<m>\n
//! ```
//!
//! # Example
//!
//! ```
//! use sidewinder_proto::{JoystickSample, Serialize};
//!
//! let sample = JoystickSample {
//!     fire: true,
//!     x: 512,
//!     m: 64,
//!     ..JoystickSample::empty()
//! };
//! let mut buf = [0u8; 32];
//! let len = sample.serialize(&mut buf).unwrap();
//! assert_eq!(&buf[..len], b"x=512 y=0 r=0 m=64\n");
//! ```

use crate::fmt::{write_u16, write_u8};
use crate::types::JoystickSample;

/// Largest serialized line.
///
/// `x=1023 y=1023 r=63 m=127\n` is 25 bytes. Rounded up to 32.
pub const MAX_LINE_SIZE: usize = 32;

/// Written once when the logger comes up.
pub const READY_BANNER: &[u8] = b"ready\n";

/// Error type for serialization operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SerializeError {
    /// The output buffer is too small to hold the line.
    BufferTooSmall,
    /// A write operation failed (for I/O adapters).
    WriteError,
}

impl core::fmt::Display for SerializeError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::BufferTooSmall => write!(f, "buffer too small"),
            Self::WriteError => write!(f, "write error"),
        }
    }
}

/// Cursor over the output buffer. Callers check the length up front.
struct LineWriter<'a> {
    buf: &'a mut [u8],
    pos: usize,
}

impl<'a> LineWriter<'a> {
    fn new(buf: &'a mut [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    fn text(&mut self, bytes: &[u8]) {
        self.buf[self.pos..self.pos + bytes.len()].copy_from_slice(bytes);
        self.pos += bytes.len();
    }

    fn u16(&mut self, value: u16) {
        self.pos += write_u16(&mut self.buf[self.pos..], value);
    }

    fn u8(&mut self, value: u8) {
        self.pos += write_u8(&mut self.buf[self.pos..], value);
    }

    fn finish(mut self) -> usize {
        self.text(b"\n");
        self.pos
    }
}

/// Extension trait for writing samples as serial log lines.
pub trait Serialize {
    /// Serialize to the provided buffer.
    ///
    /// Returns the number of bytes written on success.
    ///
    /// # Errors
    ///
    /// Returns [`SerializeError::BufferTooSmall`] if the buffer is shorter
    /// than [`MAX_LINE_SIZE`].
    fn serialize(&self, buf: &mut [u8]) -> Result<usize, SerializeError>;

    /// Serialize to a `heapless::Vec`.
    ///
    /// # Errors
    ///
    /// Returns [`SerializeError::BufferTooSmall`] if `N` is not large enough.
    #[cfg(feature = "heapless")]
    fn serialize_to_vec<const N: usize>(&self) -> Result<heapless::Vec<u8, N>, SerializeError> {
        let mut vec = heapless::Vec::new();
        vec.resize(N, 0)
            .map_err(|_| SerializeError::BufferTooSmall)?;
        let len = self.serialize(&mut vec)?;
        vec.truncate(len);
        Ok(vec)
    }

    /// Serialize to a `core::fmt::Write` implementation.
    ///
    /// # Errors
    ///
    /// Returns [`SerializeError::WriteError`] if the write fails.
    fn serialize_fmt<W: core::fmt::Write>(&self, writer: &mut W) -> Result<(), SerializeError> {
        let mut buf = [0u8; MAX_LINE_SIZE];
        let len = self.serialize(&mut buf)?;
        let s = core::str::from_utf8(&buf[..len]).map_err(|_| SerializeError::WriteError)?;
        writer.write_str(s).map_err(|_| SerializeError::WriteError)
    }

    /// Serialize to an `embedded_io::Write` implementation.
    ///
    /// # Errors
    ///
    /// Returns [`SerializeError::WriteError`] if the write fails.
    #[cfg(feature = "embedded-io")]
    fn serialize_io<W: embedded_io::Write>(&self, writer: &mut W) -> Result<(), SerializeError> {
        let mut buf = [0u8; MAX_LINE_SIZE];
        let len = self.serialize(&mut buf)?;
        writer
            .write_all(&buf[..len])
            .map_err(|_| SerializeError::WriteError)
    }
}

impl Serialize for JoystickSample {
    fn serialize(&self, buf: &mut [u8]) -> Result<usize, SerializeError> {
        if buf.len() < MAX_LINE_SIZE {
            return Err(SerializeError::BufferTooSmall);
        }

        let mut line = LineWriter::new(buf);
        line.text(b"x=");
        line.u16(self.x);
        line.text(b" y=");
        line.u16(self.y);
        line.text(b" r=");
        line.u8(self.r);
        line.text(b" m=");
        line.u8(self.m);

        Ok(line.finish())
    }
}
