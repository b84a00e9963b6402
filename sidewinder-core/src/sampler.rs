//! Working frame filled one bit per clock edge.

use sidewinder_proto::{pack, FRAME_BITS, FRAME_BYTES};

/// What happened to a bit handed to [`WorkingFrame::push_bit`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PushOutcome {
    /// Stored; more bits are expected.
    Stored,
    /// Stored as the last bit; the frame is now complete.
    Completed,
    /// The frame was already complete; the bit was dropped.
    Ignored,
}

/// Frame under assembly plus the index of the next expected bit.
///
/// `bit_index` never exceeds [`FRAME_BITS`]. Bits arriving after the frame
/// is complete are dropped without touching the buffer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WorkingFrame {
    bytes: [u8; FRAME_BYTES],
    bit_index: u8,
}

impl WorkingFrame {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            bytes: [0; FRAME_BYTES],
            bit_index: 0,
        }
    }

    /// Zero the buffer and rewind to bit 0.
    #[inline]
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Store one sampled data level at the current index and advance.
    ///
    /// Low levels need no write since the buffer starts zeroed.
    #[inline]
    pub fn push_bit(&mut self, level: bool) -> PushOutcome {
        let index = self.bit_index as usize;
        if index >= FRAME_BITS {
            return PushOutcome::Ignored;
        }

        pack(index, level, &mut self.bytes);
        self.bit_index += 1;

        if self.is_complete() {
            PushOutcome::Completed
        } else {
            PushOutcome::Stored
        }
    }

    /// Index of the next bit to be stored (0..=48).
    #[inline]
    #[must_use]
    pub const fn bit_index(&self) -> u8 {
        self.bit_index
    }

    #[inline]
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.bit_index as usize == FRAME_BITS
    }

    #[inline]
    #[must_use]
    pub const fn bytes(&self) -> &[u8; FRAME_BYTES] {
        &self.bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sidewinder_proto::bit;

    #[test]
    fn test_push_until_complete() {
        let mut frame = WorkingFrame::new();
        for i in 0..FRAME_BITS - 1 {
            assert_eq!(frame.push_bit(i % 3 == 0), PushOutcome::Stored);
        }
        assert!(!frame.is_complete());
        assert_eq!(frame.push_bit(true), PushOutcome::Completed);
        assert!(frame.is_complete());
        assert_eq!(frame.bit_index() as usize, FRAME_BITS);

        for i in 0..FRAME_BITS - 1 {
            assert_eq!(bit(frame.bytes(), i), i % 3 == 0);
        }
        assert!(bit(frame.bytes(), FRAME_BITS - 1));
    }

    #[test]
    fn test_extra_bits_are_ignored() {
        let mut frame = WorkingFrame::new();
        for _ in 0..FRAME_BITS {
            frame.push_bit(false);
        }
        let before = *frame.bytes();

        for _ in 0..100 {
            assert_eq!(frame.push_bit(true), PushOutcome::Ignored);
        }
        assert_eq!(frame.bytes(), &before);
        assert_eq!(frame.bit_index() as usize, FRAME_BITS);
    }

    #[test]
    fn test_reset_clears_bits_and_index() {
        let mut frame = WorkingFrame::new();
        for _ in 0..30 {
            frame.push_bit(true);
        }
        frame.reset();
        assert_eq!(frame.bit_index(), 0);
        assert_eq!(frame.bytes(), &[0; FRAME_BYTES]);
    }
}
