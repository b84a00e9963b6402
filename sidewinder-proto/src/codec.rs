//! Bit-level frame codec.
//!
//! A frame is 48 bits packed into 6 bytes. Bit `n` (transmission order,
//! 0-based) is stored in byte `n / 8` at bit position `n % 8`. Fields are
//! read by offset and width from [`FIELD_TABLE`]; nothing here depends on
//! struct layout or host endianness.

use crate::types::JoystickSample;

/// Number of bits in one frame (one per clock edge).
pub const FRAME_BITS: usize = 48;

/// Number of bytes holding one frame.
pub const FRAME_BYTES: usize = FRAME_BITS / 8;

/// Position of one field inside the frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FieldLayout {
    /// Frame bit index of the field's least significant bit.
    pub offset: u8,
    /// Width in bits.
    pub width: u8,
}

impl FieldLayout {
    const fn new(offset: u8, width: u8) -> Self {
        Self { offset, width }
    }

    /// Mask for a value of this field's width.
    #[inline]
    #[must_use]
    pub const fn mask(self) -> u64 {
        (1u64 << self.width) - 1
    }

    /// First frame bit after this field.
    #[inline]
    #[must_use]
    pub const fn end(self) -> u8 {
        self.offset + self.width
    }

    /// Extract this field from a frame read as a 48-bit integer.
    #[inline]
    #[must_use]
    pub const fn extract(self, raw: u64) -> u64 {
        (raw >> self.offset) & self.mask()
    }

    /// Insert `value` (truncated to the field width) into `raw`.
    #[inline]
    #[must_use]
    pub const fn insert(self, raw: u64, value: u64) -> u64 {
        (raw & !(self.mask() << self.offset)) | ((value & self.mask()) << self.offset)
    }
}

pub const FIRE: FieldLayout = FieldLayout::new(0, 1);
/// Frame bit 1, see [`JoystickSample::top_large`].
pub const TOP: FieldLayout = FieldLayout::new(1, 1);
pub const TOP_LARGE: FieldLayout = TOP;
pub const TOP_UP: FieldLayout = FieldLayout::new(2, 1);
pub const TOP_DOWN: FieldLayout = FieldLayout::new(3, 1);
pub const BTN_A: FieldLayout = FieldLayout::new(4, 1);
pub const BTN_B: FieldLayout = FieldLayout::new(5, 1);
pub const BTN_C: FieldLayout = FieldLayout::new(6, 1);
pub const BTN_D: FieldLayout = FieldLayout::new(7, 1);
pub const SHIFT: FieldLayout = FieldLayout::new(8, 1);
pub const X: FieldLayout = FieldLayout::new(9, 10);
pub const Y: FieldLayout = FieldLayout::new(19, 10);
pub const M: FieldLayout = FieldLayout::new(29, 7);
pub const R: FieldLayout = FieldLayout::new(36, 6);
pub const HEAD: FieldLayout = FieldLayout::new(42, 4);
pub const RESERVED: FieldLayout = FieldLayout::new(46, 1);
pub const PARITY: FieldLayout = FieldLayout::new(47, 1);

/// Every field in transmission order. Together they cover bits 0..48
/// exactly once.
pub const FIELD_TABLE: [FieldLayout; 16] = [
    FIRE, TOP, TOP_UP, TOP_DOWN, BTN_A, BTN_B, BTN_C, BTN_D, SHIFT, X, Y, M, R, HEAD, RESERVED,
    PARITY,
];

/// Set bit `bit_index` of `buffer` if `bit_value` is high.
///
/// A low bit is left untouched; the buffer is expected to start zeroed.
/// Indices past the end of the frame are ignored.
#[inline]
pub fn pack(bit_index: usize, bit_value: bool, buffer: &mut [u8; FRAME_BYTES]) {
    if bit_value && bit_index < FRAME_BITS {
        buffer[bit_index / 8] |= 1 << (bit_index % 8);
    }
}

/// Read bit `bit_index` of a frame. Out-of-range indices read low.
#[inline]
#[must_use]
pub fn bit(buffer: &[u8; FRAME_BYTES], bit_index: usize) -> bool {
    bit_index < FRAME_BITS && buffer[bit_index / 8] & (1 << (bit_index % 8)) != 0
}

#[inline]
fn to_raw(buffer: &[u8; FRAME_BYTES]) -> u64 {
    let mut bytes = [0u8; 8];
    bytes[..FRAME_BYTES].copy_from_slice(buffer);
    u64::from_le_bytes(bytes)
}

#[inline]
fn from_raw(raw: u64) -> [u8; FRAME_BYTES] {
    let bytes = raw.to_le_bytes();
    let mut buffer = [0u8; FRAME_BYTES];
    buffer.copy_from_slice(&bytes[..FRAME_BYTES]);
    buffer
}

/// Decode a complete frame into named fields.
///
/// Always succeeds; parity and the reserved bit are copied, not checked.
#[must_use]
pub fn decode(buffer: &[u8; FRAME_BYTES]) -> JoystickSample {
    let raw = to_raw(buffer);
    let flag = |field: FieldLayout| field.extract(raw) != 0;

    JoystickSample {
        fire: flag(FIRE),
        top: flag(TOP),
        top_up: flag(TOP_UP),
        top_down: flag(TOP_DOWN),
        btn_a: flag(BTN_A),
        btn_b: flag(BTN_B),
        btn_c: flag(BTN_C),
        btn_d: flag(BTN_D),
        shift: flag(SHIFT),
        x: X.extract(raw) as u16,
        y: Y.extract(raw) as u16,
        m: M.extract(raw) as u8,
        r: R.extract(raw) as u8,
        head: HEAD.extract(raw) as u8,
        reserved: flag(RESERVED),
        parity: flag(PARITY),
    }
}

/// Pack a sample back into frame bytes.
///
/// Values wider than their field are truncated to the field width, so
/// `decode(&encode(s))` equals `s` for every in-range sample.
#[must_use]
pub fn encode(sample: &JoystickSample) -> [u8; FRAME_BYTES] {
    let fields: [(FieldLayout, u64); 16] = [
        (FIRE, sample.fire as u64),
        (TOP, sample.top as u64),
        (TOP_UP, sample.top_up as u64),
        (TOP_DOWN, sample.top_down as u64),
        (BTN_A, sample.btn_a as u64),
        (BTN_B, sample.btn_b as u64),
        (BTN_C, sample.btn_c as u64),
        (BTN_D, sample.btn_d as u64),
        (SHIFT, sample.shift as u64),
        (X, sample.x as u64),
        (Y, sample.y as u64),
        (M, sample.m as u64),
        (R, sample.r as u64),
        (HEAD, sample.head as u64),
        (RESERVED, sample.reserved as u64),
        (PARITY, sample.parity as u64),
    ];

    let raw = fields
        .iter()
        .fold(0u64, |raw, &(field, value)| field.insert(raw, value));
    from_raw(raw)
}
