//! SideWinder gameport frame layout, decoding, and serial log serialization.
//!
//! A SideWinder-style digital joystick answers each trigger pulse with a
//! 48-bit frame, one bit per clock edge. This crate is the pure half of the
//! decoder: it knows where every field lives in those 48 bits, but nothing
//! about timing or pins.
//!
//! - **Types**: [`JoystickSample`] (one decoded frame) and [`Buttons`]
//!   (bitset view of the nine button bits)
//! - **Codec**: [`pack()`], [`decode()`], [`encode()`] and the bit-offset
//!   table ([`FIELD_TABLE`])
//! - **Serialization**: [`Serialize`] writes the serial log line
//!
//! # Frame Layout
//!
//! Bits are numbered in transmission order, starting at 0. Bit `n` lives in
//! byte `n / 8` at position `n % 8`. Multi-bit fields are least significant
//! bit first.
//!
//! ```text
//!  0 fire        9..19 x       42..46 head
//!  1 top         19..29 y      46 reserved
//!  2 top_up      29..36 m      47 parity
//!  3 top_down    36..42 r
//!  4..8 a b c d
//!  8 shift
//! ```
//!
//! # Example
//!
//! ```
//! use sidewinder_proto::{decode, pack, FRAME_BITS, FRAME_BYTES};
//!
//! // fire pressed, x = 512 (bit 9 of the x field is frame bit 18)
//! let mut frame = [0u8; FRAME_BYTES];
//! for index in 0..FRAME_BITS {
//!     pack(index, index == 0 || index == 18, &mut frame);
//! }
//!
//! let sample = decode(&frame);
//! assert!(sample.fire);
//! assert_eq!(sample.x, 512);
//! assert_eq!(sample.y, 0);
//! ```
//!
//! # Log Line
//!
//! ```text
//! x=<x> y=<y> r=<r> m=<m>\n
//! ```
//!
//! All values unsigned decimal. Buttons, hat, parity and the reserved bit
//! are captured by the codec but not logged.
//!
//! # Features
//!
//! - **`std`**: Enable standard library support (for host testing)
//! - **`defmt`**: Enable defmt formatting (for embedded logging)
//! - **`heapless`**: Enable `serialize_to_vec()`
//! - **`embedded-io`**: Enable `serialize_io()` for I/O peripherals

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "std")]
extern crate std;

pub mod codec;
mod fmt;
pub mod serialize;
pub mod types;

pub use codec::{
    bit, decode, encode, pack, FieldLayout, FIELD_TABLE, FRAME_BITS, FRAME_BYTES,
};
pub use serialize::{Serialize, SerializeError, MAX_LINE_SIZE, READY_BANNER};
pub use types::{Buttons, JoystickSample};
