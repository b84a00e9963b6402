//! Platform-agnostic SideWinder gameport decoder.
//!
//! The decoder polls the joystick on a fixed cycle: a long idle phase, then
//! a transmission request followed by a short reading phase during which
//! every rising edge on the clock line contributes one data bit. Once 48
//! bits are in, the frame is decoded and published for the consumer.
//!
//! # Overview
//!
//! - [`timing`]: phases and their durations ([`TimingConfig`], [`DEFAULT_TIMING`])
//! - [`sampler`]: the frame under assembly ([`WorkingFrame`])
//! - [`snapshot`]: tear-free handoff to the consumer ([`SampleSlot`])
//! - [`observer`]: valid/invalid hooks ([`SampleObserver`], [`Callbacks`])
//! - [`lines`]: the gameport signal lines ([`GameportLines`], [`DataLine`], [`PinLines`])
//! - [`decoder`]: timer and edge handlers tying it together ([`Decoder`])
//! - [`input`] / [`output`] / [`bridge`]: async consumer side
//!   ([`SampleSource`], [`SampleSink`], [`SampleBridge`])
//!
//! # Contexts
//!
//! [`Decoder::on_timer_tick`] and the edge handlers
//! ([`Decoder::on_clock_edge`], [`Decoder::on_sampled_edge`]) run in
//! interrupt context and must never run concurrently with each other. The
//! consumer only touches the [`SampleSlot`]: [`SampleSlot::read`] and
//! [`SampleSlot::is_valid`] are safe from any context.
//!
//! # Example
//!
//! ```
//! use core::cell::Cell;
//! use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
//! use sidewinder_core::{
//!     DataLine, Decoder, GameportLines, JoystickSample, SampleSlot, DEFAULT_TIMING,
//! };
//!
//! struct Lines { armed: bool }
//!
//! impl DataLine for Lines {
//!     fn read_data(&mut self) -> bool { false }
//! }
//!
//! impl GameportLines for Lines {
//!     fn set_trigger(&mut self, _high: bool) {}
//!     fn arm_edges(&mut self) { self.armed = true }
//!     fn disarm_edges(&mut self) { self.armed = false }
//!     fn edges_armed(&self) -> bool { self.armed }
//! }
//!
//! static SLOT: SampleSlot<CriticalSectionRawMutex> = SampleSlot::new();
//!
//! let frames = Cell::new(0);
//! let mut decoder = Decoder::new(Lines { armed: false }, &SLOT, DEFAULT_TIMING)
//!     .register_callbacks(|_: &JoystickSample| frames.set(frames.get() + 1), || {});
//!
//! decoder.on_timer_tick();
//! for _ in 0..48 {
//!     decoder.on_clock_edge();
//! }
//! decoder.on_timer_tick();
//!
//! assert_eq!(frames.get(), 1);
//! assert!(SLOT.is_valid());
//! assert_eq!(SLOT.read(), JoystickSample::empty());
//! ```
//!
//! # Features
//!
//! - **`std`**: Enable standard library support (for host testing)
//! - **`defmt`**: Derive `defmt::Format` on public types

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "std")]
extern crate std;

pub mod bridge;
pub mod decoder;
pub mod input;
pub mod lines;
pub mod observer;
pub mod output;
pub mod sampler;
pub mod snapshot;
pub mod timing;

pub use bridge::{BridgeError, SampleBridge};
pub use decoder::Decoder;
pub use input::{SampleSource, SourceError};
pub use lines::{DataLine, GameportLines, NoPin, PinLines};
pub use observer::{Callbacks, NoCallbacks, SampleObserver};
pub use output::{SampleSink, SinkError};
pub use sampler::{PushOutcome, WorkingFrame};
pub use snapshot::SampleSlot;
pub use timing::{TimingConfig, TimingPhase, DEFAULT_TIMING, IDLE_TICKS, READING_TICKS, TICK_HZ};

pub use sidewinder_proto::{Buttons, JoystickSample, FRAME_BITS, FRAME_BYTES};
