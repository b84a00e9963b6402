//! SideWinder gameport joystick decoder for RP2040.
//!
//! Polls a SideWinder-style digital joystick on the gameport lines, decodes
//! each 48-bit frame and logs the decoded samples over UART.
//!
//! # Hardware Configuration
//!
//! | Function        | GPIO | Description |
//! |-----------------|------|-------------|
//! | Timing          | 2    | Output, idle high, pulsed low to request a frame |
//! | Data            | 3    | PIO0 input, sampled on each clock edge |
//! | Clock           | 4    | PIO0 input, one rising edge per transmitted bit |
//! | Recv indicator  | 6    | High while a complete frame is published |
//! | Clock indicator | 7    | Pulsed once per captured bit |
//! | Fire LED        | 25   | On-board LED, lit (low) while fire is held |
//! | UART0 TX        | 0    | Serial log, 9600 baud 8N1 |
//!
//! The gameport runs at 5 V; level-shift clock and data down to 3.3 V.
//! Data and clock must stay on adjacent GPIOs, data first: the capture
//! program addresses the clock relative to the data pin.
//!
//! # Architecture
//!
//! Two executors:
//!
//! - **Decoder task** (interrupt executor, high priority): waits for the next
//!   phase deadline or, while reading, for a byte from the PIO capture FIFO,
//!   and drives the [`Decoder`]. Timer and edge handling share one task so
//!   they never overlap.
//! - **Logger task** (thread mode): runs a [`SampleBridge`] from
//!   [`SnapshotSource`] to [`UartLogSink`].
//!
//! The decoder publishes into a static [`SampleSlot`] and wakes the logger
//! through a [`Signal`](embassy_sync::signal::Signal) with "latest value
//! wins" semantics, so a slow serial line only drops intermediate frames.
//!
//! # Features
//!
//! - **`dev-panic`** (default): Use `panic-probe` for development (prints panic info via RTT)
//! - **`prod-panic`**: Use `panic-reset` for production (silent watchdog reset)

#![no_std]

pub use sidewinder_core::{
    BridgeError, Buttons, Decoder, GameportLines, JoystickSample, SampleBridge,
    SampleObserver, SampleSink, SampleSlot, SampleSource, SinkError, SourceError, TimingConfig,
    TimingPhase, DEFAULT_TIMING,
};

pub mod gameport;
pub mod input;
pub mod observer;
pub mod serial_output;

pub use gameport::{feed_byte, period, PioLines, SERIAL_BAUD};
pub use input::SnapshotSource;
pub use observer::FrameNotifier;
pub use serial_output::UartLogSink;
