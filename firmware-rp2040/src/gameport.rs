//! Gameport wiring on the RP2040.
//!
//! Clock edges are captured by a PIO state machine: it waits for each
//! rising edge on the clock pin, shifts in the data pin a couple of PIO
//! cycles later and pushes every eight bits into the joined RX FIFO. The
//! eight-entry FIFO holds a whole frame, so edges are never lost to task
//! latency; the decoder task drains it byte by byte.

use embassy_rp::gpio::Output;
use embassy_rp::peripherals::PIO0;
use embassy_rp::pio::{
    Common, Config, Direction, FifoJoin, Pin, ShiftConfig, ShiftDirection, StateMachine,
};
use embassy_time::Duration;
use sidewinder_core::{GameportLines, SampleObserver, TimingConfig};

use crate::Decoder;

/// Baud rate of the serial log.
pub const SERIAL_BAUD: u32 = 9600;

/// Bits per FIFO entry.
const BITS_PER_PUSH: u8 = 8;

/// Gameport lines with PIO edge capture.
///
/// Data and clock must be adjacent GPIOs, data first.
pub struct PioLines<'d> {
    trigger: Output<'d>,
    recv_indicator: Output<'d>,
    clock_indicator: Output<'d>,
    sm: StateMachine<'d, PIO0, 0>,
    origin: u8,
    armed: bool,
}

impl<'d> PioLines<'d> {
    /// Load the capture program and configure the state machine, stopped.
    pub fn new(
        common: &mut Common<'d, PIO0>,
        mut sm: StateMachine<'d, PIO0, 0>,
        data: Pin<'d, PIO0>,
        clock: Pin<'d, PIO0>,
        trigger: Output<'d>,
        recv_indicator: Output<'d>,
        clock_indicator: Output<'d>,
    ) -> Self {
        // in_base is the data pin; pin 1 is the clock pin next to it
        let prg = pio::pio_asm!(
            r#"
            .wrap_target
                wait 0 pin 1
                wait 1 pin 1
                in pins, 1
            .wrap
            "#
        );

        let mut cfg = Config::default();

        let mut shift_config = ShiftConfig::default();
        shift_config.direction = ShiftDirection::Right;
        shift_config.auto_fill = true;
        shift_config.threshold = BITS_PER_PUSH;
        cfg.shift_in = shift_config;

        cfg.fifo_join = FifoJoin::RxOnly;
        cfg.set_in_pins(&[&data, &clock]);

        let loaded = common.load_program(&prg.program);
        cfg.use_program(&loaded, &[]);

        sm.set_config(&cfg);
        sm.set_pin_dirs(Direction::In, &[&data, &clock]);
        sm.set_enable(false);

        Self {
            trigger,
            recv_indicator,
            clock_indicator,
            sm,
            origin: loaded.origin,
            armed: false,
        }
    }

    /// Wait for the next eight captured bits. Bit 0 is the earliest.
    pub async fn next_byte(&mut self) -> u8 {
        let word = self.sm.rx().wait_pull().await;
        (word >> (32 - BITS_PER_PUSH)) as u8
    }

    /// Next eight captured bits, if the FIFO has them.
    pub fn try_next_byte(&mut self) -> Option<u8> {
        self.sm
            .rx()
            .try_pull()
            .map(|word| (word >> (32 - BITS_PER_PUSH)) as u8)
    }
}

impl GameportLines for PioLines<'_> {
    fn set_trigger(&mut self, high: bool) {
        self.trigger.set_level(high.into());
    }

    fn arm_edges(&mut self) {
        self.sm.set_enable(true);
        self.armed = true;
    }

    fn disarm_edges(&mut self) {
        self.sm.set_enable(false);
        self.armed = false;
    }

    fn edges_armed(&self) -> bool {
        self.armed
    }

    /// Drop captured bits and any half-filled shift register, and restart
    /// the program at its first instruction.
    fn clear_pending_edge(&mut self) {
        self.sm.clear_fifos();
        self.sm.restart();
        self.sm.exec_jmp(self.origin);
    }

    fn set_recv_indicator(&mut self, on: bool) {
        self.recv_indicator.set_level(on.into());
    }

    fn pulse_clock_indicator(&mut self) {
        self.clock_indicator.set_high();
        self.clock_indicator.set_low();
    }
}

/// Hand one captured byte to the decoder, earliest bit first.
pub fn feed_byte<M, O>(decoder: &mut Decoder<'_, PioLines<'_>, M, O>, byte: u8)
where
    M: embassy_sync::blocking_mutex::raw::RawMutex,
    O: SampleObserver,
{
    for i in 0..BITS_PER_PUSH {
        decoder.on_sampled_edge(byte & (1 << i) != 0);
    }
}

/// Timer period returned by the decoder, as an embassy-time duration.
///
/// Converted through microseconds so the decoder's tick rate need not
/// match the embassy time driver's.
#[inline]
#[must_use]
pub fn period(config: &TimingConfig, ticks: u16) -> Duration {
    Duration::from_micros(config.ticks_to_micros(ticks))
}
