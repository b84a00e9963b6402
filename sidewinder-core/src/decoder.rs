//! Timing controller and edge sampler.
//!
//! [`Decoder`] is driven from two contexts that never run at the same time:
//!
//! - the periodic timer calls [`Decoder::on_timer_tick`] and programs the
//!   returned tick count as its next period
//! - the clock line's rising edge calls [`Decoder::on_clock_edge`], or
//!   [`Decoder::on_sampled_edge`] when the data level was captured in
//!   hardware at the edge
//!
//! # Cycle
//!
//! ```text
//!  Idle ──tick──► Reading ──tick──► Idle ──tick──► Reading ...
//!                 │ invalidate published sample
//!                 │ clear working frame, bit index = 0
//!                 │ pulse timing line low, arm edges
//!                 │
//!                 ├─ edge: sample data, store bit
//!                 ├─ ...
//!                 └─ 48th edge: publish, notify valid
//! ```
//!
//! A frame that is still incomplete when the reading phase ends is dropped
//! on the next Idle→Reading transition; it is never published.

use embassy_sync::blocking_mutex::raw::RawMutex;
use sidewinder_proto::{JoystickSample, FRAME_BYTES};

use crate::lines::{DataLine, GameportLines};
use crate::observer::{Callbacks, NoCallbacks, SampleObserver};
use crate::sampler::{PushOutcome, WorkingFrame};
use crate::snapshot::SampleSlot;
use crate::timing::{TimingConfig, TimingPhase};

/// SideWinder protocol decoder.
///
/// Owns the working frame and the lines; publishes completed frames into a
/// shared [`SampleSlot`].
///
/// # Example
///
/// ```
/// use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
/// use sidewinder_core::{DataLine, Decoder, GameportLines, SampleSlot, DEFAULT_TIMING};
///
/// struct Lines { data: bool, armed: bool }
///
/// impl DataLine for Lines {
///     fn read_data(&mut self) -> bool { self.data }
/// }
///
/// impl GameportLines for Lines {
///     fn set_trigger(&mut self, _high: bool) {}
///     fn arm_edges(&mut self) { self.armed = true }
///     fn disarm_edges(&mut self) { self.armed = false }
///     fn edges_armed(&self) -> bool { self.armed }
/// }
///
/// let slot: SampleSlot<CriticalSectionRawMutex> = SampleSlot::new();
/// let mut decoder = Decoder::new(Lines { data: true, armed: false }, &slot, DEFAULT_TIMING);
///
/// // Idle -> Reading: trigger pulsed, edges armed
/// assert_eq!(decoder.on_timer_tick(), 2000);
/// for _ in 0..48 {
///     decoder.on_clock_edge();
/// }
/// assert!(slot.is_valid());
/// assert_eq!(slot.read().x, 1023);
/// ```
pub struct Decoder<'a, L, M: RawMutex, O = NoCallbacks> {
    lines: L,
    slot: &'a SampleSlot<M>,
    observer: O,
    config: TimingConfig,
    phase: TimingPhase,
    frame: WorkingFrame,
    period_ticks: u16,
}

impl<'a, L, M> Decoder<'a, L, M, NoCallbacks>
where
    L: GameportLines,
    M: RawMutex,
{
    /// Create a decoder in the idle phase, timing line high, edges disarmed.
    ///
    /// The first timer period is [`Decoder::next_period_ticks`].
    pub fn new(mut lines: L, slot: &'a SampleSlot<M>, config: TimingConfig) -> Self {
        lines.disarm_edges();
        lines.set_trigger(true);
        Self {
            lines,
            slot,
            observer: NoCallbacks,
            config,
            phase: TimingPhase::Idle,
            frame: WorkingFrame::new(),
            period_ticks: config.idle_ticks,
        }
    }
}

impl<'a, L, M, O> Decoder<'a, L, M, O>
where
    L: GameportLines,
    M: RawMutex,
    O: SampleObserver,
{
    /// Install the valid/invalid hooks. Call once, before the timer starts.
    pub fn register_callbacks<V, I>(
        self,
        on_valid: V,
        on_invalid: I,
    ) -> Decoder<'a, L, M, Callbacks<V, I>>
    where
        V: FnMut(&JoystickSample),
        I: FnMut(),
    {
        self.with_observer(Callbacks::new(on_valid, on_invalid))
    }

    /// Replace the observer.
    pub fn with_observer<P: SampleObserver>(self, observer: P) -> Decoder<'a, L, M, P> {
        Decoder {
            lines: self.lines,
            slot: self.slot,
            observer,
            config: self.config,
            phase: self.phase,
            frame: self.frame,
            period_ticks: self.period_ticks,
        }
    }

    /// Periodic timer handler. Switches phase and returns the number of
    /// ticks until the next call.
    ///
    /// Runs with interrupts masked; never fails.
    pub fn on_timer_tick(&mut self) -> u16 {
        critical_section::with(|_| match self.phase {
            TimingPhase::Idle => self.begin_reading(),
            TimingPhase::Reading => self.end_reading(),
        });
        self.period_ticks
    }

    /// Rising-edge handler for a data level sampled by hardware at the
    /// edge.
    ///
    /// Stores one data bit per call while reading. Ignored while idle,
    /// while edges are disarmed, and once 48 bits are in.
    pub fn on_sampled_edge(&mut self, level: bool) {
        if self.accepts_edge() {
            self.store_bit(level);
        }
    }

    fn accepts_edge(&self) -> bool {
        self.phase == TimingPhase::Reading
            && self.lines.edges_armed()
            && !self.frame.is_complete()
    }

    fn store_bit(&mut self, level: bool) {
        self.lines.pulse_clock_indicator();

        if self.frame.push_bit(level) == PushOutcome::Completed {
            let sample = self.slot.publish(self.frame.bytes());
            self.lines.set_recv_indicator(true);
            self.observer.sample_valid(&sample);
        }
    }

    fn reprogram(&mut self, phase: TimingPhase) {
        self.period_ticks = phase.duration_ticks(&self.config);
        self.phase = phase;
    }

    /// Idle→Reading: request a frame and get ready to capture it.
    ///
    /// The timing line's low pulse lasts exactly as long as the statements
    /// between driving it low and driving it high take to run, with
    /// interrupts masked. Nothing times it; on a fast core it is well under
    /// a microsecond. Hardware that needs a longer request pulse has to
    /// stretch it inside [`GameportLines::set_trigger`].
    fn begin_reading(&mut self) {
        self.reprogram(TimingPhase::Reading);

        self.lines.disarm_edges();
        self.lines.set_trigger(false);

        // stale from here on, whatever was published last cycle
        self.slot.invalidate();
        self.observer.sample_invalid();

        self.frame.reset();
        self.lines.set_recv_indicator(false);

        self.lines.clear_pending_edge();
        self.lines.arm_edges();

        // the device starts clocking out a frame on this edge
        self.lines.set_trigger(true);
    }

    fn end_reading(&mut self) {
        self.reprogram(TimingPhase::Idle);
        self.lines.disarm_edges();
    }

    #[inline]
    #[must_use]
    pub fn phase(&self) -> TimingPhase {
        self.phase
    }

    /// Index of the next expected bit (0..=48).
    #[inline]
    #[must_use]
    pub fn bit_index(&self) -> u8 {
        self.frame.bit_index()
    }

    /// Bytes of the frame under assembly.
    #[inline]
    #[must_use]
    pub fn frame(&self) -> &[u8; FRAME_BYTES] {
        self.frame.bytes()
    }

    /// Ticks the timer was last programmed with.
    #[inline]
    #[must_use]
    pub fn next_period_ticks(&self) -> u16 {
        self.period_ticks
    }

    /// Whether the edge context should be waiting for clock edges.
    #[inline]
    #[must_use]
    pub fn edges_armed(&self) -> bool {
        self.lines.edges_armed()
    }

    #[inline]
    #[must_use]
    pub fn config(&self) -> &TimingConfig {
        &self.config
    }

    #[inline]
    #[must_use]
    pub fn lines(&self) -> &L {
        &self.lines
    }

    #[inline]
    pub fn lines_mut(&mut self) -> &mut L {
        &mut self.lines
    }

    /// Copy of the last published sample.
    #[inline]
    #[must_use]
    pub fn read_sample(&self) -> JoystickSample {
        self.slot.read()
    }

    /// Whether a frame was published since the last transmission request.
    #[inline]
    #[must_use]
    pub fn is_sample_valid(&self) -> bool {
        self.slot.is_valid()
    }
}

impl<'a, L, M, O> Decoder<'a, L, M, O>
where
    L: GameportLines + DataLine,
    M: RawMutex,
    O: SampleObserver,
{
    /// Rising-edge handler for the clock line. Samples the data line and
    /// stores the bit, under the same rules as [`Decoder::on_sampled_edge`].
    pub fn on_clock_edge(&mut self) {
        if self.accepts_edge() {
            let level = self.lines.read_data();
            self.store_bit(level);
        }
    }
}
