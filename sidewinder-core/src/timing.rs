//! Polling phases and their durations.
//!
//! The timer alternates between a long idle phase and a short reading phase.
//! Durations are counted in ticks of a prescaled hardware counter; the
//! defaults match a 16 MHz counter divided by 8.

/// Ticks spent idle between two transmission requests.
pub const IDLE_TICKS: u16 = 8000;

/// Ticks the edge sampler stays armed after a transmission request.
pub const READING_TICKS: u16 = 2000;

/// Counter rate the tick values are expressed in.
pub const TICK_HZ: u32 = 2_000_000;

/// Default polling timing.
pub const DEFAULT_TIMING: TimingConfig = TimingConfig {
    idle_ticks: IDLE_TICKS,
    reading_ticks: READING_TICKS,
    tick_hz: TICK_HZ,
};

/// Current phase of the polling cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimingPhase {
    /// Trigger line released, edges ignored.
    #[default]
    Idle,
    /// A transmission was requested; clock edges are being captured.
    Reading,
}

impl TimingPhase {
    /// How long this phase lasts, in ticks.
    #[inline]
    #[must_use]
    pub const fn duration_ticks(self, config: &TimingConfig) -> u16 {
        match self {
            Self::Idle => config.idle_ticks,
            Self::Reading => config.reading_ticks,
        }
    }

    /// The phase that follows this one.
    #[inline]
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Idle => Self::Reading,
            Self::Reading => Self::Idle,
        }
    }
}

/// Phase durations and the rate they are counted at.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimingConfig {
    pub idle_ticks: u16,
    pub reading_ticks: u16,
    pub tick_hz: u32,
}

impl TimingConfig {
    /// Convert a tick count to microseconds, rounding down.
    #[inline]
    #[must_use]
    pub const fn ticks_to_micros(&self, ticks: u16) -> u64 {
        ticks as u64 * 1_000_000 / self.tick_hz as u64
    }

    /// Length of one phase in microseconds.
    #[inline]
    #[must_use]
    pub const fn phase_micros(&self, phase: TimingPhase) -> u64 {
        self.ticks_to_micros(phase.duration_ticks(self))
    }

    /// Request-to-request interval in microseconds.
    #[inline]
    #[must_use]
    pub const fn cycle_micros(&self) -> u64 {
        self.phase_micros(TimingPhase::Idle) + self.phase_micros(TimingPhase::Reading)
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        DEFAULT_TIMING
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_alternates() {
        assert_eq!(TimingPhase::Idle.next(), TimingPhase::Reading);
        assert_eq!(TimingPhase::Reading.next(), TimingPhase::Idle);
        assert_eq!(TimingPhase::default(), TimingPhase::Idle);
    }

    #[test]
    fn test_default_durations() {
        let config = TimingConfig::default();
        assert_eq!(TimingPhase::Idle.duration_ticks(&config), 8000);
        assert_eq!(TimingPhase::Reading.duration_ticks(&config), 2000);
    }

    #[test]
    fn test_default_cycle_in_micros() {
        let config = DEFAULT_TIMING;
        assert_eq!(config.phase_micros(TimingPhase::Idle), 4000);
        assert_eq!(config.phase_micros(TimingPhase::Reading), 1000);
        assert_eq!(config.cycle_micros(), 5000);
    }

    #[test]
    fn test_ticks_to_micros_rounds_down() {
        let config = TimingConfig {
            tick_hz: 3_000_000,
            ..DEFAULT_TIMING
        };
        assert_eq!(config.ticks_to_micros(1), 0);
        assert_eq!(config.ticks_to_micros(4), 1);
    }
}
