use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SpinSettingsError {
    #[error("spin duration must be > 0")]
    ZeroDuration,

    #[error("spin duration must be at most {max_ms} ms")]
    DurationTooLong { max_ms: u64 },

    #[error("base turns must be > 0")]
    ZeroBaseTurns,
}

/// Timing knobs for one spin cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpinSettings {
    spin_duration: Duration,
    settle_margin: Duration,
    base_turns: u32,
}

impl SpinSettings {
    pub const DEFAULT_SPIN_MS: u64 = 10_000;
    pub const DEFAULT_SETTLE_MS: u64 = 100;
    pub const DEFAULT_BASE_TURNS: u32 = 8;
    pub const MAX_SPIN_MS: u64 = 60_000;

    /// # Errors
    ///
    /// Returns `SpinSettingsError` if the duration is zero or too long, or if
    /// `base_turns` is zero.
    pub fn new(
        spin_duration: Duration,
        settle_margin: Duration,
        base_turns: u32,
    ) -> Result<Self, SpinSettingsError> {
        if spin_duration.is_zero() {
            return Err(SpinSettingsError::ZeroDuration);
        }
        if spin_duration > Duration::from_millis(Self::MAX_SPIN_MS) {
            return Err(SpinSettingsError::DurationTooLong {
                max_ms: Self::MAX_SPIN_MS,
            });
        }
        if base_turns == 0 {
            return Err(SpinSettingsError::ZeroBaseTurns);
        }
        Ok(Self {
            spin_duration,
            settle_margin,
            base_turns,
        })
    }

    /// Default settings with a custom spin duration.
    ///
    /// # Errors
    ///
    /// Returns `SpinSettingsError` if `ms` is zero or above the maximum.
    pub fn with_spin_ms(ms: u64) -> Result<Self, SpinSettingsError> {
        Self::new(
            Duration::from_millis(ms),
            Duration::from_millis(Self::DEFAULT_SETTLE_MS),
            Self::DEFAULT_BASE_TURNS,
        )
    }

    #[must_use]
    pub fn spin_duration(&self) -> Duration {
        self.spin_duration
    }

    #[must_use]
    pub fn spin_duration_ms(&self) -> u64 {
        u64::try_from(self.spin_duration.as_millis()).unwrap_or(u64::MAX)
    }

    #[must_use]
    pub fn settle_margin(&self) -> Duration {
        self.settle_margin
    }

    #[must_use]
    pub fn base_turns(&self) -> u32 {
        self.base_turns
    }

    /// Delay before a spin is considered finished: the animation plus the
    /// settle margin.
    #[must_use]
    pub fn completion_delay(&self) -> Duration {
        self.spin_duration + self.settle_margin
    }
}

impl Default for SpinSettings {
    fn default() -> Self {
        Self {
            spin_duration: Duration::from_millis(Self::DEFAULT_SPIN_MS),
            settle_margin: Duration::from_millis(Self::DEFAULT_SETTLE_MS),
            base_turns: Self::DEFAULT_BASE_TURNS,
        }
    }
}
