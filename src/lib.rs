//! # bcd-clock
//!
//! A platform-agnostic, `no_std` clock and alarm engine for digital alarm
//! clocks built around a 4-digit 7-segment display.
//!
//! The engine keeps a 24-hour wall clock as six BCD digits and advances it
//! from a fixed-rate tick, typically a SysTick or timer interrupt. It tracks a
//! single daily alarm with snooze and cancel-until-next-day support.
//!
//! ## Features
//!
//! - Tick accumulation at any rate up to 65535 ticks per second
//! - BCD carry propagation with a 23:59:59 to 00:00:00 day wrap
//! - Alarm matching with a latched trigger flag
//! - Snooze that re-arms without touching the configured alarm time
//! - Cancel until the next day
//! - Interrupt-safe sharing through [`SharedClock`] (`critical-section`)
//! - Status LED/buzzer output through `embedded-hal` ([`indicator`])
//! - Blocking and async tick drivers over `embedded-hal` delays
//! - Packed BCD register views ([`registers`]) and chrono interop
//! - Optional logging through `log` or `defmt`
//!
//! ## Usage
//!
//! ```rust
//! use bcd_clock::{ClockEngine, ClockTime, SharedClock};
//!
//! static CLOCK: SharedClock = SharedClock::new(ClockEngine::new(1000));
//!
//! // Main loop: set the time and arm the alarm.
//! CLOCK.with(|clock| {
//!     clock.set_time(ClockTime::new(6, 45, 0).unwrap());
//!     clock.set_alarm_time(ClockTime::new(7, 0, 0).unwrap());
//!     clock.enable_alarm();
//! });
//!
//! // Timer interrupt: one call per tick.
//! CLOCK.tick();
//!
//! // Main loop: poll a consistent snapshot for the display.
//! let snapshot = CLOCK.snapshot();
//! assert!(snapshot.valid);
//! assert_eq!(snapshot.time.display_digits(), [0, 6, 4, 5]);
//! ```
//!
//! ## Feature Flags
//!
//! - `async`: async tick driver over `embedded-hal-async` ([`asynch`])
//! - `log`: logging through the `log` crate
//! - `defmt`: logging and `defmt::Format` implementations through `defmt`

#![no_std]

// Must come first so the logging macros are visible to the other modules.
#[macro_use]
mod fmt;

pub mod alarm;
#[cfg(feature = "async")]
pub mod asynch;
pub mod clock;
pub mod indicator;
pub mod registers;
pub mod shared;
pub mod ticker;
pub mod time;

pub use alarm::{Alarm, AlarmState};
pub use clock::{ClockEngine, ClockSnapshot, TickEvent};
pub use indicator::{AlarmIndicator, IndicatorError};
pub use registers::PackedTime;
pub use shared::SharedClock;
pub use ticker::Ticker;
pub use time::{times_match, ClockTime, ClockTimeError};

/// Configuration for a [`ClockEngine`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    /// Number of [`ClockEngine::tick`] calls that make up one second
    pub ticks_per_second: u16,
    /// Snooze length used by [`ClockEngine::snooze_alarm_default`]
    pub snooze_minutes: u8,
}

impl Config {
    /// The SysTick rate of a 1 ms system timer.
    pub const DEFAULT_TICKS_PER_SECOND: u16 = 1000;
    pub const DEFAULT_SNOOZE_MINUTES: u8 = 5;
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ticks_per_second: Self::DEFAULT_TICKS_PER_SECOND,
            snooze_minutes: Self::DEFAULT_SNOOZE_MINUTES,
        }
    }
}

/// Errors returned by clock operations.
///
/// Failed operations never change the engine state.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClockError {
    /// The time has not been set since the clock was created
    InvalidTime,
    /// A snooze of zero minutes was requested
    ZeroSnooze,
    /// A time value was out of range
    Time(ClockTimeError),
}

impl From<ClockTimeError> for ClockError {
    fn from(e: ClockTimeError) -> Self {
        ClockError::Time(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.ticks_per_second, 1000);
        assert_eq!(config.snooze_minutes, 5);

        let clock = ClockEngine::with_config(&config);
        assert_eq!(clock.ticks_per_second(), 1000);
    }

    #[test]
    fn test_error_conversion() {
        let err: ClockError = ClockTimeError::InvalidHours(25).into();
        assert_eq!(err, ClockError::Time(ClockTimeError::InvalidHours(25)));
    }

    #[test]
    fn test_error_debug_formatting() {
        extern crate alloc;

        let debug_str = alloc::format!("{:?}", ClockError::InvalidTime);
        assert!(debug_str.contains("InvalidTime"));

        let debug_str = alloc::format!("{:?}", ClockError::ZeroSnooze);
        assert!(debug_str.contains("ZeroSnooze"));
    }
}
