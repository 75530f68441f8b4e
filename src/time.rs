//! BCD wall-clock time.
//!
//! This module provides [`ClockTime`], six binary-coded-decimal digits holding a
//! 24-hour `HH:MM:SS` time, together with the one-second carry chain that the
//! clock engine runs on every second rollover.
//!
//! # Digit Layout
//!
//! Digits are stored least significant first:
//!
//! | index | 0        | 1       | 2        | 3       | 4      | 5     |
//! |-------|----------|---------|----------|---------|--------|-------|
//! | digit | sec ones | sec ten | min ones | min ten | hr ones| hr ten|
//!
//! Every constructor validates its input, so a `ClockTime` value always holds
//! decimal digits, tens of seconds/minutes no greater than 5, and an hour below
//! 24.
//!
//! # Conversions
//!
//! - Four display digits (`HH:MM`) for a 7-segment display
//! - chrono's [`NaiveTime`]
//! - Packed BCD registers, see [`crate::registers`]

use core::fmt;

use chrono::{NaiveTime, Timelike};

/// Index of the seconds ones digit.
pub const SECONDS_UNITS: usize = 0;
/// Index of the seconds tens digit.
pub const SECONDS_TENS: usize = 1;
/// Index of the minutes ones digit.
pub const MINUTES_UNITS: usize = 2;
/// Index of the minutes tens digit.
pub const MINUTES_TENS: usize = 3;
/// Index of the hours ones digit.
pub const HOURS_UNITS: usize = 4;
/// Index of the hours tens digit.
pub const HOURS_TENS: usize = 5;

const HOURS_PER_DAY: u8 = 24;
const MINUTES_PER_HOUR: u32 = 60;

// Highest value each digit holds before it rolls to 0 and carries. The hours
// tens digit has no entry: the day boundary is checked on the combined hour.
const ROLLOVER: [u8; HOURS_TENS] = [9, 5, 9, 5, 9];

/// Errors raised when building a [`ClockTime`] from raw values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClockTimeError {
    /// A digit is out of range for its position (not decimal, or a tens of
    /// seconds/minutes digit above 5)
    InvalidDigit {
        /// Digit index, see [`SECONDS_UNITS`]..[`HOURS_TENS`]
        position: usize,
        /// The rejected value
        value: u8,
    },
    /// Minutes or seconds value above 59
    InvalidMinutesOrSeconds(u8),
    /// The hour is 24 or more
    InvalidHours(u8),
}

/// A 24-hour time of day stored as six BCD digits.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct ClockTime {
    bcd: [u8; 6],
}

impl ClockTime {
    /// `00:00:00`
    pub const MIDNIGHT: ClockTime = ClockTime { bcd: [0; 6] };

    /// Splits a value into (ones, tens), failing above `max_value`.
    pub(crate) fn make_bcd(value: u8, max_value: u8) -> Result<(u8, u8), ClockTimeError> {
        if value > max_value {
            return Err(ClockTimeError::InvalidMinutesOrSeconds(value));
        }
        Ok((value % 10, value / 10))
    }

    /// Builds a time from already range-checked components.
    const fn compose(hours: u8, minutes: u8, seconds: u8) -> Self {
        ClockTime {
            bcd: [
                seconds % 10,
                seconds / 10,
                minutes % 10,
                minutes / 10,
                hours % 10,
                hours / 10,
            ],
        }
    }

    /// Creates a time from binary hours (0-23), minutes and seconds (0-59).
    pub fn new(hours: u8, minutes: u8, seconds: u8) -> Result<Self, ClockTimeError> {
        if hours >= HOURS_PER_DAY {
            return Err(ClockTimeError::InvalidHours(hours));
        }
        let (minutes_ones, minutes_tens) = Self::make_bcd(minutes, 59)?;
        let (seconds_ones, seconds_tens) = Self::make_bcd(seconds, 59)?;
        Ok(ClockTime {
            bcd: [
                seconds_ones,
                seconds_tens,
                minutes_ones,
                minutes_tens,
                hours % 10,
                hours / 10,
            ],
        })
    }

    /// Creates a time from six BCD digits in storage order (seconds ones first).
    pub fn from_digits(digits: [u8; 6]) -> Result<Self, ClockTimeError> {
        for (position, &value) in digits.iter().enumerate() {
            let limit = match position {
                SECONDS_TENS | MINUTES_TENS => 5,
                HOURS_TENS => 2,
                _ => 9,
            };
            if value > limit {
                return Err(ClockTimeError::InvalidDigit { position, value });
            }
        }
        let time = ClockTime { bcd: digits };
        if time.hours() >= HOURS_PER_DAY {
            return Err(ClockTimeError::InvalidHours(time.hours()));
        }
        Ok(time)
    }

    /// The six digits in storage order.
    pub const fn digits(&self) -> [u8; 6] {
        self.bcd
    }

    /// Seconds as `[ones, tens]`.
    pub const fn seconds_digits(&self) -> [u8; 2] {
        [self.bcd[SECONDS_UNITS], self.bcd[SECONDS_TENS]]
    }

    /// Minutes as `[ones, tens]`.
    pub const fn minutes_digits(&self) -> [u8; 2] {
        [self.bcd[MINUTES_UNITS], self.bcd[MINUTES_TENS]]
    }

    /// Hours as `[ones, tens]`.
    pub const fn hours_digits(&self) -> [u8; 2] {
        [self.bcd[HOURS_UNITS], self.bcd[HOURS_TENS]]
    }

    pub const fn seconds(&self) -> u8 {
        10 * self.bcd[SECONDS_TENS] + self.bcd[SECONDS_UNITS]
    }

    pub const fn minutes(&self) -> u8 {
        10 * self.bcd[MINUTES_TENS] + self.bcd[MINUTES_UNITS]
    }

    pub const fn hours(&self) -> u8 {
        10 * self.bcd[HOURS_TENS] + self.bcd[HOURS_UNITS]
    }

    /// Advances the time by one second.
    ///
    /// Carries ripple from the seconds ones digit upwards; ones digits roll
    /// over past 9 and tens of seconds/minutes past 5. When the hour reaches 24
    /// all six digits are cleared.
    ///
    /// # Returns
    /// * `true` if the day wrapped from `23:59:59` to `00:00:00`
    pub fn increment_second(&mut self) -> bool {
        self.carry();
        if self.hours() < HOURS_PER_DAY {
            return false;
        }
        self.bcd = [0; 6];
        true
    }

    fn carry(&mut self) {
        for (digit, limit) in self.bcd.iter_mut().zip(ROLLOVER) {
            *digit += 1;
            if *digit <= limit {
                return;
            }
            *digit = 0;
        }
        self.bcd[HOURS_TENS] += 1;
    }

    /// Returns this time moved forward by `minutes`, wrapping at midnight.
    ///
    /// The seconds of the result are always zero, which is what an alarm
    /// snooze target needs.
    pub fn plus_minutes(&self, minutes: u16) -> Self {
        let total = u32::from(self.minutes()) + u32::from(minutes);
        let hours = (u32::from(self.hours()) + total / MINUTES_PER_HOUR) % u32::from(HOURS_PER_DAY);
        let minutes = total % MINUTES_PER_HOUR;
        // Both values are reduced below 24 and 60 above.
        Self::compose(hours as u8, minutes as u8, 0)
    }

    /// The four digits shown on an `HH:MM` display, most significant first.
    pub const fn display_digits(&self) -> [u8; 4] {
        [
            self.bcd[HOURS_TENS],
            self.bcd[HOURS_UNITS],
            self.bcd[MINUTES_TENS],
            self.bcd[MINUTES_UNITS],
        ]
    }

    /// Builds a time from `HH:MM` display digits, most significant first.
    /// Seconds are zero.
    pub fn from_display_digits(digits: [u8; 4]) -> Result<Self, ClockTimeError> {
        let [hours_tens, hours_units, minutes_tens, minutes_units] = digits;
        Self::from_digits([0, 0, minutes_units, minutes_tens, hours_units, hours_tens])
    }
}

/// Compares two times digit by digit.
pub fn times_match(a: &ClockTime, b: &ClockTime) -> bool {
    a.bcd.iter().zip(b.bcd.iter()).all(|(x, y)| x == y)
}

impl TryFrom<[u8; 6]> for ClockTime {
    type Error = ClockTimeError;

    fn try_from(digits: [u8; 6]) -> Result<Self, Self::Error> {
        Self::from_digits(digits)
    }
}

impl From<ClockTime> for [u8; 6] {
    fn from(time: ClockTime) -> Self {
        time.bcd
    }
}

impl TryFrom<NaiveTime> for ClockTime {
    type Error = ClockTimeError;

    fn try_from(time: NaiveTime) -> Result<Self, Self::Error> {
        let hours = u8::try_from(time.hour()).map_err(|_| ClockTimeError::InvalidHours(u8::MAX))?;
        let minutes = u8::try_from(time.minute())
            .map_err(|_| ClockTimeError::InvalidMinutesOrSeconds(u8::MAX))?;
        let seconds = u8::try_from(time.second())
            .map_err(|_| ClockTimeError::InvalidMinutesOrSeconds(u8::MAX))?;
        Self::new(hours, minutes, seconds)
    }
}

impl From<ClockTime> for NaiveTime {
    fn from(time: ClockTime) -> Self {
        NaiveTime::from_hms_opt(
            u32::from(time.hours()),
            u32::from(time.minutes()),
            u32::from(time.seconds()),
        )
        .unwrap_or_default()
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [s0, s1, m0, m1, h0, h1] = self.bcd;
        write!(f, "{h1}{h0}:{m1}{m0}:{s1}{s0}")
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for ClockTime {
    fn format(&self, f: defmt::Formatter) {
        let [s0, s1, m0, m1, h0, h1] = self.bcd;
        defmt::write!(f, "{}{}:{}{}:{}{}", h1, h0, m1, m0, s1, s0);
    }
}
