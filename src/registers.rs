//! Packed BCD register views of a [`ClockTime`].
//!
//! RTC chips and BCD display drivers keep a time of day as three bytes, one
//! per field, with the tens digit in the high nibble and the ones digit in the
//! low nibble (`0x59` is 59). This module provides bitfield wrappers for each
//! byte and [`PackedTime`], which converts to and from [`ClockTime`].
//!
//! Unpacking validates the digits, so a corrupted register never produces an
//! out-of-range [`ClockTime`].

use bitfield::bitfield;

use crate::time::{ClockTime, ClockTimeError};

// This macro generates the From<u8> and Into<u8> implementations for the
// register type
macro_rules! from_register_u8 {
    ($typ:ty) => {
        impl From<u8> for $typ {
            fn from(v: u8) -> Self {
                paste::paste!([< $typ >](v))
            }
        }
        impl From<$typ> for u8 {
            fn from(v: $typ) -> Self {
                v.0
            }
        }
    };
}

bitfield! {
    /// Seconds register (0-59) with BCD encoding.
    #[derive(Clone, Copy, Default, PartialEq)]
    pub struct Seconds(u8);
    impl Debug;
    /// Tens place of seconds (0-5)
    pub ten_seconds, set_ten_seconds: 6, 4;
    /// Ones place of seconds (0-9)
    pub seconds, set_seconds: 3, 0;
}
from_register_u8!(Seconds);

#[cfg(feature = "defmt")]
impl defmt::Format for Seconds {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "Seconds({}{}s)", self.ten_seconds(), self.seconds());
    }
}

bitfield! {
    /// Minutes register (0-59) with BCD encoding.
    #[derive(Clone, Copy, Default, PartialEq)]
    pub struct Minutes(u8);
    impl Debug;
    /// Tens place of minutes (0-5)
    pub ten_minutes, set_ten_minutes: 6, 4;
    /// Ones place of minutes (0-9)
    pub minutes, set_minutes: 3, 0;
}
from_register_u8!(Minutes);

#[cfg(feature = "defmt")]
impl defmt::Format for Minutes {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "Minutes({}{}m)", self.ten_minutes(), self.minutes());
    }
}

bitfield! {
    /// Hours register (0-23), 24-hour BCD encoding.
    #[derive(Clone, Copy, Default, PartialEq)]
    pub struct Hours(u8);
    impl Debug;
    /// Tens place of hours (0-2)
    pub ten_hours, set_ten_hours: 5, 4;
    /// Ones place of hours (0-9)
    pub hours, set_hours: 3, 0;
}
from_register_u8!(Hours);

#[cfg(feature = "defmt")]
impl defmt::Format for Hours {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "Hours({}{}h)", self.ten_hours(), self.hours());
    }
}

/// A time of day as three packed BCD registers.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PackedTime {
    pub seconds: Seconds,
    pub minutes: Minutes,
    pub hours: Hours,
}

impl From<ClockTime> for PackedTime {
    fn from(time: ClockTime) -> Self {
        let [s0, s1] = time.seconds_digits();
        let [m0, m1] = time.minutes_digits();
        let [h0, h1] = time.hours_digits();

        let mut seconds = Seconds::default();
        seconds.set_seconds(s0);
        seconds.set_ten_seconds(s1);
        let mut minutes = Minutes::default();
        minutes.set_minutes(m0);
        minutes.set_ten_minutes(m1);
        let mut hours = Hours::default();
        hours.set_hours(h0);
        hours.set_ten_hours(h1);

        PackedTime {
            seconds,
            minutes,
            hours,
        }
    }
}

impl TryFrom<PackedTime> for ClockTime {
    type Error = ClockTimeError;

    fn try_from(packed: PackedTime) -> Result<Self, Self::Error> {
        ClockTime::from_digits([
            packed.seconds.seconds(),
            packed.seconds.ten_seconds(),
            packed.minutes.minutes(),
            packed.minutes.ten_minutes(),
            packed.hours.hours(),
            packed.hours.ten_hours(),
        ])
    }
}

/// Registers in `[seconds, minutes, hours]` order.
impl From<[u8; 3]> for PackedTime {
    fn from(data: [u8; 3]) -> Self {
        PackedTime {
            seconds: Seconds(data[0]),
            minutes: Minutes(data[1]),
            hours: Hours(data[2]),
        }
    }
}

impl From<&PackedTime> for [u8; 3] {
    fn from(packed: &PackedTime) -> [u8; 3] {
        [packed.seconds.0, packed.minutes.0, packed.hours.0]
    }
}

impl ClockTime {
    /// The time as `[seconds, minutes, hours]` packed BCD bytes.
    pub fn to_packed(&self) -> [u8; 3] {
        (&PackedTime::from(*self)).into()
    }

    /// Reads a time from `[seconds, minutes, hours]` packed BCD bytes.
    pub fn from_packed(data: [u8; 3]) -> Result<Self, ClockTimeError> {
        ClockTime::try_from(PackedTime::from(data))
    }
}
