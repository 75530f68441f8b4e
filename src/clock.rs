//! The tick-driven clock engine.
//!
//! [`ClockEngine`] owns the wall-clock time, the tick accumulator and the
//! [`Alarm`]. A timer source calls [`ClockEngine::tick`] at the configured
//! rate; every `ticks_per_second` ticks the time advances one second and the
//! alarm is tested against the new time.
//!
//! # Example
//!
//! ```rust
//! use bcd_clock::{ClockEngine, ClockTime, TickEvent};
//!
//! let mut clock = ClockEngine::new(5);
//! clock.set_time(ClockTime::new(6, 59, 59).unwrap());
//! clock.set_alarm_time(ClockTime::new(7, 0, 0).unwrap());
//! clock.enable_alarm();
//!
//! for _ in 0..4 {
//!     assert_eq!(clock.tick(), TickEvent::Pending);
//! }
//! assert_eq!(clock.tick(), TickEvent::Alarm);
//! assert!(clock.is_alarm_triggered());
//! ```

use crate::alarm::{Alarm, AlarmState};
use crate::time::ClockTime;
use crate::{ClockError, Config};

/// What a call to [`ClockEngine::tick`] did.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TickEvent {
    /// The tick was accumulated (or the clock is not set); the time is unchanged
    Pending,
    /// The time advanced one second
    Second,
    /// The time advanced one second and the alarm fired
    Alarm,
}

/// A consistent copy of the engine state, for display and polling.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ClockSnapshot {
    pub time: ClockTime,
    pub valid: bool,
    pub alarm_time: ClockTime,
    pub alarm_enabled: bool,
    pub alarm_triggered: bool,
    pub alarm_state: AlarmState,
}

/// BCD clock and alarm engine.
#[derive(Debug, Clone)]
pub struct ClockEngine {
    ticks: u16,
    ticks_per_second: u16,
    snooze_minutes: u8,
    time: ClockTime,
    valid: bool,
    alarm: Alarm,
}

impl ClockEngine {
    /// Creates a clock advancing one second every `ticks_per_second` ticks.
    ///
    /// The time starts invalid at `00:00:00` and the alarm disabled. A rate of
    /// zero is accepted but the time will never advance.
    pub const fn new(ticks_per_second: u16) -> Self {
        Self {
            ticks: 0,
            ticks_per_second,
            snooze_minutes: Config::DEFAULT_SNOOZE_MINUTES,
            time: ClockTime::MIDNIGHT,
            valid: false,
            alarm: Alarm::new(),
        }
    }

    /// Creates a clock from a [`Config`].
    pub fn with_config(config: &Config) -> Self {
        if config.ticks_per_second == 0 {
            warn!("clock: zero ticks per second, time will not advance");
        }
        debug!(
            "clock: created at {} ticks/s, snooze {} min",
            config.ticks_per_second, config.snooze_minutes
        );
        Self {
            snooze_minutes: config.snooze_minutes,
            ..Self::new(config.ticks_per_second)
        }
    }

    pub fn ticks_per_second(&self) -> u16 {
        self.ticks_per_second
    }

    /// The current time. While the clock has never been set this is
    /// `00:00:00`; check [`is_valid`](Self::is_valid) before trusting it.
    pub fn time(&self) -> ClockTime {
        self.time
    }

    /// Whether the time has been set since creation.
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// The current time, or [`ClockError::InvalidTime`] if the clock was never set.
    pub fn valid_time(&self) -> Result<ClockTime, ClockError> {
        if self.valid {
            Ok(self.time)
        } else {
            Err(ClockError::InvalidTime)
        }
    }

    /// Sets the time and marks the clock valid. The alarm is unaffected.
    pub fn set_time(&mut self, time: ClockTime) {
        info!("clock: time set to {}", time);
        self.time = time;
        self.valid = true;
    }

    /// Sets the time from six raw BCD digits, least significant first.
    ///
    /// # Returns
    /// * `Ok(())` on success
    /// * `Err(ClockError::Time)` if any digit is out of range; nothing changes
    pub fn set_time_digits(&mut self, digits: [u8; 6]) -> Result<(), ClockError> {
        let time = ClockTime::from_digits(digits).map_err(|e| {
            error!("clock: rejected time digits");
            ClockError::from(e)
        })?;
        self.set_time(time);
        Ok(())
    }

    /// Advances the clock by one tick.
    ///
    /// Does nothing until the time is set. When a full second has accumulated
    /// the time is incremented and the alarm tested against it.
    pub fn tick(&mut self) -> TickEvent {
        if !self.valid || self.ticks_per_second == 0 {
            return TickEvent::Pending;
        }
        self.ticks += 1;
        if self.ticks < self.ticks_per_second {
            return TickEvent::Pending;
        }
        self.ticks = 0;

        if self.time.increment_second() {
            debug!("clock: new day");
            self.alarm.new_day();
        }
        if self.alarm.check(&self.time) {
            info!("clock: alarm triggered at {}", self.time);
            return TickEvent::Alarm;
        }
        TickEvent::Second
    }

    pub fn alarm(&self) -> &Alarm {
        &self.alarm
    }

    /// The configured alarm time.
    pub fn alarm_time(&self) -> ClockTime {
        self.alarm.time()
    }

    /// Configures the alarm time. Enabling is a separate step.
    pub fn set_alarm_time(&mut self, time: ClockTime) {
        info!("clock: alarm set to {}", time);
        self.alarm.set_time(time);
    }

    pub fn enable_alarm(&mut self) {
        debug!("clock: alarm enabled");
        self.alarm.enable();
    }

    /// Stops future alarm matches. An alarm already sounding keeps sounding
    /// until it is snoozed or cancelled.
    pub fn disable_alarm(&mut self) {
        debug!("clock: alarm disabled");
        self.alarm.disable();
    }

    pub fn is_alarm_enabled(&self) -> bool {
        self.alarm.is_enabled()
    }

    pub fn is_alarm_triggered(&self) -> bool {
        self.alarm.is_triggered()
    }

    pub fn alarm_state(&self) -> AlarmState {
        self.alarm.state()
    }

    /// Silences the alarm and re-arms it `minutes` after the current time,
    /// with seconds at zero. The configured alarm time is kept.
    ///
    /// # Returns
    /// * `Ok(())` on success
    /// * `Err(ClockError::InvalidTime)` if the clock was never set
    /// * `Err(ClockError::ZeroSnooze)` if `minutes` is zero
    pub fn snooze_alarm(&mut self, minutes: u8) -> Result<(), ClockError> {
        let now = self.valid_time()?;
        if minutes == 0 {
            return Err(ClockError::ZeroSnooze);
        }
        let target = now.plus_minutes(u16::from(minutes));
        info!("clock: alarm snoozed until {}", target);
        self.alarm.snooze_until(target);
        Ok(())
    }

    /// [`snooze_alarm`](Self::snooze_alarm) with the configured snooze length.
    pub fn snooze_alarm_default(&mut self) -> Result<(), ClockError> {
        self.snooze_alarm(self.snooze_minutes)
    }

    /// Silences the alarm and any pending snooze, and ignores the configured
    /// alarm time until the clock passes midnight.
    pub fn cancel_alarm_until_next_day(&mut self) {
        info!("clock: alarm cancelled until next day");
        self.alarm.cancel_until_midnight();
    }

    pub fn snapshot(&self) -> ClockSnapshot {
        ClockSnapshot {
            time: self.time,
            valid: self.valid,
            alarm_time: self.alarm.time(),
            alarm_enabled: self.alarm.is_enabled(),
            alarm_triggered: self.alarm.is_triggered(),
            alarm_state: self.alarm.state(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TICKS_PER_SECOND: u16 = 5;

    fn at(hours: u8, minutes: u8, seconds: u8) -> ClockTime {
        ClockTime::new(hours, minutes, seconds).unwrap()
    }

    fn simulate_seconds(clock: &mut ClockEngine, seconds: u32) {
        for _ in 0..u32::from(TICKS_PER_SECOND) * seconds {
            clock.tick();
        }
    }

    fn clock_at(time: ClockTime) -> ClockEngine {
        let mut clock = ClockEngine::new(TICKS_PER_SECOND);
        clock.set_time(time);
        clock
    }

    /// Starts a clock one second before an enabled alarm at `alarm`.
    fn ringing_soon(alarm: ClockTime, now: ClockTime) -> ClockEngine {
        let mut clock = clock_at(now);
        clock.set_alarm_time(alarm);
        clock.enable_alarm();
        clock
    }

    #[test]
    fn test_new_clock_is_invalid_at_midnight() {
        let clock = ClockEngine::new(TICKS_PER_SECOND);
        assert!(!clock.is_valid());
        assert_eq!(clock.time().digits(), [0; 6]);
        assert_eq!(clock.valid_time(), Err(ClockError::InvalidTime));
        assert!(!clock.is_alarm_enabled());
        assert!(!clock.is_alarm_triggered());
        assert_eq!(clock.alarm_state(), AlarmState::Idle);
    }

    #[test]
    fn test_set_time_round_trip() {
        let mut clock = ClockEngine::new(TICKS_PER_SECOND);
        clock.set_time(at(15, 3, 54));
        assert!(clock.is_valid());
        assert_eq!(clock.valid_time(), Ok(at(15, 3, 54)));
        assert_eq!(clock.time().digits(), [4, 5, 3, 0, 5, 1]);
    }

    #[test]
    fn test_set_time_digits_rejects_without_side_effects() {
        let mut clock = ClockEngine::new(TICKS_PER_SECOND);
        assert!(matches!(
            clock.set_time_digits([0, 0, 0, 0, 0, 9]),
            Err(ClockError::Time(_))
        ));
        assert!(!clock.is_valid());

        clock.set_time_digits([0, 0, 0, 3, 2, 1]).unwrap();
        assert_eq!(clock.valid_time(), Ok(at(12, 30, 0)));
    }

    #[test]
    fn test_tick_is_noop_while_invalid() {
        let mut clock = ClockEngine::new(TICKS_PER_SECOND);
        for _ in 0..100 {
            assert_eq!(clock.tick(), TickEvent::Pending);
        }
        assert_eq!(clock.time(), ClockTime::MIDNIGHT);
    }

    #[test]
    fn test_zero_ticks_per_second_never_advances() {
        let mut clock = ClockEngine::new(0);
        clock.set_time(at(1, 2, 3));
        for _ in 0..1000 {
            assert_eq!(clock.tick(), TickEvent::Pending);
        }
        assert_eq!(clock.time(), at(1, 2, 3));
    }

    #[test]
    fn test_advance_one_second() {
        let mut clock = clock_at(ClockTime::MIDNIGHT);
        for _ in 1..TICKS_PER_SECOND {
            assert_eq!(clock.tick(), TickEvent::Pending);
        }
        assert_eq!(clock.tick(), TickEvent::Second);
        assert_eq!(clock.time(), at(0, 0, 1));
    }

    #[test]
    fn test_advance_ten_seconds() {
        let mut clock = clock_at(ClockTime::MIDNIGHT);
        simulate_seconds(&mut clock, 10);
        assert_eq!(clock.time(), at(0, 0, 10));
    }

    #[test]
    fn test_advance_minutes_and_hours() {
        let mut clock = clock_at(ClockTime::MIDNIGHT);
        simulate_seconds(&mut clock, 60);
        assert_eq!(clock.time(), at(0, 1, 0));
        simulate_seconds(&mut clock, 9 * 60);
        assert_eq!(clock.time(), at(0, 10, 0));
        simulate_seconds(&mut clock, 50 * 60);
        assert_eq!(clock.time(), at(1, 0, 0));
        simulate_seconds(&mut clock, 9 * 3600);
        assert_eq!(clock.time(), at(10, 0, 0));
    }

    #[test]
    fn test_advance_full_day() {
        let mut clock = clock_at(at(8, 15, 30));
        simulate_seconds(&mut clock, 24 * 3600);
        assert_eq!(clock.time(), at(8, 15, 30));
    }

    #[test]
    fn test_day_wrap_preserves_alarm_configuration() {
        let mut clock = clock_at(at(23, 59, 59));
        clock.set_alarm_time(at(6, 30, 0));
        clock.enable_alarm();

        simulate_seconds(&mut clock, 1);

        assert_eq!(clock.time(), ClockTime::MIDNIGHT);
        assert!(clock.is_valid());
        assert_eq!(clock.alarm_time(), at(6, 30, 0));
        assert!(clock.is_alarm_enabled());
    }

    #[test]
    fn test_set_time_keeps_sub_second_phase() {
        let mut clock = clock_at(ClockTime::MIDNIGHT);
        for _ in 0..3 {
            clock.tick();
        }
        clock.set_time(at(10, 0, 0));
        clock.tick();
        assert_eq!(clock.tick(), TickEvent::Second);
        assert_eq!(clock.time(), at(10, 0, 1));
    }

    #[test]
    fn test_alarm_round_trip() {
        let mut clock = ClockEngine::new(TICKS_PER_SECOND);
        clock.set_alarm_time(at(2, 15, 0));
        assert_eq!(clock.alarm_time(), at(2, 15, 0));
        assert_eq!(clock.alarm().time(), at(2, 15, 0));
    }

    #[test]
    fn test_enable_disable_alarm() {
        let mut clock = ClockEngine::new(TICKS_PER_SECOND);
        assert!(!clock.is_alarm_enabled());
        clock.enable_alarm();
        assert!(clock.is_alarm_enabled());
        clock.enable_alarm();
        assert!(clock.is_alarm_enabled());
        clock.disable_alarm();
        assert!(!clock.is_alarm_enabled());
    }

    #[test]
    fn test_alarm_triggers_at_exact_tick() {
        let mut clock = ringing_soon(at(7, 0, 0), at(6, 59, 59));
        for _ in 1..TICKS_PER_SECOND {
            clock.tick();
            assert!(!clock.is_alarm_triggered());
        }
        assert_eq!(clock.tick(), TickEvent::Alarm);
        assert!(clock.is_alarm_triggered());
        assert_eq!(clock.alarm_state(), AlarmState::Triggered);

        // Latched while time moves on.
        simulate_seconds(&mut clock, 3);
        assert!(clock.is_alarm_triggered());
    }

    #[test]
    fn test_disabled_alarm_does_not_trigger() {
        let mut clock = ringing_soon(at(7, 0, 0), at(6, 59, 59));
        clock.disable_alarm();
        simulate_seconds(&mut clock, 2);
        assert!(!clock.is_alarm_triggered());
    }

    #[test]
    fn test_disable_while_triggered_keeps_sounding() {
        let mut clock = ringing_soon(at(7, 0, 0), at(6, 59, 59));
        simulate_seconds(&mut clock, 1);
        clock.disable_alarm();
        assert!(clock.is_alarm_triggered());
        assert!(!clock.is_alarm_enabled());
    }

    #[test]
    fn test_snooze_retriggers_after_five_minutes() {
        let mut clock = ringing_soon(at(7, 0, 0), at(6, 59, 59));
        simulate_seconds(&mut clock, 1);
        assert!(clock.is_alarm_triggered());

        clock.snooze_alarm(5).unwrap();
        assert!(!clock.is_alarm_triggered());
        assert_eq!(clock.alarm_state(), AlarmState::Snoozed);
        assert_eq!(clock.alarm().snoozed_time(), Some(at(7, 5, 0)));
        assert_eq!(clock.alarm_time(), at(7, 0, 0));

        simulate_seconds(&mut clock, 5 * 60 - 1);
        assert!(!clock.is_alarm_triggered());
        simulate_seconds(&mut clock, 1);
        assert!(clock.is_alarm_triggered());
        assert_eq!(clock.time(), at(7, 5, 0));
        assert_eq!(clock.alarm().snoozed_time(), None);
    }

    #[test]
    fn test_snooze_across_hour_boundary() {
        let mut clock = ringing_soon(at(8, 58, 0), at(8, 57, 59));
        simulate_seconds(&mut clock, 1);
        clock.snooze_alarm(5).unwrap();
        assert_eq!(clock.alarm().snoozed_time(), Some(at(9, 3, 0)));
        simulate_seconds(&mut clock, 5 * 60);
        assert!(clock.is_alarm_triggered());
        assert_eq!(clock.time(), at(9, 3, 0));
    }

    #[test]
    fn test_snooze_across_midnight() {
        let mut clock = ringing_soon(at(23, 57, 0), at(23, 56, 59));
        simulate_seconds(&mut clock, 1);
        assert!(clock.is_alarm_triggered());

        clock.snooze_alarm(5).unwrap();
        simulate_seconds(&mut clock, 5 * 60 - 1);
        assert!(!clock.is_alarm_triggered());
        simulate_seconds(&mut clock, 1);
        assert!(clock.is_alarm_triggered());
        assert_eq!(clock.time(), at(0, 2, 0));
    }

    #[test]
    fn test_snooze_rejections_leave_state_alone() {
        let mut clock = ClockEngine::new(TICKS_PER_SECOND);
        assert_eq!(clock.snooze_alarm(5), Err(ClockError::InvalidTime));

        let mut clock = ringing_soon(at(7, 0, 0), at(6, 59, 59));
        simulate_seconds(&mut clock, 1);
        assert_eq!(clock.snooze_alarm(0), Err(ClockError::ZeroSnooze));
        assert!(clock.is_alarm_triggered());
        assert_eq!(clock.alarm().snoozed_time(), None);
    }

    #[test]
    fn test_snooze_default_uses_config() {
        let config = Config {
            ticks_per_second: TICKS_PER_SECOND,
            snooze_minutes: 10,
        };
        let mut clock = ClockEngine::with_config(&config);
        clock.set_time(at(7, 0, 30));
        clock.snooze_alarm_default().unwrap();
        assert_eq!(clock.alarm().snoozed_time(), Some(at(7, 10, 0)));
    }

    #[test]
    fn test_cancel_until_next_day() {
        let mut clock = ringing_soon(at(7, 0, 0), at(6, 59, 59));
        simulate_seconds(&mut clock, 1);
        clock.cancel_alarm_until_next_day();

        assert!(!clock.is_alarm_triggered());
        assert!(clock.is_alarm_enabled());
        assert_eq!(clock.alarm_state(), AlarmState::Cancelled);

        // The same second and the rest of the day stay silent.
        clock.tick();
        assert!(!clock.is_alarm_triggered());
        clock.set_time(at(6, 59, 59));
        simulate_seconds(&mut clock, 1);
        assert!(!clock.is_alarm_triggered());

        // Past midnight the alarm is armed again.
        clock.set_time(at(23, 59, 59));
        simulate_seconds(&mut clock, 1);
        assert_eq!(clock.alarm_state(), AlarmState::Armed);
        clock.set_time(at(6, 59, 59));
        simulate_seconds(&mut clock, 1);
        assert!(clock.is_alarm_triggered());
    }

    #[test]
    fn test_cancel_drops_pending_snooze() {
        let mut clock = ringing_soon(at(7, 0, 0), at(6, 59, 59));
        simulate_seconds(&mut clock, 1);
        clock.snooze_alarm(5).unwrap();
        clock.cancel_alarm_until_next_day();
        simulate_seconds(&mut clock, 5 * 60);
        assert!(!clock.is_alarm_triggered());
    }

    #[test]
    fn test_cancel_while_disabled_is_idle() {
        let mut clock = ringing_soon(at(7, 0, 0), at(6, 59, 59));
        simulate_seconds(&mut clock, 1);
        clock.disable_alarm();
        clock.cancel_alarm_until_next_day();
        assert_eq!(clock.alarm_state(), AlarmState::Idle);
    }

    #[test]
    fn test_snapshot() {
        let mut clock = ringing_soon(at(7, 0, 0), at(6, 59, 59));
        simulate_seconds(&mut clock, 1);
        let snapshot = clock.snapshot();
        assert_eq!(snapshot.time, at(7, 0, 0));
        assert!(snapshot.valid);
        assert_eq!(snapshot.alarm_time, at(7, 0, 0));
        assert!(snapshot.alarm_enabled);
        assert!(snapshot.alarm_triggered);
        assert_eq!(snapshot.alarm_state, AlarmState::Triggered);
    }
}
