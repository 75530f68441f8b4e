//! Alarm configuration and run-state.
//!
//! This module keeps everything the alarm needs apart from the wall-clock time,
//! so that clearing the time at the day boundary never touches alarm state.
//!
//! # Features
//!
//! - A single daily alarm at a [`ClockTime`] (hours, minutes and seconds must match)
//! - Enable/disable gating of future matches
//! - A latched trigger flag that survives disabling the alarm
//! - Snoozing to a computed target without changing the configured alarm time
//! - Cancelling until the next day
//!
//! # States
//!
//! See [`AlarmState`]. The configured time is matched while `Armed`, the snooze
//! target while `Snoozed`, and nothing while `Cancelled` until the clock passes
//! midnight.

use crate::time::{times_match, ClockTime};

/// Observable state of the alarm.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AlarmState {
    /// Disabled and silent
    Idle,
    /// Enabled, waiting for the configured alarm time
    Armed,
    /// Sounding until snoozed or cancelled
    Triggered,
    /// Enabled, waiting for the snooze target
    Snoozed,
    /// Enabled, but silenced for the rest of the day
    Cancelled,
}

/// The alarm sub-state of the clock.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Alarm {
    time: ClockTime,
    enabled: bool,
    triggered: bool,
    snoozed_time: ClockTime,
    snoozed: bool,
    suppressed: bool,
}

impl Default for Alarm {
    fn default() -> Self {
        Self::new()
    }
}

impl Alarm {
    /// A disabled, silent alarm set to midnight.
    pub const fn new() -> Self {
        Self {
            time: ClockTime::MIDNIGHT,
            enabled: false,
            triggered: false,
            snoozed_time: ClockTime::MIDNIGHT,
            snoozed: false,
            suppressed: false,
        }
    }

    /// The configured alarm time.
    pub fn time(&self) -> ClockTime {
        self.time
    }

    /// Replaces the configured alarm time.
    ///
    /// A new schedule lifts a cancel-until-next-day, so the new time can ring
    /// today.
    pub fn set_time(&mut self, time: ClockTime) {
        self.time = time;
        self.suppressed = false;
    }

    pub fn enable(&mut self) {
        self.enabled = true;
    }

    /// Stops future matches. A trigger already in progress keeps sounding.
    pub fn disable(&mut self) {
        self.enabled = false;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn is_triggered(&self) -> bool {
        self.triggered
    }

    /// The pending snooze target, if a snooze is armed.
    pub fn snoozed_time(&self) -> Option<ClockTime> {
        self.snoozed.then_some(self.snoozed_time)
    }

    /// The time the next match is tested against, if any.
    pub fn target(&self) -> Option<ClockTime> {
        if !self.enabled {
            None
        } else if self.snoozed {
            Some(self.snoozed_time)
        } else if self.suppressed {
            None
        } else {
            Some(self.time)
        }
    }

    pub fn state(&self) -> AlarmState {
        if self.triggered {
            AlarmState::Triggered
        } else if !self.enabled {
            AlarmState::Idle
        } else if self.snoozed {
            AlarmState::Snoozed
        } else if self.suppressed {
            AlarmState::Cancelled
        } else {
            AlarmState::Armed
        }
    }

    /// Tests `now` against the active target and latches the trigger on a
    /// match. A fired snooze does not re-arm.
    ///
    /// # Returns
    /// * `true` if the alarm fired at `now`
    pub(crate) fn check(&mut self, now: &ClockTime) -> bool {
        match self.target() {
            Some(target) if times_match(&target, now) => {
                self.triggered = true;
                self.snoozed = false;
                true
            }
            _ => false,
        }
    }

    /// Silences the alarm and arms a match at `target`.
    pub(crate) fn snooze_until(&mut self, target: ClockTime) {
        self.snoozed_time = target;
        self.snoozed = true;
        self.triggered = false;
    }

    /// Silences the alarm and ignores the configured time until midnight.
    pub(crate) fn cancel_until_midnight(&mut self) {
        self.triggered = false;
        self.snoozed = false;
        self.suppressed = true;
    }

    /// Called when the clock wraps past midnight.
    pub(crate) fn new_day(&mut self) {
        self.suppressed = false;
    }
}
