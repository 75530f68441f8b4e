//! Blocking tick driver.
//!
//! For boards without a spare timer interrupt, [`Ticker`] paces a
//! [`SharedClock`] from an `embedded-hal` delay: each [`step`](Ticker::step)
//! waits one tick period and then ticks the clock. The async counterpart lives
//! in [`crate::asynch`].

use embedded_hal::delay::DelayNs;

use crate::clock::TickEvent;
use crate::shared::SharedClock;

const MICROS_PER_SECOND: u32 = 1_000_000;

/// Microseconds between ticks at `ticks_per_second`. A zero rate, which never
/// advances the clock anyway, paces at one tick per second.
pub(crate) fn tick_period_us(ticks_per_second: u16) -> u32 {
    MICROS_PER_SECOND
        .checked_div(u32::from(ticks_per_second))
        .unwrap_or(MICROS_PER_SECOND)
}

/// Drives a [`SharedClock`] from a blocking delay.
pub struct Ticker<'a, D> {
    clock: &'a SharedClock,
    delay: D,
    period_us: u32,
}

impl<'a, D: DelayNs> Ticker<'a, D> {
    /// Creates a ticker for `clock`, pacing with `delay`.
    pub fn new(clock: &'a SharedClock, delay: D) -> Self {
        let period_us = tick_period_us(clock.ticks_per_second());
        debug!("ticker: period {} us", period_us);
        Self {
            clock,
            delay,
            period_us,
        }
    }

    pub fn period_us(&self) -> u32 {
        self.period_us
    }

    /// Waits one tick period, then ticks the clock.
    pub fn step(&mut self) -> TickEvent {
        self.delay.delay_us(self.period_us);
        self.clock.tick()
    }

    /// Runs `seconds` worth of ticks.
    ///
    /// # Returns
    /// * `true` if the alarm fired during the run
    pub fn run_seconds(&mut self, seconds: u32) -> bool {
        let ticks = seconds.saturating_mul(u32::from(self.clock.ticks_per_second()));
        let mut fired = false;
        for _ in 0..ticks {
            fired |= self.step() == TickEvent::Alarm;
        }
        fired
    }

    /// Returns the delay.
    pub fn release(self) -> D {
        self.delay
    }
}
