//! Async tick driver.
//!
//! This module provides an async counterpart of [`crate::ticker::Ticker`]
//! using `embedded-hal-async` delays. It is only available when the `async`
//! feature is enabled.
//!
//! # Example
//!
//! ```rust,ignore
//! use bcd_clock::asynch::Ticker;
//!
//! static CLOCK: SharedClock = SharedClock::new(ClockEngine::new(1000));
//!
//! #[embassy_executor::task]
//! async fn clock_task(delay: Delay) {
//!     let mut ticker = Ticker::new(&CLOCK, delay);
//!     loop {
//!         ticker.step().await;
//!     }
//! }
//! ```

use embedded_hal_async::delay::DelayNs;

use crate::clock::TickEvent;
use crate::shared::SharedClock;
use crate::ticker::tick_period_us;

/// Drives a [`SharedClock`] from an async delay.
pub struct Ticker<'a, D> {
    clock: &'a SharedClock,
    delay: D,
    period_us: u32,
}

impl<'a, D: DelayNs> Ticker<'a, D> {
    /// Creates an async ticker for `clock`, pacing with `delay`.
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
    pub async fn step(&mut self) -> TickEvent {
        self.delay.delay_us(self.period_us).await;
        self.clock.tick()
    }

    /// Runs `seconds` worth of ticks.
    ///
    /// # Returns
    /// * `true` if the alarm fired during the run
    pub async fn run_seconds(&mut self, seconds: u32) -> bool {
        let ticks = seconds.saturating_mul(u32::from(self.clock.ticks_per_second()));
        let mut fired = false;
        for _ in 0..ticks {
            fired |= self.step().await == TickEvent::Alarm;
        }
        fired
    }

    /// Returns the delay.
    pub fn release(self) -> D {
        self.delay
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AlarmState, ClockEngine, ClockTime};
    use embedded_hal_mock::eh1::delay::NoopDelay;

    #[tokio::test]
    async fn test_async_step() {
        let clock = SharedClock::new(ClockEngine::new(4));
        clock.with(|clock| clock.set_time(ClockTime::new(12, 0, 0).unwrap()));

        let mut ticker = Ticker::new(&clock, NoopDelay::new());
        assert_eq!(ticker.period_us(), 250_000);
        for _ in 0..3 {
            assert_eq!(ticker.step().await, TickEvent::Pending);
        }
        assert_eq!(ticker.step().await, TickEvent::Second);
        assert_eq!(clock.snapshot().time, ClockTime::new(12, 0, 1).unwrap());
    }

    #[tokio::test]
    async fn test_async_snooze_cycle() {
        let clock = SharedClock::new(ClockEngine::new(2));
        clock.with(|clock| {
            clock.set_time(ClockTime::new(6, 59, 59).unwrap());
            clock.set_alarm_time(ClockTime::new(7, 0, 0).unwrap());
            clock.enable_alarm();
        });

        let mut ticker = Ticker::new(&clock, NoopDelay::new());
        assert!(ticker.run_seconds(1).await);

        clock.with(|clock| clock.snooze_alarm(1)).unwrap();
        assert_eq!(clock.snapshot().alarm_state, AlarmState::Snoozed);
        assert!(!ticker.run_seconds(59).await);
        assert!(ticker.run_seconds(1).await);
        assert_eq!(clock.snapshot().time, ClockTime::new(7, 1, 0).unwrap());
    }
}
