//! Interrupt-safe access to a single [`ClockEngine`].
//!
//! The tick arrives from a timer interrupt while the main loop reads and
//! configures the clock. [`SharedClock`] puts the engine behind a
//! `critical_section::Mutex`, so every operation (including a full
//! [`ClockSnapshot`]) runs with the tick interrupt held off and never observes
//! a half-updated time.
//!
//! A `SharedClock` is `const`-constructible and is meant to live in a `static`
//! that both the interrupt handler and the main loop reference.

use core::cell::RefCell;

use critical_section::Mutex;

use crate::clock::{ClockEngine, ClockSnapshot, TickEvent};

/// A [`ClockEngine`] shared between interrupt and thread context.
pub struct SharedClock {
    inner: Mutex<RefCell<ClockEngine>>,
}

impl SharedClock {
    pub const fn new(engine: ClockEngine) -> Self {
        Self {
            inner: Mutex::new(RefCell::new(engine)),
        }
    }

    /// Advances the clock by one tick. Call from the timer interrupt.
    pub fn tick(&self) -> TickEvent {
        self.with(ClockEngine::tick)
    }

    /// Copies the time and alarm state in one critical section.
    pub fn snapshot(&self) -> ClockSnapshot {
        critical_section::with(|cs| self.inner.borrow(cs).borrow().snapshot())
    }

    pub fn ticks_per_second(&self) -> u16 {
        critical_section::with(|cs| self.inner.borrow(cs).borrow().ticks_per_second())
    }

    /// Runs `f` on the engine inside a critical section.
    ///
    /// Keep `f` short: the tick interrupt is held off while it runs.
    pub fn with<R>(&self, f: impl FnOnce(&mut ClockEngine) -> R) -> R {
        critical_section::with(|cs| f(&mut *self.inner.borrow(cs).borrow_mut()))
    }
}
