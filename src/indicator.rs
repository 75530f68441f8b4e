//! Alarm status output.
//!
//! [`AlarmIndicator`] drives an LED or buzzer pin from the alarm trigger flag.
//! The pin is only written when the flag changes, so calling
//! [`update`](AlarmIndicator::update) on every main-loop iteration is cheap.
//!
//! ```rust,ignore
//! let mut indicator = AlarmIndicator::new(led_pin);
//! loop {
//!     let snapshot = CLOCK.snapshot();
//!     indicator.update(snapshot.alarm_triggered)?;
//! }
//! ```

use embedded_hal::digital::OutputPin;

/// Errors from driving the indicator pin.
#[derive(Debug, PartialEq)]
pub enum IndicatorError<PinE> {
    Pin(PinE),
}

impl<PinE> From<PinE> for IndicatorError<PinE> {
    fn from(e: PinE) -> Self {
        IndicatorError::Pin(e)
    }
}

/// Mirrors the alarm trigger flag onto an output pin (high while sounding).
pub struct AlarmIndicator<P> {
    pin: P,
    lit: Option<bool>,
}

impl<P: OutputPin> AlarmIndicator<P> {
    /// Wraps `pin`. Nothing is written until the first [`update`](Self::update).
    pub fn new(pin: P) -> Self {
        Self { pin, lit: None }
    }

    /// Drives the pin high when `triggered`, low otherwise.
    ///
    /// # Returns
    /// * `Ok(())` on success, or when the pin already shows `triggered`
    /// * `Err(IndicatorError::Pin)` if the pin could not be written
    pub fn update(&mut self, triggered: bool) -> Result<(), IndicatorError<P::Error>> {
        if self.lit == Some(triggered) {
            return Ok(());
        }
        if triggered {
            self.pin.set_high()?;
        } else {
            self.pin.set_low()?;
        }
        trace!("indicator: {}", triggered);
        self.lit = Some(triggered);
        Ok(())
    }

    /// Whether the pin was last driven high.
    pub fn is_lit(&self) -> bool {
        self.lit == Some(true)
    }

    /// Returns the pin.
    pub fn release(self) -> P {
        self.pin
    }
}
