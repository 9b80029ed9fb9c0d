//! Passive buzzer driver.
//!
//! LEDC channel 3 on timer 1 generates a 1 kHz carrier at 10% duty.
//! Switching is edge-triggered: the driver remembers what it last
//! applied and skips the register writes when asked for the same state
//! again.  Off means the channel is stopped with its idle level low, not
//! merely a zero duty.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: drives LEDC via hw_init.
//! On host/test: hw_init stubs succeed; `transitions()` counts the
//! hardware reconfigurations that would have happened.

use crate::drivers::hw_init;
use crate::error::ActuatorError;

/// Carrier duty: 10% of the 10-bit period (1023).
pub const BUZZER_DUTY: u32 = 102;

pub struct Buzzer {
    on: bool,
    transitions: u32,
}

impl Default for Buzzer {
    fn default() -> Self {
        Self::new()
    }
}

impl Buzzer {
    pub fn new() -> Self {
        Self {
            on: false,
            transitions: 0,
        }
    }

    /// Start the tone.  `Ok(false)` when it was already sounding.
    pub fn ensure_on(&mut self) -> Result<bool, ActuatorError> {
        if self.on {
            return Ok(false);
        }
        hw_init::ledc_set(hw_init::LEDC_CH_BUZZER, BUZZER_DUTY)?;
        self.on = true;
        self.transitions += 1;
        Ok(true)
    }

    /// Stop the tone and hold the pin low.  `Ok(false)` when already off.
    pub fn ensure_off(&mut self) -> Result<bool, ActuatorError> {
        if !self.on {
            return Ok(false);
        }
        hw_init::ledc_stop(hw_init::LEDC_CH_BUZZER)?;
        self.on = false;
        self.transitions += 1;
        Ok(true)
    }

    pub fn is_on(&self) -> bool {
        self.on
    }

    /// Number of hardware on/off reconfigurations since construction.
    pub fn transitions(&self) -> u32 {
        self.transitions
    }
}
