//! RGB indicator driver.
//!
//! Three LEDC PWM channels (CH0-2, 12-bit) drive a common-cathode RGB
//! LED.  Zone colours are mapped to duty levels here: any non-zero colour
//! channel lights at [`INDICATOR_LEVEL`], zero stays dark.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: drives LEDC via hw_init.
//! On host/test: hw_init stubs succeed, state tracked in-memory.

use crate::drivers::hw_init;
use crate::error::ActuatorError;
use crate::zone::Rgb;

/// Duty for a lit channel on the 0–4095 scale.
pub const INDICATOR_LEVEL: u16 = 2048;
/// Largest duty the 12-bit timer accepts.
pub const INDICATOR_MAX: u16 = 4095;

/// Map a zone colour onto indicator duty levels.
pub const fn levels_for(colour: Rgb) -> (u16, u16, u16) {
    (lit(colour.0), lit(colour.1), lit(colour.2))
}

const fn lit(channel: u8) -> u16 {
    if channel > 0 { INDICATOR_LEVEL } else { 0 }
}

pub struct IndicatorLed {
    current: (u16, u16, u16),
}

impl Default for IndicatorLed {
    fn default() -> Self {
        Self::new()
    }
}

impl IndicatorLed {
    pub fn new() -> Self {
        Self { current: (0, 0, 0) }
    }

    /// Apply duty levels.  Values above 12 bits are clamped.
    pub fn set_levels(&mut self, r: u16, g: u16, b: u16) -> Result<(), ActuatorError> {
        let (r, g, b) = (r.min(INDICATOR_MAX), g.min(INDICATOR_MAX), b.min(INDICATOR_MAX));
        hw_init::ledc_set(hw_init::LEDC_CH_LED_R, u32::from(r))?;
        hw_init::ledc_set(hw_init::LEDC_CH_LED_G, u32::from(g))?;
        hw_init::ledc_set(hw_init::LEDC_CH_LED_B, u32::from(b))?;
        self.current = (r, g, b);
        Ok(())
    }

    pub fn off(&mut self) -> Result<(), ActuatorError> {
        self.set_levels(0, 0, 0)
    }

    pub fn current_levels(&self) -> (u16, u16, u16) {
        self.current
    }
}
