//! Load-current sensor on ADC1.
//!
//! The analog front end (a joystick axis on the bring-up board) feeds
//! GPIO2 / ADC1_CH1.  One oneshot conversion per read at 12 bits with
//! 12 dB attenuation; no averaging.  Zone and ampere mapping live in
//! [`crate::zone`].
//!
//! ## Dual-target design
//!
//! On ESP-IDF: reads through the oneshot handle set up by hw_init.
//! On host/test: reads a static `AtomicU16`; a failure can be injected.

#[cfg(not(target_os = "espidf"))]
use core::sync::atomic::{AtomicBool, AtomicU16, Ordering};

use crate::error::SensorError;
use crate::zone::RawSample;

#[cfg(not(target_os = "espidf"))]
static SIM_CURRENT_ADC: AtomicU16 = AtomicU16::new(0);
#[cfg(not(target_os = "espidf"))]
static SIM_CURRENT_FAIL: AtomicBool = AtomicBool::new(false);

#[cfg(not(target_os = "espidf"))]
pub fn sim_set_current_adc(raw: u16) {
    SIM_CURRENT_ADC.store(raw, Ordering::Relaxed);
}

/// Make the next reads fail until cleared.
#[cfg(not(target_os = "espidf"))]
pub fn sim_set_current_fault(fail: bool) {
    SIM_CURRENT_FAIL.store(fail, Ordering::Relaxed);
}

pub struct CurrentSensor {
    channel: u32,
    reads: u32,
    last: Option<RawSample>,
}

impl CurrentSensor {
    pub fn new(channel: u32) -> Self {
        Self {
            channel,
            reads: 0,
            last: None,
        }
    }

    pub fn read(&mut self) -> Result<RawSample, SensorError> {
        let raw = self.read_adc()?;
        self.reads = self.reads.saturating_add(1);
        self.last = Some(raw);
        Ok(raw)
    }

    /// Last successful conversion.  Never fed back into the loop.
    pub fn last(&self) -> Option<RawSample> {
        self.last
    }

    pub fn reads(&self) -> u32 {
        self.reads
    }

    pub fn channel(&self) -> u32 {
        self.channel
    }

    #[cfg(target_os = "espidf")]
    fn read_adc(&self) -> Result<RawSample, SensorError> {
        crate::drivers::hw_init::adc1_read(self.channel)
    }

    #[cfg(not(target_os = "espidf"))]
    fn read_adc(&self) -> Result<RawSample, SensorError> {
        if SIM_CURRENT_FAIL.load(Ordering::Relaxed) {
            return Err(SensorError::AdcReadFailed);
        }
        Ok(SIM_CURRENT_ADC.load(Ordering::Relaxed))
    }
}
