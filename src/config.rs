//! Timing parameters for the monitor loop.
//!
//! Compiled-in defaults only: nothing is loaded or persisted at runtime.
//! The struct is serialisable so the active values can be dumped to the
//! log at boot.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Core monitor configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonitorConfig {
    // --- Loop cadence ---
    /// Pause between samples once monitoring is active (milliseconds)
    pub sample_period_ms: u32,
    /// Input polling granularity while idle or pausing (milliseconds)
    pub idle_poll_ms: u32,

    // --- Presentation ---
    /// Hold time after entering the Safe zone, before the panel is redrawn
    pub safe_settle_ms: u32,

    // --- Input ---
    /// Shared debounce window for both buttons (milliseconds)
    pub debounce_ms: u32,

    // --- LED matrix ---
    /// Settling delay after each streamed pixel (microseconds)
    pub pixel_settle_us: u32,
    /// Wait after RMT bring-up before the first frame (milliseconds)
    pub matrix_power_up_ms: u32,

    // --- Supervision ---
    /// Task watchdog timeout; the loop feeds it every poll slice
    pub watchdog_timeout_ms: u32,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            sample_period_ms: 250,
            idle_poll_ms: 10,

            safe_settle_ms: 500,

            debounce_ms: 200,

            pixel_settle_us: 80,
            matrix_power_up_ms: 100,

            watchdog_timeout_ms: 5_000,
        }
    }
}

impl MonitorConfig {
    /// Reject combinations that would starve the input path.
    pub fn validate(&self) -> Result<()> {
        if self.sample_period_ms == 0 {
            return Err(Error::Config("sample_period_ms must be non-zero"));
        }
        if self.idle_poll_ms == 0 {
            return Err(Error::Config("idle_poll_ms must be non-zero"));
        }
        if self.idle_poll_ms >= self.debounce_ms {
            return Err(Error::Config("idle_poll_ms must be below debounce_ms"));
        }
        if self.idle_poll_ms > self.sample_period_ms {
            return Err(Error::Config("idle_poll_ms must not exceed sample_period_ms"));
        }
        if self.watchdog_timeout_ms <= self.sample_period_ms + self.safe_settle_ms {
            return Err(Error::Config("watchdog_timeout_ms must exceed one full tick"));
        }
        Ok(())
    }
}
