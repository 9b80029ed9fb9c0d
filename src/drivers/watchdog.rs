//! Task Watchdog Timer (TWDT) driver.
//!
//! Subscribes the main task to the ESP-IDF TWDT so a stalled loop resets
//! the board.  The timeout comes from `MonitorConfig::watchdog_timeout_ms`.
//!
//! The main loop calls `feed()` once per iteration, and the fatal-halt
//! loop keeps feeding so a sensor fault stays on screen instead of
//! rebooting.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

use log::info;

pub struct Watchdog {
    timeout_ms: u32,
    subscribed: bool,
    feeds: u32,
}

impl Watchdog {
    /// Reconfigure the TWDT and subscribe the calling task.
    #[cfg(target_os = "espidf")]
    pub fn new(timeout_ms: u32) -> Self {
        let subscribed = unsafe {
            let cfg = esp_task_wdt_config_t {
                timeout_ms,
                idle_core_mask: 0,
                trigger_panic: true,
            };
            let ret = esp_task_wdt_reconfigure(&cfg);
            if ret != ESP_OK as i32 {
                log::warn!("watchdog: reconfigure returned {ret} (may already be configured)");
            }
            let ret = esp_task_wdt_add(core::ptr::null_mut());
            if ret != ESP_OK as i32 {
                log::warn!("watchdog: subscribe failed ({ret})");
            }
            ret == ESP_OK as i32
        };
        if subscribed {
            info!("watchdog: subscribed ({timeout_ms} ms, panic on trigger)");
        }
        Self {
            timeout_ms,
            subscribed,
            feeds: 0,
        }
    }

    #[cfg(not(target_os = "espidf"))]
    pub fn new(timeout_ms: u32) -> Self {
        info!("watchdog(sim): {timeout_ms} ms, no-op");
        Self {
            timeout_ms,
            subscribed: false,
            feeds: 0,
        }
    }

    pub fn feed(&mut self) {
        self.feeds = self.feeds.wrapping_add(1);
        #[cfg(target_os = "espidf")]
        if self.subscribed {
            unsafe {
                esp_task_wdt_reset();
            }
        }
    }

    pub fn timeout_ms(&self) -> u32 {
        self.timeout_ms
    }

    pub fn is_subscribed(&self) -> bool {
        self.subscribed
    }

    pub fn feeds(&self) -> u32 {
        self.feeds
    }
}
