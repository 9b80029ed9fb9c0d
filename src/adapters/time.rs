//! ESP32 clock adapter.
//!
//! Implements [`ClockPort`] for the monitor loop.
//!
//! - **`target_os = "espidf"`**: `esp_timer_get_time()` for the
//!   millisecond counter (the same source the button ISRs stamp edges
//!   with) and `FreeRtos::delay_ms` for sleeps, which yields to the idle
//!   task.
//! - **`not(target_os = "espidf")`**: `std::time::Instant` and
//!   `std::thread::sleep` for host-side runs.

use crate::app::ports::ClockPort;

pub struct Esp32TimeAdapter {
    #[cfg(not(target_os = "espidf"))]
    start: std::time::Instant,
}

impl Default for Esp32TimeAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl Esp32TimeAdapter {
    pub fn new() -> Self {
        Self {
            #[cfg(not(target_os = "espidf"))]
            start: std::time::Instant::now(),
        }
    }
}

impl ClockPort for Esp32TimeAdapter {
    /// Milliseconds since boot, truncated to 32 bits (wraps after ~49 days).
    #[cfg(target_os = "espidf")]
    fn now_ms(&self) -> u32 {
        (unsafe { esp_idf_svc::sys::esp_timer_get_time() } / 1_000) as u32
    }

    #[cfg(not(target_os = "espidf"))]
    fn now_ms(&self) -> u32 {
        self.start.elapsed().as_millis() as u32
    }

    #[cfg(target_os = "espidf")]
    fn sleep_ms(&mut self, ms: u32) {
        esp_idf_svc::hal::delay::FreeRtos::delay_ms(ms);
    }

    #[cfg(not(target_os = "espidf"))]
    fn sleep_ms(&mut self, ms: u32) {
        std::thread::sleep(std::time::Duration::from_millis(u64::from(ms)));
    }
}
