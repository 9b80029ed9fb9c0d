//! Reboot into the ROM serial-download mode.
//!
//! Sets `RTC_CNTL_FORCE_DOWNLOAD_BOOT` in `RTC_CNTL_OPTION1_REG` and then
//! restarts.  The ROM bootloader sees the flag, clears it, and waits for a
//! flasher instead of booting the application.
//!
//! On host/test the request is only counted.

use log::warn;

/// `RTC_CNTL_OPTION1_REG` on the ESP32-S3.
#[cfg(target_os = "espidf")]
const RTC_CNTL_OPTION1_REG: usize = 0x6000_812C;
#[cfg(target_os = "espidf")]
const RTC_CNTL_FORCE_DOWNLOAD_BOOT: u32 = 1 << 0;

#[derive(Default)]
pub struct DownloadModeReset {
    requests: u32,
}

impl DownloadModeReset {
    pub fn new() -> Self {
        Self { requests: 0 }
    }

    #[cfg(target_os = "espidf")]
    pub fn reboot(&mut self) {
        self.requests += 1;
        warn!("reset: rebooting into download mode");
        // SAFETY: fixed MMIO address of an always-clocked RTC register.
        unsafe {
            let reg = RTC_CNTL_OPTION1_REG as *mut u32;
            reg.write_volatile(reg.read_volatile() | RTC_CNTL_FORCE_DOWNLOAD_BOOT);
            esp_idf_svc::sys::esp_restart();
        }
    }

    #[cfg(not(target_os = "espidf"))]
    pub fn reboot(&mut self) {
        self.requests += 1;
        warn!("reset(sim): download-mode reboot requested");
    }

    /// How many reboots were requested.  Only ever above zero on host.
    pub fn requests(&self) -> u32 {
        self.requests
    }
}
