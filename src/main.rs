//! ZoneWatch firmware: main entry point.
//!
//! Brings the board up, then hands control to the monitor service.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                    Adapters (outer ring)                     │
//! │                                                              │
//! │  HardwareAdapter            LogEventSink     Esp32TimeAdapter │
//! │  (Sensor+Actuator+Display   (EventSink)      (ClockPort)      │
//! │   +Reset)                                                    │
//! │                                                              │
//! │  ─────────────── Port Trait Boundary ─────────────────       │
//! │                                                              │
//! │  ┌────────────────────────────────────────────────────┐      │
//! │  │         MonitorService (pure logic)                │      │
//! │  │  input debounce · zone classify · panel            │      │
//! │  └────────────────────────────────────────────────────┘      │
//! │                                                              │
//! │  GPIO ISR ──▶ EDGE_QUEUE (lock-free) ──▶ service_input       │
//! └──────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use anyhow::Result;
use log::{error, info, warn};

use esp_idf_svc::hal::{
    delay::FreeRtos,
    i2c::{I2cConfig, I2cDriver},
    peripherals::Peripherals,
    prelude::*,
    rmt::{config::TransmitConfig, TxRmtDriver},
};

use zonewatch::adapters::hardware::HardwareAdapter;
use zonewatch::adapters::log_sink::LogEventSink;
use zonewatch::adapters::time::Esp32TimeAdapter;
use zonewatch::app::service::{LoopStatus, MonitorService};
use zonewatch::config::MonitorConfig;
use zonewatch::drivers::buzzer::Buzzer;
use zonewatch::drivers::hw_init;
use zonewatch::drivers::indicator::IndicatorLed;
use zonewatch::drivers::matrix::MatrixDriver;
use zonewatch::drivers::oled::OledDisplay;
use zonewatch::drivers::reset::DownloadModeReset;
use zonewatch::drivers::watchdog::Watchdog;
use zonewatch::error::Error;
use zonewatch::input::EDGE_QUEUE;
use zonewatch::pins;
use zonewatch::sensors::CurrentSensor;
use zonewatch::state::SystemState;

static STATE: SystemState = SystemState::new();

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  ZoneWatch v{}                    ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Config (compiled-in) ───────────────────────────────
    let config = MonitorConfig::default();
    config.validate()?;
    info!("config: {}", serde_json::to_string(&config)?);

    // ── 3. Raw peripherals: ADC, buttons, LEDC ────────────────
    hw_init::init_peripherals().map_err(|e| init_failed("adc/gpio/ledc", e))?;

    // ── 4. HAL peripherals: I²C panel, RMT matrix ─────────────
    let peripherals = Peripherals::take()?;

    let i2c = I2cDriver::new(
        peripherals.i2c0,
        peripherals.pins.gpio14,
        peripherals.pins.gpio15,
        &I2cConfig::new().baudrate(pins::I2C_FREQ_HZ.Hz().into()),
    )?;
    let mut oled = OledDisplay::over_i2c(i2c, pins::OLED_I2C_ADDR);
    oled.init().map_err(|e| init_failed("oled", e))?;

    let rmt = TxRmtDriver::new(
        peripherals.rmt.channel0,
        peripherals.pins.gpio7,
        &TransmitConfig::new().clock_divider(1),
    )?;
    let matrix = MatrixDriver::new(rmt, config.pixel_settle_us)?;

    let mut hw = HardwareAdapter::new(
        CurrentSensor::new(pins::CURRENT_ADC_CHANNEL),
        IndicatorLed::new(),
        matrix,
        Buzzer::new(),
        oled,
        DownloadModeReset::new(),
    );

    // ── 5. Supervision and interrupts ─────────────────────────
    let mut watchdog = Watchdog::new(config.watchdog_timeout_ms);
    hw_init::init_isr_service().map_err(|e| init_failed("isr service", e))?;

    let mut clock = Esp32TimeAdapter::new();
    let mut sink = LogEventSink::new();
    let mut service = MonitorService::new(config, &STATE, &EDGE_QUEUE);

    // ── 6. Boot splash ────────────────────────────────────────
    if let Err(e) = service.boot(&mut hw, &mut clock, &mut sink) {
        error!("boot failed: {e}");
        halt(&mut watchdog);
    }

    // ── 7. Monitor loop ───────────────────────────────────────
    loop {
        watchdog.feed();
        match service.run_once(&mut hw, &mut clock, &mut sink) {
            Ok(LoopStatus::Idle | LoopStatus::Sampled(_)) => {}
            Ok(LoopStatus::Rebooting) => {
                // esp_restart() does not return; only reached if it did.
                warn!("reboot requested but still running");
                halt(&mut watchdog);
            }
            Err(e) => {
                error!("monitor stopped: {e}");
                halt(&mut watchdog);
            }
        }
    }
}

fn init_failed(what: &'static str, cause: impl core::fmt::Display) -> Error {
    error!("init: {what} failed ({cause})");
    Error::Init(what)
}

/// Keep the last frame on the panel.  The watchdog stays fed so the
/// diagnostic is not wiped by a reset.
fn halt(watchdog: &mut Watchdog) -> ! {
    loop {
        watchdog.feed();
        FreeRtos::delay_ms(1_000);
    }
}
