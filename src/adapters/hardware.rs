//! Hardware adapter: bridges the board peripherals to the port traits.
//!
//! Owns the current sensor, the three zone actuators, the OLED panel and
//! the download-mode reset, exposing them as one [`Board`](crate::app::ports::Board).
//! This is the only module the monitor loop reaches hardware through.  On
//! non-espidf targets the drivers fall back to their simulation stubs.

use display_interface::WriteOnlyDataCommand;

use crate::app::ports::{ActuatorPort, DisplayPort, ResetPort, SensorPort};
use crate::drivers::buzzer::Buzzer;
use crate::drivers::indicator::IndicatorLed;
use crate::drivers::matrix::{MatrixDriver, MatrixPattern};
use crate::drivers::oled::OledDisplay;
use crate::drivers::reset::DownloadModeReset;
use crate::error::{ActuatorError, DisplayError, SensorError};
use crate::sensors::CurrentSensor;
use crate::zone::RawSample;

/// Concrete adapter that combines all hardware behind port traits.
pub struct HardwareAdapter<DI> {
    sensor: CurrentSensor,
    indicator: IndicatorLed,
    matrix: MatrixDriver,
    buzzer: Buzzer,
    oled: OledDisplay<DI>,
    reset: DownloadModeReset,
}

impl<DI: WriteOnlyDataCommand> HardwareAdapter<DI> {
    pub fn new(
        sensor: CurrentSensor,
        indicator: IndicatorLed,
        matrix: MatrixDriver,
        buzzer: Buzzer,
        oled: OledDisplay<DI>,
        reset: DownloadModeReset,
    ) -> Self {
        Self {
            sensor,
            indicator,
            matrix,
            buzzer,
            oled,
            reset,
        }
    }

    pub fn matrix(&self) -> &MatrixDriver {
        &self.matrix
    }

    pub fn indicator(&self) -> &IndicatorLed {
        &self.indicator
    }
}

// ── SensorPort ────────────────────────────────────────────────

impl<DI: WriteOnlyDataCommand> SensorPort for HardwareAdapter<DI> {
    fn read_sample(&mut self) -> Result<RawSample, SensorError> {
        self.sensor.read()
    }
}

// ── ActuatorPort ──────────────────────────────────────────────

impl<DI: WriteOnlyDataCommand> ActuatorPort for HardwareAdapter<DI> {
    fn set_indicator(&mut self, r: u16, g: u16, b: u16) -> Result<(), ActuatorError> {
        self.indicator.set_levels(r, g, b)
    }

    fn show_matrix(&mut self, pattern: &MatrixPattern) -> Result<(), ActuatorError> {
        self.matrix.show(pattern)
    }

    fn buzzer_on(&mut self) -> Result<bool, ActuatorError> {
        self.buzzer.ensure_on()
    }

    fn buzzer_off(&mut self) -> Result<bool, ActuatorError> {
        self.buzzer.ensure_off()
    }

    fn is_buzzer_on(&self) -> bool {
        self.buzzer.is_on()
    }
}

// ── DisplayPort ───────────────────────────────────────────────

impl<DI: WriteOnlyDataCommand> DisplayPort for HardwareAdapter<DI> {
    fn fill(&mut self, lit: bool) {
        self.oled.fill(lit);
    }

    fn draw_rect(&mut self, x: u8, y: u8, width: u8, height: u8, lit: bool) {
        self.oled.draw_rect(x, y, width, height, lit);
    }

    fn draw_string(&mut self, text: &str, x: u8, y: u8, lit: bool) {
        self.oled.draw_string(text, x, y, lit);
    }

    fn commit(&mut self) -> Result<(), DisplayError> {
        self.oled.commit()
    }
}

// ── ResetPort ─────────────────────────────────────────────────

impl<DI: WriteOnlyDataCommand> ResetPort for HardwareAdapter<DI> {
    fn reboot_to_bootloader(&mut self) {
        self.reset.reboot();
    }
}
