//! Port traits: the boundary between the monitor logic and the board.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ MonitorService (domain)
//! ```
//!
//! Driven adapters (sensor, actuators, panel, reset, clock, event sink)
//! implement these traits.  The [`MonitorService`](super::service::MonitorService)
//! consumes them via generics, so the domain core never touches hardware
//! directly and runs unchanged against the mocks in `tests/`.

use crate::drivers::matrix::MatrixPattern;
use crate::error::{ActuatorError, DisplayError, SensorError};
use crate::zone::RawSample;

// ───────────────────────────────────────────────────────────────
// Sensor port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: one ADC conversion per call.
pub trait SensorPort {
    /// Sample the current channel.  Never returns a stale value; a failed
    /// conversion is an error.
    fn read_sample(&mut self) -> Result<RawSample, SensorError>;
}

// ───────────────────────────────────────────────────────────────
// Actuator port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port: the three zone actuators.
pub trait ActuatorPort {
    /// Set the RGB indicator duty levels (12-bit each).
    fn set_indicator(&mut self, r: u16, g: u16, b: u16) -> Result<(), ActuatorError>;

    /// Stream a complete 25-cell frame to the LED matrix.
    fn show_matrix(&mut self, pattern: &MatrixPattern) -> Result<(), ActuatorError>;

    /// Start the buzzer tone.  `Ok(true)` if the hardware was reconfigured,
    /// `Ok(false)` if it was already sounding.
    fn buzzer_on(&mut self) -> Result<bool, ActuatorError>;

    /// Silence the buzzer and hold the pin low.  `Ok(false)` if already off.
    fn buzzer_off(&mut self) -> Result<bool, ActuatorError>;

    /// Whether the buzzer is currently sounding.
    fn is_buzzer_on(&self) -> bool;
}

// ───────────────────────────────────────────────────────────────
// Display port (driven adapter: domain → OLED)
// ───────────────────────────────────────────────────────────────

/// Minimal monochrome drawing surface with an explicit commit.
///
/// Drawing calls only touch the off-screen buffer; nothing is visible
/// until [`commit`](Self::commit) succeeds.
pub trait DisplayPort {
    /// Paint every pixel on (`true`) or off.
    fn fill(&mut self, lit: bool);

    /// One-pixel rectangle outline.
    fn draw_rect(&mut self, x: u8, y: u8, width: u8, height: u8, lit: bool);

    /// Draw text with its top-left corner at `(x, y)`.
    fn draw_string(&mut self, text: &str, x: u8, y: u8, lit: bool);

    /// Push the buffer to the panel.
    fn commit(&mut self) -> Result<(), DisplayError>;
}

// ───────────────────────────────────────────────────────────────
// Reset port
// ───────────────────────────────────────────────────────────────

/// Platform reboot into the firmware-download mode.
///
/// On hardware this does not return.  Test doubles record the call and
/// return so the caller can observe it.
pub trait ResetPort {
    fn reboot_to_bootloader(&mut self);
}

// ───────────────────────────────────────────────────────────────
// Clock port
// ───────────────────────────────────────────────────────────────

/// Monotonic time and bounded sleeps.
pub trait ClockPort {
    /// Milliseconds since boot (wraps at `u32::MAX`).
    fn now_ms(&self) -> u32;

    /// Block the calling task for `ms` milliseconds.
    fn sleep_ms(&mut self, ms: u32);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`MonitorEvent`](super::events::MonitorEvent)s
/// through this port.  Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::MonitorEvent);
}

// ───────────────────────────────────────────────────────────────
// Board bundle
// ───────────────────────────────────────────────────────────────

/// Everything the monitor drives, owned by one adapter.  Bundling avoids
/// juggling several `&mut` borrows of the same peripheral set.
pub trait Board: SensorPort + ActuatorPort + DisplayPort + ResetPort {}

impl<T: SensorPort + ActuatorPort + DisplayPort + ResetPort> Board for T {}
