//! Monitor service: the hexagonal core.
//!
//! [`MonitorService`] owns the input controller and the per-tick zone
//! logic.  Hardware, time and event output are injected at each call
//! through the port traits, so the whole loop runs against the mocks in
//! `tests/` unchanged.
//!
//! ```text
//!  EdgeQueue ──▶ ┌─────────────────────────┐ ──▶ EventSink
//!  SensorPort ──▶│     MonitorService       │
//!                │ input · classify · panel │──▶ ActuatorPort / DisplayPort
//!  ClockPort ◀──▶└─────────────────────────┘──▶ ResetPort
//! ```

use log::{debug, error, info, warn};

use crate::config::MonitorConfig;
use crate::display::{self, ACTIVE_BANNER, SENSOR_FAULT_BANNER, SPLASH};
use crate::drivers::indicator::levels_for;
use crate::drivers::matrix::{zone_pattern, BLANK};
use crate::error::{ActuatorError, Result};
use crate::input::{EdgeQueue, InputAction, InputController};
use crate::state::SystemState;
use crate::zone::{classify, Reading, Zone};

use super::events::MonitorEvent;
use super::ports::{Board, ClockPort, EventSink};

/// Outcome of one [`MonitorService::run_once`] iteration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LoopStatus {
    /// Not yet activated; input serviced, one idle slice slept.
    Idle,
    /// One sample taken (Undefined readings included) and the cadence
    /// pause completed.
    Sampled(Reading),
    /// Button B accepted; the reset has been issued.
    Rebooting,
}

pub struct MonitorService<'a> {
    config: MonitorConfig,
    state: &'a SystemState,
    edges: &'a EdgeQueue,
    input: InputController,
    last_zone: Option<Zone>,
    reboot_requested: bool,
    ticks: u32,
}

impl<'a> MonitorService<'a> {
    pub fn new(config: MonitorConfig, state: &'a SystemState, edges: &'a EdgeQueue) -> Self {
        let input = InputController::new(config.debounce_ms);
        Self {
            config,
            state,
            edges,
            input,
            last_zone: None,
            reboot_requested: false,
            ticks: 0,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Park every output and show the splash.
    ///
    /// The matrix is blanked only after `matrix_power_up_ms`, so the LED
    /// supply has settled before the first frame.
    pub fn boot(
        &mut self,
        hw: &mut impl Board,
        clock: &mut impl ClockPort,
        sink: &mut impl EventSink,
    ) -> Result<()> {
        self.actuate(sink, hw.set_indicator(0, 0, 0));
        self.actuate(sink, hw.buzzer_off().map(|_| ()));
        self.state.set_buzzer_on(hw.is_buzzer_on());

        clock.sleep_ms(self.config.matrix_power_up_ms);
        self.actuate(sink, hw.show_matrix(&BLANK));

        display::render(hw, self.state.panel_inverted(), &SPLASH)?;
        sink.emit(&MonitorEvent::Booted);
        info!("monitor: booted, waiting for button A");
        Ok(())
    }

    /// One loop iteration: service input, then either idle or sample.
    pub fn run_once(
        &mut self,
        hw: &mut impl Board,
        clock: &mut impl ClockPort,
        sink: &mut impl EventSink,
    ) -> Result<LoopStatus> {
        self.service_input(hw, sink)?;
        if self.reboot_requested {
            return Ok(LoopStatus::Rebooting);
        }
        if !self.state.is_active() {
            clock.sleep_ms(self.config.idle_poll_ms);
            return Ok(LoopStatus::Idle);
        }

        let reading = self.tick(hw, clock, sink)?;
        if !self.reboot_requested {
            self.pause(self.config.sample_period_ms, hw, clock, sink)?;
        }
        if self.reboot_requested {
            return Ok(LoopStatus::Rebooting);
        }
        Ok(LoopStatus::Sampled(reading))
    }

    // ── Input ─────────────────────────────────────────────────

    /// Drain every queued button edge.
    ///
    /// Stops at the first accepted Button B edge: the reset is issued and
    /// nothing after it is processed.
    pub fn service_input(&mut self, hw: &mut impl Board, sink: &mut impl EventSink) -> Result<()> {
        while let Some(outcome) = self.input.poll(self.edges, self.state) {
            match outcome {
                None => {}
                Some(InputAction::Activate { inverted, first }) => {
                    if first {
                        info!("monitor: activated");
                    }
                    sink.emit(&MonitorEvent::Activated { inverted, first });
                    display::render_message(hw, inverted, ACTIVE_BANNER)?;
                }
                Some(InputAction::Reboot) => {
                    sink.emit(&MonitorEvent::RebootRequested);
                    self.reboot_requested = true;
                    hw.reboot_to_bootloader();
                    return Ok(());
                }
            }
        }
        Ok(())
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// Read → classify → drive actuators → render.
    ///
    /// A failed sensor read is fatal: the fault panel is shown and
    /// `Error::Sensor` returned.  Actuator failures are reported and the
    /// tick carries on.  Undefined samples change nothing.
    pub fn tick(
        &mut self,
        hw: &mut impl Board,
        clock: &mut impl ClockPort,
        sink: &mut impl EventSink,
    ) -> Result<Reading> {
        self.ticks = self.ticks.wrapping_add(1);

        let raw = match hw.read_sample() {
            Ok(raw) => raw,
            Err(e) => {
                error!("monitor: sensor read failed ({e})");
                sink.emit(&MonitorEvent::SensorFault(e));
                if let Err(d) =
                    display::render_message(hw, self.state.panel_inverted(), SENSOR_FAULT_BANNER)
                {
                    error!("monitor: fault panel not shown ({d})");
                }
                return Err(e.into());
            }
        };

        let reading = classify(raw);
        debug!(
            "monitor: tick {} raw={} zone={:?} current={:.2}A",
            self.ticks, reading.raw, reading.zone, reading.current_a
        );
        if self.last_zone != Some(reading.zone) {
            sink.emit(&MonitorEvent::ZoneChanged {
                from: self.last_zone,
                to: reading.zone,
            });
            if reading.zone == Zone::Undefined {
                warn!("monitor: raw={} outside every range, holding outputs", raw);
                sink.emit(&MonitorEvent::UndefinedSample(raw));
            }
            self.last_zone = Some(reading.zone);
        }
        sink.emit(&MonitorEvent::Sampled(reading));

        let zone = reading.zone;
        let (Some(colour), Some(banner), Some(buzz)) = (zone.colour(), zone.banner(), zone.buzzer())
        else {
            return Ok(reading);
        };

        let (r, g, b) = levels_for(colour);
        self.actuate(sink, hw.set_indicator(r, g, b));
        self.actuate(sink, hw.show_matrix(&zone_pattern(colour)));

        let switched = if buzz { hw.buzzer_on() } else { hw.buzzer_off() };
        match switched {
            Ok(true) => sink.emit(&MonitorEvent::BuzzerSwitched(buzz)),
            Ok(false) => {}
            Err(e) => self.actuate(sink, Err(e)),
        }
        self.state.set_buzzer_on(hw.is_buzzer_on());

        if zone == Zone::Safe {
            self.pause(self.config.safe_settle_ms, hw, clock, sink)?;
            if self.reboot_requested {
                return Ok(reading);
            }
        }

        display::render_reading(hw, self.state.panel_inverted(), banner, reading.current_a)?;
        Ok(reading)
    }

    // ── Helpers ───────────────────────────────────────────────

    /// Sleep `ms` in `idle_poll_ms` slices, servicing input between them.
    /// Returns early once a reboot has been requested.
    fn pause(
        &mut self,
        ms: u32,
        hw: &mut impl Board,
        clock: &mut impl ClockPort,
        sink: &mut impl EventSink,
    ) -> Result<()> {
        let mut left = ms;
        while left > 0 && !self.reboot_requested {
            let slice = left.min(self.config.idle_poll_ms);
            clock.sleep_ms(slice);
            left -= slice;
            self.service_input(hw, sink)?;
        }
        Ok(())
    }

    fn actuate(&self, sink: &mut impl EventSink, result: core::result::Result<(), ActuatorError>) {
        if let Err(e) = result {
            warn!("monitor: actuator write failed ({e})");
            sink.emit(&MonitorEvent::ActuatorFault(e));
        }
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }

    pub fn last_zone(&self) -> Option<Zone> {
        self.last_zone
    }

    pub fn reboot_requested(&self) -> bool {
        self.reboot_requested
    }

    pub fn ticks(&self) -> u32 {
        self.ticks
    }
}
