//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing monitor events to the ESP-IDF
//! logger (UART / USB-CDC in production) as `TAG | key=value` lines.

use log::{error, info, warn};

use crate::app::events::MonitorEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`MonitorEvent`] to the serial console.
#[derive(Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &MonitorEvent) {
        match event {
            MonitorEvent::Booted => info!("BOOT  | splash shown, actuators parked"),
            MonitorEvent::Activated { inverted, first } => {
                info!("INPUT | button=A inverted={} first={}", inverted, first);
            }
            MonitorEvent::RebootRequested => warn!("INPUT | button=B reboot=download"),
            MonitorEvent::Sampled(r) => {
                info!(
                    "SAMPLE| raw={} zone={:?} current={:.2}A",
                    r.raw, r.zone, r.current_a
                );
            }
            MonitorEvent::ZoneChanged { from, to } => match from {
                Some(from) => info!("ZONE  | {:?} -> {:?}", from, to),
                None => info!("ZONE  | first={:?}", to),
            },
            MonitorEvent::UndefinedSample(raw) => {
                warn!("ZONE  | raw={} outside every range, outputs frozen", raw);
            }
            MonitorEvent::BuzzerSwitched(on) => {
                info!("BUZZER| {}", if *on { "on" } else { "off" });
            }
            MonitorEvent::ActuatorFault(e) => warn!("FAULT | actuator: {}", e),
            MonitorEvent::SensorFault(e) => error!("FAULT | sensor: {} (halting)", e),
        }
    }
}
