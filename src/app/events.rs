//! Outbound monitor events.
//!
//! The [`MonitorService`](super::service::MonitorService) emits these through
//! the [`EventSink`](super::ports::EventSink) port.  The log adapter turns
//! them into serial output; tests collect them.

use crate::error::{ActuatorError, SensorError};
use crate::zone::{RawSample, Reading, Zone};

/// Structured events emitted by the monitor core.
#[derive(Debug, Clone, PartialEq)]
pub enum MonitorEvent {
    /// Boot splash shown and actuators parked.
    Booted,

    /// Button A accepted.  `first` is true on the edge that started sampling.
    Activated { inverted: bool, first: bool },

    /// Button B accepted; reboot into download mode follows.
    RebootRequested,

    /// One classified sample (emitted every tick).
    Sampled(Reading),

    /// The zone differs from the previous tick.
    ZoneChanged { from: Option<Zone>, to: Zone },

    /// Sample outside every range; actuators and panel left as they were.
    UndefinedSample(RawSample),

    /// Buzzer hardware actually changed state.
    BuzzerSwitched(bool),

    /// Non-fatal actuator write failure.
    ActuatorFault(ActuatorError),

    /// Fatal sensor failure; the loop stops after this.
    SensorFault(SensorError),
}
