//! Sensor drivers.
//!
//! Only the load-current channel exists on this board; the module stays
//! a directory so further inputs slot in beside it.

pub mod current;

pub use current::CurrentSensor;
