//! Actuator and panel drivers, hardware initialisation, and supervision.

pub mod buzzer;
pub mod hw_init;
pub mod indicator;
pub mod matrix;
pub mod oled;
pub mod reset;
pub mod watchdog;
