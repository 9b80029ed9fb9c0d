//! ZoneWatch firmware library.
//!
//! Exposes the monitor logic, drivers and adapters for integration
//! testing.  All ESP-IDF-specific code is guarded by
//! `#[cfg(target_os = "espidf")]` within each module, so the library
//! builds and tests on the host.

#![deny(unused_must_use)]

pub mod app;
pub mod config;
pub mod display;
pub mod error;
pub mod input;
pub mod pins;
pub mod state;
pub mod zone;

pub mod adapters;
pub mod drivers;
pub mod sensors;
