//! Application core: monitor logic with all I/O behind ports.
//!
//! The zone rules, debounced input handling and panel sequencing live
//! here.  Hardware, time and event output reach this layer only through
//! the **port traits** in [`ports`], so it runs on the host against mocks.

pub mod events;
pub mod ports;
pub mod service;
