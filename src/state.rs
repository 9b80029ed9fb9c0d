//! Process-wide monitor flags shared between the input path and the loop.
//!
//! Plain atomics: the struct lives in a `static` (or on the stack in tests)
//! and is handed out by shared reference.  Acquire/Release ordering keeps
//! it correct on the dual-core ESP32-S3 as well.

use core::sync::atomic::{AtomicBool, Ordering};

pub struct SystemState {
    /// Gates the sampling loop.  Set once by Button A, never cleared.
    active: AtomicBool,
    /// Panel polarity.  `false` = lit border on a dark background.
    panel_inverted: AtomicBool,
    /// Mirror of the buzzer driver's state for observers.
    buzzer_on: AtomicBool,
}

impl Default for SystemState {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemState {
    pub const fn new() -> Self {
        Self {
            active: AtomicBool::new(false),
            panel_inverted: AtomicBool::new(false),
            buzzer_on: AtomicBool::new(false),
        }
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    /// Latch the active flag.  Returns `true` if this call flipped it.
    pub fn activate(&self) -> bool {
        !self.active.swap(true, Ordering::AcqRel)
    }

    pub fn panel_inverted(&self) -> bool {
        self.panel_inverted.load(Ordering::Acquire)
    }

    /// Flip panel polarity and return the new value.
    pub fn toggle_panel(&self) -> bool {
        !self.panel_inverted.fetch_xor(true, Ordering::AcqRel)
    }

    pub fn buzzer_on(&self) -> bool {
        self.buzzer_on.load(Ordering::Acquire)
    }

    pub fn set_buzzer_on(&self, on: bool) {
        self.buzzer_on.store(on, Ordering::Release);
    }
}
