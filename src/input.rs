//! Button input path: ISR edge capture and the debounced controller.
//!
//! ## Hardware
//!
//! Two active-low momentary switches with pull-ups.  Each GPIO fires on
//! the falling edge; the ISR stamps the edge with the current uptime and
//! pushes it onto a lock-free queue.  Nothing else happens in interrupt
//! context.
//!
//! ## Main-loop side
//!
//! [`InputController`] drains the queue and applies one debounce window
//! shared by both buttons: an edge arriving less than `debounce_ms` after
//! the last *accepted* edge, on either button, is dropped.
//!
//! | Button | Accepted edge does                                  |
//! |--------|-----------------------------------------------------|
//! | A      | latch `active`, flip panel polarity, show banner    |
//! | B      | reboot into ROM download mode                       |

use heapless::mpmc::Q8;
use log::debug;

use crate::state::SystemState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    A,
    B,
}

/// A falling edge as seen by the ISR.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonEdge {
    pub button: Button,
    /// Uptime in milliseconds when the edge fired (wraps at `u32::MAX`).
    pub at_ms: u32,
}

/// ISR → main loop handoff.  Multi-producer so both pin ISRs can share it.
pub type EdgeQueue = Q8<ButtonEdge>;

/// The queue the GPIO ISRs feed on target.
pub static EDGE_QUEUE: EdgeQueue = EdgeQueue::new();

/// ISR handler: register on both button GPIOs.
/// Lock-free; returns `false` if the queue was full and the edge dropped.
pub fn button_isr_handler(button: Button, now_ms: u32) -> bool {
    EDGE_QUEUE.enqueue(ButtonEdge { button, at_ms: now_ms }).is_ok()
}

/// What an accepted edge asks the main loop to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    /// Monitoring is active; `inverted` is the new panel polarity and
    /// `first` marks the press that started sampling.
    Activate { inverted: bool, first: bool },
    /// Reboot into download mode.  Terminal.
    Reboot,
}

pub struct InputController {
    debounce_ms: u32,
    last_accepted_ms: Option<u32>,
}

impl InputController {
    pub fn new(debounce_ms: u32) -> Self {
        Self {
            debounce_ms,
            last_accepted_ms: None,
        }
    }

    /// Debounce one edge and apply its state change.
    ///
    /// Button A mutates `state` here; the caller performs any I/O the
    /// returned action implies.
    pub fn on_edge(&mut self, edge: ButtonEdge, state: &SystemState) -> Option<InputAction> {
        let bouncing = self
            .last_accepted_ms
            .is_some_and(|last| edge.at_ms.wrapping_sub(last) < self.debounce_ms);
        if bouncing {
            debug!("input: {:?} edge at {}ms debounced", edge.button, edge.at_ms);
            return None;
        }
        self.last_accepted_ms = Some(edge.at_ms);

        match edge.button {
            Button::A => {
                let first = state.activate();
                let inverted = state.toggle_panel();
                Some(InputAction::Activate { inverted, first })
            }
            Button::B => Some(InputAction::Reboot),
        }
    }

    /// Pop the next queued edge and run it through [`on_edge`].
    /// Returns `None` once the queue is empty; dropped edges yield
    /// `Some(None)`.
    ///
    /// [`on_edge`]: Self::on_edge
    pub fn poll(
        &mut self,
        queue: &EdgeQueue,
        state: &SystemState,
    ) -> Option<Option<InputAction>> {
        let edge = queue.dequeue()?;
        Some(self.on_edge(edge, state))
    }

    /// Timestamp of the last accepted edge.
    pub fn last_accepted_ms(&self) -> Option<u32> {
        self.last_accepted_ms
    }
}
