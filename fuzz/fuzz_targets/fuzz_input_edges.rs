//! Fuzz target: ISR queue + debounced input controller
//!
//! Interprets the input as a stream of (button, gap) edges pushed through
//! a fresh edge queue the way the GPIO ISR does, then drained by
//! `InputController::poll`.  Verifies:
//! - No panics, including across the u32 millisecond wrap
//! - Accepted edges are never closer than the debounce window
//! - The queue never yields more edges than were enqueued
//!
//! cargo fuzz run fuzz_input_edges

#![no_main]

use libfuzzer_sys::fuzz_target;
use zonewatch::input::{Button, ButtonEdge, EdgeQueue, InputController};
use zonewatch::state::SystemState;

const WINDOW_MS: u32 = 200;

fuzz_target!(|data: &[u8]| {
    let queue = EdgeQueue::new();
    let state = SystemState::new();
    let mut ctl = InputController::new(WINDOW_MS);
    let mut now = u32::MAX - 1_000;
    let mut last_accepted: Option<u32> = None;

    for chunk in data.chunks(8) {
        let mut enqueued = 0usize;
        for &byte in chunk {
            now = now.wrapping_add(u32::from(byte & 0x7F) * 4);
            let button = if byte & 0x80 == 0 { Button::A } else { Button::B };
            if queue.enqueue(ButtonEdge { button, at_ms: now }).is_ok() {
                enqueued += 1;
            }
        }

        let mut drained = 0usize;
        while let Some(outcome) = ctl.poll(&queue, &state) {
            drained += 1;
            if outcome.is_some() {
                let at = ctl.last_accepted_ms().unwrap();
                if let Some(prev) = last_accepted {
                    assert!(at.wrapping_sub(prev) >= WINDOW_MS);
                }
                last_accepted = Some(at);
            }
        }
        assert_eq!(drained, enqueued);
    }
});
