//! Status panel layout.
//!
//! Every frame is built the same way: clear to the background colour,
//! draw a two-pixel border, draw the text lines, commit once.  Polarity
//! comes from `SystemState::panel_inverted`: upright draws lit pixels on a
//! dark background, inverted swaps them.

use core::fmt::Write;

use heapless::String;
use log::warn;

use crate::app::ports::DisplayPort;
use crate::error::DisplayError;
use crate::zone::Banner;

const BORDER_X: u8 = 3;
const BORDER_Y: u8 = 3;
const BORDER_WIDTH: u8 = 122;
const BORDER_HEIGHT: u8 = 58;
const BORDER_THICKNESS: u8 = 2;

/// Position of the current-reading line under the zone banner.
const CURRENT_LINE_X: u8 = 5;
const CURRENT_LINE_Y: u8 = 40;

/// One line of text at a fixed position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelLine<'a> {
    pub text: &'a str,
    pub x: u8,
    pub y: u8,
}

impl<'a> PanelLine<'a> {
    pub const fn new(text: &'a str, x: u8, y: u8) -> Self {
        Self { text, x, y }
    }
}

pub const SPLASH: [PanelLine<'static>; 2] = [
    PanelLine::new("SISTEMA", 25, 20),
    PanelLine::new("ENERGIZADO", 20, 30),
];
pub const ACTIVE_BANNER: PanelLine<'static> = PanelLine::new("SISTEMA ATIVO", 15, 30);
pub const SENSOR_FAULT_BANNER: PanelLine<'static> = PanelLine::new("FALHA SENSOR", 15, 30);

/// Draw a full frame and commit it.
pub fn render(
    display: &mut impl DisplayPort,
    inverted: bool,
    lines: &[PanelLine<'_>],
) -> Result<(), DisplayError> {
    let fg = !inverted;
    display.fill(!fg);
    for t in 0..BORDER_THICKNESS {
        display.draw_rect(
            BORDER_X + t,
            BORDER_Y + t,
            BORDER_WIDTH - 2 * t,
            BORDER_HEIGHT - 2 * t,
            fg,
        );
    }
    for line in lines {
        display.draw_string(line.text, line.x, line.y, fg);
    }
    commit_with_retry(display)
}

/// Single-message frame (splash, activation, fault).
pub fn render_message(
    display: &mut impl DisplayPort,
    inverted: bool,
    line: PanelLine<'_>,
) -> Result<(), DisplayError> {
    render(display, inverted, &[line])
}

/// Zone banner plus `CORRENTE EM {N}A`, both in the same frame.
pub fn render_reading(
    display: &mut impl DisplayPort,
    inverted: bool,
    banner: Banner,
    current_a: f32,
) -> Result<(), DisplayError> {
    let text = current_line(current_a);
    render(
        display,
        inverted,
        &[
            PanelLine::new(banner.text, banner.x, banner.y),
            PanelLine::new(&text, CURRENT_LINE_X, CURRENT_LINE_Y),
        ],
    )
}

/// `CORRENTE EM {N}A` with N rounded to the nearest integer.
pub fn current_line(current_a: f32) -> String<24> {
    let mut s = String::new();
    // 24 bytes fits any f32 rounded to an integer plus the fixed text.
    let _ = write!(s, "CORRENTE EM {:.0}A", current_a);
    s
}

/// One retry, then the failure is the caller's problem.
fn commit_with_retry(display: &mut impl DisplayPort) -> Result<(), DisplayError> {
    match display.commit() {
        Ok(()) => Ok(()),
        Err(e) => {
            warn!("display: commit failed ({e}), retrying once");
            display.commit()
        }
    }
}
