//! SSD1306 128×64 status panel.
//!
//! Wraps the `ssd1306` buffered-graphics driver and exposes it through
//! [`DisplayPort`].  All drawing lands in the frame buffer; `commit`
//! flushes it over the bus.  Generic over the bus interface so the same
//! code runs on I2C in firmware and on a fake interface in tests.

use display_interface::{DisplayError as BusError, WriteOnlyDataCommand};
use embedded_graphics::{
    mono_font::{ascii::FONT_6X10, MonoTextStyle},
    pixelcolor::BinaryColor,
    prelude::*,
    primitives::{PrimitiveStyle, Rectangle},
    text::{Baseline, Text},
};
use log::warn;
use ssd1306::{mode::BufferedGraphicsMode, prelude::*, I2CDisplayInterface, Ssd1306};

use crate::app::ports::DisplayPort;
use crate::error::DisplayError;

type Panel<DI> = Ssd1306<DI, DisplaySize128x64, BufferedGraphicsMode<DisplaySize128x64>>;

pub struct OledDisplay<DI> {
    panel: Panel<DI>,
    commits: u32,
}

const fn colour(lit: bool) -> BinaryColor {
    if lit { BinaryColor::On } else { BinaryColor::Off }
}

impl<DI: WriteOnlyDataCommand> OledDisplay<DI> {
    pub fn new(interface: DI) -> Self {
        let panel = Ssd1306::new(interface, DisplaySize128x64, DisplayRotation::Rotate0)
            .into_buffered_graphics_mode();
        Self { panel, commits: 0 }
    }

    /// Send the controller init sequence.  Must succeed before any commit.
    pub fn init(&mut self) -> Result<(), DisplayError> {
        self.panel.init().map_err(|e| {
            warn!("oled: init failed ({e:?})");
            DisplayError::InitFailed
        })
    }

    /// Successful flushes since construction.
    pub fn commits(&self) -> u32 {
        self.commits
    }
}

impl<I2C: embedded_hal::i2c::I2c> OledDisplay<I2CInterface<I2C>> {
    /// Panel on an I²C bus at `address` (0x3C on this board).
    pub fn over_i2c(i2c: I2C, address: u8) -> Self {
        Self::new(I2CDisplayInterface::new_custom_address(i2c, address))
    }
}

impl<DI: WriteOnlyDataCommand> DisplayPort for OledDisplay<DI> {
    fn fill(&mut self, lit: bool) {
        // Buffer writes cannot fail.
        let _ = DrawTarget::clear(&mut self.panel, colour(lit));
    }

    fn draw_rect(&mut self, x: u8, y: u8, width: u8, height: u8, lit: bool) {
        let _ = Rectangle::new(
            Point::new(i32::from(x), i32::from(y)),
            Size::new(u32::from(width), u32::from(height)),
        )
        .into_styled(PrimitiveStyle::with_stroke(colour(lit), 1))
        .draw(&mut self.panel);
    }

    fn draw_string(&mut self, text: &str, x: u8, y: u8, lit: bool) {
        let style = MonoTextStyle::new(&FONT_6X10, colour(lit));
        let _ = Text::with_baseline(
            text,
            Point::new(i32::from(x), i32::from(y)),
            style,
            Baseline::Top,
        )
        .draw(&mut self.panel);
    }

    fn commit(&mut self) -> Result<(), DisplayError> {
        self.panel.flush().map_err(|e: BusError| {
            warn!("oled: flush failed ({e:?})");
            DisplayError::CommitFailed
        })?;
        self.commits += 1;
        Ok(())
    }
}
