//! 5×5 WS2812 matrix driver.
//!
//! Each zone update rewrites the whole grid: the 3×3 centre block takes
//! the zone colour dimmed to 5%, the outer ring is dark.  Frames are
//! streamed one pixel at a time (24-bit GRB, MSB first) over RMT with a
//! fixed settling delay after every pixel.
//!
//! ```text
//!   0  1  2  3  4
//!   5 [6  7  8] 9
//!  10 [11 12 13] 14
//!  15 [16 17 18] 19
//!  20 21 22 23 24
//! ```
//!
//! ## Dual-target design
//!
//! On ESP-IDF: owns a `TxRmtDriver` and busy-waits the settle delay.
//! On host/test: records the last frame and counts streamed pixels.

use crate::error::ActuatorError;
use crate::zone::Rgb;

#[cfg(target_os = "espidf")]
use esp_idf_svc::hal::{
    delay::Ets,
    rmt::{FixedLengthSignal, PinState, Pulse, TxRmtDriver},
    sys::EspError,
};

pub const MATRIX_CELLS: usize = 25;

/// Centre 3×3 block of the 5×5 grid.
pub const INTERIOR_CELLS: [usize; 9] = [6, 7, 8, 11, 12, 13, 16, 17, 18];

/// Brightness kept after dimming, in percent.
pub const DIM_PERCENT: u16 = 5;

pub type MatrixPattern = [Rgb; MATRIX_CELLS];

pub const BLANK: MatrixPattern = [(0, 0, 0); MATRIX_CELLS];

/// Scale each channel to `DIM_PERCENT`, truncating.  255 → 12.
pub const fn dim(colour: Rgb) -> Rgb {
    (
        (colour.0 as u16 * DIM_PERCENT / 100) as u8,
        (colour.1 as u16 * DIM_PERCENT / 100) as u8,
        (colour.2 as u16 * DIM_PERCENT / 100) as u8,
    )
}

/// Full frame for a zone colour: dimmed centre block, everything else off.
pub fn zone_pattern(colour: Rgb) -> MatrixPattern {
    let mut frame = BLANK;
    let cell = dim(colour);
    for &i in &INTERIOR_CELLS {
        frame[i] = cell;
    }
    frame
}

/// Wire order for WS2812: green, red, blue.
pub const fn grb_word(colour: Rgb) -> u32 {
    ((colour.1 as u32) << 16) | ((colour.0 as u32) << 8) | colour.2 as u32
}

// WS2812 bit timings.
#[cfg(target_os = "espidf")]
const T0H_NS: u64 = 350;
#[cfg(target_os = "espidf")]
const T0L_NS: u64 = 800;
#[cfg(target_os = "espidf")]
const T1H_NS: u64 = 700;
#[cfg(target_os = "espidf")]
const T1L_NS: u64 = 600;

pub struct MatrixDriver {
    #[cfg(target_os = "espidf")]
    tx: TxRmtDriver<'static>,
    /// (high, low) pulse pairs for a 0 bit and a 1 bit.
    #[cfg(target_os = "espidf")]
    bits: [(Pulse, Pulse); 2],
    pixel_settle_us: u32,
    last_frame: MatrixPattern,
    frames_sent: u32,
    pixels_sent: u32,
}

impl MatrixDriver {
    #[cfg(target_os = "espidf")]
    pub fn new(tx: TxRmtDriver<'static>, pixel_settle_us: u32) -> Result<Self, EspError> {
        use core::time::Duration;

        let ticks_hz = tx.counter_clock()?;
        let pulse = |state, ns| Pulse::new_with_duration(ticks_hz, state, &Duration::from_nanos(ns));
        let zero = (pulse(PinState::High, T0H_NS)?, pulse(PinState::Low, T0L_NS)?);
        let one = (pulse(PinState::High, T1H_NS)?, pulse(PinState::Low, T1L_NS)?);

        Ok(Self {
            tx,
            bits: [zero, one],
            pixel_settle_us,
            last_frame: BLANK,
            frames_sent: 0,
            pixels_sent: 0,
        })
    }

    #[cfg(not(target_os = "espidf"))]
    pub fn new(pixel_settle_us: u32) -> Self {
        Self {
            pixel_settle_us,
            last_frame: BLANK,
            frames_sent: 0,
            pixels_sent: 0,
        }
    }

    /// Stream all 25 cells in index order.  Sent on every call, even when
    /// the frame is unchanged.
    pub fn show(&mut self, frame: &MatrixPattern) -> Result<(), ActuatorError> {
        for &cell in frame {
            self.send_pixel(grb_word(cell))?;
            self.pixels_sent += 1;
            self.settle();
        }
        self.last_frame = *frame;
        self.frames_sent += 1;
        Ok(())
    }

    pub fn clear(&mut self) -> Result<(), ActuatorError> {
        self.show(&BLANK)
    }

    pub fn last_frame(&self) -> &MatrixPattern {
        &self.last_frame
    }

    pub fn frames_sent(&self) -> u32 {
        self.frames_sent
    }

    pub fn pixels_sent(&self) -> u32 {
        self.pixels_sent
    }

    pub fn pixel_settle_us(&self) -> u32 {
        self.pixel_settle_us
    }

    #[cfg(target_os = "espidf")]
    fn send_pixel(&mut self, grb: u32) -> Result<(), ActuatorError> {
        let mut signal = FixedLengthSignal::<24>::new();
        for i in 0..24 {
            let bit = (grb >> (23 - i)) & 1;
            signal
                .set(i, &self.bits[bit as usize])
                .map_err(|_| ActuatorError::PixelStreamFailed)?;
        }
        self.tx
            .start_blocking(&signal)
            .map_err(|_| ActuatorError::PixelStreamFailed)
    }

    #[cfg(not(target_os = "espidf"))]
    fn send_pixel(&mut self, _grb: u32) -> Result<(), ActuatorError> {
        Ok(())
    }

    #[cfg(target_os = "espidf")]
    fn settle(&self) {
        Ets::delay_us(self.pixel_settle_us);
    }

    #[cfg(not(target_os = "espidf"))]
    fn settle(&self) {}
}
