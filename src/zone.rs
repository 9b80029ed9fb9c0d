//! Zone classifier: maps a raw 12-bit sample to a safety zone.
//!
//! Pure and hardware-free.  The range table covers the joystick travel:
//! the centre band is Safe, each side fans out into Alert and then
//! Critical.
//!
//! ```text
//!  0    17        638       1259            2619      3360      4095
//!  |----|---------|---------|---------------|---------|---------|
//!   Und   Critical   Alert        Safe         Alert    Critical
//! ```

/// Unprocessed ADC conversion result, nominally 0–4095.
pub type RawSample = u16;

/// Colour as (R, G, B) tuple, each 0–255.
pub type Rgb = (u8, u8, u8);

/// Lowest sample that maps onto the current scale (0 A).
pub const SAMPLE_MIN: RawSample = 17;
/// Full-scale sample (20 A).
pub const SAMPLE_MAX: RawSample = 4095;
/// Current at `SAMPLE_MAX`, in amperes.
pub const MAX_CURRENT_A: f32 = 20.0;

const CRITICAL_LOW: (RawSample, RawSample) = (17, 637);
const ALERT_LOW: (RawSample, RawSample) = (638, 1258);
const SAFE: (RawSample, RawSample) = (1259, 2618);
const ALERT_HIGH: (RawSample, RawSample) = (2619, 3359);
const CRITICAL_HIGH: (RawSample, RawSample) = (3360, 4095);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Zone {
    Critical,
    Alert,
    Safe,
    /// Below the calibrated range (or above 12 bits).  No action mapped.
    Undefined,
}

/// Panel headline for a zone, with its draw position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Banner {
    pub text: &'static str,
    pub x: u8,
    pub y: u8,
}

impl Zone {
    /// Headline drawn on the status panel, `None` for Undefined.
    pub const fn banner(self) -> Option<Banner> {
        match self {
            Self::Critical => Some(Banner { text: "ZONA CRITICA", x: 20, y: 30 }),
            Self::Alert => Some(Banner { text: "ZONA DE ALERTA", x: 10, y: 30 }),
            Self::Safe => Some(Banner { text: "ZONA SEGURA", x: 20, y: 30 }),
            Self::Undefined => None,
        }
    }

    /// Full-scale zone colour shared by the indicator and the matrix.
    pub const fn colour(self) -> Option<Rgb> {
        match self {
            Self::Critical => Some((255, 0, 0)),
            Self::Alert => Some((255, 255, 0)),
            Self::Safe => Some((0, 255, 0)),
            Self::Undefined => None,
        }
    }

    /// Whether the buzzer should sound, `None` when the zone maps nothing.
    pub const fn buzzer(self) -> Option<bool> {
        match self {
            Self::Critical => Some(true),
            Self::Alert | Self::Safe => Some(false),
            Self::Undefined => None,
        }
    }
}

/// Result of classifying one sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reading {
    pub raw: RawSample,
    pub zone: Zone,
    /// Linear current estimate in amperes.  Negative below `SAMPLE_MIN`.
    pub current_a: f32,
}

/// Classify a sample into its zone and derived current.
pub fn classify(sample: RawSample) -> Reading {
    Reading {
        raw: sample,
        zone: zone_for(sample),
        current_a: derived_current(sample),
    }
}

/// Zone lookup over the inclusive range table.
pub fn zone_for(sample: RawSample) -> Zone {
    let within = |(lo, hi): (RawSample, RawSample)| (lo..=hi).contains(&sample);

    if within(CRITICAL_LOW) || within(CRITICAL_HIGH) {
        Zone::Critical
    } else if within(ALERT_LOW) || within(ALERT_HIGH) {
        Zone::Alert
    } else if within(SAFE) {
        Zone::Safe
    } else {
        Zone::Undefined
    }
}

/// `(sample − 17) / (4095 − 17) × 20 A`, signed and unclamped.
pub fn derived_current(sample: RawSample) -> f32 {
    let span = f32::from(SAMPLE_MAX - SAMPLE_MIN);
    (f32::from(sample) - f32::from(SAMPLE_MIN)) / span * MAX_CURRENT_A
}
