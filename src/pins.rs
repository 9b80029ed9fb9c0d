//! GPIO / peripheral pin assignments for the ZoneWatch board.
//!
//! Single source of truth: every driver references this module rather than
//! hard-coding pin numbers.

// ---------------------------------------------------------------------------
// Push-buttons (active-low, internal pull-up, falling-edge IRQ)
// ---------------------------------------------------------------------------

/// Button A: activates monitoring and toggles panel polarity.
pub const BUTTON_A_GPIO: i32 = 5;
/// Button B: reboots into the ROM download mode.
pub const BUTTON_B_GPIO: i32 = 6;

// ---------------------------------------------------------------------------
// Current sensor (joystick X axis)
// ---------------------------------------------------------------------------

/// Joystick X axis wiper.  GPIO 2 on ESP32-S3 = ADC1 channel 1.
pub const CURRENT_ADC_GPIO: i32 = 2;
pub const CURRENT_ADC_CHANNEL: u32 = 1;

// ---------------------------------------------------------------------------
// RGB indicator (common cathode)
// ---------------------------------------------------------------------------

pub const LED_R_GPIO: i32 = 13;
pub const LED_G_GPIO: i32 = 11;
pub const LED_B_GPIO: i32 = 12;

// ---------------------------------------------------------------------------
// Buzzer (passive, driven by a PWM carrier)
// ---------------------------------------------------------------------------

pub const BUZZER_GPIO: i32 = 21;

// ---------------------------------------------------------------------------
// 5×5 WS2812 matrix
// ---------------------------------------------------------------------------

pub const MATRIX_DATA_GPIO: i32 = 7;

// ---------------------------------------------------------------------------
// I²C bus: SSD1306 128×64 OLED
// ---------------------------------------------------------------------------

pub const I2C_SDA_GPIO: i32 = 14;
pub const I2C_SCL_GPIO: i32 = 15;
pub const I2C_FREQ_HZ: u32 = 400_000;
pub const OLED_I2C_ADDR: u8 = 0x3C;

// ---------------------------------------------------------------------------
// PWM configuration
// ---------------------------------------------------------------------------

/// RGB channels: 12-bit resolution so duty levels match the 0–4095 scale.
pub const LED_PWM_RESOLUTION_BITS: u32 = 12;
pub const LED_PWM_FREQ_HZ: u32 = 1_000;
/// Buzzer carrier.
pub const BUZZER_PWM_FREQ_HZ: u32 = 1_000;
pub const BUZZER_PWM_RESOLUTION_BITS: u32 = 10;
