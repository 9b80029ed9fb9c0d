//! Adapters: concrete implementations of the port traits.
//!
//! | Adapter    | Implements                          | Connects to                 |
//! |------------|-------------------------------------|-----------------------------|
//! | `hardware` | SensorPort, ActuatorPort,           | ADC1, LEDC, RMT, SSD1306,   |
//! |            | DisplayPort, ResetPort              | RTC download-boot flag      |
//! | `log_sink` | EventSink                           | Serial log output           |
//! | `time`     | ClockPort                           | ESP32 system timer, FreeRTOS|

pub mod hardware;
pub mod log_sink;
pub mod time;
