//! HardwareAdapter with the host driver stubs: the real drivers behind
//! the ports, only the SSD1306 bus and the ADC are faked.

use zonewatch::adapters::hardware::HardwareAdapter;
use zonewatch::app::events::MonitorEvent;
use zonewatch::app::service::MonitorService;
use zonewatch::config::MonitorConfig;
use zonewatch::drivers::buzzer::Buzzer;
use zonewatch::drivers::indicator::{IndicatorLed, INDICATOR_LEVEL};
use zonewatch::drivers::matrix::{zone_pattern, MatrixDriver, BLANK};
use zonewatch::drivers::oled::OledDisplay;
use zonewatch::drivers::reset::DownloadModeReset;
use zonewatch::input::{Button, EdgeQueue};
use zonewatch::pins;
use zonewatch::sensors::current::{sim_set_current_adc, CurrentSensor};
use zonewatch::state::SystemState;
use zonewatch::zone::Zone;

use super::mock_hw::{timeline, EventLog, FakeBus, MockClock};

// The sim ADC is process-wide; this is the only test in the binary that
// touches it.
#[test]
fn critical_reading_reaches_every_driver() {
    let state = SystemState::new();
    let queue = EdgeQueue::new();
    let tl = timeline();
    let mut clock = MockClock::new(tl, &queue);
    let mut sink = EventLog::new();
    let config = MonitorConfig::default();

    let bus = FakeBus::default();
    let mut oled = OledDisplay::new(bus.clone());
    oled.init().unwrap();
    let mut hw = HardwareAdapter::new(
        CurrentSensor::new(pins::CURRENT_ADC_CHANNEL),
        IndicatorLed::new(),
        MatrixDriver::new(config.pixel_settle_us),
        Buzzer::new(),
        oled,
        DownloadModeReset::new(),
    );
    let mut svc = MonitorService::new(config, &state, &queue);

    svc.boot(&mut hw, &mut clock, &mut sink).unwrap();
    assert_eq!(hw.matrix().last_frame(), &BLANK);
    let after_boot = *bus.data_writes.borrow();
    assert!(after_boot > 0, "splash flushed to the panel");

    sim_set_current_adc(17);
    let reading = svc.tick(&mut hw, &mut clock, &mut sink);
    assert_eq!(reading.map(|r| r.zone), Ok(Zone::Critical));

    assert_eq!(hw.indicator().current_levels(), (INDICATOR_LEVEL, 0, 0));
    assert_eq!(hw.matrix().last_frame(), &zone_pattern((255, 0, 0)));
    assert_eq!(hw.matrix().pixels_sent(), 50);
    assert!(state.buzzer_on());
    assert!(*bus.data_writes.borrow() > after_boot);
    assert!(sink.events.contains(&MonitorEvent::BuzzerSwitched(true)));

    // Button B through the sim reset driver.
    clock.now = 500;
    clock.press_now(Button::B);
    svc.service_input(&mut hw, &mut sink).unwrap();
    assert!(svc.reboot_requested());
}
