//! Mock board, clock and event sink for integration tests.
//!
//! The board and the clock append to one shared timeline so tests can
//! assert on ordering across ports (e.g. the Safe-zone pause sits between
//! the matrix write and the panel redraw).  The clock is virtual: sleeps
//! advance it instantly and release any button edges scripted for that
//! moment into the edge queue, the way the GPIO ISR would.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use display_interface::{DataFormat, DisplayError as BusError, WriteOnlyDataCommand};

use zonewatch::app::events::MonitorEvent;
use zonewatch::app::ports::{
    ActuatorPort, ClockPort, DisplayPort, EventSink, ResetPort, SensorPort,
};
use zonewatch::drivers::matrix::MatrixPattern;
use zonewatch::error::{ActuatorError, DisplayError, SensorError};
use zonewatch::input::{Button, ButtonEdge, EdgeQueue};
use zonewatch::zone::RawSample;

// ── Timeline ──────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    ReadSample,
    SetIndicator(u16, u16, u16),
    ShowMatrix(MatrixPattern),
    BuzzerOn,
    BuzzerOff,
    Fill(bool),
    Rect(u8, u8, u8, u8, bool),
    Text(String, u8, u8, bool),
    Commit,
    Reboot,
    Sleep(u32),
}

pub type Timeline = Rc<RefCell<Vec<Call>>>;

pub fn timeline() -> Timeline {
    Rc::new(RefCell::new(Vec::new()))
}

/// Index of the first call matching `pred` at or after `from`.
pub fn position(calls: &[Call], from: usize, pred: impl Fn(&Call) -> bool) -> Option<usize> {
    calls[from..].iter().position(pred).map(|i| i + from)
}

pub fn texts(calls: &[Call]) -> Vec<(String, u8, u8, bool)> {
    calls
        .iter()
        .filter_map(|c| match c {
            Call::Text(t, x, y, lit) => Some((t.clone(), *x, *y, *lit)),
            _ => None,
        })
        .collect()
}

// ── MockBoard ─────────────────────────────────────────────────

pub struct MockBoard {
    pub timeline: Timeline,
    samples: VecDeque<Result<RawSample, SensorError>>,
    /// Returned once `samples` runs dry.
    pub idle_sample: RawSample,
    buzzer: bool,
    pub buzzer_transitions: u32,
    pub commit_failures: u32,
    pub fail_indicator: bool,
    pub reboots: u32,
}

#[allow(dead_code)]
impl MockBoard {
    pub fn new(timeline: Timeline) -> Self {
        Self {
            timeline,
            samples: VecDeque::new(),
            idle_sample: 2000,
            buzzer: false,
            buzzer_transitions: 0,
            commit_failures: 0,
            fail_indicator: false,
            reboots: 0,
        }
    }

    pub fn push_sample(&mut self, raw: RawSample) {
        self.samples.push_back(Ok(raw));
    }

    pub fn push_sensor_fault(&mut self) {
        self.samples.push_back(Err(SensorError::AdcReadFailed));
    }

    fn record(&self, call: Call) {
        self.timeline.borrow_mut().push(call);
    }
}

impl SensorPort for MockBoard {
    fn read_sample(&mut self) -> Result<RawSample, SensorError> {
        self.record(Call::ReadSample);
        self.samples.pop_front().unwrap_or(Ok(self.idle_sample))
    }
}

impl ActuatorPort for MockBoard {
    fn set_indicator(&mut self, r: u16, g: u16, b: u16) -> Result<(), ActuatorError> {
        self.record(Call::SetIndicator(r, g, b));
        if self.fail_indicator {
            return Err(ActuatorError::PwmWriteFailed);
        }
        Ok(())
    }

    fn show_matrix(&mut self, pattern: &MatrixPattern) -> Result<(), ActuatorError> {
        self.record(Call::ShowMatrix(*pattern));
        Ok(())
    }

    fn buzzer_on(&mut self) -> Result<bool, ActuatorError> {
        self.record(Call::BuzzerOn);
        if self.buzzer {
            return Ok(false);
        }
        self.buzzer = true;
        self.buzzer_transitions += 1;
        Ok(true)
    }

    fn buzzer_off(&mut self) -> Result<bool, ActuatorError> {
        self.record(Call::BuzzerOff);
        if !self.buzzer {
            return Ok(false);
        }
        self.buzzer = false;
        self.buzzer_transitions += 1;
        Ok(true)
    }

    fn is_buzzer_on(&self) -> bool {
        self.buzzer
    }
}

impl DisplayPort for MockBoard {
    fn fill(&mut self, lit: bool) {
        self.record(Call::Fill(lit));
    }

    fn draw_rect(&mut self, x: u8, y: u8, width: u8, height: u8, lit: bool) {
        self.record(Call::Rect(x, y, width, height, lit));
    }

    fn draw_string(&mut self, text: &str, x: u8, y: u8, lit: bool) {
        self.record(Call::Text(text.to_owned(), x, y, lit));
    }

    fn commit(&mut self) -> Result<(), DisplayError> {
        self.record(Call::Commit);
        if self.commit_failures > 0 {
            self.commit_failures -= 1;
            return Err(DisplayError::CommitFailed);
        }
        Ok(())
    }
}

impl ResetPort for MockBoard {
    fn reboot_to_bootloader(&mut self) {
        self.record(Call::Reboot);
        self.reboots += 1;
    }
}

// ── MockClock ─────────────────────────────────────────────────

pub struct MockClock<'a> {
    pub now: u32,
    timeline: Timeline,
    queue: &'a EdgeQueue,
    script: VecDeque<ButtonEdge>,
}

#[allow(dead_code)]
impl<'a> MockClock<'a> {
    pub fn new(timeline: Timeline, queue: &'a EdgeQueue) -> Self {
        Self {
            now: 0,
            timeline,
            queue,
            script: VecDeque::new(),
        }
    }

    /// Fire `button` once the virtual clock reaches `at_ms`.  Script in
    /// ascending time order.
    pub fn press_at(&mut self, button: Button, at_ms: u32) {
        self.script.push_back(ButtonEdge { button, at_ms });
    }

    /// Fire `button` right now, as if the ISR had just run.
    pub fn press_now(&self, button: Button) {
        let _ = self.queue.enqueue(ButtonEdge {
            button,
            at_ms: self.now,
        });
    }

    fn release_due(&mut self) {
        while self.script.front().is_some_and(|e| e.at_ms <= self.now) {
            if let Some(edge) = self.script.pop_front() {
                let _ = self.queue.enqueue(edge);
            }
        }
    }
}

impl ClockPort for MockClock<'_> {
    fn now_ms(&self) -> u32 {
        self.now
    }

    fn sleep_ms(&mut self, ms: u32) {
        self.timeline.borrow_mut().push(Call::Sleep(ms));
        self.now = self.now.wrapping_add(ms);
        self.release_due();
    }
}

// ── EventLog ──────────────────────────────────────────────────

#[derive(Default)]
pub struct EventLog {
    pub events: Vec<MonitorEvent>,
}

#[allow(dead_code)]
impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, pred: impl Fn(&MonitorEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }
}

impl EventSink for EventLog {
    fn emit(&mut self, event: &MonitorEvent) {
        self.events.push(event.clone());
    }
}

// ── Fake SSD1306 bus ──────────────────────────────────────────

/// Accepts everything and counts data transfers.
#[derive(Clone, Default)]
pub struct FakeBus {
    pub data_writes: Rc<RefCell<u32>>,
}

impl WriteOnlyDataCommand for FakeBus {
    fn send_commands(&mut self, _cmds: DataFormat<'_>) -> Result<(), BusError> {
        Ok(())
    }

    fn send_data(&mut self, _buf: DataFormat<'_>) -> Result<(), BusError> {
        *self.data_writes.borrow_mut() += 1;
        Ok(())
    }
}
