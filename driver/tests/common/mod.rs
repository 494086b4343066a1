//! Test doubles sharing one event log, so tests can check how bytes and waits interleave.

#![allow(dead_code)]

use i2clcd_driver::delay::Delay;
use i2clcd_driver::i2c::I2cTransport;
use i2clcd_driver::lcd::hd44780::SendingMode;
use i2clcd_driver::lcd::hd44780::driver::{PIN_ENABLE, PIN_RS};
use i2clcd_driver::{LcdError, LcdResult};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Event {
    Init(u32),
    Byte { address: u8, byte: u8 },
    Ms,
    Us,
}

pub type Log = Rc<RefCell<Vec<Event>>>;

#[derive(Debug)]
pub struct FakeBus {
    log: Log,
    address: u8,
    fail_after: Rc<Cell<Option<usize>>>,
    init_error: Option<LcdError>,
}

impl FakeBus {
    pub fn new(log: &Log) -> Self {
        FakeBus {
            log: log.clone(),
            address: 0,
            fail_after: Rc::default(),
            init_error: None,
        }
    }

    pub fn failing_init(log: &Log, error: LcdError) -> Self {
        FakeBus {
            init_error: Some(error),
            ..Self::new(log)
        }
    }

    /// Handle for injecting a write failure while the bus is borrowed.
    /// `Some(n)` lets `n` more writes succeed and fails the one after, once.
    pub fn failure_handle(&self) -> Rc<Cell<Option<usize>>> {
        self.fail_after.clone()
    }
}

impl I2cTransport for FakeBus {
    fn init(&mut self, clock_speed_hz: u32) -> LcdResult<()> {
        if let Some(err) = self.init_error.clone() {
            return Err(err);
        }
        self.log.borrow_mut().push(Event::Init(clock_speed_hz));
        Ok(())
    }

    fn set_slave_address(&mut self, address: u8) {
        self.address = address;
    }

    fn send_start(&mut self) -> LcdResult<()> {
        Ok(())
    }

    fn write(&mut self, byte: u8) -> LcdResult<()> {
        match self.fail_after.get() {
            Some(0) => {
                self.fail_after.set(None);
                return Err(LcdError::DataTransmitFailed);
            }
            Some(n) => self.fail_after.set(Some(n - 1)),
            None => {}
        }
        self.log.borrow_mut().push(Event::Byte {
            address: self.address,
            byte,
        });
        Ok(())
    }

    fn send_stop(&mut self) {}
}

#[derive(Debug)]
pub struct FakeDelay {
    log: Log,
}

impl FakeDelay {
    pub fn new(log: &Log) -> Self {
        FakeDelay { log: log.clone() }
    }
}

impl Delay for FakeDelay {
    fn wait_one_ms(&mut self) {
        self.log.borrow_mut().push(Event::Ms);
    }

    fn wait_one_us(&mut self) {
        self.log.borrow_mut().push(Event::Us);
    }
}

/// Log with consecutive waits merged.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Step {
    Init(u32),
    Byte(u8),
    Wait { ms: u32, us: u32 },
}

pub fn steps(log: &Log) -> Vec<Step> {
    let mut steps = Vec::new();
    for event in log.borrow().iter() {
        match *event {
            Event::Init(hz) => steps.push(Step::Init(hz)),
            Event::Byte { byte, .. } => steps.push(Step::Byte(byte)),
            Event::Ms | Event::Us => {
                let (ms, us) = if *event == Event::Ms { (1, 0) } else { (0, 1) };
                match steps.last_mut() {
                    Some(Step::Wait { ms: m, us: u }) => {
                        *m += ms;
                        *u += us;
                    }
                    _ => steps.push(Step::Wait { ms, us }),
                }
            }
        }
    }
    steps
}

pub fn bytes(log: &Log) -> Vec<u8> {
    log.borrow()
        .iter()
        .filter_map(|event| match *event {
            Event::Byte { byte, .. } => Some(byte),
            _ => None,
        })
        .collect()
}

/// Nibbles latched by the controller, read off the enable pulses.
pub fn nibbles(log: &Log) -> Vec<(SendingMode, u8)> {
    bytes(log)
        .into_iter()
        .filter(|byte| byte & PIN_ENABLE != 0)
        .map(|byte| {
            let mode = if byte & PIN_RS != 0 {
                SendingMode::Data
            } else {
                SendingMode::Command
            };
            (mode, byte >> 4)
        })
        .collect()
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Sent {
    Command(u8),
    Data(u8),
}

/// Full bytes received by the controller. Only valid once it is in 4-bit mode.
pub fn sent(log: &Log) -> Vec<Sent> {
    pair(&nibbles(log))
}

pub fn pair(nibbles: &[(SendingMode, u8)]) -> Vec<Sent> {
    nibbles
        .chunks(2)
        .map(|pair| {
            let [(mode, high), (_, low)] = pair else {
                panic!("odd number of nibbles: {:?}", pair);
            };
            let value = (*high << 4) | *low;
            match *mode {
                SendingMode::Command => Sent::Command(value),
                SendingMode::Data => Sent::Data(value),
            }
        })
        .collect()
}

pub fn clear(log: &Log) {
    log.borrow_mut().clear();
}
