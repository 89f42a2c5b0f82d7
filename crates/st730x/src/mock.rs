//! Recording interface and delay shared by the unit tests

use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::RefCell;

use embedded_hal::delay::DelayNs;

use crate::config::ResetTiming;
use crate::interface::DisplayInterface;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    Reset(ResetTiming),
    Command(u8, Vec<u8>),
    Delay(u32),
    FrameWait,
}

pub type EventLog = Rc<RefCell<Vec<Event>>>;

pub fn event_log() -> EventLog {
    Rc::new(RefCell::new(Vec::new()))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockError;

#[derive(Debug)]
pub struct MockInterface {
    log: EventLog,
    fail_on: Option<u8>,
}

impl MockInterface {
    pub fn new(log: EventLog) -> Self {
        Self { log, fail_on: None }
    }

    /// Fails the first time `opcode` is sent
    pub fn failing_on(log: EventLog, opcode: u8) -> Self {
        Self {
            log,
            fail_on: Some(opcode),
        }
    }

    pub fn commands(&self) -> Vec<(u8, Vec<u8>)> {
        self.log
            .borrow()
            .iter()
            .filter_map(|event| match event {
                Event::Command(opcode, payload) => Some((*opcode, payload.clone())),
                _ => None,
            })
            .collect()
    }
}

impl DisplayInterface for MockInterface {
    type Error = MockError;

    fn send_command(&mut self, opcode: u8, payload: &[u8]) -> Result<(), Self::Error> {
        if self.fail_on == Some(opcode) {
            self.fail_on = None;
            return Err(MockError);
        }
        self.log
            .borrow_mut()
            .push(Event::Command(opcode, payload.to_vec()));
        Ok(())
    }

    fn reset<D: DelayNs>(&mut self, _delay: &mut D, timing: ResetTiming) -> Result<(), Self::Error> {
        self.log.borrow_mut().push(Event::Reset(timing));
        Ok(())
    }

    fn wait_for_frame<D: DelayNs>(&mut self, _delay: &mut D) -> Result<(), Self::Error> {
        self.log.borrow_mut().push(Event::FrameWait);
        Ok(())
    }
}

pub struct MockDelay {
    log: EventLog,
}

impl MockDelay {
    pub fn new(log: EventLog) -> Self {
        Self { log }
    }
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, _ns: u32) {}

    fn delay_ms(&mut self, ms: u32) {
        self.log.borrow_mut().push(Event::Delay(ms));
    }
}
