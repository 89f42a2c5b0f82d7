//! Recording SPI bus, pins and delay for the integration tests

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;
use std::convert::Infallible;
use std::rc::Rc;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{self, InputPin, OutputPin};
use embedded_hal::spi::{self, ErrorKind, SpiBus};
use st730x::{Interface, NoTearingEffect};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Line {
    Cs,
    Dc,
    Rst,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Signal {
    Low(Line),
    High(Line),
    Write(Vec<u8>),
    Flush,
    DelayMs(u32),
    DelayUs(u32),
}

pub type Trace = Rc<RefCell<Vec<Signal>>>;

pub fn trace() -> Trace {
    Rc::new(RefCell::new(Vec::new()))
}

/// SPI bus recording writes; a failing bus rejects every write unrecorded
pub struct Bus {
    trace: Trace,
    failing: bool,
}

impl spi::ErrorType for Bus {
    type Error = ErrorKind;
}

impl SpiBus for Bus {
    fn read(&mut self, words: &mut [u8]) -> Result<(), ErrorKind> {
        words.fill(0);
        Ok(())
    }

    fn write(&mut self, words: &[u8]) -> Result<(), ErrorKind> {
        if self.failing {
            return Err(ErrorKind::Other);
        }
        self.trace.borrow_mut().push(Signal::Write(words.to_vec()));
        Ok(())
    }

    fn transfer(&mut self, read: &mut [u8], write: &[u8]) -> Result<(), ErrorKind> {
        read.fill(0);
        self.write(write)
    }

    fn transfer_in_place(&mut self, words: &mut [u8]) -> Result<(), ErrorKind> {
        let written = words.to_vec();
        words.fill(0);
        self.write(&written)
    }

    fn flush(&mut self) -> Result<(), ErrorKind> {
        self.trace.borrow_mut().push(Signal::Flush);
        Ok(())
    }
}

pub struct Pin {
    line: Line,
    trace: Trace,
}

impl digital::ErrorType for Pin {
    type Error = Infallible;
}

impl OutputPin for Pin {
    fn set_low(&mut self) -> Result<(), Infallible> {
        self.trace.borrow_mut().push(Signal::Low(self.line));
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        self.trace.borrow_mut().push(Signal::High(self.line));
        Ok(())
    }
}

/// Tearing effect line replaying scripted levels, then staying low
pub struct TePin {
    levels: VecDeque<bool>,
}

impl TePin {
    pub fn new(levels: &[bool]) -> Self {
        Self {
            levels: levels.iter().copied().collect(),
        }
    }
}

impl digital::ErrorType for TePin {
    type Error = Infallible;
}

impl InputPin for TePin {
    fn is_high(&mut self) -> Result<bool, Infallible> {
        Ok(self.levels.pop_front().unwrap_or(false))
    }

    fn is_low(&mut self) -> Result<bool, Infallible> {
        self.is_high().map(|high| !high)
    }
}

pub struct Delay {
    trace: Trace,
}

impl Delay {
    pub fn new(trace: &Trace) -> Self {
        Self {
            trace: trace.clone(),
        }
    }
}

impl DelayNs for Delay {
    fn delay_ns(&mut self, _ns: u32) {}

    fn delay_us(&mut self, us: u32) {
        self.trace.borrow_mut().push(Signal::DelayUs(us));
    }

    fn delay_ms(&mut self, ms: u32) {
        self.trace.borrow_mut().push(Signal::DelayMs(ms));
    }
}

pub type TestInterface = Interface<Bus, Pin, Pin, Pin, NoTearingEffect<Infallible>>;

pub fn interface(trace: &Trace) -> TestInterface {
    build_interface(trace, false)
}

pub fn failing_interface(trace: &Trace) -> TestInterface {
    build_interface(trace, true)
}

fn build_interface(trace: &Trace, failing: bool) -> TestInterface {
    let pin = |line| Pin {
        line,
        trace: trace.clone(),
    };
    Interface::new(
        Bus {
            trace: trace.clone(),
            failing,
        },
        pin(Line::Cs),
        pin(Line::Dc),
        pin(Line::Rst),
    )
}

/// Decode the bus trace into (opcode, payload) pairs
///
/// Writes with DC low start a new command, writes with DC high extend the
/// payload of the current one.
pub fn commands(trace: &Trace) -> Vec<(u8, Vec<u8>)> {
    let mut commands: Vec<(u8, Vec<u8>)> = Vec::new();
    let mut dc_high = true;
    for signal in trace.borrow().iter() {
        match signal {
            Signal::Low(Line::Dc) => dc_high = false,
            Signal::High(Line::Dc) => dc_high = true,
            Signal::Write(bytes) if !dc_high => {
                for &opcode in bytes {
                    commands.push((opcode, Vec::new()));
                }
            }
            Signal::Write(bytes) => {
                if let Some((_, payload)) = commands.last_mut() {
                    payload.extend_from_slice(bytes);
                }
            }
            _ => {}
        }
    }
    commands
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Op {
    Command(u8, Vec<u8>),
    DelayMs(u32),
}

/// Decode the bus trace into commands interleaved with millisecond delays
pub fn ops(trace: &Trace) -> Vec<Op> {
    let mut ops = Vec::new();
    let mut dc_high = true;
    for signal in trace.borrow().iter() {
        match signal {
            Signal::Low(Line::Dc) => dc_high = false,
            Signal::High(Line::Dc) => dc_high = true,
            Signal::DelayMs(ms) => ops.push(Op::DelayMs(*ms)),
            Signal::Write(bytes) if !dc_high => {
                ops.extend(bytes.iter().map(|&opcode| Op::Command(opcode, Vec::new())));
            }
            Signal::Write(bytes) => {
                if let Some(Op::Command(_, payload)) = ops.last_mut() {
                    payload.extend_from_slice(bytes);
                }
            }
            _ => {}
        }
    }
    ops
}
