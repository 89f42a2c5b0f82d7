//! Hardware interface abstraction
//!
//! This module provides the [`DisplayInterface`] trait and the [`Interface`] struct
//! for communicating with the ST7302/ST7305 controller over SPI.
//!
//! ## Hardware Requirements
//!
//! The controllers require:
//! - SPI bus (MOSI + SCK)
//! - 3 GPIO output pins:
//!   - **CS**: Chip select (active low)
//!   - **DC**: Data/Command select (low=command, high=data)
//!   - **RST**: Reset (active low)
//! - optionally the **TE** tearing effect output (input pin)
//!
//! ## Framing
//!
//! Every command is one transaction: select, command mode, opcode, deselect,
//! data mode, and only if the payload is non-empty a second selected phase
//! carrying the payload bytes.
//!
//! ## Example
//!
//! ```rust,ignore
//! use st730x::{DisplayInterface, Interface};
//!
//! // Create interface with SPI bus and GPIO pins
//! let mut interface = Interface::new(spi_bus, cs_pin, dc_pin, rst_pin)
//!     .with_tearing_effect(te_pin);
//!
//! // Sleep out, no data phase
//! interface.send_command(0x11, &[])?;
//!
//! // Memory access control with one data byte
//! interface.send_command(0x36, &[0x00])?;
//! ```

use core::fmt::Debug;
use core::marker::PhantomData;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{self, ErrorType, InputPin, OutputPin};
use embedded_hal::spi::SpiBus;

use crate::config::ResetTiming;

/// Default timeout for [`DisplayInterface::wait_for_frame`] in milliseconds
///
/// Long enough to cover one frame at the slowest (1Hz) low power frame rate.
pub const DEFAULT_TE_TIMEOUT_MS: u32 = 2_000;

/// Polling interval for the tearing effect line in microseconds
const TE_POLL_US: u32 = 50;

/// Trait for hardware interface to the ST730x controllers
///
/// This trait abstracts over different hardware implementations,
/// allowing the [`Display`](crate::display::Display) to work with any
/// SPI + GPIO implementation that satisfies embedded-hal traits.
///
/// ## Implementing
///
/// For most cases, use the provided [`Interface`] struct. If the bus is
/// shared with other devices, implement this trait on a type that locks the
/// bus for the duration of `send_command`.
pub trait DisplayInterface {
    /// Error type for interface operations
    ///
    /// Must implement [`Debug`] for error reporting.
    type Error: Debug;

    /// Send a command byte followed by its payload
    ///
    /// The implementation must, in order:
    /// 1. Select the device, set DC low, write `opcode`, deselect
    /// 2. Set DC high
    /// 3. If `payload` is not empty: select, write `payload`, deselect
    ///
    /// An empty payload produces no data phase at all.
    ///
    /// # Errors
    ///
    /// Returns an error if SPI communication or GPIO fails.
    fn send_command(&mut self, opcode: u8, payload: &[u8]) -> Result<(), Self::Error>;

    /// Perform hardware reset
    ///
    /// The implementation must:
    /// 1. Wait `timing.settle_ms`
    /// 2. Set RST low and wait `timing.low_ms`
    /// 3. Set RST high and wait `timing.high_ms`
    ///
    /// # Errors
    ///
    /// Returns an error if the reset pin cannot be driven.
    fn reset<D: DelayNs>(&mut self, delay: &mut D, timing: ResetTiming) -> Result<(), Self::Error>;

    /// Wait until the tearing effect line signals the blanking period
    ///
    /// Interfaces without a TE line return immediately.
    ///
    /// # Errors
    ///
    /// Implementations return an error if the line cannot be read or never
    /// goes high.
    fn wait_for_frame<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), Self::Error> {
        let _ = delay;
        Ok(())
    }
}

/// Errors that can occur at the interface level
///
/// Generic over SPI and GPIO error types.
#[derive(Debug)]
pub enum InterfaceError<SpiErr, PinErr> {
    /// SPI communication error
    Spi(SpiErr),
    /// GPIO pin error
    Pin(PinErr),
    /// Timeout waiting for the tearing effect line
    Timeout,
}

impl<SpiErr: Debug, PinErr: Debug> core::fmt::Display for InterfaceError<SpiErr, PinErr> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            InterfaceError::Spi(e) => write!(f, "SPI error: {e:?}"),
            InterfaceError::Pin(e) => write!(f, "Pin error: {e:?}"),
            InterfaceError::Timeout => write!(f, "Timeout waiting for tearing effect"),
        }
    }
}

impl<SpiErr: Debug, PinErr: Debug> core::error::Error for InterfaceError<SpiErr, PinErr> {}

/// Placeholder for an unconnected tearing effect line
///
/// Always reads high, so frame synchronisation never waits.
#[derive(Debug)]
pub struct NoTearingEffect<E> {
    _error: PhantomData<E>,
}

impl<E> NoTearingEffect<E> {
    fn new() -> Self {
        Self {
            _error: PhantomData,
        }
    }
}

impl<E: digital::Error> ErrorType for NoTearingEffect<E> {
    type Error = E;
}

impl<E: digital::Error> InputPin for NoTearingEffect<E> {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(true)
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(false)
    }
}

/// Hardware interface implementation for ST7302/ST7305
///
/// Implements [`DisplayInterface`] for embedded-hal v1.0 SPI bus and GPIO
/// traits. Chip select is driven by this struct, so the SPI peripheral must
/// be a bare [`SpiBus`] rather than an `SpiDevice`.
///
/// ## Type Parameters
///
/// * `SPI` - SPI bus implementing [`SpiBus`]
/// * `CS` - Chip select pin implementing [`OutputPin`]
/// * `DC` - Data/Command pin implementing [`OutputPin`]
/// * `RST` - Reset pin implementing [`OutputPin`]
/// * `TE` - Tearing effect pin implementing [`InputPin`], [`NoTearingEffect`] when unused
pub struct Interface<SPI, CS, DC, RST, TE> {
    /// SPI bus for communication
    spi: SPI,
    /// Chip select pin (active low)
    cs: CS,
    /// Data/Command select pin (low=command, high=data)
    dc: DC,
    /// Reset pin (active low)
    rst: RST,
    /// Tearing effect pin (high during blanking)
    te: TE,
}

impl<SPI, CS, DC, RST> Interface<SPI, CS, DC, RST, NoTearingEffect<DC::Error>>
where
    DC: OutputPin,
{
    /// Create a new Interface without a tearing effect line
    ///
    /// # Arguments
    ///
    /// * `spi` - SPI bus (must implement [`SpiBus`])
    /// * `cs` - Chip select pin (output, active low)
    /// * `dc` - Data/Command pin (output, low=command, high=data)
    /// * `rst` - Reset pin (output, active low)
    pub fn new(spi: SPI, cs: CS, dc: DC, rst: RST) -> Self {
        Self {
            spi,
            cs,
            dc,
            rst,
            te: NoTearingEffect::new(),
        }
    }
}

impl<SPI, CS, DC, RST, TE> Interface<SPI, CS, DC, RST, TE> {
    /// Attach the tearing effect line
    pub fn with_tearing_effect<T>(self, te: T) -> Interface<SPI, CS, DC, RST, T> {
        Interface {
            spi: self.spi,
            cs: self.cs,
            dc: self.dc,
            rst: self.rst,
            te,
        }
    }

    /// Release the bus and pins
    pub fn release(self) -> (SPI, CS, DC, RST, TE) {
        (self.spi, self.cs, self.dc, self.rst, self.te)
    }
}

impl<SPI, CS, DC, RST, TE, PinErr> Interface<SPI, CS, DC, RST, TE>
where
    SPI: SpiBus,
    CS: OutputPin<Error = PinErr>,
    PinErr: Debug,
{
    /// Run `phase` with the device selected
    ///
    /// CS is released on every exit path; an error from `phase` takes
    /// precedence over a deselect error.
    fn selected<F>(&mut self, phase: F) -> Result<(), InterfaceError<SPI::Error, PinErr>>
    where
        F: FnOnce(&mut Self) -> Result<(), InterfaceError<SPI::Error, PinErr>>,
    {
        self.cs.set_low().map_err(InterfaceError::Pin)?;
        let result = phase(self);
        let deselected = self.cs.set_high().map_err(InterfaceError::Pin);
        result.and(deselected)
    }

    /// Write `bytes` and wait for the bus to drain
    fn write(&mut self, bytes: &[u8]) -> Result<(), InterfaceError<SPI::Error, PinErr>> {
        self.spi.write(bytes).map_err(InterfaceError::Spi)?;
        self.spi.flush().map_err(InterfaceError::Spi)
    }
}

impl<SPI, CS, DC, RST, TE, PinErr> DisplayInterface for Interface<SPI, CS, DC, RST, TE>
where
    SPI: SpiBus,
    CS: OutputPin<Error = PinErr>,
    DC: OutputPin<Error = PinErr>,
    RST: OutputPin<Error = PinErr>,
    TE: InputPin<Error = PinErr>,
    PinErr: Debug,
{
    type Error = InterfaceError<SPI::Error, PinErr>;

    fn send_command(&mut self, opcode: u8, payload: &[u8]) -> Result<(), Self::Error> {
        self.selected(|this| {
            this.dc.set_low().map_err(InterfaceError::Pin)?;
            this.write(&[opcode])
        })?;
        self.dc.set_high().map_err(InterfaceError::Pin)?;

        if !payload.is_empty() {
            self.selected(|this| this.write(payload))?;
        }
        Ok(())
    }

    fn reset<D: DelayNs>(&mut self, delay: &mut D, timing: ResetTiming) -> Result<(), Self::Error> {
        delay.delay_ms(timing.settle_ms);
        self.rst.set_low().map_err(InterfaceError::Pin)?;
        delay.delay_ms(timing.low_ms);
        self.rst.set_high().map_err(InterfaceError::Pin)?;
        delay.delay_ms(timing.high_ms);
        Ok(())
    }

    fn wait_for_frame<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), Self::Error> {
        let max_polls = DEFAULT_TE_TIMEOUT_MS * (1_000 / TE_POLL_US);

        for _ in 0..max_polls {
            if self.te.is_high().map_err(InterfaceError::Pin)? {
                return Ok(());
            }
            delay.delay_us(TE_POLL_US);
        }
        Err(InterfaceError::Timeout)
    }
}
