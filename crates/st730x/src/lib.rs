//! # ST730x Reflective LCD Driver
//!
//! A `no_std` driver for the Sitronix ST7302 and ST7305 monochrome reflective
//! LCD controllers, for use with embedded-hal v1.0.
//!
//! ## Features
//!
//! - **Table-driven bring-up**: each panel is a constant holding its geometry,
//!   reset timing and init command table
//! - **Packed frame conversion**: VLSB bitmaps are repacked into the
//!   controllers' 2x24 pixel tile format on every refresh
//! - **Fixed address window**: column and row address bytes are computed once
//! - **Frame sync**: optional tearing effect input
//! - **Graphics**: embedded-graphics `DrawTarget` support (feature `graphics`),
//!   the driver itself works without it
//!
//! ## Quick Start
//!
//! ```
//! # #[cfg(feature = "graphics")] {
//! # use core::convert::Infallible;
//! # use embedded_hal::{delay::DelayNs, digital, spi};
//! # struct Bus;
//! # impl spi::ErrorType for Bus { type Error = Infallible; }
//! # impl spi::SpiBus for Bus {
//! #     fn read(&mut self, _: &mut [u8]) -> Result<(), Infallible> { Ok(()) }
//! #     fn write(&mut self, _: &[u8]) -> Result<(), Infallible> { Ok(()) }
//! #     fn transfer(&mut self, _: &mut [u8], _: &[u8]) -> Result<(), Infallible> { Ok(()) }
//! #     fn transfer_in_place(&mut self, _: &mut [u8]) -> Result<(), Infallible> { Ok(()) }
//! #     fn flush(&mut self) -> Result<(), Infallible> { Ok(()) }
//! # }
//! # struct Pin;
//! # impl digital::ErrorType for Pin { type Error = Infallible; }
//! # impl digital::OutputPin for Pin {
//! #     fn set_low(&mut self) -> Result<(), Infallible> { Ok(()) }
//! #     fn set_high(&mut self) -> Result<(), Infallible> { Ok(()) }
//! # }
//! # struct Delay;
//! # impl DelayNs for Delay { fn delay_ns(&mut self, _: u32) {} }
//! # let (spi, cs, dc, rst, mut delay) = (Bus, Pin, Pin, Pin, Delay);
//! use embedded_graphics::{
//!     pixelcolor::BinaryColor,
//!     prelude::*,
//!     primitives::{Circle, PrimitiveStyle},
//! };
//! use st730x::{Builder, Display, FrameRate, GraphicDisplay, Interface, Model};
//!
//! // Pick the panel and frame rate
//! let config = Builder::new()
//!     .model(Model::St7305)
//!     .frame_rate(FrameRate::Lpm8Hz)
//!     .build()?;
//!
//! // SPI bus plus chip select, data/command and reset pins
//! let interface = Interface::new(spi, cs, dc, rst);
//! let display = Display::new(interface, config);
//!
//! // Bitmap and packed buffers, sized for the 384x168 panel
//! let mut display = GraphicDisplay::new(display, [0u8; 8064], [0u8; 8064], &mut delay)?;
//!
//! Circle::new(Point::new(150, 40), 80)
//!     .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 3))
//!     .draw(&mut display)?;
//!
//! display.refresh()?;
//! # }
//! # Ok::<(), Box<dyn core::error::Error>>(())
//! ```
//!
//! ## Architecture
//!
//! - [`interface`] - SPI framing and GPIO control
//! - [`sequence`] - Runs a panel's init table and tracks controller state
//! - [`display`] - Init and frame writes through the address window
//! - [`convert`] - VLSB to packed tile conversion
//! - [`graphics`] - Bitmap ownership, refresh and embedded-graphics integration

#![no_std]

#[cfg(test)]
extern crate alloc;

/// Bitmap storage
pub mod bitmap;
/// Controller opcodes
pub mod command;
/// Configuration types and builder
pub mod config;
/// Packed frame conversion
pub mod convert;
/// Core display operations
pub mod display;
/// Error types
pub mod error;
/// Bitmap-owning display with refresh
pub mod graphics;
/// Hardware interface abstraction
pub mod interface;
/// Panel descriptions
pub mod panel;
/// Init command sequencing
pub mod sequence;

#[cfg(test)]
mod mock;

pub use bitmap::Bitmap;
pub use config::{AddressWindow, Builder, Config, Dimensions, FrameRate, ResetTiming};
pub use convert::{convert, interleave};
pub use display::Display;
pub use error::{BuilderError, Error};
pub use graphics::GraphicDisplay;
pub use interface::{
    DEFAULT_TE_TIMEOUT_MS, DisplayInterface, Interface, InterfaceError, NoTearingEffect,
};
pub use panel::{Model, Panel, ST7302_213, ST7305_290};
pub use sequence::{PowerState, Sequencer, Step};
