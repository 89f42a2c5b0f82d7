//! Bitmap-owning display
//!
//! This module provides the [`GraphicDisplay`] struct which owns the
//! [`Bitmap`] and the packed frame buffer next to a [`Display`], and repacks
//! and sends the bitmap on every [`refresh()`](GraphicDisplay::refresh).
//!
//! With the `graphics` feature it also implements the `DrawTarget` trait
//! from the embedded-graphics ecosystem by delegating to the bitmap.
//!
//! ## Example
//!
//! ```rust,ignore
//! use st730x::{Builder, Display, GraphicDisplay, Interface, Model};
//! use embedded_graphics::{
//!     mono_font::{ascii::FONT_6X10, MonoTextStyle},
//!     pixelcolor::BinaryColor,
//!     prelude::*,
//!     text::Text,
//! };
//!
//! let config = Builder::new().model(Model::St7302).build()?;
//! let display = Display::new(Interface::new(spi, cs, dc, rst), config);
//!
//! // Resets and initializes the panel
//! let mut display = GraphicDisplay::new(display, [0u8; 3750], [0u8; 3750], &mut delay)?;
//!
//! Text::new("Hello, LCD!", Point::new(10, 20),
//!     MonoTextStyle::new(&FONT_6X10, BinaryColor::On))
//!     .draw(&mut display)?;
//!
//! display.refresh()?;
//! ```

use embedded_hal::delay::DelayNs;

use crate::bitmap::Bitmap;
use crate::convert::convert;
use crate::display::Display;
use crate::error::{BuilderError, Error};
use crate::interface::DisplayInterface;

/// Display with its bitmap and packed frame buffer
///
/// ## Type Parameters
///
/// * `I` - Interface type implementing [`DisplayInterface`](crate::interface::DisplayInterface)
/// * `B` - Buffer type implementing `AsRef<[u8]> + AsMut<[u8]>` for both buffers
pub struct GraphicDisplay<I, B>
where
    I: DisplayInterface,
    B: AsRef<[u8]> + AsMut<[u8]>,
{
    /// The underlying display driver
    display: Display<I>,
    /// Drawing surface
    bitmap: Bitmap<B>,
    /// Transmission buffer, regenerated on every refresh
    packed: B,
}

impl<I, B> GraphicDisplay<I, B>
where
    I: DisplayInterface,
    B: AsRef<[u8]> + AsMut<[u8]>,
{
    /// Create a GraphicDisplay and bring up the panel
    ///
    /// Both buffers are checked before any bus traffic. Then the panel is
    /// reset and initialized, and unused gate lines are blanked.
    ///
    /// # Arguments
    ///
    /// * `display` - The [`Display`] driver instance
    /// * `bitmap` - Bitmap storage, at least `dimensions.bitmap_size()` bytes
    /// * `packed` - Packed frame storage, at least `dimensions.packed_size()` bytes
    /// * `delay` - Delay implementation for the init sequence
    ///
    /// # Errors
    ///
    /// Returns `Error::Builder` if a buffer is too small and
    /// `Error::Interface` if the init sequence fails.
    pub fn new<D: DelayNs>(
        mut display: Display<I>,
        bitmap: B,
        mut packed: B,
        delay: &mut D,
    ) -> Result<Self, Error<I>> {
        let dimensions = *display.dimensions();
        let mut bitmap = Bitmap::new(bitmap, dimensions)?;

        let required = dimensions.packed_size();
        let provided = packed.as_ref().len();
        if provided < required {
            return Err(BuilderError::BufferTooSmall { required, provided }.into());
        }

        display.init(delay)?;

        bitmap.fill(false);
        let blank = &mut packed.as_mut()[..required];
        blank.fill(0);
        display.clear_unused_lines(blank)?;

        Ok(Self {
            display,
            bitmap,
            packed,
        })
    }

    /// Send the bitmap to the panel
    ///
    /// Repacks the whole bitmap and writes it through the fixed address
    /// window.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Interface`](crate::error::Error::Interface) if there's a
    /// communication error.
    pub fn refresh(&mut self) -> Result<(), Error<I>> {
        convert(
            self.bitmap.as_bytes(),
            self.bitmap.dimensions(),
            self.packed.as_mut(),
        )?;
        self.display.write_frame(self.packed.as_ref())
    }

    /// Wait for the tearing effect line, then [`refresh()`](Self::refresh)
    pub fn refresh_synced<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), Error<I>> {
        self.display.wait_for_frame(delay)?;
        self.refresh()
    }

    /// The drawing surface
    pub fn bitmap(&self) -> &Bitmap<B> {
        &self.bitmap
    }

    /// The drawing surface, mutable
    pub fn bitmap_mut(&mut self) -> &mut Bitmap<B> {
        &mut self.bitmap
    }

    /// Access the underlying Display
    pub fn display(&self) -> &Display<I> {
        &self.display
    }

    /// Access the underlying Display mutably
    pub fn display_mut(&mut self) -> &mut Display<I> {
        &mut self.display
    }

    /// Release the display and both buffers
    pub fn release(self) -> (Display<I>, B, B) {
        (self.display, self.bitmap.release(), self.packed)
    }
}

#[cfg(feature = "graphics")]
mod draw {
    use core::convert::Infallible;

    use embedded_graphics_core::{
        Pixel,
        draw_target::DrawTarget,
        geometry::{OriginDimensions, Size},
        pixelcolor::BinaryColor,
    };

    use super::GraphicDisplay;
    use crate::interface::DisplayInterface;

    impl<I, B> DrawTarget for GraphicDisplay<I, B>
    where
        I: DisplayInterface,
        B: AsRef<[u8]> + AsMut<[u8]>,
    {
        type Color = BinaryColor;
        type Error = Infallible;

        fn draw_iter<Iter>(&mut self, pixels: Iter) -> Result<(), Self::Error>
        where
            Iter: IntoIterator<Item = Pixel<Self::Color>>,
        {
            self.bitmap.draw_iter(pixels)
        }

        fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
            self.bitmap.clear(color)
        }
    }

    impl<I, B> OriginDimensions for GraphicDisplay<I, B>
    where
        I: DisplayInterface,
        B: AsRef<[u8]> + AsMut<[u8]>,
    {
        fn size(&self) -> Size {
            self.bitmap.size()
        }
    }
}
