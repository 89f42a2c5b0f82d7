//! Monochrome VLSB bitmap
//!
//! Each byte holds 8 vertically stacked pixels of one column, least
//! significant bit on top. Byte `band * width + x` covers rows
//! `band * 8 .. band * 8 + 8` of column `x`. A set bit is a dark pixel.

use crate::config::Dimensions;
use crate::error::BuilderError;

/// VLSB bitmap over caller-provided storage
pub struct Bitmap<B> {
    buffer: B,
    dimensions: Dimensions,
}

impl<B> Bitmap<B>
where
    B: AsRef<[u8]> + AsMut<[u8]>,
{
    /// Wrap `buffer` as a bitmap of the given dimensions
    ///
    /// # Errors
    ///
    /// Returns `BuilderError::BufferTooSmall` if `buffer` holds fewer than
    /// `dimensions.bitmap_size()` bytes.
    pub fn new(buffer: B, dimensions: Dimensions) -> Result<Self, BuilderError> {
        let required = dimensions.bitmap_size();
        let provided = buffer.as_ref().len();
        if provided < required {
            return Err(BuilderError::BufferTooSmall { required, provided });
        }
        Ok(Self { buffer, dimensions })
    }

    /// Bitmap dimensions
    pub fn dimensions(&self) -> &Dimensions {
        &self.dimensions
    }

    /// Raw VLSB bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer.as_ref()[..self.dimensions.bitmap_size()]
    }

    /// Raw VLSB bytes, mutable
    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        let size = self.dimensions.bitmap_size();
        &mut self.buffer.as_mut()[..size]
    }

    /// Set every pixel on or off
    pub fn fill(&mut self, on: bool) {
        let value = if on { 0xFF } else { 0x00 };
        self.as_bytes_mut().fill(value);
    }

    /// Set a single pixel; out of range coordinates are ignored
    pub fn set_pixel(&mut self, x: u32, y: u32, on: bool) {
        if let Some((index, bit)) = self.location(x, y) {
            let byte = &mut self.buffer.as_mut()[index];
            if on {
                *byte |= bit;
            } else {
                *byte &= !bit;
            }
        }
    }

    /// Read a single pixel, `None` when out of range
    pub fn pixel(&self, x: u32, y: u32) -> Option<bool> {
        self.location(x, y)
            .map(|(index, bit)| self.buffer.as_ref()[index] & bit != 0)
    }

    /// Release the underlying storage
    pub fn release(self) -> B {
        self.buffer
    }

    fn location(&self, x: u32, y: u32) -> Option<(usize, u8)> {
        let width = self.dimensions.width as u32;
        if x >= width || y >= self.dimensions.height as u32 {
            return None;
        }
        let index = (y / 8) as usize * width as usize + x as usize;
        Some((index, 1 << (y % 8)))
    }
}

#[cfg(feature = "graphics")]
mod draw {
    use core::convert::Infallible;

    use embedded_graphics_core::{
        Pixel,
        draw_target::DrawTarget,
        geometry::{OriginDimensions, Point, Size},
        pixelcolor::BinaryColor,
    };

    use super::Bitmap;

    impl<B> DrawTarget for Bitmap<B>
    where
        B: AsRef<[u8]> + AsMut<[u8]>,
    {
        type Color = BinaryColor;
        type Error = Infallible;

        fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
        where
            I: IntoIterator<Item = Pixel<Self::Color>>,
        {
            for Pixel(Point { x, y }, color) in pixels {
                if x >= 0 && y >= 0 {
                    self.set_pixel(x as u32, y as u32, color.is_on());
                }
            }
            Ok(())
        }

        fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
            self.fill(color.is_on());
            Ok(())
        }
    }

    impl<B> OriginDimensions for Bitmap<B> {
        fn size(&self) -> Size {
            Size::new(
                self.dimensions.width as u32,
                self.dimensions.height as u32,
            )
        }
    }
}
