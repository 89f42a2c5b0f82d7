//! Error types for the driver
//!
//! This module defines error types for configuration building ([`BuilderError`])
//! and display operations ([`Error`]).
//!
//! ## Error Types
//!
//! - [`BuilderError`] - Errors during configuration and buffer construction
//! - [`Error`] - Runtime errors during display operations
//! - [`InterfaceError`](crate::interface::InterfaceError) - Low-level hardware communication errors
//!
//! ## Example
//!
//! ```
//! use st730x::{Builder, BuilderError, Dimensions};
//!
//! // Missing panel
//! let result = Builder::new().build();
//! assert!(matches!(result, Err(BuilderError::MissingPanel)));
//!
//! // Height must cover whole 24-row tiles
//! let result = Dimensions::new(250, 122);
//! assert!(result.is_err());
//! ```

use crate::config::{TILE_COLUMNS, TILE_ROWS};
use crate::interface::DisplayInterface;

/// Errors that can occur when interacting with the display
///
/// Generic over the interface type to preserve the specific error type.
pub enum Error<I: DisplayInterface> {
    /// Interface error (SPI/GPIO)
    ///
    /// Wraps the underlying hardware error from the [`DisplayInterface`] implementation.
    /// A failure in the middle of the init sequence leaves the panel in an
    /// undefined state; rebuild the driver to run the full reset again.
    Interface(I::Error),
    /// Configuration or buffer construction error
    Builder(BuilderError),
    /// Buffer is too small for the display
    BufferTooSmall {
        /// Required buffer size in bytes
        required: usize,
        /// Provided buffer size in bytes
        provided: usize,
    },
    /// A frame was written before the init sequence completed
    NotInitialized,
}

impl<I: DisplayInterface> From<BuilderError> for Error<I> {
    fn from(e: BuilderError) -> Self {
        Error::Builder(e)
    }
}

impl<I: DisplayInterface> core::fmt::Debug for Error<I> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::Interface(e) => f.debug_tuple("Interface").field(e).finish(),
            Error::Builder(e) => f.debug_tuple("Builder").field(e).finish(),
            Error::BufferTooSmall { required, provided } => f
                .debug_struct("BufferTooSmall")
                .field("required", required)
                .field("provided", provided)
                .finish(),
            Error::NotInitialized => f.write_str("NotInitialized"),
        }
    }
}

impl<I: DisplayInterface> core::fmt::Display for Error<I> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::Interface(e) => write!(f, "Interface error: {e:?}"),
            Error::Builder(e) => write!(f, "{e}"),
            Error::BufferTooSmall { required, provided } => {
                write!(
                    f,
                    "Buffer too small: required {required} bytes, provided {provided}"
                )
            }
            Error::NotInitialized => write!(f, "Display not initialized"),
        }
    }
}

impl<I: DisplayInterface> core::error::Error for Error<I> {}

/// Errors that can occur when building configuration
///
/// These errors occur before the display is created and before any bus
/// traffic is issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuilderError {
    /// No panel was selected
    ///
    /// [`Builder::model()`](crate::config::Builder::model) or
    /// [`Builder::panel()`](crate::config::Builder::panel) must be called before building.
    MissingPanel,
    /// Invalid bitmap dimensions
    ///
    /// See [`Dimensions::new()`](crate::config::Dimensions::new) for constraints.
    InvalidDimensions {
        /// Width in pixels
        width: u16,
        /// Height in pixels
        height: u16,
    },
    /// The panel address window does not match the packed geometry
    WindowMismatch {
        /// Number of window columns (12 pixel rows each)
        columns: u16,
        /// Number of window rows (2 pixel columns each)
        rows: u16,
    },
    /// Buffer is too small for the configured dimensions
    BufferTooSmall {
        /// Required buffer size in bytes
        required: usize,
        /// Provided buffer size in bytes
        provided: usize,
    },
}

impl core::fmt::Display for BuilderError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            BuilderError::MissingPanel => write!(f, "Panel must be specified"),
            BuilderError::InvalidDimensions { width, height } => write!(
                f,
                "Invalid dimensions {width}x{height} (width must be a multiple of {TILE_COLUMNS}, height a multiple of {TILE_ROWS})"
            ),
            BuilderError::WindowMismatch { columns, rows } => write!(
                f,
                "Address window {columns}x{rows} does not cover the bitmap"
            ),
            BuilderError::BufferTooSmall { required, provided } => write!(
                f,
                "Buffer too small: required {required} bytes, provided {provided}"
            ),
        }
    }
}

impl core::error::Error for BuilderError {}
