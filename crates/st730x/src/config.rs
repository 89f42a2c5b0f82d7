//! Display configuration types and builder

use crate::command::{HIGH_POWER_MODE, LOW_POWER_MODE};
pub use crate::error::BuilderError;
use crate::panel::{Model, Panel};

/// Pixel rows covered by one packed tile
///
/// The packed transmission format consumes the bitmap in vertical groups of
/// three VLSB bytes, so the bitmap height must be a multiple of this.
pub const TILE_ROWS: u16 = 24;

/// Pixel columns covered by one packed tile
pub const TILE_COLUMNS: u16 = 2;

/// Pixel rows covered by one window column (4 source bytes worth of 3-byte groups)
const ROWS_PER_WINDOW_COLUMN: u16 = 12;

/// Bitmap dimensions
///
/// Width runs along the panel's gate lines and height along its sources, the
/// same orientation the VLSB bitmap uses: one byte holds 8 vertically stacked
/// pixels of a column.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Dimensions {
    /// Width in pixels (number of bitmap columns)
    pub width: u16,
    /// Height in pixels (number of bitmap rows)
    pub height: u16,
}

impl Dimensions {
    /// Create new dimensions with validation
    ///
    /// # Errors
    ///
    /// Returns `BuilderError::InvalidDimensions` if:
    /// - width or height is zero
    /// - width is not a multiple of 2 (packed tiles span two columns)
    /// - height is not a multiple of 24 (packed tiles span three bitmap bytes)
    pub fn new(width: u16, height: u16) -> Result<Self, BuilderError> {
        if width == 0 || !width.is_multiple_of(TILE_COLUMNS) {
            return Err(BuilderError::InvalidDimensions { width, height });
        }
        if height == 0 || !height.is_multiple_of(TILE_ROWS) {
            return Err(BuilderError::InvalidDimensions { width, height });
        }
        Ok(Self { width, height })
    }

    /// Size of the VLSB bitmap in bytes
    pub fn bitmap_size(&self) -> usize {
        self.width as usize * (self.height as usize / 8)
    }

    /// Size of the packed transmission buffer in bytes
    ///
    /// Six output bytes per tile of 2 columns by 24 rows.
    pub fn packed_size(&self) -> usize {
        let tiles = (self.width / TILE_COLUMNS) as usize * (self.height / TILE_ROWS) as usize;
        tiles * 6
    }

    /// Number of bitmap bytes stacked in one column
    pub fn bands(&self) -> usize {
        self.height as usize / 8
    }
}

/// Column and row range targeted by a memory write
///
/// One window column drives 12 bitmap rows and one window row drives 2
/// bitmap columns.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AddressWindow {
    column_start: u8,
    columns: u8,
    row_start: u8,
    rows: u8,
}

impl AddressWindow {
    /// Create a window of `columns` x `rows` addresses starting at the given offsets
    ///
    /// The window is checked by [`Builder::build`]: it must be non-empty and
    /// end at or below address 0xFF.
    pub const fn new(column_start: u8, columns: u8, row_start: u8, rows: u8) -> Self {
        Self {
            column_start,
            columns,
            row_start,
            rows,
        }
    }

    /// Number of column addresses in the window
    pub fn columns(&self) -> u16 {
        self.columns as u16
    }

    /// Number of row addresses in the window
    pub fn rows(&self) -> u16 {
        self.rows as u16
    }

    /// Payload for the column address set command
    pub fn column_bytes(&self) -> [u8; 2] {
        [
            self.column_start,
            self.column_start.wrapping_add(self.columns.wrapping_sub(1)),
        ]
    }

    /// Payload for the row address set command
    pub fn row_bytes(&self) -> [u8; 2] {
        [
            self.row_start,
            self.row_start.wrapping_add(self.rows.wrapping_sub(1)),
        ]
    }

    fn fits(start: u8, count: u8) -> bool {
        count
            .checked_sub(1)
            .and_then(|span| start.checked_add(span))
            .is_some()
    }

    fn covers(&self, dims: &Dimensions) -> bool {
        Self::fits(self.column_start, self.columns)
            && Self::fits(self.row_start, self.rows)
            && self.columns() * ROWS_PER_WINDOW_COLUMN == dims.height
            && self.rows() * TILE_COLUMNS == dims.width
    }
}

/// Hardware reset pulse timing in milliseconds
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResetTiming {
    /// Wait before pulling reset low
    pub settle_ms: u32,
    /// Time reset is held low
    pub low_ms: u32,
    /// Wait after releasing reset, before the first command
    pub high_ms: u32,
}

/// Frame rate preset for panels whose command table defers to it
///
/// Each preset pairs the power mode opcode issued just before display-on
/// with the frame rate control payload.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FrameRate {
    /// Low power mode, HPM 16Hz / LPM 1Hz (best quality)
    Lpm1Hz,
    /// Low power mode, HPM 16Hz / LPM 8Hz (best quality)
    #[default]
    Lpm8Hz,
    /// High power mode, HPM 16Hz / LPM 8Hz (best quality)
    Hpm16Hz,
    /// High power mode, HPM 32Hz / LPM 8Hz (lower quality)
    Hpm32Hz,
}

impl FrameRate {
    /// Power mode opcode (HPM or LPM)
    pub const fn power_mode(self) -> u8 {
        match self {
            FrameRate::Lpm1Hz | FrameRate::Lpm8Hz => LOW_POWER_MODE,
            FrameRate::Hpm16Hz | FrameRate::Hpm32Hz => HIGH_POWER_MODE,
        }
    }

    /// Frame rate control payload
    pub const fn control(self) -> &'static [u8] {
        match self {
            FrameRate::Lpm1Hz => &[0x02],
            FrameRate::Lpm8Hz | FrameRate::Hpm16Hz => &[0x05],
            FrameRate::Hpm32Hz => &[0x15],
        }
    }
}

/// Display configuration
///
/// Holds the panel description together with the validated geometry and the
/// address window, computed once. Use `Builder` to create a Config.
#[derive(Clone, Debug)]
pub struct Config {
    /// Panel description (command table, window, timings)
    pub panel: Panel,
    /// Validated bitmap dimensions
    pub dimensions: Dimensions,
    /// Frame rate preset
    pub frame_rate: FrameRate,
    /// Address window used for every frame
    pub window: AddressWindow,
}

/// Builder for constructing display configuration
///
/// # Example
///
/// ```
/// use st730x::{Builder, FrameRate, Model};
///
/// let config = Builder::new()
///     .model(Model::St7305)
///     .frame_rate(FrameRate::Hpm32Hz)
///     .build()
///     .expect("valid configuration");
/// assert_eq!(config.dimensions.packed_size(), 192 * 14 * 3);
/// ```
#[derive(Default)]
pub struct Builder {
    /// Panel description (required)
    panel: Option<Panel>,
    /// Frame rate preset
    frame_rate: FrameRate,
}

impl Builder {
    /// Create a new Builder with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Select one of the known panel models
    pub fn model(mut self, model: Model) -> Self {
        self.panel = Some(*model.panel());
        self
    }

    /// Use a custom panel description
    pub fn panel(mut self, panel: Panel) -> Self {
        self.panel = Some(panel);
        self
    }

    /// Set the frame rate preset
    pub fn frame_rate(mut self, frame_rate: FrameRate) -> Self {
        self.frame_rate = frame_rate;
        self
    }

    /// Build the configuration
    ///
    /// # Errors
    ///
    /// Returns `BuilderError::MissingPanel` if no panel was set,
    /// `BuilderError::InvalidDimensions` if the panel geometry does not tile,
    /// and `BuilderError::WindowMismatch` if the address window is empty,
    /// runs past address 0xFF, or does not cover the bitmap exactly.
    pub fn build(self) -> Result<Config, BuilderError> {
        let panel = self.panel.ok_or(BuilderError::MissingPanel)?;
        let dimensions = Dimensions::new(panel.width, panel.height)?;

        let window = panel.window;
        if !window.covers(&dimensions) {
            return Err(BuilderError::WindowMismatch {
                columns: window.columns(),
                rows: window.rows(),
            });
        }

        Ok(Config {
            panel,
            dimensions,
            frame_rate: self.frame_rate,
            window,
        })
    }
}
