//! Core display operations

use embedded_hal::delay::DelayNs;
use log::{debug, trace};

use crate::command::{COLUMN_ADDRESS_SET, MEMORY_WRITE, ROW_ADDRESS_SET};
use crate::config::{AddressWindow, Config, Dimensions};
use crate::error::Error;
use crate::interface::DisplayInterface;
use crate::sequence::{PowerState, Sequencer};

type DisplayResult<I> = core::result::Result<(), Error<I>>;

/// Core display driver for ST7302/ST7305
///
/// Runs the panel's init table and writes packed frames through the fixed
/// address window. For a driver that owns the bitmap and does the packing,
/// use `GraphicDisplay` (requires `graphics` feature).
pub struct Display<I>
where
    I: DisplayInterface,
{
    /// Hardware interface
    interface: I,
    /// Display configuration
    config: Config,
    /// Column address set payload, computed once
    caset: [u8; 2],
    /// Row address set payload, computed once
    raset: [u8; 2],
    /// Controller state
    state: PowerState,
    /// Whether the init table ran to completion
    initialized: bool,
}

impl<I> Display<I>
where
    I: DisplayInterface,
{
    /// Create a new Display instance
    ///
    /// No bus traffic happens until [`init()`](Self::init).
    pub fn new(interface: I, config: Config) -> Self {
        let caset = config.window.column_bytes();
        let raset = config.window.row_bytes();
        Self {
            interface,
            config,
            caset,
            raset,
            state: PowerState::Reset,
            initialized: false,
        }
    }

    /// Perform hardware reset and run the panel's init table
    ///
    /// On error the panel is in an undefined state; build a new driver to
    /// retry from reset.
    pub fn init<D: DelayNs>(&mut self, delay: &mut D) -> DisplayResult<I> {
        debug!("init {}", self.config.panel.name);
        self.initialized = false;

        let mut sequencer = Sequencer::new(&self.config);
        let result = sequencer.run(&mut self.interface, delay);
        self.state = sequencer.state();
        result.map_err(Error::Interface)?;

        self.initialized = true;
        debug!("init {} done", self.config.panel.name);
        Ok(())
    }

    /// Blank the gate lines the panel has beyond the bitmap
    ///
    /// Writes `rows * 3` bytes taken from `blank` to the column just past
    /// the address window. Does nothing for panels without unused lines.
    ///
    /// # Errors
    ///
    /// Returns `Error::BufferTooSmall` if `blank` is shorter than required.
    pub fn clear_unused_lines(&mut self, blank: &[u8]) -> DisplayResult<I> {
        let Some(column) = self.config.panel.unused_column else {
            return Ok(());
        };
        self.ensure_initialized()?;

        let required = self.config.window.rows() as usize * 3;
        if blank.len() < required {
            return Err(Error::BufferTooSmall {
                required,
                provided: blank.len(),
            });
        }

        debug!("clearing unused lines at column {column:#04x}");
        self.send_command(COLUMN_ADDRESS_SET, &[column, column])?;
        let raset = self.raset;
        self.send_command(ROW_ADDRESS_SET, &raset)?;
        self.send_command(MEMORY_WRITE, &blank[..required])
    }

    /// Write a packed frame to the full address window
    ///
    /// Sends column address set and row address set with the cached window
    /// bytes, then the memory write with the packed frame as payload.
    ///
    /// # Errors
    ///
    /// Returns `Error::NotInitialized` before a successful [`init()`](Self::init)
    /// and `Error::BufferTooSmall` if `packed` is shorter than the packed size.
    pub fn write_frame(&mut self, packed: &[u8]) -> DisplayResult<I> {
        self.ensure_initialized()?;

        let required = self.config.dimensions.packed_size();
        if packed.len() < required {
            return Err(Error::BufferTooSmall {
                required,
                provided: packed.len(),
            });
        }

        trace!("frame {} bytes", required);
        let (caset, raset) = (self.caset, self.raset);
        self.send_command(COLUMN_ADDRESS_SET, &caset)?;
        self.send_command(ROW_ADDRESS_SET, &raset)?;
        self.send_command(MEMORY_WRITE, &packed[..required])
    }

    /// Wait for the tearing effect line before a frame write
    pub fn wait_for_frame<D: DelayNs>(&mut self, delay: &mut D) -> DisplayResult<I> {
        self.interface.wait_for_frame(delay).map_err(Error::Interface)
    }

    /// Send a command to the display controller
    fn send_command(&mut self, opcode: u8, payload: &[u8]) -> DisplayResult<I> {
        self.interface
            .send_command(opcode, payload)
            .map_err(Error::Interface)
    }

    fn ensure_initialized(&self) -> DisplayResult<I> {
        if self.initialized {
            Ok(())
        } else {
            Err(Error::NotInitialized)
        }
    }

    /// Get display dimensions
    pub fn dimensions(&self) -> &Dimensions {
        &self.config.dimensions
    }

    /// Get the address window used for frames
    pub fn window(&self) -> &AddressWindow {
        &self.config.window
    }

    /// Controller state reached by the init table
    pub fn state(&self) -> PowerState {
        self.state
    }

    /// Whether the init table completed
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Access the underlying configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Release the hardware interface
    pub fn release(self) -> I {
        self.interface
    }
}
