//! Table-driven command sequencer
//!
//! Panel bring-up is expressed as an ordered slice of [`Step`]s. The
//! [`Sequencer`] pulses reset and then walks the table top to bottom, sending
//! every command through the [`DisplayInterface`] and honouring every delay
//! marker. The controller's [`PowerState`] advances as the table is executed.

use embedded_hal::delay::DelayNs;
use log::{debug, trace};

use crate::command::SLEEP_OUT;
use crate::config::{Config, FrameRate, ResetTiming};
use crate::interface::DisplayInterface;

/// One entry of a command table
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    /// Opcode followed by its payload
    ///
    /// An empty payload sends the opcode alone, with no data phase.
    Command(u8, &'static [u8]),
    /// Wait for the given number of milliseconds
    Delay(u32),
    /// Frame rate control opcode, payload taken from the configured [`FrameRate`]
    FrameRateControl(u8),
    /// Power mode opcode (HPM or LPM) taken from the configured [`FrameRate`],
    /// sent without payload
    PowerMode,
}

impl Step {
    /// Resolve the opcode and payload this step sends
    ///
    /// Returns `None` for delay markers.
    pub fn command(&self, frame_rate: FrameRate) -> Option<(u8, &'static [u8])> {
        match *self {
            Step::Command(opcode, payload) => Some((opcode, payload)),
            Step::Delay(_) => None,
            Step::FrameRateControl(opcode) => Some((opcode, frame_rate.control())),
            Step::PowerMode => Some((frame_rate.power_mode(), &[])),
        }
    }
}

/// Controller state while the init table runs
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PowerState {
    /// Before or during the hardware reset pulse
    #[default]
    Reset,
    /// Vendor register writes
    Configuring,
    /// Sleep out issued, waiting for the controller to settle
    SleepOut,
    /// Addressing and display-on phase; the panel accepts frames once the
    /// table has completed in this state
    DisplayOn,
}

impl PowerState {
    /// State after sending `opcode` in this state
    pub fn after(self, opcode: u8) -> Self {
        match (self, opcode) {
            (_, SLEEP_OUT) => PowerState::SleepOut,
            (PowerState::SleepOut, _) => PowerState::DisplayOn,
            (state, _) => state,
        }
    }
}

/// Runs a panel's reset pulse and init table
pub struct Sequencer<'a> {
    steps: &'a [Step],
    reset: ResetTiming,
    frame_rate: FrameRate,
    state: PowerState,
}

impl<'a> Sequencer<'a> {
    /// Create a sequencer for the panel described by `config`
    pub fn new(config: &'a Config) -> Self {
        Self {
            steps: config.panel.init,
            reset: config.panel.reset,
            frame_rate: config.frame_rate,
            state: PowerState::Reset,
        }
    }

    /// Current state
    pub fn state(&self) -> PowerState {
        self.state
    }

    /// Pulse reset and execute every step in order
    ///
    /// Stops at the first interface error; [`state()`](Self::state) then
    /// reports how far the sequence got.
    pub fn run<I, D>(&mut self, interface: &mut I, delay: &mut D) -> Result<(), I::Error>
    where
        I: DisplayInterface,
        D: DelayNs,
    {
        self.set_state(PowerState::Reset);
        interface.reset(delay, self.reset)?;
        self.set_state(PowerState::Configuring);

        for step in self.steps {
            match step.command(self.frame_rate) {
                Some((opcode, payload)) => {
                    trace!("command {opcode:#04x} ({} bytes)", payload.len());
                    interface.send_command(opcode, payload)?;
                    self.set_state(self.state.after(opcode));
                }
                None => {
                    if let Step::Delay(ms) = *step {
                        trace!("delay {ms}ms");
                        delay.delay_ms(ms);
                    }
                }
            }
        }

        Ok(())
    }

    fn set_state(&mut self, state: PowerState) {
        if state != self.state {
            debug!("power state {:?} -> {:?}", self.state, state);
            self.state = state;
        }
    }
}
