//! Panel descriptions
//!
//! Each supported panel is a [`Panel`] constant: geometry, address window,
//! reset timing and the ordered init command table. Both controllers share
//! the protocol shape, so adding a panel means adding a constant here, not
//! new driver code.

use crate::command::*;
use crate::config::{AddressWindow, ResetTiming};
use crate::sequence::Step;

/// Static description of a panel variant
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Panel {
    /// Human readable name, used in log output
    pub name: &'static str,
    /// Bitmap width in pixels
    pub width: u16,
    /// Bitmap height in pixels
    pub height: u16,
    /// Address window covering the active area
    pub window: AddressWindow,
    /// Hardware reset pulse timing
    pub reset: ResetTiming,
    /// Init command table, executed top to bottom after reset
    pub init: &'static [Step],
    /// Column address just past the window whose gate lines are physically
    /// present but unused; blanked once after init
    pub unused_column: Option<u8>,
}

/// Known panel models
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Model {
    /// ST7302, 2.13" 250x122 (bottom 2 lines unused)
    St7302,
    /// ST7305, 2.9" 384x168
    St7305,
}

impl Model {
    /// Panel description for this model
    pub fn panel(self) -> &'static Panel {
        match self {
            Model::St7302 => &ST7302_213,
            Model::St7305 => &ST7305_290,
        }
    }
}

const RESET_TIMING: ResetTiming = ResetTiming {
    settle_ms: 50,
    low_ms: 100,
    high_ms: 50,
};

/// ST7302 2.13" panel, 250x120 active pixels
pub const ST7302_213: Panel = Panel {
    name: "ST7302 2.13in",
    width: 250,
    height: 120,
    window: AddressWindow::new(0x19, 10, 0x00, 125),
    reset: RESET_TIMING,
    init: ST7302_INIT,
    unused_column: Some(0x19 + 10),
};

/// ST7305 2.9" panel, 384x168 active pixels
pub const ST7305_290: Panel = Panel {
    name: "ST7305 2.9in",
    width: 384,
    height: 168,
    window: AddressWindow::new(0x17, 14, 0x00, 192),
    reset: RESET_TIMING,
    init: ST7305_INIT,
    unused_column: None,
};

const ST7302_INIT: &[Step] = &[
    Step::Command(ENABLE_OTP, &[0x02]),
    Step::Command(OTP_LOAD_CONTROL, &[0x68]),
    // VGH=12V, VGL=-5V
    Step::Command(GATE_VOLTAGE, &[0x80]),
    Step::Command(VSHP_SETTING, &[0x28, 0x28, 0x28, 0x28, 0x14, 0x00]),
    // VSL=0
    Step::Command(VSLP_SETTING, &[0x00, 0x00, 0x00, 0x00]),
    Step::Command(VCOMH_SETTING, &[0x14]),
    // HPM EQ, LPM EQ
    Step::Command(
        GATE_EQ,
        &[0xA5, 0x66, 0x01, 0x00, 0x00, 0x40, 0x01, 0x00, 0x00, 0x40],
    ),
    Step::Command(SLEEP_OUT, &[]),
    Step::Delay(100),
    Step::Command(MEMORY_ACCESS_CONTROL, &[0x00]),
    // 3 writes for 24 bit
    Step::Command(DATA_FORMAT_SELECT, &[0x11]),
    // 250 duty
    Step::Command(GATE_LINE_SETTING, &[0x64]),
    // Frame inversion
    Step::Command(PANEL_SETTING, &[0x09]),
    // 32Hz HPM, 8Hz LPM
    Step::Command(FRAME_RATE_CONTROL, &[0x01, 0x05]),
    Step::Command(LOW_POWER_MODE, &[]),
    Step::Command(DISPLAY_ON, &[]),
    Step::Delay(100),
];

const ST7305_INIT: &[Step] = &[
    // Enable ID
    Step::Command(NVM_LOAD_CONTROL, &[0x13, 0x02]),
    Step::Command(BOOSTER_ENABLE, &[0x01]),
    // VGH 12V, VGL -5V
    Step::Command(GATE_VOLTAGE, &[0x08, 0x06]),
    // 4.8V
    Step::Command(VSHP_SETTING, &[0x3C, 0x3E, 0x3C, 0x3C]),
    // 0.98V
    Step::Command(VSLP_SETTING, &[0x23, 0x21, 0x23, 0x23]),
    // -3.6V
    Step::Command(VSHN_SETTING, &[0x5A, 0x5C, 0x5A, 0x5A]),
    // 0.22V
    Step::Command(VSLN_SETTING, &[0x37, 0x35, 0x37, 0x37]),
    Step::FrameRateControl(FRAME_RATE_CONTROL),
    Step::Command(
        GATE_EQ_HPM,
        &[0xE5, 0xF6, 0x17, 0x77, 0x77, 0x77, 0x77, 0x77, 0x77, 0x71],
    ),
    Step::Command(GATE_EQ, &[0x05, 0x46, 0x77, 0x77, 0x77, 0x77, 0x76, 0x45]),
    Step::Command(GATE_TIMING_CONTROL, &[0x32, 0x03, 0x1F]),
    Step::Command(SOURCE_EQ_ENABLE, &[0x13]),
    // 384 lines
    Step::Command(GATE_LINE_SETTING, &[0x60]),
    Step::Command(SLEEP_OUT, &[]),
    Step::Delay(100),
    // VSHP1, VSLP1, VSHN1, VSLN1
    Step::Command(SOURCE_VOLTAGE_SELECT, &[0x00]),
    Step::Command(MEMORY_ACCESS_CONTROL, &[0x00]),
    // 3 writes for 24 bit
    Step::Command(DATA_FORMAT_SELECT, &[0x11]),
    // Mono
    Step::Command(GAMMA_MODE, &[0x20]),
    // 1-dot inversion, frame inversion, one line interlace
    Step::Command(PANEL_SETTING, &[0x29]),
    Step::Command(COLUMN_ADDRESS_SET, &[0x17, 0x24]),
    Step::Command(ROW_ADDRESS_SET, &[0x00, 0xBF]),
    Step::Command(TEARING_EFFECT_ON, &[0x00]),
    Step::Command(AUTO_POWER_DOWN, &[0xFF]),
    Step::PowerMode,
    Step::Command(DISPLAY_ON, &[]),
    Step::Delay(100),
];
