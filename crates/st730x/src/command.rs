// ST7302 / ST7305 command definitions

// Standard MIPI-style commands shared by both controllers
pub const SLEEP_OUT: u8 = 0x11; // Sleep out
pub const DISPLAY_ON: u8 = 0x29; // Display on
pub const COLUMN_ADDRESS_SET: u8 = 0x2A; // Column address set (CASET)
pub const ROW_ADDRESS_SET: u8 = 0x2B; // Row address set (RASET)
pub const MEMORY_WRITE: u8 = 0x2C; // Memory write (RAMWR)
pub const TEARING_EFFECT_ON: u8 = 0x35; // Tearing effect line on
pub const MEMORY_ACCESS_CONTROL: u8 = 0x36; // Memory data access control (MADCTL)
pub const HIGH_POWER_MODE: u8 = 0x38; // High power mode (HPM)
pub const LOW_POWER_MODE: u8 = 0x39; // Low power mode (LPM)
pub const DATA_FORMAT_SELECT: u8 = 0x3A; // Data format select

// Timing and panel settings
pub const GATE_TIMING_CONTROL: u8 = 0x62; // Gate timing control (ST7305)
pub const GATE_LINE_SETTING: u8 = 0xB0; // Gate line / duty setting
pub const FRAME_RATE_CONTROL: u8 = 0xB2; // Frame rate control
pub const GATE_EQ_HPM: u8 = 0xB3; // Update period gate EQ control in HPM (ST7305)
pub const GATE_EQ: u8 = 0xB4; // Gate EQ (ST7302: HPM+LPM) / LPM gate EQ (ST7305)
pub const SOURCE_EQ_ENABLE: u8 = 0xB7; // Source EQ enable
pub const PANEL_SETTING: u8 = 0xB8; // Panel setting (inversion, interlace)
pub const GAMMA_MODE: u8 = 0xB9; // Gamma mode (mono / 4GS)

// Voltage settings
pub const GATE_VOLTAGE: u8 = 0xC0; // VGH / VGL
pub const VSHP_SETTING: u8 = 0xC1; // VSH (ST7302) / VSHP (ST7305)
pub const VSLP_SETTING: u8 = 0xC2; // VSL (ST7302) / VSLP (ST7305)
pub const VSHN_SETTING: u8 = 0xC4; // VSHN
pub const VSLN_SETTING: u8 = 0xC5; // VSLN
pub const SOURCE_VOLTAGE_SELECT: u8 = 0xC9; // Source voltage select
pub const VCOMH_SETTING: u8 = 0xCB; // VCOMH

// Power and NVM
pub const AUTO_POWER_DOWN: u8 = 0xD0; // Auto power down
pub const BOOSTER_ENABLE: u8 = 0xD1; // Booster enable
pub const NVM_LOAD_CONTROL: u8 = 0xD6; // NVM load control (ST7305)
pub const OTP_LOAD_CONTROL: u8 = 0xD7; // OTP load control (ST7302)
pub const ENABLE_OTP: u8 = 0xEB; // Enable OTP (ST7302)
