//! HD44780 command set.
//!
//! Commands are single bytes, an opcode in the highest set bit plus option flags below it. The
//! option flags are modelled as small `Copy` structs so the stored state can be changed one flag at
//! a time and re-sent in full, as the controller has no partial update.

pub mod driver;

use crate::{LcdError, LcdResult};
use std::str::FromStr;

pub const CLEAR_DISPLAY: u8 = 0b00000001;
pub const RETURN_HOME: u8 = 0b00000010;
pub const ENTRY_MODE_SET: u8 = 0b00000100;
pub const DISPLAY_CONTROL: u8 = 0b00001000;
pub const FUNCTION_SET: u8 = 0b00100000;
pub const SET_DDRAM_ADDRESS: u8 = 0b10000000;

/// Highest valid DDRAM address.
pub const DDRAM_ADDRESS_MAX: u8 = 0b01111111;

/// Function set nibble sent three times to force 8-bit mode.
pub const FOUR_BIT_HANDSHAKE_A: u8 = 0x3;
/// Function set nibble switching the interface to 4-bit mode.
pub const FOUR_BIT_HANDSHAKE_B: u8 = 0x2;

/// Whether a byte goes to the instruction or the data register (the RS line).
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SendingMode {
    Command,
    Data,
}

impl SendingMode {
    /// The RS bit for this mode.
    pub fn bit(self) -> u8 {
        match self {
            SendingMode::Command => 0,
            SendingMode::Data => 1,
        }
    }
}

/// Character font. Only honored by single-line displays.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum Font {
    #[default]
    Dots5x8,
    Dots5x10,
}

impl Font {
    pub fn code(self) -> u8 {
        match self {
            Font::Dots5x8 => 0x00,
            Font::Dots5x10 => 0x01,
        }
    }
}

impl TryFrom<u8> for Font {
    type Error = LcdError;

    fn try_from(code: u8) -> LcdResult<Self> {
        match code {
            0x00 => Ok(Font::Dots5x8),
            0x01 => Ok(Font::Dots5x10),
            _ => Err(LcdError::InvalidParameters("unrecognized font")),
        }
    }
}

impl FromStr for Font {
    type Err = LcdError;

    fn from_str(s: &str) -> LcdResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "5x8" => Ok(Font::Dots5x8),
            "5x10" => Ok(Font::Dots5x10),
            other => match other.strip_prefix("0x").map(|hex| u8::from_str_radix(hex, 16)) {
                Some(Ok(code)) => Font::try_from(code),
                _ => Err(LcdError::InvalidParameters("unrecognized font")),
            },
        }
    }
}

/// Display on/off control options.
///
/// Command: `00001DCB`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub struct DisplayControl {
    /// `D`, the display itself. Turning it off keeps the DDRAM contents.
    pub display_on: bool,
    /// `C`, the underline cursor.
    pub cursor_on: bool,
    /// `B`, the blinking block cursor.
    pub blink_on: bool,
}

impl DisplayControl {
    pub fn bits(self) -> u8 {
        let mut bits = 0;
        if self.display_on {
            bits |= 0b100;
        }
        if self.cursor_on {
            bits |= 0b010;
        }
        if self.blink_on {
            bits |= 0b001;
        }
        bits
    }

    pub fn from_bits(bits: u8) -> Self {
        DisplayControl {
            display_on: bits & 0b100 != 0,
            cursor_on: bits & 0b010 != 0,
            blink_on: bits & 0b001 != 0,
        }
    }
}

/// Entry mode options.
///
/// Command: `000001IS`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub struct EntryMode {
    /// `I`, the address counter increments (text flows left to right) when set.
    pub left_to_right: bool,
    /// `S`, the whole display shifts on every write.
    pub shift: bool,
}

impl EntryMode {
    pub fn bits(self) -> u8 {
        let mut bits = 0;
        if self.left_to_right {
            bits |= 0b10;
        }
        if self.shift {
            bits |= 0b01;
        }
        bits
    }

    pub fn from_bits(bits: u8) -> Self {
        EntryMode {
            left_to_right: bits & 0b10 != 0,
            shift: bits & 0b01 != 0,
        }
    }
}

/// Function set options.
///
/// Command: `001DNF??`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub struct FunctionSet {
    /// `D`, 8-bit interface when set, 4-bit otherwise.
    pub eight_bit: bool,
    /// `N`, two display lines when set.
    pub two_lines: bool,
    /// `F`, 5x10 dots font when set.
    pub tall_font: bool,
}

impl FunctionSet {
    /// Function set for a 4-bit interface with the given geometry.
    ///
    /// Multi-line displays always get the 5x8 font, the 5x10 font only works on a single line.
    pub fn for_geometry(rows: u8, font: Font) -> Self {
        FunctionSet {
            eight_bit: false,
            two_lines: rows > 1,
            tall_font: font == Font::Dots5x10 && rows == 1,
        }
    }

    pub fn bits(self) -> u8 {
        let mut bits = 0;
        if self.eight_bit {
            bits |= 0b10000;
        }
        if self.two_lines {
            bits |= 0b01000;
        }
        if self.tall_font {
            bits |= 0b00100;
        }
        bits
    }

    pub fn from_bits(bits: u8) -> Self {
        FunctionSet {
            eight_bit: bits & 0b10000 != 0,
            two_lines: bits & 0b01000 != 0,
            tall_font: bits & 0b00100 != 0,
        }
    }
}
