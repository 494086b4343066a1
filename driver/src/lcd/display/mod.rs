//! Character display handle.
//!
//! [CharacterDisplay] owns an [HD44780Driver] and keeps the controller configuration alongside it:
//! geometry, font, display control and entry mode flags, and the logical cursor. The controller
//! can't be read back through the expander, so this state is the only record of what was sent and
//! has to be kept in sync by every operation that moves the cursor.
//!
//! Operations update the stored state first and then write to the controller. If a transport write
//! fails, the error is returned and the rest of the operation is skipped, so the stored state may be
//! ahead of the controller until the next successful write of the same setting.

mod addressing;
mod init;

pub use addressing::*;
pub use init::*;

use crate::delay::Delay;
use crate::i2c::I2cTransport;
use crate::lcd::hd44780::driver::{HD44780Driver, Pcf8574HD44780Driver};
use crate::lcd::hd44780::{DisplayControl, EntryMode, Font, FunctionSet};
use crate::{LcdError, LcdResult};
use log::{debug, warn};

/// Clock speed the transport is configured with.
pub const I2C_CLOCK_HZ: u32 = 100_000;

#[derive(Debug)]
pub struct CharacterDisplay<D: HD44780Driver> {
    driver: D,
    geometry: Geometry,
    font: Font,
    control: DisplayControl,
    entry_mode: EntryMode,
    cursor: CursorPosition,
}

impl<'a> CharacterDisplay<Pcf8574HD44780Driver<'a>> {
    /// Sets up a display behind a PCF8574 backpack.
    ///
    /// All parameters are checked before the transport is touched. The transport is then
    /// initialized at [I2C_CLOCK_HZ]; its error is returned unchanged.
    /// Nothing is sent to the display, use [CharacterDisplay::reset_to_known_state] for that.
    ///
    /// # Errors
    /// - `LcdError::InvalidParameters` for a zero address or geometry.
    /// - `LcdError::UnsupportedGeometry` for more than 2 rows or 40 columns.
    pub fn initialize(
        transport: &'a mut dyn I2cTransport,
        delay: &'a mut dyn Delay,
        address: u8,
        columns: u8,
        rows: u8,
        font: Font,
    ) -> LcdResult<Self> {
        if address == 0 {
            // Reserved for general call
            return Err(LcdError::InvalidParameters("I2C address must not be zero"));
        }
        let geometry = Geometry::new(columns, rows)?;

        transport.init(I2C_CLOCK_HZ)?;

        let driver = Pcf8574HD44780Driver::new(transport, delay, address);
        debug!("{:?} initialized, {}x{} {:?}.", driver, columns, rows, font);
        Ok(Self::with_driver(driver, geometry, font))
    }
}

impl<D: HD44780Driver> CharacterDisplay<D> {
    /// Wraps an already set up driver.
    pub fn with_driver(driver: D, geometry: Geometry, font: Font) -> Self {
        CharacterDisplay {
            driver,
            geometry,
            font,
            control: DisplayControl::default(),
            entry_mode: EntryMode::default(),
            cursor: CursorPosition::default(),
        }
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    pub fn font(&self) -> Font {
        self.font
    }

    pub fn cursor(&self) -> CursorPosition {
        self.cursor
    }

    pub fn backlight(&self) -> bool {
        self.driver.backlight()
    }

    pub fn display_control(&self) -> DisplayControl {
        self.control
    }

    pub fn entry_mode(&self) -> EntryMode {
        self.entry_mode
    }

    pub fn set_backlight(&mut self, on: bool) -> LcdResult<()> {
        debug!("Backlight {}", if on { "on" } else { "off" });
        self.driver.set_backlight(on)
    }

    pub fn set_backlight_on(&mut self) -> LcdResult<()> {
        self.set_backlight(true)
    }

    pub fn set_backlight_off(&mut self) -> LcdResult<()> {
        self.set_backlight(false)
    }

    /// Stores and sends the display control flags.
    pub fn set_display_control(&mut self, control: DisplayControl) -> LcdResult<()> {
        self.control = control;
        self.driver.set_display_control(control)
    }

    /// Stores and sends the entry mode flags.
    pub fn set_display_mode(&mut self, mode: EntryMode) -> LcdResult<()> {
        self.entry_mode = mode;
        self.driver.set_entry_mode(mode)
    }

    /// Sends the function set flags. Not stored, they're only ever set by
    /// [CharacterDisplay::reset_to_known_state].
    pub fn set_function_options(&mut self, function: FunctionSet) -> LcdResult<()> {
        self.driver.function_set(function)
    }

    pub fn turn_display_on(&mut self) -> LcdResult<()> {
        self.update_control(|control| control.display_on = true)
    }

    pub fn turn_display_off(&mut self) -> LcdResult<()> {
        self.update_control(|control| control.display_on = false)
    }

    pub fn set_cursor_on(&mut self) -> LcdResult<()> {
        self.update_control(|control| control.cursor_on = true)
    }

    pub fn set_cursor_off(&mut self) -> LcdResult<()> {
        self.update_control(|control| control.cursor_on = false)
    }

    pub fn set_blink_on(&mut self) -> LcdResult<()> {
        self.update_control(|control| control.blink_on = true)
    }

    pub fn set_blink_off(&mut self) -> LcdResult<()> {
        self.update_control(|control| control.blink_on = false)
    }

    fn update_control(&mut self, f: impl FnOnce(&mut DisplayControl)) -> LcdResult<()> {
        let mut control = self.control;
        f(&mut control);
        self.set_display_control(control)
    }

    /// Sets whether text flows left to right (`true`) or right to left (`false`).
    pub fn set_text_flow(&mut self, left_to_right: bool) -> LcdResult<()> {
        let mut mode = self.entry_mode;
        mode.left_to_right = left_to_right;
        self.set_display_mode(mode)
    }

    /// Clears the display. The controller also moves its cursor home, but the logical cursor is
    /// left as is; call [CharacterDisplay::set_cursor_home] to sync both.
    pub fn clear(&mut self) -> LcdResult<()> {
        self.driver.clear_display()
    }

    pub fn set_cursor_home(&mut self) -> LcdResult<()> {
        self.cursor = CursorPosition::default();
        self.driver.return_home()
    }

    /// Moves the cursor. Out of range positions are clamped to the last column or row.
    pub fn set_cursor_position(&mut self, column: u8, row: u8) -> LcdResult<()> {
        let position = self.geometry.clamp(column, row);
        if position.column != column || position.row != row {
            warn!(
                "Cursor position ({}, {}) out of range, clamped to ({}, {})",
                column, row, position.column, position.row
            );
        }
        self.cursor = position;
        self.driver.set_ddram_address(ddram_address(position)?)
    }

    /// Prints a single character at the cursor and advances it.
    ///
    /// `'\n'` moves to the start of the next row without printing anything. A character printed
    /// after the last column wraps to the start of the next row first. Rows wrap back to the first.
    /// Characters outside ASCII are printed as `?`.
    pub fn print_char(&mut self, c: char) -> LcdResult<()> {
        if c == '\n' {
            return self.set_cursor_position(0, self.geometry.next_row(self.cursor.row));
        }
        if self.cursor.column >= self.geometry.columns() {
            self.set_cursor_position(0, self.geometry.next_row(self.cursor.row))?;
        }

        let byte = if c.is_ascii() {
            c as u8
        } else {
            warn!("Non-ASCII character: {}", c);
            b'?'
        };
        self.driver.send_data(byte)?;
        self.cursor.column += 1;
        Ok(())
    }

    pub fn print_str(&mut self, s: &str) -> LcdResult<()> {
        for c in s.chars() {
            self.print_char(c)?;
        }
        Ok(())
    }
}
