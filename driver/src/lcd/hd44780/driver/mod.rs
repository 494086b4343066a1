mod pcf8574;

use crate::lcd::hd44780::{
    CLEAR_DISPLAY, DDRAM_ADDRESS_MAX, DISPLAY_CONTROL, DisplayControl, ENTRY_MODE_SET, EntryMode,
    FUNCTION_SET, FunctionSet, RETURN_HOME, SET_DDRAM_ADDRESS, SendingMode,
};
use crate::{LcdError, LcdResult};
use log::debug;
pub use pcf8574::*;
use std::fmt::Debug;

/// Time the controller needs to execute a clear or return home command.
pub const SLOW_COMMAND_MS: u32 = 2;

pub trait HD44780Driver: Debug {
    // Low-level operations
    // These are implemented by the driver implementation, everything else is built on top of them.

    /// Latches a single nibble (the low 4 bits of `nibble`) into the controller.
    fn write_nibble(&mut self, nibble: u8, mode: SendingMode) -> LcdResult<()>;

    /// Switches the backlight on or off, effective immediately.
    fn set_backlight(&mut self, on: bool) -> LcdResult<()>;

    /// Gets whether the backlight is on.
    fn backlight(&self) -> bool;

    /// Blocks for at least `ms` milliseconds.
    fn wait_ms(&mut self, ms: u32);

    /// Blocks for at least `us` microseconds.
    fn wait_us(&mut self, us: u32);

    /// Sends a full byte as two nibbles, high nibble first.
    fn send_byte(&mut self, value: u8, mode: SendingMode) -> LcdResult<()> {
        self.write_nibble(value >> 4, mode)?;
        self.write_nibble(value & 0x0F, mode)
    }

    /// Sends a command to the HD44780 controller.
    /// Sets the RS line to 0 (command).
    fn send_command(&mut self, command: u8) -> LcdResult<()> {
        debug!("Sending command: {:08b}", command);
        self.send_byte(command, SendingMode::Command)
    }

    /// Sends data to the HD44780 controller.
    /// Sets the RS line to 1 (data).
    fn send_data(&mut self, data: u8) -> LcdResult<()> {
        debug!("Sending data: {:08b}", data);
        self.send_byte(data, SendingMode::Data)
    }

    /// Clears the display and sets the cursor to the home position.
    fn clear_display(&mut self) -> LcdResult<()> {
        self.send_command(CLEAR_DISPLAY)?;
        self.wait_ms(SLOW_COMMAND_MS);
        Ok(())
    }

    /// Sets the cursor to the home position.
    fn return_home(&mut self) -> LcdResult<()> {
        self.send_command(RETURN_HOME)?;
        self.wait_ms(SLOW_COMMAND_MS);
        Ok(())
    }

    /// Sets the display to the specified entry mode.
    fn set_entry_mode(&mut self, mode: EntryMode) -> LcdResult<()> {
        self.send_command(ENTRY_MODE_SET | mode.bits())
    }

    /// Sets the display on/off, cursor on/off, and blinking on/off.
    fn set_display_control(&mut self, control: DisplayControl) -> LcdResult<()> {
        self.send_command(DISPLAY_CONTROL | control.bits())
    }

    /// Sets the function set.
    fn function_set(&mut self, function: FunctionSet) -> LcdResult<()> {
        self.send_command(FUNCTION_SET | function.bits())
    }

    /// Sets the DDRAM address.
    fn set_ddram_address(&mut self, address: u8) -> LcdResult<()> {
        if address > DDRAM_ADDRESS_MAX {
            return Err(LcdError::InvalidArgument);
        }
        self.send_command(SET_DDRAM_ADDRESS | address)
    }
}
