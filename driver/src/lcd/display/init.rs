use crate::lcd::display::CharacterDisplay;
use crate::lcd::hd44780::driver::HD44780Driver;
use crate::lcd::hd44780::{
    DisplayControl, EntryMode, FOUR_BIT_HANDSHAKE_A, FOUR_BIT_HANDSHAKE_B, FunctionSet, SendingMode,
};
use crate::LcdResult;
use log::debug;

/// Wait for the supply to ramp up before talking to the controller.
pub const POWER_UP_MS: u32 = 50;
/// How long all expander lines are held low before the handshake.
pub const EXPANDER_RESET_MS: u32 = 1000;
/// Wait after each of the first two handshake nibbles.
pub const HANDSHAKE_LONG_US: u32 = 4500;
/// Wait after the third handshake nibble.
pub const HANDSHAKE_SHORT_US: u32 = 150;

/// Nibbles forcing the controller into 4-bit mode, each with the wait that follows it.
///
/// The controller may be in any state left by a previous session, even halfway through a 4-bit
/// transfer, so the 8-bit function set is sent three times until it is surely seen as a whole
/// command before switching to 4-bit.
pub const HANDSHAKE: [(u8, u32); 4] = [
    (FOUR_BIT_HANDSHAKE_A, HANDSHAKE_LONG_US),
    (FOUR_BIT_HANDSHAKE_A, HANDSHAKE_LONG_US),
    (FOUR_BIT_HANDSHAKE_A, HANDSHAKE_SHORT_US),
    (FOUR_BIT_HANDSHAKE_B, 0),
];

impl<D: HD44780Driver> CharacterDisplay<D> {
    /// Brings the controller from an unknown state into a known one.
    ///
    /// Afterwards the display is cleared and on, the backlight is on, cursor and blinking are off,
    /// text flows left to right and the cursor is home. Every step is always sent, the controller
    /// has no busy flag to check.
    pub fn reset_to_known_state(&mut self) -> LcdResult<()> {
        debug!("Resetting display to known state...");

        self.driver.wait_ms(POWER_UP_MS);
        // Pulls all lines low, backlight excluded
        self.driver.set_backlight(true)?;
        self.driver.wait_ms(EXPANDER_RESET_MS);

        for (nibble, wait_us) in HANDSHAKE {
            self.driver.write_nibble(nibble, SendingMode::Command)?;
            self.driver.wait_us(wait_us);
        }

        let function = FunctionSet::for_geometry(self.geometry.rows(), self.font);
        self.set_function_options(function)?;
        self.set_display_control(DisplayControl {
            display_on: true,
            cursor_on: false,
            blink_on: false,
        })?;
        self.clear()?;
        self.set_display_mode(EntryMode {
            left_to_right: true,
            shift: false,
        })?;
        self.set_cursor_home()?;

        debug!("Display reset.");
        Ok(())
    }
}
