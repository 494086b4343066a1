use crate::delay::Delay;
use crate::i2c::I2cTransport;
use crate::lcd::hd44780::SendingMode;
use crate::lcd::hd44780::driver::HD44780Driver;
use crate::LcdResult;
use log::trace;
use std::fmt::{Debug, Formatter};

/// PCF8574 output line driving the controller's RS input.
pub const PIN_RS: u8 = 0b00000001;
/// PCF8574 output line driving the controller's E input.
pub const PIN_ENABLE: u8 = 0b00000100;
/// PCF8574 output line switching the backlight transistor.
pub const PIN_BACKLIGHT: u8 = 0b00001000;

/// Enable pulse width. The controller needs more than 450 ns.
pub const ENABLE_PULSE_US: u32 = 1;
/// Wait after the falling edge of E, the controller executes most commands within 37 µs.
pub const COMMAND_SETTLE_US: u32 = 50;

/// State of the expander lines that are not part of a transfer, but still have to be present in
/// every byte written to it.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct OutputLineState {
    pub backlight: bool,
}

impl OutputLineState {
    /// Combines the payload with the persistent lines.
    pub fn apply(self, payload: u8) -> u8 {
        if self.backlight {
            payload | PIN_BACKLIGHT
        } else {
            payload & !PIN_BACKLIGHT
        }
    }
}

impl Default for OutputLineState {
    fn default() -> Self {
        OutputLineState { backlight: true }
    }
}

/// HD44780 driver for the common I2C backpacks built around a PCF8574 port expander.
///
/// The controller runs in 4-bit mode with D4–D7 on the upper nibble of the expander, RS, E and the
/// backlight on the lower one. RW is tied low, so the controller can't be read back.
pub struct Pcf8574HD44780Driver<'a> {
    transport: &'a mut dyn I2cTransport,
    delay: &'a mut dyn Delay,
    address: u8,
    lines: OutputLineState,
}

impl<'a> Pcf8574HD44780Driver<'a> {
    pub fn new(transport: &'a mut dyn I2cTransport, delay: &'a mut dyn Delay, address: u8) -> Self {
        Pcf8574HD44780Driver {
            transport,
            delay,
            address,
            lines: OutputLineState::default(),
        }
    }

    pub fn address(&self) -> u8 {
        self.address
    }

    pub fn lines(&self) -> OutputLineState {
        self.lines
    }

    /// Puts the nibble on D4–D7 and the mode on RS.
    pub fn frame(nibble: u8, mode: SendingMode) -> u8 {
        ((nibble & 0x0F) << 4) | mode.bit()
    }

    /// Writes a single byte to the expander, with the backlight line set from the current state.
    ///
    /// A failed start or write aborts the transfer and returns the error.
    pub fn write_raw(&mut self, payload: u8) -> LcdResult<()> {
        let byte = self.lines.apply(payload);
        trace!("Writing expander byte: {:08b}", byte);

        self.transport.set_slave_address(self.address);
        self.transport.send_start()?;
        if let Err(err) = self.transport.write(byte) {
            self.transport.send_stop();
            return Err(err);
        }
        self.transport.send_stop();
        Ok(())
    }

    fn pulse_enable(&mut self, frame: u8) -> LcdResult<()> {
        // Set E high
        self.write_raw(frame | PIN_ENABLE)?;
        self.delay.wait_us(ENABLE_PULSE_US);
        // Set E low, the controller latches on the falling edge
        self.write_raw(frame & !PIN_ENABLE)?;
        self.delay.wait_us(COMMAND_SETTLE_US);
        Ok(())
    }
}

impl Debug for Pcf8574HD44780Driver<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Pcf8574HD44780Driver({:?}@{:#04x})", self.transport, self.address)
    }
}

impl HD44780Driver for Pcf8574HD44780Driver<'_> {
    fn write_nibble(&mut self, nibble: u8, mode: SendingMode) -> LcdResult<()> {
        trace!("Writing nibble: {:04b}, mode: {:?}", nibble & 0x0F, mode);
        let frame = Self::frame(nibble, mode);
        self.write_raw(frame)?;
        self.pulse_enable(frame)
    }

    fn set_backlight(&mut self, on: bool) -> LcdResult<()> {
        self.lines.backlight = on;
        self.write_raw(0)
    }

    fn backlight(&self) -> bool {
        self.lines.backlight
    }

    fn wait_ms(&mut self, ms: u32) {
        self.delay.wait_ms(ms);
    }

    fn wait_us(&mut self, us: u32) {
        self.delay.wait_us(us);
    }
}
