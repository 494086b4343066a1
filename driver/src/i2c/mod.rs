//! I2C transport used to reach the port expander.
//!
//! The display driver only ever needs single-byte writes framed by a start and stop condition, so
//! that's all a backend has to provide. See [RppalI2c] for the Linux backend and [RecordingTransport]
//! for an in-memory one.

mod recording;
mod linux;

pub use recording::*;
pub use linux::*;

use crate::LcdResult;
use std::fmt::Debug;

pub trait I2cTransport: Debug {
    /// Prepares the bus for use at the given clock speed.
    /// Must be called once before any other method.
    fn init(&mut self, clock_speed_hz: u32) -> LcdResult<()>;

    /// Sets the 7-bit address of the device targeted by the next transaction.
    fn set_slave_address(&mut self, address: u8);

    /// Starts a transaction with the current slave.
    ///
    /// # Errors
    /// - `LcdError::StartConditionFailed` if the bus could not be acquired.
    fn send_start(&mut self) -> LcdResult<()>;

    /// Writes a single byte within the current transaction.
    ///
    /// # Errors
    /// - `LcdError::DataTransmitFailed` if the byte was not acknowledged.
    fn write(&mut self, byte: u8) -> LcdResult<()>;

    /// Ends the current transaction.
    fn send_stop(&mut self);
}
