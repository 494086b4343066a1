use crate::i2c::I2cTransport;
use crate::{LcdError, LcdResult};
use log::{debug, trace, warn};
use rppal::i2c::I2c;
use std::fmt::{Debug, Formatter};

/// I2C transport over the Linux `i2cdev` interface (`/dev/i2c-N`).
///
/// The kernel frames every write with its own start and stop condition, so [I2cTransport::send_start]
/// and [I2cTransport::send_stop] only track whether a transaction is open.
pub struct RppalI2c {
    bus: u8,
    i2c: Option<I2c>,
    address: u8,
    bound_address: Option<u8>,
    in_transaction: bool,
}

impl RppalI2c {
    pub fn new(bus: u8) -> Self {
        RppalI2c {
            bus,
            i2c: None,
            address: 0,
            bound_address: None,
            in_transaction: false,
        }
    }

    fn i2c(&mut self) -> LcdResult<&mut I2c> {
        self.i2c.as_mut().ok_or(LcdError::NotInitialized)
    }
}

impl Debug for RppalI2c {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "RppalI2c(/dev/i2c-{}@{:#04x})", self.bus, self.address)
    }
}

impl I2cTransport for RppalI2c {
    fn init(&mut self, clock_speed_hz: u32) -> LcdResult<()> {
        let i2c = I2c::with_bus(self.bus)?;

        match i2c.clock_speed() {
            Ok(actual) if actual != clock_speed_hz => {
                // The bus clock is fixed by the device tree, it can't be changed from here.
                warn!(
                    "I2C bus {} runs at {} Hz, requested {} Hz",
                    self.bus, actual, clock_speed_hz
                );
            }
            Ok(_) => {}
            Err(err) => debug!("Could not read I2C bus {} clock speed: {}", self.bus, err),
        }

        self.i2c = Some(i2c);
        debug!("{:?} initialized.", self);
        Ok(())
    }

    fn set_slave_address(&mut self, address: u8) {
        self.address = address;
    }

    fn send_start(&mut self) -> LcdResult<()> {
        let address = self.address;
        let bound = self.bound_address;
        let i2c = self.i2c.as_mut().ok_or(LcdError::StartConditionFailed)?;
        // The ioctl only has to be repeated when the target changes
        if bound != Some(address) {
            i2c.set_slave_address(address as u16).map_err(|err| {
                warn!("Could not set I2C slave address {:#04x}: {}", address, err);
                LcdError::StartConditionFailed
            })?;
            self.bound_address = Some(address);
        }
        self.in_transaction = true;
        Ok(())
    }

    fn write(&mut self, byte: u8) -> LcdResult<()> {
        if !self.in_transaction {
            return Err(LcdError::DataTransmitFailed);
        }
        trace!("Writing byte: {:08b}", byte);
        match self.i2c()?.write(&[byte]) {
            Ok(1) => Ok(()),
            Ok(_) => Err(LcdError::DataTransmitFailed),
            Err(err) => {
                debug!("I2C write failed: {}", err);
                Err(LcdError::DataTransmitFailed)
            }
        }
    }

    fn send_stop(&mut self) {
        self.in_transaction = false;
    }
}
