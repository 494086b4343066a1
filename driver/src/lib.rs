pub mod delay;
pub mod i2c;
pub mod lcd;

use thiserror::Error;

#[derive(Debug, Error, Eq, PartialEq, Clone)]
pub enum LcdError {
    #[error("invalid parameters: {0}")]
    InvalidParameters(&'static str),
    #[error("unsupported display geometry: {columns}x{rows}")]
    UnsupportedGeometry { columns: u8, rows: u8 },
    #[error("invalid argument")]
    InvalidArgument,
    #[error("transport not initialized")]
    NotInitialized,
    #[error("I2C start condition failed")]
    StartConditionFailed,
    #[error("I2C data transmit failed")]
    DataTransmitFailed,
    #[error("I2C error: {0}")]
    I2c(String),
    #[error("IO error: {0}")]
    Io(std::io::ErrorKind),
}

impl From<std::io::Error> for LcdError {
    fn from(err: std::io::Error) -> Self {
        LcdError::Io(err.kind())
    }
}

impl From<rppal::i2c::Error> for LcdError {
    fn from(err: rppal::i2c::Error) -> Self {
        match err {
            rppal::i2c::Error::Io(err) => LcdError::Io(err.kind()),
            other => LcdError::I2c(other.to_string()),
        }
    }
}

pub type LcdResult<T> = Result<T, LcdError>;
