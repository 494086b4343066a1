use crate::i2c::I2cTransport;
use crate::{LcdError, LcdResult};
use log::trace;

/// A completed start..stop transaction.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Transaction {
    pub address: u8,
    pub bytes: Vec<u8>,
}

/// In-memory transport that logs and records everything written to it.
///
/// Useful for running without hardware and for tests. Failures can be injected with
/// [RecordingTransport::fail_start_at] and [RecordingTransport::fail_write_at].
#[derive(Debug, Default)]
pub struct RecordingTransport {
    clock_speed_hz: Option<u32>,
    address: u8,
    open: Option<Vec<u8>>,
    transactions: Vec<Transaction>,
    without_history: bool,
    starts: usize,
    writes: usize,
    fail_start_at: Option<usize>,
    fail_write_at: Option<usize>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Only logs the bytes, without keeping them around.
    pub fn without_history() -> Self {
        RecordingTransport {
            without_history: true,
            ..Self::default()
        }
    }

    /// Makes the `n`-th start condition (0-based) fail.
    pub fn fail_start_at(mut self, n: usize) -> Self {
        self.fail_start_at = Some(n);
        self
    }

    /// Makes the `n`-th byte write (0-based) fail.
    pub fn fail_write_at(mut self, n: usize) -> Self {
        self.fail_write_at = Some(n);
        self
    }

    /// The clock speed passed to [I2cTransport::init], if it was called.
    pub fn clock_speed(&self) -> Option<u32> {
        self.clock_speed_hz
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// All bytes of all completed transactions, in order.
    pub fn written_bytes(&self) -> Vec<u8> {
        self.transactions
            .iter()
            .flat_map(|t| t.bytes.iter().copied())
            .collect()
    }

    pub fn clear(&mut self) {
        self.transactions.clear();
    }
}

impl I2cTransport for RecordingTransport {
    fn init(&mut self, clock_speed_hz: u32) -> LcdResult<()> {
        self.clock_speed_hz = Some(clock_speed_hz);
        Ok(())
    }

    fn set_slave_address(&mut self, address: u8) {
        self.address = address;
    }

    fn send_start(&mut self) -> LcdResult<()> {
        let n = self.starts;
        self.starts += 1;
        if self.fail_start_at == Some(n) {
            return Err(LcdError::StartConditionFailed);
        }
        self.open = Some(Vec::new());
        Ok(())
    }

    fn write(&mut self, byte: u8) -> LcdResult<()> {
        let n = self.writes;
        self.writes += 1;
        if self.fail_write_at == Some(n) {
            return Err(LcdError::DataTransmitFailed);
        }
        let Some(open) = self.open.as_mut() else {
            return Err(LcdError::DataTransmitFailed);
        };
        trace!("[{:#04x}] {:08b}", self.address, byte);
        open.push(byte);
        Ok(())
    }

    fn send_stop(&mut self) {
        if let Some(bytes) = self.open.take() {
            if !self.without_history {
                self.transactions.push(Transaction {
                    address: self.address,
                    bytes,
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_transactions() {
        let mut transport = RecordingTransport::new();
        transport.init(100_000).unwrap();
        transport.set_slave_address(0x27);
        transport.send_start().unwrap();
        transport.write(0x08).unwrap();
        transport.send_stop();

        assert_eq!(transport.clock_speed(), Some(100_000));
        assert_eq!(
            transport.transactions(),
            &[Transaction { address: 0x27, bytes: vec![0x08] }]
        );
    }

    #[test]
    fn test_write_outside_transaction_fails() {
        let mut transport = RecordingTransport::new();
        assert_eq!(transport.write(0x00), Err(LcdError::DataTransmitFailed));
    }

    #[test]
    fn test_injected_failures() {
        let mut transport = RecordingTransport::new().fail_start_at(1).fail_write_at(0);
        transport.send_start().unwrap();
        assert_eq!(transport.write(0x01), Err(LcdError::DataTransmitFailed));
        transport.send_stop();
        assert_eq!(transport.send_start(), Err(LcdError::StartConditionFailed));
        assert_eq!(transport.transactions().len(), 1);
        assert!(transport.transactions()[0].bytes.is_empty());
    }

    #[test]
    fn test_without_history_keeps_nothing() {
        let mut transport = RecordingTransport::without_history();
        transport.send_start().unwrap();
        transport.write(0xFF).unwrap();
        transport.send_stop();
        assert!(transport.transactions().is_empty());
    }
}
