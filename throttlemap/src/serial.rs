use ufmt::uWrite;

/// Byte-level serial transport.
///
/// Output goes through [uWrite], so anything with a `uDisplay` can be
/// written to the port with `uwrite!` and `uwriteln!`.
pub trait SerialPort: uWrite {
    /// Reads one byte, if one has been received.
    ///
    /// This must never block.
    fn read_byte(&mut self) -> Option<u8>;
}

#[cfg(test)]
pub use test::TestSerial;
