use ufmt_macros::uDebug;

use crate::timer::SoftTimer;
use crate::Milliseconds;

/// A complete line received from the serial link.
///
/// Carriage returns have already been normalised, so the line always ends
/// with a single line feed.
#[derive(Debug, Clone, PartialEq)]
pub struct Line<const N: usize> {
    bytes: heapless::Vec<u8, N>,
    high_priority: bool,
}
impl<const N: usize> Line<N> {
    /// Returns the bytes of the line, including its terminating line feed.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Checks whether the line must bypass the command queue.
    ///
    /// Only the quit command is high priority.
    pub fn is_high_priority(&self) -> bool {
        self.high_priority
    }
}

/// Reasons for dropping a partially-received line.
#[derive(Debug, uDebug, PartialEq, Clone, Copy)]
pub enum LineError {
    /// The line did not fit in the buffer.
    Overflow,
    /// Nothing was received for longer than the idle timeout.
    Timeout,
}

/// Accumulates serial bytes into lines without blocking.
///
/// # Type Parameters
///
/// - `N`: Capacity of the line buffer, including the line feed.
pub struct LineAssembler<const N: usize> {
    buffer: heapless::Vec<u8, N>,
    idle_timer: SoftTimer,
    discarding: bool,
}
impl<const N: usize> LineAssembler<N> {
    /// Creates a new line assembler.
    ///
    /// # Parameters
    ///
    /// - `idle_timeout`: How long a partial line may sit without a new byte
    ///   before it is dropped.
    pub fn new(idle_timeout: Milliseconds) -> Self {
        Self {
            buffer: heapless::Vec::new(),
            idle_timer: SoftTimer::new(idle_timeout),
            discarding: false,
        }
    }

    /// Feeds the assembler.
    ///
    /// This should be called with `None` when no byte is available, so that
    /// stale partial lines can be timed out.
    ///
    /// # Parameters
    ///
    /// - `byte`: The received byte, if any.
    /// - `now`: Current time.
    ///
    /// # Returns
    ///
    /// - `Ok(line)`: when `byte` completed a non-empty line.
    /// - `Err(nb::Error::WouldBlock)`: if no line is ready yet.
    /// - `Err(nb::Error::Other(error))`: if a partial line was dropped.
    pub fn poll(
        &mut self,
        byte: Option<u8>,
        now: Milliseconds,
    ) -> nb::Result<Line<N>, LineError> {
        let stale = self.idle_timer.expired(now);
        let byte = match byte {
            None if stale && !self.buffer.is_empty() => {
                self.reset();
                return Err(nb::Error::Other(LineError::Timeout));
            }
            None => return Err(nb::Error::WouldBlock),
            Some(byte) => byte,
        };

        if stale {
            self.reset();
        }
        self.idle_timer.start(now);

        let byte = if byte == b'\r' { b'\n' } else { byte };

        if self.discarding {
            if byte == b'\n' {
                self.discarding = false;
            }
            return Err(nb::Error::WouldBlock);
        }

        // Blank lines, including the second half of a CR LF pair.
        if byte == b'\n' && self.buffer.is_empty() {
            return Err(nb::Error::WouldBlock);
        }

        if self.buffer.push(byte).is_err() {
            self.reset();
            self.discarding = byte != b'\n';
            return Err(nb::Error::Other(LineError::Overflow));
        }

        if byte == b'\n' {
            let bytes = core::mem::take(&mut self.buffer);
            let high_priority = matches!(bytes.first(), Some(b'q' | b'Q'));
            Ok(Line {
                bytes,
                high_priority,
            })
        } else {
            Err(nb::Error::WouldBlock)
        }
    }

    fn reset(&mut self) {
        self.buffer.clear();
        self.discarding = false;
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use proptest::prelude::*;

    const TIMEOUT: Milliseconds = Milliseconds::new(1000);

    fn feed<const N: usize>(
        assembler: &mut LineAssembler<N>,
        input: &[u8],
        now: Milliseconds,
    ) -> Vec<nb::Result<Line<N>, LineError>> {
        input
            .iter()
            .map(|&byte| assembler.poll(Some(byte), now))
            .filter(|result| !matches!(result, Err(nb::Error::WouldBlock)))
            .collect()
    }

    #[test]
    fn test_simple_line() {
        let mut assembler = LineAssembler::<32>::new(TIMEOUT);
        let results =
            feed(&mut assembler, b"t 42 5000\n", Milliseconds::zero());
        assert_eq!(1, results.len());
        let line = results[0].clone().unwrap();
        assert_eq!(b"t 42 5000\n", line.as_bytes());
        assert!(!line.is_high_priority());
    }

    #[test]
    fn test_crlf_yields_one_line() {
        let mut assembler = LineAssembler::<32>::new(TIMEOUT);
        let results = feed(&mut assembler, b"r\r\nr\r\n", Milliseconds::zero());
        assert_eq!(2, results.len());
        assert_eq!(b"r\n", results[1].clone().unwrap().as_bytes());
    }

    #[test]
    fn test_quit_is_high_priority() {
        let mut assembler = LineAssembler::<32>::new(TIMEOUT);
        let results = feed(&mut assembler, b"Q\n", Milliseconds::zero());
        assert!(results[0].clone().unwrap().is_high_priority());
    }

    #[test]
    fn test_overflow_drops_whole_line() {
        let mut assembler = LineAssembler::<8>::new(TIMEOUT);
        let results =
            feed(&mut assembler, b"t 12345678 9\nr\n", Milliseconds::zero());
        assert_eq!(2, results.len());
        assert_eq!(Err(nb::Error::Other(LineError::Overflow)), results[0]);
        assert_eq!(b"r\n", results[1].clone().unwrap().as_bytes());
    }

    #[test]
    fn test_line_filling_buffer_exactly() {
        let mut assembler = LineAssembler::<4>::new(TIMEOUT);
        let results = feed(&mut assembler, b"w 5\n", Milliseconds::zero());
        assert_eq!(b"w 5\n", results[0].clone().unwrap().as_bytes());
    }

    #[test]
    fn test_timeout_drops_partial_line() {
        let mut assembler = LineAssembler::<32>::new(TIMEOUT);
        feed(&mut assembler, b"t 4", Milliseconds::new(100));

        assert_eq!(
            Err(nb::Error::WouldBlock),
            assembler.poll(None, Milliseconds::new(1099))
        );
        assert_eq!(
            Err(nb::Error::Other(LineError::Timeout)),
            assembler.poll(None, Milliseconds::new(1100))
        );

        let results = feed(&mut assembler, b"r\n", Milliseconds::new(1200));
        assert_eq!(b"r\n", results[0].clone().unwrap().as_bytes());
    }

    #[test]
    fn test_late_byte_starts_new_line() {
        let mut assembler = LineAssembler::<32>::new(TIMEOUT);
        feed(&mut assembler, b"t 4", Milliseconds::new(0));
        let results = feed(&mut assembler, b"r\n", Milliseconds::new(5000));
        assert_eq!(b"r\n", results[0].clone().unwrap().as_bytes());
    }

    #[test]
    fn test_idle_with_empty_buffer() {
        let mut assembler = LineAssembler::<32>::new(TIMEOUT);
        assert_eq!(
            Err(nb::Error::WouldBlock),
            assembler.poll(None, Milliseconds::new(50_000))
        );
    }

    proptest! {
        #[test]
        fn test_short_lines_pass_through(text in "[a-z0-9 -]{1,31}") {
            let mut assembler = LineAssembler::<32>::new(TIMEOUT);
            let mut input = text.clone().into_bytes();
            input.push(b'\r');
            let results = feed(&mut assembler, &input, Milliseconds::zero());

            let mut expected = text.into_bytes();
            expected.push(b'\n');
            assert_eq!(1, results.len());
            assert_eq!(&expected[..], results[0].clone().unwrap().as_bytes());
        }
    }
}
