/// Resumable word scanner over a line buffer.
///
/// Words are separated by runs of spaces and line feeds. The tokenizer keeps
/// its cursor between calls, so successive calls on the same line walk
/// through it word by word.
#[derive(Debug, Default)]
pub struct LineTokenizer {
    cursor: usize,
}

/// Scanner state while looking for the next word.
#[derive(Debug, PartialEq, Clone, Copy)]
enum ScanState {
    SkippingSpaces,
    Reading,
}

impl LineTokenizer {
    /// Creates a new tokenizer with its cursor at the start of a line.
    pub const fn new() -> Self {
        Self { cursor: 0 }
    }

    /// Returns the next word of `line`.
    ///
    /// # Parameters
    ///
    /// - `line`: The line being scanned.
    /// - `reset`: Whether to move the cursor back to the start of the line
    ///   before scanning. The first call for any new line must reset.
    ///
    /// # Returns
    ///
    /// - `Some(word)`: the next word.
    /// - `None`: if the line has no more words.
    pub fn next_word<'a>(
        &mut self,
        line: &'a [u8],
        reset: bool,
    ) -> Option<&'a [u8]> {
        if reset {
            self.cursor = 0;
        }

        let mut state = ScanState::SkippingSpaces;
        let mut start = self.cursor;
        for (i, &c) in line.iter().enumerate().skip(self.cursor) {
            match (state, is_delimiter(c)) {
                (ScanState::SkippingSpaces, false) => {
                    start = i;
                    state = ScanState::Reading;
                }
                (ScanState::Reading, true) => {
                    self.cursor = i + 1;
                    return Some(&line[start..i]);
                }
                _ => {}
            }
        }

        self.cursor = line.len();
        match state {
            ScanState::Reading => Some(&line[start..]),
            ScanState::SkippingSpaces => None,
        }
    }
}

fn is_delimiter(c: u8) -> bool {
    c == b' ' || c == b'\n'
}
