//! Sequential line reading with a terminal error state.

use std::io::{self, BufRead};

/// A lazy, finite and non-restartable sequence of text lines.
///
/// Callers advance with [`LineSource::scan`] and read the current line with
/// [`LineSource::text`]. Once `scan` returns `false` the source is spent;
/// [`LineSource::take_err`] then tells a read fault apart from a clean end of
/// input.
pub trait LineSource {
    /// Advances to the next line, returning `false` at end of input or on a
    /// read fault.
    fn scan(&mut self) -> bool;

    /// Returns the current line without its terminator.
    ///
    /// Only meaningful immediately after [`LineSource::scan`] returned `true`.
    fn text(&self) -> &str;

    /// Takes the fault that ended the sequence, if any.
    ///
    /// Returns `None` when the input ended normally.
    fn take_err(&mut self) -> Option<io::Error>;
}

#[derive(Debug)]
enum ReadState {
    Reading,
    Finished,
    Faulted(io::Error),
    Drained,
}

/// [`LineSource`] over any buffered reader.
///
/// Both `\n` and `\r\n` terminators are stripped. Input that is not valid
/// UTF-8 faults the source.
#[derive(Debug)]
pub struct BufLineSource<R> {
    reader: R,
    line: String,
    state: ReadState,
}

impl<R: BufRead> BufLineSource<R> {
    /// Wraps `reader` in a fresh line source.
    pub const fn new(reader: R) -> Self {
        Self {
            reader,
            line: String::new(),
            state: ReadState::Reading,
        }
    }
}

impl<R: BufRead> LineSource for BufLineSource<R> {
    fn scan(&mut self) -> bool {
        if !matches!(self.state, ReadState::Reading) {
            return false;
        }
        self.line.clear();
        match self.reader.read_line(&mut self.line) {
            Ok(0) => {
                self.state = ReadState::Finished;
                false
            }
            Ok(_) => {
                strip_terminator(&mut self.line);
                true
            }
            Err(err) => {
                self.line.clear();
                self.state = ReadState::Faulted(err);
                false
            }
        }
    }

    fn text(&self) -> &str {
        &self.line
    }

    fn take_err(&mut self) -> Option<io::Error> {
        match std::mem::replace(&mut self.state, ReadState::Drained) {
            ReadState::Faulted(err) => Some(err),
            ReadState::Reading => {
                self.state = ReadState::Reading;
                None
            }
            ReadState::Finished | ReadState::Drained => None,
        }
    }
}

fn strip_terminator(line: &mut String) {
    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
}
