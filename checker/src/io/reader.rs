//! Strict validating reader for whitespace-delimited decimal integers.
//!
//! The grammar is deliberately narrow: an optional single `-`, then either a
//! lone `0` or a digit `1`-`9` followed by more digits. The byte right after
//! the numeral is captured as its [`Delimiter`] and checked only when the
//! caller asserts it, so the caller decides what each grammar position
//! expects.
//!
//! A reader must end in exactly one terminal state: confirmed end-of-stream
//! ([`StrictReader::confirm_eof`]) or aborted ([`StrictReader::abort`], or
//! any failure). Dropping a reader that is still open is a logic violation.

use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader, ErrorKind, Read, Stdin};
use std::path::Path;

use tracing::debug;

use crate::core::numeral::{Numeral, Sign, accumulate, digit_value};
use crate::core::position::Position;
use crate::error::{CheckError, logic_violation};
use crate::io::mirror::{DiagnosticSink, LineMirror};

/// Source name used for standard input.
pub const STDIN_NAME: &str = "<stdin>";

/// The byte that ended a numeral.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    Space,
    Newline,
    Eof,
    Other(u8),
}

impl Delimiter {
    fn from_byte(byte: Option<u8>) -> Self {
        match byte {
            Some(b' ') => Delimiter::Space,
            Some(b'\n') => Delimiter::Newline,
            Some(other) => Delimiter::Other(other),
            None => Delimiter::Eof,
        }
    }
}

impl fmt::Display for Delimiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Delimiter::Space => write!(f, "SPC"),
            Delimiter::Newline => write!(f, "EOL"),
            Delimiter::Eof => write!(f, "EOF"),
            Delimiter::Other(byte) => write!(f, "{:?}", char::from(*byte)),
        }
    }
}

/// Lifecycle of a reader.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadState {
    Open,
    ConfirmedEof,
    Aborted,
}

impl fmt::Display for ReadState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReadState::Open => write!(f, "open"),
            ReadState::ConfirmedEof => write!(f, "confirmed at EOF"),
            ReadState::Aborted => write!(f, "aborted"),
        }
    }
}

/// Position, lifecycle and mirror of a reader.
///
/// Split from the byte source so a pending [`Delimited`] can fail the reader
/// without knowing its source type.
#[derive(Debug)]
pub struct Tracker {
    position: Position,
    state: ReadState,
    mirror: Option<LineMirror>,
}

impl Tracker {
    fn new(name: String) -> Self {
        Self {
            position: Position::new(name),
            state: ReadState::Open,
            mirror: None,
        }
    }

    fn consumed(&mut self, byte: Option<u8>) {
        self.position.advance(byte);
        if let (Some(mirror), Some(byte)) = (self.mirror.as_mut(), byte) {
            mirror.push(byte, self.position.line);
        }
    }

    fn ensure_open(&self, operation: &str) {
        if self.state != ReadState::Open {
            logic_violation(&format!(
                "{operation} on {} after it was {}",
                self.position.source, self.state
            ));
        }
    }

    fn terminate(&mut self, state: ReadState) {
        self.state = state;
        if let Some(mirror) = self.mirror.as_mut() {
            mirror.finish(self.position.line);
        }
    }

    fn abort(&mut self) {
        if self.state == ReadState::Open {
            self.terminate(ReadState::Aborted);
            debug!(source = %self.position.source, "reader aborted");
        }
    }

    /// Abort and build a format error at the current position.
    fn fail(&mut self, message: impl Into<String>) -> CheckError {
        self.abort();
        CheckError::Format {
            location: self.position.describe(),
            message: message.into(),
        }
    }
}

/// A parsed value together with the byte that ended it.
///
/// Consumed by one of the assertions, each of which fails the reader (and
/// aborts it) when the expectation does not hold.
#[derive(Debug)]
#[must_use = "assert the delimiter with space(), newline() or positional(), or take value()"]
pub struct Delimited<'r, T> {
    value: T,
    delimiter: Delimiter,
    tracker: &'r mut Tracker,
}

impl<T: Numeral> Delimited<'_, T> {
    pub fn value(&self) -> T {
        self.value
    }

    pub fn delimiter(&self) -> Delimiter {
        self.delimiter
    }

    /// The numeral must be followed by a single space.
    pub fn space(self) -> Result<T, CheckError> {
        self.expect(Delimiter::Space)
    }

    /// The numeral must be followed by a single `\n`.
    pub fn newline(self) -> Result<T, CheckError> {
        self.expect(Delimiter::Newline)
    }

    /// Element `index` of a `count`-element line: the last one ends the line,
    /// the others are space-separated.
    pub fn positional(self, index: usize, count: usize) -> Result<T, CheckError> {
        if index >= count {
            logic_violation(&format!(
                "positional({index}, {count}): index must be below count"
            ));
        }
        if index + 1 == count {
            self.newline()
        } else {
            self.space()
        }
    }

    /// The value must lie in `min..=max`.
    pub fn range(self, min: T, max: T) -> Result<Self, CheckError> {
        if min <= self.value && self.value <= max {
            Ok(self)
        } else {
            let message = format!(
                "{} = {} is out of range [{min}, {max}]",
                self.tracker.position.field, self.value
            );
            Err(self.tracker.fail(message))
        }
    }

    fn expect(self, expected: Delimiter) -> Result<T, CheckError> {
        if self.delimiter == expected {
            Ok(self.value)
        } else {
            let message = format!(
                "delimiter {expected} is expected after {}, found {}",
                self.tracker.position.field, self.delimiter
            );
            Err(self.tracker.fail(message))
        }
    }
}

/// Validating reader over a byte source.
pub struct StrictReader<R> {
    source: Option<BufReader<R>>,
    tracker: Tracker,
}

impl StrictReader<Stdin> {
    /// Reader over this process's standard input, named `<stdin>`.
    pub fn stdin() -> Self {
        Self::new(io::stdin(), STDIN_NAME)
    }
}

impl StrictReader<File> {
    /// Reader over a file, named after its path.
    pub fn open(path: &Path) -> Result<Self, CheckError> {
        let file = File::open(path).map_err(|source| CheckError::Open {
            path: path.display().to_string(),
            source,
        })?;
        Ok(Self::new(file, path.display().to_string()))
    }
}

impl<R: Read> StrictReader<R> {
    pub fn new(source: R, name: impl Into<String>) -> Self {
        Self {
            source: Some(BufReader::new(source)),
            tracker: Tracker::new(name.into()),
        }
    }

    pub fn name(&self) -> &str {
        &self.tracker.position.source
    }

    pub fn position(&self) -> &Position {
        &self.tracker.position
    }

    pub fn state(&self) -> ReadState {
        self.tracker.state
    }

    pub fn is_open(&self) -> bool {
        self.tracker.state == ReadState::Open
    }

    /// Echo every consumed byte to stderr. Cannot be turned off again.
    pub fn enable_mirror(&mut self) {
        self.enable_mirror_to(DiagnosticSink::stderr());
    }

    /// Echo every consumed byte to `sink`; a no-op if already enabled.
    pub fn enable_mirror_to(&mut self, sink: DiagnosticSink) {
        if self.tracker.mirror.is_none() {
            let mirror = LineMirror::input(&self.tracker.position.source, sink);
            self.tracker.mirror = Some(mirror);
        }
    }

    /// Parse a 32-bit signed integer.
    pub fn read_int(&mut self, field: &str) -> Result<Delimited<'_, i32>, CheckError> {
        self.read(field)
    }

    /// Parse a 64-bit signed integer.
    pub fn read_long(&mut self, field: &str) -> Result<Delimited<'_, i64>, CheckError> {
        self.read(field)
    }

    /// Parse one numeral of class `T`; `field` names it in diagnostics.
    pub fn read<T: Numeral>(&mut self, field: &str) -> Result<Delimited<'_, T>, CheckError> {
        self.tracker.ensure_open("read");
        self.tracker.position.set_field(field);
        let (value, end) = self.parse_numeral::<T>()?;
        Ok(Delimited {
            value,
            delimiter: Delimiter::from_byte(end),
            tracker: &mut self.tracker,
        })
    }

    /// Consume one more byte, which must be end-of-stream, and release the
    /// source.
    pub fn confirm_eof(mut self) -> Result<(), CheckError> {
        self.finish_eof()
    }

    /// Abandon the reader without further validation.
    pub fn abort(mut self) {
        self.abandon();
    }

    pub(crate) fn finish_eof(&mut self) -> Result<(), CheckError> {
        self.tracker.ensure_open("confirm_eof");
        if self.next_byte()?.is_some() {
            return Err(self.tracker.fail("error reading EOF: not an EOF"));
        }
        self.tracker.terminate(ReadState::ConfirmedEof);
        self.source = None;
        debug!(source = %self.tracker.position.source, "confirmed EOF");
        Ok(())
    }

    pub(crate) fn abandon(&mut self) {
        self.tracker.abort();
    }

    /// Close the byte source of a terminated reader. Unread bytes are
    /// discarded; a writer on the other end of a pipe sees it closed.
    pub(crate) fn release(&mut self) {
        if self.tracker.state == ReadState::Open {
            logic_violation(&format!(
                "release of {} while it is still open",
                self.tracker.position.source
            ));
        }
        if self.source.take().is_some() {
            debug!(source = %self.tracker.position.source, "source released");
        }
    }

    /// Unvalidated access to the remaining bytes; aborts strict reading.
    pub(crate) fn raw(&mut self) -> &mut BufReader<R> {
        self.tracker.abort();
        match self.source.as_mut() {
            Some(source) => source,
            None => logic_violation(&format!(
                "raw read on {} after EOF was confirmed",
                self.tracker.position.source
            )),
        }
    }

    fn parse_numeral<T: Numeral>(&mut self) -> Result<(T, Option<u8>), CheckError> {
        let (sign, lead) = match self.next_byte()? {
            Some(b'-') => match self.next_byte()? {
                Some(b @ b'1'..=b'9') => (Sign::Negative, b - b'0'),
                _ => return Err(self.not_an_integer::<T>()),
            },
            // A lone zero; a following digit becomes the delimiter.
            Some(b'0') => return Ok((T::ZERO, self.next_byte()?)),
            Some(b @ b'1'..=b'9') => (Sign::Positive, b - b'0'),
            _ => return Err(self.not_an_integer::<T>()),
        };

        let mut acc = T::from_digit(lead, sign);
        loop {
            let next = self.next_byte()?;
            let Some(digit) = next.and_then(digit_value) else {
                return Ok((acc, next));
            };
            acc = match accumulate(acc, digit, sign) {
                Some(acc) => acc,
                None => {
                    let message = format!(
                        "error reading {} {}: Too large integer constant",
                        T::KIND,
                        self.tracker.position.field
                    );
                    return Err(self.tracker.fail(message));
                }
            };
        }
    }

    fn not_an_integer<T: Numeral>(&mut self) -> CheckError {
        let message = format!(
            "error reading {} {}: not an integer input",
            T::KIND,
            self.tracker.position.field
        );
        self.tracker.fail(message)
    }

    fn next_byte(&mut self) -> Result<Option<u8>, CheckError> {
        let Some(source) = self.source.as_mut() else {
            logic_violation(&format!(
                "read on {} after its source was released",
                self.tracker.position.source
            ));
        };
        let byte = loop {
            match source.fill_buf() {
                Ok(buf) => break buf.first().copied(),
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => {
                    self.tracker.abort();
                    return Err(CheckError::Read {
                        name: self.tracker.position.source.clone(),
                        source: err,
                    });
                }
            }
        };
        if byte.is_some() {
            source.consume(1);
        }
        self.tracker.consumed(byte);
        Ok(byte)
    }
}

impl<R> fmt::Debug for StrictReader<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StrictReader")
            .field("tracker", &self.tracker)
            .finish_non_exhaustive()
    }
}

impl<R> Drop for StrictReader<R> {
    fn drop(&mut self) {
        if self.tracker.state == ReadState::Open && !std::thread::panicking() {
            logic_violation(&format!(
                "{}: call confirm_eof() or abort() before dropping the reader",
                self.tracker.position.source
            ));
        }
    }
}
