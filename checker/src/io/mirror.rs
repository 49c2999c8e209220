//! Diagnostic mirror: a line-buffered echo of validated traffic.
//!
//! Records have the form `<tag>: <line>: <content>` and are flushed one line
//! at a time. They exist for humans debugging a judge; nothing reads them
//! back, so sink failures are logged and otherwise ignored.

use std::fmt;
use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use tracing::warn;

/// Shared destination for mirror records.
///
/// Cloning is cheap; a reader and a process writing to the same sink keep
/// their records interleaved in the order they happen.
#[derive(Clone)]
pub struct DiagnosticSink {
    inner: Arc<Mutex<Box<dyn Write + Send>>>,
}

impl DiagnosticSink {
    pub fn new<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Box::new(writer))),
        }
    }

    pub fn stderr() -> Self {
        Self::new(io::stderr())
    }

    pub fn record(&self, tag: &str, line: usize, content: &[u8]) {
        let Ok(mut writer) = self.inner.lock() else {
            warn!(tag, "diagnostic sink lock poisoned");
            return;
        };
        let text = String::from_utf8_lossy(content);
        let written = writeln!(writer, "{tag}: {line}: {text}").and_then(|()| writer.flush());
        if let Err(err) = written {
            warn!(tag, err = %err, "failed to write diagnostic record");
        }
    }
}

impl fmt::Debug for DiagnosticSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiagnosticSink").finish_non_exhaustive()
    }
}

/// Accumulates bytes until a newline, then emits one record.
#[derive(Debug)]
pub struct LineMirror {
    tag: String,
    pending: Vec<u8>,
    sink: DiagnosticSink,
}

impl LineMirror {
    pub fn new(tag: impl Into<String>, sink: DiagnosticSink) -> Self {
        Self {
            tag: tag.into(),
            pending: Vec::new(),
            sink,
        }
    }

    /// Tag for bytes read from `source`.
    pub fn input(source: &str, sink: DiagnosticSink) -> Self {
        Self::new(format!("{source}<in>"), sink)
    }

    /// Tag for bytes written to process `name`.
    pub fn output(name: &str, sink: DiagnosticSink) -> Self {
        Self::new(format!("{name}<out>"), sink)
    }

    /// Buffer `byte`; a newline emits the buffered line numbered `line`.
    ///
    /// Returns whether a record was emitted.
    pub fn push(&mut self, byte: u8, line: usize) -> bool {
        if byte == b'\n' {
            self.emit(line);
            true
        } else {
            self.pending.push(byte);
            false
        }
    }

    /// Emit an unterminated trailing line, if any.
    pub fn finish(&mut self, line: usize) {
        if !self.pending.is_empty() {
            self.emit(line);
        }
    }

    fn emit(&mut self, line: usize) {
        self.sink.record(&self.tag, line, &self.pending);
        self.pending.clear();
    }
}
