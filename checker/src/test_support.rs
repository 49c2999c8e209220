//! Test-only helpers for readers over in-memory input and capturing sinks.

use std::io::{self, Cursor, Write};
use std::sync::{Arc, Mutex};

use crate::io::mirror::DiagnosticSink;
use crate::io::reader::StrictReader;

/// Source name used by [`reader`].
pub const TEST_SOURCE: &str = "<test>";

/// A strict reader over `text`, named [`TEST_SOURCE`].
pub fn reader(text: &str) -> StrictReader<Cursor<Vec<u8>>> {
    StrictReader::new(Cursor::new(text.as_bytes().to_vec()), TEST_SOURCE)
}

/// In-memory writer whose contents stay readable after it is handed out.
#[derive(Debug, Clone, Default)]
pub struct SharedBuffer {
    bytes: Arc<Mutex<Vec<u8>>>,
}

impl SharedBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// A diagnostic sink writing into this buffer.
    pub fn sink(&self) -> DiagnosticSink {
        DiagnosticSink::new(self.clone())
    }

    pub fn contents(&self) -> String {
        let bytes = self.bytes.lock().expect("buffer lock");
        String::from_utf8_lossy(&bytes).into_owned()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut bytes = self
            .bytes
            .lock()
            .map_err(|_| io::Error::other("buffer lock poisoned"))?;
        bytes.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
