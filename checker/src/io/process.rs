//! Interactive process harness: spawn a child wired to two pipes, talk to it,
//! and validate what it prints with a [`StrictReader`].
//!
//! The judge owns both pipe ends. The protocol is strict turn-taking: write,
//! [`InteractiveProcess::flush`], then read. Nothing here detects a child that
//! never answers; a read simply blocks.

use std::ffi::{OsStr, OsString};
use std::fmt;
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::PathBuf;
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};

use tracing::{debug, error, info, warn};

use crate::core::exit::{ExitClass, classify_exit};
use crate::core::numeral::Numeral;
use crate::error::{CheckError, logic_violation};
use crate::io::mirror::{DiagnosticSink, LineMirror};
use crate::io::reader::{Delimited, ReadState, StrictReader};

/// Argument list under construction. Spawning consumes the builder, so a
/// process can be started only once.
#[derive(Debug, Clone, Default)]
pub struct ProcessBuilder {
    args: Vec<OsString>,
    program: Option<PathBuf>,
}

impl ProcessBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_os_string());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args
            .extend(args.into_iter().map(|arg| arg.as_ref().to_os_string()));
        self
    }

    /// Execute `path` instead of argument 0. Argument 0 is still passed to
    /// the child as its `argv[0]` where the platform allows it.
    pub fn program(mut self, path: impl Into<PathBuf>) -> Self {
        self.program = Some(path.into());
        self
    }

    /// Start the child with stdin/stdout piped to the judge; stderr is shared.
    ///
    /// # Panics
    /// With an empty argument list (a logic violation).
    pub fn spawn(self) -> Result<InteractiveProcess, CheckError> {
        let Some((arg0, rest)) = self.args.split_first() else {
            logic_violation("spawn() with an empty argument list");
        };
        let program = self
            .program
            .clone()
            .unwrap_or_else(|| PathBuf::from(arg0));
        let name = program.display().to_string();

        let mut cmd = Command::new(&program);
        cmd.args(rest)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit());
        #[cfg(unix)]
        {
            use std::os::unix::process::CommandExt;
            cmd.arg0(arg0);
        }

        debug!(program = %name, args = ?self.args, "spawning interactive process");
        let mut child = match cmd.spawn() {
            Ok(child) => child,
            Err(err) => {
                error!(program = %name, err = %err, "failed to spawn process");
                return Err(CheckError::Spawn {
                    program: name,
                    source: err,
                });
            }
        };

        let (Some(stdin), Some(stdout)) = (child.stdin.take(), child.stdout.take()) else {
            let _ = child.kill();
            let _ = child.wait();
            return Err(CheckError::Spawn {
                program: name,
                source: std::io::Error::other("child pipes were not created"),
            });
        };

        Ok(InteractiveProcess {
            reader: StrictReader::new(stdout, name.clone()),
            writer: Some(BufWriter::new(stdin)),
            output_mirror: None,
            output_lines: 0,
            terminated: false,
            child,
            name,
        })
    }
}

/// A running child process and the judge's ends of its pipes.
///
/// Must be finished with [`InteractiveProcess::terminate`] after the embedded
/// reader reached a terminal state ([`InteractiveProcess::confirm_eof`] or
/// [`InteractiveProcess::abort_reading`]). Dropping it earlier kills the
/// child and raises a logic violation.
pub struct InteractiveProcess {
    name: String,
    child: Child,
    writer: Option<BufWriter<ChildStdin>>,
    reader: StrictReader<ChildStdout>,
    output_mirror: Option<LineMirror>,
    output_lines: usize,
    terminated: bool,
}

impl InteractiveProcess {
    /// Resolved executable name, also the source name of the embedded reader.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn id(&self) -> u32 {
        self.child.id()
    }

    pub fn reading_state(&self) -> ReadState {
        self.reader.state()
    }

    /// Mirror both directions to stderr. Cannot be turned off again.
    pub fn enable_mirror(&mut self) {
        self.enable_mirror_to(DiagnosticSink::stderr());
    }

    pub fn enable_mirror_to(&mut self, sink: DiagnosticSink) {
        self.reader.enable_mirror_to(sink.clone());
        if self.output_mirror.is_none() {
            self.output_mirror = Some(LineMirror::output(&self.name, sink));
        }
    }

    pub fn read_int(&mut self, field: &str) -> Result<Delimited<'_, i32>, CheckError> {
        self.reader.read_int(field)
    }

    pub fn read_long(&mut self, field: &str) -> Result<Delimited<'_, i64>, CheckError> {
        self.reader.read_long(field)
    }

    pub fn read<T: Numeral>(&mut self, field: &str) -> Result<Delimited<'_, T>, CheckError> {
        self.reader.read(field)
    }

    /// The child's output must end here.
    pub fn confirm_eof(&mut self) -> Result<(), CheckError> {
        self.reader.finish_eof()
    }

    /// Stop validating the child's output. Idempotent.
    pub fn abort_reading(&mut self) {
        self.reader.abandon();
    }

    /// Unvalidated access to the child's output. Strict reading is aborted
    /// for the rest of the session.
    pub fn raw_reader(&mut self) -> &mut BufReader<ChildStdout> {
        self.reader.raw()
    }

    pub fn write_str(&mut self, text: &str) -> Result<(), CheckError> {
        self.write_bytes(text.as_bytes())
    }

    pub fn write_line(&mut self, text: &str) -> Result<(), CheckError> {
        self.write_bytes(text.as_bytes())?;
        self.write_bytes(b"\n")
    }

    /// Lets `write!`/`writeln!` target the process directly.
    pub fn write_fmt(&mut self, args: fmt::Arguments<'_>) -> Result<(), CheckError> {
        match args.as_str() {
            Some(text) => self.write_str(text),
            None => self.write_str(&args.to_string()),
        }
    }

    /// Push buffered bytes into the pipe. Required before blocking on a read.
    pub fn flush(&mut self) -> Result<(), CheckError> {
        let Some(writer) = self.writer.as_mut() else {
            write_side_closed("flush", &self.name);
        };
        writer.flush().map_err(|source| CheckError::Write {
            name: self.name.clone(),
            source,
        })
    }

    /// Close the child's stdin so it sees EOF, without waiting for it.
    pub fn close_write_side(&mut self) -> Result<(), CheckError> {
        let Some(mut writer) = self.writer.take() else {
            return Ok(());
        };
        if let Some(mirror) = self.output_mirror.as_mut() {
            mirror.finish(self.output_lines + 1);
        }
        debug!(program = %self.name, "closing write side");
        writer.flush().map_err(|source| CheckError::Write {
            name: self.name.clone(),
            source,
        })
    }

    /// Close both pipes, reap the child and classify its exit.
    ///
    /// Output the child writes after reading has ended is discarded; a child
    /// that keeps writing sees a broken pipe.
    ///
    /// # Panics
    /// If the embedded reader is still open (a logic violation).
    pub fn terminate(mut self) -> Result<(), CheckError> {
        if self.reader.is_open() {
            logic_violation(&format!(
                "{}: call confirm_eof() or abort_reading() before terminate()",
                self.name
            ));
        }
        // A child still writing to a full pipe would never exit otherwise.
        self.reader.release();
        let closed = self.close_write_side();
        let waited = self.child.wait();
        self.terminated = true;
        let status = waited.map_err(|source| CheckError::Wait {
            program: self.name.clone(),
            source,
        })?;

        match classify_exit(&status) {
            ExitClass::Success => {
                info!(program = %self.name, "process exited successfully");
                match closed {
                    // The child stopped reading before exiting cleanly.
                    Err(CheckError::Write { source, .. })
                        if source.kind() == ErrorKind::BrokenPipe =>
                    {
                        debug!(program = %self.name, "unsent input discarded at close");
                        Ok(())
                    }
                    other => other,
                }
            }
            ExitClass::NonZeroExit(code) => {
                warn!(program = %self.name, code, "process exited with nonzero code");
                Err(CheckError::NonZeroExit {
                    program: self.name.clone(),
                    code,
                })
            }
            ExitClass::Abnormal(detail) => {
                warn!(program = %self.name, detail = %detail, "process terminated abnormally");
                Err(CheckError::AbnormalExit {
                    program: self.name.clone(),
                    detail,
                })
            }
        }
    }

    fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), CheckError> {
        let Some(writer) = self.writer.as_mut() else {
            write_side_closed("write", &self.name);
        };
        writer.write_all(bytes).map_err(|source| CheckError::Write {
            name: self.name.clone(),
            source,
        })?;
        if let Some(mirror) = self.output_mirror.as_mut() {
            for &byte in bytes {
                let line = self.output_lines + 1;
                if mirror.push(byte, line) {
                    self.output_lines = line;
                }
            }
        }
        Ok(())
    }
}

fn write_side_closed(operation: &str, name: &str) -> ! {
    logic_violation(&format!(
        "{operation} to {name} after its write side was closed"
    ))
}

impl fmt::Debug for InteractiveProcess {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InteractiveProcess")
            .field("name", &self.name)
            .field("pid", &self.child.id())
            .field("write_open", &self.writer.is_some())
            .field("reader", &self.reader)
            .field("terminated", &self.terminated)
            .finish_non_exhaustive()
    }
}

impl Drop for InteractiveProcess {
    fn drop(&mut self) {
        if self.terminated {
            return;
        }
        // Reap before reporting so the child is never leaked.
        let _ = self.child.kill();
        let _ = self.child.wait();
        if !std::thread::panicking() {
            logic_violation(&format!(
                "{}: call terminate() before dropping the process",
                self.name
            ));
        }
    }
}
