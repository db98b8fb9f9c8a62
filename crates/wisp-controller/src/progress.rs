//! Single-line progress reporting.
//!
//! Generation and serialization report progress by overwriting one
//! status line. Writes are best-effort: a failing sink never interrupts
//! the work it is reporting on.

use std::io::{self, Write};

/// Receives status-line updates from long-running controller loops.
pub trait ProgressSink {
    /// Replace the current status line.
    fn status(&mut self, line: &str);

    /// Terminate the status line, leaving the cursor on a fresh line.
    fn finish(&mut self);
}

/// Overwrites a single line on a `Write` sink using carriage returns.
pub struct StatusLine<W: Write> {
    out: W,
    dirty: bool,
}

impl StatusLine<io::Stderr> {
    /// A status line on stderr.
    pub fn stderr() -> Self {
        Self::new(io::stderr())
    }
}

impl<W: Write> StatusLine<W> {
    /// A status line on an arbitrary sink.
    pub fn new(out: W) -> Self {
        Self { out, dirty: false }
    }

    /// Consume the sink and return the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ProgressSink for StatusLine<W> {
    fn status(&mut self, line: &str) {
        let _ = write!(self.out, "\r{line}  ");
        let _ = self.out.flush();
        self.dirty = true;
    }

    fn finish(&mut self) {
        if self.dirty {
            let _ = writeln!(self.out);
            let _ = self.out.flush();
            self.dirty = false;
        }
    }
}

/// Discards all progress updates. The default for tests.
#[derive(Clone, Copy, Debug, Default)]
pub struct Silent;

impl ProgressSink for Silent {
    fn status(&mut self, _line: &str) {}

    fn finish(&mut self) {}
}
