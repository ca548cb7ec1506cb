//! In-memory transport for exercising sessions without an engine process.

use std::io;

use crate::transport::Transport;

/// Records every line sent. Optionally fails once a number of lines went through.
#[derive(Debug, Default, Clone)]
pub struct RecordingTransport {
    pub lines: Vec<String>,
    fail_after: Option<usize>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept `n` more lines, then fail every send with `BrokenPipe`.
    pub fn fail_after(mut self, n: usize) -> Self {
        self.fail_after = Some(self.lines.len() + n);
        self
    }

    pub fn clear(&mut self) {
        self.lines.clear();
        self.fail_after = None;
    }

    /// Lines that start with `setoption`.
    pub fn setoptions(&self) -> Vec<&str> {
        self.lines.iter().map(String::as_str).filter(|l| l.starts_with("setoption")).collect()
    }
}

impl Transport for RecordingTransport {
    fn send(&mut self, line: &str) -> io::Result<()> {
        if self.fail_after.is_some_and(|limit| self.lines.len() >= limit) {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "engine stdin closed"));
        }
        self.lines.push(line.to_string());
        Ok(())
    }
}
