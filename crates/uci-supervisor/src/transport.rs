//! The command side of the engine pipes.

use std::io;

/// Line-oriented command channel to an engine.
///
/// Sending is fire-and-forget; `sync_ready` is the only point where an
/// implementation is expected to wait for the engine.
pub trait Transport {
    /// Write one command line. The line terminator is added by the implementation.
    fn send(&mut self, line: &str) -> io::Result<()>;

    /// Ask the engine to finish processing earlier commands.
    fn sync_ready(&mut self) -> io::Result<()> {
        self.send("isready")
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn send(&mut self, line: &str) -> io::Result<()> {
        (**self).send(line)
    }

    fn sync_ready(&mut self) -> io::Result<()> {
        (**self).sync_ready()
    }
}

/// Render a `setoption` command.
pub fn setoption_line(name: &str, value: &impl std::fmt::Display) -> String {
    format!("setoption name {name} value {value}")
}
