//! Terminal collaborator interface.
//!
//! The engine never opens a terminal device itself; it consumes this narrow
//! trait. Backends live in the `linedit-io` crate: a Unix raw-mode backend
//! and a fully scripted one for tests.

use std::fmt;

/// One input event from the terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// A single raw input byte. Multi-byte keys and UTF-8 text arrive one
    /// byte at a time.
    Byte(u8),
    /// The input stream has ended (EOF, hangup).
    EndOfStream,
}

/// Terminal I/O failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminalError {
    /// Underlying read/write failure.
    Io(String),
    /// The backend cannot provide a required capability.
    Unsupported(String),
}

impl fmt::Display for TerminalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TerminalError::Io(msg) => write!(f, "terminal I/O error: {msg}"),
            TerminalError::Unsupported(msg) => write!(f, "terminal capability missing: {msg}"),
        }
    }
}

impl std::error::Error for TerminalError {}

/// The narrow interface the dispatch loop drives.
pub trait Terminal {
    /// Block until the next input event is available.
    fn read_event(&mut self) -> Result<InputEvent, TerminalError>;

    /// Write text (including control sequences) to the display.
    fn write(&mut self, text: &str) -> Result<(), TerminalError>;

    /// Current display width in columns.
    fn width(&self) -> usize;
}
