//! Scripted terminal for deterministic tests.

use std::collections::VecDeque;

use linedit_core::{InputEvent, Terminal, TerminalError};

/// An in-memory terminal driven by a pre-fed input script.
///
/// Input bytes are consumed one per `read_event` call; when the script is
/// exhausted the terminal reports end-of-stream. Everything the engine
/// writes is captured and can be inspected per-write or as one string.
///
/// # Examples
///
/// ```
/// use linedit_core::{InputEvent, Terminal};
/// use linedit_io::ScriptedTerminal;
///
/// let mut terminal = ScriptedTerminal::new();
/// terminal.feed_str("hi");
/// assert_eq!(terminal.read_event().unwrap(), InputEvent::Byte(b'h'));
/// assert_eq!(terminal.read_event().unwrap(), InputEvent::Byte(b'i'));
/// assert_eq!(terminal.read_event().unwrap(), InputEvent::EndOfStream);
/// ```
#[derive(Debug)]
pub struct ScriptedTerminal {
    input: VecDeque<u8>,
    writes: Vec<String>,
    width: usize,
}

impl Default for ScriptedTerminal {
    fn default() -> Self {
        Self::new()
    }
}

impl ScriptedTerminal {
    /// Create a scripted terminal with the default 80-column width.
    pub fn new() -> Self {
        ScriptedTerminal {
            input: VecDeque::new(),
            writes: Vec::new(),
            width: 80,
        }
    }

    /// Create a scripted terminal with an explicit width.
    pub fn with_width(width: usize) -> Self {
        ScriptedTerminal {
            width,
            ..Self::new()
        }
    }

    /// Append UTF-8 text to the input script.
    pub fn feed_str(&mut self, text: &str) {
        self.input.extend(text.bytes());
    }

    /// Append raw bytes to the input script.
    pub fn feed_bytes(&mut self, bytes: &[u8]) {
        self.input.extend(bytes.iter().copied());
    }

    /// Everything written so far, concatenated.
    pub fn output(&self) -> String {
        self.writes.concat()
    }

    /// The individual write calls, in order.
    pub fn writes(&self) -> &[String] {
        &self.writes
    }

    /// Discard the captured output.
    pub fn clear_output(&mut self) {
        self.writes.clear();
    }
}

impl Terminal for ScriptedTerminal {
    fn read_event(&mut self) -> Result<InputEvent, TerminalError> {
        Ok(match self.input.pop_front() {
            Some(byte) => InputEvent::Byte(byte),
            None => InputEvent::EndOfStream,
        })
    }

    fn write(&mut self, text: &str) -> Result<(), TerminalError> {
        self.writes.push(text.to_string());
        Ok(())
    }

    fn width(&self) -> usize {
        self.width
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_script_then_end_of_stream() {
        let mut terminal = ScriptedTerminal::new();
        terminal.feed_bytes(&[0x1b, b'[', b'A']);

        assert_eq!(terminal.read_event().unwrap(), InputEvent::Byte(0x1b));
        assert_eq!(terminal.read_event().unwrap(), InputEvent::Byte(b'['));
        assert_eq!(terminal.read_event().unwrap(), InputEvent::Byte(b'A'));
        assert_eq!(terminal.read_event().unwrap(), InputEvent::EndOfStream);
        // End-of-stream is sticky.
        assert_eq!(terminal.read_event().unwrap(), InputEvent::EndOfStream);
    }

    #[test]
    fn test_captures_writes_in_order() {
        let mut terminal = ScriptedTerminal::new();
        terminal.write("> ").unwrap();
        terminal.write("abc").unwrap();

        assert_eq!(terminal.writes(), &["> ".to_string(), "abc".to_string()]);
        assert_eq!(terminal.output(), "> abc");

        terminal.clear_output();
        assert!(terminal.output().is_empty());
    }

    #[test]
    fn test_width() {
        assert_eq!(ScriptedTerminal::new().width(), 80);
        assert_eq!(ScriptedTerminal::with_width(40).width(), 40);
    }
}
