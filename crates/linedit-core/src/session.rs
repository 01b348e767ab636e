//! Editing session and dispatch loop.
//!
//! A [`Session`] aggregates the line buffer, history store, key binding
//! table, extension function registry, and prompt. `read_line` runs the
//! dispatch loop: one input event at a time is resolved through the binding
//! table, the resolved action executes against the buffer/history, and its
//! control code decides whether to repaint, ring the bell, keep reading, or
//! finish the line.
//!
//! Sessions are caller-owned values. Each one serves a single logical input
//! stream and owns its state exclusively; embeddings that want several
//! independent editors create several Sessions.

use std::fmt;
use std::panic::{self, AssertUnwindSafe};

use unicode_width::UnicodeWidthStr;

use crate::bindings::{KeyBindingTable, Resolution};
use crate::buffer::LineBuffer;
use crate::command::{BuiltinCommand, ControlCode};
use crate::error::{BindingError, HistoryError};
use crate::history::HistoryStore;
use crate::registry::{EditOps, ExtensionCallback, FunctionRegistry};
use crate::terminal::{InputEvent, Terminal, TerminalError};

const BELL: &str = "\u{7}";
const ERASE_TO_EOL: &str = "\u{1b}[K";

/// Configuration for a session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Prompt text written before the edited line.
    pub prompt: String,
    /// Install the default emacs-flavoured key bindings.
    pub default_bindings: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            prompt: "> ".to_string(),
            default_bindings: true,
        }
    }
}

/// Errors surfaced by the embedding API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// The terminal collaborator failed.
    Terminal(TerminalError),
    /// Out-of-range history access.
    History(HistoryError),
    /// Malformed key-sequence literal.
    Binding(BindingError),
    /// Rejected configuration value.
    InvalidConfig(String),
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::Terminal(e) => write!(f, "terminal error: {e}"),
            SessionError::History(e) => write!(f, "history error: {e}"),
            SessionError::Binding(e) => write!(f, "binding error: {e}"),
            SessionError::InvalidConfig(msg) => write!(f, "invalid configuration: {msg}"),
        }
    }
}

impl std::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SessionError::Terminal(e) => Some(e),
            SessionError::History(e) => Some(e),
            SessionError::Binding(e) => Some(e),
            SessionError::InvalidConfig(_) => None,
        }
    }
}

impl From<TerminalError> for SessionError {
    fn from(err: TerminalError) -> Self {
        SessionError::Terminal(err)
    }
}

impl From<HistoryError> for SessionError {
    fn from(err: HistoryError) -> Self {
        SessionError::History(err)
    }
}

impl From<BindingError> for SessionError {
    fn from(err: BindingError) -> Self {
        SessionError::Binding(err)
    }
}

/// History-recall walk state: where we are and what the user had typed
/// before recall started.
#[derive(Debug, Clone)]
struct RecallState {
    index: usize,
    stash: String,
}

/// One interactive editing session.
pub struct Session {
    prompt: String,
    buffer: LineBuffer,
    history: HistoryStore,
    bindings: KeyBindingTable,
    registry: FunctionRegistry,
    recall: Option<RecallState>,
    pending: Vec<u8>,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("prompt", &self.prompt)
            .field("buffer", &self.buffer)
            .field("history_len", &self.history.len())
            .field("registry", &self.registry)
            .finish()
    }
}

impl Session {
    /// Create a session from a validated configuration.
    pub fn new(config: SessionConfig) -> Result<Self, SessionError> {
        Self::validate_prompt(&config.prompt)?;
        let bindings = if config.default_bindings {
            KeyBindingTable::with_defaults()
        } else {
            KeyBindingTable::new()
        };
        Ok(Session {
            prompt: config.prompt,
            buffer: LineBuffer::new(),
            history: HistoryStore::new(),
            bindings,
            registry: FunctionRegistry::new(),
            recall: None,
            pending: Vec::new(),
        })
    }

    fn validate_prompt(prompt: &str) -> Result<(), SessionError> {
        if prompt.chars().any(|c| c.is_control() && c != '\t') {
            return Err(SessionError::InvalidConfig(
                "prompt cannot contain control characters (except tab)".to_string(),
            ));
        }
        Ok(())
    }

    /// The current prompt text.
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// Replace the prompt. Takes effect on the next repaint.
    pub fn set_prompt(&mut self, prompt: &str) -> Result<(), SessionError> {
        Self::validate_prompt(prompt)?;
        self.prompt = prompt.to_string();
        Ok(())
    }

    /// The line currently being edited.
    pub fn buffer(&self) -> &LineBuffer {
        &self.buffer
    }

    /// Read access to the submitted-line history.
    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    /// Look up a history entry by 1-based index.
    pub fn history_get(&self, index: usize) -> Result<&str, HistoryError> {
        self.history.get(index)
    }

    /// Number of history entries.
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Bind a key-sequence literal (e.g. `"^I"` or `"\\e[A"`) to an action
    /// name. The name may refer to a built-in command or a registered
    /// extension function, and need not exist yet; dispatch resolves it at
    /// key-press time. Rebinding a sequence overwrites the old binding.
    pub fn bind(&mut self, literal: &str, action: &str) -> Result<(), BindingError> {
        self.bindings.bind(literal, action)
    }

    /// Register a named extension function. Re-registration overwrites, and
    /// a name identical to a built-in command shadows that built-in.
    pub fn register_function(
        &mut self,
        name: impl Into<String>,
        description: impl Into<String>,
        callback: ExtensionCallback,
    ) {
        self.registry.register(name, description, callback);
    }

    /// Help text for an action name: registered extensions first, then
    /// built-in commands.
    pub fn describe(&self, name: &str) -> Option<&str> {
        self.registry
            .describe(name)
            .or_else(|| BuiltinCommand::lookup(name).map(BuiltinCommand::description))
    }

    /// Read the next line from the terminal.
    ///
    /// Blocks until the line is accepted or the input stream ends. Returns
    /// `Ok(Some(line))` for a completed line (also recorded in history when
    /// it contains any graphic character) and `Ok(None)` for end-of-input
    /// on an empty line, which is distinct from an accepted empty line.
    pub fn read_line(&mut self, terminal: &mut dyn Terminal) -> Result<Option<String>, SessionError> {
        self.buffer.clear();
        self.recall = None;
        self.pending.clear();
        self.repaint(terminal)?;

        loop {
            match terminal.read_event()? {
                InputEvent::EndOfStream => {
                    self.flush_pending_at_eof();
                    if self.buffer.is_empty() {
                        return Ok(None);
                    }
                    return self.finish_line(terminal).map(Some);
                }
                InputEvent::Byte(byte) => {
                    self.pending.push(byte);
                    let code = match self.bindings.resolve(&self.pending) {
                        Resolution::Prefix => continue,
                        Resolution::Bound(name) => {
                            self.pending.clear();
                            self.execute_action(&name, byte)
                        }
                        Resolution::Unbound => match self.insert_pending() {
                            Some(code) => code,
                            // Incomplete UTF-8 character; wait for the rest.
                            None => continue,
                        },
                    };
                    match code {
                        ControlCode::Accept => return self.finish_line(terminal).map(Some),
                        ControlCode::Normal | ControlCode::Refresh | ControlCode::Redisplay => {
                            self.repaint(terminal)?;
                        }
                        ControlCode::Cursor => self.place_cursor(terminal)?,
                        ControlCode::Error => terminal.write(BELL).map_err(SessionError::from)?,
                    }
                }
            }
        }
    }

    /// Execute a named action: registered extensions shadow built-ins;
    /// unknown names degrade to the error control code.
    fn execute_action(&mut self, name: &str, key: u8) -> ControlCode {
        if self.registry.contains(name) {
            return self.invoke_extension(name, key);
        }
        match BuiltinCommand::lookup(name) {
            Some(cmd) => self.run_builtin(cmd),
            None => {
                log::debug!("key bound to unknown action '{name}'");
                ControlCode::Error
            }
        }
    }

    /// Invoke an extension function with fault containment: the buffer is
    /// snapshotted before the call and restored if the callback reports a
    /// fault or panics, so a misbehaving extension cannot corrupt the line.
    fn invoke_extension(&mut self, name: &str, key: u8) -> ControlCode {
        let snapshot = self.buffer.clone();
        let outcome = {
            let Session {
                buffer,
                history,
                registry,
                ..
            } = self;
            let mut ops = EditOps::new(buffer, history);
            panic::catch_unwind(AssertUnwindSafe(|| registry.invoke(name, key, &mut ops)))
        };
        match outcome {
            Ok(Some(Ok(code))) => code,
            Ok(Some(Err(fault))) => {
                log::warn!("extension function '{name}' failed: {fault}");
                self.buffer = snapshot;
                ControlCode::Error
            }
            Ok(None) => {
                log::debug!("extension function '{name}' is not registered");
                ControlCode::Error
            }
            Err(_) => {
                log::warn!("extension function '{name}' panicked; line restored");
                self.buffer = snapshot;
                ControlCode::Error
            }
        }
    }

    fn run_builtin(&mut self, cmd: BuiltinCommand) -> ControlCode {
        match cmd {
            BuiltinCommand::BackwardChar => {
                if self.buffer.cursor() == 0 {
                    ControlCode::Error
                } else {
                    self.buffer.cursor_left(1);
                    ControlCode::Cursor
                }
            }
            BuiltinCommand::ForwardChar => {
                if self.buffer.cursor() == self.buffer.char_len() {
                    ControlCode::Error
                } else {
                    self.buffer.cursor_right(1);
                    ControlCode::Cursor
                }
            }
            BuiltinCommand::BeginningOfLine => {
                self.buffer.move_to_start();
                ControlCode::Cursor
            }
            BuiltinCommand::EndOfLine => {
                self.buffer.move_to_end();
                ControlCode::Cursor
            }
            BuiltinCommand::DeleteChar => {
                if self.buffer.cursor() == self.buffer.char_len() {
                    ControlCode::Error
                } else {
                    self.buffer.delete(1);
                    ControlCode::Refresh
                }
            }
            BuiltinCommand::BackwardDeleteChar => {
                if self.buffer.cursor() == 0 {
                    ControlCode::Error
                } else {
                    self.buffer.delete_before_cursor(1);
                    ControlCode::Refresh
                }
            }
            BuiltinCommand::KillLine => {
                self.buffer.kill_to_end();
                ControlCode::Refresh
            }
            BuiltinCommand::BackwardKillLine => {
                self.buffer.kill_to_start();
                ControlCode::Refresh
            }
            BuiltinCommand::TransposeChars => {
                if self.buffer.transpose_chars() {
                    ControlCode::Refresh
                } else {
                    ControlCode::Error
                }
            }
            BuiltinCommand::Redisplay => ControlCode::Redisplay,
            BuiltinCommand::AcceptLine => ControlCode::Accept,
            BuiltinCommand::PreviousHistory => self.recall_previous(),
            BuiltinCommand::NextHistory => self.recall_next(),
        }
    }

    /// Walk one entry back in history, stashing the in-progress line the
    /// first time.
    fn recall_previous(&mut self) -> ControlCode {
        let target = match &self.recall {
            None if self.history.is_empty() => return ControlCode::Error,
            None => self.history.len(),
            Some(state) if state.index > 1 => state.index - 1,
            Some(_) => return ControlCode::Error,
        };
        let line = match self.history.get(target) {
            Ok(line) => line.to_string(),
            Err(err) => {
                log::debug!("history recall failed: {err}");
                return ControlCode::Error;
            }
        };
        match &mut self.recall {
            Some(state) => state.index = target,
            None => {
                self.recall = Some(RecallState {
                    index: target,
                    stash: self.buffer.text().to_string(),
                });
            }
        }
        self.buffer.set_text(line);
        self.buffer.move_to_end();
        ControlCode::Refresh
    }

    /// Walk one entry forward; past the newest entry the stashed line comes
    /// back and the recall walk ends.
    fn recall_next(&mut self) -> ControlCode {
        match self.recall.take() {
            None => ControlCode::Error,
            Some(state) if state.index >= self.history.len() => {
                self.buffer.set_text(state.stash);
                self.buffer.move_to_end();
                ControlCode::Refresh
            }
            Some(mut state) => {
                state.index += 1;
                match self.history.get(state.index) {
                    Ok(line) => {
                        let line = line.to_string();
                        self.buffer.set_text(line);
                        self.buffer.move_to_end();
                        self.recall = Some(state);
                        ControlCode::Refresh
                    }
                    Err(err) => {
                        log::debug!("history recall failed: {err}");
                        ControlCode::Error
                    }
                }
            }
        }
    }

    /// Handle pending bytes with no binding. Complete UTF-8 text is inserted
    /// at the cursor; an incomplete trailing character returns `None` so the
    /// loop waits for continuation bytes. Anything containing a control byte
    /// is not literal text: a broken escape or binding prefix (e.g. `^X`
    /// followed by an unbound key) is discarded whole with the error control
    /// code rather than leaking control characters into the line.
    fn insert_pending(&mut self) -> Option<ControlCode> {
        if self.pending.iter().any(|&b| is_control_byte(b)) {
            log::debug!("discarding unbound key sequence {:?}", self.pending);
            self.pending.clear();
            return Some(ControlCode::Error);
        }
        match std::str::from_utf8(&self.pending) {
            Ok(text) => {
                let text = text.to_string();
                self.pending.clear();
                self.buffer.insert_str(&text);
                Some(ControlCode::Normal)
            }
            Err(err) if err.error_len().is_none() => None,
            Err(_) => {
                log::debug!("discarding invalid input bytes {:?}", self.pending);
                self.pending.clear();
                Some(ControlCode::Error)
            }
        }
    }

    /// Salvage pending literal text when the stream ends mid-sequence.
    fn flush_pending_at_eof(&mut self) {
        if self.pending.is_empty() {
            return;
        }
        if self.pending.first() != Some(&0x1b) {
            if let Ok(text) = std::str::from_utf8(&self.pending) {
                if !text.chars().any(char::is_control) {
                    let text = text.to_string();
                    self.buffer.insert_str(&text);
                }
            }
        }
        self.pending.clear();
    }

    /// Complete the line: terminate the display, record history, reset the
    /// buffer for the next call.
    fn finish_line(&mut self, terminal: &mut dyn Terminal) -> Result<String, SessionError> {
        terminal.write("\r\n")?;
        let line = self.buffer.text().to_string();
        // Blank lines (no graphic character) are returned but not recorded.
        if line.chars().any(|c| !c.is_whitespace() && !c.is_control()) {
            self.history.append(line.clone());
        }
        self.buffer.clear();
        self.recall = None;
        Ok(line)
    }

    /// Repaint the prompt and buffer in place, then position the cursor.
    fn repaint(&mut self, terminal: &mut dyn Terminal) -> Result<(), SessionError> {
        let mut frame = String::from("\r");
        frame.push_str(ERASE_TO_EOL);
        frame.push_str(&self.prompt);
        frame.push_str(self.buffer.text());
        terminal.write(&frame)?;
        self.place_cursor(terminal)
    }

    /// Move the terminal cursor to the buffer cursor's display column.
    fn place_cursor(&mut self, terminal: &mut dyn Terminal) -> Result<(), SessionError> {
        let column = UnicodeWidthStr::width(self.prompt.as_str())
            + UnicodeWidthStr::width(self.buffer.text_before_cursor());
        let column = column.min(terminal.width().saturating_sub(1));
        if column == 0 {
            terminal.write("\r")?;
        } else {
            terminal.write(&format!("\r\u{1b}[{column}C"))?;
        }
        Ok(())
    }
}

fn is_control_byte(byte: u8) -> bool {
    byte < 0x20 || byte == 0x7f
}
