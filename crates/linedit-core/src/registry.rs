//! Registry of user-supplied extension functions.
//!
//! An extension function is a (name, description, callback) triple. The
//! callback receives an explicit [`EditOps`] capability over the session's
//! buffer and history plus the key code that triggered it, and answers with
//! a [`ControlCode`]. Names are unique; re-registration overwrites.

use std::collections::HashMap;

use crate::buffer::LineBuffer;
use crate::command::ControlCode;
use crate::error::CallbackFault;
use crate::history::HistoryStore;

/// The editing capability handed to extension callbacks.
///
/// Exposes the engine's buffer-mutation primitives and read access to the
/// history, scoped to the duration of one invocation. The callback's
/// signature makes the contract visible: everything it may touch arrives
/// through this handle.
pub struct EditOps<'a> {
    buffer: &'a mut LineBuffer,
    history: &'a HistoryStore,
}

impl<'a> EditOps<'a> {
    pub fn new(buffer: &'a mut LineBuffer, history: &'a HistoryStore) -> Self {
        EditOps { buffer, history }
    }

    /// Insert text at the cursor.
    pub fn insert_str(&mut self, text: &str) {
        self.buffer.insert_str(text);
    }

    /// Delete up to `count` characters before the cursor.
    pub fn delete_before_cursor(&mut self, count: usize) -> String {
        self.buffer.delete_before_cursor(count)
    }

    /// Delete up to `count` characters at and after the cursor.
    pub fn delete(&mut self, count: usize) -> String {
        self.buffer.delete(count)
    }

    /// Delete the characters in `[start, end)`, clamped to the line.
    pub fn delete_range(&mut self, start: usize, end: usize) -> String {
        self.buffer.delete_range(start, end)
    }

    /// Move the cursor to an absolute position, clamped.
    pub fn set_cursor(&mut self, position: usize) {
        self.buffer.set_cursor(position);
    }

    /// Move the cursor left, clamped at the start.
    pub fn cursor_left(&mut self, count: usize) {
        self.buffer.cursor_left(count);
    }

    /// Move the cursor right, clamped at the end.
    pub fn cursor_right(&mut self, count: usize) {
        self.buffer.cursor_right(count);
    }

    /// The current line text.
    pub fn line(&self) -> &str {
        self.buffer.text()
    }

    /// The cursor position as a character index.
    pub fn cursor(&self) -> usize {
        self.buffer.cursor()
    }

    /// Number of history entries.
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Look up a history entry by 1-based index.
    pub fn history_get(&self, index: usize) -> Result<&str, crate::error::HistoryError> {
        self.history.get(index)
    }
}

/// Boxed callback type for extension functions.
pub type ExtensionCallback =
    Box<dyn FnMut(&mut EditOps<'_>, u8) -> Result<ControlCode, CallbackFault>>;

struct ExtensionFunction {
    description: String,
    callback: ExtensionCallback,
}

/// Name-keyed registry of extension functions.
#[derive(Default)]
pub struct FunctionRegistry {
    entries: HashMap<String, ExtensionFunction>,
}

impl std::fmt::Debug for FunctionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("FunctionRegistry")
            .field("names", &names)
            .finish()
    }
}

impl FunctionRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        FunctionRegistry {
            entries: HashMap::new(),
        }
    }

    /// Register a named extension function, overwriting any existing entry
    /// with the same name.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        description: impl Into<String>,
        callback: ExtensionCallback,
    ) {
        self.entries.insert(
            name.into(),
            ExtensionFunction {
                description: description.into(),
                callback,
            },
        );
    }

    /// The description of a registered function, for introspection/help.
    pub fn describe(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(|e| e.description.as_str())
    }

    /// True when a function with this name is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Number of registered functions.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no functions are registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Invoke a registered function with the triggering key code.
    ///
    /// Returns `None` when no function with that name exists; otherwise the
    /// callback's result is propagated unchanged. Fault containment (snapshot
    /// restore, panic capture) is the dispatch loop's responsibility.
    pub fn invoke(
        &mut self,
        name: &str,
        key: u8,
        ops: &mut EditOps<'_>,
    ) -> Option<Result<ControlCode, CallbackFault>> {
        self.entries
            .get_mut(name)
            .map(|entry| (entry.callback)(ops, key))
    }
}
