//! Error types shared across the line-editing engine.

use std::fmt;

/// Error raised by out-of-range history lookups.
///
/// Carries the offending index and a human-readable context string so the
/// caller can present a precise diagnostic. The owning session is unaffected
/// by this error; it is always recoverable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryError {
    /// The index that was requested.
    pub index: usize,
    /// Description of the access that failed.
    pub context: String,
}

impl HistoryError {
    /// Create a new history error for the given index.
    pub fn new(index: usize, context: impl Into<String>) -> Self {
        HistoryError {
            index,
            context: context.into(),
        }
    }
}

impl fmt::Display for HistoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "history index {} out of range: {}", self.index, self.context)
    }
}

impl std::error::Error for HistoryError {}

/// Error raised when a malformed key-sequence literal is supplied to `bind`.
///
/// Rejected at registration time, never during dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindingError {
    /// The literal that failed to parse.
    pub literal: String,
    /// Why parsing failed.
    pub reason: String,
}

impl BindingError {
    pub fn new(literal: impl Into<String>, reason: impl Into<String>) -> Self {
        BindingError {
            literal: literal.into(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for BindingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid key sequence '{}': {}", self.literal, self.reason)
    }
}

impl std::error::Error for BindingError {}

/// Failure reported by an extension function.
///
/// Faults are caught at the dispatch-loop boundary and degraded to the
/// `Error` control code; they never abort the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallbackFault {
    pub message: String,
}

impl CallbackFault {
    pub fn new(message: impl Into<String>) -> Self {
        CallbackFault {
            message: message.into(),
        }
    }
}

impl fmt::Display for CallbackFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "extension function fault: {}", self.message)
    }
}

impl std::error::Error for CallbackFault {}
