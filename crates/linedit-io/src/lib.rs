//! Terminal backends for the `linedit-core` engine.
//!
//! Two implementations of [`linedit_core::Terminal`]:
//!
//! - [`ScriptedTerminal`]: in-memory, deterministic, for tests and examples.
//! - [`UnixTerminal`] (Unix only): raw-mode stdin/stdout backend.

pub mod mock;

#[cfg(unix)]
pub mod unix;

pub use mock::ScriptedTerminal;

#[cfg(unix)]
pub use unix::UnixTerminal;
