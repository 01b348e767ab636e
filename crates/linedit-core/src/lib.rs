//! Core line-editing engine: buffer, history, key bindings, extension
//! functions, and the dispatch loop that ties them together.
//!
//! This crate is terminal-agnostic. All I/O flows through the
//! [`Terminal`] trait; concrete backends (Unix raw mode, scripted test
//! terminal) live in the `linedit-io` crate.
//!
//! # Quick start
//!
//! ```no_run
//! use linedit_core::{ControlCode, Session, SessionConfig};
//! # fn run(terminal: &mut dyn linedit_core::Terminal) -> Result<(), linedit_core::SessionError> {
//! let mut session = Session::new(SessionConfig {
//!     prompt: "repl> ".to_string(),
//!     ..SessionConfig::default()
//! })?;
//!
//! session.register_function(
//!     "complete-word",
//!     "insert a canned completion",
//!     Box::new(|ops, _key| {
//!         ops.insert_str("hello!");
//!         Ok(ControlCode::Refresh)
//!     }),
//! );
//! session.bind("^I", "complete-word").map_err(linedit_core::SessionError::Binding)?;
//!
//! while let Some(line) = session.read_line(terminal)? {
//!     println!("got: {line}");
//! }
//! # Ok(())
//! # }
//! ```

pub mod bindings;
pub mod buffer;
pub mod command;
pub mod error;
pub mod history;
pub mod keyseq;
pub mod registry;
pub mod session;
pub mod terminal;

pub use bindings::{KeyBindingTable, Resolution};
pub use buffer::LineBuffer;
pub use command::{BuiltinCommand, ControlCode};
pub use error::{BindingError, CallbackFault, HistoryError};
pub use history::HistoryStore;
pub use registry::{EditOps, ExtensionCallback, FunctionRegistry};
pub use session::{Session, SessionConfig, SessionError};
pub use terminal::{InputEvent, Terminal, TerminalError};
