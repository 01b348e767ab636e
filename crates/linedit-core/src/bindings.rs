//! Trie-based key binding table mapping byte sequences to action names.
//!
//! The table stores raw byte sequences so multi-byte terminal escapes (arrow
//! keys and friends) resolve the same way single control bytes do. During
//! dispatch the pending input is matched incrementally: an exact hit yields
//! the bound action name, a strict prefix means more bytes must arrive, and
//! anything else falls back to literal self-insert in the dispatch loop.

use std::collections::BTreeMap;

use crate::command::BuiltinCommand;
use crate::error::BindingError;
use crate::keyseq;

/// The default emacs-flavoured binding set installed by
/// [`KeyBindingTable::with_defaults`].
const DEFAULT_BINDINGS: [(&str, BuiltinCommand); 19] = [
    ("^A", BuiltinCommand::BeginningOfLine),
    ("^B", BuiltinCommand::BackwardChar),
    ("^D", BuiltinCommand::DeleteChar),
    ("^E", BuiltinCommand::EndOfLine),
    ("^F", BuiltinCommand::ForwardChar),
    ("^H", BuiltinCommand::BackwardDeleteChar),
    ("^?", BuiltinCommand::BackwardDeleteChar),
    ("^J", BuiltinCommand::AcceptLine),
    ("^K", BuiltinCommand::KillLine),
    ("^L", BuiltinCommand::Redisplay),
    ("^M", BuiltinCommand::AcceptLine),
    ("^N", BuiltinCommand::NextHistory),
    ("^P", BuiltinCommand::PreviousHistory),
    ("^T", BuiltinCommand::TransposeChars),
    ("^U", BuiltinCommand::BackwardKillLine),
    ("\\e[A", BuiltinCommand::PreviousHistory),
    ("\\e[B", BuiltinCommand::NextHistory),
    ("\\e[C", BuiltinCommand::ForwardChar),
    ("\\e[D", BuiltinCommand::BackwardChar),
];

/// A node in the binding trie.
#[derive(Debug, Clone, Default)]
struct TrieNode {
    /// Action name when this node terminates a bound sequence.
    name: Option<String>,
    /// Children indexed by the next byte of the sequence.
    children: BTreeMap<u8, TrieNode>,
}

/// Result of resolving a pending byte sequence against the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The sequence is bound to the named action.
    Bound(String),
    /// The sequence is a strict prefix of one or more bindings.
    Prefix,
    /// No binding matches and none can; the bytes are literal input.
    Unbound,
}

/// Mapping from key byte sequences to action names.
///
/// Keys are unique; binding the same sequence twice keeps the later name.
#[derive(Debug, Clone, Default)]
pub struct KeyBindingTable {
    root: TrieNode,
}

impl KeyBindingTable {
    /// Create an empty table with no bindings.
    pub fn new() -> Self {
        KeyBindingTable {
            root: TrieNode::default(),
        }
    }

    /// Create a table pre-loaded with the default emacs-flavoured bindings.
    pub fn with_defaults() -> Self {
        let mut table = Self::new();
        for (literal, cmd) in DEFAULT_BINDINGS {
            match keyseq::parse(literal) {
                Ok(bytes) => table.bind_bytes(&bytes, cmd.name()),
                // A malformed literal here is a bug in the table itself.
                Err(err) => debug_assert!(false, "malformed default binding {literal:?}: {err}"),
            }
        }
        table
    }

    /// Bind a key-sequence literal to an action name, overwriting any
    /// existing binding for that sequence.
    ///
    /// # Examples
    ///
    /// ```
    /// use linedit_core::bindings::{KeyBindingTable, Resolution};
    ///
    /// let mut table = KeyBindingTable::new();
    /// table.bind("^I", "complete-word").unwrap();
    /// assert_eq!(
    ///     table.resolve(&[0x09]),
    ///     Resolution::Bound("complete-word".to_string())
    /// );
    /// ```
    pub fn bind(&mut self, literal: &str, action: &str) -> Result<(), BindingError> {
        let bytes = keyseq::parse(literal)?;
        self.bind_bytes(&bytes, action);
        Ok(())
    }

    /// Bind a raw byte sequence to an action name.
    pub fn bind_bytes(&mut self, bytes: &[u8], action: &str) {
        let mut node = &mut self.root;
        for &byte in bytes {
            node = node.children.entry(byte).or_default();
        }
        node.name = Some(action.to_string());
    }

    /// Resolve a pending byte sequence.
    pub fn resolve(&self, bytes: &[u8]) -> Resolution {
        if bytes.is_empty() {
            return Resolution::Unbound;
        }
        let mut node = &self.root;
        for &byte in bytes {
            match node.children.get(&byte) {
                Some(child) => node = child,
                None => return Resolution::Unbound,
            }
        }
        match &node.name {
            Some(name) => Resolution::Bound(name.clone()),
            None => Resolution::Prefix,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_table_resolves_unbound() {
        let table = KeyBindingTable::new();
        assert_eq!(table.resolve(&[0x09]), Resolution::Unbound);
        assert_eq!(table.resolve(&[]), Resolution::Unbound);
    }

    #[test]
    fn test_bind_and_resolve() {
        let mut table = KeyBindingTable::new();
        table.bind("^I", "complete").unwrap();
        assert_eq!(table.resolve(&[0x09]), Resolution::Bound("complete".into()));
        assert_eq!(table.resolve(&[0x0a]), Resolution::Unbound);
    }

    #[test]
    fn test_last_bind_wins() {
        let mut table = KeyBindingTable::new();
        table.bind("^I", "first-action").unwrap();
        table.bind("^I", "second-action").unwrap();
        assert_eq!(
            table.resolve(&[0x09]),
            Resolution::Bound("second-action".into())
        );
    }

    #[test]
    fn test_multi_byte_sequence_prefix() {
        let mut table = KeyBindingTable::new();
        table.bind("\\e[D", "backward-char").unwrap();

        assert_eq!(table.resolve(&[0x1b]), Resolution::Prefix);
        assert_eq!(table.resolve(&[0x1b, b'[']), Resolution::Prefix);
        assert_eq!(
            table.resolve(&[0x1b, b'[', b'D']),
            Resolution::Bound("backward-char".into())
        );
        assert_eq!(table.resolve(&[0x1b, b'[', b'Z']), Resolution::Unbound);
    }

    #[test]
    fn test_malformed_literal_is_rejected() {
        let mut table = KeyBindingTable::new();
        assert!(table.bind("^", "anything").is_err());
        assert!(table.bind("", "anything").is_err());
        // Nothing was inserted.
        assert_eq!(table.resolve(&[b'^']), Resolution::Unbound);
    }

    #[test]
    fn test_every_default_literal_parses_and_resolves() {
        let table = KeyBindingTable::with_defaults();
        for (literal, cmd) in DEFAULT_BINDINGS {
            let bytes = keyseq::parse(literal)
                .unwrap_or_else(|err| panic!("default binding {literal:?} failed to parse: {err}"));
            assert_eq!(
                table.resolve(&bytes),
                Resolution::Bound(cmd.name().to_string()),
                "default binding {literal:?} did not resolve"
            );
        }
    }

    #[test]
    fn test_defaults_cover_core_editing_keys() {
        let table = KeyBindingTable::with_defaults();
        assert_eq!(
            table.resolve(&[0x01]),
            Resolution::Bound("beginning-of-line".into())
        );
        assert_eq!(
            table.resolve(&[0x0d]),
            Resolution::Bound("accept-line".into())
        );
        assert_eq!(
            table.resolve(&[0x7f]),
            Resolution::Bound("backward-delete-char".into())
        );
        assert_eq!(
            table.resolve(&[0x1b, b'[', b'A']),
            Resolution::Bound("previous-history".into())
        );
    }

    #[test]
    fn test_rebinding_a_default_key() {
        let mut table = KeyBindingTable::with_defaults();
        table.bind("^A", "my-custom-action").unwrap();
        assert_eq!(
            table.resolve(&[0x01]),
            Resolution::Bound("my-custom-action".into())
        );
    }

    #[test]
    fn test_shorter_binding_shadows_longer_prefix_path() {
        let mut table = KeyBindingTable::new();
        table.bind("\\e[D", "backward-char").unwrap();
        table.bind("\\e", "abort").unwrap();
        // ESC alone is now bound even though it is also a prefix; the
        // dispatch loop acts on the exact match.
        assert_eq!(table.resolve(&[0x1b]), Resolution::Bound("abort".into()));
    }
}
