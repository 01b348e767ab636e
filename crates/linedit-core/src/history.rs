//! Append-only, index-addressable store of submitted lines.
//!
//! Entries are 1-based and contiguous: the first appended line is index 1,
//! the most recent is `len()`. Entries are never edited or removed by the
//! engine; eviction, if wanted, is a policy layered on top by the embedding.

use crate::error::HistoryError;

/// Ordered store of previously submitted lines.
#[derive(Debug, Clone, Default)]
pub struct HistoryStore {
    entries: Vec<String>,
}

impl HistoryStore {
    /// Create an empty history.
    pub fn new() -> Self {
        HistoryStore {
            entries: Vec::new(),
        }
    }

    /// Append a line as the next sequential entry. Always succeeds.
    pub fn append(&mut self, line: impl Into<String>) {
        self.entries.push(line.into());
    }

    /// Look up the entry at a 1-based index.
    ///
    /// Fails with a [`HistoryError`] carrying the offending index when it
    /// lies outside `[1, len]`.
    ///
    /// # Examples
    ///
    /// ```
    /// use linedit_core::history::HistoryStore;
    ///
    /// let mut history = HistoryStore::new();
    /// history.append("first");
    /// assert_eq!(history.get(1).unwrap(), "first");
    /// assert!(history.get(2).is_err());
    /// ```
    pub fn get(&self, index: usize) -> Result<&str, HistoryError> {
        if index == 0 || index > self.entries.len() {
            return Err(HistoryError::new(
                index,
                format!("get: valid range is 1..={}", self.entries.len()),
            ));
        }
        Ok(&self.entries[index - 1])
    }

    /// Number of stored entries. O(1).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no line has been submitted yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The most recent entry, if any.
    pub fn last(&self) -> Option<&str> {
        self.entries.last().map(String::as_str)
    }
}
