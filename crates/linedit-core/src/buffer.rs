//! Editable line buffer with cursor management.
//!
//! The LineBuffer owns the line currently being edited and the cursor
//! position within it. The cursor is a character (rune) index, never a byte
//! index, so multi-byte UTF-8 content is handled uniformly. Every operation
//! maintains the invariant `0 <= cursor <= char_len`; out-of-bounds moves
//! and deletes clamp to the nearest valid bound instead of failing.

/// A mutable single-line text buffer with a cursor.
///
/// # Examples
///
/// ```
/// use linedit_core::buffer::LineBuffer;
///
/// let mut buffer = LineBuffer::new();
/// buffer.insert_str("hello world");
/// buffer.set_cursor(5);
/// buffer.insert_str(",");
/// assert_eq!(buffer.text(), "hello, world");
/// assert_eq!(buffer.cursor(), 6);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineBuffer {
    text: String,
    cursor: usize,
}

impl LineBuffer {
    /// Create a new empty buffer with the cursor at position 0.
    pub fn new() -> Self {
        LineBuffer {
            text: String::new(),
            cursor: 0,
        }
    }

    /// Get the current text content.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Get the cursor position as a character index.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Number of characters in the buffer.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    /// True when the buffer holds no text.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// The text before the cursor.
    pub fn text_before_cursor(&self) -> &str {
        &self.text[..self.byte_index(self.cursor)]
    }

    /// Replace the buffer contents, clamping the cursor into the new text.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.cursor = self.cursor.min(self.char_len());
    }

    /// Move the cursor to an absolute character position, clamped to
    /// `[0, char_len]`.
    pub fn set_cursor(&mut self, position: usize) {
        self.cursor = position.min(self.char_len());
    }

    /// Insert text at the cursor, shifting trailing content right. The
    /// cursor ends up after the inserted text.
    pub fn insert_str(&mut self, text: &str) {
        let at = self.byte_index(self.cursor);
        self.text.insert_str(at, text);
        self.cursor += text.chars().count();
    }

    /// Delete up to `count` characters before the cursor, shifting trailing
    /// content left. Returns the deleted text. Clamps at the start of the
    /// buffer.
    pub fn delete_before_cursor(&mut self, count: usize) -> String {
        let count = count.min(self.cursor);
        let start = self.cursor - count;
        let start_byte = self.byte_index(start);
        let end_byte = self.byte_index(self.cursor);
        let removed = self.text[start_byte..end_byte].to_string();
        self.text.replace_range(start_byte..end_byte, "");
        self.cursor = start;
        removed
    }

    /// Delete up to `count` characters at and after the cursor. Returns the
    /// deleted text. The cursor does not move. Clamps at the end of the
    /// buffer.
    pub fn delete(&mut self, count: usize) -> String {
        let end = (self.cursor + count).min(self.char_len());
        let start_byte = self.byte_index(self.cursor);
        let end_byte = self.byte_index(end);
        let removed = self.text[start_byte..end_byte].to_string();
        self.text.replace_range(start_byte..end_byte, "");
        removed
    }

    /// Delete the characters in `[start, end)`, both clamped to the buffer.
    /// The cursor is adjusted so it stays on the same character where
    /// possible.
    pub fn delete_range(&mut self, start: usize, end: usize) -> String {
        let len = self.char_len();
        let start = start.min(len);
        let end = end.clamp(start, len);
        let start_byte = self.byte_index(start);
        let end_byte = self.byte_index(end);
        let removed = self.text[start_byte..end_byte].to_string();
        self.text.replace_range(start_byte..end_byte, "");
        if self.cursor > end {
            self.cursor -= end - start;
        } else if self.cursor > start {
            self.cursor = start;
        }
        removed
    }

    /// Move the cursor left by `count` characters, clamping at 0.
    pub fn cursor_left(&mut self, count: usize) {
        self.cursor = self.cursor.saturating_sub(count);
    }

    /// Move the cursor right by `count` characters, clamping at the end.
    pub fn cursor_right(&mut self, count: usize) {
        self.cursor = (self.cursor + count).min(self.char_len());
    }

    /// Move the cursor to the start of the line.
    pub fn move_to_start(&mut self) {
        self.cursor = 0;
    }

    /// Move the cursor to the end of the line.
    pub fn move_to_end(&mut self) {
        self.cursor = self.char_len();
    }

    /// Delete from the cursor to the end of the line. Returns the deleted
    /// text.
    pub fn kill_to_end(&mut self) -> String {
        let remaining = self.char_len() - self.cursor;
        self.delete(remaining)
    }

    /// Delete from the start of the line to the cursor. Returns the deleted
    /// text.
    pub fn kill_to_start(&mut self) -> String {
        self.delete_before_cursor(self.cursor)
    }

    /// Swap the two characters immediately before the cursor. Returns false
    /// when fewer than two characters precede the cursor; the buffer is
    /// unchanged in that case.
    pub fn transpose_chars(&mut self) -> bool {
        if self.cursor < 2 {
            return false;
        }
        let first = self.byte_index(self.cursor - 2);
        let second = self.byte_index(self.cursor - 1);
        let end = self.byte_index(self.cursor);
        let swapped = format!("{}{}", &self.text[second..end], &self.text[first..second]);
        self.text.replace_range(first..end, &swapped);
        true
    }

    /// Reset the buffer to empty with the cursor at 0.
    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    /// Byte offset of the given character index. A character index equal to
    /// the length maps to the end of the string.
    fn byte_index(&self, char_index: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_index)
            .map(|(i, _)| i)
            .unwrap_or(self.text.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_buffer_is_empty() {
        let buffer = LineBuffer::new();
        assert_eq!(buffer.text(), "");
        assert_eq!(buffer.cursor(), 0);
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_insert_at_cursor_shifts_right() {
        let mut buffer = LineBuffer::new();
        buffer.insert_str("held");
        buffer.set_cursor(3);
        buffer.insert_str("lo wor");
        assert_eq!(buffer.text(), "hello world");
        assert_eq!(buffer.cursor(), 9);
    }

    #[test]
    fn test_delete_before_cursor() {
        let mut buffer = LineBuffer::new();
        buffer.insert_str("hello");
        buffer.set_cursor(3);
        let removed = buffer.delete_before_cursor(2);
        assert_eq!(removed, "el");
        assert_eq!(buffer.text(), "hlo");
        assert_eq!(buffer.cursor(), 1);
    }

    #[test]
    fn test_delete_before_cursor_clamps_at_start() {
        let mut buffer = LineBuffer::new();
        buffer.insert_str("ab");
        buffer.set_cursor(1);
        let removed = buffer.delete_before_cursor(10);
        assert_eq!(removed, "a");
        assert_eq!(buffer.text(), "b");
        assert_eq!(buffer.cursor(), 0);
    }

    #[test]
    fn test_delete_forward_clamps_at_end() {
        let mut buffer = LineBuffer::new();
        buffer.insert_str("hello");
        buffer.set_cursor(3);
        let removed = buffer.delete(10);
        assert_eq!(removed, "lo");
        assert_eq!(buffer.text(), "hel");
        assert_eq!(buffer.cursor(), 3);
    }

    #[test]
    fn test_delete_range_adjusts_cursor() {
        let mut buffer = LineBuffer::new();
        buffer.insert_str("hello world");
        buffer.set_cursor(8);
        let removed = buffer.delete_range(2, 5);
        assert_eq!(removed, "llo");
        assert_eq!(buffer.text(), "he world");
        assert_eq!(buffer.cursor(), 5);

        buffer.set_cursor(3);
        buffer.delete_range(2, 6);
        assert_eq!(buffer.cursor(), 2);
    }

    #[test]
    fn test_cursor_movement_clamps() {
        let mut buffer = LineBuffer::new();
        buffer.insert_str("abc");
        buffer.cursor_left(10);
        assert_eq!(buffer.cursor(), 0);
        buffer.cursor_right(10);
        assert_eq!(buffer.cursor(), 3);
        buffer.set_cursor(100);
        assert_eq!(buffer.cursor(), 3);
    }

    #[test]
    fn test_kill_to_end_and_start() {
        let mut buffer = LineBuffer::new();
        buffer.insert_str("hello world");
        buffer.set_cursor(5);
        assert_eq!(buffer.kill_to_end(), " world");
        assert_eq!(buffer.text(), "hello");
        assert_eq!(buffer.kill_to_start(), "hello");
        assert_eq!(buffer.text(), "");
        assert_eq!(buffer.cursor(), 0);
    }

    #[test]
    fn test_transpose_chars() {
        let mut buffer = LineBuffer::new();
        buffer.insert_str("hello");
        buffer.set_cursor(5);
        assert!(buffer.transpose_chars());
        assert_eq!(buffer.text(), "helol");
        assert_eq!(buffer.cursor(), 5);

        buffer.set_cursor(1);
        assert!(!buffer.transpose_chars());
        assert_eq!(buffer.text(), "helol");
    }

    #[test]
    fn test_unicode_char_indexing() {
        let mut buffer = LineBuffer::new();
        buffer.insert_str("こんにちは");
        assert_eq!(buffer.char_len(), 5);
        assert_eq!(buffer.cursor(), 5);
        buffer.set_cursor(2);
        buffer.insert_str("!");
        assert_eq!(buffer.text(), "こん!にちは");
        assert_eq!(buffer.cursor(), 3);
        let removed = buffer.delete_before_cursor(1);
        assert_eq!(removed, "!");
        assert_eq!(buffer.text(), "こんにちは");
    }

    #[test]
    fn test_text_before_cursor() {
        let mut buffer = LineBuffer::new();
        buffer.insert_str("héllo");
        buffer.set_cursor(2);
        assert_eq!(buffer.text_before_cursor(), "hé");
    }

    #[test]
    fn test_set_text_clamps_cursor() {
        let mut buffer = LineBuffer::new();
        buffer.insert_str("a long line of text");
        buffer.move_to_end();
        buffer.set_text("ab");
        assert_eq!(buffer.cursor(), 2);
    }

    // Invariant fuzz: the cursor must stay within [0, char_len] under any
    // sequence of edits. A small deterministic LCG drives the op mix.
    #[test]
    fn test_cursor_invariant_under_random_ops() {
        let mut buffer = LineBuffer::new();
        let mut state: u64 = 0x2545_f491_4f6c_dd1d;
        let mut next = move || {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            (state >> 33) as usize
        };

        for _ in 0..2000 {
            match next() % 8 {
                0 => buffer.insert_str("ab"),
                1 => buffer.insert_str("日本"),
                2 => {
                    buffer.delete_before_cursor(next() % 4);
                }
                3 => {
                    buffer.delete(next() % 4);
                }
                4 => buffer.cursor_left(next() % 5),
                5 => buffer.cursor_right(next() % 5),
                6 => buffer.set_cursor(next() % 32),
                _ => {
                    buffer.delete_range(next() % 16, next() % 16);
                }
            }
            assert!(
                buffer.cursor() <= buffer.char_len(),
                "cursor {} exceeded length {}",
                buffer.cursor(),
                buffer.char_len()
            );
        }
    }
}
