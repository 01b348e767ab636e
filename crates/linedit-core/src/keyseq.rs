//! Parsing of key-sequence literals into raw byte sequences.
//!
//! Bind calls accept human-readable literals in the classic notation:
//! caret form for control characters (`^A`, `^[`, `^?`), backslash escapes
//! for common specials (`\e`, `\t`, `\n`), and everything else as literal
//! characters (multi-byte UTF-8 included). A malformed literal is rejected
//! with a [`BindingError`] at registration time so dispatch never sees one.

use crate::error::BindingError;

/// Parse a key-sequence literal into the bytes the terminal would send.
///
/// # Examples
///
/// ```
/// use linedit_core::keyseq::parse;
///
/// assert_eq!(parse("^I").unwrap(), vec![0x09]);
/// assert_eq!(parse("\\e[A").unwrap(), vec![0x1b, b'[', b'A']);
/// assert_eq!(parse("g").unwrap(), vec![b'g']);
/// ```
pub fn parse(literal: &str) -> Result<Vec<u8>, BindingError> {
    if literal.is_empty() {
        return Err(BindingError::new(literal, "empty key sequence"));
    }

    let mut bytes = Vec::new();
    let mut chars = literal.chars();

    while let Some(ch) = chars.next() {
        match ch {
            '^' => {
                let next = chars
                    .next()
                    .ok_or_else(|| BindingError::new(literal, "dangling caret"))?;
                bytes.push(control_byte(next).ok_or_else(|| {
                    BindingError::new(literal, format!("'^{next}' is not a control character"))
                })?);
            }
            '\\' => {
                let next = chars
                    .next()
                    .ok_or_else(|| BindingError::new(literal, "dangling backslash"))?;
                bytes.push(escape_byte(next).ok_or_else(|| {
                    BindingError::new(literal, format!("unknown escape '\\{next}'"))
                })?);
            }
            _ => {
                let mut utf8 = [0u8; 4];
                bytes.extend_from_slice(ch.encode_utf8(&mut utf8).as_bytes());
            }
        }
    }

    Ok(bytes)
}

/// Map the character following a caret to its control byte.
fn control_byte(ch: char) -> Option<u8> {
    match ch {
        '?' => Some(0x7f),
        '@'..='_' => Some(ch as u8 ^ 0x40),
        'a'..='z' => Some(ch.to_ascii_uppercase() as u8 ^ 0x40),
        _ => None,
    }
}

/// Map a backslash escape to its byte.
fn escape_byte(ch: char) -> Option<u8> {
    match ch {
        'a' => Some(0x07),
        'b' => Some(0x08),
        'e' => Some(0x1b),
        'n' => Some(b'\n'),
        'r' => Some(b'\r'),
        't' => Some(b'\t'),
        '0' => Some(0x00),
        '\\' => Some(b'\\'),
        '^' => Some(b'^'),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_caret_notation() {
        assert_eq!(parse("^A").unwrap(), vec![0x01]);
        assert_eq!(parse("^a").unwrap(), vec![0x01]);
        assert_eq!(parse("^I").unwrap(), vec![0x09]);
        assert_eq!(parse("^Z").unwrap(), vec![0x1a]);
        assert_eq!(parse("^[").unwrap(), vec![0x1b]);
        assert_eq!(parse("^?").unwrap(), vec![0x7f]);
        assert_eq!(parse("^@").unwrap(), vec![0x00]);
        assert_eq!(parse("^_").unwrap(), vec![0x1f]);
    }

    #[test]
    fn test_backslash_escapes() {
        assert_eq!(parse("\\e").unwrap(), vec![0x1b]);
        assert_eq!(parse("\\t").unwrap(), vec![0x09]);
        assert_eq!(parse("\\n").unwrap(), vec![0x0a]);
        assert_eq!(parse("\\r").unwrap(), vec![0x0d]);
        assert_eq!(parse("\\\\").unwrap(), vec![b'\\']);
        assert_eq!(parse("\\^").unwrap(), vec![b'^']);
    }

    #[test]
    fn test_mixed_literal() {
        // An arrow-key escape sequence written as a literal.
        assert_eq!(parse("\\e[D").unwrap(), vec![0x1b, b'[', b'D']);
        // Caret followed by plain characters.
        assert_eq!(parse("^Xs").unwrap(), vec![0x18, b's']);
    }

    #[test]
    fn test_plain_characters_pass_through() {
        assert_eq!(parse("abc").unwrap(), vec![b'a', b'b', b'c']);
        assert_eq!(parse("é").unwrap(), "é".as_bytes().to_vec());
    }

    #[test]
    fn test_malformed_literals() {
        let err = parse("").unwrap_err();
        assert!(err.reason.contains("empty"));

        let err = parse("^").unwrap_err();
        assert!(err.reason.contains("dangling caret"));
        assert_eq!(err.literal, "^");

        let err = parse("\\").unwrap_err();
        assert!(err.reason.contains("dangling backslash"));

        let err = parse("^!").unwrap_err();
        assert!(err.reason.contains("not a control character"));

        let err = parse("\\q").unwrap_err();
        assert!(err.reason.contains("unknown escape"));
    }
}
