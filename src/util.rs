//! Hex conversion at the edges of the crate
//!
//! Code travels as hex text in the puzzle corpus, on the command line and in
//! playground links. Everything inside the crate works on bytes.

use crate::error::PuzzleError;
use crate::opcodes::PLACEHOLDER;
use std::fmt::Write;

/// Two character marker used in corpus text for an open operator slot
pub const PLACEHOLDER_MARKER: &str = "XX";

/// Parse hex code text into bytes. `XX` (either case) becomes [`PLACEHOLDER`].
///
/// An optional `0x` prefix and surrounding whitespace are ignored.
pub fn parse_hex_code(text: &str) -> Result<Vec<u8>, PuzzleError> {
    let trimmed = text.trim();
    let (digits, prefix_len) = match trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
    {
        Some(rest) => (rest, 2),
        None => (trimmed, 0),
    };

    let raw = digits.as_bytes();
    if raw.len() % 2 != 0 {
        return Err(PuzzleError::MalformedHex {
            position: prefix_len + raw.len(),
            reason: "odd number of hex digits".to_string(),
        });
    }

    let mut bytes = Vec::with_capacity(raw.len() / 2);
    for (i, pair) in raw.chunks(2).enumerate() {
        let position = prefix_len + i * 2;
        if pair.eq_ignore_ascii_case(PLACEHOLDER_MARKER.as_bytes()) {
            bytes.push(PLACEHOLDER);
            continue;
        }
        let hi = hex_value(pair[0]).ok_or_else(|| bad_digit(position, pair[0]))?;
        let lo = hex_value(pair[1]).ok_or_else(|| bad_digit(position + 1, pair[1]))?;
        bytes.push((hi << 4) | lo);
    }
    Ok(bytes)
}

/// Value of a single ASCII hex digit
pub fn hex_value(digit: u8) -> Option<u8> {
    match digit {
        b'0'..=b'9' => Some(digit - b'0'),
        b'a'..=b'f' => Some(digit - b'a' + 10),
        b'A'..=b'F' => Some(digit - b'A' + 10),
        _ => None,
    }
}

fn bad_digit(position: usize, digit: u8) -> PuzzleError {
    PuzzleError::MalformedHex {
        position,
        reason: format!("'{}' is not a hex digit", char::from(digit).escape_default()),
    }
}

/// Lowercase hex, no prefix
pub fn to_hex(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        let _ = write!(out, "{:02x}", b);
    }
    out
}

/// Uppercase hex, no prefix
pub fn to_hex_upper(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        let _ = write!(out, "{:02X}", b);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn test_parse_plain_and_prefixed() {
        assert_eq!(parse_hex_code("600a01").unwrap(), vec![0x60, 0x0a, 0x01]);
        assert_eq!(parse_hex_code("0x600A01").unwrap(), vec![0x60, 0x0a, 0x01]);
        assert_eq!(parse_hex_code("  6001\n").unwrap(), vec![0x60, 0x01]);
        assert!(parse_hex_code("").unwrap().is_empty());
    }

    #[test]
    fn test_parse_markers() {
        assert_eq!(
            parse_hex_code("600aXX600bxx").unwrap(),
            vec![0x60, 0x0a, PLACEHOLDER, 0x60, 0x0b, PLACEHOLDER]
        );
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        match parse_hex_code("600") {
            Err(PuzzleError::MalformedHex { position, .. }) => assert_eq!(position, 3),
            other => panic!("unexpected {:?}", other),
        }
        match parse_hex_code("60g1") {
            Err(PuzzleError::MalformedHex { position, .. }) => assert_eq!(position, 2),
            other => panic!("unexpected {:?}", other),
        }
        // from_str_radix would accept a sign here
        assert!(parse_hex_code("+1").is_err());
        assert!(parse_hex_code("X1").is_err());
    }

    #[test]
    fn test_to_hex() {
        assert_eq!(to_hex(&[0x60, 0x0a, 0xff]), "600aff");
        assert_eq!(to_hex_upper(&[0x60, 0x0a, 0xff]), "600AFF");
        assert_eq!(to_hex(&[]), "");
    }
}
