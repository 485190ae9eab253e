//! Decoding of textual message input into bytes.
//!
//! The hash only accepts byte slices; text that should stand for bytes
//! is validated here, before any hashing starts.

use crate::{Error, Result};

/// Decode a hex string (whitespace and an optional `0x` prefix allowed) into bytes.
pub fn bytes_from_hex(text: &str) -> Result<Vec<u8>> {
    let trimmed = text.trim();
    let body = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    let compact: String = body.chars().filter(|c| !c.is_whitespace()).collect();

    hex::decode(&compact).map_err(|e| Error::InvalidInput(format!("'{}' is not hex bytes: {}", text, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_hex() {
        assert_eq!(bytes_from_hex("616263").unwrap(), b"abc");
    }

    #[test]
    fn test_prefix_and_whitespace() {
        assert_eq!(bytes_from_hex("0x61 62\n63").unwrap(), b"abc");
        assert_eq!(bytes_from_hex("0XFF00").unwrap(), vec![0xff, 0x00]);
    }

    #[test]
    fn test_empty_is_empty_message() {
        assert!(bytes_from_hex("").unwrap().is_empty());
        assert!(bytes_from_hex("0x").unwrap().is_empty());
    }

    #[test]
    fn test_rejects_odd_length() {
        assert!(matches!(bytes_from_hex("abc"), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_rejects_non_hex() {
        assert!(matches!(bytes_from_hex("hello"), Err(Error::InvalidInput(_))));
    }
}
