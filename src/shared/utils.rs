//! Utility functions and helpers

use crate::shared::errors::FormatError;

/// Characters kept on each side of a shortened address
pub const SHORT_ADDRESS_WINDOW: usize = 4;

/// Separator placed between the kept ends
pub const SHORT_ADDRESS_SEPARATOR: &str = "...";

/// Keep the first and last `length` characters of `text`, joined by `separator`.
///
/// Works on chars, not bytes, so multi-byte input never splits a code point.
/// Callers must make sure `text` has at least `2 * length` chars, otherwise
/// the two ends overlap.
pub fn truncated_text(text: &str, length: usize, separator: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let head: String = chars.iter().take(length).collect();
    let tail: String = chars[chars.len().saturating_sub(length)..].iter().collect();
    format!("{}{}{}", head, separator, tail)
}

/// Shorten an address, failing when it is shorter than both windows.
pub fn try_short_address(address: &str) -> Result<String, FormatError> {
    let len = address.chars().count();
    let required = SHORT_ADDRESS_WINDOW * 2;
    if len < required {
        return Err(FormatError::TooShort { len, required });
    }
    Ok(truncated_text(address, SHORT_ADDRESS_WINDOW, SHORT_ADDRESS_SEPARATOR))
}

/// Shorten an address for display: `So11...1112`.
///
/// Addresses shorter than 8 chars come back unchanged.
pub fn short_address(address: &str) -> String {
    try_short_address(address).unwrap_or_else(|_| address.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_address() {
        let short = short_address("So11111111111111111111111111111111111111112");
        assert_eq!(short, "So11...1112");
        assert_eq!(short.len(), 2 * SHORT_ADDRESS_WINDOW + SHORT_ADDRESS_SEPARATOR.len());
    }

    #[test]
    fn test_short_address_exactly_eight_chars() {
        assert_eq!(short_address("abcdefgh"), "abcd...efgh");
    }

    #[test]
    fn test_short_address_too_short_is_unchanged() {
        assert_eq!(short_address("abc"), "abc");
        assert_eq!(short_address(""), "");
        assert_eq!(short_address(&short_address("abcdefg")), "abcdefg");
        assert_eq!(
            try_short_address("abcdefg"),
            Err(FormatError::TooShort { len: 7, required: 8 })
        );
    }

    #[test]
    fn test_truncated_text_multibyte() {
        assert_eq!(truncated_text("ééééxxxxüüüü", 4, "…"), "éééé…üüüü");
    }
}
