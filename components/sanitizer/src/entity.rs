//! Recognition of references that are already escaped.
//!
//! ```text
//! CharRef   ::= '&#' [0-9]+ ';' | '&#x' [0-9a-fA-F]+ ';'
//! EntityRef ::= '&' [a-zA-Z] [a-zA-Z0-9]+ ';'
//! ```
//!
//! Named references are not looked up; any name of the right shape counts, so `&nbsp;` passes as
//! well as `&amp;`.

use memchr::memchr;
use mxsan_chars::MarkupAsciiChar;

/// Reference found behind an `&`, with its body (the text between `&` and `;`).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Reference<'a> {
    Named(&'a str),
    Decimal(&'a str),
    Hex(&'a str),
}

impl<'a> Reference<'a> {
    /// Length in bytes including `&` and `;`.
    pub fn encoded_len(&self) -> usize {
        match self {
            Reference::Named(body) | Reference::Decimal(body) | Reference::Hex(body) => {
                body.len() + 2
            }
        }
    }
}

/// Classify the text starting at an `&`.
///
/// Looks only as far as the next `;`. Returns `None` for a bare ampersand.
pub fn classify(input: &str) -> Option<Reference<'_>> {
    let rest = input.strip_prefix('&')?;
    let end = memchr(b';', rest.as_bytes())?;
    classify_body(&rest[..end])
}

/// Classify the text between `&` and the next `;`.
pub fn classify_body(body: &str) -> Option<Reference<'_>> {
    let bytes = body.as_bytes();
    match bytes {
        [b'#', b'x', digits @ ..] if !digits.is_empty() && digits.iter().all(u8::is_ref_hex_digit) => {
            Some(Reference::Hex(body))
        }
        [b'#', digits @ ..] if !digits.is_empty() && digits.iter().all(u8::is_ref_digit) => {
            Some(Reference::Decimal(body))
        }
        [first, tail @ ..]
            if first.is_ref_name_start()
                && !tail.is_empty()
                && tail.iter().all(u8::is_ref_name_char) =>
        {
            Some(Reference::Named(body))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named() {
        assert_eq!(Some(Reference::Named("lt")), classify("&lt; escaped"));
        assert_eq!(Some(Reference::Named("nbsp")), classify("&nbsp;"));
        assert_eq!(Some(Reference::Named("frac12")), classify("&frac12;"));
    }

    #[test]
    fn decimal() {
        assert_eq!(Some(Reference::Decimal("#60")), classify("&#60;"));
        assert_eq!(Some(Reference::Decimal("#0")), classify("&#0;x"));
    }

    #[test]
    fn hex() {
        assert_eq!(Some(Reference::Hex("#x3C")), classify("&#x3C;"));
        assert_eq!(Some(Reference::Hex("#xa0")), classify("&#xa0;"));
    }

    #[test]
    fn bare_ampersand() {
        assert_eq!(None, classify("& B"));
        assert_eq!(None, classify("&"));
        assert_eq!(None, classify("&lt"));
    }

    #[test]
    fn malformed_bodies() {
        assert_eq!(None, classify("&;"));
        assert_eq!(None, classify("&a;"));
        assert_eq!(None, classify("&#;"));
        assert_eq!(None, classify("&#x;"));
        assert_eq!(None, classify("&#xZZ;"));
        assert_eq!(None, classify("&#X41;"));
        assert_eq!(None, classify("&#12a;"));
        assert_eq!(None, classify("&1ab;"));
        assert_eq!(None, classify("&a-b;"));
        assert_eq!(None, classify("&é9;"));
    }

    #[test]
    fn scans_only_to_first_semicolon() {
        // the body is " B", not "amp"
        assert_eq!(None, classify("& B; &amp;"));
    }

    #[test]
    fn bodies() {
        assert_eq!(Some(Reference::Named("quot")), classify_body("quot"));
        assert_eq!(Some(Reference::Hex("#x27")), classify_body("#x27"));
        assert_eq!(None, classify_body(" B &amp"));
    }

    #[test]
    fn not_at_ampersand() {
        assert_eq!(None, classify("lt;"));
    }

    #[test]
    fn encoded_len() {
        assert_eq!(4, classify("&lt;").map_or(0, |r| r.encoded_len()));
        assert_eq!(6, classify("&#x3C;").map_or(0, |r| r.encoded_len()));
    }
}
