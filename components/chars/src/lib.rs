//! Character classes for scanning near-valid markup.
//!
//! ASCII characters are classified through a precomputed bit table; everything else falls back to
//! the Unicode `Alphabetic`/`Numeric` (tag start) or `White_Space` properties.

use crate::Category::{
    AttrTerminator, Digit, EntityName, EntityNameStart, HexDigit, TagStart, Whitespace,
};

#[repr(u8)]
enum Category {
    Whitespace = 0,
    TagStart = 1,
    AttrTerminator = 2,
    EntityNameStart = 3,
    EntityName = 4,
    Digit = 5,
    HexDigit = 6,
}

#[inline]
fn check_ascii(c: u8, cat: Category) -> bool {
    match MARKUP_CHAR_MAP.get(c as usize) {
        Some(cats) => cats & mask(cat) != 0,
        None => false,
    }
}

#[inline]
const fn mask(cat: Category) -> u8 {
    1 << (cat as u8)
}

const fn mask_if(cat: Category, pred: bool) -> u8 {
    if pred {
        mask(cat)
    } else {
        0
    }
}

const fn is_space(c: u8) -> bool {
    matches!(c, b'\x20' | b'\x09' | b'\x0A' | b'\x0B' | b'\x0C' | b'\x0D')
}

const fn ascii_char_mask(c: u8) -> u8 {
    mask_if(Whitespace, is_space(c))
        | mask_if(
            TagStart,
            c.is_ascii_alphanumeric() || matches!(c, b'_' | b':' | b'/' | b'?' | b'!'),
        )
        | mask_if(AttrTerminator, is_space(c) || matches!(c, b'>' | b'/' | b'?'))
        | mask_if(EntityNameStart, c.is_ascii_alphabetic())
        | mask_if(EntityName, c.is_ascii_alphanumeric())
        | mask_if(Digit, c.is_ascii_digit())
        | mask_if(HexDigit, c.is_ascii_hexdigit())
}

macro_rules! ascii_char_mask {
    ($( $c:expr ),*) => {
        [ $( ascii_char_mask($c) ),* ]
    };
}

const MARKUP_CHAR_MAP: [u8; 128] = ascii_char_mask![
    0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 17, 18, 19, 20, 21, 22, 23, 24, 25,
    26, 27, 28, 29, 30, 31, 32, 33, 34, 35, 36, 37, 38, 39, 40, 41, 42, 43, 44, 45, 46, 47, 48, 49,
    50, 51, 52, 53, 54, 55, 56, 57, 58, 59, 60, 61, 62, 63, 64, 65, 66, 67, 68, 69, 70, 71, 72, 73,
    74, 75, 76, 77, 78, 79, 80, 81, 82, 83, 84, 85, 86, 87, 88, 89, 90, 91, 92, 93, 94, 95, 96, 97,
    98, 99, 100, 101, 102, 103, 104, 105, 106, 107, 108, 109, 110, 111, 112, 113, 114, 115, 116,
    117, 118, 119, 120, 121, 122, 123, 124, 125, 126, 127
];

/// Classes that only ever contain ASCII characters.
pub trait MarkupAsciiChar {
    /// Decimal digit of a character reference (`&#65;`)
    fn is_ref_digit(&self) -> bool;

    /// Hex digit of a character reference (`&#x41;`)
    fn is_ref_hex_digit(&self) -> bool;

    /// First character of a named reference (`&amp;`)
    fn is_ref_name_start(&self) -> bool;

    /// Following characters of a named reference
    fn is_ref_name_char(&self) -> bool;
}

pub trait MarkupChar: MarkupAsciiChar {
    /// Whitespace as far as tag and attribute scanning is concerned
    fn is_markup_whitespace(&self) -> bool;

    /// Character after `<` that makes the `<` start a tag, end tag, declaration or
    /// processing instruction.
    fn is_tag_start(&self) -> bool;

    /// Character after a quote that makes the quote close an attribute value.
    fn is_attr_terminator(&self) -> bool;
}

impl MarkupAsciiChar for u8 {
    #[inline]
    fn is_ref_digit(&self) -> bool {
        check_ascii(*self, Digit)
    }

    #[inline]
    fn is_ref_hex_digit(&self) -> bool {
        check_ascii(*self, HexDigit)
    }

    #[inline]
    fn is_ref_name_start(&self) -> bool {
        check_ascii(*self, EntityNameStart)
    }

    #[inline]
    fn is_ref_name_char(&self) -> bool {
        check_ascii(*self, EntityName)
    }
}

impl MarkupAsciiChar for char {
    #[inline]
    fn is_ref_digit(&self) -> bool {
        self.is_ascii() && check_ascii(*self as u8, Digit)
    }

    #[inline]
    fn is_ref_hex_digit(&self) -> bool {
        self.is_ascii() && check_ascii(*self as u8, HexDigit)
    }

    #[inline]
    fn is_ref_name_start(&self) -> bool {
        self.is_ascii() && check_ascii(*self as u8, EntityNameStart)
    }

    #[inline]
    fn is_ref_name_char(&self) -> bool {
        self.is_ascii() && check_ascii(*self as u8, EntityName)
    }
}

impl MarkupChar for char {
    #[inline]
    fn is_markup_whitespace(&self) -> bool {
        if self.is_ascii() {
            check_ascii(*self as u8, Whitespace)
        } else {
            self.is_whitespace()
        }
    }

    #[inline]
    fn is_tag_start(&self) -> bool {
        if self.is_ascii() {
            check_ascii(*self as u8, TagStart)
        } else {
            self.is_alphanumeric()
        }
    }

    #[inline]
    fn is_attr_terminator(&self) -> bool {
        if self.is_ascii() {
            check_ascii(*self as u8, AttrTerminator)
        } else {
            self.is_whitespace()
        }
    }
}
