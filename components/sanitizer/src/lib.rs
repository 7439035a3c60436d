//! Turns near-valid draw.io XML into well-formed XML.
//!
//! Diagrams pasted by hand or produced by a language model are usually *almost* XML: the tags are
//! fine, but text and attribute values carry raw `<`, `>`, `&` or quotes. [`sanitize`] walks the
//! input once and escapes exactly those characters, leaving tags, comments, CDATA sections and
//! references that are already escaped alone.
//!
//! ```
//! assert_eq!(
//!     r#"<mxCell value="x &lt; y" />"#,
//!     mxsan::sanitize(r#"<mxCell value="x < y" />"#)
//! );
//! ```
//!
//! The sanitizer is not a validator. Unbalanced tags pass through unchanged and an input that
//! ends inside a tag or comment is simply copied up to its end; [`Summary::is_complete`] tells
//! whether that happened. With the `check` feature, [`check::check_well_formed`] runs a strict
//! XML reader over the result.

pub mod cursor;
pub mod entity;
mod sanitizer;
pub mod write;

#[cfg(feature = "check")]
pub mod check;
#[cfg(feature = "check")]
mod error;

#[cfg(feature = "check")]
pub use error::{Error, Reason};
pub use sanitizer::{Escape, EscapeCounts, Quote, Sanitizer, State, Summary};
pub use write::{UnicodeWrite, Utf8Writer};

/// Settings for [`sanitize_snippet`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Options {
    /// Strip leading and trailing whitespace before sanitizing
    pub trim: bool,
}

impl Options {
    /// The part of `input` that gets sanitized.
    pub fn prepare<'a>(&self, input: &'a str) -> &'a str {
        if self.trim {
            input.trim()
        } else {
            input
        }
    }
}

impl Default for Options {
    fn default() -> Self {
        Self { trim: true }
    }
}

/// Escape stray markup characters in `input`.
pub fn sanitize(input: &str) -> String {
    sanitize_with_summary(input).0
}

/// Like [`sanitize`], also returning what was escaped and where the input ended.
pub fn sanitize_with_summary(input: &str) -> (String, Summary) {
    // escaping only grows the text, leave some room for it
    let mut output = String::with_capacity(input.len() + input.len() / 16);
    let summary = match sanitize_to(input, &mut output) {
        Ok(summary) => summary,
        Err(never) => match never {},
    };
    (output, summary)
}

/// Stream the sanitized form of `input` into `writer`.
pub fn sanitize_to<W: UnicodeWrite>(input: &str, writer: W) -> Result<Summary, W::Error> {
    Sanitizer::new(input, writer).run()
}

/// Sanitize a snippet as it was extracted from a page or a chat message.
pub fn sanitize_snippet(input: &str, options: &Options) -> String {
    sanitize(options.prepare(input))
}
