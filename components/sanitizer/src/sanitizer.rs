use std::fmt;

use log::{debug, trace};
use memchr::{memchr, memchr3};
use memchr::memmem;
use mxsan_chars::MarkupChar;

use crate::cursor::Cursor;
use crate::entity;
use crate::write::UnicodeWrite;

const COMMENT_START: &str = "<!--";
const COMMENT_END: &str = "-->";
const CDATA_START: &str = "<![CDATA[";
const CDATA_END: &str = "]]>";

/// Quote character delimiting an attribute value
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Quote {
    /// `"`
    Double,
    /// `'`
    Single,
}

impl Quote {
    pub fn as_byte(self) -> u8 {
        match self {
            Quote::Double => b'"',
            Quote::Single => b'\'',
        }
    }

    fn escape(self) -> Escape {
        match self {
            Quote::Double => Escape::Quot,
            Quote::Single => Escape::Apos,
        }
    }
}

/// Scanner state.
///
/// There is no element stack: the machine only needs to know what kind of markup it is in, never
/// how deeply nested it is.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum State {
    /// Character data between tags
    Text,
    /// Directly after a `<` that starts markup
    TagOpen,
    /// Inside the name of a tag, declaration or processing instruction
    TagName,
    /// Inside a tag after its name, between attributes
    AttrName,
    /// Inside a quoted attribute value
    AttrValue(Quote),
    /// Inside `<!-- ... -->`
    Comment,
    /// Inside `<![CDATA[ ... ]]>`
    CData,
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            State::Text => "text",
            State::TagOpen | State::TagName => "tag name",
            State::AttrName => "tag",
            State::AttrValue(Quote::Double) => "double-quoted attribute value",
            State::AttrValue(Quote::Single) => "single-quoted attribute value",
            State::Comment => "comment",
            State::CData => "CDATA section",
        })
    }
}

/// Entity written in place of a character
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Escape {
    Lt,
    Gt,
    Amp,
    Quot,
    Apos,
}

impl Escape {
    pub fn as_str(self) -> &'static str {
        match self {
            Escape::Lt => "&lt;",
            Escape::Gt => "&gt;",
            Escape::Amp => "&amp;",
            Escape::Quot => "&quot;",
            Escape::Apos => "&apos;",
        }
    }
}

/// Number of characters replaced by each entity
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct EscapeCounts {
    pub lt: usize,
    pub gt: usize,
    pub amp: usize,
    pub quot: usize,
    pub apos: usize,
}

impl EscapeCounts {
    pub fn total(&self) -> usize {
        self.lt + self.gt + self.amp + self.quot + self.apos
    }

    fn record(&mut self, escape: Escape) {
        match escape {
            Escape::Lt => self.lt += 1,
            Escape::Gt => self.gt += 1,
            Escape::Amp => self.amp += 1,
            Escape::Quot => self.quot += 1,
            Escape::Apos => self.apos += 1,
        }
    }
}

/// Outcome of a sanitizer run
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Summary {
    pub escapes: EscapeCounts,
    /// State the machine was in when the input ran out
    pub final_state: State,
}

impl Summary {
    /// `false` if the input ended inside a tag, attribute value, comment or CDATA section.
    pub fn is_complete(&self) -> bool {
        self.final_state == State::Text
    }
}

/// Single pass state machine copying its input into `writer`, escaping stray markup characters.
pub struct Sanitizer<'a, W: UnicodeWrite> {
    cursor: Cursor<'a>,
    state: State,
    escapes: EscapeCounts,
    writer: W,
    /// Offset of the next `;` as of the last reference, `usize::MAX` if there is none left
    semicolon: Option<usize>,
}

impl<'a, W: UnicodeWrite> Sanitizer<'a, W> {
    pub fn new(input: &'a str, writer: W) -> Self {
        Self {
            cursor: Cursor::new(input),
            state: State::Text,
            escapes: EscapeCounts::default(),
            writer,
            semicolon: None,
        }
    }

    pub fn run(mut self) -> Result<Summary, W::Error> {
        while !self.cursor.is_at_end() {
            match self.state {
                State::Text => self.text()?,
                State::TagOpen => self.tag_open()?,
                State::TagName => self.tag_name()?,
                State::AttrName => self.attr_name()?,
                State::AttrValue(quote) => self.attr_value(quote)?,
                State::Comment => self.verbatim(COMMENT_END)?,
                State::CData => self.verbatim(CDATA_END)?,
            }
        }
        self.writer.flush()?;

        let summary = Summary {
            escapes: self.escapes,
            final_state: self.state,
        };
        debug!(
            "sanitized {} bytes: {} escapes, ended in {}",
            self.cursor.offset(),
            summary.escapes.total(),
            summary.final_state
        );
        Ok(summary)
    }

    fn text(&mut self) -> Result<(), W::Error> {
        let rest = self.cursor.rest_bytes();
        let run = memchr3(b'<', b'&', b'>', rest).unwrap_or(rest.len());
        if run > 0 {
            return self.copy(run);
        }

        match rest[0] {
            b'<' => self.markup_start(),
            b'&' => self.reference(),
            _ => self.escape(Escape::Gt),
        }
    }

    fn markup_start(&mut self) -> Result<(), W::Error> {
        if self.cursor.has_next_str(CDATA_START) {
            self.copy(CDATA_START.len())?;
            self.enter(State::CData);
        } else if self.cursor.has_next_str(COMMENT_START) {
            self.copy(COMMENT_START.len())?;
            self.enter(State::Comment);
        } else if self.cursor.peek_second().map_or(false, |c| c.is_tag_start()) {
            self.copy(1)?;
            self.state = State::TagOpen;
        } else {
            self.escape(Escape::Lt)?;
        }
        Ok(())
    }

    fn tag_open(&mut self) -> Result<(), W::Error> {
        let Some(c) = self.copy_char()? else {
            return Ok(());
        };
        self.state = match c {
            '>' => State::Text,
            _ => State::TagName,
        };
        Ok(())
    }

    fn tag_name(&mut self) -> Result<(), W::Error> {
        let Some(c) = self.copy_char()? else {
            return Ok(());
        };
        self.state = match c {
            '>' => State::Text,
            c if c.is_markup_whitespace() => State::AttrName,
            _ => State::TagName,
        };
        Ok(())
    }

    fn attr_name(&mut self) -> Result<(), W::Error> {
        let Some(c) = self.copy_char()? else {
            return Ok(());
        };
        self.state = match c {
            '"' => State::AttrValue(Quote::Double),
            '\'' => State::AttrValue(Quote::Single),
            '>' => State::Text,
            _ => State::AttrName,
        };
        Ok(())
    }

    fn attr_value(&mut self, quote: Quote) -> Result<(), W::Error> {
        let delimiter = quote.as_byte();
        let rest = self.cursor.rest_bytes();
        let run = rest
            .iter()
            .position(|&b| b == delimiter || matches!(b, b'&' | b'<' | b'>'))
            .unwrap_or(rest.len());
        if run > 0 {
            return self.copy(run);
        }

        match rest[0] {
            b'&' => self.reference(),
            b'<' => self.escape(Escape::Lt),
            b'>' => self.escape(Escape::Gt),
            _ => {
                let closes = self
                    .cursor
                    .peek_second()
                    .map_or(true, |c| c.is_attr_terminator());
                if closes {
                    self.copy(1)?;
                    self.state = State::AttrName;
                    Ok(())
                } else {
                    self.escape(quote.escape())
                }
            }
        }
    }

    /// `&` in text or an attribute value
    fn reference(&mut self) -> Result<(), W::Error> {
        let offset = self.cursor.offset();
        if self.semicolon.map_or(true, |end| end < offset) {
            let found = memchr(b';', self.cursor.rest_bytes());
            self.semicolon = Some(found.map_or(usize::MAX, |i| offset + i));
        }
        let reference = match self.semicolon {
            Some(end) if end != usize::MAX => {
                entity::classify_body(&self.cursor.rest()[1..end - offset])
            }
            _ => None,
        };
        match reference {
            Some(reference) => self.copy(reference.encoded_len()),
            None => self.escape(Escape::Amp),
        }
    }

    /// Copies everything up to and including `end`, or the rest of the input if `end` never
    /// shows up.
    ///
    /// The opening delimiter counts as already emitted text, so `<!-->` is a complete comment.
    fn verbatim(&mut self, end: &str) -> Result<(), W::Error> {
        let consumed = self.cursor.consumed();
        let rest = self.cursor.rest();

        let straddling = (1..end.len())
            .rev()
            .find(|&k| consumed.ends_with(&end[..k]) && rest.starts_with(&end[k..]))
            .map(|k| end.len() - k);
        let closing = straddling.or_else(|| {
            memmem::find(rest.as_bytes(), end.as_bytes()).map(|i| i + end.len())
        });

        match closing {
            Some(len) => {
                self.copy(len)?;
                trace!("leaving {} at {}", self.state, self.cursor.offset());
                self.state = State::Text;
                Ok(())
            }
            None => {
                let (chars, cursor) = self.cursor.advance_to_end();
                self.writer.write_all(chars)?;
                self.cursor = cursor;
                Ok(())
            }
        }
    }

    fn enter(&mut self, state: State) {
        trace!("entering {} at {}", state, self.cursor.offset());
        self.state = state;
    }

    fn copy(&mut self, bytes: usize) -> Result<(), W::Error> {
        let (chars, cursor) = self.cursor.advance2(bytes);
        self.writer.write_all(chars)?;
        self.cursor = cursor;
        Ok(())
    }

    fn copy_char(&mut self) -> Result<Option<char>, W::Error> {
        match self.cursor.next_char() {
            Some(c) => {
                self.writer.write_char(c)?;
                self.cursor = self.cursor.advance(c.len_utf8());
                Ok(Some(c))
            }
            None => Ok(None),
        }
    }

    /// Replaces the single ASCII character under the cursor.
    fn escape(&mut self, escape: Escape) -> Result<(), W::Error> {
        self.writer.write_all(escape.as_str())?;
        self.escapes.record(escape);
        self.cursor = self.cursor.advance(1);
        Ok(())
    }
}
