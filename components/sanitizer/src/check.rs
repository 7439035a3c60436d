//! Post-hoc well-formedness check of sanitized text.
//!
//! Purely diagnostic: it reports the first problem a strict XML reader finds, the sanitizer never
//! looks at the result. Named references are accepted whatever their name, since draw.io
//! documents routinely carry HTML entities like `&nbsp;` inside labels.

use std::borrow::Cow;
use std::str::from_utf8;

use log::trace;
use quick_xml::escape::unescape_with;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::{Error, Reason};

fn create_reader(xml: &str) -> Reader<&[u8]> {
    let mut reader = Reader::from_str(xml);
    let config = reader.config_mut();
    config.allow_unmatched_ends = false;
    config.check_comments = true;
    config.check_end_names = true;
    config.trim_markup_names_in_closing_tags = true;
    reader
}

fn check_references(raw: &[u8], offset: usize) -> Result<(), Error> {
    let text = from_utf8(raw).map_err(|err| Error::new(offset, Reason::Syntax(err.to_string())))?;
    unescape_with(text, |_| Some(""))
        .map(|_| ())
        .map_err(|err| Error::new(offset, Reason::Reference(err.to_string())))
}

fn check_attributes(tag: &BytesStart, offset: usize) -> Result<(), Error> {
    for attr in tag.attributes() {
        let attr = attr.map_err(|err| Error::new(offset, Reason::Attribute(err.to_string())))?;
        if attr.value.contains(&b'<') {
            return Err(Error::new(
                offset,
                Reason::Attribute(format!(
                    "`<` in value of attribute `{}`",
                    String::from_utf8_lossy(attr.key.as_ref())
                )),
            ));
        }
        check_references(&attr.value, offset)?;
    }
    Ok(())
}

fn tag_name(tag: &BytesStart) -> String {
    match String::from_utf8_lossy(tag.name().as_ref()) {
        Cow::Borrowed(name) => name.to_string(),
        Cow::Owned(name) => name,
    }
}

/// Check that `xml` is a well-formed document fragment.
///
/// Multiple top-level elements and surrounding text are allowed; the sanitizer works on snippets,
/// not complete documents.
pub fn check_well_formed(xml: &str) -> Result<(), Error> {
    let mut reader = create_reader(xml);
    let mut open: Vec<(String, usize)> = vec![];

    loop {
        let offset = reader.buffer_position() as usize;
        match reader.read_event() {
            Ok(Event::Eof) => break,
            Ok(Event::Start(tag)) => {
                check_attributes(&tag, offset)?;
                open.push((tag_name(&tag), offset));
            }
            Ok(Event::Empty(tag)) => check_attributes(&tag, offset)?,
            Ok(Event::End(_)) => {
                open.pop();
            }
            Ok(Event::Text(text)) => check_references(&text, offset)?,
            Ok(Event::Decl(decl)) => {
                let declaration = |msg: String| Error::new(offset, Reason::Declaration(msg));
                decl.version().map_err(|err| declaration(err.to_string()))?;
                if let Some(Err(err)) = decl.encoding() {
                    return Err(declaration(err.to_string()));
                }
                if let Some(Err(err)) = decl.standalone() {
                    return Err(declaration(err.to_string()));
                }
            }
            Ok(_) => {}
            Err(err) => {
                return Err(Error::new(
                    reader.error_position() as usize,
                    Reason::Syntax(err.to_string()),
                ))
            }
        }
    }

    match open.pop() {
        Some((name, offset)) => Err(Error::new(offset, Reason::UnclosedElement(name))),
        None => {
            trace!("{} bytes are well-formed", xml.len());
            Ok(())
        }
    }
}
