use std::fmt;

/// Why a document failed the well-formedness check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reason {
    /// Rejected by the XML reader itself
    Syntax(String),
    /// Malformed or duplicated attribute
    Attribute(String),
    /// Malformed `<?xml ...?>` declaration
    Declaration(String),
    /// Bare `&` or invalid character reference in text or an attribute value
    Reference(String),
    /// Element still open at end of input
    UnclosedElement(String),
}

pub struct Error {
    offset: usize,
    reason: Reason,
}

impl Error {
    pub fn new(offset: usize, reason: Reason) -> Self {
        Self { offset, reason }
    }

    /// Byte offset into the checked text
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn reason(&self) -> &Reason {
        &self.reason
    }

    fn message(&self) -> String {
        match &self.reason {
            Reason::Syntax(msg) => format!("syntax error: {}", msg),
            Reason::Attribute(msg) => format!("invalid attribute: {}", msg),
            Reason::Declaration(msg) => format!("invalid XML declaration: {}", msg),
            Reason::Reference(msg) => format!("invalid reference: {}", msg),
            Reason::UnclosedElement(name) => format!("element <{}> is never closed", name),
        }
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Error")
            .field("offset", &self.offset)
            .field("message", &self.message())
            .finish()
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at offset {}", self.message(), self.offset)
    }
}

impl std::error::Error for Error {}
