use std::fmt::{Debug, Display, Formatter};
use std::io;
use std::ops::Deref;

use mxsan::State;

#[derive(Debug)]
enum Repr {
    Io { context: String, source: io::Error },
    Check(mxsan::Error),
    Incomplete(State),
}

pub struct CliError(Box<Repr>);

impl CliError {
    pub fn io(context: impl Into<String>, source: io::Error) -> Self {
        Self(Box::new(Repr::Io {
            context: context.into(),
            source,
        }))
    }

    pub fn incomplete(state: State) -> Self {
        Self(Box::new(Repr::Incomplete(state)))
    }

    pub fn exit_code(&self) -> u8 {
        match self.0.deref() {
            Repr::Io { .. } => 1,
            Repr::Check(_) => 2,
            Repr::Incomplete(_) => 3,
        }
    }
}

impl Debug for CliError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Debug::fmt(&self.0, f)
    }
}

impl Display for CliError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.0.deref() {
            Repr::Io { context, source } => f.write_fmt(format_args!("{}: {}", context, source)),
            Repr::Check(err) => f.write_fmt(format_args!("output is not well-formed: {}", err)),
            Repr::Incomplete(state) => {
                f.write_fmt(format_args!("input ends inside a {}", state))
            }
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self.0.deref() {
            Repr::Io { source, .. } => Some(source),
            Repr::Check(err) => Some(err),
            Repr::Incomplete(_) => None,
        }
    }
}

impl From<mxsan::Error> for CliError {
    fn from(err: mxsan::Error) -> Self {
        Self(Box::new(Repr::Check(err)))
    }
}
