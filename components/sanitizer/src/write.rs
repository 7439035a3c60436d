use std::convert::Infallible;
use std::io;

/// Sink for sanitized text.
///
/// The error type is left to the implementor so that sinks which cannot fail (like `String`) make
/// the whole sanitizer infallible.
pub trait UnicodeWrite {
    type Error;

    fn write_all(&mut self, s: &str) -> Result<(), Self::Error>;

    fn write_char(&mut self, c: char) -> Result<(), Self::Error> {
        self.write_all(c.encode_utf8(&mut [0; 4]))
    }

    fn flush(&mut self) -> Result<(), Self::Error>;
}

impl UnicodeWrite for String {
    type Error = Infallible;

    fn write_all(&mut self, s: &str) -> Result<(), Infallible> {
        self.push_str(s);
        Ok(())
    }

    fn write_char(&mut self, c: char) -> Result<(), Infallible> {
        self.push(c);
        Ok(())
    }

    fn flush(&mut self) -> Result<(), Infallible> {
        Ok(())
    }
}

impl<T: ?Sized + UnicodeWrite> UnicodeWrite for &mut T {
    type Error = T::Error;

    fn write_all(&mut self, s: &str) -> Result<(), T::Error> {
        (**self).write_all(s)
    }

    fn write_char(&mut self, c: char) -> Result<(), T::Error> {
        (**self).write_char(c)
    }

    fn flush(&mut self) -> Result<(), T::Error> {
        (**self).flush()
    }
}

/// Writes UTF-8 into a byte sink.
pub struct Utf8Writer<T: io::Write>(T);

impl<T: io::Write> Utf8Writer<T> {
    pub fn new(inner: T) -> Self {
        Self(inner)
    }

    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T: io::Write> UnicodeWrite for Utf8Writer<T> {
    type Error = io::Error;

    fn write_all(&mut self, s: &str) -> io::Result<()> {
        self.0.write_all(s.as_bytes())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.0.flush()
    }
}
