/// Forward-only position in the input.
///
/// Cheap to copy; advancing returns a new cursor instead of mutating the old one.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Cursor<'a> {
    input: &'a str,
    offset: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(input: &'a str) -> Self {
        Self { input, offset: 0 }
    }

    pub fn next_char(&self) -> Option<char> {
        self.rest().chars().next()
    }

    /// Character following the next one.
    pub fn peek_second(&self) -> Option<char> {
        let mut chars = self.rest().chars();
        chars.next()?;
        chars.next()
    }

    #[inline]
    pub fn has_next_str(&self, pat: impl AsRef<str>) -> bool {
        self.rest().starts_with(pat.as_ref())
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn rest(&self) -> &'a str {
        &self.input[self.offset..]
    }

    pub fn rest_bytes(&self) -> &'a [u8] {
        self.rest().as_bytes()
    }

    /// Everything before the cursor.
    pub fn consumed(&self) -> &'a str {
        &self.input[..self.offset]
    }

    pub fn is_at_end(&self) -> bool {
        self.offset == self.input.len()
    }

    pub fn advance(&self, bytes: usize) -> Self {
        Self {
            input: self.input,
            offset: self.offset + bytes,
        }
    }

    pub fn advance2(&self, bytes: usize) -> (&'a str, Self) {
        let (diff, _) = self.rest().split_at(bytes);
        (diff, self.advance(bytes))
    }

    pub fn advance_to_end(&self) -> (&'a str, Self) {
        self.advance2(self.input.len() - self.offset)
    }
}
