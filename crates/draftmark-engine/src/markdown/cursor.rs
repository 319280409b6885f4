/// A byte cursor over a block's text for inline scanning.
///
/// All delimiters are ASCII, so byte-wise matching never lands inside a
/// multi-byte character at a reported match boundary.
#[derive(Clone)]
pub struct Cursor<'a> {
    /// The text being scanned.
    pub s: &'a str,
    /// Current byte index into `s`.
    pub i: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(s: &'a str) -> Self {
        Self { s, i: 0 }
    }

    pub fn eof(&self) -> bool {
        self.i >= self.s.len()
    }

    /// Peeks at the current byte without advancing.
    pub fn peek(&self) -> Option<u8> {
        self.s.as_bytes().get(self.i).copied()
    }

    /// The byte just before the cursor.
    pub fn prev(&self) -> Option<u8> {
        self.i
            .checked_sub(1)
            .and_then(|i| self.s.as_bytes().get(i).copied())
    }

    /// Checks if the remaining input starts with the given pattern.
    pub fn starts_with(&self, pat: &str) -> bool {
        self.s.as_bytes()[self.i.min(self.s.len())..].starts_with(pat.as_bytes())
    }

    /// Byte index of the next occurrence of `pat` at or after the cursor.
    pub fn find(&self, pat: &str) -> Option<usize> {
        self.s
            .get(self.i..)
            .and_then(|rest| rest.find(pat))
            .map(|at| self.i + at)
    }

    /// Advances by one byte, returning the consumed byte.
    pub fn bump(&mut self) -> Option<u8> {
        let b = self.peek()?;
        self.i += 1;
        Some(b)
    }

    /// Advances by `n` bytes.
    pub fn bump_n(&mut self, n: usize) {
        self.i += n;
    }
}
