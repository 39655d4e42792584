use crate::pos::BytePos;

/// Character cursor over a source buffer that tracks its byte offset.
#[derive(Debug, Clone)]
pub struct Scanner<'a> {
    pub pos: BytePos,
    buf: &'a str,
}

impl<'a> Scanner<'a> {
    pub fn new(buf: &'a str) -> Scanner<'a> {
        Scanner {
            pos: BytePos::default(),
            buf,
        }
    }

    fn rest(&self) -> &'a str {
        &self.buf[self.pos.to_usize()..]
    }

    pub fn next(&mut self) -> Option<char> {
        let next = self.rest().chars().next();
        if let Some(c) = next {
            self.pos = self.pos.shift(c);
        }

        next
    }

    pub fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    pub fn peek_second(&self) -> Option<char> {
        self.rest().chars().nth(1)
    }

    pub fn consume_if<F>(&mut self, f: F) -> bool
    where
        F: Fn(char) -> bool,
    {
        match self.peek() {
            Some(ch) if f(ch) => {
                self.next();
                true
            }
            _ => false,
        }
    }

    /// Consumes characters while `f` holds and returns the consumed slice.
    pub fn consume_while<F>(&mut self, f: F) -> &'a str
    where
        F: Fn(char) -> bool,
    {
        let start = self.pos.to_usize();
        while let Some(ch) = self.peek() {
            if f(ch) {
                self.next();
            } else {
                break;
            }
        }

        &self.buf[start..self.pos.to_usize()]
    }

    pub fn slice_from(&self, start: BytePos) -> &'a str {
        &self.buf[start.to_usize()..self.pos.to_usize()]
    }

    #[cfg(test)]
    fn assert_next(&mut self, pos: u32, c: Option<char>) {
        assert_eq!(self.pos.0, pos);
        assert_eq!(self.peek(), c);
        assert_eq!(self.next(), c);
    }
}
