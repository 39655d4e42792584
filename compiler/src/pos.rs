use std::fmt::Display;

use serde::Serialize;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct BytePos(pub u32);

impl BytePos {
    pub fn shift(self, ch: char) -> Self {
        BytePos(self.0 + ch.len_utf8() as u32)
    }

    pub fn to_usize(self) -> usize {
        self.0 as usize
    }
}

impl Display for BytePos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Location of a token in the source buffer. `end` is exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenMetadata {
    pub start: BytePos,
    pub end: BytePos,
    pub line: usize,
}

impl TokenMetadata {
    pub const fn empty() -> TokenMetadata {
        let zero = BytePos(0);
        TokenMetadata {
            start: zero,
            end: zero,
            line: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WithTokenMetadata<T> {
    pub value: T,
    pub pos: TokenMetadata,
}

impl<T> WithTokenMetadata<T> {
    pub fn new(value: T, start: BytePos, end: BytePos, line: usize) -> WithTokenMetadata<T> {
        WithTokenMetadata {
            value,
            pos: TokenMetadata { start, end, line },
        }
    }

    pub const fn empty(value: T) -> WithTokenMetadata<T> {
        WithTokenMetadata {
            value,
            pos: TokenMetadata::empty(),
        }
    }

    /// The source text this token was scanned from.
    pub fn text<'s>(&self, source: &'s str) -> &'s str {
        source
            .get(self.pos.start.to_usize()..self.pos.end.to_usize())
            .unwrap_or("")
    }
}

/// Byte range in the source buffer. `end` is exclusive.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Span {
    pub start: BytePos,
    pub end: BytePos,
}

impl Span {
    pub fn new(start: BytePos, end: BytePos) -> Span {
        Span { start, end }
    }

    /// A span of `len` bytes starting at `start`.
    pub fn at(start: BytePos, len: u32) -> Span {
        Span {
            start,
            end: BytePos(start.0.saturating_add(len)),
        }
    }

    pub fn len(&self) -> usize {
        self.end.to_usize().saturating_sub(self.start.to_usize())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<TokenMetadata> for Span {
    fn from(value: TokenMetadata) -> Self {
        Span::new(value.start, value.end)
    }
}
