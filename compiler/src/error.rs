use thiserror::Error;

use crate::{
    expr::Radix,
    pos::{BytePos, Span},
    token::Token,
};

/// Process exit codes reported for each class of error.
pub mod code {
    pub const SYNTAX: u8 = 201;
    /// A keyword showed up where a name or expression was expected.
    pub const UNEXPECTED_KEYWORD: u8 = 202;
    pub const INPUT_TOO_LARGE: u8 = 203;
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    #[error("unexpected character '{ch}'")]
    UnexpectedChar { ch: char, pos: BytePos },

    #[error("expected at least one {radix} digit after the literal prefix")]
    UnterminatedLiteral { radix: Radix, pos: BytePos },
}

impl LexError {
    pub fn pos(&self) -> BytePos {
        match self {
            LexError::UnexpectedChar { pos, .. } | LexError::UnterminatedLiteral { pos, .. } => {
                *pos
            }
        }
    }

    pub fn span(&self) -> Span {
        match self {
            LexError::UnexpectedChar { ch, pos } => Span::at(*pos, ch.len_utf8() as u32),
            // the `0x`, `0o` or `0b` prefix
            LexError::UnterminatedLiteral { pos, .. } => Span::at(*pos, 2),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("expected a definition starting with 'def' but found '{found}'")]
    ExpectedDefinition { found: Token, pos: BytePos },

    #[error("expected an identifier after 'def' but found '{found}'")]
    MissingIdentifier { found: Token, pos: BytePos },

    #[error("expected a type name after ':' but found '{found}'")]
    MissingType { found: Token, pos: BytePos },

    #[error("expected ':=' but found '{found}'")]
    MissingAssignOperator { found: Token, pos: BytePos },

    #[error("expected an expression but found '{found}'")]
    MissingExpression { found: Token, pos: BytePos },

    #[error("expected ')' to close the parenthesized expression but found '{found}'")]
    MissingClosingParen { found: Token, pos: BytePos },

    #[error("unexpected '{found}' after the expression")]
    TrailingTokensAfterExpression { found: Token, pos: BytePos },

    #[error("parentheses nested deeper than {limit} levels")]
    NestingTooDeep { limit: usize, pos: BytePos },
}

impl ParseError {
    pub fn pos(&self) -> BytePos {
        match self {
            ParseError::ExpectedDefinition { pos, .. }
            | ParseError::MissingIdentifier { pos, .. }
            | ParseError::MissingType { pos, .. }
            | ParseError::MissingAssignOperator { pos, .. }
            | ParseError::MissingExpression { pos, .. }
            | ParseError::MissingClosingParen { pos, .. }
            | ParseError::TrailingTokensAfterExpression { pos, .. }
            | ParseError::NestingTooDeep { pos, .. } => *pos,
        }
    }

    /// The token the parser stopped at, if the error was caused by one.
    pub fn found(&self) -> Option<&Token> {
        match self {
            ParseError::ExpectedDefinition { found, .. }
            | ParseError::MissingIdentifier { found, .. }
            | ParseError::MissingType { found, .. }
            | ParseError::MissingAssignOperator { found, .. }
            | ParseError::MissingExpression { found, .. }
            | ParseError::MissingClosingParen { found, .. }
            | ParseError::TrailingTokensAfterExpression { found, .. } => Some(found),
            ParseError::NestingTooDeep { .. } => None,
        }
    }

    /// Covers the offending token, or the opening paren for `NestingTooDeep`.
    pub fn span(&self) -> Span {
        match self.found() {
            Some(found) => Span::at(self.pos(), found.source_len()),
            None => Span::at(self.pos(), 1),
        }
    }

    pub fn code(&self) -> u8 {
        match self.found() {
            Some(Token::Def) => code::UNEXPECTED_KEYWORD,
            _ => code::SYNTAX,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompilerError {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("input is {len} bytes long; the limit is {limit}")]
    InputTooLarge { len: usize, limit: usize },
}

impl CompilerError {
    pub fn pos(&self) -> BytePos {
        match self {
            CompilerError::Lex(e) => e.pos(),
            CompilerError::Parse(e) => e.pos(),
            CompilerError::InputTooLarge { .. } => BytePos(0),
        }
    }

    /// `None` when the error is about the input as a whole.
    pub fn span(&self) -> Option<Span> {
        match self {
            CompilerError::Lex(e) => Some(e.span()),
            CompilerError::Parse(e) => Some(e.span()),
            CompilerError::InputTooLarge { .. } => None,
        }
    }

    pub fn code(&self) -> u8 {
        match self {
            CompilerError::Lex(_) => code::SYNTAX,
            CompilerError::Parse(e) => e.code(),
            CompilerError::InputTooLarge { .. } => code::INPUT_TOO_LARGE,
        }
    }
}

/// Rejected while building AST values by hand.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AstError {
    #[error("'{0}' is not a valid identifier")]
    InvalidIdentifier(String),

    #[error("'{digits}' is not a valid {radix} literal")]
    InvalidDigits { radix: Radix, digits: String },
}
