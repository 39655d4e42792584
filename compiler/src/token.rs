use std::fmt::Display;
use std::str::FromStr;

use crate::expr::{Identifier, NumberLiteral};

pub const KEYWORD_DEF: &str = "def";

#[derive(PartialEq, Eq, Debug, Clone)]
pub enum Token {
    LeftParen,
    RightParen,
    Colon,
    Assign,
    Dot,

    Identifier(Identifier),
    Number(NumberLiteral),

    Def,

    Eof,
}

impl Token {
    pub fn is_keyword(s: &str) -> bool {
        s == KEYWORD_DEF
    }

    /// Classifies a fully scanned identifier-shaped word.
    pub fn from_word(word: &str) -> Token {
        match Token::from_str(word) {
            Ok(kw) => kw,
            Err(_) => Token::Identifier(Identifier::from_scanned(word)),
        }
    }

    /// Byte length of the source text this token was scanned from.
    ///
    /// Every token except `Eof` prints back to text of the same length as
    /// its source, so errors holding only the token can still report a span.
    pub fn source_len(&self) -> u32 {
        match self {
            Token::Eof => 0,
            token => u32::try_from(token.to_string().len()).unwrap_or(u32::MAX),
        }
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::LeftParen => f.write_str("("),
            Token::RightParen => f.write_str(")"),
            Token::Colon => f.write_str(":"),
            Token::Assign => f.write_str(":="),
            Token::Dot => f.write_str("."),
            Token::Identifier(v) => write!(f, "{v}"),
            Token::Number(v) => write!(f, "{v}"),
            Token::Def => f.write_str(KEYWORD_DEF),
            Token::Eof => f.write_str("end of input"),
        }
    }
}

#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum TokenKind {
    LeftParen,
    RightParen,
    Colon,
    Assign,
    Dot,

    Identifier,
    Number,

    Def,

    Eof,
}

/// Keywords only; everything else is an identifier.
impl FromStr for Token {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            KEYWORD_DEF => Ok(Token::Def),
            v => Err(format!("Not a valid keyword: {}", v)),
        }
    }
}

impl From<&Token> for TokenKind {
    fn from(value: &Token) -> Self {
        match value {
            Token::LeftParen => TokenKind::LeftParen,
            Token::RightParen => TokenKind::RightParen,
            Token::Colon => TokenKind::Colon,
            Token::Assign => TokenKind::Assign,
            Token::Dot => TokenKind::Dot,
            Token::Identifier(_) => TokenKind::Identifier,
            Token::Number(_) => TokenKind::Number,
            Token::Def => TokenKind::Def,
            Token::Eof => TokenKind::Eof,
        }
    }
}

impl From<&crate::pos::WithTokenMetadata<Token>> for TokenKind {
    fn from(t: &crate::pos::WithTokenMetadata<Token>) -> Self {
        TokenKind::from(&t.value)
    }
}
