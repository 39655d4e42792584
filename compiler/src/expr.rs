use std::fmt::Display;
use std::str::FromStr;

use serde::Serialize;

use crate::error::AstError;
use crate::token::Token;

/// An identifier: `[A-Za-z_][A-Za-z0-9_]*[']*`, never the keyword `def`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Identifier(String);

impl Identifier {
    pub fn new(value: impl Into<String>) -> Result<Identifier, AstError> {
        let value = value.into();
        if !Identifier::is_valid(&value) {
            return Err(AstError::InvalidIdentifier(value));
        }

        Ok(Identifier(value))
    }

    /// Caller guarantees `value` was scanned by the lexer's identifier rule.
    pub(crate) fn from_scanned(value: &str) -> Identifier {
        Identifier(value.to_owned())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_start_char(c: char) -> bool {
        c.is_ascii_alphabetic() || c == '_'
    }

    pub fn is_continue_char(c: char) -> bool {
        c.is_ascii_alphanumeric() || c == '_'
    }

    fn is_valid(value: &str) -> bool {
        let body = value.trim_end_matches('\'');
        let mut chars = body.chars();

        let starts_ok = chars.next().is_some_and(Identifier::is_start_char);
        starts_ok && chars.all(Identifier::is_continue_char) && !Token::is_keyword(value)
    }
}

impl FromStr for Identifier {
    type Err = AstError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Identifier::new(s)
    }
}

impl Display for Identifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Radix {
    Decimal,
    Hex,
    Octal,
    Binary,
}

impl Radix {
    /// Radix selected by the character following a leading `0`, if any.
    pub fn from_prefix(c: char) -> Option<Radix> {
        match c {
            'x' | 'X' => Some(Radix::Hex),
            'o' | 'O' => Some(Radix::Octal),
            'b' | 'B' => Some(Radix::Binary),
            _ => None,
        }
    }

    pub fn prefix(self) -> &'static str {
        match self {
            Radix::Decimal => "",
            Radix::Hex => "0x",
            Radix::Octal => "0o",
            Radix::Binary => "0b",
        }
    }

    pub fn is_digit(self, c: char) -> bool {
        match self {
            Radix::Decimal => c.is_ascii_digit(),
            Radix::Hex => c.is_ascii_hexdigit(),
            Radix::Octal => matches!(c, '0'..='7'),
            Radix::Binary => matches!(c, '0' | '1'),
        }
    }

    /// Digit alphabet plus the `_` separator.
    pub fn is_digit_or_separator(self, c: char) -> bool {
        c == '_' || self.is_digit(c)
    }
}

impl Display for Radix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Radix::Decimal => "decimal",
            Radix::Hex => "hexadecimal",
            Radix::Octal => "octal",
            Radix::Binary => "binary",
        })
    }
}

/// Digits of a number literal, without the radix prefix.
///
/// `_` separators are kept verbatim, trailing and repeated ones included.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct NumberLiteral {
    radix: Radix,
    digits: String,
}

impl NumberLiteral {
    pub fn new(radix: Radix, digits: impl Into<String>) -> Result<NumberLiteral, AstError> {
        let digits = digits.into();
        let starts_with_digit = digits.chars().next().is_some_and(|c| radix.is_digit(c));

        if !starts_with_digit || !digits.chars().all(|c| radix.is_digit_or_separator(c)) {
            return Err(AstError::InvalidDigits { radix, digits });
        }

        Ok(NumberLiteral { radix, digits })
    }

    pub fn decimal(digits: impl Into<String>) -> Result<NumberLiteral, AstError> {
        NumberLiteral::new(Radix::Decimal, digits)
    }

    pub(crate) fn from_scanned(radix: Radix, digits: &str) -> NumberLiteral {
        NumberLiteral {
            radix,
            digits: digits.to_owned(),
        }
    }

    pub fn radix(&self) -> Radix {
        self.radix
    }

    pub fn digits(&self) -> &str {
        &self.digits
    }
}

impl Display for NumberLiteral {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.radix.prefix(), self.digits)
    }
}

/// The type written after `:` in a definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[non_exhaustive]
pub enum TypeExpr {
    NamedType(Identifier),
}

impl Display for TypeExpr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TypeExpr::NamedType(name) => write!(f, "{name}"),
        }
    }
}

/// Parentheses only group; they never show up here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Expr {
    IdentRef(Identifier),
    Constant(NumberLiteral),
}

impl Display for Expr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Expr::IdentRef(v) => write!(f, "{v}"),
            Expr::Constant(v) => write!(f, "{v}"),
        }
    }
}
