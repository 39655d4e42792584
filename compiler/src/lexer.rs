use std::iter::FusedIterator;

use tracing::{debug, trace};

use crate::{
    error::LexError,
    expr::{Identifier, NumberLiteral, Radix},
    pos::{BytePos, WithTokenMetadata},
    scanner::Scanner,
    token::Token,
};

/// Turns a source buffer into tokens, ending with a single `Token::Eof`.
///
/// Also usable as an iterator for one-token-at-a-time consumers. Iteration
/// stops after the first error. Cloning a lexer snapshots its position.
#[derive(Debug, Clone)]
pub struct Lexer<'a> {
    scanner: Scanner<'a>,
    line: usize,
    done: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(buf: &'a str) -> Lexer<'a> {
        Lexer {
            scanner: Scanner::new(buf),
            line: 1,
            done: false,
        }
    }

    pub fn tokenize(&mut self) -> Result<Vec<WithTokenMetadata<Token>>, LexError> {
        let mut tokens: Vec<WithTokenMetadata<Token>> = Vec::new();

        for token in self.by_ref() {
            tokens.push(token?);
        }

        debug!(count = tokens.len(), "tokenized source");
        Ok(tokens)
    }

    fn next_token(&mut self) -> Result<Option<WithTokenMetadata<Token>>, LexError> {
        loop {
            let start = self.scanner.pos;

            let c = match self.scanner.next() {
                Some(c) => c,
                None => return Ok(None),
            };

            if let Some(token) = self.match_token(c, start)? {
                trace!(%token, start = start.0, "token");
                return Ok(Some(WithTokenMetadata::new(
                    token,
                    start,
                    self.scanner.pos,
                    self.line,
                )));
            }
        }
    }

    fn eof(&self) -> WithTokenMetadata<Token> {
        WithTokenMetadata::new(Token::Eof, self.scanner.pos, self.scanner.pos, self.line)
    }

    fn match_token(&mut self, c: char, start: BytePos) -> Result<Option<Token>, LexError> {
        Ok(match c {
            '(' => Some(Token::LeftParen),
            ')' => Some(Token::RightParen),
            '.' => Some(Token::Dot),
            ':' => {
                if self.scanner.consume_if(|c| c == '=') {
                    Some(Token::Assign)
                } else {
                    Some(Token::Colon)
                }
            }
            ' ' | '\r' | '\t' => None,
            '\n' => {
                self.line += 1;
                None
            }
            c if c.is_ascii_digit() => Some(self.tokenize_number(c, start)?),
            c if Identifier::is_start_char(c) => Some(self.tokenize_ident(start)),
            ch => return Err(LexError::UnexpectedChar { ch, pos: start }),
        })
    }

    fn tokenize_number(&mut self, first: char, start: BytePos) -> Result<Token, LexError> {
        let prefixed = match (first, self.scanner.peek().and_then(Radix::from_prefix)) {
            ('0', Some(radix)) => Some(radix),
            _ => None,
        };

        if let Some(radix) = prefixed {
            if !self.scanner.peek_second().is_some_and(|c| radix.is_digit(c)) {
                return Err(LexError::UnterminatedLiteral { radix, pos: start });
            }

            self.scanner.next();
            let digits = self
                .scanner
                .consume_while(|c| radix.is_digit_or_separator(c));

            return Ok(Token::Number(NumberLiteral::from_scanned(radix, digits)));
        }

        self.scanner
            .consume_while(|c| Radix::Decimal.is_digit_or_separator(c));

        Ok(Token::Number(NumberLiteral::from_scanned(
            Radix::Decimal,
            self.scanner.slice_from(start),
        )))
    }

    /// Scans the whole word before deciding between keyword and identifier,
    /// so `define` never splits into `def` + `ine`.
    fn tokenize_ident(&mut self, start: BytePos) -> Token {
        self.scanner.consume_while(Identifier::is_continue_char);
        self.scanner.consume_while(|c| c == '\'');

        Token::from_word(self.scanner.slice_from(start))
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Result<WithTokenMetadata<Token>, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        match self.next_token() {
            Ok(Some(token)) => Some(Ok(token)),
            Ok(None) => {
                self.done = true;
                Some(Ok(self.eof()))
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

impl<'a> FusedIterator for Lexer<'a> {}

#[cfg(test)]
mod tests {
    use crate::{
        error::LexError,
        expr::{Identifier, NumberLiteral, Radix},
        pos::BytePos,
        token::Token,
    };

    use super::Lexer;

    fn get_tokens(str: &str) -> Vec<Token> {
        Lexer::new(str)
            .tokenize()
            .expect("Expected source to lex")
            .into_iter()
            .map(|t| t.value)
            .filter(|t| *t != Token::Eof)
            .collect()
    }

    fn ident(s: &str) -> Token {
        Token::Identifier(Identifier::new(s).expect("valid identifier"))
    }

    fn number(radix: Radix, digits: &str) -> Token {
        Token::Number(NumberLiteral::new(radix, digits).expect("valid literal"))
    }

    #[test]
    fn test_lexer() {
        assert_eq!(get_tokens("("), vec![Token::LeftParen]);
        assert_eq!(get_tokens(")"), vec![Token::RightParen]);
        assert_eq!(get_tokens("."), vec![Token::Dot]);
        assert_eq!(get_tokens(":"), vec![Token::Colon]);
        assert_eq!(get_tokens(":="), vec![Token::Assign]);
        assert_eq!(get_tokens("::="), vec![Token::Colon, Token::Assign]);
        assert_eq!(get_tokens("def"), vec![Token::Def]);
        assert_eq!(get_tokens(" "), vec![]);
        assert_eq!(get_tokens("\r"), vec![]);
        assert_eq!(get_tokens("\t"), vec![]);
        assert_eq!(get_tokens("\n"), vec![]);
        assert_eq!(get_tokens(""), vec![]);
    }

    #[test]
    fn test_lexer_ends_with_eof() {
        let tokens = Lexer::new("def x").tokenize().expect("Expected source to lex");
        let last = tokens.last().expect("Expected an eof token");

        assert_eq!(last.value, Token::Eof);
        assert_eq!(last.pos.start, BytePos(5));
        assert_eq!(last.pos.end, BytePos(5));

        let tokens = Lexer::new("").tokenize().expect("Expected source to lex");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].value, Token::Eof);
    }

    #[test]
    fn test_lexer_definition() {
        assert_eq!(
            get_tokens("def n : T := (x').\n"),
            vec![
                Token::Def,
                ident("n"),
                Token::Colon,
                ident("T"),
                Token::Assign,
                Token::LeftParen,
                ident("x'"),
                Token::RightParen,
                Token::Dot,
            ]
        );
    }

    #[test]
    fn test_lexer_unexpected_char() {
        assert_eq!(
            Lexer::new("def a := 1 + 1").tokenize(),
            Err(LexError::UnexpectedChar {
                ch: '+',
                pos: BytePos(11)
            })
        );
        assert_eq!(
            Lexer::new("=").tokenize(),
            Err(LexError::UnexpectedChar {
                ch: '=',
                pos: BytePos(0)
            })
        );
        assert_eq!(
            Lexer::new("'x").tokenize(),
            Err(LexError::UnexpectedChar {
                ch: '\'',
                pos: BytePos(0)
            })
        );
        assert_eq!(
            Lexer::new("x λ").tokenize(),
            Err(LexError::UnexpectedChar {
                ch: 'λ',
                pos: BytePos(2)
            })
        );
    }

    #[test]
    fn test_tokenize_number_radix() {
        assert_eq!(get_tokens("0x1F"), vec![number(Radix::Hex, "1F")]);
        assert_eq!(get_tokens("0XaB_c"), vec![number(Radix::Hex, "aB_c")]);
        assert_eq!(get_tokens("0o17"), vec![number(Radix::Octal, "17")]);
        assert_eq!(get_tokens("0O7_7"), vec![number(Radix::Octal, "7_7")]);
        assert_eq!(get_tokens("0b101"), vec![number(Radix::Binary, "101")]);
        assert_eq!(get_tokens("0B1_0"), vec![number(Radix::Binary, "1_0")]);
        assert_eq!(get_tokens("1_000"), vec![number(Radix::Decimal, "1_000")]);
        assert_eq!(get_tokens("0"), vec![number(Radix::Decimal, "0")]);
        assert_eq!(get_tokens("007"), vec![number(Radix::Decimal, "007")]);
    }

    #[test]
    fn test_tokenize_number_lenient_separators() {
        assert_eq!(get_tokens("1_"), vec![number(Radix::Decimal, "1_")]);
        assert_eq!(get_tokens("1__0"), vec![number(Radix::Decimal, "1__0")]);
        assert_eq!(get_tokens("0x1_"), vec![number(Radix::Hex, "1_")]);
    }

    #[test]
    fn test_tokenize_number_stops_at_foreign_digit() {
        assert_eq!(
            get_tokens("0b102"),
            vec![number(Radix::Binary, "10"), number(Radix::Decimal, "2")]
        );
        assert_eq!(
            get_tokens("0o78"),
            vec![number(Radix::Octal, "7"), number(Radix::Decimal, "8")]
        );
        assert_eq!(
            get_tokens("12ab"),
            vec![number(Radix::Decimal, "12"), ident("ab")]
        );
    }

    #[test]
    fn test_tokenize_number_unterminated_prefix() {
        assert_eq!(
            Lexer::new("0x").tokenize(),
            Err(LexError::UnterminatedLiteral {
                radix: Radix::Hex,
                pos: BytePos(0)
            })
        );
        assert_eq!(
            Lexer::new("def a := 0b2").tokenize(),
            Err(LexError::UnterminatedLiteral {
                radix: Radix::Binary,
                pos: BytePos(9)
            })
        );
        assert_eq!(
            Lexer::new("0o_1").tokenize(),
            Err(LexError::UnterminatedLiteral {
                radix: Radix::Octal,
                pos: BytePos(0)
            })
        );
    }

    #[test]
    fn test_tokenize_ident() {
        assert_eq!(get_tokens("a20"), vec![ident("a20")]);
        assert_eq!(get_tokens("x"), vec![ident("x")]);
        assert_eq!(get_tokens("_snoobers"), vec![ident("_snoobers")]);
        assert_eq!(get_tokens("x''"), vec![ident("x''")]);
        assert_eq!(get_tokens("x'y"), vec![ident("x'"), ident("y")]);
    }

    #[test]
    fn test_tokenize_ident_kw_boundary() {
        assert_eq!(get_tokens("define"), vec![ident("define")]);
        assert_eq!(get_tokens("def'"), vec![ident("def'")]);
        assert_eq!(get_tokens("def_"), vec![ident("def_")]);
        assert_eq!(get_tokens("def("), vec![Token::Def, Token::LeftParen]);
        assert_eq!(get_tokens("defdef"), vec![ident("defdef")]);
    }

    #[test]
    fn test_iterator_stops_after_error() {
        let mut lexer = Lexer::new("a ? b");

        assert_eq!(lexer.next().map(|t| t.map(|t| t.value)), Some(Ok(ident("a"))));
        assert!(matches!(lexer.next(), Some(Err(LexError::UnexpectedChar { .. }))));
        assert!(lexer.next().is_none());
        assert!(lexer.next().is_none());
    }

    #[test]
    fn test_iterator_restart_from_clone() {
        let mut lexer = Lexer::new("def a := 1");
        lexer.next();

        let snapshot = lexer.clone();
        let rest: Vec<Token> = lexer.map(|t| t.expect("lexes").value).collect();
        let again: Vec<Token> = snapshot.map(|t| t.expect("lexes").value).collect();

        assert_eq!(rest, again);
        assert_eq!(rest.len(), 4);
    }

    #[test]
    fn test_position() {
        let tokens = Lexer::new("def\nhello :=\n\t\t0x9\n.")
            .tokenize()
            .expect("Expected source to lex");

        let token = &tokens[0];
        assert_eq!(token.pos.start.0, 0);
        assert_eq!(token.pos.end.0, 3);
        assert_eq!(token.pos.line, 1);

        let token = &tokens[1];
        assert_eq!(token.pos.start.0, 4);
        assert_eq!(token.pos.end.0, 9);
        assert_eq!(token.pos.line, 2);

        let token = &tokens[2];
        assert_eq!(token.pos.start.0, 10);
        assert_eq!(token.pos.end.0, 12);
        assert_eq!(token.pos.line, 2);

        let token = &tokens[3];
        assert_eq!(token.pos.start.0, 15);
        assert_eq!(token.pos.end.0, 18);
        assert_eq!(token.pos.line, 3);

        let token = &tokens[4];
        assert_eq!(token.pos.start.0, 19);
        assert_eq!(token.pos.line, 4);
    }

    #[test]
    fn test_token_text() {
        let source = "def n := 0X1f";
        let tokens = Lexer::new(source).tokenize().expect("Expected source to lex");
        let texts: Vec<&str> = tokens.iter().map(|t| t.text(source)).collect();

        assert_eq!(texts, vec!["def", "n", ":=", "0X1f", ""]);
    }
}
