use tracing::{debug, trace};

use crate::{
    config::ParserConfig,
    def::{Definition, ExprDef, Program},
    error::ParseError,
    expr::{Expr, TypeExpr},
    pos::{BytePos, WithTokenMetadata},
    token::{Token, TokenKind},
};

static EOF_TOKEN: WithTokenMetadata<Token> = WithTokenMetadata::empty(Token::Eof);

/// Recursive-descent parser over a lexed token stream.
///
/// The stream is expected to end with `Token::Eof`; one is appended when
/// missing. The cursor never moves past that final token.
pub struct Parser {
    tokens: Vec<WithTokenMetadata<Token>>,
    cursor: usize,
    depth: usize,
    max_depth: usize,
}

impl Parser {
    pub fn new(mut tokens: Vec<WithTokenMetadata<Token>>) -> Parser {
        let terminated = matches!(tokens.last(), Some(t) if t.value == Token::Eof);
        if !terminated {
            let (end, line) = tokens
                .last()
                .map(|t| (t.pos.end, t.pos.line))
                .unwrap_or((BytePos(0), 1));
            tokens.push(WithTokenMetadata::new(Token::Eof, end, end, line));
        }

        Parser {
            tokens,
            cursor: 0,
            depth: 0,
            max_depth: ParserConfig::DEFAULT_MAX_NESTING_DEPTH,
        }
    }

    pub fn with_config(mut self, config: &ParserConfig) -> Parser {
        self.max_depth = config.max_nesting_depth;
        self
    }

    /// `program := definition*`
    pub fn parse_program(&mut self) -> Result<Program, ParseError> {
        let mut definitions: Vec<Definition> = Vec::new();

        while !self.check(TokenKind::Eof) {
            definitions.push(self.parse_definition()?);
        }

        debug!(count = definitions.len(), "parsed program");
        Ok(Program::new(definitions))
    }

    pub(crate) fn peek(&self) -> &WithTokenMetadata<Token> {
        self.tokens
            .get(self.cursor)
            .or(self.tokens.last())
            .unwrap_or(&EOF_TOKEN)
    }

    pub(crate) fn next(&mut self) -> &WithTokenMetadata<Token> {
        let current = self.cursor;
        if current + 1 < self.tokens.len() {
            self.cursor += 1;
        }

        self.tokens.get(current).unwrap_or(&EOF_TOKEN)
    }

    pub(crate) fn check(&self, t: TokenKind) -> bool {
        TokenKind::from(self.peek()) == t
    }

    /// Builds an error describing the token under the cursor.
    pub(crate) fn unexpected<F>(&self, err: F) -> ParseError
    where
        F: FnOnce(Token, BytePos) -> ParseError,
    {
        let found = self.peek();
        err(found.value.clone(), found.pos.start)
    }

    fn consume<F>(&mut self, t: TokenKind, err: F) -> Result<&WithTokenMetadata<Token>, ParseError>
    where
        F: FnOnce(Token, BytePos) -> ParseError,
    {
        if self.check(t) {
            Ok(self.next())
        } else {
            Err(self.unexpected(err))
        }
    }

    /// `definition := expr_def`
    pub(crate) fn parse_definition(&mut self) -> Result<Definition, ParseError> {
        if self.check(TokenKind::Def) {
            Ok(Definition::ExprDef(self.parse_expr_def()?))
        } else {
            Err(self.unexpected(|found, pos| ParseError::ExpectedDefinition { found, pos }))
        }
    }

    /// `expr_def := "def" ident ty_restr? ":=" expr_final`
    fn parse_expr_def(&mut self) -> Result<ExprDef, ParseError> {
        self.consume(TokenKind::Def, |found, pos| ParseError::ExpectedDefinition {
            found,
            pos,
        })?;

        let name = match &self.peek().value {
            Token::Identifier(v) => v.clone(),
            _ => {
                return Err(self.unexpected(|found, pos| ParseError::MissingIdentifier { found, pos }))
            }
        };
        self.next();

        let ty = if self.check(TokenKind::Colon) {
            self.next();
            Some(self.parse_type()?)
        } else {
            None
        };

        self.consume(TokenKind::Assign, |found, pos| {
            ParseError::MissingAssignOperator { found, pos }
        })?;

        let body = self.parse_expr_final()?;

        trace!(name = %name, "parsed definition");
        Ok(ExprDef { name, ty, body })
    }

    /// `ty := ident`
    ///
    /// New type forms get a `TypeExpr` variant and a branch here.
    fn parse_type(&mut self) -> Result<TypeExpr, ParseError> {
        let ty = match &self.peek().value {
            Token::Identifier(v) => TypeExpr::NamedType(v.clone()),
            _ => return Err(self.unexpected(|found, pos| ParseError::MissingType { found, pos })),
        };
        self.next();

        Ok(ty)
    }

    /// `expr_final := expr "."?`
    pub(crate) fn parse_expr_final(&mut self) -> Result<Expr, ParseError> {
        let expr = self.parse_expr()?;

        if self.check(TokenKind::Dot) {
            self.next();
        }

        Ok(expr)
    }

    /// `expr := "(" expr ")" | ident | number`
    fn parse_expr(&mut self) -> Result<Expr, ParseError> {
        let expr = match &self.peek().value {
            Token::LeftParen => return self.parse_grouping(),
            Token::Identifier(v) => Expr::IdentRef(v.clone()),
            Token::Number(v) => Expr::Constant(v.clone()),
            _ => {
                return Err(self.unexpected(|found, pos| ParseError::MissingExpression { found, pos }))
            }
        };
        self.next();

        Ok(expr)
    }

    /// Parentheses group only; the inner expression is returned as is.
    fn parse_grouping(&mut self) -> Result<Expr, ParseError> {
        let open = self.next().pos.start;

        if self.depth >= self.max_depth {
            return Err(ParseError::NestingTooDeep {
                limit: self.max_depth,
                pos: open,
            });
        }

        self.depth += 1;
        let expr = self.parse_expr();
        self.depth -= 1;
        let expr = expr?;

        self.consume(TokenKind::RightParen, |found, pos| {
            ParseError::MissingClosingParen { found, pos }
        })?;

        Ok(expr)
    }
}
