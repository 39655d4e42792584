use tracing::debug;

use crate::{
    def::ReplInput,
    error::ParseError,
    parser::Parser,
    token::TokenKind,
};

impl Parser {
    /// Decides from the first token whether an interactive submission is a
    /// batch of definitions or a single expression, then parses it with the
    /// same rules the program entry uses.
    ///
    /// `definitions_or_expression := definition+ | expr_final`
    pub fn parse_repl_input(&mut self) -> Result<ReplInput, ParseError> {
        if self.check(TokenKind::Def) {
            let mut definitions = vec![self.parse_definition()?];

            while !self.check(TokenKind::Eof) {
                definitions.push(self.parse_definition()?);
            }

            debug!(count = definitions.len(), "parsed repl definitions");
            return Ok(ReplInput::Definitions(definitions));
        }

        let expr = self.parse_expr_final()?;

        if !self.check(TokenKind::Eof) {
            return Err(self.unexpected(|found, pos| {
                ParseError::TrailingTokensAfterExpression { found, pos }
            }));
        }

        debug!("parsed repl expression");
        Ok(ReplInput::Expression(expr))
    }
}
