use config::ParserConfig;
use def::{Program, ReplInput};
use error::CompilerError;
use lexer::Lexer;
use parser::Parser;
use pos::WithTokenMetadata;
use token::Token;
use tracing::debug;

pub mod config;
pub mod def;
pub mod error;
pub mod expr;
pub mod lexer;
pub mod node_types;
pub mod parser;
pub mod pos;
mod repl;
mod scanner;
pub mod token;


fn check_len(buf: &str, config: &ParserConfig) -> Result<(), CompilerError> {
    let limit = config.source_len_limit();
    if buf.len() > limit {
        return Err(CompilerError::InputTooLarge {
            len: buf.len(),
            limit,
        });
    }

    Ok(())
}

fn parser_for(buf: &str, config: &ParserConfig) -> Result<Parser, CompilerError> {
    check_len(buf, config)?;
    let tokens = Lexer::new(buf).tokenize()?;

    Ok(Parser::new(tokens).with_config(config))
}

pub fn tokenize(buf: &str) -> Result<Vec<WithTokenMetadata<Token>>, CompilerError> {
    check_len(buf, &ParserConfig::default())?;
    Ok(Lexer::new(buf).tokenize()?)
}

/// Parses a whole source file: zero or more definitions.
pub fn parse_program(buf: &str) -> Result<Program, CompilerError> {
    parse_program_with_config(buf, &ParserConfig::default())
}

pub fn parse_program_with_config(
    buf: &str,
    config: &ParserConfig,
) -> Result<Program, CompilerError> {
    debug!(len = buf.len(), "parsing program");
    Ok(parser_for(buf, config)?.parse_program()?)
}

/// Parses one interactive submission: an expression or definitions.
pub fn parse_repl_input(buf: &str) -> Result<ReplInput, CompilerError> {
    parse_repl_input_with_config(buf, &ParserConfig::default())
}

pub fn parse_repl_input_with_config(
    buf: &str,
    config: &ParserConfig,
) -> Result<ReplInput, CompilerError> {
    debug!(len = buf.len(), "parsing repl input");
    Ok(parser_for(buf, config)?.parse_repl_input()?)
}
