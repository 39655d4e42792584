use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueEnum};
use start_compiler::{config::ParserConfig, node_types::Grammar};

pub const DEFAULT_HISTORY_FILE: &str = ".start-history.txt";

#[derive(Parser, Debug)]
#[command(name = "start", version, about = "Parser front end for the start language", long_about = None)]
pub struct Cli {
    #[arg(help = "Source file to parse; starts the REPL when omitted")]
    pub file: Option<PathBuf>,

    #[arg(short, long, conflicts_with = "file", help = "Parse one REPL submission and exit")]
    pub eval: Option<String>,

    #[arg(long, value_enum, default_value_t = Emit::Canonical, help = "Output format")]
    pub emit: Emit,

    #[arg(long, value_enum, help = "Print the node-type catalog of a grammar and exit")]
    pub node_types: Option<GrammarArg>,

    #[arg(long, default_value_t = ParserConfig::DEFAULT_MAX_NESTING_DEPTH)]
    pub max_nesting_depth: usize,

    #[arg(long, default_value_t = ParserConfig::DEFAULT_MAX_SOURCE_LEN)]
    pub max_source_len: usize,

    #[arg(long, default_value = DEFAULT_HISTORY_FILE, help = "REPL history file")]
    pub history: PathBuf,

    #[arg(long, help = "Print diagnostics without color")]
    pub no_color: bool,

    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn parser_config(&self) -> ParserConfig {
        ParserConfig::default()
            .with_max_nesting_depth(self.max_nesting_depth)
            .with_max_source_len(self.max_source_len)
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emit {
    /// Canonical source text.
    Canonical,
    /// Rust debug dump of the tree.
    Ast,
    Json,
    /// Tree-sitter style s-expression.
    Sexp,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrammarArg {
    Start,
    StartRepl,
}

impl From<GrammarArg> for Grammar {
    fn from(value: GrammarArg) -> Self {
        match value {
            GrammarArg::Start => Grammar::Start,
            GrammarArg::StartRepl => Grammar::StartRepl,
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use start_compiler::config::ParserConfig;

    use super::{Cli, Emit, GrammarArg};

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["start"]).expect("Expected valid args");

        assert_eq!(cli.file, None);
        assert_eq!(cli.emit, Emit::Canonical);
        assert_eq!(cli.node_types, None);
        assert_eq!(cli.parser_config(), ParserConfig::default());
        assert_eq!(cli.history.to_str(), Some(".start-history.txt"));
        assert!(!cli.no_color);
    }

    #[test]
    fn test_flags() {
        let cli = Cli::try_parse_from([
            "start",
            "prog.start",
            "--emit",
            "sexp",
            "--max-nesting-depth",
            "4",
            "-vv",
            "--no-color",
        ])
        .expect("Expected valid args");

        assert_eq!(cli.file.as_deref().and_then(|p| p.to_str()), Some("prog.start"));
        assert_eq!(cli.emit, Emit::Sexp);
        assert_eq!(cli.parser_config().max_nesting_depth, 4);
        assert_eq!(cli.verbose, 2);
        assert!(cli.no_color);
    }

    #[test]
    fn test_node_types_arg() {
        let cli = Cli::try_parse_from(["start", "--node-types", "start-repl"])
            .expect("Expected valid args");
        assert_eq!(cli.node_types, Some(GrammarArg::StartRepl));
    }

    #[test]
    fn test_eval_conflicts_with_file() {
        assert!(Cli::try_parse_from(["start", "prog.start", "--eval", "1."]).is_err());
    }
}
