use std::{fs, io::Write, path::Path};

use start_compiler::{
    config::ParserConfig,
    node_types::node_types_json,
    parse_program_with_config, parse_repl_input_with_config,
};
use tracing::info;

pub mod cli;
pub mod diagnostic;
pub mod emit;
pub mod error;
pub mod repl;

use cli::{Cli, Emit};
use diagnostic::{Snippet, SyntaxDiagnostic};
use emit::render;
use error::StartError;
use repl::{Repl, Session};

pub fn run<W: Write>(cli: &Cli, out: &mut W) -> Result<(), StartError> {
    if let Some(grammar) = cli.node_types {
        writeln!(out, "{}", node_types_json(grammar.into())?)?;
        return Ok(());
    }

    let config = cli.parser_config();
    let color = !cli.no_color;

    if let Some(source) = &cli.eval {
        return run_eval(source, cli.emit, &config, color, out);
    }

    match &cli.file {
        Some(path) => run_file(path, cli.emit, &config, color, out),
        None => {
            let session = Session::new(cli.emit, config).with_color(color);
            Repl::new(session, cli.history.clone())?.run()
        }
    }
}

fn run_eval<W: Write>(
    source: &str,
    emit: Emit,
    config: &ParserConfig,
    color: bool,
    out: &mut W,
) -> Result<(), StartError> {
    let input = parse_repl_input_with_config(source, config)
        .map_err(|e| SyntaxDiagnostic::new(&e, Snippet::new("eval", source)).into_error(color))?;

    writeln!(out, "{}", render(&input, emit)?)?;
    Ok(())
}

fn run_file<W: Write>(
    path: &Path,
    emit: Emit,
    config: &ParserConfig,
    color: bool,
    out: &mut W,
) -> Result<(), StartError> {
    let source = fs::read_to_string(path).map_err(|source| StartError::Read {
        path: path.to_owned(),
        source,
    })?;

    let program = parse_program_with_config(&source, config).map_err(|e| {
        let name = path.display().to_string();
        SyntaxDiagnostic::new(&e, Snippet::new(name, source.as_str())).into_error(color)
    })?;
    info!(path = %path.display(), definitions = program.len(), "parsed file");

    writeln!(out, "{}", render(&program, emit)?)?;
    Ok(())
}
