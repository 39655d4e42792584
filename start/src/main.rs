use std::process::ExitCode;

use clap::Parser;
use start::cli::Cli;
use tracing_subscriber::EnvFilter;

fn directive_for_verbosity(v: u8) -> &'static str {
    match v {
        0 => "start=warn,start_compiler=warn",
        1 => "start=info,start_compiler=info",
        2 => "start=debug,start_compiler=debug",
        _ => "start=trace,start_compiler=trace",
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(directive_for_verbosity(cli.verbose))),
        )
        .with_ansi(false)
        .with_writer(std::io::stderr)
        .init();

    match start::run(&cli, &mut std::io::stdout()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::from(e.code())
        }
    }
}
