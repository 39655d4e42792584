use std::{io, path::PathBuf};

use rustyline::error::ReadlineError;
use thiserror::Error;

/// Exit code when the source file cannot be read.
pub const READ_FAILED: u8 = 101;
/// Exit code when output cannot be written.
pub const WRITE_FAILED: u8 = 102;

#[derive(Debug, Error)]
pub enum StartError {
    /// A rendered syntax report and the code to exit with.
    #[error("{report}")]
    Syntax { code: u8, report: String },

    #[error("could not read '{}': {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("io error: {0}")]
    Io(#[from] io::Error),

    #[error("readline error: {0}")]
    Readline(#[from] ReadlineError),

    #[error("could not serialize output: {0}")]
    Json(#[from] serde_json::Error),
}

impl StartError {
    pub fn code(&self) -> u8 {
        match self {
            StartError::Syntax { code, .. } => *code,
            StartError::Read { .. } => READ_FAILED,
            StartError::Io(_) => WRITE_FAILED,
            StartError::Readline(_) | StartError::Json(_) => 1,
        }
    }
}
