use std::io::Write;
use std::path::PathBuf;

use rustyline::{error::ReadlineError, history::FileHistory};
use start_compiler::{config::ParserConfig, parse_repl_input_with_config};
use tracing::{debug, warn};

use crate::{
    cli::Emit,
    diagnostic::{Snippet, SyntaxDiagnostic},
    emit::render,
    error::StartError,
};

const QUIT_COMMAND: &str = ":quit";
const MAX_LINE_NUM_LEN: usize = 3;

#[derive(Debug, PartialEq)]
pub enum IterStatus {
    Continue,
    Break,
}

/// Right-aligned line number followed by `∥`, or `⎮` while a submission is
/// still being collected.
fn prompt_string(line_num: usize, many_line: bool) -> String {
    let line_num_str = line_num.to_string();
    let pad = MAX_LINE_NUM_LEN.saturating_sub(line_num_str.len());
    let bar = if many_line { "⎮" } else { "∥" };

    format!("{}{} {} ", " ".repeat(pad), line_num_str, bar)
}

/// Collects input lines into submissions and reports each parse result.
///
/// A submission ends at a line ending in `.` or at an empty line.
pub struct Session {
    buffer: String,
    line_num: usize,
    /// Prompt line of the first line in `buffer`.
    first_line: usize,
    emit: Emit,
    config: ParserConfig,
    color: bool,
}

impl Session {
    pub fn new(emit: Emit, config: ParserConfig) -> Self {
        Session {
            buffer: String::new(),
            line_num: 1,
            first_line: 1,
            emit,
            config,
            color: true,
        }
    }

    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    pub fn prompt(&self) -> String {
        prompt_string(self.line_num, !self.buffer.is_empty())
    }

    pub fn handle_line<W: Write>(&mut self, line: &str, out: &mut W) -> Result<IterStatus, StartError> {
        let current = self.line_num;
        self.line_num += 1;
        let trimmed = line.trim();

        if self.buffer.is_empty() && trimmed == QUIT_COMMAND {
            return Ok(IterStatus::Break);
        }

        if trimmed.is_empty() {
            if !self.buffer.is_empty() {
                self.process_buffer(out)?;
            }
            return Ok(IterStatus::Continue);
        }

        if self.buffer.is_empty() {
            self.first_line = current;
        }
        self.buffer.push_str(line);
        self.buffer.push('\n');

        if trimmed.ends_with('.') {
            self.process_buffer(out)?;
        }

        Ok(IterStatus::Continue)
    }

    /// Submits whatever is still buffered.
    pub fn finish<W: Write>(&mut self, out: &mut W) -> Result<(), StartError> {
        if !self.buffer.trim().is_empty() {
            self.process_buffer(out)?;
        }

        Ok(())
    }

    fn process_buffer<W: Write>(&mut self, out: &mut W) -> Result<(), StartError> {
        let source = std::mem::take(&mut self.buffer);

        match parse_repl_input_with_config(&source, &self.config) {
            Ok(input) => writeln!(out, "{}", render(&input, self.emit)?)?,
            Err(e) => {
                debug!(error = %e, "rejected repl input");
                let snippet = Snippet::new("repl", source).starting_at_line(self.first_line);
                writeln!(out, "{}", SyntaxDiagnostic::new(&e, snippet).render(self.color))?
            }
        }

        Ok(())
    }
}

pub struct Repl {
    editor: rustyline::Editor<(), FileHistory>,
    out: Box<dyn Write>,
    session: Session,
    history: PathBuf,
}

impl Repl {
    pub fn new(session: Session, history: PathBuf) -> Result<Self, StartError> {
        let mut editor = rustyline::DefaultEditor::new()?;
        if let Err(e) = editor.load_history(&history) {
            debug!(error = %e, path = %history.display(), "no history loaded");
        }

        Ok(Repl {
            out: Box::new(std::io::stdout()),
            editor,
            session,
            history,
        })
    }

    fn iter(&mut self) -> Result<IterStatus, StartError> {
        match self.editor.readline(&self.session.prompt()) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    let _ = self.editor.add_history_entry(line.trim());
                }
                self.session.handle_line(&line, &mut self.out)
            }
            Err(ReadlineError::Interrupted) => {
                writeln!(&mut self.out, "SIGINT received; exiting...")?;
                Ok(IterStatus::Break)
            }
            Err(ReadlineError::Eof) => {
                self.session.finish(&mut self.out)?;
                Ok(IterStatus::Break)
            }
            Err(err) => {
                writeln!(&mut self.out, "Error: {err:?}")?;
                Ok(IterStatus::Continue)
            }
        }
    }

    pub fn run(&mut self) -> Result<(), StartError> {
        while self.iter()? == IterStatus::Continue {}

        if let Err(e) = self.editor.save_history(&self.history) {
            warn!(error = %e, path = %self.history.display(), "failed to save history");
        }
        writeln!(&mut self.out, "Exiting REPL...")?;

        Ok(())
    }
}
