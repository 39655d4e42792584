//! Source-annotated error reports.
//!
//! Compiler errors are turned into miette diagnostics: the offending line is
//! quoted with a label under the token the parser stopped at, and the header
//! carries the error code the process exits with.

use std::fmt::Display;

use miette::{
    Diagnostic, GraphicalReportHandler, GraphicalTheme, LabeledSpan, MietteError,
    MietteSpanContents, SourceCode, SourceSpan, SpanContents,
};
use start_compiler::{
    error::{CompilerError, LexError},
    pos::Span,
    token::Token,
};

use crate::error::StartError;

/// Named source text.
///
/// `first_line` is the line number of the text's first line, so that a REPL
/// submission reports the same line numbers the prompt showed.
#[derive(Debug)]
pub struct Snippet {
    name: String,
    text: String,
    first_line: usize,
}

impl Snippet {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Snippet {
            name: name.into(),
            text: text.into(),
            first_line: 1,
        }
    }

    pub fn starting_at_line(mut self, first_line: usize) -> Self {
        self.first_line = first_line.max(1);
        self
    }
}

impl SourceCode for Snippet {
    fn read_span<'a>(
        &'a self,
        span: &SourceSpan,
        context_lines_before: usize,
        context_lines_after: usize,
    ) -> Result<Box<dyn SpanContents<'a> + 'a>, MietteError> {
        let contents = self
            .text
            .read_span(span, context_lines_before, context_lines_after)?;

        Ok(Box::new(MietteSpanContents::new_named(
            self.name.clone(),
            contents.data(),
            *contents.span(),
            contents.line() + self.first_line - 1,
            contents.column(),
            contents.line_count(),
        )))
    }
}

#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct SyntaxDiagnostic {
    exit_code: u8,
    message: String,
    label: Option<(SourceSpan, String)>,
    src: Snippet,
}

impl SyntaxDiagnostic {
    pub fn new(err: &CompilerError, src: Snippet) -> Self {
        SyntaxDiagnostic {
            exit_code: err.code(),
            message: err.to_string(),
            label: err.span().map(|span| (source_span(span), label_for(err))),
            src,
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }

    pub fn render(&self, color: bool) -> String {
        let theme = if color {
            GraphicalTheme::unicode()
        } else {
            GraphicalTheme::unicode_nocolor()
        };
        let handler = GraphicalReportHandler::new_themed(theme).with_links(false);

        let mut out = String::new();
        match handler.render_report(&mut out, self) {
            Ok(()) => out.trim_end().to_owned(),
            Err(_) => format!("error[E{}]: {}", self.exit_code, self.message),
        }
    }

    pub fn into_error(self, color: bool) -> StartError {
        StartError::Syntax {
            code: self.exit_code,
            report: self.render(color),
        }
    }
}

impl Diagnostic for SyntaxDiagnostic {
    fn code<'a>(&'a self) -> Option<Box<dyn Display + 'a>> {
        Some(Box::new(format!("E{}", self.exit_code)))
    }

    fn source_code(&self) -> Option<&dyn SourceCode> {
        Some(&self.src)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let (span, label) = self.label.as_ref()?;
        Some(Box::new(std::iter::once(LabeledSpan::new_with_span(
            Some(label.clone()),
            *span,
        ))))
    }
}

fn source_span(span: Span) -> SourceSpan {
    (span.start.to_usize(), span.len()).into()
}

fn label_for(err: &CompilerError) -> String {
    match err {
        CompilerError::Lex(LexError::UnexpectedChar { .. }) => "not valid here".to_owned(),
        CompilerError::Lex(LexError::UnterminatedLiteral { radix, .. }) => {
            format!("no {radix} digit follows")
        }
        CompilerError::Parse(e) => match e.found() {
            Some(Token::Eof) => "input ends here".to_owned(),
            Some(found) => format!("found '{found}'"),
            None => "nesting limit reached here".to_owned(),
        },
        CompilerError::InputTooLarge { .. } => String::new(),
    }
}
