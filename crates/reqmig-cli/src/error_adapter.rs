//! Error adapter for converting MigrationError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error types
//! and miette's rich diagnostic formatting used in the CLI. A JSON decode
//! error is rendered with a labeled span pointing into the offending
//! document.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, GraphicalReportHandler, LabeledSpan, SourceSpan};
use serde_json::error::Category;

use reqmig::MigrationError;

/// Adapter for a document that could not be decoded.
pub struct JsonErrorAdapter<'a> {
    err: &'a serde_json::Error,
    src: &'a str,
}

impl<'a> JsonErrorAdapter<'a> {
    pub fn new(err: &'a serde_json::Error, src: &'a str) -> Self {
        Self { err, src }
    }

    /// Location of the error inside the source, if it can be resolved.
    fn span(&self) -> Option<SourceSpan> {
        let offset = byte_offset(self.src, self.err.line(), self.err.column())?;
        let len = self.src[offset..]
            .chars()
            .next()
            .map_or(0, char::len_utf8);
        Some(SourceSpan::new(offset.into(), len))
    }
}

impl fmt::Debug for JsonErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JsonErrorAdapter")
            .field("err", &self.err)
            .finish()
    }
}

impl fmt::Display for JsonErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid module document: {}", self.err)
    }
}

impl std::error::Error for JsonErrorAdapter<'_> {}

impl MietteDiagnostic for JsonErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new("reqmig::json"))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match self.err.classify() {
            Category::Syntax => "the document is not well-formed JSON",
            Category::Data => "a field has a type the legacy schema does not allow",
            Category::Eof => "the document ends before the module is complete",
            Category::Io => return None,
        };
        Some(Box::new(help))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        if self.src.is_empty() {
            return None;
        }
        Some(&self.src as &dyn miette::SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        if self.src.is_empty() {
            return None;
        }
        let span = self.span()?;
        Some(Box::new(std::iter::once(LabeledSpan::new_primary_with_span(
            Some("here".to_string()),
            span,
        ))))
    }
}

/// Adapter for non-decode [`MigrationError`] variants.
pub struct ErrorAdapter<'a>(pub &'a MigrationError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            MigrationError::Io(_) => "reqmig::io",
            MigrationError::Json { .. } => "reqmig::json",
            MigrationError::Config(_) => "reqmig::config",
        };
        Some(Box::new(code))
    }
}

/// A reportable error that can be rendered by miette.
#[derive(Debug)]
pub enum Reportable<'a> {
    /// A decode error with source location information.
    Json(JsonErrorAdapter<'a>),
    /// A simple error without source location.
    Error(ErrorAdapter<'a>),
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reportable::Json(j) => fmt::Display::fmt(j, f),
            Reportable::Error(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl std::error::Error for Reportable<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Reportable::Json(_) => None,
            Reportable::Error(e) => e.source(),
        }
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Json(j) => j.code(),
            Reportable::Error(e) => e.code(),
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Json(j) => j.help(),
            Reportable::Error(e) => e.help(),
        }
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        match self {
            Reportable::Json(j) => j.source_code(),
            Reportable::Error(e) => e.source_code(),
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        match self {
            Reportable::Json(j) => j.labels(),
            Reportable::Error(e) => e.labels(),
        }
    }
}

/// Convert a [`MigrationError`] into a reportable error.
pub fn to_reportable(err: &MigrationError) -> Reportable<'_> {
    match err {
        MigrationError::Json { err, src } if !src.is_empty() => {
            Reportable::Json(JsonErrorAdapter::new(err, src))
        }
        _ => Reportable::Error(ErrorAdapter(err)),
    }
}

/// Render a [`MigrationError`] with miette's graphical report handler.
pub fn render(err: &MigrationError) -> String {
    let reporter = GraphicalReportHandler::new();
    let mut writer = String::new();
    reporter
        .render_report(&mut writer, &to_reportable(err))
        .expect("Writing to String buffer is infallible");
    writer
}

/// Byte offset of a 1-based line and column.
///
/// serde_json reports the column of the last character it consumed, so a
/// column of 0 points at the start of the line.
fn byte_offset(src: &str, line: usize, column: usize) -> Option<usize> {
    if line == 0 {
        return None;
    }

    let line_start = if line == 1 {
        0
    } else {
        src.match_indices('\n').nth(line - 2).map(|(at, _)| at + 1)?
    };
    let line_text = src[line_start..].split('\n').next().unwrap_or_default();

    let column_offset = line_text
        .char_indices()
        .nth(column.saturating_sub(1))
        .map_or(line_text.len(), |(at, _)| at);
    Some(line_start + column_offset)
}
