//! Miette-based error diagnostics for CLI error presentation.
//!
//! Configuration errors are shown against the file they came from, with the
//! offending span labeled.

use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

use crate::error::ConfigError;

/// Configuration error with source location context.
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(tipsedge::config))]
pub struct ConfigDiagnostic {
    pub message: String,

    #[source_code]
    pub src: String,

    #[label("here")]
    pub span: SourceSpan,

    #[help]
    pub help: Option<String>,
}

impl ConfigDiagnostic {
    /// Create a diagnostic pointing at `len` bytes from `offset` in `src`.
    #[must_use]
    pub fn new(message: impl Into<String>, src: impl Into<String>, offset: usize, len: usize) -> Self {
        Self {
            message: message.into(),
            src: src.into(),
            span: (offset, len).into(),
            help: None,
        }
    }

    #[must_use]
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    /// Locate `error` in `src`.
    ///
    /// Parse errors carry their own span. Range errors are pinned to the
    /// first `field =` assignment. Returns `None` when nothing in the file
    /// can be pointed at.
    #[must_use]
    pub fn locate(error: &ConfigError, src: &str) -> Option<Self> {
        match error {
            ConfigError::Parse(e) => {
                let span = e.span()?;
                Some(Self::new(
                    e.message().to_string(),
                    src,
                    span.start,
                    span.end.saturating_sub(span.start).max(1),
                ))
            }
            ConfigError::InvalidValue { field, reason } => {
                let offset = find_assignment(src, field)?;
                Some(
                    Self::new(format!("invalid value for {field}"), src, offset, field.len())
                        .with_help(format!("{field} {reason}")),
                )
            }
            ConfigError::ReadFile(_) => None,
        }
    }
}

fn find_assignment(src: &str, field: &str) -> Option<usize> {
    let mut offset = 0;
    for line in src.split_inclusive('\n') {
        let trimmed = line.trim_start();
        if let Some(rest) = trimmed.strip_prefix(field) {
            if rest.trim_start().starts_with('=') {
                return Some(offset + (line.len() - trimmed.len()));
            }
        }
        offset += line.len();
    }
    None
}
