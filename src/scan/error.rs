use std::fmt;

use colored::Colorize;
use thiserror::Error;

use crate::utils::diagnostics::{Diagnostic, DiagnosticItem};

use super::location::{Location, Span};

/// A lexical fault. Scanning stops at the first one.
#[derive(Debug, Clone, Error)]
pub struct ScannerError {
    pub kind: ScannerErrorKind,
    pub location: Location,
    pub found: Option<char>,
    /// Where the input ran out, for faults that reach the end of the source.
    pub end_of_input: Option<Location>,
}

impl ScannerError {
    pub(super) fn new(kind: ScannerErrorKind, location: Location, found: Option<char>) -> Self {
        Self {
            kind,
            location,
            found,
            end_of_input: None,
        }
    }

    pub(super) fn with_end_of_input(mut self, location: Location) -> Self {
        self.end_of_input = Some(location);
        self
    }

    pub fn line(&self) -> usize {
        self.location.line
    }

    pub fn column(&self) -> usize {
        self.location.column
    }
}

impl fmt::Display for ScannerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} at line {}, column {}",
            self.location.source, self.kind, self.location.line, self.location.column
        )?;
        if let Some(c) = self.found {
            write!(f, " (char: {:?})", c)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScannerErrorKind {
    InvalidCharacter,
    /// `!` is only valid as the first half of `!=`.
    BareExclamation,
    UnterminatedBlockComment,
    MissingFractionDigits,
    MultipleDecimalPoints,
    /// A `.` follows a complete number, possibly after whitespace.
    DecimalPointAfterNumber,
}

impl fmt::Display for ScannerErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScannerErrorKind::InvalidCharacter => write!(f, "invalid character"),
            ScannerErrorKind::BareExclamation => write!(f, "unexpected '!' (expected '!=')"),
            ScannerErrorKind::UnterminatedBlockComment => {
                write!(f, "unterminated block comment")
            }
            ScannerErrorKind::MissingFractionDigits => {
                write!(f, "invalid numeric constant: decimal point must be followed by a digit")
            }
            ScannerErrorKind::MultipleDecimalPoints => {
                write!(f, "invalid numeric constant: multiple decimal points")
            }
            ScannerErrorKind::DecimalPointAfterNumber => {
                write!(f, "invalid numeric constant: unexpected decimal point after number")
            }
        }
    }
}

impl From<&ScannerError> for Diagnostic {
    fn from(value: &ScannerError) -> Self {
        let pre_text = format!("{}: {}", "error(scanner)".red().bold(), value.kind);
        let message = match (value.found, value.kind) {
            (Some(c), _) => format!("found {:?}", c),
            (None, ScannerErrorKind::UnterminatedBlockComment) => "comment opens here".to_string(),
            (None, _) => "starts here".to_string(),
        };
        let mut diag = Diagnostic::new()
            .with_pre_text(&pre_text)
            .add_item(DiagnosticItem {
                span: Span::new(value.location.clone(), value.location.clone()),
                message,
                color: Some(colored::Color::Red),
            });
        if let Some(end) = &value.end_of_input {
            diag = diag.add_item(DiagnosticItem {
                span: Span::new(end.clone(), end.clone()),
                message: "still open at end of input".to_string(),
                color: Some(colored::Color::Yellow),
            });
        }
        diag
    }
}
