use std::fmt;

use colored::Colorize;
use thiserror::Error;

use crate::{
    scan::token::{TokenKind, TokenWithSpan},
    utils::diagnostics::{Diagnostic, DiagnosticItem},
};

use super::ast::Rule;

/// A syntax fault. Parsing stops at the first one.
#[derive(Debug, Clone, Error)]
pub struct ParserError {
    pub kind: Box<ParserErrorKind>,
    /// The grammar rules in which the error occurred, from the innermost to the outermost.
    pub contexts: Vec<Rule>,
}

impl ParserError {
    pub fn new(kind: ParserErrorKind) -> Self {
        Self {
            kind: Box::new(kind),
            contexts: Vec::new(),
        }
    }

    /// The token at which the input stopped matching the grammar.
    pub fn found(&self) -> &TokenWithSpan {
        self.kind.found()
    }
}

impl fmt::Display for ParserError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let found = self.found();
        write!(
            f,
            "{}: {} near {} (line {}, column {})",
            found.span.start.source,
            self.kind,
            found.inner,
            found.line(),
            found.column()
        )?;
        if !self.contexts.is_empty() {
            write!(f, " in ")?;
            for (i, ctx) in self.contexts.iter().rev().enumerate() {
                if i > 0 {
                    write!(f, " -> ")?;
                }
                write!(f, "{}", ctx)?;
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub enum ParserErrorKind {
    /// The current token is not among the ones the rule accepts here.
    UnexpectedToken {
        expecting: Vec<TokenKind>,
        found: TokenWithSpan,
    },
    /// Something other than `name : type` inside the declarations block.
    InvalidDeclaration(TokenWithSpan),
    /// A command starts with an identifier that is not followed by `=`.
    AssignmentExpected {
        found: TokenWithSpan,
        next: TokenKind,
    },
    InvalidCommand(TokenWithSpan),
    UnexpectedFactor(TokenWithSpan),
}

impl ParserErrorKind {
    pub fn found(&self) -> &TokenWithSpan {
        match self {
            ParserErrorKind::UnexpectedToken { found, .. }
            | ParserErrorKind::InvalidDeclaration(found)
            | ParserErrorKind::AssignmentExpected { found, .. }
            | ParserErrorKind::InvalidCommand(found)
            | ParserErrorKind::UnexpectedFactor(found) => found,
        }
    }
}

impl fmt::Display for ParserErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParserErrorKind::UnexpectedToken { expecting, found } => {
                if expecting.len() == 1 {
                    write!(f, "expected {}, found {}", expecting[0], found.inner.kind)
                } else {
                    let expecting = expecting
                        .iter()
                        .map(ToString::to_string)
                        .collect::<Vec<_>>()
                        .join(", ");
                    write!(f, "expected one of [{}], found {}", expecting, found.inner.kind)
                }
            }
            ParserErrorKind::InvalidDeclaration(_) => write!(
                f,
                "expected a variable declaration 'name:TYPE' or FIMDECLS to end DECLS"
            ),
            ParserErrorKind::AssignmentExpected { next, .. } => write!(
                f,
                "expected '=' (ASSIGN) after identifier at the start of a command, found {}",
                next
            ),
            ParserErrorKind::InvalidCommand(_) => write!(f, "invalid command"),
            ParserErrorKind::UnexpectedFactor(_) => write!(f, "unexpected factor in expression"),
        }
    }
}

impl From<&ParserError> for Diagnostic {
    fn from(value: &ParserError) -> Self {
        let pre_text = format!("{}: {}", "error(parser)".red().bold(), value.kind);
        let found = value.found();
        let mut diag = Diagnostic::new()
            .with_pre_text(&pre_text)
            .add_item(DiagnosticItem {
                span: found.span.clone(),
                message: format!("found {}", found.inner),
                color: Some(colored::Color::Red),
            });
        if let Some(rule) = value.contexts.first() {
            diag = diag.with_post_text(&format!("while parsing {}", rule));
        }
        diag
    }
}
