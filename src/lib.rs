//! Scanner and parser for a small structured teaching language.
//!
//! Programs look like
//!
//! ```text
//! inicio
//! decls
//!     x : int
//!     y : float
//! fimdecls
//! codigo
//!     leia x
//!     y = (x + 1) * .5
//!     se y > 2 e x != 0 entao bloco
//!         escreva(y)
//!     fimbloco
//! fimprog
//! ```
//!
//! The whole source is tokenized before parsing starts, so a lexical fault
//! always wins over a syntax fault further down the input.

use std::rc::Rc;

use thiserror::Error;

pub mod parse;
pub mod scan;
pub mod utils;

use parse::{ast::Node, error::ParserError};
use scan::{error::ScannerError, location::Source, scanner::Scanner};
use utils::diagnostics::Diagnostic;

#[derive(Debug, Clone, Error)]
pub enum FrontendError {
    #[error("lexical error: {0}")]
    Scan(#[from] ScannerError),
    #[error("syntax error: {0}")]
    Parse(#[from] ParserError),
}

impl From<&FrontendError> for Diagnostic {
    fn from(value: &FrontendError) -> Self {
        match value {
            FrontendError::Scan(e) => Diagnostic::from(e),
            FrontendError::Parse(e) => Diagnostic::from(e),
        }
    }
}

/// Scans and parses `source`.
pub fn analyze_source(source: Rc<Source>) -> Result<Node, FrontendError> {
    let tokens = Scanner::new(source).tokenize()?;
    Ok(parse::parse(tokens)?)
}

/// Scans and parses an in-memory program.
pub fn analyze(text: &str) -> Result<Node, FrontendError> {
    analyze_source(Rc::new(Source::new("<input>", text)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan::error::ScannerErrorKind;

    #[test]
    fn lexical_fault_wins_over_later_syntax_fault() {
        // The syntax fault (`x y`) comes before the lexical one (`$`).
        let e = analyze("inicio decls fimdecls codigo x y $ fimprog").unwrap_err();
        match e {
            FrontendError::Scan(e) => assert_eq!(e.kind, ScannerErrorKind::InvalidCharacter),
            e => panic!("unexpected error {:?}", e),
        }
    }

    #[test]
    fn syntax_fault() {
        let e = analyze("inicio decls fimdecls codigo x y fimprog").unwrap_err();
        assert!(matches!(e, FrontendError::Parse(_)));
        assert!(e.to_string().starts_with("syntax error: <input>: expected '='"));
    }
}
