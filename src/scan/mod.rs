//! Lexical scanner for the language.

use std::rc::Rc;

pub mod error;
pub mod location;
pub mod scanner;
pub mod token;

use error::ScannerError;
use location::Source;
use scanner::Scanner;
use token::TokenWithSpan;

/// Tokenizes an in-memory program that has no backing file.
pub fn tokenize(text: &str) -> Result<Vec<TokenWithSpan>, ScannerError> {
    Scanner::new(Rc::new(Source::new("<input>", text))).tokenize()
}
