//! Recursive-descent parser producing the parse tree.

pub mod ast;
pub mod error;
pub mod parser;

use ast::Node;
use error::ParserError;
use parser::Parser;

use crate::scan::token::TokenWithSpan;

/// Parses a complete token sequence into the tree rooted at `Programa`.
pub fn parse(tokens: Vec<TokenWithSpan>) -> Result<Node, ParserError> {
    Parser::new(tokens).parse_program()
}
