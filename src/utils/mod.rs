pub mod cli;
pub mod diagnostics;
pub mod formatting;
pub mod graphviz;
