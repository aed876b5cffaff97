//! GraphViz file format parser.

pub mod lexer;
#[allow(clippy::module_inception)]
pub mod parser;

pub use lexer::Lexer;
pub use lexer::Token;
pub use parser::DotParser;
