//! A module that contains everything that has to do with handling the GraphViz
//! file format (lexing, parsing, and building the graph).

pub mod builder;
pub mod html;
pub mod parser;
pub mod printer;
pub mod scope;

pub use builder::GraphBuilder;
pub use parser::lexer::Lexer;
pub use parser::lexer::Token;
pub use parser::DotParser;
pub use printer::dump_graph;
