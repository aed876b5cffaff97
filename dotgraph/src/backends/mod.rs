//! Writers that turn graphs into text.

pub mod dot;
