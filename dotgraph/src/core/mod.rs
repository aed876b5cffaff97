//! A module that contains the data-structures and utilities that are shared
//! by the parser and the graph model.

pub mod attributes;
pub mod error;
pub mod format;
pub mod utils;
