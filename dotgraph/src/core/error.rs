//! The error type shared by the lexer, the parser and the graph model.

use std::fmt;
use thiserror::Error;

/// A position in the DOT source. The offset is in bytes and starts at zero,
/// lines and columns start at one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Location {
    pub offset: usize,
    pub line: usize,
    pub column: usize,
}

impl Location {
    pub fn new(offset: usize, line: usize, column: usize) -> Self {
        Self {
            offset,
            line,
            column,
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "byte {} (line {}, column {})",
            self.offset, self.line, self.column
        )
    }
}

/// Every failure that can happen while reading or editing a graph.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DotError {
    /// Unterminated strings or comments, invalid markup, stray bytes.
    #[error("lexical error at {location}: {message}")]
    Lexical { message: String, location: Location },

    /// A token that can't continue the current statement.
    #[error("syntax error at {location}: unexpected {token}, {message}")]
    Syntax {
        token: String,
        message: String,
        location: Location,
    },

    /// The edge operator does not match the kind of the graph.
    #[error("semantic error at {location}: {message}")]
    Semantic { message: String, location: Location },

    /// Invalid attribute names or values.
    #[error("invalid attribute: {message}")]
    Model {
        message: String,
        location: Option<Location>,
    },
}

impl DotError {
    pub fn lexical(message: &str, location: Location) -> Self {
        DotError::Lexical {
            message: message.to_string(),
            location,
        }
    }

    pub fn syntax(token: &str, message: &str, location: Location) -> Self {
        DotError::Syntax {
            token: token.to_string(),
            message: message.to_string(),
            location,
        }
    }

    pub fn semantic(message: &str, location: Location) -> Self {
        DotError::Semantic {
            message: message.to_string(),
            location,
        }
    }

    pub fn model(message: &str) -> Self {
        DotError::Model {
            message: message.to_string(),
            location: None,
        }
    }

    /// Attaches the source position \p at to a model error that was raised
    /// while reading a document. Other errors are returned unchanged.
    pub fn located(self, at: Location) -> Self {
        match self {
            DotError::Model {
                message,
                location: None,
            } => DotError::Model {
                message,
                location: Some(at),
            },
            other => other,
        }
    }

    /// \returns the source position of the error, if the error came from the
    /// parser.
    pub fn location(&self) -> Option<Location> {
        match self {
            DotError::Lexical { location, .. }
            | DotError::Syntax { location, .. }
            | DotError::Semantic { location, .. } => Some(*location),
            DotError::Model { location, .. } => *location,
        }
    }
}

#[test]
fn test_error_messages() {
    let loc = Location::new(10, 2, 3);
    let err = DotError::syntax("'}'", "expected an identifier", loc);
    assert_eq!(
        err.to_string(),
        "syntax error at byte 10 (line 2, column 3): unexpected '}', expected an identifier"
    );
    assert_eq!(err.location(), Some(loc));
    assert_eq!(DotError::model("empty name").location(), None);
    let err = DotError::model("empty name").located(loc);
    assert_eq!(err.location(), Some(loc));
    assert_eq!(err.to_string(), "invalid attribute: empty name");
}
