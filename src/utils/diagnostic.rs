//! Diagnostics reported to the caller

use serde::Serialize;

use crate::utils::Position;

/// A lexical or syntax problem found in the analysed program.
///
/// Lexical and syntax diagnostics are kept in two separate lists and are
/// never merged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// Category of the problem. For syntax errors this is the offending lexeme.
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
    #[serde(rename = "row")]
    pub line: usize,
    pub column: usize,
}

impl Diagnostic {
    pub fn new(kind: impl Into<String>, description: impl Into<String>, pos: Position) -> Self {
        Self {
            kind: kind.into(),
            description: description.into(),
            line: pos.line,
            column: pos.column,
        }
    }

    pub fn position(&self) -> Position {
        Position::new(self.line, self.column)
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}: {}", self.line, self.column, self.description)
    }
}
