//! Structured Feedback Module
//!
//! The analysis report handed back to callers:
//! - the token table
//! - lexical and syntax diagnostics, kept apart
//! - generated TypeScript and highlight markup

use serde::Serialize;

use crate::frontend::token::Token;
use crate::utils::{Diagnostic, Result};

/// `type` of every lexical diagnostic
pub const UNRECOGNIZED: &str = "UNKNOWN";

/// Complete result of analysing one program
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub tokens: Vec<Token>,

    /// Lexical diagnostics
    pub errors: Vec<Diagnostic>,

    pub syntactic_errors: Vec<Diagnostic>,

    /// Empty whenever `syntactic_errors` is not
    pub translation: String,

    pub highlight_markup: String,
}

impl AnalysisReport {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty() || !self.syntactic_errors.is_empty()
    }

    /// Both diagnostic lists, lexical first
    pub fn diagnostics(&self) -> impl Iterator<Item = &Diagnostic> {
        self.errors.iter().chain(self.syntactic_errors.iter())
    }

    pub fn to_json(&self, pretty: bool) -> Result<String> {
        let json = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(json)
    }
}

/// Diagnostic for a token the lexer could not recognize
pub fn lexical_diagnostic(token: &Token) -> Diagnostic {
    Diagnostic::new(
        UNRECOGNIZED,
        format!("Unrecognized token: {}", token.lexeme),
        token.position(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontend::token::TokenKind;
    use crate::utils::Position;

    #[test]
    fn test_field_names_in_order() {
        let report = AnalysisReport {
            translation: "x = 1;\n".to_string(),
            ..Default::default()
        };
        let json = report.to_json(false).unwrap();
        assert_eq!(
            json,
            r#"{"tokens":[],"errors":[],"syntacticErrors":[],"translation":"x = 1;\n","highlightMarkup":""}"#
        );
    }

    #[test]
    fn test_lexical_diagnostic() {
        let token = Token::new(TokenKind::Unknown, "#", Position::new(2, 5));
        let diag = lexical_diagnostic(&token);
        assert_eq!(diag.kind, "UNKNOWN");
        assert_eq!(diag.description, "Unrecognized token: #");
        assert_eq!(diag.position(), Position::new(2, 5));
    }

    #[test]
    fn test_token_and_diagnostic_shape() {
        let token = Token::new(TokenKind::IntType, "int", Position::new(1, 1));
        let report = AnalysisReport {
            tokens: vec![token.clone()],
            errors: vec![lexical_diagnostic(&token)],
            ..Default::default()
        };
        let json = report.to_json(true).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["tokens"][0]["type"], "R_INT");
        assert_eq!(value["tokens"][0]["lexeme"], "int");
        assert_eq!(value["tokens"][0]["row"], 1);
        assert_eq!(value["errors"][0]["column"], 1);
        assert!(report.has_errors());
    }
}
