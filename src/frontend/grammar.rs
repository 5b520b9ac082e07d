//! Grammar non-terminals and their First sets
//!
//! The table is fixed; the parser only reads it for one-token lookahead.

use crate::frontend::token::TokenKind;
use crate::frontend::token::TokenKind::*;

/// Non-terminals whose First set drives a lookahead decision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Production {
    /// A single statement
    Statement,
    /// Continuation of a statement list
    StatementListTail,
    /// Optional `= expr` after a declared name
    InitializerTail,
    /// Optional `, name` in a declaration
    DeclaratorListTail,
    /// Optional `else { ... }`
    ElseBranch,
    /// Initializer clause of a `for`
    ForInit,
    /// `++` / `--` of a `for` step
    ForStepOperator,
    Arithmetic,
    /// `+` / `-` continuation
    ArithmeticTail,
    /// Relational comparison operator
    Relational,
    /// `*` / `/` continuation
    TermTail,
    Factor,
}

const STATEMENT: &[TokenKind] = &[
    IntType, FloatType, BoolType, StringType, CharType, Identifier, Console, If, For,
];
const INITIALIZER_TAIL: &[TokenKind] = &[Assign];
const DECLARATOR_LIST_TAIL: &[TokenKind] = &[Comma];
const ELSE_BRANCH: &[TokenKind] = &[Else];
const FOR_INIT: &[TokenKind] = &[IntType, FloatType, BoolType, StringType, CharType, Identifier];
const FOR_STEP_OPERATOR: &[TokenKind] = &[Increment, Decrement];
const FACTOR: &[TokenKind] = &[
    LParen, Identifier, IntLit, DecimalLit, StringLit, CharLit, False, True,
];
const ARITHMETIC_TAIL: &[TokenKind] = &[Plus, Minus];
const RELATIONAL: &[TokenKind] = &[EqEq, NotEq, Lt, LtEq, Gt, GtEq];
const TERM_TAIL: &[TokenKind] = &[Star, Slash];

impl Production {
    /// Token kinds that may begin this production
    pub fn first(&self) -> &'static [TokenKind] {
        match self {
            Production::Statement | Production::StatementListTail => STATEMENT,
            Production::InitializerTail => INITIALIZER_TAIL,
            Production::DeclaratorListTail => DECLARATOR_LIST_TAIL,
            Production::ElseBranch => ELSE_BRANCH,
            Production::ForInit => FOR_INIT,
            Production::ForStepOperator => FOR_STEP_OPERATOR,
            Production::Arithmetic | Production::Factor => FACTOR,
            Production::ArithmeticTail => ARITHMETIC_TAIL,
            Production::Relational => RELATIONAL,
            Production::TermTail => TERM_TAIL,
        }
    }

    pub fn starts_with(&self, kind: TokenKind) -> bool {
        self.first().contains(&kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_statement_first_set() {
        assert!(Production::Statement.starts_with(TokenKind::Console));
        assert!(Production::Statement.starts_with(TokenKind::Identifier));
        assert!(!Production::Statement.starts_with(TokenKind::Else));
        assert!(!Production::Statement.starts_with(TokenKind::RBrace));
    }

    #[test]
    fn test_for_init_excludes_print() {
        assert!(Production::ForInit.starts_with(TokenKind::IntType));
        assert!(!Production::ForInit.starts_with(TokenKind::Console));
    }

    #[test]
    fn test_arithmetic_starts_like_factor() {
        assert_eq!(Production::Arithmetic.first(), Production::Factor.first());
        assert!(Production::Arithmetic.starts_with(TokenKind::IntLit));
    }

    #[test]
    fn test_factor_starts() {
        for kind in [TokenKind::LParen, TokenKind::True, TokenKind::CharLit] {
            assert!(Production::Factor.starts_with(kind));
        }
        assert!(!Production::Factor.starts_with(TokenKind::Minus));
    }
}
