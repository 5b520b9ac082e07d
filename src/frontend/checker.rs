//! Syntax checking
//!
//! Validation-only entry point over the shared descent in
//! [`parser`](crate::frontend::parser): the tree is discarded and only the
//! diagnostics are kept.

use log::debug;

use crate::frontend::parser::{program, ParseState};
use crate::frontend::token::Token;
use crate::utils::Diagnostic;

/// Validate a token sequence against the grammar
pub fn check(tokens: &[Token]) -> Vec<Diagnostic> {
    let mut st = ParseState::new(tokens);
    program(&mut st);
    let diagnostics = st.into_diagnostics();
    debug!("syntax check finished: {} errors", diagnostics.len());
    diagnostics
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontend::lexer::tokenize;
    use crate::frontend::parser::build;

    const PROGRAM: &str = "using System;
public class Program {
    static void Main(string[] args) {
        int edad = 18;
        if (edad >= 18) { Console.WriteLine(\"ok\"); }
    }
}";

    #[test]
    fn test_clean_program() {
        let (tokens, _) = tokenize(PROGRAM);
        assert!(check(&tokens).is_empty());
    }

    #[test]
    fn test_agrees_with_build() {
        let broken = PROGRAM.replace("18;", "18");
        let (tokens, _) = tokenize(&broken);
        let diagnostics = check(&tokens);

        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics, build(&tokens).diagnostics);
    }

    #[test]
    fn test_is_repeatable() {
        let broken = PROGRAM.replace("Console", "Consol");
        let (tokens, _) = tokenize(&broken);
        assert_eq!(check(&tokens), check(&tokens));
    }
}
