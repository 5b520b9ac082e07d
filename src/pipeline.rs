//! Analysis pipeline
//!
//! Lexer, syntax checker and TypeScript generation over one source text.
//! Every call builds fresh stage instances, so calls are independent.

use log::{debug, info, warn};

use crate::backend::CodeGen;
use crate::feedback::{lexical_diagnostic, AnalysisReport};
use crate::frontend::checker::check;
use crate::frontend::lexer::Lexer;
use crate::frontend::parser::build;
use crate::utils::{Error, Result};

/// Widest indentation accepted for generated code
pub const MAX_INDENT_WIDTH: usize = 8;

/// Knobs for one analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    /// Spaces per block depth in the translation
    pub indent_width: usize,
    /// Produce `highlightMarkup`
    pub highlight: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            indent_width: 0,
            highlight: true,
        }
    }
}

impl Options {
    pub fn validate(&self) -> Result<()> {
        if self.indent_width > MAX_INDENT_WIDTH {
            return Err(Error::InvalidOption(format!(
                "indent width {} exceeds {}",
                self.indent_width, MAX_INDENT_WIDTH
            )));
        }
        Ok(())
    }
}

/// Run the whole pipeline. Never fails: problems end up in the report.
///
/// An `indent_width` above [`MAX_INDENT_WIDTH`] is clamped; callers wanting
/// an error instead use [`Options::validate`] first.
pub fn analyze(source: &str, options: &Options) -> AnalysisReport {
    if options.indent_width > MAX_INDENT_WIDTH {
        warn!(
            "indent width {} clamped to {}",
            options.indent_width, MAX_INDENT_WIDTH
        );
    }
    let indent_width = options.indent_width.min(MAX_INDENT_WIDTH);

    let lexed = Lexer::new(source).with_highlight(options.highlight).tokenize();
    let errors = lexed.errors.iter().map(lexical_diagnostic).collect::<Vec<_>>();

    let syntactic_errors = check(&lexed.tokens);

    // Generation only runs on a clean syntax check
    let translation = if syntactic_errors.is_empty() {
        let tree = build(&lexed.tokens);
        CodeGen::new()
            .with_indent(indent_width)
            .generate(&tree.statements)
    } else {
        debug!("skipping generation: {} syntax errors", syntactic_errors.len());
        String::new()
    };

    info!(
        "analyzed {} tokens: {} lexical errors, {} syntax errors",
        lexed.tokens.len(),
        errors.len(),
        syntactic_errors.len()
    );

    AnalysisReport {
        tokens: lexed.tokens,
        errors,
        syntactic_errors,
        translation,
        highlight_markup: lexed.markup,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = Options::default();
        assert_eq!(options.indent_width, 0);
        assert!(options.highlight);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_indent_out_of_range() {
        let options = Options {
            indent_width: 9,
            ..Default::default()
        };
        assert!(matches!(options.validate(), Err(Error::InvalidOption(_))));
    }

    #[test]
    fn test_oversized_indent_is_clamped() {
        let options = Options {
            indent_width: usize::MAX,
            highlight: false,
        };
        let source = "using System;\npublic class P {\nstatic void Main(string[] args) {\n\
                      if (x > 1) { x = 1; }\n}\n}";
        let report = analyze(source, &options);

        assert!(report.syntactic_errors.is_empty());
        assert_eq!(report.translation, "if (x > 1) {\n        x = 1;\n}\n");
    }

    #[test]
    fn test_no_highlight() {
        let options = Options {
            highlight: false,
            ..Default::default()
        };
        let report = analyze("int x;", &options);
        assert!(report.highlight_markup.is_empty());
        assert_eq!(report.tokens.len(), 3);
    }

    #[test]
    fn test_syntax_errors_suppress_translation() {
        let report = analyze("int x;", &Options::default());
        assert!(!report.syntactic_errors.is_empty());
        assert!(report.translation.is_empty());
    }
}
