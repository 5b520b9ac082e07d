//! sharpts
//!
//! Translates a small C# subset (one class, one `Main`) to TypeScript and
//! reports tokens, lexical and syntax diagnostics along the way.

pub mod backend;
pub mod feedback;
pub mod frontend;
pub mod pipeline;
pub mod utils;

pub use feedback::AnalysisReport;
pub use pipeline::{analyze, Options};
pub use utils::{Diagnostic, Error, Position, Result};
