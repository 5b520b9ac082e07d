//! Frontend module - Lexer, Parser, Syntax checking

pub mod token;
pub mod lexer;
pub mod highlight;
pub mod grammar;
pub mod ast;
pub mod parser;
pub mod checker;
