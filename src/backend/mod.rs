//! Backend module - TypeScript generation

pub mod codegen;

pub use codegen::CodeGen;
