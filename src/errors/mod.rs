//! Error types and error handling for the compiler.
//!
//! This module defines the diagnostics produced by every phase:
//!
//! - Error structures with source position information
//! - Front end variants (lexing, parsing)
//! - Semantic variants (inheritance, expansion, inference, type checking)
//! - Non-fatal warnings
//! - Helpful error messages and suggestions

pub mod errors;

#[cfg(test)]
mod tests;
