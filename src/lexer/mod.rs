//! Lexical analysis module for the compiler.
//!
//! This module contains the lexer (tokenizer) that converts Cool source code
//! into a stream of tokens for parsing. It handles:
//!
//! - Tokenization of source code using regex patterns
//! - Case-insensitive keywords, type and object identifiers, literals and operators
//! - Token position tracking for error reporting
//! - Line comments (`--`), nested block comments (`(* *)`) and whitespace

pub mod lexer;
pub mod tokens;

#[cfg(test)]
mod tests;
