//! Parser module for building the class tree handed to semantic analysis.
//!
//! This module contains the parser that transforms a stream of tokens
//! into `ClassDef`s. It uses a Pratt parser for expressions with Cool's
//! operator precedence and handles:
//!
//! - Class declarations with optional `inherits`
//! - Attribute and method features, formals
//! - Expressions (dispatch, control flow, let, case, operators, literals)
//! - Error reporting with source positions
//!
//! The parser uses NUD (null denotation) and LED (left denotation) functions
//! for expression parsing with binding power for precedence handling.

pub mod class;
pub mod expr;
pub mod lookups;
pub mod parser;

#[cfg(test)]
mod tests;
