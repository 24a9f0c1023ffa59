//! Semantic analysis module.
//!
//! Runs the stages below in order over the parsed classes. Each stage relies
//! on the invariant the previous one established:
//!
//! - `builder` - synthesizes the built-in classes, fills the class table and
//!   the inheritance graph
//! - `validator` - sealed parents, undefined parents, inheritance cycles
//! - `expander` - copies inherited attributes and methods into every subclass
//! - `method_table` - (method, class) to return type
//! - `inference` - annotates every expression with a type, producing the typed AST
//! - `checker` - verifies inferred types against declarations
//!
//! `pipeline::analyze` drives the stages and collects diagnostics.

pub mod builder;
pub mod checker;
pub mod class_graph;
pub mod class_table;
pub mod expander;
pub mod inference;
pub mod method_table;
pub mod options;
pub mod pipeline;
pub mod scope;
pub mod typed_ast;
pub mod validator;
