//! Unit tests for the parser module.
//!
//! This module contains tests for parsing:
//! - Class declarations and inheritance
//! - Attributes, methods and formals
//! - Expression precedence and every expression form

use std::rc::Rc;

use super::parser::parse;
use crate::ast::ast::{ClassDef, Feature};
use crate::ast::expressions::{BinaryOperator, ExprKind, UnaryOperator};
use crate::errors::errors::{Error, ErrorImpl};
use crate::lexer::lexer::tokenize;

const MAX_DEPTH: usize = 256;

fn parse_source(source: &str) -> Result<Vec<ClassDef>, Error> {
    let tokens = tokenize(source.to_string(), Some("test.cl".to_string()))?;
    parse(tokens, Rc::new("test.cl".to_string()), MAX_DEPTH)
}

/// Parses `class A { f(): Object { <expr> }; };` and returns the method body.
fn parse_body(expr: &str) -> ExprKind {
    let source = format!("class A {{ f(): Object {{ {} }}; }};", expr);
    let classes = parse_source(&source).unwrap();
    match &classes[0].features[0] {
        Feature::Method(method) => method.body.clone().unwrap().kind,
        Feature::Attribute(_) => panic!("Expected method"),
    }
}

#[test]
fn test_parse_empty_class() {
    let classes = parse_source("class Main {};").unwrap();
    assert_eq!(classes.len(), 1);
    assert_eq!(classes[0].name, "Main");
    assert_eq!(classes[0].parent, None);
    assert!(classes[0].features.is_empty());
}

#[test]
fn test_parse_inheritance() {
    let classes = parse_source("class A {}; class B inherits A {};").unwrap();
    assert_eq!(classes.len(), 2);
    assert_eq!(classes[1].parent.as_deref(), Some("A"));
}

#[test]
fn test_parse_attributes() {
    let classes = parse_source("class A { x: Int; y: String <- \"hi\"; };").unwrap();
    let x = classes[0].find_attribute("x").unwrap();
    assert_eq!(x.declared_type, "Int");
    assert!(x.initializer.is_none());

    let y = classes[0].find_attribute("y").unwrap();
    assert!(matches!(
        y.initializer.as_ref().map(|expr| &expr.kind),
        Some(ExprKind::String(value)) if value == "hi"
    ));
}

#[test]
fn test_parse_method_with_formals() {
    let classes = parse_source("class A { add(a: Int, b: Int): Int { a + b }; };").unwrap();
    let method = classes[0].find_method("add").unwrap();
    assert_eq!(method.return_type, "Int");
    assert_eq!(method.formals.len(), 2);
    assert_eq!(method.formals[1].name, "b");
    assert_eq!(method.formals[1].declared_type, "Int");
}

#[test]
fn test_parse_precedence() {
    // 1 + 2 * 3 < 10  =>  (1 + (2 * 3)) < 10
    match parse_body("1 + 2 * 3 < 10") {
        ExprKind::Binary {
            operator: BinaryOperator::LessThan,
            left,
            ..
        } => match left.kind {
            ExprKind::Binary {
                operator: BinaryOperator::Plus,
                right,
                ..
            } => assert!(matches!(
                right.kind,
                ExprKind::Binary {
                    operator: BinaryOperator::Multiply,
                    ..
                }
            )),
            other => panic!("Expected addition, found {:?}", other),
        },
        other => panic!("Expected comparison, found {:?}", other),
    }
}

#[test]
fn test_parse_left_associative_subtraction() {
    // 5 - 2 - 1  =>  (5 - 2) - 1
    match parse_body("5 - 2 - 1") {
        ExprKind::Binary { left, right, .. } => {
            assert!(matches!(left.kind, ExprKind::Binary { .. }));
            assert!(matches!(right.kind, ExprKind::Int(1)));
        }
        other => panic!("Expected subtraction, found {:?}", other),
    }
}

#[test]
fn test_parse_comparison_does_not_associate() {
    let error = parse_source("class A { f(): Bool { 1 < 2 < 3 }; };").unwrap_err();
    assert_eq!(error.get_error_name(), "UnexpectedTokenDetailed");
}

#[test]
fn test_parse_not_binds_looser_than_comparison() {
    match parse_body("not 1 < 2") {
        ExprKind::Unary {
            operator: UnaryOperator::Not,
            operand,
        } => assert!(matches!(operand.kind, ExprKind::Binary { .. })),
        other => panic!("Expected not, found {:?}", other),
    }
}

#[test]
fn test_parse_assignment_is_right_associative() {
    match parse_body("a <- b <- 3") {
        ExprKind::Assign { name, value } => {
            assert_eq!(name, "a");
            assert!(matches!(value.kind, ExprKind::Assign { .. }));
        }
        other => panic!("Expected assignment, found {:?}", other),
    }
}

#[test]
fn test_parse_dispatch() {
    match parse_body("x.foo(1, 2).bar()") {
        ExprKind::MethodCall {
            receiver,
            method,
            arguments,
            static_type,
        } => {
            assert_eq!(method, "bar");
            assert!(arguments.is_empty());
            assert!(static_type.is_none());
            assert!(matches!(
                receiver.kind,
                ExprKind::MethodCall { ref arguments, .. } if arguments.len() == 2
            ));
        }
        other => panic!("Expected dispatch, found {:?}", other),
    }
}

#[test]
fn test_parse_static_dispatch() {
    match parse_body("self@Object.copy()") {
        ExprKind::MethodCall {
            receiver,
            static_type,
            method,
            ..
        } => {
            assert!(matches!(receiver.kind, ExprKind::SelfRef));
            assert_eq!(static_type.as_deref(), Some("Object"));
            assert_eq!(method, "copy");
        }
        other => panic!("Expected static dispatch, found {:?}", other),
    }
}

#[test]
fn test_parse_function_call() {
    match parse_body("out_string(\"hello\")") {
        ExprKind::FunctionCall { method, arguments } => {
            assert_eq!(method, "out_string");
            assert_eq!(arguments.len(), 1);
        }
        other => panic!("Expected call, found {:?}", other),
    }
}

#[test]
fn test_parse_control_flow() {
    assert!(matches!(
        parse_body("if true then 1 else 2 fi"),
        ExprKind::If { .. }
    ));
    assert!(matches!(
        parse_body("while false loop 0 pool"),
        ExprKind::While { .. }
    ));
    match parse_body("{ 1; \"two\"; true; }") {
        ExprKind::Block(elements) => assert_eq!(elements.len(), 3),
        other => panic!("Expected block, found {:?}", other),
    }
}

#[test]
fn test_parse_let() {
    match parse_body("let x: Int <- 1, y: Int in x + y") {
        ExprKind::Let { bindings, body } => {
            assert_eq!(bindings.len(), 2);
            assert!(bindings[0].initializer.is_some());
            assert!(bindings[1].initializer.is_none());
            assert!(matches!(body.kind, ExprKind::Binary { .. }));
        }
        other => panic!("Expected let, found {:?}", other),
    }
}

#[test]
fn test_parse_case() {
    match parse_body("case x of i: Int => i; s: String => 0; esac") {
        ExprKind::Case { arms, .. } => {
            assert_eq!(arms.len(), 2);
            assert_eq!(arms[1].declared_type, "String");
        }
        other => panic!("Expected case, found {:?}", other),
    }
}

#[test]
fn test_parse_new_and_prefix() {
    assert!(matches!(parse_body("new Foo"), ExprKind::New(name) if name == "Foo"));
    assert!(matches!(
        parse_body("isvoid x"),
        ExprKind::Unary {
            operator: UnaryOperator::IsVoid,
            ..
        }
    ));
    assert!(matches!(
        parse_body("~1"),
        ExprKind::Unary {
            operator: UnaryOperator::Complement,
            ..
        }
    ));
}

#[test]
fn test_parse_missing_semicolon() {
    let error = parse_source("class A {}").unwrap_err();
    assert!(matches!(error.get_kind(), ErrorImpl::UnexpectedToken { .. }));
}

#[test]
fn test_parse_integer_overflow() {
    let error = parse_source("class A { f(): Int { 99999999999999999999 }; };").unwrap_err();
    assert_eq!(error.get_error_name(), "NumberParseError");
}

#[test]
fn test_class_span_covers_declaration() {
    let classes = parse_source("  class A {};").unwrap();
    assert_eq!(classes[0].span.start.0, 2);
    assert_eq!(classes[0].span.end.0, 13);
}

#[test]
fn test_deep_nesting_hits_recursion_limit() {
    let depth = 10_000;
    let source = format!(
        "class Main {{ main(): Int {{ {}1{} }}; }};",
        "(".repeat(depth),
        ")".repeat(depth)
    );

    let error = parse_source(&source).unwrap_err();
    assert_eq!(
        error.get_kind(),
        &ErrorImpl::RecursionLimit { limit: MAX_DEPTH }
    );
}

#[test]
fn test_nesting_within_limit_parses() {
    let source = format!("{}1{}", "(".repeat(100), ")".repeat(100));
    assert!(matches!(parse_body(&source), ExprKind::Int(1)));
}

#[test]
fn test_recursion_limit_counts_nesting_not_length() {
    let sum = vec!["1"; 500].join(" + ");
    assert!(matches!(parse_body(&sum), ExprKind::Binary { .. }));
}
