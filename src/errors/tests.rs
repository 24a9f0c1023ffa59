//! Unit tests for error handling.
//!
//! This module contains tests for error types and error reporting.

use crate::errors::errors::{Error, ErrorImpl, ErrorTip, Warning, WarningImpl};
use crate::Position;
use std::rc::Rc;

fn position(offset: u32) -> Position {
    Position(offset, Rc::new("test.cl".to_string()))
}

#[test]
fn test_error_creation() {
    let error = Error::new(
        ErrorImpl::UnrecognisedToken {
            token: "#".to_string(),
        },
        position(10),
    );

    assert_eq!(error.get_error_name(), "UnrecognisedToken");
}

#[test]
fn test_error_position() {
    let error = Error::new(
        ErrorImpl::UnexpectedToken {
            token: "class".to_string(),
        },
        position(42),
    );

    assert_eq!(error.get_position().0, 42);
}

#[test]
fn test_duplicate_class_error() {
    let error = Error::new(
        ErrorImpl::DuplicateClass {
            class: "Main".to_string(),
        },
        position(0),
    );

    assert_eq!(error.get_error_name(), "DuplicateClassError");
    assert_eq!(error.to_string(), "class \"Main\" already defined");
}

#[test]
fn test_illegal_inheritance_names_both_classes() {
    let error = Error::new(
        ErrorImpl::IllegalInheritance {
            class: "A".to_string(),
            parent: "Int".to_string(),
        },
        position(0),
    );

    assert_eq!(error.get_error_name(), "IllegalInheritanceError");
    let tip = error.get_tip().to_string();
    assert!(tip.contains("`A`"));
    assert!(tip.contains("`Int`"));
}

#[test]
fn test_type_mismatch_error() {
    let error = Error::new(
        ErrorImpl::TypeMismatch {
            class: "Main".to_string(),
            feature: "main".to_string(),
            expected: "Int".to_string(),
            received: "String".to_string(),
        },
        position(0),
    );

    assert_eq!(error.get_error_name(), "TypeMismatchError");
    assert_eq!(
        error.get_tip().to_string(),
        "Expected type `Int`, received `String` in `Main.main`"
    );
    assert_eq!(
        error.to_string(),
        "types do not match in Main.main: expected \"Int\", received \"String\""
    );
}

#[test]
fn test_unbound_identifier_error() {
    let error = Error::new(
        ErrorImpl::UnboundIdentifier {
            class: "A".to_string(),
            feature: "f".to_string(),
            identifier: "foo".to_string(),
        },
        position(0),
    );

    assert_eq!(error.get_error_name(), "UnboundIdentifierError");
    assert_eq!(error.to_string(), "identifier \"foo\" not declared in A.f");
}

#[test]
fn test_illegal_self_type_error() {
    let error = Error::new(
        ErrorImpl::IllegalSelfType {
            method: "set".to_string(),
            formal: "x".to_string(),
        },
        position(0),
    );

    assert_eq!(error.get_error_name(), "IllegalSelfTypeError");
}

#[test]
fn test_argument_count_error() {
    let error = Error::new(
        ErrorImpl::ArgumentCount {
            method: "substr".to_string(),
            expected: 2,
            received: 1,
        },
        position(0),
    );

    assert_eq!(error.get_error_name(), "ArgumentCountError");
    assert_eq!(
        error.get_tip().to_string(),
        "Method `substr` expects 2 arguments, received 1"
    );
}

#[test]
fn test_error_tip_none() {
    let error = Error::new(
        ErrorImpl::UnrecognisedToken {
            token: "#".to_string(),
        },
        position(0),
    );

    assert!(matches!(error.get_tip(), ErrorTip::None));
}

#[test]
fn test_error_tip_suggestion() {
    let error = Error::new(
        ErrorImpl::UnexpectedToken {
            token: "}".to_string(),
        },
        position(0),
    );

    match error.get_tip() {
        ErrorTip::Suggestion(_) => (),
        _ => panic!("Expected suggestion tip"),
    }
}

#[test]
fn test_error_tip_display() {
    let tip = ErrorTip::Suggestion("Try this instead".to_string());
    assert_eq!(tip.to_string(), "Try this instead");

    let tip = ErrorTip::None;
    assert_eq!(tip.to_string(), "");
}

#[test]
fn test_orphan_warning() {
    let warning = Warning::new(
        WarningImpl::OrphanClass {
            parent: "Zorp".to_string(),
            children: vec!["A".to_string(), "B".to_string()],
        },
        position(3),
    );

    assert_eq!(warning.get_warning_name(), "OrphanClassWarning");
    assert_eq!(warning.get_position().0, 3);
    assert_eq!(
        warning.get_tip().to_string(),
        "Parent `Zorp` of `A`, `B` is undefined, reparented to `Object`"
    );
}
