use std::fmt::Display;

use thiserror::Error;

use crate::Position;

#[derive(Error, Debug, Clone)]
#[error("{internal_error}")]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn get_kind(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => "UnrecognisedToken",
            ErrorImpl::UnterminatedComment => "UnterminatedComment",
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::UnexpectedTokenDetailed { .. } => "UnexpectedTokenDetailed",
            ErrorImpl::NumberParseError { .. } => "NumberParseError",
            ErrorImpl::DuplicateClass { .. } => "DuplicateClassError",
            ErrorImpl::IllegalInheritance { .. } => "IllegalInheritanceError",
            ErrorImpl::CyclicInheritance { .. } => "CyclicInheritanceError",
            ErrorImpl::UnregisteredClass { .. } => "UnregisteredClassError",
            ErrorImpl::AttributeRedefinition { .. } => "AttributeRedefinitionError",
            ErrorImpl::MethodSignatureMismatch { .. } => "MethodSignatureMismatchError",
            ErrorImpl::DuplicateMethod { .. } => "DuplicateMethodError",
            ErrorImpl::DuplicateFormal { .. } => "DuplicateFormalError",
            ErrorImpl::DuplicateAttribute { .. } => "DuplicateAttributeError",
            ErrorImpl::UnboundIdentifier { .. } => "UnboundIdentifierError",
            ErrorImpl::UndefinedMethod { .. } => "UndefinedMethodError",
            ErrorImpl::UndeclaredType { .. } => "UndeclaredTypeError",
            ErrorImpl::IllegalSelfType { .. } => "IllegalSelfTypeError",
            ErrorImpl::TypeMismatch { .. } => "TypeMismatchError",
            ErrorImpl::NonBooleanCondition { .. } => "NonBooleanConditionError",
            ErrorImpl::ArgumentCount { .. } => "ArgumentCountError",
            ErrorImpl::RecursionLimit { .. } => "RecursionLimitError",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => ErrorTip::None,
            ErrorImpl::UnterminatedComment => {
                ErrorTip::Suggestion(String::from("Block comment is missing a closing `*)`"))
            }
            ErrorImpl::UnexpectedToken { token } => ErrorTip::Suggestion(format!(
                "Unexpected token: `{}`, did you miss a semicolon?",
                token
            )),
            ErrorImpl::UnexpectedTokenDetailed { token, message } => {
                ErrorTip::Suggestion(format!("Unexpected token: `{}`, {}", token, message))
            }
            ErrorImpl::NumberParseError { token } => ErrorTip::Suggestion(format!(
                "Invalid number: `{}`, is it above the integer limit?",
                token
            )),
            ErrorImpl::DuplicateClass { class } => {
                ErrorTip::Suggestion(format!("Class `{}` is already defined", class))
            }
            ErrorImpl::IllegalInheritance { class, parent } => ErrorTip::Suggestion(format!(
                "Class `{}` cannot inherit from sealed class `{}`",
                class, parent
            )),
            ErrorImpl::CyclicInheritance { class } => ErrorTip::Suggestion(format!(
                "Class `{}` is part of an inheritance cycle",
                class
            )),
            ErrorImpl::UnregisteredClass { class } => ErrorTip::Suggestion(format!(
                "Class `{}` has no entry in the inheritance graph",
                class
            )),
            ErrorImpl::AttributeRedefinition { class, attribute } => {
                ErrorTip::Suggestion(format!(
                    "Attribute `{}` of class `{}` is already inherited",
                    attribute, class
                ))
            }
            ErrorImpl::MethodSignatureMismatch { class, method } => {
                ErrorTip::Suggestion(format!(
                    "Method `{}` in class `{}` must keep the inherited signature",
                    method, class
                ))
            }
            ErrorImpl::DuplicateMethod { class, method } => ErrorTip::Suggestion(format!(
                "Method `{}` is declared more than once in class `{}`",
                method, class
            )),
            ErrorImpl::DuplicateFormal { method, formal } => ErrorTip::Suggestion(format!(
                "Formal `{}` is declared more than once in method `{}`",
                formal, method
            )),
            ErrorImpl::DuplicateAttribute { class, attribute } => {
                ErrorTip::Suggestion(format!(
                    "Attribute `{}` is declared more than once in class `{}`",
                    attribute, class
                ))
            }
            ErrorImpl::UnboundIdentifier {
                class,
                feature,
                identifier,
            } => ErrorTip::Suggestion(format!(
                "Identifier `{}` is not declared in `{}.{}`",
                identifier, class, feature
            )),
            ErrorImpl::UndefinedMethod { class, method } => ErrorTip::Suggestion(format!(
                "Class `{}` has no method `{}`",
                class, method
            )),
            ErrorImpl::UndeclaredType {
                class,
                feature,
                type_,
            } => ErrorTip::Suggestion(format!(
                "Unknown type `{}` found in `{}.{}`",
                type_, class, feature
            )),
            ErrorImpl::IllegalSelfType { method, formal } => ErrorTip::Suggestion(format!(
                "Formal `{}` of method `{}` cannot be declared SELF_TYPE",
                formal, method
            )),
            ErrorImpl::TypeMismatch {
                class,
                feature,
                expected,
                received,
            } => ErrorTip::Suggestion(format!(
                "Expected type `{}`, received `{}` in `{}.{}`",
                expected, received, class, feature
            )),
            ErrorImpl::NonBooleanCondition {
                class,
                feature,
                received,
            } => ErrorTip::Suggestion(format!(
                "Condition must be `Bool`, received `{}` in `{}.{}`",
                received, class, feature
            )),
            ErrorImpl::ArgumentCount {
                method,
                expected,
                received,
            } => ErrorTip::Suggestion(format!(
                "Method `{}` expects {} arguments, received {}",
                method, expected, received
            )),
            ErrorImpl::RecursionLimit { limit } => ErrorTip::Suggestion(format!(
                "Expression nesting exceeds the limit of {}",
                limit
            )),
        }
    }
}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ErrorImpl {
    #[error("unrecognised token: {token:?}")]
    UnrecognisedToken { token: String },
    #[error("unterminated block comment")]
    UnterminatedComment,
    #[error("unexpected token: {token:?}")]
    UnexpectedToken { token: String },
    #[error("unexpected token ({message:?}): {token:?}")]
    UnexpectedTokenDetailed { token: String, message: String },
    #[error("error parsing number: {token:?}")]
    NumberParseError { token: String },
    #[error("class {class:?} already defined")]
    DuplicateClass { class: String },
    #[error("class {class:?} cannot inherit from {parent:?}")]
    IllegalInheritance { class: String, parent: String },
    #[error("class {class:?} is part of an inheritance cycle")]
    CyclicInheritance { class: String },
    #[error("class {class:?} is not registered in the inheritance graph")]
    UnregisteredClass { class: String },
    #[error("attribute {attribute:?} of class {class:?} redefines an inherited attribute")]
    AttributeRedefinition { class: String, attribute: String },
    #[error("method {method:?} of class {class:?} changes the inherited signature")]
    MethodSignatureMismatch { class: String, method: String },
    #[error("method {method:?} already defined in class {class:?}")]
    DuplicateMethod { class: String, method: String },
    #[error("formal {formal:?} already declared in method {method:?}")]
    DuplicateFormal { method: String, formal: String },
    #[error("attribute {attribute:?} already declared in class {class:?}")]
    DuplicateAttribute { class: String, attribute: String },
    #[error("identifier {identifier:?} not declared in {class}.{feature}")]
    UnboundIdentifier {
        class: String,
        feature: String,
        identifier: String,
    },
    #[error("class {class:?} has no method {method:?}")]
    UndefinedMethod { class: String, method: String },
    #[error("unknown type {type_} found in {class}.{feature}")]
    UndeclaredType {
        class: String,
        feature: String,
        type_: String,
    },
    #[error("formal {formal:?} of method {method:?} declared as SELF_TYPE")]
    IllegalSelfType { method: String, formal: String },
    #[error("types do not match in {class}.{feature}: expected {expected:?}, received {received:?}")]
    TypeMismatch {
        class: String,
        feature: String,
        expected: String,
        received: String,
    },
    #[error("condition must be Bool in {class}.{feature}, received {received:?}")]
    NonBooleanCondition {
        class: String,
        feature: String,
        received: String,
    },
    #[error("method {method:?} expects {expected} arguments, received {received}")]
    ArgumentCount {
        method: String,
        expected: usize,
        received: usize,
    },
    #[error("expression nesting exceeds {limit}")]
    RecursionLimit { limit: usize },
}

/// A non-fatal diagnostic. Analysis continues after reporting one.
#[derive(Error, Debug, Clone)]
#[error("{internal_warning}")]
pub struct Warning {
    internal_warning: WarningImpl,
    position: Position,
}

impl Warning {
    pub fn new(warning_impl: WarningImpl, position: Position) -> Self {
        Warning {
            internal_warning: warning_impl,
            position,
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn get_kind(&self) -> &WarningImpl {
        &self.internal_warning
    }

    pub fn get_warning_name(&self) -> &str {
        match &self.internal_warning {
            WarningImpl::OrphanClass { .. } => "OrphanClassWarning",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_warning {
            WarningImpl::OrphanClass { parent, children } => ErrorTip::Suggestion(format!(
                "Parent `{}` of {} is undefined, reparented to `Object`",
                parent,
                children
                    .iter()
                    .map(|child| format!("`{}`", child))
                    .collect::<Vec<String>>()
                    .join(", ")
            )),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WarningImpl {
    #[error("undefined parent class {parent:?}, children reparented to Object")]
    OrphanClass {
        parent: String,
        children: Vec<String>,
    },
}
