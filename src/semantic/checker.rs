use tracing::debug;

use crate::{
    ast::types::{resolve_self_type, BOOL, SELF_TYPE},
    errors::errors::{Error, ErrorImpl},
    Position,
};

use super::{
    class_graph::ClassGraph,
    class_table::ClassTable,
    options::SemanticOptions,
    typed_ast::{
        TypedAttribute, TypedClass, TypedExpr, TypedExprKind, TypedFeature, TypedMethod,
        TypedProgram,
    },
};

/// Read-only view of the analysed program used while checking one class.
#[derive(Debug, Clone, Copy)]
pub struct TypeChecker<'a> {
    pub classes: &'a ClassTable,
    pub graph: &'a ClassGraph,
    pub class_name: &'a str,
    /// Declaring class and name of the feature being checked.
    pub defined_in: &'a str,
    pub feature_name: &'a str,
}

impl<'a> TypeChecker<'a> {
    pub fn new(classes: &'a ClassTable, graph: &'a ClassGraph, class_name: &'a str) -> Self {
        TypeChecker {
            classes,
            graph,
            class_name,
            defined_in: class_name,
            feature_name: "",
        }
    }

    /// The same checker, attributing errors to `feature`.
    pub fn for_feature(&self, feature: &'a TypedFeature) -> Self {
        TypeChecker {
            defined_in: feature.defined_in(),
            feature_name: feature.name(),
            ..*self
        }
    }

    fn mismatch(&self, expected: &str, received: &str, position: &Position) -> Error {
        Error::new(
            ErrorImpl::TypeMismatch {
                class: String::from(self.defined_in),
                feature: String::from(self.feature_name),
                expected: String::from(expected),
                received: String::from(received),
            },
            position.clone(),
        )
    }

    /// `Int` conforms to `Object`, never the other way round.
    pub fn is_child(&self, child: &str, parent: &str) -> bool {
        self.graph.is_child(child, parent)
    }

    /// Fails unless `type_name` names a class, or is `SELF_TYPE` where
    /// `allow_self_type` says it may be.
    fn expect_declared(
        &self,
        type_name: &str,
        allow_self_type: bool,
        position: &Position,
    ) -> Result<(), Error> {
        if self.classes.contains(type_name) || (allow_self_type && type_name == SELF_TYPE) {
            return Ok(());
        }

        Err(Error::new(
            ErrorImpl::UndeclaredType {
                class: String::from(self.defined_in),
                feature: String::from(self.feature_name),
                type_: String::from(type_name),
            },
            position.clone(),
        ))
    }

    /// Fails unless `received` conforms to `expected`, after resolving
    /// `SELF_TYPE` in `expected` to the current class.
    fn expect_conforms(
        &self,
        received: &str,
        expected: &str,
        position: &Position,
    ) -> Result<(), Error> {
        let expected = resolve_self_type(expected, self.class_name);
        if self.is_child(received, expected) {
            return Ok(());
        }

        Err(self.mismatch(expected, received, position))
    }
}

/// Checks every typed class. Features missing from the typed program, because
/// their inference failed, are not checked.
#[tracing::instrument(skip_all)]
pub fn check_program(
    classes: &ClassTable,
    graph: &ClassGraph,
    program: &TypedProgram,
    options: &SemanticOptions,
    errors: &mut Vec<Error>,
) {
    for class in &program.classes {
        check_class(&TypeChecker::new(classes, graph, &class.name), class, options, errors);
        if options.fail_fast && !errors.is_empty() {
            break;
        }
    }

    debug!(errors = errors.len(), "type check finished");
}

pub fn check_class<'a>(
    checker: &TypeChecker<'a>,
    class: &'a TypedClass,
    options: &SemanticOptions,
    errors: &mut Vec<Error>,
) {
    for feature in &class.features {
        if let Err(error) = check_feature(&checker.for_feature(feature), feature) {
            errors.push(error);
            if options.fail_fast {
                return;
            }
        }
    }
}

pub fn check_feature(checker: &TypeChecker, feature: &TypedFeature) -> Result<(), Error> {
    match feature {
        TypedFeature::Attribute(attribute) => check_attribute(checker, attribute),
        TypedFeature::Method(method) => check_method(checker, method),
    }
}

fn check_attribute(checker: &TypeChecker, attribute: &TypedAttribute) -> Result<(), Error> {
    checker.expect_declared(&attribute.declared_type, true, &attribute.span.start)?;

    if let Some(initializer) = &attribute.initializer {
        check_expr(checker, initializer)?;
        checker.expect_conforms(
            &initializer.ty,
            &attribute.declared_type,
            &initializer.span.start,
        )?;
    }

    Ok(())
}

fn check_method(checker: &TypeChecker, method: &TypedMethod) -> Result<(), Error> {
    for formal in &method.formals {
        if formal.declared_type == SELF_TYPE {
            return Err(Error::new(
                ErrorImpl::IllegalSelfType {
                    method: method.name.clone(),
                    formal: formal.name.clone(),
                },
                formal.span.start.clone(),
            ));
        }
        checker.expect_declared(&formal.declared_type, false, &formal.span.start)?;
    }
    checker.expect_declared(&method.return_type, true, &method.span.start)?;

    if let Some(body) = &method.body {
        check_expr(checker, body)?;
        checker.expect_conforms(&body.ty, &method.return_type, &body.span.start)?;
    }

    Ok(())
}

/// Re-validates `expr` and its subexpressions against the inferred types.
pub fn check_expr(checker: &TypeChecker, expr: &TypedExpr) -> Result<(), Error> {
    let position = &expr.span.start;

    match &expr.kind {
        TypedExprKind::Int(_)
        | TypedExprKind::String(_)
        | TypedExprKind::Bool(_)
        | TypedExprKind::Identifier(_)
        | TypedExprKind::SelfRef => Ok(()),
        TypedExprKind::Assign { target, value } => {
            check_expr(checker, value)?;
            checker.expect_conforms(&value.ty, &target.ty, position)
        }
        TypedExprKind::Binary { left, right, .. } => {
            check_expr(checker, left)?;
            check_expr(checker, right)?;

            if checker.is_child(&left.ty, &right.ty) || checker.is_child(&right.ty, &left.ty) {
                Ok(())
            } else {
                Err(checker.mismatch(&left.ty, &right.ty, &right.span.start))
            }
        }
        TypedExprKind::Unary { operand, .. } => check_expr(checker, operand),
        TypedExprKind::Block(elements) => elements
            .iter()
            .try_for_each(|element| check_expr(checker, element)),
        TypedExprKind::If {
            condition,
            then_branch,
            else_branch,
        } => {
            check_condition(checker, condition)?;
            check_expr(checker, then_branch)?;
            check_expr(checker, else_branch)
        }
        TypedExprKind::While { condition, body } => {
            check_condition(checker, condition)?;
            check_expr(checker, body)
        }
        TypedExprKind::Let { bindings, body } => {
            for binding in bindings {
                checker.expect_declared(&binding.declared_type, true, &binding.span.start)?;
                if let Some(initializer) = &binding.initializer {
                    check_expr(checker, initializer)?;
                    checker.expect_conforms(
                        &initializer.ty,
                        &binding.declared_type,
                        &initializer.span.start,
                    )?;
                }
            }
            check_expr(checker, body)
        }
        TypedExprKind::Case { scrutinee, arms } => {
            check_expr(checker, scrutinee)?;
            for arm in arms {
                checker.expect_declared(&arm.declared_type, false, &arm.span.start)?;
                check_expr(checker, &arm.body)?;
            }
            Ok(())
        }
        TypedExprKind::New(type_name) => checker.expect_declared(type_name, true, position),
        TypedExprKind::FunctionCall {
            method,
            dispatch_class,
            arguments,
        } => {
            arguments
                .iter()
                .try_for_each(|argument| check_expr(checker, argument))?;
            check_arguments(checker, method, dispatch_class, arguments, position)
        }
        TypedExprKind::MethodCall {
            receiver,
            static_type,
            method,
            dispatch_class,
            arguments,
        } => {
            check_expr(checker, receiver)?;
            arguments
                .iter()
                .try_for_each(|argument| check_expr(checker, argument))?;

            if let Some(static_type) = static_type {
                checker.expect_declared(static_type, false, position)?;
                if !checker.is_child(&receiver.ty, static_type) {
                    return Err(checker.mismatch(static_type, &receiver.ty, &receiver.span.start));
                }
            }

            check_arguments(checker, method, dispatch_class, arguments, position)
        }
    }
}

fn check_condition(checker: &TypeChecker, condition: &TypedExpr) -> Result<(), Error> {
    check_expr(checker, condition)?;

    if condition.ty != BOOL {
        return Err(Error::new(
            ErrorImpl::NonBooleanCondition {
                class: String::from(checker.defined_in),
                feature: String::from(checker.feature_name),
                received: condition.ty.clone(),
            },
            condition.span.start.clone(),
        ));
    }

    Ok(())
}

/// Argument count and conformance against the formals of `method` as
/// declared on `dispatch_class`.
fn check_arguments(
    checker: &TypeChecker,
    method: &str,
    dispatch_class: &str,
    arguments: &[TypedExpr],
    position: &Position,
) -> Result<(), Error> {
    let Some(target) = checker
        .classes
        .get(dispatch_class)
        .and_then(|class| class.find_method(method))
    else {
        return Ok(());
    };

    if target.formals.len() != arguments.len() {
        return Err(Error::new(
            ErrorImpl::ArgumentCount {
                method: String::from(method),
                expected: target.formals.len(),
                received: arguments.len(),
            },
            position.clone(),
        ));
    }

    for (argument, formal) in arguments.iter().zip(&target.formals) {
        let expected = resolve_self_type(&formal.declared_type, dispatch_class);
        if !checker.is_child(&argument.ty, expected) {
            return Err(checker.mismatch(expected, &argument.ty, &argument.span.start));
        }
    }

    Ok(())
}
