use std::collections::HashSet;

use tracing::debug;

use crate::{
    ast::{
        ast::{Attribute, ClassDef, Feature, Method},
        expressions::{Expr, ExprKind, UnaryOperator},
        types::{resolve_self_type, BOOL, INT, OBJECT, STRING},
    },
    errors::errors::{Error, ErrorImpl},
    Position, Span,
};

use super::{
    class_table::ClassTable,
    method_table::MethodTable,
    options::SemanticOptions,
    scope::{Scope, ScopeStack},
    typed_ast::{
        TypedAttribute, TypedCaseArm, TypedClass, TypedExpr, TypedExprKind, TypedFeature,
        TypedLetBinding, TypedMethod, TypedProgram,
    },
};

/// Inference state for one class.
#[derive(Debug)]
pub struct Inferencer<'a> {
    pub methods: &'a MethodTable,
    pub options: &'a SemanticOptions,
    pub class_name: String,
    /// Declaring class and name of the feature being inferred.
    defined_in: String,
    feature_name: String,
    scopes: ScopeStack,
    depth: usize,
}

impl<'a> Inferencer<'a> {
    pub fn new(class_name: &str, methods: &'a MethodTable, options: &'a SemanticOptions) -> Self {
        Inferencer {
            methods,
            options,
            class_name: String::from(class_name),
            defined_in: String::from(class_name),
            feature_name: String::new(),
            scopes: ScopeStack::new(),
            depth: 0,
        }
    }

    /// Runs `f` with `scope` pushed. The scope is popped whether or not `f` fails.
    pub fn with_scope<T>(
        &mut self,
        scope: Scope,
        f: impl FnOnce(&mut Self) -> Result<T, Error>,
    ) -> Result<T, Error> {
        self.scopes.push(scope);
        let result = f(self);
        self.scopes.pop();
        result
    }

    /// Attributes later errors to `feature`, declared on `defined_in`.
    pub fn set_feature(&mut self, defined_in: &str, feature: &str) {
        self.defined_in = String::from(defined_in);
        self.feature_name = String::from(feature);
    }

    pub fn scope_depth(&self) -> usize {
        self.scopes.depth()
    }

    pub fn fetch_variable_type(&self, name: &str) -> Option<&str> {
        self.scopes.lookup(name)
    }

    /// Binds `name` in the innermost scope, replacing an earlier binding there.
    fn bind(&mut self, name: &str, ty: &str) {
        if let Some(scope) = self.scopes.current_mut() {
            scope.bind(name, ty);
        }
    }

    /// Resolves `SELF_TYPE` against the class being inferred.
    pub fn resolve(&self, type_name: &str) -> String {
        String::from(resolve_self_type(type_name, &self.class_name))
    }

    fn enter(&mut self, position: &Position) -> Result<(), Error> {
        if self.depth >= self.options.max_depth {
            return Err(Error::new(
                ErrorImpl::RecursionLimit {
                    limit: self.options.max_depth,
                },
                position.clone(),
            ));
        }
        self.depth += 1;
        Ok(())
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }
}

/// The type of a node whose value comes from one of several branches.
///
/// No least upper bound is computed: the result is always `Object`.
pub fn join_branch_types(_branches: &[&str]) -> String {
    String::from(OBJECT)
}

/// Infers every class in table order. Errors are collected per feature; a
/// feature that fails is left out of its `TypedClass`.
#[tracing::instrument(skip_all)]
pub fn infer_program(
    table: &ClassTable,
    methods: &MethodTable,
    options: &SemanticOptions,
    errors: &mut Vec<Error>,
) -> TypedProgram {
    let mut program = TypedProgram::default();

    for class in table.iter() {
        program.classes.push(infer_class(class, methods, options, errors));
        if options.fail_fast && !errors.is_empty() {
            break;
        }
    }

    debug!(classes = program.classes.len(), errors = errors.len(), "inference finished");
    program
}

pub fn infer_class(
    class: &ClassDef,
    methods: &MethodTable,
    options: &SemanticOptions,
    errors: &mut Vec<Error>,
) -> TypedClass {
    let mut typed = TypedClass {
        name: class.name.clone(),
        features: vec![],
        span: class.span.clone(),
    };
    let mut inferencer = Inferencer::new(&class.name, methods, options);

    let mut attributes = Scope::new();
    for attribute in class.attributes() {
        let ty = inferencer.resolve(&attribute.declared_type);
        if !attributes.declare(&attribute.name, &ty) {
            errors.push(Error::new(
                ErrorImpl::DuplicateAttribute {
                    class: class.name.clone(),
                    attribute: attribute.name.clone(),
                },
                attribute.span.start.clone(),
            ));
            if options.fail_fast {
                return typed;
            }
        }
    }
    inferencer.scopes.push(attributes);

    let mut seen_methods = HashSet::new();
    for (index, feature) in class.features.iter().enumerate() {
        inferencer.set_feature(class.origin(index), feature.name());
        let result = match feature {
            Feature::Attribute(attribute) => {
                infer_attribute(&mut inferencer, attribute).map(TypedFeature::Attribute)
            }
            Feature::Method(method) if !seen_methods.insert(method.name.as_str()) => {
                Err(Error::new(
                    ErrorImpl::DuplicateMethod {
                        class: class.name.clone(),
                        method: method.name.clone(),
                    },
                    method.span.start.clone(),
                ))
            }
            Feature::Method(method) => {
                infer_method(&mut inferencer, method).map(TypedFeature::Method)
            }
        };

        match result {
            Ok(feature) => typed.features.push(feature),
            Err(error) => {
                errors.push(error);
                if options.fail_fast {
                    break;
                }
            }
        }
    }

    typed
}

fn infer_attribute(
    inferencer: &mut Inferencer,
    attribute: &Attribute,
) -> Result<TypedAttribute, Error> {
    let initializer = match &attribute.initializer {
        Some(initializer) => Some(infer_expr(inferencer, initializer)?),
        None => None,
    };

    Ok(TypedAttribute {
        name: attribute.name.clone(),
        defined_in: inferencer.defined_in.clone(),
        declared_type: attribute.declared_type.clone(),
        initializer,
        span: attribute.span.clone(),
    })
}

fn infer_method(inferencer: &mut Inferencer, method: &Method) -> Result<TypedMethod, Error> {
    let mut formals = Scope::new();
    for formal in &method.formals {
        if !formals.declare(&formal.name, &inferencer.resolve(&formal.declared_type)) {
            return Err(Error::new(
                ErrorImpl::DuplicateFormal {
                    method: method.name.clone(),
                    formal: formal.name.clone(),
                },
                formal.span.start.clone(),
            ));
        }
    }

    let body = inferencer.with_scope(formals, |inferencer| match &method.body {
        Some(body) => infer_expr(inferencer, body).map(Some),
        None => Ok(None),
    })?;

    Ok(TypedMethod {
        name: method.name.clone(),
        defined_in: inferencer.defined_in.clone(),
        return_type: method.return_type.clone(),
        formals: method.formals.clone(),
        body,
        span: method.span.clone(),
    })
}

/// Infers `expr` and everything below it.
pub fn infer_expr(inferencer: &mut Inferencer, expr: &Expr) -> Result<TypedExpr, Error> {
    inferencer.enter(&expr.span.start)?;
    let typed = infer_expr_kind(inferencer, expr);
    inferencer.leave();
    typed
}

fn infer_expr_kind(inferencer: &mut Inferencer, expr: &Expr) -> Result<TypedExpr, Error> {
    let span = expr.span.clone();

    match &expr.kind {
        ExprKind::Int(value) => Ok(TypedExpr::new(TypedExprKind::Int(*value), INT, span)),
        ExprKind::String(value) => Ok(TypedExpr::new(
            TypedExprKind::String(value.clone()),
            STRING,
            span,
        )),
        ExprKind::Bool(value) => Ok(TypedExpr::new(TypedExprKind::Bool(*value), BOOL, span)),
        ExprKind::Identifier(name) => infer_identifier(inferencer, name, span),
        ExprKind::Assign { name, value } => {
            let value = infer_expr(inferencer, value)?;
            let target = infer_identifier(inferencer, name, span.clone())?;
            let ty = target.ty.clone();

            Ok(TypedExpr::new(
                TypedExprKind::Assign {
                    target: Box::new(target),
                    value: Box::new(value),
                },
                &ty,
                span,
            ))
        }
        ExprKind::Binary {
            operator,
            left,
            right,
        } => {
            let left = infer_expr(inferencer, left)?;
            let right = infer_expr(inferencer, right)?;
            let ty = if operator.is_relational() { BOOL } else { INT };

            Ok(TypedExpr::new(
                TypedExprKind::Binary {
                    operator: *operator,
                    left: Box::new(left),
                    right: Box::new(right),
                },
                ty,
                span,
            ))
        }
        ExprKind::Unary { operator, operand } => {
            let operand = infer_expr(inferencer, operand)?;
            let ty = match operator {
                UnaryOperator::Complement => INT,
                UnaryOperator::Not | UnaryOperator::IsVoid => BOOL,
            };

            Ok(TypedExpr::new(
                TypedExprKind::Unary {
                    operator: *operator,
                    operand: Box::new(operand),
                },
                ty,
                span,
            ))
        }
        ExprKind::Block(elements) => {
            let elements = elements
                .iter()
                .map(|element| infer_expr(inferencer, element))
                .collect::<Result<Vec<TypedExpr>, Error>>()?;
            let ty = elements
                .last()
                .map(|last| last.ty.clone())
                .unwrap_or_else(|| String::from(OBJECT));

            Ok(TypedExpr::new(TypedExprKind::Block(elements), &ty, span))
        }
        ExprKind::If {
            condition,
            then_branch,
            else_branch,
        } => {
            let condition = infer_expr(inferencer, condition)?;
            let then_branch = infer_expr(inferencer, then_branch)?;
            let else_branch = infer_expr(inferencer, else_branch)?;
            let ty = join_branch_types(&[then_branch.ty.as_str(), else_branch.ty.as_str()]);

            Ok(TypedExpr::new(
                TypedExprKind::If {
                    condition: Box::new(condition),
                    then_branch: Box::new(then_branch),
                    else_branch: Box::new(else_branch),
                },
                &ty,
                span,
            ))
        }
        ExprKind::While { condition, body } => {
            let condition = infer_expr(inferencer, condition)?;
            let body = infer_expr(inferencer, body)?;

            Ok(TypedExpr::new(
                TypedExprKind::While {
                    condition: Box::new(condition),
                    body: Box::new(body),
                },
                OBJECT,
                span,
            ))
        }
        ExprKind::Let { bindings, body } => inferencer.with_scope(Scope::new(), |inferencer| {
            let mut typed_bindings = vec![];
            for binding in bindings {
                let initializer = match &binding.initializer {
                    Some(initializer) => Some(infer_expr(inferencer, initializer)?),
                    None => None,
                };
                let ty = inferencer.resolve(&binding.declared_type);
                inferencer.bind(&binding.name, &ty);

                typed_bindings.push(TypedLetBinding {
                    name: binding.name.clone(),
                    declared_type: binding.declared_type.clone(),
                    initializer,
                    span: binding.span.clone(),
                });
            }

            let body = infer_expr(inferencer, body)?;
            let ty = body.ty.clone();

            Ok(TypedExpr::new(
                TypedExprKind::Let {
                    bindings: typed_bindings,
                    body: Box::new(body),
                },
                &ty,
                span,
            ))
        }),
        ExprKind::Case { scrutinee, arms } => {
            let scrutinee = infer_expr(inferencer, scrutinee)?;

            let mut typed_arms = vec![];
            for arm in arms {
                let mut scope = Scope::new();
                scope.bind(&arm.name, &inferencer.resolve(&arm.declared_type));
                let body =
                    inferencer.with_scope(scope, |inferencer| infer_expr(inferencer, &arm.body))?;

                typed_arms.push(TypedCaseArm {
                    name: arm.name.clone(),
                    declared_type: arm.declared_type.clone(),
                    body,
                    span: arm.span.clone(),
                });
            }

            let branches = typed_arms
                .iter()
                .map(|arm| arm.body.ty.as_str())
                .collect::<Vec<&str>>();
            let ty = join_branch_types(&branches);

            Ok(TypedExpr::new(
                TypedExprKind::Case {
                    scrutinee: Box::new(scrutinee),
                    arms: typed_arms,
                },
                &ty,
                span,
            ))
        }
        ExprKind::New(type_name) => {
            let ty = inferencer.resolve(type_name);
            Ok(TypedExpr::new(TypedExprKind::New(type_name.clone()), &ty, span))
        }
        ExprKind::SelfRef => {
            let ty = inferencer.class_name.clone();
            Ok(TypedExpr::new(TypedExprKind::SelfRef, &ty, span))
        }
        ExprKind::FunctionCall { method, arguments } => {
            let arguments = infer_arguments(inferencer, arguments)?;
            let dispatch_class = inferencer.class_name.clone();
            let return_type = lookup_return_type(inferencer, method, &dispatch_class, &span)?;
            let ty = inferencer.resolve(&return_type);

            Ok(TypedExpr::new(
                TypedExprKind::FunctionCall {
                    method: method.clone(),
                    dispatch_class,
                    arguments,
                },
                &ty,
                span,
            ))
        }
        ExprKind::MethodCall {
            receiver,
            static_type,
            method,
            arguments,
        } => {
            let receiver = infer_expr(inferencer, receiver)?;
            let arguments = infer_arguments(inferencer, arguments)?;
            let dispatch_class = static_type.clone().unwrap_or_else(|| receiver.ty.clone());
            let return_type = lookup_return_type(inferencer, method, &dispatch_class, &span)?;
            let ty = String::from(resolve_self_type(&return_type, &receiver.ty));

            Ok(TypedExpr::new(
                TypedExprKind::MethodCall {
                    receiver: Box::new(receiver),
                    static_type: static_type.clone(),
                    method: method.clone(),
                    dispatch_class,
                    arguments,
                },
                &ty,
                span,
            ))
        }
    }
}

fn infer_identifier(inferencer: &Inferencer, name: &str, span: Span) -> Result<TypedExpr, Error> {
    match inferencer.fetch_variable_type(name) {
        Some(ty) => Ok(TypedExpr::new(
            TypedExprKind::Identifier(String::from(name)),
            ty,
            span,
        )),
        None => Err(Error::new(
            ErrorImpl::UnboundIdentifier {
                class: inferencer.defined_in.clone(),
                feature: inferencer.feature_name.clone(),
                identifier: String::from(name),
            },
            span.start,
        )),
    }
}

fn infer_arguments(
    inferencer: &mut Inferencer,
    arguments: &[Expr],
) -> Result<Vec<TypedExpr>, Error> {
    arguments
        .iter()
        .map(|argument| infer_expr(inferencer, argument))
        .collect()
}

fn lookup_return_type(
    inferencer: &Inferencer,
    method: &str,
    class: &str,
    span: &Span,
) -> Result<String, Error> {
    inferencer
        .methods
        .return_type(method, class)
        .map(String::from)
        .ok_or_else(|| {
            Error::new(
                ErrorImpl::UndefinedMethod {
                    class: String::from(class),
                    method: String::from(method),
                },
                span.start.clone(),
            )
        })
}
