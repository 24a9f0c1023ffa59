//! Typed syntax tree produced by type inference.
//!
//! The tree mirrors `ast::expressions` node for node. Every expression carries
//! the class name inferred for it, fixed when the node is built; nothing in
//! the crate rewrites a node's type afterwards.
//!
//! Call nodes also record the class whose method table entry was used, so
//! the checker can find the target's formals without redoing the lookup.

use crate::{
    ast::{
        ast::Formal,
        expressions::{BinaryOperator, UnaryOperator},
    },
    Span,
};

#[derive(Debug, Clone)]
pub struct TypedExpr {
    pub kind: TypedExprKind,
    pub ty: String,
    pub span: Span,
}

impl TypedExpr {
    pub fn new(kind: TypedExprKind, ty: &str, span: Span) -> Self {
        TypedExpr {
            kind,
            ty: String::from(ty),
            span,
        }
    }

    /// Direct subexpressions, in evaluation order.
    pub fn children(&self) -> Vec<&TypedExpr> {
        match &self.kind {
            TypedExprKind::Int(_)
            | TypedExprKind::String(_)
            | TypedExprKind::Bool(_)
            | TypedExprKind::Identifier(_)
            | TypedExprKind::New(_)
            | TypedExprKind::SelfRef => vec![],
            TypedExprKind::Assign { target, value } => vec![value.as_ref(), target.as_ref()],
            TypedExprKind::Binary { left, right, .. } => vec![left.as_ref(), right.as_ref()],
            TypedExprKind::Unary { operand, .. } => vec![operand.as_ref()],
            TypedExprKind::Block(elements) => elements.iter().collect(),
            TypedExprKind::If {
                condition,
                then_branch,
                else_branch,
            } => vec![condition.as_ref(), then_branch.as_ref(), else_branch.as_ref()],
            TypedExprKind::While { condition, body } => vec![condition.as_ref(), body.as_ref()],
            TypedExprKind::Let { bindings, body } => bindings
                .iter()
                .filter_map(|binding| binding.initializer.as_ref())
                .chain(std::iter::once(body.as_ref()))
                .collect(),
            TypedExprKind::Case { scrutinee, arms } => std::iter::once(scrutinee.as_ref())
                .chain(arms.iter().map(|arm| &arm.body))
                .collect(),
            TypedExprKind::FunctionCall { arguments, .. } => arguments.iter().collect(),
            TypedExprKind::MethodCall {
                receiver, arguments, ..
            } => std::iter::once(receiver.as_ref())
                .chain(arguments.iter())
                .collect(),
        }
    }

    /// This node and every node below it, preorder.
    pub fn nodes(&self) -> Vec<&TypedExpr> {
        let mut nodes = vec![];
        let mut stack = vec![self];

        while let Some(node) = stack.pop() {
            nodes.push(node);
            stack.extend(node.children().into_iter().rev());
        }

        nodes
    }
}

#[derive(Debug, Clone)]
pub enum TypedExprKind {
    Int(i64),
    String(String),
    Bool(bool),
    Identifier(String),
    /// `target` is the assigned identifier, typed by its binding.
    Assign {
        target: Box<TypedExpr>,
        value: Box<TypedExpr>,
    },
    Binary {
        operator: BinaryOperator,
        left: Box<TypedExpr>,
        right: Box<TypedExpr>,
    },
    Unary {
        operator: UnaryOperator,
        operand: Box<TypedExpr>,
    },
    Block(Vec<TypedExpr>),
    If {
        condition: Box<TypedExpr>,
        then_branch: Box<TypedExpr>,
        else_branch: Box<TypedExpr>,
    },
    While {
        condition: Box<TypedExpr>,
        body: Box<TypedExpr>,
    },
    Let {
        bindings: Vec<TypedLetBinding>,
        body: Box<TypedExpr>,
    },
    Case {
        scrutinee: Box<TypedExpr>,
        arms: Vec<TypedCaseArm>,
    },
    New(String),
    SelfRef,
    FunctionCall {
        method: String,
        dispatch_class: String,
        arguments: Vec<TypedExpr>,
    },
    MethodCall {
        receiver: Box<TypedExpr>,
        static_type: Option<String>,
        method: String,
        dispatch_class: String,
        arguments: Vec<TypedExpr>,
    },
}

#[derive(Debug, Clone)]
pub struct TypedLetBinding {
    pub name: String,
    /// As written, `SELF_TYPE` included.
    pub declared_type: String,
    pub initializer: Option<TypedExpr>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct TypedCaseArm {
    pub name: String,
    pub declared_type: String,
    pub body: TypedExpr,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct TypedAttribute {
    pub name: String,
    /// Class whose source declares the attribute.
    pub defined_in: String,
    pub declared_type: String,
    pub initializer: Option<TypedExpr>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct TypedMethod {
    pub name: String,
    pub defined_in: String,
    pub return_type: String,
    pub formals: Vec<Formal>,
    pub body: Option<TypedExpr>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub enum TypedFeature {
    Attribute(TypedAttribute),
    Method(TypedMethod),
}

impl TypedFeature {
    pub fn name(&self) -> &str {
        match self {
            TypedFeature::Attribute(attribute) => &attribute.name,
            TypedFeature::Method(method) => &method.name,
        }
    }

    pub fn defined_in(&self) -> &str {
        match self {
            TypedFeature::Attribute(attribute) => &attribute.defined_in,
            TypedFeature::Method(method) => &method.defined_in,
        }
    }

    /// The initializer or body, if the feature has one.
    pub fn expression(&self) -> Option<&TypedExpr> {
        match self {
            TypedFeature::Attribute(attribute) => attribute.initializer.as_ref(),
            TypedFeature::Method(method) => method.body.as_ref(),
        }
    }
}

/// A class's features, in expanded order. Features whose inference failed
/// are left out.
#[derive(Debug, Clone)]
pub struct TypedClass {
    pub name: String,
    pub features: Vec<TypedFeature>,
    pub span: Span,
}

impl TypedClass {
    pub fn find_method(&self, name: &str) -> Option<&TypedMethod> {
        self.features.iter().find_map(|feature| match feature {
            TypedFeature::Method(method) if method.name == name => Some(method),
            _ => None,
        })
    }

    pub fn find_attribute(&self, name: &str) -> Option<&TypedAttribute> {
        self.features.iter().find_map(|feature| match feature {
            TypedFeature::Attribute(attribute) if attribute.name == name => Some(attribute),
            _ => None,
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct TypedProgram {
    pub classes: Vec<TypedClass>,
}

impl TypedProgram {
    pub fn class(&self, name: &str) -> Option<&TypedClass> {
        self.classes.iter().find(|class| class.name == name)
    }
}
