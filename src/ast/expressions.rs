use std::fmt::Display;

use crate::Span;

#[derive(Debug, Clone)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Expr { kind, span }
    }
}

/// Builds an expression with no source position, for synthesized trees and tests.
impl From<ExprKind> for Expr {
    fn from(kind: ExprKind) -> Self {
        Expr::new(kind, Span::null())
    }
}

#[derive(Debug, Clone)]
pub enum ExprKind {
    Int(i64),
    String(String),
    Bool(bool),
    Identifier(String),
    /// `name <- value`
    Assign { name: String, value: Box<Expr> },
    Binary {
        operator: BinaryOperator,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Unary {
        operator: UnaryOperator,
        operand: Box<Expr>,
    },
    /// `{ e1; e2; ... }`
    Block(Vec<Expr>),
    If {
        condition: Box<Expr>,
        then_branch: Box<Expr>,
        else_branch: Box<Expr>,
    },
    While {
        condition: Box<Expr>,
        body: Box<Expr>,
    },
    Let {
        bindings: Vec<LetBinding>,
        body: Box<Expr>,
    },
    Case {
        scrutinee: Box<Expr>,
        arms: Vec<CaseArm>,
    },
    New(String),
    SelfRef,
    /// `method(args)`, dispatched on `self`
    FunctionCall { method: String, arguments: Vec<Expr> },
    /// `receiver[@static_type].method(args)`
    MethodCall {
        receiver: Box<Expr>,
        static_type: Option<String>,
        method: String,
        arguments: Vec<Expr>,
    },
}

#[derive(Debug, Clone)]
pub struct LetBinding {
    pub name: String,
    pub declared_type: String,
    pub initializer: Option<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct CaseArm {
    pub name: String,
    pub declared_type: String,
    pub body: Expr,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    Plus,
    Minus,
    Multiply,
    Divide,
    LessThan,
    LessThanOrEqual,
    Equal,
}

impl BinaryOperator {
    pub fn is_relational(&self) -> bool {
        matches!(
            self,
            BinaryOperator::LessThan | BinaryOperator::LessThanOrEqual | BinaryOperator::Equal
        )
    }
}

impl Display for BinaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let symbol = match self {
            BinaryOperator::Plus => "+",
            BinaryOperator::Minus => "-",
            BinaryOperator::Multiply => "*",
            BinaryOperator::Divide => "/",
            BinaryOperator::LessThan => "<",
            BinaryOperator::LessThanOrEqual => "<=",
            BinaryOperator::Equal => "=",
        };
        write!(f, "{}", symbol)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    /// `~`, integer complement
    Complement,
    Not,
    IsVoid,
}

impl Display for UnaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let symbol = match self {
            UnaryOperator::Complement => "~",
            UnaryOperator::Not => "not",
            UnaryOperator::IsVoid => "isvoid",
        };
        write!(f, "{}", symbol)
    }
}
