use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display};

use crate::Span;

lazy_static! {
    /// Keywords, keyed by their lowercase spelling. Lookups lowercase the word first.
    pub static ref RESERVED_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("class", TokenKind::Class);
        map.insert("inherits", TokenKind::Inherits);
        map.insert("if", TokenKind::If);
        map.insert("then", TokenKind::Then);
        map.insert("else", TokenKind::Else);
        map.insert("fi", TokenKind::Fi);
        map.insert("while", TokenKind::While);
        map.insert("loop", TokenKind::Loop);
        map.insert("pool", TokenKind::Pool);
        map.insert("let", TokenKind::Let);
        map.insert("in", TokenKind::In);
        map.insert("case", TokenKind::Case);
        map.insert("of", TokenKind::Of);
        map.insert("esac", TokenKind::Esac);
        map.insert("new", TokenKind::New);
        map.insert("isvoid", TokenKind::IsVoid);
        map.insert("not", TokenKind::Not);
        map.insert("self", TokenKind::SelfKw);
        map
    };
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    EOF,
    Integer,
    String,
    Bool,
    TypeId,
    ObjectId,

    OpenCurly,
    CloseCurly,
    OpenParen,
    CloseParen,

    Assign,     // <-
    Arrow,      // =>
    Less,       // <
    LessEquals, // <=
    Equals,     // =

    Plus,
    Minus,
    Star,
    Slash,
    Tilde,

    At,
    Dot,
    Colon,
    Semicolon,
    Comma,

    // Reserved
    Class,
    Inherits,
    If,
    Then,
    Else,
    Fi,
    While,
    Loop,
    Pool,
    Let,
    In,
    Case,
    Of,
    Esac,
    New,
    IsVoid,
    Not,
    SelfKw,
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub span: Span,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            TokenKind::Integer
            | TokenKind::String
            | TokenKind::Bool
            | TokenKind::TypeId
            | TokenKind::ObjectId => write!(f, "{} ({})", self.kind, self.value),
            _ => write!(f, "{}", self.kind),
        }
    }
}
