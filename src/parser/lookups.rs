use std::collections::HashMap;

use crate::{ast::expressions::Expr, errors::errors::Error, lexer::tokens::TokenKind};

use super::{expr::*, parser::Parser};

/// Precedence levels, lowest first.
#[derive(PartialEq, PartialOrd, Clone, Copy, Debug)]
pub enum BindingPower {
    Default,
    Assignment,
    Not,
    Relational,
    Additive,
    Multiplicative,
    IsVoid,
    Complement,
    Dispatch,
}

pub type NUDHandler = fn(&mut Parser) -> Result<Expr, Error>;
pub type LEDHandler = fn(&mut Parser, Expr, BindingPower) -> Result<Expr, Error>;

pub fn create_token_lookups(parser: &mut Parser) {
    // Relational
    parser.led(TokenKind::Less, BindingPower::Relational, parse_binary_expr);
    parser.led(TokenKind::LessEquals, BindingPower::Relational, parse_binary_expr);
    parser.led(TokenKind::Equals, BindingPower::Relational, parse_binary_expr);

    // Additive and multiplicative
    parser.led(TokenKind::Plus, BindingPower::Additive, parse_binary_expr);
    parser.led(TokenKind::Minus, BindingPower::Additive, parse_binary_expr);
    parser.led(TokenKind::Star, BindingPower::Multiplicative, parse_binary_expr);
    parser.led(TokenKind::Slash, BindingPower::Multiplicative, parse_binary_expr);

    // Dispatch
    parser.led(TokenKind::Dot, BindingPower::Dispatch, parse_dispatch_expr);
    parser.led(TokenKind::At, BindingPower::Dispatch, parse_dispatch_expr);

    // Literals and symbols
    parser.nud(TokenKind::Integer, parse_primary_expr);
    parser.nud(TokenKind::String, parse_primary_expr);
    parser.nud(TokenKind::Bool, parse_primary_expr);
    parser.nud(TokenKind::ObjectId, parse_identifier_expr);
    parser.nud(TokenKind::SelfKw, parse_primary_expr);

    // Prefix operators
    parser.nud(TokenKind::Not, parse_prefix_expr);
    parser.nud(TokenKind::IsVoid, parse_prefix_expr);
    parser.nud(TokenKind::Tilde, parse_prefix_expr);

    // Compound expressions
    parser.nud(TokenKind::OpenParen, parse_grouping_expr);
    parser.nud(TokenKind::OpenCurly, parse_block_expr);
    parser.nud(TokenKind::If, parse_if_expr);
    parser.nud(TokenKind::While, parse_while_expr);
    parser.nud(TokenKind::Let, parse_let_expr);
    parser.nud(TokenKind::Case, parse_case_expr);
    parser.nud(TokenKind::New, parse_new_expr);
}

// Lookup tables inside parser struct, so it's easier
pub type NUDLookup = HashMap<TokenKind, NUDHandler>;
pub type LEDLookup = HashMap<TokenKind, LEDHandler>;
pub type BPLookup = HashMap<TokenKind, BindingPower>;
