//! Unit tests for the lexer module.

use super::lexer::tokenize;
use super::tokens::TokenKind;
use crate::errors::errors::ErrorImpl;

fn kinds(source: &str) -> Vec<TokenKind> {
    tokenize(source.to_string(), Some("test.cl".to_string()))
        .unwrap()
        .iter()
        .map(|token| token.kind)
        .collect()
}

#[test]
fn test_tokenize_empty() {
    assert_eq!(kinds(""), vec![TokenKind::EOF]);
}

#[test]
fn test_tokenize_class_header() {
    assert_eq!(
        kinds("class Main inherits IO {"),
        vec![
            TokenKind::Class,
            TokenKind::TypeId,
            TokenKind::Inherits,
            TokenKind::TypeId,
            TokenKind::OpenCurly,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_keywords_are_case_insensitive() {
    assert_eq!(
        kinds("CLASS Inherits wHiLe NOT"),
        vec![
            TokenKind::Class,
            TokenKind::Inherits,
            TokenKind::While,
            TokenKind::Not,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_booleans_must_start_lowercase() {
    let tokens = tokenize("tRUE True false".to_string(), None).unwrap();
    assert_eq!(tokens[0].kind, TokenKind::Bool);
    assert_eq!(tokens[0].value, "true");
    assert_eq!(tokens[1].kind, TokenKind::TypeId);
    assert_eq!(tokens[2].kind, TokenKind::Bool);
}

#[test]
fn test_identifiers() {
    let tokens = tokenize("x_1 SELF_TYPE self".to_string(), None).unwrap();
    assert_eq!(tokens[0].kind, TokenKind::ObjectId);
    assert_eq!(tokens[0].value, "x_1");
    assert_eq!(tokens[1].kind, TokenKind::TypeId);
    assert_eq!(tokens[1].value, "SELF_TYPE");
    assert_eq!(tokens[2].kind, TokenKind::SelfKw);
}

#[test]
fn test_operators() {
    assert_eq!(
        kinds("<- <= < => = + - * / ~ @ . : ; ,"),
        vec![
            TokenKind::Assign,
            TokenKind::LessEquals,
            TokenKind::Less,
            TokenKind::Arrow,
            TokenKind::Equals,
            TokenKind::Plus,
            TokenKind::Minus,
            TokenKind::Star,
            TokenKind::Slash,
            TokenKind::Tilde,
            TokenKind::At,
            TokenKind::Dot,
            TokenKind::Colon,
            TokenKind::Semicolon,
            TokenKind::Comma,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_integer_and_string_literals() {
    let tokens = tokenize("42 \"hello\\tworld\"".to_string(), None).unwrap();
    assert_eq!(tokens[0].kind, TokenKind::Integer);
    assert_eq!(tokens[0].value, "42");
    assert_eq!(tokens[1].kind, TokenKind::String);
    assert_eq!(tokens[1].value, "hello\tworld");
}

#[test]
fn test_escaped_quote_in_string() {
    let tokens = tokenize("\"say \\\"hi\\\"\"".to_string(), None).unwrap();
    assert_eq!(tokens[0].kind, TokenKind::String);
    assert_eq!(tokens[0].value, "say \"hi\"");
}

#[test]
fn test_token_spans() {
    let tokens = tokenize("  abc <- 1".to_string(), None).unwrap();
    assert_eq!(tokens[0].span.start.0, 2);
    assert_eq!(tokens[0].span.end.0, 5);
    assert_eq!(tokens[1].span.start.0, 6);
    assert_eq!(tokens[2].span.start.0, 9);
}

#[test]
fn test_line_comment_is_skipped() {
    assert_eq!(
        kinds("x -- a comment\ny"),
        vec![TokenKind::ObjectId, TokenKind::ObjectId, TokenKind::EOF]
    );
}

#[test]
fn test_nested_block_comment_is_skipped() {
    assert_eq!(
        kinds("x (* outer (* inner *) still outer *) y"),
        vec![TokenKind::ObjectId, TokenKind::ObjectId, TokenKind::EOF]
    );
}

#[test]
fn test_unterminated_block_comment() {
    let error = tokenize("x (* never closed".to_string(), None).unwrap_err();
    assert_eq!(error.get_kind(), &ErrorImpl::UnterminatedComment);
}

#[test]
fn test_unrecognised_token() {
    let error = tokenize("x # y".to_string(), None).unwrap_err();
    assert_eq!(
        error.get_kind(),
        &ErrorImpl::UnrecognisedToken {
            token: "#".to_string()
        }
    );
    assert_eq!(error.get_position().0, 2);
}

#[test]
fn test_self_is_case_sensitive() {
    let tokens = tokenize("self Self sELF".to_string(), None).unwrap();
    assert_eq!(tokens[0].kind, TokenKind::SelfKw);
    assert_eq!(tokens[1].kind, TokenKind::TypeId);
    assert_eq!(tokens[2].kind, TokenKind::ObjectId);
}
