use crate::{
    ast::{
        ast::{Attribute, ClassDef, Feature, Formal, Method},
        expressions::Expr,
    },
    errors::errors::Error,
    lexer::tokens::TokenKind,
    parser::{expr::parse_expr, lookups::BindingPower},
};

use super::parser::Parser;

/// `class TYPE [inherits TYPE] { feature* } ;`
pub fn parse_class(parser: &mut Parser) -> Result<ClassDef, Error> {
    let start = parser
        .expect_detailed(TokenKind::Class, "expected class declaration")?
        .span
        .start;

    let name = parser
        .expect_detailed(TokenKind::TypeId, "expected class name")?
        .value;

    let parent = if parser.current_token_kind() == TokenKind::Inherits {
        parser.advance();
        Some(
            parser
                .expect_detailed(TokenKind::TypeId, "expected parent class name")?
                .value,
        )
    } else {
        None
    };

    parser.expect(TokenKind::OpenCurly)?;

    let mut features = vec![];
    while parser.current_token_kind() != TokenKind::CloseCurly {
        features.push(parse_feature(parser)?);
    }

    parser.expect(TokenKind::CloseCurly)?;
    parser.expect(TokenKind::Semicolon)?;

    Ok(ClassDef::new(
        &name,
        parent.as_deref(),
        features,
        parser.span_from(start),
    ))
}

/// `ID ( formals ) : TYPE { expr } ;` or `ID : TYPE [<- expr] ;`
pub fn parse_feature(parser: &mut Parser) -> Result<Feature, Error> {
    let name_token = parser.expect_detailed(TokenKind::ObjectId, "expected feature name")?;
    let start = name_token.span.start.clone();

    let feature = if parser.current_token_kind() == TokenKind::OpenParen {
        parser.advance();
        let formals = parse_formals(parser)?;
        parser.expect(TokenKind::CloseParen)?;
        parser.expect(TokenKind::Colon)?;
        let return_type = parser
            .expect_detailed(TokenKind::TypeId, "expected return type")?
            .value;

        parser.expect(TokenKind::OpenCurly)?;
        let body = parse_expr(parser, BindingPower::Default)?;
        parser.expect(TokenKind::CloseCurly)?;

        Feature::Method(Method {
            name: name_token.value,
            return_type,
            formals,
            body: Some(body),
            span: parser.span_from(start),
        })
    } else {
        parser.expect(TokenKind::Colon)?;
        let declared_type = parser
            .expect_detailed(TokenKind::TypeId, "expected attribute type")?
            .value;
        let initializer = parse_initializer(parser)?;

        Feature::Attribute(Attribute {
            name: name_token.value,
            declared_type,
            initializer,
            span: parser.span_from(start),
        })
    };

    parser.expect(TokenKind::Semicolon)?;
    Ok(feature)
}

/// `[ID : TYPE (, ID : TYPE)*]`, stopping before `)`
fn parse_formals(parser: &mut Parser) -> Result<Vec<Formal>, Error> {
    let mut formals = vec![];

    while parser.current_token_kind() != TokenKind::CloseParen {
        if !formals.is_empty() {
            parser.expect(TokenKind::Comma)?;
        }

        let name_token = parser.expect_detailed(TokenKind::ObjectId, "expected formal name")?;
        parser.expect(TokenKind::Colon)?;
        let declared_type = parser
            .expect_detailed(TokenKind::TypeId, "expected formal type")?
            .value;

        formals.push(Formal {
            name: name_token.value,
            declared_type,
            span: parser.span_from(name_token.span.start),
        });
    }

    Ok(formals)
}

/// `[<- expr]`
pub fn parse_initializer(parser: &mut Parser) -> Result<Option<Expr>, Error> {
    if parser.current_token_kind() == TokenKind::Assign {
        parser.advance();
        Ok(Some(parse_expr(parser, BindingPower::Default)?))
    } else {
        Ok(None)
    }
}
