use crate::{
    ast::expressions::{BinaryOperator, CaseArm, Expr, ExprKind, LetBinding, UnaryOperator},
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
};

use super::{class::parse_initializer, lookups::BindingPower, parser::Parser};

pub fn parse_expr(parser: &mut Parser, bp: BindingPower) -> Result<Expr, Error> {
    parser.enter()?;
    let expr = parse_expr_bounded(parser, bp);
    parser.leave();
    expr
}

fn parse_expr_bounded(parser: &mut Parser, bp: BindingPower) -> Result<Expr, Error> {
    // First parse NUD
    let token_kind = parser.current_token_kind();
    let Some(nud) = parser.get_nud_lookup().get(&token_kind).copied() else {
        return Err(parser.unexpected());
    };

    let mut left = nud(parser)?;

    // While LED and current BP is less than BP of current token, continue parsing lhs
    loop {
        let token_kind = parser.current_token_kind();
        let next_bp = *parser
            .get_bp_lookup()
            .get(&token_kind)
            .unwrap_or(&BindingPower::Default);
        if next_bp <= bp {
            break;
        }

        let Some(led) = parser.get_led_lookup().get(&token_kind).copied() else {
            return Err(parser.unexpected());
        };
        left = led(parser, left, next_bp)?;
    }

    Ok(left)
}

pub fn parse_primary_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let token = parser.advance();

    let kind = match token.kind {
        TokenKind::Integer => match token.value.parse() {
            Ok(value) => ExprKind::Int(value),
            Err(_) => {
                return Err(Error::new(
                    ErrorImpl::NumberParseError { token: token.value },
                    token.span.start,
                ))
            }
        },
        TokenKind::String => ExprKind::String(token.value),
        TokenKind::Bool => ExprKind::Bool(token.value == "true"),
        TokenKind::SelfKw => ExprKind::SelfRef,
        _ => {
            return Err(Error::new(
                ErrorImpl::UnexpectedToken { token: token.value },
                token.span.start,
            ))
        }
    };

    Ok(Expr::new(kind, token.span))
}

/// `ID`, `ID <- expr` or `ID(args)`
pub fn parse_identifier_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let token = parser.advance();
    let start = token.span.start.clone();

    match parser.current_token_kind() {
        TokenKind::Assign => {
            parser.advance();
            // Right associative: `a <- b <- c` is `a <- (b <- c)`
            let value = parse_expr(parser, BindingPower::Default)?;

            Ok(Expr::new(
                ExprKind::Assign {
                    name: token.value,
                    value: Box::new(value),
                },
                parser.span_from(start),
            ))
        }
        TokenKind::OpenParen => {
            let arguments = parse_arguments(parser)?;

            Ok(Expr::new(
                ExprKind::FunctionCall {
                    method: token.value,
                    arguments,
                },
                parser.span_from(start),
            ))
        }
        _ => Ok(Expr::new(ExprKind::Identifier(token.value), token.span)),
    }
}

pub fn parse_binary_expr(parser: &mut Parser, left: Expr, bp: BindingPower) -> Result<Expr, Error> {
    let operator_token = parser.advance();
    let operator = match operator_token.kind {
        TokenKind::Plus => BinaryOperator::Plus,
        TokenKind::Minus => BinaryOperator::Minus,
        TokenKind::Star => BinaryOperator::Multiply,
        TokenKind::Slash => BinaryOperator::Divide,
        TokenKind::Less => BinaryOperator::LessThan,
        TokenKind::LessEquals => BinaryOperator::LessThanOrEqual,
        TokenKind::Equals => BinaryOperator::Equal,
        _ => {
            return Err(Error::new(
                ErrorImpl::UnexpectedToken {
                    token: operator_token.value,
                },
                operator_token.span.start,
            ))
        }
    };

    let right = parse_expr(parser, bp)?;

    // Comparisons do not associate
    if operator.is_relational() && bp == BindingPower::Relational {
        if let Some(BindingPower::Relational) =
            parser.get_bp_lookup().get(&parser.current_token_kind())
        {
            return Err(Error::new(
                ErrorImpl::UnexpectedTokenDetailed {
                    token: parser.current_token().value.clone(),
                    message: String::from("comparison operators do not associate"),
                },
                parser.get_position(),
            ));
        }
    }

    let start = left.span.start.clone();
    Ok(Expr::new(
        ExprKind::Binary {
            operator,
            left: Box::new(left),
            right: Box::new(right),
        },
        parser.span_from(start),
    ))
}

pub fn parse_prefix_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let operator_token = parser.advance();
    let (operator, bp) = match operator_token.kind {
        TokenKind::Not => (UnaryOperator::Not, BindingPower::Not),
        TokenKind::IsVoid => (UnaryOperator::IsVoid, BindingPower::IsVoid),
        _ => (UnaryOperator::Complement, BindingPower::Complement),
    };

    let operand = parse_expr(parser, bp)?;

    Ok(Expr::new(
        ExprKind::Unary {
            operator,
            operand: Box::new(operand),
        },
        parser.span_from(operator_token.span.start),
    ))
}

pub fn parse_grouping_expr(parser: &mut Parser) -> Result<Expr, Error> {
    parser.advance();
    let expr = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::CloseParen)?;

    Ok(expr)
}

/// `{ expr; expr; ... }`, at least one element
pub fn parse_block_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let start = parser.advance().span.start;

    let mut elements = vec![];
    loop {
        elements.push(parse_expr(parser, BindingPower::Default)?);
        parser.expect_detailed(TokenKind::Semicolon, "expected `;` after block element")?;

        if parser.current_token_kind() == TokenKind::CloseCurly {
            break;
        }
    }

    parser.expect(TokenKind::CloseCurly)?;

    Ok(Expr::new(ExprKind::Block(elements), parser.span_from(start)))
}

/// `if expr then expr else expr fi`
pub fn parse_if_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let start = parser.advance().span.start;

    let condition = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::Then)?;
    let then_branch = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::Else)?;
    let else_branch = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::Fi)?;

    Ok(Expr::new(
        ExprKind::If {
            condition: Box::new(condition),
            then_branch: Box::new(then_branch),
            else_branch: Box::new(else_branch),
        },
        parser.span_from(start),
    ))
}

/// `while expr loop expr pool`
pub fn parse_while_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let start = parser.advance().span.start;

    let condition = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::Loop)?;
    let body = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::Pool)?;

    Ok(Expr::new(
        ExprKind::While {
            condition: Box::new(condition),
            body: Box::new(body),
        },
        parser.span_from(start),
    ))
}

/// `let ID : TYPE [<- expr] (, ID : TYPE [<- expr])* in expr`
pub fn parse_let_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let start = parser.advance().span.start;

    let mut bindings = vec![];
    loop {
        let name_token = parser.expect_detailed(TokenKind::ObjectId, "expected let binding name")?;
        parser.expect(TokenKind::Colon)?;
        let declared_type = parser
            .expect_detailed(TokenKind::TypeId, "expected let binding type")?
            .value;
        let initializer = parse_initializer(parser)?;

        bindings.push(LetBinding {
            name: name_token.value,
            declared_type,
            initializer,
            span: parser.span_from(name_token.span.start),
        });

        if parser.current_token_kind() != TokenKind::Comma {
            break;
        }
        parser.advance();
    }

    parser.expect(TokenKind::In)?;
    let body = parse_expr(parser, BindingPower::Default)?;

    Ok(Expr::new(
        ExprKind::Let {
            bindings,
            body: Box::new(body),
        },
        parser.span_from(start),
    ))
}

/// `case expr of (ID : TYPE => expr ;)+ esac`
pub fn parse_case_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let start = parser.advance().span.start;

    let scrutinee = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::Of)?;

    let mut arms = vec![];
    loop {
        let name_token = parser.expect_detailed(TokenKind::ObjectId, "expected case arm name")?;
        parser.expect(TokenKind::Colon)?;
        let declared_type = parser
            .expect_detailed(TokenKind::TypeId, "expected case arm type")?
            .value;
        parser.expect(TokenKind::Arrow)?;
        let body = parse_expr(parser, BindingPower::Default)?;
        parser.expect(TokenKind::Semicolon)?;

        arms.push(CaseArm {
            name: name_token.value,
            declared_type,
            body,
            span: parser.span_from(name_token.span.start),
        });

        if parser.current_token_kind() == TokenKind::Esac {
            break;
        }
    }

    parser.expect(TokenKind::Esac)?;

    Ok(Expr::new(
        ExprKind::Case {
            scrutinee: Box::new(scrutinee),
            arms,
        },
        parser.span_from(start),
    ))
}

/// `new TYPE`
pub fn parse_new_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let start = parser.advance().span.start;
    let type_name = parser
        .expect_detailed(TokenKind::TypeId, "expected class name after `new`")?
        .value;

    Ok(Expr::new(ExprKind::New(type_name), parser.span_from(start)))
}

/// `receiver[@TYPE].ID(args)`
pub fn parse_dispatch_expr(parser: &mut Parser, left: Expr, _bp: BindingPower) -> Result<Expr, Error> {
    let static_type = if parser.current_token_kind() == TokenKind::At {
        parser.advance();
        let type_name = parser
            .expect_detailed(TokenKind::TypeId, "expected class name after `@`")?
            .value;
        Some(type_name)
    } else {
        None
    };

    parser.expect(TokenKind::Dot)?;
    let method = parser
        .expect_detailed(TokenKind::ObjectId, "expected method name after `.`")?
        .value;
    let arguments = parse_arguments(parser)?;

    let start = left.span.start.clone();
    Ok(Expr::new(
        ExprKind::MethodCall {
            receiver: Box::new(left),
            static_type,
            method,
            arguments,
        },
        parser.span_from(start),
    ))
}

/// `( [expr (, expr)*] )`
fn parse_arguments(parser: &mut Parser) -> Result<Vec<Expr>, Error> {
    parser.expect(TokenKind::OpenParen)?;

    let mut arguments = vec![];
    while parser.current_token_kind() != TokenKind::CloseParen {
        if !arguments.is_empty() {
            parser.expect(TokenKind::Comma)?;
        }
        arguments.push(parse_expr(parser, BindingPower::Default)?);
    }

    parser.expect(TokenKind::CloseParen)?;
    Ok(arguments)
}
