use crate::{
    ast::{
        ast::Expr,
        expressions::{
            AssignmentExpr, BinaryExpr, CallExpr, LiteralExpr, NameExpr, ParenthesizedExpr,
            PrefixExpr,
        },
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
    symbols::value::Value,
    Span,
};

use super::{lookups::BindingPower, parser::Parser};

pub fn parse_expr(parser: &mut Parser, bp: BindingPower) -> Result<Expr, Error> {
    // First parse NUD
    let token_kind = parser.current_token_kind();
    let nud = match parser.get_nud_lookup().get(&token_kind) {
        Some(nud) => *nud,
        None => {
            return Err(Error::new(
                ErrorImpl::ExpectedExpression { found: token_kind },
                parser.get_position(),
            ))
        }
    };

    let mut left = nud(parser)?;

    // While the current token binds tighter than the caller, keep extending lhs
    loop {
        let token_kind = parser.current_token_kind();
        let token_bp = match parser.get_bp_lookup().get(&token_kind) {
            Some(token_bp) if *token_bp > bp => *token_bp,
            _ => break,
        };

        let led = match parser.get_led_lookup().get(&token_kind) {
            Some(led) => *led,
            None => break,
        };

        left = led(parser, left, token_bp)?;
    }

    Ok(left)
}

pub fn parse_primary_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let token = parser.advance().clone();

    let value = match token.kind {
        TokenKind::Number => match token.value.parse::<i32>() {
            Ok(number) => Value::Int(number),
            Err(_) => {
                return Err(Error::new(
                    ErrorImpl::NumberParseError {
                        token: token.value.clone(),
                    },
                    token.span.start.clone(),
                ))
            }
        },
        TokenKind::String => Value::String(token.value.clone()),
        TokenKind::True => Value::Bool(true),
        TokenKind::False => Value::Bool(false),
        _ => {
            return Err(Error::new(
                ErrorImpl::ExpectedExpression { found: token.kind },
                token.span.start.clone(),
            ))
        }
    };

    Ok(Expr::Literal(LiteralExpr { token, value }))
}

/// An identifier directly followed by `(` is a call, otherwise a variable read.
pub fn parse_name_or_call_expr(parser: &mut Parser) -> Result<Expr, Error> {
    if parser.peek_kind(1) == TokenKind::OpenParen {
        return parse_call_expr(parser);
    }

    let identifier = parser.advance().clone();
    Ok(Expr::Name(NameExpr { identifier }))
}

pub fn parse_binary_expr(parser: &mut Parser, left: Expr, bp: BindingPower) -> Result<Expr, Error> {
    let operator = parser.advance().clone();

    let right = parse_expr(parser, bp)?;

    Ok(Expr::Binary(BinaryExpr {
        span: Span::from_bounds(left.get_span(), right.get_span()),
        left: Box::new(left),
        operator,
        right: Box::new(right),
    }))
}

pub fn parse_prefix_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let operator = parser.advance().clone();
    let operand = parse_expr(parser, BindingPower::Unary)?;

    Ok(Expr::Prefix(PrefixExpr {
        span: Span::from_bounds(&operator.span, operand.get_span()),
        operator,
        operand: Box::new(operand),
    }))
}

pub fn parse_assignment_expr(parser: &mut Parser, left: Expr, _bp: BindingPower) -> Result<Expr, Error> {
    let identifier = match left {
        Expr::Name(name) => name.identifier,
        other => {
            return Err(Error::new(
                ErrorImpl::InvalidAssignmentTarget,
                other.get_span().start.clone(),
            ))
        }
    };

    let equals = parser.advance().clone();
    // Parsing the value below assignment strength makes `a = b = c` group to the right
    let value = parse_expr(parser, BindingPower::Default)?;

    Ok(Expr::Assignment(AssignmentExpr {
        span: Span::from_bounds(&identifier.span, value.get_span()),
        identifier,
        equals,
        value: Box::new(value),
    }))
}

pub fn parse_grouping_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let open = parser.advance().clone();
    let expression = parse_expr(parser, BindingPower::Default)?;
    let close = parser.expect(TokenKind::CloseParen)?;

    Ok(Expr::Parenthesized(ParenthesizedExpr {
        span: Span::from_bounds(&open.span, &close.span),
        expression: Box::new(expression),
    }))
}

pub fn parse_call_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let identifier = parser.expect(TokenKind::Identifier)?;
    parser.expect(TokenKind::OpenParen)?;

    let mut arguments = vec![];
    let mut separators = vec![];

    if parser.current_token_kind() != TokenKind::CloseParen {
        loop {
            arguments.push(parse_expr(parser, BindingPower::Default)?);

            if parser.current_token_kind() == TokenKind::Comma {
                separators.push(parser.advance().clone());
            } else {
                break;
            }
        }
    }

    let close_paren = parser.expect(TokenKind::CloseParen)?;

    Ok(Expr::Call(CallExpr {
        span: Span::from_bounds(&identifier.span, &close_paren.span),
        identifier,
        arguments,
        separators,
        close_paren,
    }))
}
