use crate::{
    ast::{
        ast::Stmt,
        statements::{
            BlockStmt, BreakStmt, ContinueStmt, ExpressionStmt, FnDeclStmt, ForStmt, IfStmt,
            Parameter, ReturnStmt, VarDeclStmt, WhileStmt,
        },
    },
    errors::errors::Error,
    lexer::tokens::TokenKind,
    parser::{expr::parse_expr, lookups::BindingPower},
    Span,
};

use super::{
    parser::Parser,
    types::{parse_optional_type_clause, parse_type_clause},
};

pub fn parse_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let handler = parser.get_stmt_lookup().get(&parser.current_token_kind()).copied();
    if let Some(handler) = handler {
        return handler(parser);
    }

    let expression = parse_expr(parser, BindingPower::Default)?;

    Ok(Stmt::Expression(ExpressionStmt { expression }))
}

pub fn parse_var_decl_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let keyword = parser.advance().clone();
    let identifier = parser.expect(TokenKind::Identifier)?;
    let type_clause = parse_optional_type_clause(parser)?;

    parser.expect(TokenKind::Assignment)?;
    let initializer = parse_expr(parser, BindingPower::Default)?;

    Ok(Stmt::VarDecl(VarDeclStmt {
        span: Span::from_bounds(&keyword.span, initializer.get_span()),
        keyword,
        identifier,
        type_clause,
        initializer,
    }))
}

pub fn parse_if_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let keyword = parser.advance().clone();

    let condition = parse_expr(parser, BindingPower::Default)?;
    let then_body = parse_stmt(parser)?;

    let else_body = if parser.current_token_kind() == TokenKind::Else {
        parser.advance();
        Some(Box::new(parse_stmt(parser)?))
    } else {
        None
    };

    let end = match &else_body {
        Some(else_body) => else_body.get_span(),
        None => then_body.get_span(),
    };

    Ok(Stmt::If(IfStmt {
        span: Span::from_bounds(&keyword.span, end),
        condition,
        then_body: Box::new(then_body),
        else_body,
    }))
}

pub fn parse_while_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let keyword = parser.advance().clone();

    let condition = parse_expr(parser, BindingPower::Default)?;
    let body = parse_stmt(parser)?;

    Ok(Stmt::While(WhileStmt {
        span: Span::from_bounds(&keyword.span, body.get_span()),
        condition,
        body: Box::new(body),
    }))
}

pub fn parse_for_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    // for i in 1..10 body
    let keyword = parser.advance().clone();

    let identifier = parser.expect(TokenKind::Identifier)?;
    parser.expect(TokenKind::In)?;
    let lower_bound = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::DotDot)?;
    let upper_bound = parse_expr(parser, BindingPower::Default)?;
    let body = parse_stmt(parser)?;

    Ok(Stmt::For(ForStmt {
        span: Span::from_bounds(&keyword.span, body.get_span()),
        identifier,
        lower_bound,
        upper_bound,
        body: Box::new(body),
    }))
}

pub fn parse_break_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let keyword = parser.advance().clone();
    Ok(Stmt::Break(BreakStmt { keyword }))
}

pub fn parse_continue_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let keyword = parser.advance().clone();
    Ok(Stmt::Continue(ContinueStmt { keyword }))
}

pub fn parse_block(parser: &mut Parser) -> Result<BlockStmt, Error> {
    let open = parser.expect(TokenKind::OpenCurly)?;

    let mut body = Vec::new();
    while parser.current_token_kind() != TokenKind::CloseCurly && parser.has_tokens() {
        body.push(parse_stmt(parser)?);
    }

    let close = parser.expect(TokenKind::CloseCurly)?;

    Ok(BlockStmt {
        body,
        span: Span::from_bounds(&open.span, &close.span),
    })
}

pub fn parse_block_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    Ok(Stmt::Block(parse_block(parser)?))
}

pub fn parse_fn_decl_stmt(parser: &mut Parser) -> Result<FnDeclStmt, Error> {
    let keyword = parser.expect(TokenKind::Func)?;

    let identifier = parser.expect(TokenKind::Identifier)?;

    parser.expect(TokenKind::OpenParen)?;

    let mut parameters = Vec::new();
    if parser.current_token_kind() != TokenKind::CloseParen {
        loop {
            let name = parser.expect(TokenKind::Identifier)?;
            let type_clause = parse_type_clause(parser)?;
            parameters.push(Parameter {
                span: Span::from_bounds(&name.span, &type_clause.span),
                identifier: name,
                type_clause,
            });

            if parser.current_token_kind() == TokenKind::Comma {
                parser.advance();
            } else {
                break;
            }
        }
    }

    parser.expect(TokenKind::CloseParen)?;

    let return_type = parse_optional_type_clause(parser)?;
    let body = parse_block(parser)?;

    Ok(FnDeclStmt {
        span: Span::from_bounds(&keyword.span, &body.span),
        identifier,
        parameters,
        return_type,
        body,
    })
}

/// `return` only takes a value that starts on the same line as the keyword.
pub fn parse_return_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let keyword = parser.advance().clone();

    let current = parser.current_token();
    let same_line = current.line == keyword.line
        && !matches!(current.kind, TokenKind::EOF | TokenKind::CloseCurly);

    let value = if same_line {
        Some(parse_expr(parser, BindingPower::Default)?)
    } else {
        None
    };

    let span = match &value {
        Some(value) => Span::from_bounds(&keyword.span, value.get_span()),
        None => keyword.span.clone(),
    };

    Ok(Stmt::Return(ReturnStmt {
        keyword,
        value,
        span,
    }))
}
