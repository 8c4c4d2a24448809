use crate::{errors::errors::Error, lexer::tokens::TokenKind};

use super::{
    decl::parse_variable_declaration,
    expr::{parse_expression, parse_logic},
    parser::Parser,
    tree::{ParseNode, Rule},
};

/// A body position starting `ID ID` or `ID <` holds a variable declaration.
///
/// Expression statements never contain relational operators, so `a < b`
/// cannot start one.
pub fn at_variable_declaration(parser: &Parser) -> bool {
    parser.current_token_kind() == TokenKind::Identifier
        && matches!(parser.peek(1).kind, TokenKind::Identifier | TokenKind::Less)
}

/// Parses `(variable_declaration | statement)*` up to the closing `}` into `node`.
pub fn parse_body_items(parser: &mut Parser, node: &mut ParseNode) -> Result<(), Error> {
    while !matches!(parser.current_token_kind(), TokenKind::CloseCurly | TokenKind::EOF) {
        if at_variable_declaration(parser) {
            node.push_rule(parse_variable_declaration(parser)?);
        } else {
            node.push_rule(parse_statement(parser)?);
        }
    }

    Ok(())
}

pub fn parse_statement(parser: &mut Parser) -> Result<ParseNode, Error> {
    let mut node = parser.start(Rule::Statement);

    if let Some(handler) = parser.get_stmt_lookup().get(&parser.current_token_kind()).copied() {
        node.push_rule(handler(parser)?);
        return Ok(node);
    }

    node.push_rule(parse_expression(parser)?);
    node.push_token(parser.expect(TokenKind::Semicolon)?);

    Ok(node)
}

pub fn parse_placeholder(parser: &mut Parser) -> Result<ParseNode, Error> {
    let mut node = parser.start(Rule::Placeholder);
    node.push_token(parser.expect(TokenKind::Semicolon)?);
    Ok(node)
}

pub fn parse_block(parser: &mut Parser) -> Result<ParseNode, Error> {
    parser.nested(|parser| {
        let mut node = parser.start(Rule::Block);

        node.push_token(parser.expect(TokenKind::OpenCurly)?);
        parse_body_items(parser, &mut node)?;
        node.push_token(parser.expect_detailed(
            TokenKind::CloseCurly,
            "expected `}` to close block",
        )?);

        Ok(node)
    })
}

pub fn parse_if_statement(parser: &mut Parser) -> Result<ParseNode, Error> {
    let mut node = parser.start(Rule::IfStatement);

    node.push_token(parser.expect(TokenKind::If)?);
    node.push_token(parser.expect_detailed(TokenKind::OpenParen, "expected `(` before condition")?);
    node.push_rule(parse_logic(parser)?);
    node.push_token(parser.expect_detailed(TokenKind::CloseParen, "expected `)` after condition")?);

    if parser.current_token_kind() != TokenKind::OpenCurly {
        return Err(parser.unexpected("expected block after if condition"));
    }
    node.push_rule(parse_block(parser)?);

    Ok(node)
}
