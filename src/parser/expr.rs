use crate::{
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
};

use super::{
    parser::Parser,
    tree::{ParseNode, Rule},
};

pub const ADDITIVE: [TokenKind; 2] = [TokenKind::Plus, TokenKind::Dash];
pub const MULTIPLICATIVE: [TokenKind; 2] = [TokenKind::Star, TokenKind::Slash];
pub const EQUALITY: [TokenKind; 2] = [TokenKind::Equals, TokenKind::NotEquals];
pub const RELATIONAL: [TokenKind; 4] = [
    TokenKind::Less,
    TokenKind::LessEquals,
    TokenKind::Greater,
    TokenKind::GreaterEquals,
];

fn at_one_of(parser: &Parser, kinds: &[TokenKind]) -> bool {
    kinds.contains(&parser.current_token_kind())
}

/// Parses `operand (op operand)*` as a single `rule` node.
fn parse_chain(
    parser: &mut Parser,
    rule: Rule,
    operators: &[TokenKind],
    operand: fn(&mut Parser) -> Result<ParseNode, Error>,
) -> Result<ParseNode, Error> {
    let mut node = parser.start(rule);

    node.push_rule(operand(parser)?);
    while at_one_of(parser, operators) {
        node.push_token(parser.advance());
        node.push_rule(operand(parser)?);
    }

    Ok(node)
}

/// Parses `operand (op operand)?` as a single `rule` node.
fn parse_single(
    parser: &mut Parser,
    rule: Rule,
    operators: &[TokenKind],
    operand: fn(&mut Parser) -> Result<ParseNode, Error>,
) -> Result<ParseNode, Error> {
    let mut node = parser.start(rule);

    node.push_rule(operand(parser)?);
    if at_one_of(parser, operators) {
        node.push_token(parser.advance());
        node.push_rule(operand(parser)?);
    }

    Ok(node)
}

pub fn parse_logic(parser: &mut Parser) -> Result<ParseNode, Error> {
    let mut node = parser.start(Rule::Logic);
    node.push_rule(parse_or(parser)?);
    Ok(node)
}

pub fn parse_or(parser: &mut Parser) -> Result<ParseNode, Error> {
    parse_chain(parser, Rule::Or, &[TokenKind::Or], parse_and)
}

pub fn parse_and(parser: &mut Parser) -> Result<ParseNode, Error> {
    parse_chain(parser, Rule::And, &[TokenKind::And], parse_equality)
}

pub fn parse_equality(parser: &mut Parser) -> Result<ParseNode, Error> {
    parse_single(parser, Rule::Equality, &EQUALITY, parse_relational)
}

pub fn parse_relational(parser: &mut Parser) -> Result<ParseNode, Error> {
    parse_single(parser, Rule::Relational, &RELATIONAL, parse_expression)
}

pub fn parse_expression(parser: &mut Parser) -> Result<ParseNode, Error> {
    parse_chain(parser, Rule::Expression, &ADDITIVE, parse_term)
}

pub fn parse_term(parser: &mut Parser) -> Result<ParseNode, Error> {
    parse_chain(parser, Rule::Term, &MULTIPLICATIVE, parse_factor)
}

pub fn parse_factor(parser: &mut Parser) -> Result<ParseNode, Error> {
    let mut node = parser.start(Rule::Factor);

    match parser.current_token_kind() {
        TokenKind::OpenParen => {
            node.push_token(parser.advance());
            node.push_rule(parser.nested(parse_expression)?);
            node.push_token(parser.expect_detailed(
                TokenKind::CloseParen,
                "expected `)` to close group",
            )?);
        }
        TokenKind::Identifier if parser.peek(1).kind == TokenKind::OpenParen => {
            node.push_rule(parser.nested(parse_method_call)?);
        }
        TokenKind::Identifier => {
            node.push_token(parser.advance());
        }
        TokenKind::Number => {
            let token = parser.current_token();
            if token.value.parse::<i64>().is_err() {
                return Err(Error::new(
                    ErrorImpl::NumberParseError {
                        token: token.value.clone(),
                    },
                    parser.get_position(),
                ));
            }
            node.push_token(parser.advance());
        }
        _ => {
            return Err(Error::new(
                ErrorImpl::UnexpectedToken {
                    token: parser.current_token().value.clone(),
                },
                parser.get_position(),
            ))
        }
    }

    Ok(node)
}

pub fn parse_method_call(parser: &mut Parser) -> Result<ParseNode, Error> {
    let mut node = parser.start(Rule::MethodCall);

    node.push_token(parser.expect(TokenKind::Identifier)?);
    node.push_token(parser.expect(TokenKind::OpenParen)?);

    if parser.current_token_kind() != TokenKind::CloseParen {
        node.push_rule(parse_expression(parser)?);

        while parser.current_token_kind() == TokenKind::Comma {
            node.push_token(parser.advance());
            node.push_rule(parse_expression(parser)?);
        }
    }

    node.push_token(parser.expect_detailed(TokenKind::CloseParen, "expected `)` after arguments")?);
    Ok(node)
}
