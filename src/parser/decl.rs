use crate::{errors::errors::Error, lexer::tokens::TokenKind};

use super::{
    expr::parse_expression,
    parser::Parser,
    stmt::parse_body_items,
    tree::{ParseNode, Rule},
    types::parse_type_name,
};

pub fn parse_program(parser: &mut Parser) -> Result<ParseNode, Error> {
    let mut program = parser.start(Rule::Program);

    while parser.has_tokens() {
        program.push_rule(parse_declaration(parser)?);
    }

    Ok(program)
}

pub fn parse_declaration(parser: &mut Parser) -> Result<ParseNode, Error> {
    if let Some(handler) = parser.get_decl_lookup().get(&parser.current_token_kind()).copied() {
        return handler(parser);
    }

    if parser.current_token_kind() != TokenKind::Identifier {
        return Err(parser.unexpected("expected a type, method, concept or variable declaration"));
    }

    parse_variable_declaration(parser)
}

pub fn parse_type_declaration(parser: &mut Parser) -> Result<ParseNode, Error> {
    let mut node = parser.start(Rule::TypeDeclaration);

    node.push_token(parser.expect(TokenKind::Type)?);
    node.push_token(parser.expect_detailed(TokenKind::Identifier, "expected type name")?);

    if parser.current_token_kind() == TokenKind::Less {
        node.push_rule(parse_generic_parameters(parser)?);
    }

    if parser.current_token_kind() == TokenKind::OpenCurly {
        node.push_rule(parse_type_body(parser)?);
    } else {
        node.push_token(parser.expect_detailed(TokenKind::Semicolon, "expected type body or `;`")?);
    }

    Ok(node)
}

pub fn parse_generic_parameters(parser: &mut Parser) -> Result<ParseNode, Error> {
    let mut node = parser.start(Rule::GenericParameters);

    node.push_token(parser.expect(TokenKind::Less)?);
    node.push_rule(parse_generic_parameter(parser)?);

    while parser.current_token_kind() == TokenKind::Comma {
        node.push_token(parser.advance());
        node.push_rule(parse_generic_parameter(parser)?);
    }

    node.push_token(parser.expect_detailed(
        TokenKind::Greater,
        "expected `>` after generic parameters",
    )?);
    Ok(node)
}

pub fn parse_generic_parameter(parser: &mut Parser) -> Result<ParseNode, Error> {
    let mut node = parser.start(Rule::GenericParameter);

    node.push_token(parser.expect_detailed(TokenKind::Identifier, "expected type variable")?);

    if parser.current_token_kind() == TokenKind::Colon {
        node.push_token(parser.advance());
        node.push_token(parser.expect_detailed(TokenKind::Identifier, "expected concept name")?);

        while parser.current_token_kind() == TokenKind::Plus {
            node.push_token(parser.advance());
            node.push_token(parser.expect_detailed(
                TokenKind::Identifier,
                "expected concept name",
            )?);
        }
    }

    Ok(node)
}

pub fn parse_type_body(parser: &mut Parser) -> Result<ParseNode, Error> {
    let mut node = parser.start(Rule::TypeBody);

    node.push_token(parser.expect(TokenKind::OpenCurly)?);

    while !matches!(parser.current_token_kind(), TokenKind::CloseCurly | TokenKind::EOF) {
        let member = match parser.current_token_kind() {
            TokenKind::Type => parser.nested(parse_type_declaration)?,
            TokenKind::Method => parse_method_declaration(parser)?,
            TokenKind::Identifier => parse_variable_declaration(parser)?,
            _ => return Err(parser.unexpected("expected a type member")),
        };
        node.push_rule(member);
    }

    node.push_token(parser.expect_detailed(
        TokenKind::CloseCurly,
        "expected `}` to close type body",
    )?);
    Ok(node)
}

pub fn parse_method_declaration(parser: &mut Parser) -> Result<ParseNode, Error> {
    let mut node = parser.start(Rule::MethodDeclaration);

    node.push_token(parser.expect(TokenKind::Method)?);
    node.push_token(parser.expect_detailed(TokenKind::Identifier, "expected method name")?);
    node.push_token(parser.expect(TokenKind::OpenParen)?);
    node.push_rule(parse_params(parser)?);
    node.push_token(parser.expect_detailed(
        TokenKind::CloseParen,
        "expected `)` after parameters",
    )?);

    if parser.current_token_kind() == TokenKind::OpenCurly {
        node.push_rule(parse_method_body(parser)?);
    } else {
        node.push_token(parser.expect_detailed(
            TokenKind::Semicolon,
            "expected method body or `;`",
        )?);
    }

    Ok(node)
}

pub fn parse_params(parser: &mut Parser) -> Result<ParseNode, Error> {
    let mut node = parser.start(Rule::Params);

    if parser.current_token_kind() == TokenKind::CloseParen {
        return Ok(node);
    }

    node.push_rule(parse_type_name(parser)?);
    node.push_token(parser.expect_detailed(TokenKind::Identifier, "expected parameter name")?);

    while parser.current_token_kind() == TokenKind::Comma {
        node.push_token(parser.advance());
        node.push_rule(parse_type_name(parser)?);
        node.push_token(parser.expect_detailed(TokenKind::Identifier, "expected parameter name")?);
    }

    Ok(node)
}

pub fn parse_method_body(parser: &mut Parser) -> Result<ParseNode, Error> {
    let mut node = parser.start(Rule::MethodBody);

    node.push_token(parser.expect(TokenKind::OpenCurly)?);
    parse_body_items(parser, &mut node)?;
    node.push_token(parser.expect_detailed(
        TokenKind::CloseCurly,
        "expected `}` to close method body",
    )?);

    Ok(node)
}

pub fn parse_variable_declaration(parser: &mut Parser) -> Result<ParseNode, Error> {
    let mut node = parser.start(Rule::VariableDeclaration);

    node.push_rule(parse_type_name(parser)?);
    node.push_token(parser.expect_detailed(
        TokenKind::Identifier,
        "expected identifier during variable declaration",
    )?);

    if parser.current_token_kind() == TokenKind::Assignment {
        node.push_token(parser.advance());
        node.push_rule(parse_expression(parser)?);
    }

    node.push_token(parser.expect(TokenKind::Semicolon)?);
    Ok(node)
}

pub fn parse_concept_declaration(parser: &mut Parser) -> Result<ParseNode, Error> {
    let mut node = parser.start(Rule::ConceptDeclaration);

    node.push_token(parser.expect(TokenKind::Concept)?);
    node.push_token(parser.expect_detailed(TokenKind::Identifier, "expected concept name")?);
    node.push_token(parser.expect_detailed(TokenKind::Less, "expected `<` before type variable")?);
    node.push_token(parser.expect_detailed(TokenKind::Identifier, "expected type variable")?);
    node.push_token(parser.expect_detailed(
        TokenKind::Greater,
        "expected `>` after type variable",
    )?);

    if parser.current_token_kind() == TokenKind::Requires {
        node.push_token(parser.advance());
        node.push_rule(parse_constraint(parser)?);

        while parser.current_token_kind() == TokenKind::Comma {
            node.push_token(parser.advance());
            node.push_rule(parse_constraint(parser)?);
        }
    }

    node.push_token(parser.expect(TokenKind::Semicolon)?);
    Ok(node)
}

pub fn parse_constraint(parser: &mut Parser) -> Result<ParseNode, Error> {
    let mut node = parser.start(Rule::Constraint);

    node.push_token(parser.expect_detailed(TokenKind::Identifier, "expected concept name")?);
    node.push_token(parser.expect_detailed(TokenKind::Less, "expected `<` after concept name")?);
    node.push_rule(parse_type_name(parser)?);

    while parser.current_token_kind() == TokenKind::Comma {
        node.push_token(parser.advance());
        node.push_rule(parse_type_name(parser)?);
    }

    node.push_token(parser.expect_detailed(
        TokenKind::Greater,
        "expected `>` after constraint arguments",
    )?);
    Ok(node)
}
