//! Type name parsing.
//!
//! Type names are identifiers with an optional generic argument list,
//! e.g. `int` or `Map<string, List<int>>`. The lexer has no `>>` token, so
//! nested argument lists close one `>` at a time.

use crate::{errors::errors::Error, lexer::tokens::TokenKind};

use super::{
    parser::Parser,
    tree::{ParseNode, Rule},
};

pub fn parse_type_name(parser: &mut Parser) -> Result<ParseNode, Error> {
    let mut node = parser.start(Rule::TypeName);

    node.push_token(parser.expect_detailed(TokenKind::Identifier, "expected type name")?);

    if parser.current_token_kind() == TokenKind::Less {
        node.push_token(parser.advance());
        node.push_rule(parser.nested(parse_type_name)?);

        while parser.current_token_kind() == TokenKind::Comma {
            node.push_token(parser.advance());
            node.push_rule(parser.nested(parse_type_name)?);
        }

        node.push_token(parser.expect_detailed(
            TokenKind::Greater,
            "expected `>` after type arguments",
        )?);
    }

    Ok(node)
}
