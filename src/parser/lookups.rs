use std::collections::HashMap;

use crate::{errors::errors::Error, lexer::tokens::TokenKind};

use super::{decl::*, parser::Parser, stmt::*, tree::ParseNode};

pub type DeclHandler = fn(&mut Parser) -> Result<ParseNode, Error>;
pub type StmtHandler = fn(&mut Parser) -> Result<ParseNode, Error>;

pub fn create_token_lookups(parser: &mut Parser) {
    // Declarations
    parser.decl(TokenKind::Type, parse_type_declaration);
    parser.decl(TokenKind::Method, parse_method_declaration);
    parser.decl(TokenKind::Concept, parse_concept_declaration);

    // Statements
    parser.stmt(TokenKind::If, parse_if_statement);
    parser.stmt(TokenKind::OpenCurly, parse_block);
    parser.stmt(TokenKind::Semicolon, parse_placeholder);
}

// Lookup tables inside parser struct, so it's easier
pub type DeclLookup = HashMap<TokenKind, DeclHandler>;
pub type StmtLookup = HashMap<TokenKind, StmtHandler>;
