//! Parser implementation for building the concrete parse tree.
//!
//! This module contains the main Parser struct and the parse entry point.
//! The parser is a recursive-descent parser over the token stream; each
//! grammar rule has one parse function returning a [`ParseNode`].
//!
//! It maintains lookup tables for:
//! - Declaration handlers, keyed by leading keyword
//! - Statement handlers, keyed by leading token

use std::{collections::HashMap, rc::Rc};

use tracing::debug;

use crate::{
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Token, TokenKind},
    Position,
};

use super::{
    decl::parse_program,
    lookups::{create_token_lookups, DeclHandler, DeclLookup, StmtHandler, StmtLookup},
    tree::{ParseNode, Rule},
};

/// Deepest nesting of groups, calls, blocks, type bodies and type arguments.
///
/// The parser, the walker and the reducer all recurse once per level, so the
/// tree handed to them never exceeds this depth.
pub const MAX_NESTING: usize = 128;

/// The main parser structure that maintains parsing state.
///
/// This struct holds the token stream and the lookup tables for
/// declarations and statements. It tracks the current position in the
/// token stream and provides methods for token consumption.
pub struct Parser {
    /// The list of tokens to parse, always terminated by `EOF`
    tokens: Vec<Token>,
    /// Current position in the token stream
    pos: usize,
    /// Open nested constructs around the current position
    depth: usize,
    /// The name of the source file being parsed
    file: Rc<String>,
    /// Lookup table for declaration handlers
    decl_lookup: DeclLookup,
    /// Lookup table for statement handlers
    stmt_lookup: StmtLookup,
}

impl Parser {
    /// Creates a new Parser instance.
    ///
    /// An `EOF` token is appended when the stream does not already end in one,
    /// so lookahead never runs off the end.
    pub fn new(mut tokens: Vec<Token>, file: Rc<String>) -> Self {
        if tokens.last().map(|token| token.kind) != Some(TokenKind::EOF) {
            let end = tokens
                .last()
                .map(|token| token.span.end.clone())
                .unwrap_or_else(|| Position(0, Rc::clone(&file)));
            tokens.push(Token {
                kind: TokenKind::EOF,
                value: String::from("EOF"),
                span: crate::Span {
                    start: end.clone(),
                    end,
                },
            });
        }

        Parser {
            tokens,
            pos: 0,
            depth: 0,
            file,
            decl_lookup: HashMap::new(),
            stmt_lookup: HashMap::new(),
        }
    }

    /// Returns the current token without advancing.
    pub fn current_token(&self) -> &Token {
        self.peek(0)
    }

    /// Returns the kind of the current token.
    pub fn current_token_kind(&self) -> TokenKind {
        self.current_token().kind
    }

    /// Returns the token `offset` positions ahead, clamped to `EOF`.
    pub fn peek(&self, offset: usize) -> &Token {
        let last = self.tokens.len() - 1;
        &self.tokens[(self.pos + offset).min(last)]
    }

    /// Advances to the next token and returns the previous token.
    pub fn advance(&mut self) -> Token {
        let token = self.current_token().clone();
        if token.kind != TokenKind::EOF {
            self.pos += 1;
        }
        token
    }

    /// Expects a token of the specified kind, with optional custom error.
    ///
    /// # Returns
    ///
    /// Returns Ok(Token) if the current token matches, otherwise returns an Error.
    pub fn expect_error(
        &mut self,
        expected_kind: TokenKind,
        error: Option<Error>,
    ) -> Result<Token, Error> {
        let token = self.current_token();
        if token.kind != expected_kind {
            match error {
                Some(error) => Err(error),
                None => Err(Error::new(
                    ErrorImpl::UnexpectedToken {
                        token: token.value.clone(),
                    },
                    token.span.start.clone(),
                )),
            }
        } else {
            Ok(self.advance())
        }
    }

    /// Expects a token of the specified kind with default error message.
    pub fn expect(&mut self, expected_kind: TokenKind) -> Result<Token, Error> {
        self.expect_error(expected_kind, None)
    }

    /// Expects `expected_kind`, reporting `message` on mismatch.
    pub fn expect_detailed(
        &mut self,
        expected_kind: TokenKind,
        message: &str,
    ) -> Result<Token, Error> {
        let error = self.unexpected(message);
        self.expect_error(expected_kind, Some(error))
    }

    /// Builds an `UnexpectedTokenDetailed` error at the current token.
    pub fn unexpected(&self, message: &str) -> Error {
        Error::new(
            ErrorImpl::UnexpectedTokenDetailed {
                token: self.current_token().value.clone(),
                message: String::from(message),
            },
            self.get_position(),
        )
    }

    /// Runs `parse` one nesting level deeper, failing with `NestingTooDeep`
    /// past [`MAX_NESTING`].
    pub fn nested<T>(
        &mut self,
        parse: impl FnOnce(&mut Parser) -> Result<T, Error>,
    ) -> Result<T, Error> {
        if self.depth >= MAX_NESTING {
            return Err(Error::new(
                ErrorImpl::NestingTooDeep { limit: MAX_NESTING },
                self.get_position(),
            ));
        }

        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;
        result
    }

    /// Checks if there are more tokens to parse.
    pub fn has_tokens(&self) -> bool {
        self.current_token_kind() != TokenKind::EOF
    }

    /// Starts a node for `rule` at the current token.
    pub fn start(&self, rule: Rule) -> ParseNode {
        ParseNode::new(rule, self.get_position())
    }

    /// Returns a reference to the declaration lookup table.
    pub fn get_decl_lookup(&self) -> &DeclLookup {
        &self.decl_lookup
    }

    /// Returns a reference to the statement lookup table.
    pub fn get_stmt_lookup(&self) -> &StmtLookup {
        &self.stmt_lookup
    }

    /// Registers a declaration handler for a leading keyword.
    pub fn decl(&mut self, kind: TokenKind, decl_fn: DeclHandler) {
        self.decl_lookup.insert(kind, decl_fn);
    }

    /// Registers a statement handler for a leading token.
    pub fn stmt(&mut self, kind: TokenKind, stmt_fn: StmtHandler) {
        self.stmt_lookup.insert(kind, stmt_fn);
    }

    /// Returns the source position of the current token.
    pub fn get_position(&self) -> Position {
        self.current_token().span.start.clone()
    }

    pub fn get_file(&self) -> Rc<String> {
        Rc::clone(&self.file)
    }
}

/// Parses a stream of tokens into a concrete parse tree.
///
/// This is the main entry point for parsing. It creates a parser instance,
/// initializes the lookup tables, and parses declarations until EOF.
///
/// # Returns
///
/// The `program` node, or the first syntax error.
pub fn parse(tokens: Vec<Token>, file: Rc<String>) -> Result<ParseNode, Error> {
    let mut parser = Parser::new(tokens, file);
    create_token_lookups(&mut parser);

    let program = parse_program(&mut parser)?;
    debug!(file = %parser.get_file(), children = program.children.len(), "parsed program");
    Ok(program)
}
