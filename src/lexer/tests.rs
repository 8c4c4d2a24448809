//! Unit tests for the lexer module.
//!
//! This module contains tests for tokenization including:
//! - Keywords and identifiers
//! - Integer literals
//! - Operators and punctuation
//! - Comments
//! - Error cases

use super::{lexer::tokenize, tokens::TokenKind};

fn kinds(source: &str) -> Vec<TokenKind> {
    tokenize(source.to_string(), Some("test.exp".to_string()))
        .unwrap()
        .iter()
        .map(|token| token.kind)
        .collect()
}

#[test]
fn test_tokenize_keywords() {
    assert_eq!(
        kinds("type method concept requires if"),
        vec![
            TokenKind::Type,
            TokenKind::Method,
            TokenKind::Concept,
            TokenKind::Requires,
            TokenKind::If,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_identifiers() {
    let source = "foo bar baz_123 _underscore CamelCase typed".to_string();
    let tokens = tokenize(source, Some("test.exp".to_string())).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::Identifier);
    assert_eq!(tokens[0].value, "foo");
    assert_eq!(tokens[2].value, "baz_123");
    assert_eq!(tokens[3].value, "_underscore");
    assert_eq!(tokens[4].value, "CamelCase");
    // keyword prefixes stay identifiers
    assert_eq!(tokens[5].kind, TokenKind::Identifier);
    assert_eq!(tokens[5].value, "typed");
    assert_eq!(tokens[6].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_numbers() {
    let source = "42 0 1000".to_string();
    let tokens = tokenize(source, Some("test.exp".to_string())).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::Number);
    assert_eq!(tokens[0].value, "42");
    assert_eq!(tokens[1].value, "0");
    assert_eq!(tokens[2].value, "1000");
    assert_eq!(tokens[3].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_operators() {
    assert_eq!(
        kinds("+ - * / == != < > <= >= = && ||"),
        vec![
            TokenKind::Plus,
            TokenKind::Dash,
            TokenKind::Star,
            TokenKind::Slash,
            TokenKind::Equals,
            TokenKind::NotEquals,
            TokenKind::Less,
            TokenKind::Greater,
            TokenKind::LessEquals,
            TokenKind::GreaterEquals,
            TokenKind::Assignment,
            TokenKind::And,
            TokenKind::Or,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_punctuation() {
    assert_eq!(
        kinds("{ } ( ) ; : ,"),
        vec![
            TokenKind::OpenCurly,
            TokenKind::CloseCurly,
            TokenKind::OpenParen,
            TokenKind::CloseParen,
            TokenKind::Semicolon,
            TokenKind::Colon,
            TokenKind::Comma,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_without_spaces() {
    assert_eq!(
        kinds("a<=b"),
        vec![TokenKind::Identifier, TokenKind::LessEquals, TokenKind::Identifier, TokenKind::EOF]
    );
}

#[test]
fn test_tokenize_comments() {
    let source = "int x = 1; // trailing comment\n// whole line\nint y;".to_string();
    let tokens = tokenize(source, Some("test.exp".to_string())).unwrap();

    let values: Vec<&str> = tokens.iter().map(|token| token.value.as_str()).collect();
    assert_eq!(values, vec!["int", "x", "=", "1", ";", "int", "y", ";", "EOF"]);
}

#[test]
fn test_token_spans() {
    let source = "method  run".to_string();
    let tokens = tokenize(source, Some("test.exp".to_string())).unwrap();

    assert_eq!(tokens[0].span.start.0, 0);
    assert_eq!(tokens[0].span.end.0, 6);
    assert_eq!(tokens[1].span.start.0, 8);
    assert_eq!(tokens[1].span.end.0, 11);
    assert_eq!(tokens[2].span.start.0, 11);
    assert_eq!(tokens[1].span.start.1.as_str(), "test.exp");
}

#[test]
fn test_tokenize_empty_source() {
    assert_eq!(kinds(""), vec![TokenKind::EOF]);
    assert_eq!(kinds("   \n\t "), vec![TokenKind::EOF]);
}

#[test]
fn test_unrecognised_token() {
    let result = tokenize("int x = 4 @ 2;".to_string(), Some("test.exp".to_string()));

    let error = result.unwrap_err();
    assert_eq!(error.get_error_name(), "UnrecognisedToken");
    assert_eq!(error.get_position().0, 10);
}

#[test]
fn test_default_file_name() {
    let tokens = tokenize("x".to_string(), None).unwrap();
    assert_eq!(tokens[0].span.start.1.as_str(), "shell");
}
