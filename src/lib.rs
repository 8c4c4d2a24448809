#![allow(clippy::module_inception)]

use std::rc::Rc;

use tracing::debug;

use crate::{
    ast::ast::Program,
    errors::errors::{Error, ErrorTip},
    lexer::lexer::tokenize,
    parser::{parser::parse, tree::ParseNode, walker::walk},
    reducer::reducer::AstReducer,
};

pub mod ast;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod parser;
pub mod reducer;

extern crate regex;

#[derive(Debug, Clone, PartialEq)]
pub struct Position(pub u32, pub Rc<String>);

impl Position {
    pub fn null() -> Self {
        Position(0, Rc::new(String::from("<null>")))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

/// Tokenizes, parses and reduces `source` into a [`Program`].
///
/// `file` is only used to label positions in errors.
pub fn parse_program(source: &str, file: &str) -> Result<Program, Error> {
    let tokens = tokenize(String::from(source), Some(String::from(file)))?;
    debug!(file, tokens = tokens.len(), "tokenized source");

    let tree = parse(tokens, Rc::new(String::from(file)))?;
    reduce(&tree)
}

/// Walks an already-built parse tree with a fresh reducer.
///
/// Walking the same tree twice yields structurally equal programs.
pub fn reduce(tree: &ParseNode) -> Result<Program, Error> {
    let mut reducer = AstReducer::new();
    walk(&mut reducer, tree)?;
    let program = reducer.finish()?;
    debug!(declarations = program.body.len(), "reduced parse tree");
    Ok(program)
}

/// Finds the 1-based line containing byte offset `position`, the text of that
/// line, and the offset of `position` within it.
pub fn get_line_at_position(source: &str, position: u32) -> Option<(usize, String, usize)> {
    let pos = position as usize;
    let mut start = 0;

    for (index, line) in source.split_inclusive('\n').enumerate() {
        let end = start + line.len();

        if (start..end).contains(&pos) {
            return Some((index + 1, line.to_string(), pos - start));
        }

        start = end;
    }

    // EOF errors point one past the last character
    if pos == source.len() {
        let line_number = source.split_inclusive('\n').count().max(1);
        let line = source.split_inclusive('\n').last().unwrap_or("").to_string();
        let line_pos = line.len();
        return Some((line_number, line, line_pos));
    }

    None
}

pub fn render_error(error: &Error, source: &str, file: &str) -> String {
    /*
        error: message
        -> final.exp
           |
        20 | int a = #;
           | --------^
    */

    let mut rendered = String::new();

    if let ErrorTip::None = error.get_tip() {
        rendered.push_str(&format!("Error: {}\n", error.get_error_name()));
    } else {
        rendered.push_str(&format!("Error: {} ({})\n", error.get_error_name(), error.get_tip()));
    }
    rendered.push_str(&format!("-> {}\n", file));

    // Errors raised outside the source text carry no excerpt
    if *error.get_position() == Position::null() {
        return rendered;
    }

    let Some((line, line_text, line_pos)) = get_line_at_position(source, error.get_position().0)
    else {
        return rendered;
    };

    let line_string = line.to_string();
    let padding = line_string.len() + 2;

    rendered.push_str(&format!("{:>padding$}\n", "|"));

    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(&line_text);
    rendered.push_str(&format!("{} | {}\n", line_string, line_text_removed.trim_end()));

    let arrows = line_pos.saturating_sub(removed_whitespace) + 1;

    rendered.push_str(&format!("{:>padding$} {:->arrows$}\n", "|", "^"));
    rendered
}

fn remove_starting_whitespace(string: &str) -> (String, usize) {
    let start = string.chars().take_while(|c| *c == ' ' || *c == '\t').count();

    (String::from(&string[start..]), start)
}
