//! Concrete parse tree produced by the parser.
//!
//! Every grammar rule that matched becomes a [`ParseNode`] holding its
//! children in source order: nested rule nodes and the raw tokens the rule
//! consumed directly. The reducer only ever reads the tree through the
//! accessors defined here.

use std::{fmt::Display, rc::Rc};

use crate::{
    lexer::tokens::{Token, TokenKind},
    Position, Span,
};

/// Grammar rules, one per parse-event kind.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Rule {
    Program,
    TypeDeclaration,
    GenericParameters,
    GenericParameter,
    TypeBody,
    MethodDeclaration,
    Params,
    MethodBody,
    VariableDeclaration,
    ConceptDeclaration,
    Constraint,
    TypeName,
    Statement,
    Placeholder,
    Block,
    IfStatement,
    Logic,
    Or,
    And,
    Equality,
    Relational,
    Expression,
    Term,
    Factor,
    MethodCall,
}

impl Rule {
    /// The grammar name of the rule.
    pub fn name(&self) -> &'static str {
        match self {
            Rule::Program => "program",
            Rule::TypeDeclaration => "type_declaration",
            Rule::GenericParameters => "generic_parameters",
            Rule::GenericParameter => "generic_parameter",
            Rule::TypeBody => "type_body",
            Rule::MethodDeclaration => "method_declaration",
            Rule::Params => "params",
            Rule::MethodBody => "method_body",
            Rule::VariableDeclaration => "variable_declaration",
            Rule::ConceptDeclaration => "concept_declaration",
            Rule::Constraint => "constraint",
            Rule::TypeName => "type_name",
            Rule::Statement => "statement",
            Rule::Placeholder => "placeholder",
            Rule::Block => "block",
            Rule::IfStatement => "if_statement",
            Rule::Logic => "logic",
            Rule::Or => "or",
            Rule::And => "and",
            Rule::Equality => "equality",
            Rule::Relational => "relational",
            Rule::Expression => "expression",
            Rule::Term => "term",
            Rule::Factor => "factor",
            Rule::MethodCall => "method_call",
        }
    }
}

impl Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ParseChild {
    Rule(ParseNode),
    Token(Token),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParseNode {
    pub rule: Rule,
    pub children: Vec<ParseChild>,
    pub span: Span,
}

impl ParseNode {
    pub fn new(rule: Rule, start: Position) -> Self {
        ParseNode {
            rule,
            children: vec![],
            span: Span {
                end: start.clone(),
                start,
            },
        }
    }

    pub fn push_token(&mut self, token: Token) {
        self.extend_span(&token.span);
        self.children.push(ParseChild::Token(token));
    }

    pub fn push_rule(&mut self, node: ParseNode) {
        self.extend_span(&node.span);
        self.children.push(ParseChild::Rule(node));
    }

    fn extend_span(&mut self, span: &Span) {
        if self.children.is_empty() {
            self.span.start = span.start.clone();
        }
        self.span.end = span.end.clone();
    }

    pub fn start(&self) -> Position {
        self.span.start.clone()
    }

    pub fn file(&self) -> Rc<String> {
        Rc::clone(&self.span.start.1)
    }

    /// Direct child nodes matching `rule`, in source order.
    pub fn rules(&self, rule: Rule) -> impl Iterator<Item = &ParseNode> {
        self.children.iter().filter_map(move |child| match child {
            ParseChild::Rule(node) if node.rule == rule => Some(node),
            _ => None,
        })
    }

    pub fn rule_count(&self, rule: Rule) -> usize {
        self.rules(rule).count()
    }

    pub fn has_rule(&self, rule: Rule) -> bool {
        self.first_rule(rule).is_some()
    }

    pub fn first_rule(&self, rule: Rule) -> Option<&ParseNode> {
        self.rules(rule).next()
    }

    /// Direct child tokens of `kind`, in source order.
    pub fn tokens(&self, kind: TokenKind) -> impl Iterator<Item = &Token> {
        self.children.iter().filter_map(move |child| match child {
            ParseChild::Token(token) if token.kind == kind => Some(token),
            _ => None,
        })
    }

    pub fn token(&self, kind: TokenKind) -> Option<&Token> {
        self.tokens(kind).next()
    }

    /// Direct child tokens whose kind is one of `kinds`, in source order.
    pub fn operator_tokens<'a>(
        &'a self,
        kinds: &'a [TokenKind],
    ) -> impl Iterator<Item = &'a Token> {
        self.children.iter().filter_map(move |child| match child {
            ParseChild::Token(token) if token.is_one_of_many(kinds) => Some(token),
            _ => None,
        })
    }

    /// Raw text of the subtree, tokens concatenated without separators.
    pub fn text(&self) -> String {
        let mut text = String::new();
        self.collect_text(&mut text);
        text
    }

    fn collect_text(&self, text: &mut String) {
        for child in &self.children {
            match child {
                ParseChild::Rule(node) => node.collect_text(text),
                ParseChild::Token(token) => text.push_str(&token.value),
            }
        }
    }
}
