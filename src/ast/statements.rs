use std::fmt::Write;

use serde::Serialize;

use super::{
    ast::{indent, BodyItem, Render},
    expressions::{Expression, Logic},
};

/// Explicit marker for an elided construct, e.g. the empty statement `;`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Placeholder;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Statement {
    pub body: StatementBody,
}

impl Statement {
    pub fn new(body: impl Into<StatementBody>) -> Self {
        Statement { body: body.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum StatementBody {
    Expression(Expression),
    If(IfStatement),
    Block(Block),
    Placeholder(Placeholder),
}

impl From<Expression> for StatementBody {
    fn from(value: Expression) -> Self {
        StatementBody::Expression(value)
    }
}

impl From<IfStatement> for StatementBody {
    fn from(value: IfStatement) -> Self {
        StatementBody::If(value)
    }
}

impl From<Block> for StatementBody {
    fn from(value: Block) -> Self {
        StatementBody::Block(value)
    }
}

impl From<Placeholder> for StatementBody {
    fn from(value: Placeholder) -> Self {
        StatementBody::Placeholder(value)
    }
}

impl Render for Statement {
    fn render(&self, depth: usize, out: &mut String) -> std::fmt::Result {
        match &self.body {
            StatementBody::Expression(expression) => {
                indent(depth, out)?;
                writeln!(out, "{};", expression)
            }
            StatementBody::If(statement) => statement.render(depth, out),
            StatementBody::Block(block) => {
                indent(depth, out)?;
                block.render(depth, out)?;
                writeln!(out)
            }
            StatementBody::Placeholder(_) => {
                indent(depth, out)?;
                writeln!(out, ";")
            }
        }
    }
}

/// A braced statement list.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Block {
    pub body: Vec<BodyItem>,
}

impl Block {
    pub fn new(body: Vec<BodyItem>) -> Self {
        Block { body }
    }
}

impl Render for Block {
    // Renders from the opening brace; the caller places it on a line
    fn render(&self, depth: usize, out: &mut String) -> std::fmt::Result {
        writeln!(out, "{{")?;
        for item in &self.body {
            item.render(depth + 1, out)?;
        }
        indent(depth, out)?;
        write!(out, "}}")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IfStatement {
    pub condition: Logic,
    pub block: Block,
}

impl IfStatement {
    pub fn new(condition: Logic, block: Block) -> Self {
        IfStatement { condition, block }
    }
}

impl Render for IfStatement {
    fn render(&self, depth: usize, out: &mut String) -> std::fmt::Result {
        indent(depth, out)?;
        write!(out, "if ({}) ", self.condition)?;
        self.block.render(depth, out)?;
        writeln!(out)
    }
}
