use std::fmt::{Display, Write};

use serde::Serialize;

use crate::{
    errors::errors::{Error, ErrorImpl},
    Position,
};

use super::{
    declarations::{MethodDeclaration, TypeDeclaration, VariableDeclaration},
    generics::Concept,
    statements::Statement,
};

pub(crate) const INDENT: &str = "    ";

/// Nodes that render over several lines at a given nesting depth.
pub trait Render {
    fn render(&self, depth: usize, out: &mut String) -> std::fmt::Result;

    fn rendered(&self) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail
        let _ = self.render(0, &mut out);
        out
    }
}

pub(crate) fn indent(depth: usize, out: &mut String) -> std::fmt::Result {
    write!(out, "{}", INDENT.repeat(depth))
}

/// The whole compilation unit.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Program {
    pub body: Vec<Declaration>,
}

impl Program {
    pub fn new(body: Vec<Declaration>) -> Self {
        Program { body }
    }

    /// Pretty-printed JSON document of the whole tree.
    pub fn to_json(&self) -> Result<String, Error> {
        serde_json::to_string_pretty(self).map_err(|error| {
            Error::new(
                ErrorImpl::SerializeError {
                    message: error.to_string(),
                },
                Position::null(),
            )
        })
    }
}

impl Render for Program {
    fn render(&self, depth: usize, out: &mut String) -> std::fmt::Result {
        for declaration in &self.body {
            declaration.render(depth, out)?;
        }
        Ok(())
    }
}

impl Display for Program {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.rendered())
    }
}

/// A top-level declaration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Declaration {
    Type(TypeDeclaration),
    Method(MethodDeclaration),
    Variable(VariableDeclaration),
    Concept(Concept),
}

impl Render for Declaration {
    fn render(&self, depth: usize, out: &mut String) -> std::fmt::Result {
        match self {
            Declaration::Type(declaration) => declaration.render(depth, out),
            Declaration::Method(declaration) => declaration.render(depth, out),
            Declaration::Variable(declaration) => declaration.render(depth, out),
            Declaration::Concept(concept) => {
                indent(depth, out)?;
                writeln!(out, "{}", concept)
            }
        }
    }
}

impl From<TypeDeclaration> for Declaration {
    fn from(value: TypeDeclaration) -> Self {
        Declaration::Type(value)
    }
}

impl From<MethodDeclaration> for Declaration {
    fn from(value: MethodDeclaration) -> Self {
        Declaration::Method(value)
    }
}

impl From<VariableDeclaration> for Declaration {
    fn from(value: VariableDeclaration) -> Self {
        Declaration::Variable(value)
    }
}

impl From<Concept> for Declaration {
    fn from(value: Concept) -> Self {
        Declaration::Concept(value)
    }
}

/// A member of a type body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Member {
    Type(TypeDeclaration),
    Method(MethodDeclaration),
    Variable(VariableDeclaration),
}

impl Render for Member {
    fn render(&self, depth: usize, out: &mut String) -> std::fmt::Result {
        match self {
            Member::Type(declaration) => declaration.render(depth, out),
            Member::Method(declaration) => declaration.render(depth, out),
            Member::Variable(declaration) => declaration.render(depth, out),
        }
    }
}

impl From<TypeDeclaration> for Member {
    fn from(value: TypeDeclaration) -> Self {
        Member::Type(value)
    }
}

impl From<MethodDeclaration> for Member {
    fn from(value: MethodDeclaration) -> Self {
        Member::Method(value)
    }
}

impl From<VariableDeclaration> for Member {
    fn from(value: VariableDeclaration) -> Self {
        Member::Variable(value)
    }
}

/// An entry of a method body or block.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum BodyItem {
    Variable(VariableDeclaration),
    Statement(Statement),
}

impl Render for BodyItem {
    fn render(&self, depth: usize, out: &mut String) -> std::fmt::Result {
        match self {
            BodyItem::Variable(declaration) => declaration.render(depth, out),
            BodyItem::Statement(statement) => statement.render(depth, out),
        }
    }
}

impl From<VariableDeclaration> for BodyItem {
    fn from(value: VariableDeclaration) -> Self {
        BodyItem::Variable(value)
    }
}

impl From<Statement> for BodyItem {
    fn from(value: Statement) -> Self {
        BodyItem::Statement(value)
    }
}
