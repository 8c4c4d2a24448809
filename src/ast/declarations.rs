//! Declaration nodes.
//!
//! A declaration with an absent body is a forward declaration (types) or a
//! signature (methods); absence is a valid outcome, not an error.

use std::fmt::{Display, Write};

use serde::Serialize;

use super::{
    ast::{indent, BodyItem, Member, Render},
    expressions::Expression,
    generics::GenericParameter,
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeDeclaration {
    pub name: String,
    pub generics: Vec<GenericParameter>,
    pub body: Option<TypeBody>,
}

impl TypeDeclaration {
    pub fn new(name: impl Into<String>, body: Option<TypeBody>) -> Self {
        TypeDeclaration {
            name: name.into(),
            generics: vec![],
            body,
        }
    }

    pub fn with_generics(mut self, generics: Vec<GenericParameter>) -> Self {
        self.generics = generics;
        self
    }

    pub fn is_forward(&self) -> bool {
        self.body.is_none()
    }
}

impl Render for TypeDeclaration {
    fn render(&self, depth: usize, out: &mut String) -> std::fmt::Result {
        indent(depth, out)?;
        write!(out, "type {}", self.name)?;

        if !self.generics.is_empty() {
            let generics: Vec<String> = self.generics.iter().map(|g| g.to_string()).collect();
            write!(out, "<{}>", generics.join(", "))?;
        }

        match &self.body {
            None => writeln!(out, ";"),
            Some(body) => {
                writeln!(out, " {{")?;
                body.render(depth + 1, out)?;
                indent(depth, out)?;
                writeln!(out, "}}")
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct TypeBody {
    pub body: Vec<Member>,
}

impl TypeBody {
    pub fn new(body: Vec<Member>) -> Self {
        TypeBody { body }
    }
}

impl Render for TypeBody {
    fn render(&self, depth: usize, out: &mut String) -> std::fmt::Result {
        for member in &self.body {
            member.render(depth, out)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MethodDeclaration {
    pub name: String,
    pub params: Params,
    pub body: Option<MethodBody>,
}

impl MethodDeclaration {
    pub fn new(name: impl Into<String>, params: Params, body: Option<MethodBody>) -> Self {
        MethodDeclaration {
            name: name.into(),
            params,
            body,
        }
    }

    pub fn is_signature(&self) -> bool {
        self.body.is_none()
    }
}

impl Render for MethodDeclaration {
    fn render(&self, depth: usize, out: &mut String) -> std::fmt::Result {
        indent(depth, out)?;
        write!(out, "method {}({})", self.name, self.params)?;

        match &self.body {
            None => writeln!(out, ";"),
            Some(body) => {
                writeln!(out, " {{")?;
                body.render(depth + 1, out)?;
                indent(depth, out)?;
                writeln!(out, "}}")
            }
        }
    }
}

/// One formal parameter: declared type text and name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Parameter {
    #[serde(rename = "type")]
    pub ty: String,
    pub name: String,
}

impl Parameter {
    pub fn new(ty: impl Into<String>, name: impl Into<String>) -> Self {
        Parameter {
            ty: ty.into(),
            name: name.into(),
        }
    }
}

impl Display for Parameter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.ty, self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Params {
    pub parameters: Vec<Parameter>,
}

impl Params {
    pub fn new(parameters: Vec<Parameter>) -> Self {
        Params { parameters }
    }

    pub fn len(&self) -> usize {
        self.parameters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }
}

impl Display for Params {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parameters: Vec<String> = self.parameters.iter().map(|p| p.to_string()).collect();
        write!(f, "{}", parameters.join(", "))
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct MethodBody {
    pub body: Vec<BodyItem>,
}

impl MethodBody {
    pub fn new(body: Vec<BodyItem>) -> Self {
        MethodBody { body }
    }
}

impl Render for MethodBody {
    fn render(&self, depth: usize, out: &mut String) -> std::fmt::Result {
        for item in &self.body {
            item.render(depth, out)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VariableDeclaration {
    #[serde(rename = "type")]
    pub ty: String,
    pub name: String,
    pub initializer: Option<Expression>,
}

impl VariableDeclaration {
    pub fn new(
        ty: impl Into<String>,
        name: impl Into<String>,
        initializer: Option<Expression>,
    ) -> Self {
        VariableDeclaration {
            ty: ty.into(),
            name: name.into(),
            initializer,
        }
    }
}

impl Render for VariableDeclaration {
    fn render(&self, depth: usize, out: &mut String) -> std::fmt::Result {
        indent(depth, out)?;
        match &self.initializer {
            Some(initializer) => writeln!(out, "{} {} = {};", self.ty, self.name, initializer),
            None => writeln!(out, "{} {};", self.ty, self.name),
        }
    }
}
