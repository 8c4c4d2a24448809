//! Generics support: concepts, their constraints, and generic parameters on
//! type declarations.

use std::fmt::Display;

use serde::Serialize;

/// A type with optional type arguments, e.g. `Map<string, List<T>>`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenericType {
    pub base: String,
    pub arguments: Vec<GenericType>,
}

impl GenericType {
    pub fn new(base: impl Into<String>, arguments: Vec<GenericType>) -> Self {
        GenericType {
            base: base.into(),
            arguments,
        }
    }

    pub fn simple(base: impl Into<String>) -> Self {
        GenericType::new(base, vec![])
    }
}

impl Display for GenericType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.base)?;
        if !self.arguments.is_empty() {
            let arguments: Vec<String> = self.arguments.iter().map(|a| a.to_string()).collect();
            write!(f, "<{}>", arguments.join(", "))?;
        }
        Ok(())
    }
}

/// `T: Comparable + Hashable` on a type declaration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenericParameter {
    pub name: String,
    pub constraints: Vec<String>,
}

impl GenericParameter {
    pub fn new(name: impl Into<String>, constraints: Vec<String>) -> Self {
        GenericParameter {
            name: name.into(),
            constraints,
        }
    }
}

impl Display for GenericParameter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)?;
        if !self.constraints.is_empty() {
            write!(f, ": {}", self.constraints.join(" + "))?;
        }
        Ok(())
    }
}

/// A required concept applied to type arguments, e.g. `Equatable<T>`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Constraint {
    pub concept: String,
    pub arguments: Vec<GenericType>,
}

impl Constraint {
    pub fn new(concept: impl Into<String>, arguments: Vec<GenericType>) -> Self {
        Constraint {
            concept: concept.into(),
            arguments,
        }
    }
}

impl Display for Constraint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let arguments: Vec<String> = self.arguments.iter().map(|a| a.to_string()).collect();
        write!(f, "{}<{}>", self.concept, arguments.join(", "))
    }
}

/// `concept Ordered<T> requires Equatable<T>;`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Concept {
    pub name: String,
    pub type_variable: String,
    pub constraints: Vec<Constraint>,
}

impl Concept {
    pub fn new(
        name: impl Into<String>,
        type_variable: impl Into<String>,
        constraints: Vec<Constraint>,
    ) -> Self {
        Concept {
            name: name.into(),
            type_variable: type_variable.into(),
            constraints,
        }
    }
}

impl Display for Concept {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "concept {}<{}>", self.name, self.type_variable)?;
        if !self.constraints.is_empty() {
            let constraints: Vec<String> = self.constraints.iter().map(|c| c.to_string()).collect();
            write!(f, " requires {}", constraints.join(", "))?;
        }
        write!(f, ";")
    }
}
