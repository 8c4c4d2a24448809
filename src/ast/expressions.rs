//! Expression nodes.
//!
//! Same-precedence operator runs are stored flat as a first operand plus
//! `(operator, operand)` pairs, applied left to right. `1 - 2 - 3` is
//! `Expression { first: 1, rest: [(-, 2), (-, 3)] }`, never a right-leaning
//! tree.

use std::fmt::Display;

use serde::Serialize;

use crate::lexer::tokens::TokenKind;

// OPERATORS

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AdditiveOp {
    Add,
    Subtract,
}

impl AdditiveOp {
    pub fn from_token(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Plus => Some(AdditiveOp::Add),
            TokenKind::Dash => Some(AdditiveOp::Subtract),
            _ => None,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            AdditiveOp::Add => "+",
            AdditiveOp::Subtract => "-",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MultiplicativeOp {
    Multiply,
    Divide,
}

impl MultiplicativeOp {
    pub fn from_token(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Star => Some(MultiplicativeOp::Multiply),
            TokenKind::Slash => Some(MultiplicativeOp::Divide),
            _ => None,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            MultiplicativeOp::Multiply => "*",
            MultiplicativeOp::Divide => "/",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RelationalOp {
    Less,
    LessEquals,
    Greater,
    GreaterEquals,
}

impl RelationalOp {
    pub fn from_token(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Less => Some(RelationalOp::Less),
            TokenKind::LessEquals => Some(RelationalOp::LessEquals),
            TokenKind::Greater => Some(RelationalOp::Greater),
            TokenKind::GreaterEquals => Some(RelationalOp::GreaterEquals),
            _ => None,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            RelationalOp::Less => "<",
            RelationalOp::LessEquals => "<=",
            RelationalOp::Greater => ">",
            RelationalOp::GreaterEquals => ">=",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EqualityOp {
    Equals,
    NotEquals,
}

impl EqualityOp {
    pub fn from_token(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Equals => Some(EqualityOp::Equals),
            TokenKind::NotEquals => Some(EqualityOp::NotEquals),
            _ => None,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            EqualityOp::Equals => "==",
            EqualityOp::NotEquals => "!=",
        }
    }
}

macro_rules! display_symbol {
    ($($op:ty),*) => {
        $(impl Display for $op {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.symbol())
            }
        })*
    };
}

display_symbol!(AdditiveOp, MultiplicativeOp, RelationalOp, EqualityOp);

// ARITHMETIC

/// Additive chain: `first (op term)*`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Expression {
    pub first: Term,
    pub rest: Vec<(AdditiveOp, Term)>,
}

impl Expression {
    pub fn new(first: impl Into<Term>, rest: Vec<(AdditiveOp, Term)>) -> Self {
        Expression {
            first: first.into(),
            rest,
        }
    }
}

impl From<Term> for Expression {
    fn from(value: Term) -> Self {
        Expression::new(value, vec![])
    }
}

impl From<Factor> for Expression {
    fn from(value: Factor) -> Self {
        Expression::new(Term::from(value), vec![])
    }
}

impl Display for Expression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.first)?;
        for (op, term) in &self.rest {
            write!(f, " {} {}", op, term)?;
        }
        Ok(())
    }
}

/// Multiplicative chain: `first (op factor)*`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Term {
    pub first: Factor,
    pub rest: Vec<(MultiplicativeOp, Factor)>,
}

impl Term {
    pub fn new(first: Factor, rest: Vec<(MultiplicativeOp, Factor)>) -> Self {
        Term { first, rest }
    }
}

impl From<Factor> for Term {
    fn from(value: Factor) -> Self {
        Term::new(value, vec![])
    }
}

impl Display for Term {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.first)?;
        for (op, factor) in &self.rest {
            write!(f, " {} {}", op, factor)?;
        }
        Ok(())
    }
}

/// Exactly one of the four factor alternatives.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Factor {
    Integer(i64),
    Identifier(String),
    Parenthesized(Box<Expression>),
    Call(MethodCall),
}

impl Factor {
    pub fn int(value: i64) -> Self {
        Factor::Integer(value)
    }

    pub fn ident(name: impl Into<String>) -> Self {
        Factor::Identifier(name.into())
    }

    pub fn group(expression: Expression) -> Self {
        Factor::Parenthesized(Box::new(expression))
    }
}

impl Display for Factor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Factor::Integer(value) => write!(f, "{}", value),
            Factor::Identifier(name) => write!(f, "{}", name),
            Factor::Parenthesized(expression) => write!(f, "({})", expression),
            Factor::Call(call) => write!(f, "{}", call),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MethodCall {
    pub name: String,
    pub arguments: Vec<Expression>,
}

impl MethodCall {
    pub fn new(name: impl Into<String>, arguments: Vec<Expression>) -> Self {
        MethodCall {
            name: name.into(),
            arguments,
        }
    }
}

impl Display for MethodCall {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let arguments: Vec<String> = self.arguments.iter().map(|a| a.to_string()).collect();
        write!(f, "{}({})", self.name, arguments.join(", "))
    }
}

// LOGIC

/// Any node that can stand in a boolean-logic position.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum LogicExpr {
    Or(Box<Or>),
    And(Box<And>),
    Equality(Box<Equality>),
    Relational(Box<Relational>),
    Expression(Expression),
}

impl LogicExpr {
    pub fn variant_name(&self) -> &'static str {
        match self {
            LogicExpr::Or(_) => "Or",
            LogicExpr::And(_) => "And",
            LogicExpr::Equality(_) => "Equality",
            LogicExpr::Relational(_) => "Relational",
            LogicExpr::Expression(_) => "Expression",
        }
    }
}

impl From<Expression> for LogicExpr {
    fn from(value: Expression) -> Self {
        LogicExpr::Expression(value)
    }
}

impl From<Or> for LogicExpr {
    fn from(value: Or) -> Self {
        LogicExpr::Or(Box::new(value))
    }
}

impl From<And> for LogicExpr {
    fn from(value: And) -> Self {
        LogicExpr::And(Box::new(value))
    }
}

impl From<Equality> for LogicExpr {
    fn from(value: Equality) -> Self {
        LogicExpr::Equality(Box::new(value))
    }
}

impl From<Relational> for LogicExpr {
    fn from(value: Relational) -> Self {
        LogicExpr::Relational(Box::new(value))
    }
}

impl Display for LogicExpr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogicExpr::Or(node) => write!(f, "{} || {}", node.left, node.right),
            LogicExpr::And(node) => write!(f, "{} && {}", node.left, node.right),
            LogicExpr::Equality(node) => write!(f, "{} {} {}", node.left, node.op, node.right),
            LogicExpr::Relational(node) => write!(f, "{} {} {}", node.left, node.op, node.right),
            LogicExpr::Expression(expression) => write!(f, "{}", expression),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Or {
    pub left: LogicExpr,
    pub right: LogicExpr,
}

impl Or {
    pub fn new(left: impl Into<LogicExpr>, right: impl Into<LogicExpr>) -> Self {
        Or {
            left: left.into(),
            right: right.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct And {
    pub left: LogicExpr,
    pub right: LogicExpr,
}

impl And {
    pub fn new(left: impl Into<LogicExpr>, right: impl Into<LogicExpr>) -> Self {
        And {
            left: left.into(),
            right: right.into(),
        }
    }
}

/// Operand of an equality test: a comparison or a plain expression.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Comparand {
    Relational(Relational),
    Expression(Expression),
}

impl From<Relational> for Comparand {
    fn from(value: Relational) -> Self {
        Comparand::Relational(value)
    }
}

impl From<Expression> for Comparand {
    fn from(value: Expression) -> Self {
        Comparand::Expression(value)
    }
}

/// Hands the expression back when it cannot stand on either side of `==`.
impl TryFrom<LogicExpr> for Comparand {
    type Error = LogicExpr;

    fn try_from(value: LogicExpr) -> Result<Self, Self::Error> {
        match value {
            LogicExpr::Relational(relational) => Ok(Comparand::Relational(*relational)),
            LogicExpr::Expression(expression) => Ok(Comparand::Expression(expression)),
            other => Err(other),
        }
    }
}

impl Display for Comparand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Comparand::Relational(node) => write!(f, "{} {} {}", node.left, node.op, node.right),
            Comparand::Expression(expression) => write!(f, "{}", expression),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Equality {
    pub left: Comparand,
    pub op: EqualityOp,
    pub right: Comparand,
}

impl Equality {
    pub fn new(left: impl Into<Comparand>, op: EqualityOp, right: impl Into<Comparand>) -> Self {
        Equality {
            left: left.into(),
            op,
            right: right.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Relational {
    pub left: Expression,
    pub op: RelationalOp,
    pub right: Expression,
}

impl Relational {
    pub fn new(left: Expression, op: RelationalOp, right: Expression) -> Self {
        Relational { left, op, right }
    }
}

/// Root of a boolean-logic expression, as found in `if` conditions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Logic {
    pub root: LogicExpr,
}

impl Logic {
    pub fn new(root: impl Into<LogicExpr>) -> Self {
        Logic { root: root.into() }
    }
}

impl Display for Logic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.root)
    }
}
