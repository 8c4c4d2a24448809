//! Event-driven AST reducer.
//!
//! [`AstReducer`] listens to the rule entry/exit events of a parse-tree walk
//! and assembles the AST on a typed operand stack. A child rule's exit leaves
//! its finished node on top of the stack; the enclosing rule's exit consumes
//! it. Every pop names the operand variant it expects, so a grammar/reducer
//! mismatch surfaces as an error instead of a silently malformed tree.

use tracing::trace;

use crate::{
    ast::{
        ast::Program,
        declarations::{
            MethodBody, MethodDeclaration, Parameter, Params, TypeBody, TypeDeclaration,
            VariableDeclaration,
        },
        expressions::{
            AdditiveOp, And, Comparand, Equality, EqualityOp, Expression, Factor, Logic, LogicExpr,
            MethodCall, MultiplicativeOp, Or, Relational, RelationalOp, Term,
        },
        generics::{Concept, Constraint, GenericParameter, GenericType},
        statements::{Block, IfStatement, Placeholder, Statement, StatementBody},
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Token, TokenKind},
    parser::{
        expr::{ADDITIVE, EQUALITY, MULTIPLICATIVE, RELATIONAL},
        tree::{ParseNode, Rule},
        walker::ParseListener,
    },
    Position, POP_OPERAND,
};

use super::operand::Operand;

/// Builds the structural error for a popped operand of the wrong variant.
pub fn unexpected_operand(node: &ParseNode, expected: &'static str, found: &Operand) -> Error {
    Error::new(
        ErrorImpl::UnexpectedOperand {
            rule: node.rule,
            expected,
            found: found.variant_name(),
        },
        node.start(),
    )
}

fn empty_stack(node: &ParseNode) -> Error {
    Error::new(ErrorImpl::EmptyOperandStack { rule: node.rule }, node.start())
}

fn missing_child(node: &ParseNode, child: &'static str) -> Error {
    Error::new(ErrorImpl::MissingChild { rule: node.rule, child }, node.start())
}

fn identifier<'a>(node: &'a ParseNode, child: &'static str) -> Result<&'a Token, Error> {
    node.token(TokenKind::Identifier).ok_or_else(|| missing_child(node, child))
}

/// Builds a [`GenericType`] from a `type_name` node.
fn generic_type(node: &ParseNode) -> Result<GenericType, Error> {
    let base = identifier(node, "type name")?.value.clone();
    let arguments = node.rules(Rule::TypeName).map(generic_type).collect::<Result<Vec<_>, _>>()?;
    Ok(GenericType::new(base, arguments))
}

/// A finished declaration or statement waiting to be appended to its container.
enum Reduced {
    Type(TypeDeclaration),
    Method(MethodDeclaration),
    Variable(VariableDeclaration),
    Concept(Concept),
    Statement(Statement),
}

impl Reduced {
    fn expected_container(&self) -> &'static str {
        match self {
            Reduced::Type(_) | Reduced::Method(_) => "Program or TypeBody",
            Reduced::Variable(_) => "Program, TypeBody, MethodBody or Block",
            Reduced::Concept(_) => "Program",
            Reduced::Statement(_) => "MethodBody or Block",
        }
    }
}

/// Reduces one parse tree into one [`Program`].
///
/// A reducer owns its stack exclusively and is meant for a single walk; use a
/// fresh instance per tree.
#[derive(Debug, Default)]
pub struct AstReducer {
    stack: Vec<Operand>,
}

impl AstReducer {
    pub fn new() -> Self {
        AstReducer { stack: vec![] }
    }

    /// Current operand stack, bottom first.
    pub fn stack(&self) -> &[Operand] {
        &self.stack
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Takes the finished program: the only operand left after a complete walk.
    pub fn finish(mut self) -> Result<Program, Error> {
        if self.stack.len() != 1 {
            return Err(Error::new(
                ErrorImpl::UnbalancedStack {
                    remaining: self.stack.len(),
                },
                Position::null(),
            ));
        }

        match self.stack.pop() {
            Some(Operand::Program(program)) => Ok(program),
            Some(other) => Err(Error::new(
                ErrorImpl::UnexpectedOperand {
                    rule: Rule::Program,
                    expected: "Program",
                    found: other.variant_name(),
                },
                Position::null(),
            )),
            None => Err(Error::new(
                ErrorImpl::EmptyOperandStack { rule: Rule::Program },
                Position::null(),
            )),
        }
    }

    fn push(&mut self, operand: Operand) {
        self.stack.push(operand);
    }

    pub(crate) fn pop(&mut self, node: &ParseNode) -> Result<Operand, Error> {
        self.stack.pop().ok_or_else(|| empty_stack(node))
    }

    fn top_mut(&mut self, node: &ParseNode) -> Result<&mut Operand, Error> {
        self.stack.last_mut().ok_or_else(|| empty_stack(node))
    }

    /// Pops `count` operands and returns them in push (source) order.
    fn pop_many<T>(
        &mut self,
        count: usize,
        mut pop: impl FnMut(&mut Self) -> Result<T, Error>,
    ) -> Result<Vec<T>, Error> {
        let mut popped = Vec::with_capacity(count);
        for _ in 0..count {
            popped.push(pop(self)?);
        }
        popped.reverse();
        Ok(popped)
    }

    /// Pops the two operands of a binary rule as `(left, right)`.
    ///
    /// The right operand was pushed last, so it is popped first.
    fn pop_pair<T>(
        &mut self,
        mut pop: impl FnMut(&mut Self) -> Result<T, Error>,
    ) -> Result<(T, T), Error> {
        let right = pop(self)?;
        let left = pop(self)?;
        Ok((left, right))
    }

    fn append(&mut self, node: &ParseNode, item: Reduced) -> Result<(), Error> {
        let top = self.top_mut(node)?;
        let found = top.variant_name();

        match (top, item) {
            (Operand::Program(program), Reduced::Type(value)) => program.body.push(value.into()),
            (Operand::Program(program), Reduced::Method(value)) => program.body.push(value.into()),
            (Operand::Program(program), Reduced::Variable(value)) => {
                program.body.push(value.into())
            }
            (Operand::Program(program), Reduced::Concept(value)) => program.body.push(value.into()),
            (Operand::TypeBody(body), Reduced::Type(value)) => body.body.push(value.into()),
            (Operand::TypeBody(body), Reduced::Method(value)) => body.body.push(value.into()),
            (Operand::TypeBody(body), Reduced::Variable(value)) => body.body.push(value.into()),
            (Operand::MethodBody(body), Reduced::Variable(value)) => body.body.push(value.into()),
            (Operand::MethodBody(body), Reduced::Statement(value)) => body.body.push(value.into()),
            (Operand::Block(block), Reduced::Variable(value)) => block.body.push(value.into()),
            (Operand::Block(block), Reduced::Statement(value)) => block.body.push(value.into()),
            (_, item) => {
                return Err(Error::new(
                    ErrorImpl::UnexpectedOperand {
                        rule: node.rule,
                        expected: item.expected_container(),
                        found,
                    },
                    node.start(),
                ))
            }
        }

        Ok(())
    }

    // ENTRY REACTIONS

    fn enter(&mut self, node: &ParseNode) -> Result<(), Error> {
        match node.rule {
            Rule::Program => self.push(Operand::Program(Program::default())),
            Rule::TypeDeclaration => {
                let name = identifier(node, "type name")?.value.clone();
                let generics = match node.first_rule(Rule::GenericParameters) {
                    Some(parameters) => parameters
                        .rules(Rule::GenericParameter)
                        .map(read_generic_parameter)
                        .collect::<Result<Vec<_>, _>>()?,
                    None => vec![],
                };
                let declaration = TypeDeclaration::new(name, None).with_generics(generics);
                self.push(Operand::TypeDeclaration(declaration));
            }
            Rule::TypeBody => self.push(Operand::TypeBody(TypeBody::default())),
            Rule::MethodDeclaration => {
                let name = identifier(node, "method name")?.value.clone();
                let declaration = MethodDeclaration::new(name, Params::default(), None);
                self.push(Operand::MethodDeclaration(declaration));
            }
            Rule::Params => {
                let types: Vec<&ParseNode> = node.rules(Rule::TypeName).collect();
                let names: Vec<&Token> = node.tokens(TokenKind::Identifier).collect();
                if types.len() != names.len() {
                    return Err(missing_child(node, "parameter name"));
                }

                let parameters = types
                    .iter()
                    .zip(names)
                    .map(|(ty, name)| Parameter::new(ty.text(), name.value.clone()))
                    .collect();
                self.push(Operand::ParamList(parameters));
            }
            Rule::MethodBody => self.push(Operand::MethodBody(MethodBody::default())),
            Rule::VariableDeclaration => {
                let ty = node
                    .first_rule(Rule::TypeName)
                    .ok_or_else(|| missing_child(node, "type_name"))?
                    .text();
                let name = identifier(node, "variable name")?.value.clone();
                self.push(Operand::VariableDeclaration(VariableDeclaration::new(ty, name, None)));
            }
            Rule::ConceptDeclaration => {
                let mut identifiers = node.tokens(TokenKind::Identifier);
                let name = identifiers
                    .next()
                    .ok_or_else(|| missing_child(node, "concept name"))?;
                let type_variable = identifiers
                    .next()
                    .ok_or_else(|| missing_child(node, "type variable"))?;
                let constraints = node
                    .rules(Rule::Constraint)
                    .map(read_constraint)
                    .collect::<Result<Vec<_>, _>>()?;
                let concept =
                    Concept::new(name.value.clone(), type_variable.value.clone(), constraints);
                self.push(Operand::Concept(concept));
            }
            Rule::Statement => self.push(Operand::PendingStatement),
            Rule::Block => self.push(Operand::Block(Block::default())),
            _ => {}
        }

        Ok(())
    }

    // EXIT REACTIONS

    fn exit(&mut self, node: &ParseNode) -> Result<(), Error> {
        match node.rule {
            // The program stays on the stack for `finish`
            Rule::Program => {}
            Rule::TypeDeclaration => {
                let declaration = POP_OPERAND!(self, node, Operand::TypeDeclaration)?;
                self.append(node, Reduced::Type(declaration))?;
            }
            Rule::TypeBody => {
                let body = POP_OPERAND!(self, node, Operand::TypeBody)?;
                match self.top_mut(node)? {
                    Operand::TypeDeclaration(declaration) => declaration.body = Some(body),
                    other => return Err(unexpected_operand(node, "TypeDeclaration", other)),
                }
            }
            Rule::MethodDeclaration => {
                let declaration = POP_OPERAND!(self, node, Operand::MethodDeclaration)?;
                self.append(node, Reduced::Method(declaration))?;
            }
            Rule::Params => {
                let parameters = POP_OPERAND!(self, node, Operand::ParamList)?;
                match self.top_mut(node)? {
                    Operand::MethodDeclaration(declaration) => {
                        declaration.params = Params::new(parameters)
                    }
                    other => return Err(unexpected_operand(node, "MethodDeclaration", other)),
                }
            }
            Rule::MethodBody => {
                let body = POP_OPERAND!(self, node, Operand::MethodBody)?;
                match self.top_mut(node)? {
                    Operand::MethodDeclaration(declaration) => declaration.body = Some(body),
                    other => return Err(unexpected_operand(node, "MethodDeclaration", other)),
                }
            }
            Rule::VariableDeclaration => {
                let initializer = if node.has_rule(Rule::Expression) {
                    Some(POP_OPERAND!(self, node, Operand::Expression)?)
                } else {
                    None
                };
                let mut declaration = POP_OPERAND!(self, node, Operand::VariableDeclaration)?;
                declaration.initializer = initializer;
                self.append(node, Reduced::Variable(declaration))?;
            }
            Rule::ConceptDeclaration => {
                let concept = POP_OPERAND!(self, node, Operand::Concept)?;
                self.append(node, Reduced::Concept(concept))?;
            }
            Rule::Statement => {
                let body = if node.has_rule(Rule::Expression) {
                    StatementBody::Expression(POP_OPERAND!(self, node, Operand::Expression)?)
                } else if node.has_rule(Rule::IfStatement) {
                    StatementBody::If(POP_OPERAND!(self, node, Operand::IfStatement)?)
                } else if node.has_rule(Rule::Block) {
                    StatementBody::Block(POP_OPERAND!(self, node, Operand::Block)?)
                } else if node.has_rule(Rule::Placeholder) {
                    StatementBody::Placeholder(Placeholder)
                } else {
                    return Err(missing_child(node, "statement alternative"));
                };

                match self.pop(node)? {
                    Operand::PendingStatement => {}
                    other => return Err(unexpected_operand(node, "PendingStatement", &other)),
                }
                self.append(node, Reduced::Statement(Statement::new(body)))?;
            }
            // Left on the stack for the enclosing statement or if
            Rule::Block => {}
            Rule::IfStatement => {
                let block = POP_OPERAND!(self, node, Operand::Block)?;
                let condition = POP_OPERAND!(self, node, Operand::Logic)?;
                self.push(Operand::IfStatement(IfStatement::new(condition, block)));
            }
            Rule::Logic => {
                let root = POP_OPERAND!(self, node, Operand::LogicExpr)?;
                self.push(Operand::Logic(Logic::new(root)));
            }
            Rule::Or => {
                let count = node.rule_count(Rule::And);
                let operands = self.pop_many(count, |r| POP_OPERAND!(r, node, Operand::LogicExpr))?;
                let folded = fold_left(node, operands, |left, right| Or::new(left, right).into())?;
                self.push(Operand::LogicExpr(folded));
            }
            Rule::And => {
                let count = node.rule_count(Rule::Equality);
                let operands = self.pop_many(count, |r| POP_OPERAND!(r, node, Operand::LogicExpr))?;
                let folded = fold_left(node, operands, |left, right| And::new(left, right).into())?;
                self.push(Operand::LogicExpr(folded));
            }
            Rule::Equality => {
                // A lone relational operand is already a LogicExpr and passes through
                if node.rule_count(Rule::Relational) == 2 {
                    let op = operator(node, &EQUALITY, EqualityOp::from_token)?;
                    let (left, right) = self.pop_pair(|r| {
                        let operand = POP_OPERAND!(r, node, Operand::LogicExpr)?;
                        comparand(node, operand)
                    })?;
                    self.push(Operand::LogicExpr(Equality::new(left, op, right).into()));
                }
            }
            Rule::Relational => {
                if node.rule_count(Rule::Expression) == 2 {
                    let op = operator(node, &RELATIONAL, RelationalOp::from_token)?;
                    let (left, right) =
                        self.pop_pair(|r| POP_OPERAND!(r, node, Operand::Expression))?;
                    self.push(Operand::LogicExpr(Relational::new(left, op, right).into()));
                } else {
                    let expression = POP_OPERAND!(self, node, Operand::Expression)?;
                    self.push(Operand::LogicExpr(expression.into()));
                }
            }
            Rule::Expression => {
                let ops = operators(node, &ADDITIVE, AdditiveOp::from_token);
                let count = node.rule_count(Rule::Term);
                let terms = self.pop_many(count, |r| POP_OPERAND!(r, node, Operand::Term))?;
                let (first, rest) = chain(node, terms, ops)?;
                self.push(Operand::Expression(Expression::new(first, rest)));
            }
            Rule::Term => {
                let ops = operators(node, &MULTIPLICATIVE, MultiplicativeOp::from_token);
                let count = node.rule_count(Rule::Factor);
                let factors = self.pop_many(count, |r| POP_OPERAND!(r, node, Operand::Factor))?;
                let (first, rest) = chain(node, factors, ops)?;
                self.push(Operand::Term(Term::new(first, rest)));
            }
            Rule::Factor => {
                let factor = if node.has_rule(Rule::Expression) {
                    Factor::Parenthesized(Box::new(POP_OPERAND!(self, node, Operand::Expression)?))
                } else if node.has_rule(Rule::MethodCall) {
                    Factor::Call(POP_OPERAND!(self, node, Operand::MethodCall)?)
                } else if let Some(token) = node.token(TokenKind::Identifier) {
                    Factor::Identifier(token.value.clone())
                } else if let Some(token) = node.token(TokenKind::Number) {
                    let value = token.value.parse::<i64>().map_err(|_| {
                        Error::new(
                            ErrorImpl::NumberParseError { token: token.value.clone() },
                            token.span.start.clone(),
                        )
                    })?;
                    Factor::Integer(value)
                } else {
                    return Err(missing_child(node, "factor alternative"));
                };
                self.push(Operand::Factor(factor));
            }
            Rule::MethodCall => {
                let name = identifier(node, "method name")?.value.clone();
                let count = node.rule_count(Rule::Expression);
                let arguments =
                    self.pop_many(count, |r| POP_OPERAND!(r, node, Operand::Expression))?;
                self.push(Operand::MethodCall(MethodCall::new(name, arguments)));
            }
            // Read directly from the parse tree by their enclosing rules
            Rule::Placeholder
            | Rule::TypeName
            | Rule::GenericParameters
            | Rule::GenericParameter
            | Rule::Constraint => {}
        }

        Ok(())
    }
}

impl ParseListener for AstReducer {
    fn enter_rule(&mut self, node: &ParseNode) -> Result<(), Error> {
        trace!(rule = %node.rule, depth = self.stack.len(), "enter");
        self.enter(node)
    }

    fn exit_rule(&mut self, node: &ParseNode) -> Result<(), Error> {
        self.exit(node)?;
        trace!(rule = %node.rule, depth = self.stack.len(), "exit");
        Ok(())
    }
}

fn read_generic_parameter(node: &ParseNode) -> Result<GenericParameter, Error> {
    let mut identifiers = node.tokens(TokenKind::Identifier).map(|token| token.value.clone());
    let name = identifiers.next().ok_or_else(|| missing_child(node, "type variable"))?;
    Ok(GenericParameter::new(name, identifiers.collect()))
}

fn read_constraint(node: &ParseNode) -> Result<Constraint, Error> {
    let concept = identifier(node, "concept name")?.value.clone();
    let arguments = node.rules(Rule::TypeName).map(generic_type).collect::<Result<Vec<_>, _>>()?;
    Ok(Constraint::new(concept, arguments))
}

/// Narrows a popped logic operand to one side of an equality test.
fn comparand(node: &ParseNode, operand: LogicExpr) -> Result<Comparand, Error> {
    Comparand::try_from(operand).map_err(|other| {
        Error::new(
            ErrorImpl::UnexpectedOperand {
                rule: node.rule,
                expected: "Relational or Expression",
                found: other.variant_name(),
            },
            node.start(),
        )
    })
}

/// Direct operator tokens of `node` in source order, mapped through `convert`.
fn operators<T>(
    node: &ParseNode,
    kinds: &[TokenKind],
    convert: fn(TokenKind) -> Option<T>,
) -> Vec<T> {
    node.operator_tokens(kinds).filter_map(|token| convert(token.kind)).collect()
}

/// The single operator of a binary comparison node.
fn operator<T>(
    node: &ParseNode,
    kinds: &[TokenKind],
    convert: fn(TokenKind) -> Option<T>,
) -> Result<T, Error> {
    operators(node, kinds, convert).pop().ok_or_else(|| missing_child(node, "operator"))
}

/// Pairs each operator with the operand following it: `a op1 b op2 c`
/// becomes `(a, [(op1, b), (op2, c)])`.
fn chain<T, Op>(
    node: &ParseNode,
    operands: Vec<T>,
    ops: Vec<Op>,
) -> Result<(T, Vec<(Op, T)>), Error> {
    let mut operands = operands.into_iter();
    let first = operands.next().ok_or_else(|| missing_child(node, "operand"))?;

    if operands.len() != ops.len() {
        return Err(missing_child(node, "operator"));
    }

    Ok((first, ops.into_iter().zip(operands).collect()))
}

/// Folds `a, b, c` into `f(f(a, b), c)`.
fn fold_left(
    node: &ParseNode,
    operands: Vec<LogicExpr>,
    combine: impl Fn(LogicExpr, LogicExpr) -> LogicExpr,
) -> Result<LogicExpr, Error> {
    let mut operands = operands.into_iter();
    let first = operands.next().ok_or_else(|| missing_child(node, "operand"))?;
    Ok(operands.fold(first, combine))
}
