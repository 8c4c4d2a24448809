use crate::ast::{
    ast::Program,
    declarations::{
        MethodBody, MethodDeclaration, Parameter, TypeBody, TypeDeclaration, VariableDeclaration,
    },
    expressions::{Expression, Factor, Logic, LogicExpr, MethodCall, Term},
    generics::Concept,
    statements::{Block, IfStatement},
};

/// One entry of the reducer's operand stack.
///
/// Containers (`Program`, `TypeBody`, `MethodBody`, `Block`) and declarations
/// are pushed half-built on rule entry and filled in by descendant exits;
/// expression-level operands are pushed complete on rule exit.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    Program(Program),
    TypeDeclaration(TypeDeclaration),
    TypeBody(TypeBody),
    MethodDeclaration(MethodDeclaration),
    ParamList(Vec<Parameter>),
    MethodBody(MethodBody),
    VariableDeclaration(VariableDeclaration),
    Concept(Concept),
    /// Entered `statement` whose body has not been reduced yet
    PendingStatement,
    Block(Block),
    IfStatement(IfStatement),
    Logic(Logic),
    LogicExpr(LogicExpr),
    Expression(Expression),
    Term(Term),
    Factor(Factor),
    MethodCall(MethodCall),
}

impl Operand {
    pub fn variant_name(&self) -> &'static str {
        match self {
            Operand::Program(_) => "Program",
            Operand::TypeDeclaration(_) => "TypeDeclaration",
            Operand::TypeBody(_) => "TypeBody",
            Operand::MethodDeclaration(_) => "MethodDeclaration",
            Operand::ParamList(_) => "ParamList",
            Operand::MethodBody(_) => "MethodBody",
            Operand::VariableDeclaration(_) => "VariableDeclaration",
            Operand::Concept(_) => "Concept",
            Operand::PendingStatement => "PendingStatement",
            Operand::Block(_) => "Block",
            Operand::IfStatement(_) => "IfStatement",
            Operand::Logic(_) => "Logic",
            Operand::LogicExpr(_) => "LogicExpr",
            Operand::Expression(_) => "Expression",
            Operand::Term(_) => "Term",
            Operand::Factor(_) => "Factor",
            Operand::MethodCall(_) => "MethodCall",
        }
    }
}
