//! Unit tests for the AST reducer.
//!
//! Well-formed input goes through the full pipeline; structural failures are
//! provoked with hand-built parse trees the parser itself would never emit.

use std::rc::Rc;

use rstest::rstest;

use crate::{
    ast::{
        ast::{BodyItem, Declaration, Member, Program},
        declarations::{
            MethodBody, MethodDeclaration, Parameter, Params, TypeBody, TypeDeclaration,
            VariableDeclaration,
        },
        expressions::{
            AdditiveOp, And, Equality, EqualityOp, Expression, Factor, Logic, LogicExpr, MethodCall,
            MultiplicativeOp, Or, Relational, RelationalOp, Term,
        },
        generics::{Concept, Constraint, GenericParameter, GenericType},
        statements::{Block, IfStatement, Placeholder, Statement},
    },
    errors::errors::ErrorImpl,
    lexer::{lexer::tokenize, tokens::Token},
    parse_program,
    parser::{
        parser::parse,
        tree::{ParseNode, Rule},
        walker::{walk, ParseListener},
    },
    Position,
};

use super::{operand::Operand, reducer::AstReducer};

fn program(source: &str) -> Program {
    parse_program(source, "test.exp").unwrap()
}

fn body(source: &str) -> Vec<Declaration> {
    program(source).body
}

/// Statements of the single method declared in `source`.
fn method_items(source: &str) -> Vec<BodyItem> {
    match body(source).remove(0) {
        Declaration::Method(MethodDeclaration { body: Some(body), .. }) => body.body,
        other => panic!("expected a method with a body, got {:?}", other),
    }
}

fn statement(source: &str) -> Statement {
    match method_items(&format!("method run() {{ {} }}", source)).remove(0) {
        BodyItem::Statement(statement) => statement,
        other => panic!("expected a statement, got {:?}", other),
    }
}

fn expression_statement(source: &str) -> Expression {
    match statement(source).body {
        crate::ast::statements::StatementBody::Expression(expression) => expression,
        other => panic!("expected an expression statement, got {:?}", other),
    }
}

fn condition(source: &str) -> LogicExpr {
    match statement(&format!("if ({}) {{ }}", source)).body {
        crate::ast::statements::StatementBody::If(statement) => statement.condition.root,
        other => panic!("expected an if statement, got {:?}", other),
    }
}

fn num(value: i64) -> Expression {
    Expression::from(Factor::int(value))
}

fn var(name: &str) -> Expression {
    Expression::from(Factor::ident(name))
}

fn empty_method(name: &str) -> MethodDeclaration {
    MethodDeclaration::new(name, Params::default(), Some(MethodBody::default()))
}

fn token(source: &str) -> Token {
    tokenize(source.to_string(), None).unwrap().remove(0)
}

fn node(rule: Rule) -> ParseNode {
    ParseNode::new(rule, Position(0, Rc::new(String::from("test.exp"))))
}

fn reduce_tree(tree: &ParseNode) -> Result<Program, crate::errors::errors::Error> {
    let mut reducer = AstReducer::new();
    walk(&mut reducer, tree)?;
    reducer.finish()
}

// DECLARATIONS

#[test]
fn test_forward_type_declaration() {
    assert_eq!(body("type Example;"), vec![TypeDeclaration::new("Example", None).into()]);
}

#[test]
fn test_method_signature() {
    assert_eq!(
        body("method doSomething();"),
        vec![MethodDeclaration::new("doSomething", Params::new(vec![]), None).into()]
    );
}

#[test]
fn test_method_signature_with_params() {
    assert_eq!(
        body("method doSomething(int a, float b);"),
        vec![MethodDeclaration::new(
            "doSomething",
            Params::new(vec![Parameter::new("int", "a"), Parameter::new("float", "b")]),
            None
        )
        .into()]
    );
}

#[test]
fn test_generic_parameter_type_text() {
    let declarations = body("method put(Map<string, List<int>> table, T value);");
    let Declaration::Method(method) = &declarations[0] else {
        panic!("expected a method");
    };

    assert_eq!(method.params.parameters[0], Parameter::new("Map<string,List<int>>", "table"));
    assert_eq!(method.params.parameters[1], Parameter::new("T", "value"));
}

#[test]
fn test_method_in_type() {
    let expected = TypeDeclaration::new(
        "Example",
        Some(TypeBody::new(vec![MethodDeclaration::new(
            "doSomething",
            Params::default(),
            Some(MethodBody::default()),
        )
        .into()])),
    );

    assert_eq!(body("type Example { method doSomething() { } }"), vec![expected.into()]);
}

#[test]
fn test_global_variable() {
    assert_eq!(
        body("int ExampleVar = 0;"),
        vec![VariableDeclaration::new("int", "ExampleVar", Some(num(0))).into()]
    );
}

#[test]
fn test_variable_without_initializer() {
    assert_eq!(body("int counter;"), vec![VariableDeclaration::new("int", "counter", None).into()]);
}

#[test]
fn test_type_body_preserves_member_order() {
    let source = "
        type Example {
            int exampleVar = 0;
            method doSomething() { }
            int trailing;
        }
        int globalVar = 0;
        method doAnotherThing() { }
    ";

    let type_body = TypeBody::new(vec![
        Member::Variable(VariableDeclaration::new("int", "exampleVar", Some(num(0)))),
        Member::Method(empty_method("doSomething")),
        Member::Variable(VariableDeclaration::new("int", "trailing", None)),
    ]);

    assert_eq!(
        body(source),
        vec![
            TypeDeclaration::new("Example", Some(type_body)).into(),
            VariableDeclaration::new("int", "globalVar", Some(num(0))).into(),
            empty_method("doAnotherThing").into(),
        ]
    );
}

#[test]
fn test_nested_type_declaration() {
    let expected = TypeDeclaration::new(
        "Outer",
        Some(TypeBody::new(vec![
            Member::Type(TypeDeclaration::new("Inner", None)),
            Member::Type(TypeDeclaration::new("Other", Some(TypeBody::default()))),
        ])),
    );

    assert_eq!(body("type Outer { type Inner; type Other { } }"), vec![expected.into()]);
}

#[test]
fn test_variable_inside_method_inside_type() {
    let source = "type Example { method doSomething() { int exampleVar = 0; } }";
    let method = MethodDeclaration::new(
        "doSomething",
        Params::default(),
        Some(MethodBody::new(vec![
            VariableDeclaration::new("int", "exampleVar", Some(num(0))).into()
        ])),
    );

    assert_eq!(
        body(source),
        vec![TypeDeclaration::new("Example", Some(TypeBody::new(vec![method.into()]))).into()]
    );
}

#[test]
fn test_generic_type_declaration() {
    let members = TypeBody::new(vec![VariableDeclaration::new("T", "value", None).into()]);
    let expected = TypeDeclaration::new("Box", Some(members)).with_generics(vec![
            GenericParameter::new("T", vec![String::from("Comparable"), String::from("Hashable")]),
            GenericParameter::new("U", vec![]),
        ]);

    assert_eq!(body("type Box<T: Comparable + Hashable, U> { T value; }"), vec![expected.into()]);
}

#[test]
fn test_concept_declaration() {
    let expected = Concept::new(
        "Ordered",
        "T",
        vec![
            Constraint::new("Equatable", vec![GenericType::simple("T")]),
            Constraint::new(
                "Convertible",
                vec![
                    GenericType::simple("T"),
                    GenericType::new("List", vec![GenericType::simple("T")]),
                ],
            ),
        ],
    );

    assert_eq!(
        body("concept Ordered<T> requires Equatable<T>, Convertible<T, List<T>>;"),
        vec![expected.into()]
    );
    assert_eq!(body("concept Any<T>;"), vec![Concept::new("Any", "T", vec![]).into()]);
}

#[rstest]
#[case("", 0)]
#[case("type A;", 1)]
#[case("type A; type B { int x; } method m(); int y = 1;", 4)]
#[case("concept C<T>; type A<T: C>;", 2)]
fn test_top_level_declaration_count(#[case] source: &str, #[case] expected: usize) {
    assert_eq!(program(source).body.len(), expected);
}

// EXPRESSIONS

#[rstest]
#[case("42;", num(42))]
#[case("x;", var("x"))]
#[case(
    "3 + 5;",
    Expression::new(Factor::int(3), vec![(AdditiveOp::Add, Term::from(Factor::int(5)))])
)]
#[case(
    "3 * 5;",
    Expression::from(Term::new(Factor::int(3), vec![(MultiplicativeOp::Multiply, Factor::int(5))]))
)]
fn test_simple_expressions(#[case] source: &str, #[case] expected: Expression) {
    assert_eq!(expression_statement(source), expected);
}

#[test]
fn test_multiplication_binds_inside_term() {
    let expected = Expression::new(
        Factor::int(1),
        vec![(
            AdditiveOp::Add,
            Term::new(Factor::int(2), vec![(MultiplicativeOp::Multiply, Factor::int(3))]),
        )],
    );

    assert_eq!(expression_statement("1 + 2 * 3;"), expected);
}

#[test]
fn test_additive_chain_is_flat_and_ordered() {
    let expected = Expression::new(
        Factor::int(1),
        vec![
            (AdditiveOp::Subtract, Term::from(Factor::int(2))),
            (AdditiveOp::Add, Term::from(Factor::int(3))),
            (AdditiveOp::Subtract, Term::from(Factor::ident("x"))),
        ],
    );

    assert_eq!(expression_statement("1 - 2 + 3 - x;"), expected);
}

#[test]
fn test_multiplicative_chain_is_ordered() {
    let expected = Term::new(
        Factor::int(8),
        vec![
            (MultiplicativeOp::Divide, Factor::int(4)),
            (MultiplicativeOp::Multiply, Factor::int(2)),
        ],
    );

    assert_eq!(expression_statement("8 / 4 * 2;"), Expression::from(expected));
}

#[test]
fn test_parenthesized_expression() {
    let inner =
        Expression::new(Factor::int(1), vec![(AdditiveOp::Add, Term::from(Factor::int(2)))]);
    let product =
        Term::new(Factor::group(inner), vec![(MultiplicativeOp::Multiply, Factor::int(3))]);
    let expected = Expression::from(product);

    assert_eq!(expression_statement("(1 + 2) * 3;"), expected);
}

#[test]
fn test_call_without_arguments() {
    let expected = MethodCall::new("foo", vec![]);
    assert_eq!(expression_statement("foo();"), Expression::from(Factor::Call(expected)));
}

#[test]
fn test_call_arguments_keep_source_order() {
    let expected = MethodCall::new("foo", vec![num(1), num(2), var("x")]);
    assert_eq!(expression_statement("foo(1, 2, x);"), Expression::from(Factor::Call(expected)));
}

#[test]
fn test_nested_calls() {
    let inner = MethodCall::new("bar", vec![var("y")]);
    let sum =
        Expression::new(Factor::Call(inner), vec![(AdditiveOp::Add, Term::from(Factor::int(1)))]);
    let expected = MethodCall::new("foo", vec![sum, num(2)]);

    assert_eq!(
        expression_statement("foo(bar(y) + 1, 2);"),
        Expression::from(Factor::Call(expected))
    );
}

// STATEMENTS

#[test]
fn test_statements_and_variables_interleave() {
    let items = method_items("method run() { int a = 1; a; ; { b; } }");

    assert_eq!(
        items,
        vec![
            VariableDeclaration::new("int", "a", Some(num(1))).into(),
            Statement::new(var("a")).into(),
            Statement::new(Placeholder).into(),
            Statement::new(Block::new(vec![Statement::new(var("b")).into()])).into(),
        ]
    );
}

#[test]
fn test_if_statement_keeps_condition_and_block_apart() {
    let print = MethodCall::new("print", vec![var("b")]);
    let expected = IfStatement::new(
        Logic::new(Relational::new(var("a"), RelationalOp::Less, num(10))),
        Block::new(vec![
            VariableDeclaration::new("int", "b", Some(var("a"))).into(),
            Statement::new(Expression::from(Factor::Call(print))).into(),
        ]),
    );

    assert_eq!(
        statement("if (a < 10) { int b = a; print(b); }"),
        Statement::new(expected)
    );
}

#[test]
fn test_nested_if() {
    let inner = IfStatement::new(Logic::new(var("y")), Block::default());
    let outer =
        IfStatement::new(Logic::new(var("x")), Block::new(vec![Statement::new(inner).into()]));

    assert_eq!(statement("if (x) { if (y) { } }"), Statement::new(outer));
}

// LOGIC

#[test]
fn test_relational_operands_in_source_order() {
    assert_eq!(
        condition("a >= b + 1"),
        Relational::new(
            var("a"),
            RelationalOp::GreaterEquals,
            Expression::new(Factor::ident("b"), vec![(AdditiveOp::Add, Term::from(Factor::int(1)))])
        )
        .into()
    );
}

#[test]
fn test_equality_operands_in_source_order() {
    assert_eq!(
        condition("a < b != c"),
        Equality::new(
            Relational::new(var("a"), RelationalOp::Less, var("b")),
            EqualityOp::NotEquals,
            var("c")
        )
        .into()
    );
}

#[test]
fn test_and_binds_tighter_than_or() {
    assert_eq!(
        condition("a || b && c"),
        Or::new(var("a"), And::new(var("b"), var("c"))).into()
    );
}

#[test]
fn test_logic_chains_fold_left() {
    assert_eq!(
        condition("a || b || c"),
        Or::new(Or::new(var("a"), var("b")), var("c")).into()
    );
    assert_eq!(
        condition("a && b && c"),
        And::new(And::new(var("a"), var("b")), var("c")).into()
    );
}

#[test]
fn test_single_operand_logic_passes_through() {
    assert_eq!(condition("ready"), LogicExpr::Expression(var("ready")));
}

// WALK PROPERTIES

#[test]
fn test_rewalk_is_structurally_equal() {
    let source = "type A { int x = 1 + 2; method m(int y) { if (y == x && y > 0) { m(y - 1); } } }";
    let tokens = tokenize(source.to_string(), None).unwrap();
    let tree = parse(tokens, Rc::new(String::from("shell"))).unwrap();

    let first = reduce_tree(&tree).unwrap();
    let second = reduce_tree(&tree).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_program_is_sole_operand_after_walk() {
    let tokens = tokenize("type A; int x = 1;".to_string(), None).unwrap();
    let tree = parse(tokens, Rc::new(String::from("shell"))).unwrap();

    let mut reducer = AstReducer::new();
    walk(&mut reducer, &tree).unwrap();

    assert_eq!(reducer.depth(), 1);
    assert!(matches!(reducer.stack()[0], Operand::Program(_)));
}

// STRUCTURAL FAILURES

#[test]
fn test_finish_without_walk_is_unbalanced() {
    let error = AstReducer::new().finish().unwrap_err();
    assert_eq!(error.get_impl(), &ErrorImpl::UnbalancedStack { remaining: 0 });
}

#[test]
fn test_type_body_outside_type_declaration() {
    let mut root = node(Rule::Program);
    let mut type_body = node(Rule::TypeBody);
    type_body.push_token(token("{"));
    type_body.push_token(token("}"));
    root.push_rule(type_body);

    let error = reduce_tree(&root).unwrap_err();
    assert_eq!(
        error.get_impl(),
        &ErrorImpl::UnexpectedOperand {
            rule: Rule::TypeBody,
            expected: "TypeDeclaration",
            found: "Program",
        }
    );
}

#[test]
fn test_term_without_factors() {
    let mut root = node(Rule::Program);
    let mut variable = node(Rule::VariableDeclaration);
    let mut type_name = node(Rule::TypeName);
    type_name.push_token(token("int"));
    variable.push_rule(type_name);
    variable.push_token(token("x"));

    let mut expression = node(Rule::Expression);
    expression.push_rule(node(Rule::Term));
    variable.push_rule(expression);
    root.push_rule(variable);

    let error = reduce_tree(&root).unwrap_err();
    assert_eq!(error.get_impl(), &ErrorImpl::MissingChild { rule: Rule::Term, child: "operand" });
    assert!(error.is_structural());
}

#[test]
fn test_statement_without_alternative() {
    let mut root = node(Rule::Program);
    let mut method = node(Rule::MethodDeclaration);
    method.push_token(token("method"));
    method.push_token(token("run"));
    let mut method_body = node(Rule::MethodBody);
    method_body.push_rule(node(Rule::Statement));
    method.push_rule(method_body);
    root.push_rule(method);

    let error = reduce_tree(&root).unwrap_err();
    assert_eq!(
        error.get_impl(),
        &ErrorImpl::MissingChild {
            rule: Rule::Statement,
            child: "statement alternative",
        }
    );
}

#[test]
fn test_statement_at_top_level_is_rejected() {
    let mut root = node(Rule::Program);
    let mut statement = node(Rule::Statement);
    let mut placeholder = node(Rule::Placeholder);
    placeholder.push_token(token(";"));
    statement.push_rule(placeholder);
    root.push_rule(statement);

    let error = reduce_tree(&root).unwrap_err();
    assert_eq!(
        error.get_impl(),
        &ErrorImpl::UnexpectedOperand {
            rule: Rule::Statement,
            expected: "MethodBody or Block",
            found: "Program",
        }
    );
}

#[test]
fn test_expression_root_leaves_no_program() {
    let mut expression = node(Rule::Expression);
    let mut term = node(Rule::Term);
    let mut factor = node(Rule::Factor);
    factor.push_token(token("7"));
    term.push_rule(factor);
    expression.push_rule(term);

    let error = reduce_tree(&expression).unwrap_err();
    assert_eq!(
        error.get_impl(),
        &ErrorImpl::UnexpectedOperand {
            rule: Rule::Program,
            expected: "Program",
            found: "Expression",
        }
    );
}

#[test]
fn test_exit_without_enter_underflows() {
    let mut reducer = AstReducer::new();
    let error = ParseListener::exit_rule(&mut reducer, &node(Rule::IfStatement)).unwrap_err();

    assert_eq!(error.get_impl(), &ErrorImpl::EmptyOperandStack { rule: Rule::IfStatement });
}
