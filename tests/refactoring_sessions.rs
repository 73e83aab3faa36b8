//! Independent refactoring sessions sharing one immutable tree.
//!
//! Every session owns its analyzer and rewrite; only the tree and the
//! binding table are shared between threads.

use rayon::prelude::*;

use javelin::ast::{NodeArena, NodeIndex, PrimitiveTypeCode, layout};
use javelin::binder::{DeclarationFlags, ScopeAnalyzer};
use javelin::bindings::{BindingResolver, BindingTable, ClassKind, PrimitiveKind};
use javelin::common::Modifiers;
use javelin::query::ExpressionQueries;
use javelin::rewrite::{AstRewrite, Replacer, RewriteNode, StatementRewrite};
use javelin::solver::TypeRules;
use javelin::{AnalysisResult, BindingId};

/// `class C { void foo(int v) {} void m() { int x = 1; foo(x); } }`
struct Program {
    arena: NodeArena,
    table: BindingTable,
    cu: NodeIndex,
    call_statement: NodeIndex,
    argument: NodeIndex,
    text: String,
    x: BindingId,
}

fn program() -> Program {
    let mut table = BindingTable::with_core_library();
    let int = table.primitive(PrimitiveKind::Int);
    let void = table.void_type();
    let c = table.add_class("p", "C", ClassKind::Class, Modifiers::empty());
    let foo = table.add_method(c, "foo", &[int], void, Modifiers::empty()).unwrap();
    let m = table.add_method(c, "m", &[], void, Modifiers::empty()).unwrap();
    let x = table.add_local_variable(m, "x", int).unwrap();

    let mut arena = NodeArena::new();
    let ty = arena.add_primitive_type(PrimitiveTypeCode::Int);
    let x_name = arena.add_simple_name("x");
    let one = arena.add_number_literal("1");
    let fragment = arena.add_variable_declaration_fragment(x_name, one);
    arena.set_binding(fragment, x);
    let declaration = arena.add_variable_declaration_statement(ty, vec![fragment]);

    let argument = arena.add_simple_name("x");
    arena.set_binding(argument, x);
    arena.set_type_binding(argument, int);
    let foo_name = arena.add_simple_name("foo");
    let call = arena.add_method_invocation(NodeIndex::NONE, foo_name, vec![argument]);
    arena.set_binding(call, foo);
    let call_statement = arena.add_expression_statement(call);

    let body = arena.add_block(vec![declaration, call_statement]);
    let ret = arena.add_primitive_type(PrimitiveTypeCode::Void);
    let m_name = arena.add_simple_name("m");
    let method = arena.add_method_declaration(vec![], ret, m_name, vec![], body);
    arena.set_binding(method, m);
    let class_name = arena.add_simple_name("C");
    let class =
        arena.add_type_declaration(vec![], false, class_name, NodeIndex::NONE, vec![], vec![method]);
    arena.set_binding(class, c);
    let cu = arena.add_compilation_unit(NodeIndex::NONE, vec![], vec![class]);
    let text = layout(&mut arena, cu);

    Program {
        arena,
        table,
        cu,
        call_statement,
        argument,
        text,
        x,
    }
}

#[derive(Debug, PartialEq)]
struct SessionResult {
    visible: Vec<BindingId>,
    target: Option<BindingId>,
    widening: bool,
    change_set: String,
}

fn run_session(program: &Program, session: usize) -> AnalysisResult<SessionResult> {
    let resolver = BindingResolver::new(&program.table);

    let offset = program.text.find("foo(x)").unwrap_or_default() as u32;
    let mut analyzer = ScopeAnalyzer::new(&program.arena, program.cu, resolver.clone())?;
    let visible = analyzer.declarations_in_scope(offset, DeclarationFlags::VARIABLES)?;

    let queries = ExpressionQueries::new(&program.arena, resolver.clone());
    let target = queries.target_type(program.argument)?;

    let rules = TypeRules::new(resolver);
    let int = program.table.primitive(PrimitiveKind::Int);
    let long = program.table.primitive(PrimitiveKind::Long);
    let widening = rules.can_assign(int, long)?;

    let mut rewrite = AstRewrite::new(&program.arena);
    let group = rewrite.new_edit_group(format!("session {session}"));
    let moved = rewrite.create_move_target(program.call_statement, Some(group))?;
    let log = rewrite.create_synthetic(|arena| {
        let name = arena.add_simple_name("log");
        let call = arena.add_method_invocation(NodeIndex::NONE, name, vec![]);
        arena.add_expression_statement(call)
    })?;
    let replacement = rewrite.create_synthetic(|arena| {
        let name = arena.add_simple_name("y");
        arena.add_expression_statement(name)
    })?;
    rewrite
        .list(
            program.arena.parent(program.call_statement).unwrap_or(NodeIndex::NONE),
            javelin::ast::ChildSlot::BlockStatements,
        )?
        .insert_last(moved, Some(group))?;
    StatementRewrite.replace(
        &mut rewrite,
        &[moved],
        &[log, replacement],
        Some(group),
    )?;
    let changes = rewrite.commit();
    let change_set = changes
        .to_json()?
        .replace(&format!("session {session}"), "session");

    Ok(SessionResult {
        visible,
        target,
        widening,
        change_set,
    })
}

#[test]
fn test_parallel_sessions_agree() {
    let program = program();
    let results = (0..16)
        .into_par_iter()
        .map(|session| run_session(&program, session))
        .collect::<Vec<_>>();

    let first = results[0].as_ref().unwrap();
    assert!(first.visible.contains(&program.x));
    assert_eq!(first.target, Some(program.table.primitive(PrimitiveKind::Int)));
    assert!(first.widening);
    for result in &results {
        assert_eq!(result.as_ref().unwrap(), first);
    }
}

#[test]
fn test_sessions_leave_the_tree_alone() {
    let program = program();
    let before = javelin::ast::print_node(&program.arena, program.cu);
    (0..8).into_par_iter().for_each(|session| {
        run_session(&program, session).unwrap();
    });
    assert_eq!(javelin::ast::print_node(&program.arena, program.cu), before);
}

#[test]
fn test_moved_statement_is_split_in_place() {
    let program = program();
    let result = run_session(&program, 0).unwrap();
    // Move target removed from the original position, then replaced by two
    // statements at the end of the block.
    let json: serde_json::Value = serde_json::from_str(&result.change_set).unwrap();
    let rewritten = json["lists"][0]["rewritten"].as_array().unwrap();
    assert_eq!(rewritten.len(), 3);
    assert_eq!(rewritten[0]["origin"], "original");
    assert_eq!(rewritten[1]["origin"], "created");
    assert_eq!(rewritten[2]["origin"], "created");
    let _: Vec<RewriteNode> = serde_json::from_value(json["lists"][0]["rewritten"].clone()).unwrap();
}
