use crate::flags::DeclarationFlags;
use crate::scope::{ScopeKind, ScopeTree};
use crate::scope_builder::ScopeBuilder;
use javelin_ast::{NodeArena, NodeData, NodeIndex, PrimitiveTypeCode, layout};
use javelin_common::{CancellationToken, ErrorKind};

fn int_local(arena: &mut NodeArena, name: &str) -> NodeIndex {
    let ty = arena.add_primitive_type(PrimitiveTypeCode::Int);
    let name = arena.add_simple_name(name);
    let value = arena.add_number_literal("0");
    let fragment = arena.add_variable_declaration_fragment(name, value);
    arena.add_variable_declaration_statement(ty, vec![fragment])
}

fn int_parameter(arena: &mut NodeArena, name: &str) -> NodeIndex {
    let ty = arena.add_primitive_type(PrimitiveTypeCode::Int);
    let name = arena.add_simple_name(name);
    arena.add_single_variable_declaration(ty, name)
}

fn marker(arena: &mut NodeArena, name: &str) -> NodeIndex {
    let name = arena.add_simple_name(name);
    arena.add_expression_statement(name)
}

fn method(arena: &mut NodeArena, statements: Vec<NodeIndex>) -> NodeIndex {
    let body = arena.add_block(statements);
    let void = arena.add_primitive_type(PrimitiveTypeCode::Void);
    let name = arena.add_simple_name("m");
    arena.add_method_declaration(vec![], void, name, vec![], body)
}

fn at(text: &str, needle: &str) -> u32 {
    text.find(needle).expect("needle in rendered text") as u32
}

#[test]
fn test_for_initializers_scoped_to_loop() {
    let mut arena = NodeArena::new();
    let ty = arena.add_primitive_type(PrimitiveTypeCode::Int);
    let i_name = arena.add_simple_name("i");
    let zero = arena.add_number_literal("0");
    let i = arena.add_variable_declaration_fragment(i_name, zero);
    let init = arena.add_variable_declaration_expression(ty, vec![i]);
    let inside = marker(&mut arena, "inside");
    let loop_body = arena.add_block(vec![inside]);
    let for_stmt = arena.add_for(vec![init], NodeIndex::NONE, vec![], loop_body);
    let after = marker(&mut arena, "after");
    let m = method(&mut arena, vec![for_stmt, after]);
    let text = layout(&mut arena, m);

    let tree = ScopeTree::build(&arena, m).unwrap();
    let for_scope = tree.scope_of_node(for_stmt).unwrap();
    assert_eq!(tree.get(for_scope).unwrap().kind, ScopeKind::For);
    assert_eq!(tree.visible_names_at(at(&text, "inside")), vec!["i"]);
    assert!(tree.visible_names_at(at(&text, "after")).is_empty());
}

#[test]
fn test_catch_parameter_visible_in_its_body_only() {
    let mut arena = NodeArena::new();
    let e = int_parameter(&mut arena, "e");
    let handler = marker(&mut arena, "handler");
    let catch_body = arena.add_block(vec![handler]);
    let clause = arena.add_catch_clause(e, catch_body);
    let guarded = marker(&mut arena, "guarded");
    let try_body = arena.add_block(vec![guarded]);
    let try_stmt = arena.add_try(try_body, vec![clause], NodeIndex::NONE);
    let m = method(&mut arena, vec![try_stmt]);
    let text = layout(&mut arena, m);

    let tree = ScopeTree::build(&arena, m).unwrap();
    assert_eq!(tree.visible_names_at(at(&text, "handler")), vec!["e"]);
    assert!(tree.visible_names_at(at(&text, "guarded")).is_empty());
}

#[test]
fn test_try_resources_not_visible_in_catch() {
    let mut arena = NodeArena::new();
    let ty = arena.add_primitive_type(PrimitiveTypeCode::Int);
    let r_name = arena.add_simple_name("r");
    let zero = arena.add_number_literal("0");
    let r = arena.add_variable_declaration_fragment(r_name, zero);
    let resource = arena.add_variable_declaration_expression(ty, vec![r]);
    let guarded = marker(&mut arena, "guarded");
    let try_body = arena.add_block(vec![guarded]);
    let e = int_parameter(&mut arena, "e");
    let handler = marker(&mut arena, "handler");
    let catch_body = arena.add_block(vec![handler]);
    let clause = arena.add_catch_clause(e, catch_body);
    let try_stmt = arena.add_node(NodeData::Try {
        resources: vec![resource].into(),
        body: try_body,
        catch_clauses: vec![clause].into(),
        finally: NodeIndex::NONE,
    });
    let m = method(&mut arena, vec![try_stmt]);
    let text = layout(&mut arena, m);

    let tree = ScopeTree::build(&arena, m).unwrap();
    assert_eq!(tree.visible_names_at(at(&text, "guarded")), vec!["r"]);
    assert_eq!(tree.visible_names_at(at(&text, "handler")), vec!["e"]);
}

#[test]
fn test_enhanced_for_parameter() {
    let mut arena = NodeArena::new();
    let item = int_parameter(&mut arena, "item");
    let items = arena.add_simple_name("items");
    let use_item = marker(&mut arena, "use");
    let loop_body = arena.add_block(vec![use_item]);
    let each = arena.add_enhanced_for(item, items, loop_body);
    let m = method(&mut arena, vec![each]);
    let text = layout(&mut arena, m);

    let tree = ScopeTree::build(&arena, m).unwrap();
    let scope = tree.scope_of_node(each).unwrap();
    assert_eq!(tree.get(scope).unwrap().kind, ScopeKind::EnhancedFor);
    assert_eq!(tree.visible_names_at(at(&text, "use")), vec!["item"]);
}

#[test]
fn test_switch_declarations_flow_into_later_cases() {
    let mut arena = NodeArena::new();
    let subject = arena.add_simple_name("k");
    let one = arena.add_number_literal("1");
    let first_case = arena.add_switch_case(one);
    let shared = int_local(&mut arena, "shared");
    let two = arena.add_number_literal("2");
    let second_case = arena.add_switch_case(two);
    let later = marker(&mut arena, "later");
    let switch = arena.add_switch(subject, vec![first_case, shared, second_case, later]);
    let after = marker(&mut arena, "after");
    let m = method(&mut arena, vec![switch, after]);
    let text = layout(&mut arena, m);

    let tree = ScopeTree::build(&arena, m).unwrap();
    assert_eq!(tree.visible_names_at(at(&text, "later")), vec!["shared"]);
    assert!(tree.visible_names_at(at(&text, "after")).is_empty());
}

#[test]
fn test_local_type_visible_after_its_declaration_ends() {
    let mut arena = NodeArena::new();
    let type_name = arena.add_simple_name("Local");
    let inside = marker(&mut arena, "insideLocal");
    let run = method(&mut arena, vec![inside]);
    let local = arena.add_type_declaration(vec![], false, type_name, NodeIndex::NONE, vec![], vec![run]);
    let statement = arena.add_type_declaration_statement(local);
    let after = marker(&mut arena, "afterLocal");
    let m = method(&mut arena, vec![statement, after]);
    let text = layout(&mut arena, m);

    let tree = ScopeTree::build(&arena, m).unwrap();
    let after_offset = at(&text, "afterLocal");
    let types = tree.declarations_visible_at(after_offset, DeclarationFlags::TYPES);
    assert_eq!(types.len(), 1);
    assert_eq!(types[0].name, "Local");
    assert!(
        tree.declarations_visible_at(at(&text, "insideLocal"), DeclarationFlags::TYPES)
            .is_empty()
    );
    // The local type's body is not part of this tree.
    assert_eq!(tree.len(), 2);
}

#[test]
fn test_lambda_bodies_are_separate_trees() {
    let mut arena = NodeArena::new();
    let q_name = arena.add_simple_name("q");
    let q = arena.add_variable_declaration_fragment(q_name, NodeIndex::NONE);
    let inner = int_local(&mut arena, "inner");
    let lambda_body = arena.add_block(vec![inner]);
    let lambda = arena.add_lambda(vec![q], lambda_body);
    let call_name = arena.add_simple_name("submit");
    let call = arena.add_method_invocation(NodeIndex::NONE, call_name, vec![lambda]);
    let statement = arena.add_expression_statement(call);
    let m = method(&mut arena, vec![statement]);
    layout(&mut arena, m);

    let tree = ScopeTree::build(&arena, m).unwrap();
    assert_eq!(tree.lambdas(), &[lambda]);
    assert!(tree.iter().all(|(_, s)| !s.declares("inner") && !s.declares("q")));

    let lambda_tree = ScopeTree::build(&arena, lambda).unwrap();
    let root = lambda_tree.get(lambda_tree.root()).unwrap();
    assert_eq!(root.kind, ScopeKind::Lambda);
    assert!(root.declares("q"));
    assert!(lambda_tree.iter().any(|(_, s)| s.declares("inner")));
}

#[test]
fn test_anonymous_class_members_are_not_locals() {
    let mut arena = NodeArena::new();
    let field_ty = arena.add_primitive_type(PrimitiveTypeCode::Int);
    let hidden_name = arena.add_simple_name("hidden");
    let hidden = arena.add_variable_declaration_fragment(hidden_name, NodeIndex::NONE);
    let field = arena.add_field_declaration(vec![], field_ty, vec![hidden]);
    let anonymous = arena.add_anonymous_class(vec![field]);
    let ty = arena.add_named_type("Object");
    let creation = arena.add_class_instance_creation(ty, vec![], anonymous);
    let statement = arena.add_expression_statement(creation);
    let after = marker(&mut arena, "after");
    let m = method(&mut arena, vec![statement, after]);
    let text = layout(&mut arena, m);

    let tree = ScopeTree::build(&arena, m).unwrap();
    assert!(tree.visible_names_at(at(&text, "after")).is_empty());
}

#[test]
fn test_rejects_non_body_roots() {
    let mut arena = NodeArena::new();
    let name = arena.add_simple_name("x");
    layout(&mut arena, name);
    let err = ScopeTree::build(&arena, name).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Precondition);
}

#[test]
fn test_unpositioned_body_is_malformed() {
    let mut arena = NodeArena::new();
    let m = method(&mut arena, vec![]);
    let err = ScopeTree::build(&arena, m).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Malformed);
}

#[test]
fn test_cancelled_build() {
    let mut arena = NodeArena::new();
    let x = int_local(&mut arena, "x");
    let m = method(&mut arena, vec![x]);
    layout(&mut arena, m);
    let token = CancellationToken::new();
    token.cancel();
    let err = ScopeBuilder::new(&arena)
        .with_cancellation(token)
        .build(m)
        .unwrap_err();
    assert!(err.is_cancelled());
}
