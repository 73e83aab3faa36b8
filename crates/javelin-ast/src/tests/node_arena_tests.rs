use crate::*;
use javelin_common::BindingId;

#[test]
fn test_children_record_parent_and_slot() {
    let mut arena = NodeArena::new();
    let a = arena.add_simple_name("a");
    let b = arena.add_simple_name("b");
    let sum = arena.add_infix(InfixOperator::Plus, a, b);

    assert_eq!(arena.parent(a), Some(sum));
    assert_eq!(arena.slot(a), Some(ChildSlot::InfixLeftOperand));
    assert_eq!(arena.slot(b), Some(ChildSlot::InfixRightOperand));
    assert_eq!(arena.parent(sum), None);
    assert_eq!(arena.child_in_slot(sum, ChildSlot::InfixRightOperand), Some(b));
}

#[test]
fn test_list_slots() {
    let mut arena = NodeArena::new();
    let s1 = arena.add_empty_statement();
    let s2 = arena.add_empty_statement();
    let block = arena.add_block(vec![s1, s2]);

    assert_eq!(arena.slot(s2), Some(ChildSlot::BlockStatements));
    assert!(ChildSlot::BlockStatements.is_list());
    let list = arena.containing_list(s2).unwrap();
    assert_eq!(list.position(s2), Some(1));
    assert_eq!(
        arena.list_in_slot(block, ChildSlot::BlockStatements).unwrap().len(),
        2
    );
    assert!(arena.child_in_slot(block, ChildSlot::BlockStatements).is_none());
}

#[test]
fn test_reparenting_an_owned_child_copies_it() {
    let mut arena = NodeArena::new();
    let x = arena.add_simple_name("x");
    let first = arena.add_parenthesized(x);
    // Using `x` again must not alias the node owned by `first`.
    let second = arena.add_parenthesized(x);

    let copy = arena.child_in_slot(second, ChildSlot::ParenthesizedExpression).unwrap();
    assert_ne!(copy, x);
    assert_eq!(arena.parent(x), Some(first));
    assert_eq!(arena.parent(copy), Some(second));
    assert_eq!(arena.identifier(copy), Some("x"));
}

#[test]
fn test_copy_subtree_between_arenas() {
    let mut source = NodeArena::new();
    let one = source.add_number_literal("1");
    let two = source.add_number_literal("2");
    let sum = source.add_infix(InfixOperator::Plus, one, two);
    source.set_type_binding(sum, BindingId(7));

    let mut target = NodeArena::new();
    let copy = target.copy_subtree_from(&source, sum);
    assert_eq!(target.parent(copy), None);
    assert_eq!(target.type_binding(copy), Some(BindingId(7)));
    assert_eq!(print_node(&target, copy), "1 + 2");
    let left = target.child_in_slot(copy, ChildSlot::InfixLeftOperand).unwrap();
    assert_eq!(target.parent(left), Some(copy));
}

#[test]
fn test_declaration_index() {
    let mut arena = NodeArena::new();
    let name = arena.add_simple_name("x");
    let fragment = arena.add_variable_declaration_fragment(name, NodeIndex::NONE);
    arena.set_binding(fragment, BindingId(3));
    // Names are not declarations.
    arena.set_binding(name, BindingId(3));
    assert_eq!(arena.declaration_of(BindingId(3)), Some(fragment));
}

#[test]
fn test_ancestor_queries() {
    let mut arena = NodeArena::new();
    let x = arena.add_simple_name("x");
    let stmt = arena.add_expression_statement(x);
    let block = arena.add_block(vec![stmt]);

    assert_eq!(arena.find_ancestor_of_kind(x, NodeKind::Block), Some(block));
    assert!(arena.is_ancestor_or_self(block, x));
    assert!(!arena.is_ancestor_or_self(x, block));
    assert_eq!(arena.root_of(x), block);
    assert_eq!(arena.descendants(block), vec![block, stmt, x]);
}

#[test]
fn test_modifier_slot_by_kind() {
    let mut arena = NodeArena::new();
    let ty = arena.add_primitive_type(PrimitiveTypeCode::Int);
    let name = arena.add_simple_name("f");
    let fragment = arena.add_variable_declaration_fragment(name, NodeIndex::NONE);
    let field = arena.add_field_declaration(vec![], ty, vec![fragment]);

    assert_eq!(
        arena.data(field).unwrap().modifier_slot(),
        Some(ChildSlot::FieldDeclarationModifiers)
    );
    assert_eq!(arena.data(fragment).unwrap().modifier_slot(), None);
}

#[test]
fn test_same_attributes_ignores_children() {
    let mut arena = NodeArena::new();
    let a = arena.add_simple_name("a");
    let b = arena.add_simple_name("b");
    let c = arena.add_simple_name("c");
    let d = arena.add_simple_name("d");
    let plus = arena.add_infix(InfixOperator::Plus, a, b);
    let other_plus = arena.add_infix(InfixOperator::Plus, c, d);
    let one = arena.add_number_literal("1");
    let two = arena.add_number_literal("2");
    let minus = arena.add_infix(InfixOperator::Minus, one, two);

    let data = |node| arena.data(node).unwrap();
    assert!(data(plus).same_attributes(data(other_plus)));
    assert!(!data(plus).same_attributes(data(minus)));
    assert!(!data(a).same_attributes(data(b)));
    assert!(!data(one).same_attributes(data(two)));
    assert!(!data(a).same_attributes(data(one)));
}
