use super::*;
use javelin_ast::NodeArena;
use javelin_bindings::{BindingResolver, BindingTable, ClassKind, PrimitiveKind};
use javelin_common::Modifiers;

fn typed_name(arena: &mut NodeArena, name: &str, ty: BindingId) -> NodeIndex {
    let node = arena.add_simple_name(name);
    arena.set_type_binding(node, ty);
    node
}

/// Detached initializer and a reference sitting in an expression
/// statement.
fn pair(arena: &mut NodeArena, initializer_type: BindingId, reference_type: BindingId) -> (NodeIndex, NodeIndex) {
    let initializer = typed_name(arena, "init", initializer_type);
    let reference = typed_name(arena, "ref", reference_type);
    arena.add_expression_statement(reference);
    (initializer, reference)
}

fn cast(table: &BindingTable, arena: &NodeArena, initializer: NodeIndex, reference: NodeIndex) -> Option<BindingId> {
    ExpressionQueries::new(arena, BindingResolver::new(table))
        .explicit_cast(initializer, reference)
        .unwrap()
}

#[test]
fn test_primitive_to_primitive() {
    let table = BindingTable::with_core_library();
    let int = table.primitive(PrimitiveKind::Int);
    let long = table.primitive(PrimitiveKind::Long);
    let mut arena = NodeArena::new();

    let (init, reference) = pair(&mut arena, int, long);
    assert_eq!(cast(&table, &arena, init, reference), Some(long));
    let (init, reference) = pair(&mut arena, int, int);
    assert_eq!(cast(&table, &arena, init, reference), None);
}

#[test]
fn test_boxing_and_unboxing() {
    let table = BindingTable::with_core_library();
    let int = table.primitive(PrimitiveKind::Int);
    let integer = table.find_type("java.lang.Integer").unwrap();
    let long_box = table.find_type("java.lang.Long").unwrap();
    let mut arena = NodeArena::new();

    // int into Integer boxes implicitly.
    let (init, reference) = pair(&mut arena, int, integer);
    assert_eq!(cast(&table, &arena, init, reference), None);

    // int into Long would box to the wrong type: cast to the unboxed kind.
    let (init, reference) = pair(&mut arena, int, long_box);
    assert_eq!(
        cast(&table, &arena, init, reference),
        Some(table.primitive(PrimitiveKind::Long))
    );

    // Integer into int unboxes; Long into int does not.
    let (init, reference) = pair(&mut arena, integer, int);
    assert_eq!(cast(&table, &arena, init, reference), None);
    let (init, reference) = pair(&mut arena, long_box, int);
    assert_eq!(cast(&table, &arena, init, reference), Some(int));
}

#[test]
fn test_boxed_receiver_needs_explicit_cast() {
    let table = BindingTable::with_core_library();
    let int = table.primitive(PrimitiveKind::Int);
    let integer = table.find_type("java.lang.Integer").unwrap();
    let mut arena = NodeArena::new();

    let initializer = typed_name(&mut arena, "init", int);
    let reference = typed_name(&mut arena, "boxed", integer);
    let wrapped = arena.add_parenthesized(reference);
    let name = arena.add_simple_name("toString");
    arena.add_method_invocation(wrapped, name, vec![]);
    assert_eq!(cast(&table, &arena, initializer, reference), Some(integer));
}

#[test]
fn test_raw_into_parameterized() {
    let mut table = BindingTable::with_core_library();
    let string = table.find_type("java.lang.String").unwrap();
    let list = table.add_class("util", "List", ClassKind::Interface, Modifiers::PUBLIC);
    table.add_type_variable(list, "E", &[]).unwrap();
    let raw = table.raw_type(list).unwrap();
    let strings = table.parameterized_type(list, &[string]).unwrap();
    let mut arena = NodeArena::new();

    let (init, reference) = pair(&mut arena, raw, strings);
    assert_eq!(cast(&table, &arena, init, reference), Some(strings));
}

#[test]
fn test_reference_types_cast_only_when_not_assignable() {
    let mut table = BindingTable::with_core_library();
    let object = table.java_lang_object().unwrap();
    let string = table.find_type("java.lang.String").unwrap();
    let holder = table.add_class("p", "Holder", ClassKind::Class, Modifiers::PUBLIC);
    let t = table.add_type_variable(holder, "T", &[]).unwrap();
    let mut arena = NodeArena::new();

    let (init, reference) = pair(&mut arena, object, string);
    assert_eq!(cast(&table, &arena, init, reference), Some(string));
    let (init, reference) = pair(&mut arena, string, object);
    assert_eq!(cast(&table, &arena, init, reference), None);
    // Casts to type variables are unchecked; leave them out.
    let (init, reference) = pair(&mut arena, object, t);
    assert_eq!(cast(&table, &arena, init, reference), None);
}

#[test]
fn test_lambda_keeps_its_target_unless_overloads_compete() {
    let mut table = BindingTable::with_core_library();
    let void = table.void_type();
    let string = table.find_type("java.lang.String").unwrap();
    let runnable = table.find_type("java.lang.Runnable").unwrap();
    let maker = table.add_class("p", "Maker", ClassKind::Interface, Modifiers::PUBLIC);
    table.add_method(maker, "get", &[], string, Modifiers::empty()).unwrap();
    let exec = table.add_class("p", "Exec", ClassKind::Class, Modifiers::PUBLIC);
    let run = table.add_method(exec, "run", &[runnable], void, Modifiers::PUBLIC).unwrap();
    let submit = table.add_method(exec, "submit", &[runnable], void, Modifiers::PUBLIC).unwrap();
    table.add_method(exec, "submit", &[maker], void, Modifiers::PUBLIC).unwrap();

    let mut arena = NodeArena::new();
    let argument_of = |arena: &mut NodeArena, method: BindingId, name: &str| {
        let receiver = typed_name(arena, "exec", exec);
        let reference = typed_name(arena, "task", runnable);
        let name = arena.add_simple_name(name);
        let invocation = arena.add_method_invocation(receiver, name, vec![reference]);
        arena.set_binding(invocation, method);
        let body = arena.add_block(vec![]);
        let lambda = arena.add_lambda(vec![], body);
        arena.set_type_binding(lambda, runnable);
        (lambda, reference)
    };
    let (lambda, reference) = argument_of(&mut arena, run, "run");
    assert_eq!(cast(&table, &arena, lambda, reference), None);
    let (lambda, reference) = argument_of(&mut arena, submit, "submit");
    assert_eq!(cast(&table, &arena, lambda, reference), Some(runnable));
}

#[test]
fn test_missing_types_need_no_cast() {
    let table = BindingTable::with_core_library();
    let int = table.primitive(PrimitiveKind::Int);
    let mut arena = NodeArena::new();
    let initializer = arena.add_simple_name("untyped");
    let reference = typed_name(&mut arena, "ref", int);
    assert_eq!(cast(&table, &arena, initializer, reference), None);
}
