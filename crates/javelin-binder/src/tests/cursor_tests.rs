use crate::cursor::ScopeCursor;
use crate::flags::DeclarationFlags;
use crate::scope::ScopeTree;
use javelin_ast::{NodeArena, NodeIndex, PrimitiveTypeCode, layout};
use javelin_common::ErrorKind;

fn int_local(arena: &mut NodeArena, name: &str) -> NodeIndex {
    let ty = arena.add_primitive_type(PrimitiveTypeCode::Int);
    let name = arena.add_simple_name(name);
    let value = arena.add_number_literal("0");
    let fragment = arena.add_variable_declaration_fragment(name, value);
    arena.add_variable_declaration_statement(ty, vec![fragment])
}

/// `void m() { int a = 0; int b = 0; { int c = 0; } }`
fn straight_line() -> (NodeArena, NodeIndex, String) {
    let mut arena = NodeArena::new();
    let a = int_local(&mut arena, "a");
    let b = int_local(&mut arena, "b");
    let c = int_local(&mut arena, "c");
    let inner = arena.add_block(vec![c]);
    let body = arena.add_block(vec![a, b, inner]);
    let void = arena.add_primitive_type(PrimitiveTypeCode::Void);
    let name = arena.add_simple_name("m");
    let method = arena.add_method_declaration(vec![], void, name, vec![], body);
    let text = layout(&mut arena, method);
    (arena, method, text)
}

fn names<'t>(declarations: &[&'t crate::scope::ScopeDeclaration]) -> Vec<&'t str> {
    declarations.iter().map(|d| d.name.as_str()).collect()
}

#[test]
fn test_advance_reports_newly_visible_in_source_order() {
    let (arena, method, text) = straight_line();
    let tree = ScopeTree::build(&arena, method).unwrap();
    let start = text.find('{').unwrap() as u32;
    let mut cursor = ScopeCursor::new(&tree, start);

    let past_b = text.find("{ int c").unwrap() as u32;
    let revealed = cursor.advance_to(past_b).unwrap();
    assert_eq!(names(&revealed), vec!["a", "b"]);
    assert_eq!(cursor.position(), past_b);

    let past_c = text.find("} }").unwrap() as u32;
    let revealed = cursor.advance_to(past_c).unwrap();
    assert_eq!(names(&revealed), vec!["c"]);
    assert_eq!(names(&cursor.visible(DeclarationFlags::VARIABLES)), vec!["c", "b", "a"]);
}

#[test]
fn test_advance_to_same_position_reveals_nothing_new() {
    let (arena, method, text) = straight_line();
    let tree = ScopeTree::build(&arena, method).unwrap();
    let end = text.find("} }").unwrap() as u32;
    let mut cursor = ScopeCursor::new(&tree, end);
    assert!(cursor.advance_to(end).unwrap().is_empty());
}

#[test]
fn test_cursor_never_moves_backwards() {
    let (arena, method, text) = straight_line();
    let tree = ScopeTree::build(&arena, method).unwrap();
    let end = text.find("} }").unwrap() as u32;
    let mut cursor = ScopeCursor::new(&tree, end);
    let err = cursor.advance_to(0).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Precondition);
    assert_eq!(cursor.position(), end);
}
