use super::*;
use javelin_ast::{NodeArena, NodeIndex, PrimitiveTypeCode};

fn field(arena: &mut NodeArena, name: &str, modifiers: Modifiers) -> NodeIndex {
    let modifiers = arena.add_modifiers(modifiers);
    let ty = arena.add_primitive_type(PrimitiveTypeCode::Int);
    let name = arena.add_simple_name(name);
    let fragment = arena.add_variable_declaration_fragment(name, NodeIndex::NONE);
    arena.add_field_declaration(modifiers, ty, vec![fragment])
}

fn method(arena: &mut NodeArena, name: &str, modifiers: Modifiers) -> NodeIndex {
    let modifiers = arena.add_modifiers(modifiers);
    let ret = arena.add_primitive_type(PrimitiveTypeCode::Void);
    let name = arena.add_simple_name(name);
    let body = arena.add_block(vec![]);
    arena.add_method_declaration(modifiers, ret, name, vec![], body)
}

fn constructor(arena: &mut NodeArena) -> NodeIndex {
    let name = arena.add_simple_name("C");
    let body = arena.add_block(vec![]);
    arena.add_constructor_declaration(vec![], name, vec![], body)
}

/// `class C { static final int K; int f; C() {} void m() {} }`
struct Fixture {
    arena: NodeArena,
    class: NodeIndex,
}

fn fixture() -> Fixture {
    let mut arena = NodeArena::new();
    let members = vec![
        field(&mut arena, "K", Modifiers::STATIC | Modifiers::FINAL),
        field(&mut arena, "f", Modifiers::empty()),
        constructor(&mut arena),
        method(&mut arena, "m", Modifiers::empty()),
    ];
    let name = arena.add_simple_name("C");
    let class = arena.add_type_declaration(vec![], false, name, NodeIndex::NONE, vec![], members);
    Fixture { arena, class }
}

fn insert(
    rewrite: &mut AstRewrite<'_>,
    class: NodeIndex,
    build: impl FnOnce(&mut NodeArena) -> NodeIndex,
    options: &AnalysisOptions,
) -> usize {
    let member = rewrite.create_synthetic(build).unwrap();
    let members = BodyDeclarationRewrite::create(rewrite, class).unwrap();
    members.insert(rewrite, member, options, None).unwrap()
}

#[test]
fn test_member_category() {
    let mut arena = NodeArena::new();
    let constant = field(&mut arena, "K", Modifiers::STATIC | Modifiers::FINAL);
    let shared = field(&mut arena, "S", Modifiers::STATIC);
    let plain = field(&mut arena, "f", Modifiers::PRIVATE);
    let ctor = constructor(&mut arena);
    let body = arena.add_block(vec![]);
    let initializer = arena.add_initializer(vec![], body);
    let category = |node: NodeIndex, modifiers: Modifiers| {
        member_category(arena.data(node).unwrap(), modifiers)
    };
    assert_eq!(
        category(constant, Modifiers::STATIC | Modifiers::FINAL),
        Some(MemberCategory::StaticFinalField)
    );
    assert_eq!(category(shared, Modifiers::STATIC), Some(MemberCategory::StaticField));
    assert_eq!(category(plain, Modifiers::PRIVATE), Some(MemberCategory::Field));
    assert_eq!(category(ctor, Modifiers::STATIC), Some(MemberCategory::Constructor));
    assert_eq!(
        category(initializer, Modifiers::STATIC),
        Some(MemberCategory::StaticInitializer)
    );
    assert_eq!(category(body, Modifiers::empty()), None);
}

#[test]
fn test_insert_after_last_member_of_same_category() {
    let f = fixture();
    let options = AnalysisOptions::default();
    let mut rewrite = AstRewrite::new(&f.arena);
    let index = insert(&mut rewrite, f.class, |arena| field(arena, "g", Modifiers::empty()), &options);
    assert_eq!(index, 2);
    let index = insert(&mut rewrite, f.class, |arena| method(arena, "n", Modifiers::empty()), &options);
    assert_eq!(index, 5);
}

#[test]
fn test_insert_without_same_category_uses_neighbors() {
    let f = fixture();
    let options = AnalysisOptions::default();
    let mut rewrite = AstRewrite::new(&f.arena);
    // A static field sorts between the constant and the instance field.
    let index = insert(&mut rewrite, f.class, |arena| field(arena, "S", Modifiers::STATIC), &options);
    assert_eq!(index, 1);
    // A static method sorts between the constructor and `m`.
    let index = insert(&mut rewrite, f.class, |arena| method(arena, "s", Modifiers::STATIC), &options);
    assert_eq!(index, 4);
}

#[test]
fn test_insert_into_empty_body() {
    let mut arena = NodeArena::new();
    let name = arena.add_simple_name("E");
    let class = arena.add_type_declaration(vec![], false, name, NodeIndex::NONE, vec![], vec![]);
    let options = AnalysisOptions::default();
    let mut rewrite = AstRewrite::new(&arena);
    let index = insert(&mut rewrite, class, |arena| method(arena, "m", Modifiers::empty()), &options);
    assert_eq!(index, 0);
}

#[test]
fn test_custom_order_moves_methods_first() {
    let f = fixture();
    let options = AnalysisOptions {
        member_order: vec![MemberCategory::Method, MemberCategory::Field],
        ..AnalysisOptions::default()
    };
    let mut rewrite = AstRewrite::new(&f.arena);
    // Every existing member ranks after `Method` except `m` itself, so the
    // new method still lands right after `m`.
    let index = insert(&mut rewrite, f.class, |arena| method(arena, "n", Modifiers::empty()), &options);
    assert_eq!(index, 4);

    // Constructors are not in this order, so they rank last together with
    // the static final field and land after the existing constructor.
    let index = insert(&mut rewrite, f.class, constructor, &options);
    assert_eq!(index, 3);
}

#[test]
fn test_insertion_index_sees_pending_edits() {
    let f = fixture();
    let options = AnalysisOptions::default();
    let mut rewrite = AstRewrite::new(&f.arena);
    let members = BodyDeclarationRewrite::create(&rewrite, f.class).unwrap();
    let constant = f
        .arena
        .list_in_slot(f.class, ChildSlot::TypeDeclarationBodyDeclarations)
        .and_then(|list| list.first())
        .unwrap();
    rewrite.remove(constant, None).unwrap();
    let member = rewrite
        .create_synthetic(|arena| field(arena, "L", Modifiers::STATIC | Modifiers::FINAL))
        .unwrap();
    // With the only constant gone, the new one goes before the first
    // instance field.
    assert_eq!(members.insertion_index(&rewrite, member, &options).unwrap(), 0);
}

#[test]
fn test_create_requires_type_body() {
    let f = fixture();
    let rewrite = AstRewrite::new(&f.arena);
    let first = f.arena.children(f.class)[0];
    assert!(BodyDeclarationRewrite::create(&rewrite, first).is_err());
}
