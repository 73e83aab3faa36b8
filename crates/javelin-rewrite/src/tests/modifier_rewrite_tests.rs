use super::*;
use javelin_ast::{NodeArena, PrimitiveTypeCode};
use javelin_common::ErrorKind;

/// A method declaration with the given annotations and keywords, plus a
/// second declaration to copy from.
struct Fixture {
    arena: NodeArena,
    method: NodeIndex,
    donor: NodeIndex,
}

fn method(arena: &mut NodeArena, name: &str, annotations: &[&str], keywords: Modifiers) -> NodeIndex {
    let mut modifiers = annotations
        .iter()
        .map(|annotation| {
            let type_name = arena.add_simple_name(*annotation);
            arena.add_marker_annotation(type_name)
        })
        .collect::<Vec<_>>();
    modifiers.extend(arena.add_modifiers(keywords));
    let ret = arena.add_primitive_type(PrimitiveTypeCode::Void);
    let name = arena.add_simple_name(name);
    let body = arena.add_block(vec![]);
    arena.add_method_declaration(modifiers, ret, name, vec![], body)
}

fn fixture(annotations: &[&str], keywords: Modifiers) -> Fixture {
    let mut arena = NodeArena::new();
    let method = method(&mut arena, "m", annotations, keywords);
    let donor = method_with_donor(&mut arena);
    Fixture {
        arena,
        method,
        donor,
    }
}

fn method_with_donor(arena: &mut NodeArena) -> NodeIndex {
    method(
        arena,
        "donor",
        &["Deprecated", "SafeVarargs"],
        Modifiers::PUBLIC | Modifiers::STATIC,
    )
}

/// Rendered modifier list: annotations as `@Name`, keywords as text.
fn rendered(rewrite: &AstRewrite<'_>, modifiers: &ModifierRewrite) -> Vec<String> {
    rewrite
        .rewritten_list(modifiers.declaration(), modifiers.slot())
        .unwrap()
        .into_iter()
        .map(|node| match rewrite.node_data(node) {
            Some(NodeData::Modifier { keyword }) => keyword.as_str().to_string(),
            Some(NodeData::MarkerAnnotation { type_name }) => {
                let arena = if node.is_in_original_tree() {
                    rewrite.original()
                } else {
                    rewrite.arena()
                };
                format!("@{}", arena.identifier(*type_name).unwrap_or("?"))
            }
            other => panic!("unexpected modifier node {other:?}"),
        })
        .collect()
}

#[test]
fn test_create_requires_modifier_list() {
    let f = fixture(&[], Modifiers::empty());
    let rewrite = AstRewrite::new(&f.arena);
    let block = f.arena.child_in_slot(f.method, ChildSlot::MethodDeclarationBody).unwrap();
    let err = ModifierRewrite::create(&rewrite, block).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Malformed);
    let modifiers = ModifierRewrite::create(&rewrite, f.method).unwrap();
    assert_eq!(modifiers.slot(), ChildSlot::MethodDeclarationModifiers);
}

#[test]
fn test_visibility_goes_after_last_annotation() {
    let f = fixture(&["Override", "Deprecated"], Modifiers::STATIC | Modifiers::FINAL);
    let mut rewrite = AstRewrite::new(&f.arena);
    let modifiers = ModifierRewrite::create(&rewrite, f.method).unwrap();
    modifiers
        .set_visibility(&mut rewrite, Modifiers::PUBLIC, None)
        .unwrap();
    assert_eq!(
        rendered(&rewrite, &modifiers),
        ["@Override", "@Deprecated", "public", "static", "final"]
    );
}

#[test]
fn test_set_visibility_swaps_keyword() {
    let f = fixture(&["Override"], Modifiers::PRIVATE | Modifiers::STATIC);
    let mut rewrite = AstRewrite::new(&f.arena);
    let modifiers = ModifierRewrite::create(&rewrite, f.method).unwrap();
    modifiers
        .set_visibility(&mut rewrite, Modifiers::PROTECTED, None)
        .unwrap();
    assert_eq!(rendered(&rewrite, &modifiers), ["@Override", "protected", "static"]);
    assert_eq!(
        modifiers.modifiers(&rewrite).unwrap(),
        Modifiers::PROTECTED | Modifiers::STATIC
    );

    modifiers
        .set_visibility(&mut rewrite, Modifiers::empty(), None)
        .unwrap();
    assert_eq!(rendered(&rewrite, &modifiers), ["@Override", "static"]);
}

#[test]
fn test_keywords_keep_canonical_order() {
    let f = fixture(&[], Modifiers::PUBLIC | Modifiers::FINAL);
    let mut rewrite = AstRewrite::new(&f.arena);
    let modifiers = ModifierRewrite::create(&rewrite, f.method).unwrap();
    modifiers
        .set_modifiers(
            &mut rewrite,
            Modifiers::STATIC | Modifiers::SYNCHRONIZED,
            Modifiers::empty(),
            None,
        )
        .unwrap();
    assert_eq!(
        rendered(&rewrite, &modifiers),
        ["public", "static", "final", "synchronized"]
    );
}

#[test]
fn test_included_wins_over_excluded() {
    let f = fixture(&[], Modifiers::STATIC | Modifiers::FINAL);
    let mut rewrite = AstRewrite::new(&f.arena);
    let modifiers = ModifierRewrite::create(&rewrite, f.method).unwrap();
    modifiers
        .set_modifiers(
            &mut rewrite,
            Modifiers::FINAL,
            Modifiers::STATIC | Modifiers::FINAL,
            None,
        )
        .unwrap();
    assert_eq!(rendered(&rewrite, &modifiers), ["final"]);
}

#[test]
fn test_conflicting_visibility_is_rejected() {
    let f = fixture(&[], Modifiers::empty());
    let mut rewrite = AstRewrite::new(&f.arena);
    let modifiers = ModifierRewrite::create(&rewrite, f.method).unwrap();
    let err = modifiers
        .set_modifiers(
            &mut rewrite,
            Modifiers::PUBLIC | Modifiers::PRIVATE,
            Modifiers::empty(),
            None,
        )
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Precondition);
    let err = modifiers
        .set_visibility(&mut rewrite, Modifiers::STATIC, None)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Precondition);
    assert!(rewrite.commit().is_empty());
}

#[test]
fn test_copy_all_modifiers_appends_copies() {
    let f = fixture(&[], Modifiers::FINAL);
    let mut rewrite = AstRewrite::new(&f.arena);
    let modifiers = ModifierRewrite::create(&rewrite, f.method).unwrap();
    modifiers
        .copy_all_modifiers(&mut rewrite, f.donor, None)
        .unwrap();
    assert_eq!(
        rendered(&rewrite, &modifiers),
        ["final", "@Deprecated", "@SafeVarargs", "public", "static"]
    );
    // The donor keeps its own modifiers.
    let donor = ModifierRewrite::create(&rewrite, f.donor).unwrap();
    assert_eq!(rendered(&rewrite, &donor).len(), 4);
}

#[test]
fn test_copy_all_annotations_follows_existing_annotations() {
    let f = fixture(&["Override"], Modifiers::PUBLIC);
    let mut rewrite = AstRewrite::new(&f.arena);
    let modifiers = ModifierRewrite::create(&rewrite, f.method).unwrap();
    modifiers
        .copy_all_annotations(&mut rewrite, f.donor, None)
        .unwrap();
    assert_eq!(
        rendered(&rewrite, &modifiers),
        ["@Override", "@Deprecated", "@SafeVarargs", "public"]
    );
}
