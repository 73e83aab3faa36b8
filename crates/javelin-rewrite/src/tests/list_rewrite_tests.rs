use super::*;
use javelin_ast::{NodeArena, NodeIndex};
use javelin_common::ErrorKind;

/// `{ a; b; c; d; }`
struct Body {
    arena: NodeArena,
    block: NodeIndex,
    statements: Vec<NodeIndex>,
}

fn body() -> Body {
    let mut arena = NodeArena::new();
    let statements = ["a", "b", "c", "d"]
        .iter()
        .map(|name| {
            let expression = arena.add_simple_name(*name);
            arena.add_expression_statement(expression)
        })
        .collect::<Vec<_>>();
    let block = arena.add_block(statements.clone());
    Body {
        arena,
        block,
        statements,
    }
}

fn statement(rewrite: &mut AstRewrite<'_>, name: &str) -> RewriteNode {
    rewrite
        .create_synthetic(|arena| {
            let expression = arena.add_simple_name(name);
            arena.add_expression_statement(expression)
        })
        .unwrap()
}

fn four(b: &Body) -> [RewriteNode; 4] {
    originals(&b.statements).try_into().unwrap()
}

fn originals(nodes: &[NodeIndex]) -> Vec<RewriteNode> {
    nodes.iter().copied().map(RewriteNode::Original).collect()
}

#[test]
fn test_fresh_list_is_unmodified() {
    let b = body();
    let mut rewrite = AstRewrite::new(&b.arena);
    let list = rewrite.list(b.block, ChildSlot::BlockStatements).unwrap();
    assert_eq!(list.state(), ListState::Unmodified);
    assert_eq!(list.rewritten_list(), originals(&b.statements));
    assert_eq!(list.original_list(), originals(&b.statements));
}

#[test]
fn test_inserts_honor_anchors() {
    let b = body();
    let [s0, s1, _, s3] = four(&b);
    let mut rewrite = AstRewrite::new(&b.arena);
    let first = statement(&mut rewrite, "first");
    let last = statement(&mut rewrite, "last");
    let after = statement(&mut rewrite, "after");
    let before = statement(&mut rewrite, "before");

    let mut list = rewrite.list(b.block, ChildSlot::BlockStatements).unwrap();
    list.insert_first(first, None).unwrap();
    list.insert_last(last, None).unwrap();
    list.insert_after(after, s0, None).unwrap();
    list.insert_before(before, s3, None).unwrap();

    let rewritten = list.rewritten_list();
    assert_eq!(rewritten.len(), 8);
    assert_eq!(rewritten[0], first);
    assert_eq!(rewritten[1], s0);
    assert_eq!(rewritten[2], after);
    assert_eq!(rewritten[3], s1);
    assert_eq!(rewritten[5], before);
    assert_eq!(rewritten[6], s3);
    assert_eq!(rewritten[7], last);
    assert_eq!(list.state(), ListState::Pending);
    // The recorded original never changes.
    assert_eq!(list.original_list(), originals(&b.statements));
}

#[test]
fn test_remove_and_replace_keep_untouched_order() {
    let b = body();
    let [s0, s1, s2, s3] = four(&b);
    let mut rewrite = AstRewrite::new(&b.arena);
    let replacement = statement(&mut rewrite, "x");
    let mut list = rewrite.list(b.block, ChildSlot::BlockStatements).unwrap();
    list.remove(s1, None).unwrap();
    list.replace(s2, replacement, None).unwrap();
    assert_eq!(list.rewritten_list(), vec![s0, replacement, s3]);
}

#[test]
fn test_removed_node_cannot_be_removed_again() {
    let b = body();
    let s1 = RewriteNode::Original(b.statements[1]);
    let mut rewrite = AstRewrite::new(&b.arena);
    let mut list = rewrite.list(b.block, ChildSlot::BlockStatements).unwrap();
    list.remove(s1, None).unwrap();
    let err = list.remove(s1, None).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Precondition);
    assert_eq!(list.rewritten_list().len(), 3);
}

#[test]
fn test_failed_insert_leaves_log_unchanged() {
    let b = body();
    let mut rewrite = AstRewrite::new(&b.arena);
    let node = statement(&mut rewrite, "x");
    let mut list = rewrite.list(b.block, ChildSlot::BlockStatements).unwrap();

    let err = list.insert_at(node, 5, None).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Precondition);
    let missing = RewriteNode::Original(NodeIndex(9999));
    assert!(list.insert_after(node, missing, None).is_err());
    assert_eq!(list.state(), ListState::Unmodified);
    assert_eq!(list.rewritten_list(), originals(&b.statements));
}

#[test]
fn test_original_node_needs_move_target() {
    let b = body();
    let [s0, ..] = four(&b);
    let mut rewrite = AstRewrite::new(&b.arena);
    let mut list = rewrite.list(b.block, ChildSlot::BlockStatements).unwrap();
    let err = list.insert_last(s0, None).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Precondition);
}

#[test]
fn test_move_within_list() {
    let b = body();
    let [_, s1, s2, s3] = four(&b);
    let mut rewrite = AstRewrite::new(&b.arena);
    let moved = rewrite.create_move_target(b.statements[0], None).unwrap();
    assert_eq!(moved, RewriteNode::Moved(b.statements[0]));

    let mut list = rewrite.list(b.block, ChildSlot::BlockStatements).unwrap();
    assert_eq!(list.rewritten_list(), vec![s1, s2, s3]);
    list.insert_last(moved, None).unwrap();
    assert_eq!(list.rewritten_list(), vec![s1, s2, s3, moved]);
}

#[test]
fn test_created_node_is_placed_once() {
    let b = body();
    let mut rewrite = AstRewrite::new(&b.arena);
    let node = statement(&mut rewrite, "x");
    let mut list = rewrite.list(b.block, ChildSlot::BlockStatements).unwrap();
    list.insert_first(node, None).unwrap();
    assert!(list.insert_last(node, None).is_err());

    // Once removed it may be placed again.
    list.remove(node, None).unwrap();
    list.insert_last(node, None).unwrap();
    assert_eq!(list.rewritten_list().last(), Some(&node));
}

#[test]
fn test_list_on_missing_slot_is_malformed() {
    let b = body();
    let mut rewrite = AstRewrite::new(&b.arena);
    let err = rewrite
        .list(b.statements[0], ChildSlot::BlockStatements)
        .err()
        .unwrap();
    assert_eq!(err.kind(), ErrorKind::Malformed);
}

#[test]
fn test_edit_group_is_recorded() {
    let b = body();
    let mut rewrite = AstRewrite::new(&b.arena);
    let group = rewrite.new_edit_group("drop b");
    let s1 = RewriteNode::Original(b.statements[1]);
    rewrite
        .list(b.block, ChildSlot::BlockStatements)
        .unwrap()
        .remove(s1, Some(group))
        .unwrap();
    let edits = rewrite
        .list_edits(RewriteNode::Original(b.block), ChildSlot::BlockStatements)
        .unwrap();
    assert_eq!(
        edits.edits(),
        &[PendingEdit::Remove {
            node: s1,
            group: Some(group)
        }]
    );
    assert_eq!(rewrite.edit_group_name(group), Some("drop b"));
}
