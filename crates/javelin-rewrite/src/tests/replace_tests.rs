use super::*;
use javelin_ast::{NodeArena, NodeKind};
use javelin_common::ErrorKind;

/// `{ s1; s2; s3; while (c) body; }`
struct Fixture {
    arena: NodeArena,
    block: NodeIndex,
    statements: [NodeIndex; 3],
    while_stmt: NodeIndex,
    loop_body: NodeIndex,
}

fn name_statement(arena: &mut NodeArena, name: &str) -> NodeIndex {
    let name = arena.add_simple_name(name);
    arena.add_expression_statement(name)
}

fn fixture() -> Fixture {
    let mut arena = NodeArena::new();
    let statements = [
        name_statement(&mut arena, "s1"),
        name_statement(&mut arena, "s2"),
        name_statement(&mut arena, "s3"),
    ];
    let condition = arena.add_simple_name("c");
    let loop_body = name_statement(&mut arena, "body");
    let while_stmt = arena.add_while(condition, loop_body);
    let mut all = statements.to_vec();
    all.push(while_stmt);
    let block = arena.add_block(all);
    Fixture {
        arena,
        block,
        statements,
        while_stmt,
        loop_body,
    }
}

fn synthetic(rewrite: &mut AstRewrite<'_>, names: &[&str]) -> Vec<RewriteNode> {
    names
        .iter()
        .map(|name| {
            rewrite
                .create_synthetic(|arena| name_statement(arena, name))
                .unwrap()
        })
        .collect()
}

fn statements_of(rewrite: &AstRewrite<'_>, block: NodeIndex) -> Vec<RewriteNode> {
    rewrite
        .rewritten_list(block, ChildSlot::BlockStatements)
        .unwrap()
}

fn originals(f: &Fixture) -> Vec<RewriteNode> {
    f.statements.iter().copied().map(RewriteNode::Original).collect()
}

#[test]
fn test_one_to_one() {
    let f = fixture();
    let mut rewrite = AstRewrite::new(&f.arena);
    let new = synthetic(&mut rewrite, &["t"]);
    let old = originals(&f);
    ReplaceRewrite
        .replace(&mut rewrite, &old[1..2], &new, None)
        .unwrap();
    assert_eq!(statements_of(&rewrite, f.block)[1], new[0]);
}

#[test]
fn test_one_to_many_splices_into_list() {
    let f = fixture();
    let mut rewrite = AstRewrite::new(&f.arena);
    let new = synthetic(&mut rewrite, &["t1", "t2", "t3"]);
    let old = originals(&f);
    ReplaceRewrite
        .replace(&mut rewrite, &old[1..2], &new, None)
        .unwrap();
    assert_eq!(
        statements_of(&rewrite, f.block),
        vec![
            old[0],
            new[0],
            new[1],
            new[2],
            old[2],
            RewriteNode::Original(f.while_stmt)
        ]
    );
}

#[test]
fn test_many_to_fewer_removes_surplus() {
    let f = fixture();
    let mut rewrite = AstRewrite::new(&f.arena);
    let new = synthetic(&mut rewrite, &["t1", "t2"]);
    let old = originals(&f);
    ReplaceRewrite.replace(&mut rewrite, &old, &new, None).unwrap();
    assert_eq!(
        statements_of(&rewrite, f.block),
        vec![new[0], new[1], RewriteNode::Original(f.while_stmt)]
    );
}

#[test]
fn test_many_to_more_inserts_after_last_pair() {
    let f = fixture();
    let mut rewrite = AstRewrite::new(&f.arena);
    let new = synthetic(&mut rewrite, &["t1", "t2", "t3"]);
    let old = originals(&f);
    ReplaceRewrite
        .replace(&mut rewrite, &old[..2], &new, None)
        .unwrap();
    assert_eq!(
        statements_of(&rewrite, f.block),
        vec![
            new[0],
            new[1],
            new[2],
            old[2],
            RewriteNode::Original(f.while_stmt)
        ]
    );
}

#[test]
fn test_replace_with_nothing_removes() {
    let f = fixture();
    let mut rewrite = AstRewrite::new(&f.arena);
    let old = originals(&f);
    ReplaceRewrite
        .replace(&mut rewrite, &old[..2], &[], None)
        .unwrap();
    assert_eq!(
        statements_of(&rewrite, f.block),
        vec![old[2], RewriteNode::Original(f.while_stmt)]
    );
}

#[test]
fn test_many_handler_with_no_replacements_removes_all() {
    let f = fixture();
    let mut rewrite = AstRewrite::new(&f.arena);
    let old = originals(&f);
    ReplaceRewrite
        .handle_many_many(&mut rewrite, &old[..2], &[], None)
        .unwrap();
    assert_eq!(
        statements_of(&rewrite, f.block),
        vec![old[2], RewriteNode::Original(f.while_stmt)]
    );
    let err = ReplaceRewrite
        .handle_many_many(&mut rewrite, &[], &[], None)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Precondition);
}

#[test]
fn test_empty_request_is_a_precondition_error() {
    let f = fixture();
    let mut rewrite = AstRewrite::new(&f.arena);
    let new = synthetic(&mut rewrite, &["t"]);
    let err = ReplaceRewrite
        .replace(&mut rewrite, &[], &new, None)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Precondition);
}

#[test]
fn test_plain_replacer_rejects_many_in_single_slot() {
    let f = fixture();
    let mut rewrite = AstRewrite::new(&f.arena);
    let new = synthetic(&mut rewrite, &["t1", "t2"]);
    let err = ReplaceRewrite
        .replace(&mut rewrite, &[RewriteNode::Original(f.loop_body)], &new, None)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Malformed);
    assert_eq!(
        rewrite.current_child(f.while_stmt, ChildSlot::WhileBody).unwrap(),
        Some(RewriteNode::Original(f.loop_body))
    );
}

#[test]
fn test_statement_replacer_wraps_control_body() {
    let f = fixture();
    let mut rewrite = AstRewrite::new(&f.arena);
    let new = synthetic(&mut rewrite, &["t1", "t2"]);
    replace_statement(&mut rewrite, f.loop_body, &new, None).unwrap();

    let body = rewrite
        .current_child(f.while_stmt, ChildSlot::WhileBody)
        .unwrap()
        .unwrap();
    assert_eq!(rewrite.kind(body), Some(NodeKind::Block));
    assert_eq!(
        rewrite.rewritten_list(body, ChildSlot::BlockStatements).unwrap(),
        new
    );
}

#[test]
fn test_statement_replacer_splices_in_block() {
    let f = fixture();
    let mut rewrite = AstRewrite::new(&f.arena);
    let new = synthetic(&mut rewrite, &["t1", "t2"]);
    replace_statement(&mut rewrite, f.statements[0], &new, None).unwrap();
    assert_eq!(statements_of(&rewrite, f.block).len(), 5);
    assert_eq!(statements_of(&rewrite, f.block)[..2], new[..]);
}

#[test]
fn test_many_to_many_across_lists_fails_atomically() {
    let f = fixture();
    let mut rewrite = AstRewrite::new(&f.arena);
    let new = synthetic(&mut rewrite, &["t1", "t2"]);
    let nodes = [
        RewriteNode::Original(f.statements[0]),
        RewriteNode::Original(f.loop_body),
    ];
    assert!(ReplaceRewrite.replace(&mut rewrite, &nodes, &new, None).is_err());
    assert_eq!(statements_of(&rewrite, f.block).len(), 4);
    assert!(rewrite.commit().is_empty());
}

#[test]
fn test_failure_midway_keeps_earlier_edits_out() {
    let f = fixture();
    let mut rewrite = AstRewrite::new(&f.arena);
    let mut new = synthetic(&mut rewrite, &["t1"]);
    // The same node twice: the second placement fails after the first
    // replacement was recorded.
    new.push(new[0]);
    let old = originals(&f);
    assert!(ReplaceRewrite.replace(&mut rewrite, &old[..2], &new, None).is_err());
    assert_eq!(statements_of(&rewrite, f.block)[..3], old[..]);
}
