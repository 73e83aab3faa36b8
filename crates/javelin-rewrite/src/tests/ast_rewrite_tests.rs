use super::*;
use javelin_ast::print_node;
use javelin_common::ErrorKind;

/// `if (flag) a(); else b();` inside `{ x; <if>; }`
struct Fixture {
    arena: NodeArena,
    block: NodeIndex,
    first: NodeIndex,
    if_stmt: NodeIndex,
    then_stmt: NodeIndex,
    else_stmt: NodeIndex,
}

fn call_statement(arena: &mut NodeArena, name: &str) -> NodeIndex {
    let name = arena.add_simple_name(name);
    let call = arena.add_method_invocation(NodeIndex::NONE, name, vec![]);
    arena.add_expression_statement(call)
}

fn fixture() -> Fixture {
    let mut arena = NodeArena::new();
    let x = arena.add_simple_name("x");
    let first = arena.add_expression_statement(x);
    let condition = arena.add_simple_name("flag");
    let then_stmt = call_statement(&mut arena, "a");
    let else_stmt = call_statement(&mut arena, "b");
    let if_stmt = arena.add_if(condition, then_stmt, else_stmt);
    let block = arena.add_block(vec![first, if_stmt]);
    Fixture {
        arena,
        block,
        first,
        if_stmt,
        then_stmt,
        else_stmt,
    }
}

#[test]
fn test_replace_in_single_slot() {
    let f = fixture();
    let mut rewrite = AstRewrite::new(&f.arena);
    let new = rewrite
        .create_synthetic(|arena| call_statement(arena, "c"))
        .unwrap();
    rewrite.replace(f.then_stmt, new, None).unwrap();
    assert_eq!(
        rewrite.current_child(f.if_stmt, ChildSlot::IfThenStatement).unwrap(),
        Some(new)
    );
    assert_eq!(rewrite.location_of(new).unwrap(), (RewriteNode::Original(f.if_stmt), ChildSlot::IfThenStatement));
    // The original tree is untouched.
    assert_eq!(f.arena.child_in_slot(f.if_stmt, ChildSlot::IfThenStatement), Some(f.then_stmt));
}

#[test]
fn test_set_child_clears_and_fills() {
    let f = fixture();
    let mut rewrite = AstRewrite::new(&f.arena);
    rewrite
        .set_child(f.if_stmt, ChildSlot::IfElseStatement, None, None)
        .unwrap();
    assert_eq!(
        rewrite.current_child(f.if_stmt, ChildSlot::IfElseStatement).unwrap(),
        None
    );
    let new = rewrite
        .create_synthetic(|arena| call_statement(arena, "c"))
        .unwrap();
    rewrite
        .set_child(f.if_stmt, ChildSlot::IfElseStatement, Some(new), None)
        .unwrap();
    assert_eq!(
        rewrite.current_child(f.if_stmt, ChildSlot::IfElseStatement).unwrap(),
        Some(new)
    );
}

#[test]
fn test_current_child_of_untouched_slot_reads_original() {
    let f = fixture();
    let rewrite = AstRewrite::new(&f.arena);
    assert_eq!(
        rewrite.current_child(f.if_stmt, ChildSlot::IfElseStatement).unwrap(),
        Some(RewriteNode::Original(f.else_stmt))
    );
    let err = rewrite
        .current_child(f.if_stmt, ChildSlot::BlockStatements)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Malformed);
}

#[test]
fn test_move_out_of_single_slot() {
    let f = fixture();
    let mut rewrite = AstRewrite::new(&f.arena);
    let moved = rewrite.create_move_target(f.then_stmt, None).unwrap();
    assert_eq!(
        rewrite.current_child(f.if_stmt, ChildSlot::IfThenStatement).unwrap(),
        None
    );
    rewrite
        .list(f.block, ChildSlot::BlockStatements)
        .unwrap()
        .insert_first(moved, None)
        .unwrap();
    assert_eq!(
        rewrite.rewritten_list(f.block, ChildSlot::BlockStatements).unwrap(),
        vec![
            moved,
            RewriteNode::Original(f.first),
            RewriteNode::Original(f.if_stmt)
        ]
    );
    let err = rewrite.create_move_target(f.then_stmt, None).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Precondition);
}

#[test]
fn test_move_target_of_root_is_malformed() {
    let f = fixture();
    let mut rewrite = AstRewrite::new(&f.arena);
    let err = rewrite.create_move_target(f.block, None).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Malformed);
}

#[test]
fn test_copy_target_is_independent_copy() {
    let f = fixture();
    let mut rewrite = AstRewrite::new(&f.arena);
    let copy = rewrite.create_copy_target(f.then_stmt, None).unwrap();
    let RewriteNode::Created(index) = copy else {
        panic!("copies live in the rewrite arena");
    };
    assert_eq!(print_node(rewrite.arena(), index), print_node(&f.arena, f.then_stmt));
    assert_eq!(rewrite.copy_source(index), Some(f.then_stmt));
    // The original stays where it was.
    assert_eq!(
        rewrite.current_child(f.if_stmt, ChildSlot::IfThenStatement).unwrap(),
        Some(RewriteNode::Original(f.then_stmt))
    );
    rewrite
        .list(f.block, ChildSlot::BlockStatements)
        .unwrap()
        .insert_last(copy, None)
        .unwrap();
    assert_eq!(
        rewrite.rewritten_list(f.block, ChildSlot::BlockStatements).unwrap().len(),
        3
    );
}

#[test]
fn test_synthetic_child_cannot_be_placed_alone() {
    let f = fixture();
    let mut rewrite = AstRewrite::new(&f.arena);
    let statement = rewrite
        .create_synthetic(|arena| call_statement(arena, "c"))
        .unwrap();
    let RewriteNode::Created(index) = statement else {
        panic!("synthetic nodes live in the rewrite arena");
    };
    let inner = rewrite.arena().child_in_slot(index, ChildSlot::ExpressionStatementExpression);
    let inner = RewriteNode::Created(inner.unwrap());
    let err = rewrite
        .list(f.block, ChildSlot::BlockStatements)
        .unwrap()
        .insert_last(inner, None)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Precondition);
}

#[test]
fn test_synthetic_builder_must_return_detached_root() {
    let f = fixture();
    let mut rewrite = AstRewrite::new(&f.arena);
    let err = rewrite
        .create_synthetic(|arena| {
            let name = arena.add_simple_name("y");
            arena.add_expression_statement(name);
            name
        })
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Precondition);
    let err = rewrite.create_synthetic(|_| NodeIndex::NONE).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Malformed);
}

#[test]
fn test_edits_under_a_move_target_are_rejected() {
    let f = fixture();
    let mut rewrite = AstRewrite::new(&f.arena);
    let moved = rewrite.create_move_target(f.if_stmt, None).unwrap();
    let err = rewrite
        .current_child(moved, ChildSlot::IfThenStatement)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Precondition);
}

#[test]
fn test_atomically_rolls_back_every_log() {
    let f = fixture();
    let mut rewrite = AstRewrite::new(&f.arena);
    let result: AnalysisResult<()> = rewrite.atomically(|rewrite| {
        rewrite.new_edit_group("doomed");
        rewrite.remove(f.first, None)?;
        let moved = rewrite.create_move_target(f.else_stmt, None)?;
        rewrite
            .list(f.block, ChildSlot::BlockStatements)?
            .insert_last(moved, None)?;
        rewrite.create_copy_target(f.then_stmt, None)?;
        Err(AnalysisError::precondition("abort"))
    });
    assert!(result.is_err());

    let changes = rewrite.commit();
    assert!(changes.is_empty());
    assert!(changes.groups.is_empty());
}

#[test]
fn test_atomically_rollback_allows_retry() {
    let f = fixture();
    let mut rewrite = AstRewrite::new(&f.arena);
    let _ = rewrite.atomically(|rewrite| {
        rewrite.create_move_target(f.else_stmt, None)?;
        Err::<(), _>(AnalysisError::precondition("abort"))
    });
    // The failed attempt released its move target.
    let moved = rewrite.create_move_target(f.else_stmt, None).unwrap();
    assert_eq!(moved, RewriteNode::Moved(f.else_stmt));
}

#[test]
fn test_commit_reports_touched_slots_only() {
    let f = fixture();
    let mut rewrite = AstRewrite::new(&f.arena);
    let group = rewrite.new_edit_group("swap branches");
    // Opened but never edited.
    rewrite.list(f.block, ChildSlot::BlockStatements).unwrap();
    let then_moved = rewrite.create_move_target(f.then_stmt, Some(group)).unwrap();
    let else_moved = rewrite.create_move_target(f.else_stmt, Some(group)).unwrap();
    rewrite
        .set_child(f.if_stmt, ChildSlot::IfThenStatement, Some(else_moved), Some(group))
        .unwrap();
    rewrite
        .set_child(f.if_stmt, ChildSlot::IfElseStatement, Some(then_moved), Some(group))
        .unwrap();

    let changes = rewrite.commit();
    assert!(changes.lists.is_empty());
    assert_eq!(changes.slots.len(), 2);
    let then_change = changes
        .slot_change(RewriteNode::Original(f.if_stmt), ChildSlot::IfThenStatement)
        .unwrap();
    assert_eq!(then_change.original, Some(RewriteNode::Original(f.then_stmt)));
    assert_eq!(then_change.rewritten, Some(else_moved));
    assert_eq!(changes.edit_count(), 4);
    assert_eq!(changes.edits_in_group(group).len(), 4);
}
