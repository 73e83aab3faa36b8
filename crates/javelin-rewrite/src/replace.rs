//! Replacing runs of nodes.
//!
//! [`Replacer::replace`] dispatches on the shape of the request (how many
//! nodes go out, how many come in). Implementors override the per-shape
//! handlers they need; [`StatementRewrite`] does so to keep a control
//! statement body a single statement.

use tracing::debug;

use crate::ast_rewrite::AstRewrite;
use crate::edit::{EditGroup, RewriteNode};
use javelin_ast::{ChildSlot, NodeIndex};
use javelin_common::{AnalysisError, AnalysisResult};

pub trait Replacer {
    /// Replace `nodes` with `replacements`.
    ///
    /// All edits are recorded or none are.
    fn replace(
        &self,
        rewrite: &mut AstRewrite<'_>,
        nodes: &[RewriteNode],
        replacements: &[RewriteNode],
        group: Option<EditGroup>,
    ) -> AnalysisResult<()> {
        debug!(
            nodes = nodes.len(),
            replacements = replacements.len(),
            "replace nodes"
        );
        rewrite.atomically(|rewrite| match (nodes, replacements) {
            ([], _) => Err(AnalysisError::precondition("nothing to replace")),
            (_, []) => nodes
                .iter()
                .try_for_each(|&node| rewrite.remove(node, group)),
            ([node], [replacement]) => self.handle_one_one(rewrite, *node, *replacement, group),
            ([node], _) => self.handle_one_many(rewrite, *node, replacements, group),
            _ => self.handle_many_many(rewrite, nodes, replacements, group),
        })
    }

    fn handle_one_one(
        &self,
        rewrite: &mut AstRewrite<'_>,
        node: RewriteNode,
        replacement: RewriteNode,
        group: Option<EditGroup>,
    ) -> AnalysisResult<()> {
        rewrite.replace(node, replacement, group)
    }

    fn handle_one_many(
        &self,
        rewrite: &mut AstRewrite<'_>,
        node: RewriteNode,
        replacements: &[RewriteNode],
        group: Option<EditGroup>,
    ) -> AnalysisResult<()> {
        splice_into_list(rewrite, node, replacements, group)
    }

    /// Pair old and new nodes left to right. Surplus replacements follow the
    /// last paired one; surplus old nodes are removed. With no replacements
    /// every old node is removed.
    fn handle_many_many(
        &self,
        rewrite: &mut AstRewrite<'_>,
        nodes: &[RewriteNode],
        replacements: &[RewriteNode],
        group: Option<EditGroup>,
    ) -> AnalysisResult<()> {
        let (parent, slot) = common_list(rewrite, nodes)?;
        let paired = nodes.len().min(replacements.len());
        for (&old, &new) in nodes.iter().zip(replacements) {
            rewrite.replace(old, new, group)?;
        }
        let mut list = rewrite.list(parent, slot)?;
        let last_paired = paired.checked_sub(1);
        if let Some(mut anchor) = last_paired.and_then(|i| replacements.get(i).copied()) {
            for &extra in &replacements[paired..] {
                list.insert_after(extra, anchor, group)?;
                anchor = extra;
            }
        }
        for &surplus in &nodes[paired..] {
            list.remove(surplus, group)?;
        }
        Ok(())
    }
}

/// General-purpose replacer with the default handlers.
#[derive(Clone, Copy, Debug, Default)]
pub struct ReplaceRewrite;

impl Replacer for ReplaceRewrite {}

/// Statement-aware replacer.
///
/// Replacing the single-statement body of a control statement with several
/// statements wraps them in a new block instead of failing.
#[derive(Clone, Copy, Debug, Default)]
pub struct StatementRewrite;

impl Replacer for StatementRewrite {
    fn handle_one_many(
        &self,
        rewrite: &mut AstRewrite<'_>,
        node: RewriteNode,
        replacements: &[RewriteNode],
        group: Option<EditGroup>,
    ) -> AnalysisResult<()> {
        let (_, slot) = rewrite.location_of(node)?;
        if !slot.is_control_statement_body() {
            return splice_into_list(rewrite, node, replacements, group);
        }
        let block = rewrite.create_synthetic(|arena| arena.add_block(Vec::new()))?;
        let mut statements = rewrite.list(block, ChildSlot::BlockStatements)?;
        for &statement in replacements {
            statements.insert_last(statement, group)?;
        }
        debug!(?slot, statements = replacements.len(), "wrapped body in block");
        rewrite.replace(node, block, group)
    }
}

/// Replace `node` with the first replacement and insert the rest after it.
fn splice_into_list(
    rewrite: &mut AstRewrite<'_>,
    node: RewriteNode,
    replacements: &[RewriteNode],
    group: Option<EditGroup>,
) -> AnalysisResult<()> {
    let (parent, slot) = rewrite.location_of(node)?;
    if !slot.is_list() {
        return Err(AnalysisError::malformed(format!(
            "cannot replace one node with {} in single-child slot {slot:?}",
            replacements.len()
        )));
    }
    let mut list = rewrite.list(parent, slot)?;
    let Some((&first, rest)) = replacements.split_first() else {
        return list.remove(node, group);
    };
    list.replace(node, first, group)?;
    let mut anchor = first;
    for &next in rest {
        list.insert_after(next, anchor, group)?;
        anchor = next;
    }
    Ok(())
}

fn common_list(
    rewrite: &AstRewrite<'_>,
    nodes: &[RewriteNode],
) -> AnalysisResult<(RewriteNode, ChildSlot)> {
    let mut location: Option<(RewriteNode, ChildSlot)> = None;
    for &node in nodes {
        let here = rewrite.location_of(node)?;
        if !here.1.is_list() {
            return Err(AnalysisError::malformed(format!(
                "{node:?} is not in a child list"
            )));
        }
        match location {
            None => location = Some(here),
            Some(first) if first != here => {
                return Err(AnalysisError::precondition(
                    "nodes to replace must share one list",
                ));
            }
            Some(_) => {}
        }
    }
    location.ok_or_else(|| AnalysisError::precondition("nothing to replace"))
}

/// Convenience for the common case of replacing one original statement.
pub fn replace_statement(
    rewrite: &mut AstRewrite<'_>,
    statement: NodeIndex,
    replacements: &[RewriteNode],
    group: Option<EditGroup>,
) -> AnalysisResult<()> {
    StatementRewrite.replace(rewrite, &[RewriteNode::Original(statement)], replacements, group)
}

#[cfg(test)]
#[path = "tests/replace_tests.rs"]
mod tests;
