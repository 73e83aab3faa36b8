//! Expression replacement that keeps operator meaning intact.
//!
//! Putting `a + b` where `x` stood in `x * 2` must produce `(a + b) * 2`.
//! [`ExpressionRewrite`] asks the parenthesization rules whether the
//! replacement needs parentheses at the target location and, if so, places
//! it inside a new parenthesized expression.

use tracing::debug;

use crate::ast_rewrite::AstRewrite;
use crate::edit::{EditGroup, RewriteNode};
use crate::replace::Replacer;
use javelin_ast::{ChildSlot, NodeIndex};
use javelin_bindings::BindingTable;
use javelin_common::AnalysisResult;
use javelin_query::ParenthesesChecker;

#[derive(Clone, Copy)]
pub struct ExpressionRewrite<'t> {
    table: &'t BindingTable,
}

impl<'t> ExpressionRewrite<'t> {
    pub fn new(table: &'t BindingTable) -> Self {
        Self { table }
    }

    /// Whether `replacement` needs parentheses in `slot` of `parent`.
    ///
    /// Move targets and copies are judged by the original node they stand
    /// for. A node built from scratch under an original parent cannot be
    /// compared by precedence, so it is parenthesized whenever its kind and
    /// the location allow parentheses at all.
    pub fn needs_parentheses(
        &self,
        rewrite: &AstRewrite<'_>,
        replacement: RewriteNode,
        parent: RewriteNode,
        slot: ChildSlot,
    ) -> bool {
        let stand_in = match replacement {
            RewriteNode::Original(index) | RewriteNode::Moved(index) => Some(index),
            RewriteNode::Created(index) => rewrite.copy_source(index),
        };
        match (parent, stand_in, replacement) {
            (RewriteNode::Original(parent), Some(expression), _) => {
                ParenthesesChecker::new(rewrite.original(), self.table)
                    .needs_parentheses(expression, parent, slot, None)
            }
            (RewriteNode::Created(parent), _, RewriteNode::Created(expression)) => {
                ParenthesesChecker::new(rewrite.arena(), self.table)
                    .needs_parentheses(expression, parent, slot, None)
            }
            (_, _, RewriteNode::Created(expression)) => {
                ParenthesesChecker::new(rewrite.arena(), self.table)
                    .needs_parentheses(expression, NodeIndex::NONE, slot, None)
            }
            (_, Some(expression), _) => ParenthesesChecker::new(rewrite.original(), self.table)
                .needs_parentheses(expression, NodeIndex::NONE, slot, None),
            (_, None, _) => false,
        }
    }
}

impl Replacer for ExpressionRewrite<'_> {
    fn handle_one_one(
        &self,
        rewrite: &mut AstRewrite<'_>,
        node: RewriteNode,
        replacement: RewriteNode,
        group: Option<EditGroup>,
    ) -> AnalysisResult<()> {
        let (parent, slot) = rewrite.location_of(node)?;
        if !self.needs_parentheses(rewrite, replacement, parent, slot) {
            return rewrite.replace(node, replacement, group);
        }
        let wrapper = rewrite.create_synthetic(|arena| arena.add_parenthesized(NodeIndex::NONE))?;
        rewrite.set_child(
            wrapper,
            ChildSlot::ParenthesizedExpression,
            Some(replacement),
            group,
        )?;
        debug!(?replacement, ?slot, "parenthesized replacement");
        rewrite.replace(node, wrapper, group)
    }
}

#[cfg(test)]
#[path = "tests/expression_rewrite_tests.rs"]
mod tests;
