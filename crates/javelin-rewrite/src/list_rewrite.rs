//! Per-slot edit logs and the list editing handle.

use crate::ast_rewrite::AstRewrite;
use crate::edit::{EditGroup, ListState, PendingEdit, RewriteNode};
use javelin_ast::ChildSlot;
use javelin_common::{AnalysisError, AnalysisResult};

/// Edit log of one child-list slot of one parent.
#[derive(Clone, Debug)]
pub struct ListEdits {
    pub(crate) parent: RewriteNode,
    pub(crate) slot: ChildSlot,
    pub(crate) original: Vec<RewriteNode>,
    pub(crate) log: Vec<PendingEdit>,
}

impl ListEdits {
    pub(crate) fn new(parent: RewriteNode, slot: ChildSlot, original: Vec<RewriteNode>) -> Self {
        Self {
            parent,
            slot,
            original,
            log: Vec::new(),
        }
    }

    pub fn parent(&self) -> RewriteNode {
        self.parent
    }

    pub fn slot(&self) -> ChildSlot {
        self.slot
    }

    /// The list as it was before any edit.
    pub fn original(&self) -> &[RewriteNode] {
        &self.original
    }

    pub fn edits(&self) -> &[PendingEdit] {
        &self.log
    }

    pub fn state(&self) -> ListState {
        if self.log.is_empty() {
            ListState::Unmodified
        } else {
            ListState::Pending
        }
    }

    /// The list with every recorded edit applied. Nothing is mutated.
    pub fn rewritten_list(&self) -> Vec<RewriteNode> {
        let mut view = self.original.clone();
        for edit in &self.log {
            edit.apply(&mut view);
        }
        view
    }
}

/// Edit log of one single-child slot of one parent.
#[derive(Clone, Debug)]
pub struct SlotEdits {
    pub(crate) parent: RewriteNode,
    pub(crate) slot: ChildSlot,
    pub(crate) original: Option<RewriteNode>,
    pub(crate) log: Vec<PendingEdit>,
}

impl SlotEdits {
    pub(crate) fn new(parent: RewriteNode, slot: ChildSlot, original: Option<RewriteNode>) -> Self {
        Self {
            parent,
            slot,
            original,
            log: Vec::new(),
        }
    }

    pub fn parent(&self) -> RewriteNode {
        self.parent
    }

    pub fn slot(&self) -> ChildSlot {
        self.slot
    }

    pub fn original(&self) -> Option<RewriteNode> {
        self.original
    }

    pub fn edits(&self) -> &[PendingEdit] {
        &self.log
    }

    /// The child after every recorded edit.
    pub fn current(&self) -> Option<RewriteNode> {
        let mut view: Vec<RewriteNode> = self.original.into_iter().collect();
        for edit in &self.log {
            edit.apply(&mut view);
        }
        view.first().copied()
    }
}

/// Editing handle for one child-list slot.
///
/// Obtained from [`AstRewrite::list`]. Every operation validates against
/// the current rewritten view before it is recorded; a failing call leaves
/// the log untouched.
pub struct ListRewrite<'r, 'a> {
    pub(crate) rewrite: &'r mut AstRewrite<'a>,
    pub(crate) parent: RewriteNode,
    pub(crate) slot: ChildSlot,
}

impl ListRewrite<'_, '_> {
    pub fn parent(&self) -> RewriteNode {
        self.parent
    }

    pub fn slot(&self) -> ChildSlot {
        self.slot
    }

    pub fn insert_at(
        &mut self,
        node: RewriteNode,
        index: usize,
        group: Option<EditGroup>,
    ) -> AnalysisResult<()> {
        self.rewrite
            .insert_into_list(self.parent, self.slot, node, index, group)
    }

    pub fn insert_first(&mut self, node: RewriteNode, group: Option<EditGroup>) -> AnalysisResult<()> {
        self.insert_at(node, 0, group)
    }

    pub fn insert_last(&mut self, node: RewriteNode, group: Option<EditGroup>) -> AnalysisResult<()> {
        let len = self.rewritten_list().len();
        self.insert_at(node, len, group)
    }

    /// Insert `node` right after `anchor` in the rewritten list.
    pub fn insert_after(
        &mut self,
        node: RewriteNode,
        anchor: RewriteNode,
        group: Option<EditGroup>,
    ) -> AnalysisResult<()> {
        let index = self.position_of(anchor)?;
        self.insert_at(node, index + 1, group)
    }

    pub fn insert_before(
        &mut self,
        node: RewriteNode,
        anchor: RewriteNode,
        group: Option<EditGroup>,
    ) -> AnalysisResult<()> {
        let index = self.position_of(anchor)?;
        self.insert_at(node, index, group)
    }

    pub fn remove(&mut self, node: RewriteNode, group: Option<EditGroup>) -> AnalysisResult<()> {
        self.rewrite
            .remove_from_list(self.parent, self.slot, node, group)
    }

    pub fn replace(
        &mut self,
        old: RewriteNode,
        new: RewriteNode,
        group: Option<EditGroup>,
    ) -> AnalysisResult<()> {
        self.rewrite
            .replace_in_list(self.parent, self.slot, old, new, group)
    }

    pub fn rewritten_list(&self) -> Vec<RewriteNode> {
        self.rewrite
            .list_edits(self.parent, self.slot)
            .map(ListEdits::rewritten_list)
            .unwrap_or_default()
    }

    pub fn original_list(&self) -> Vec<RewriteNode> {
        self.rewrite
            .list_edits(self.parent, self.slot)
            .map(|edits| edits.original.clone())
            .unwrap_or_default()
    }

    pub fn state(&self) -> ListState {
        self.rewrite
            .list_edits(self.parent, self.slot)
            .map_or(ListState::Unmodified, ListEdits::state)
    }

    fn position_of(&self, anchor: RewriteNode) -> AnalysisResult<usize> {
        self.rewritten_list()
            .iter()
            .position(|n| *n == anchor)
            .ok_or_else(|| {
                AnalysisError::precondition(format!(
                    "{anchor:?} is not in the rewritten {:?} list",
                    self.slot
                ))
            })
    }
}

#[cfg(test)]
#[path = "tests/list_rewrite_tests.rs"]
mod tests;
