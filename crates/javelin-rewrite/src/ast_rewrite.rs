//! The rewrite session.
//!
//! An [`AstRewrite`] borrows an original tree immutably and records edits
//! against it. Nodes that do not exist in the original tree (synthetic
//! snippets, copies) are built in an arena the rewrite owns. Original nodes
//! are never placed a second time: moving one goes through a move target,
//! duplicating one through a copy target.
//!
//! Every recording operation validates first and records second, so a
//! failing call leaves all logs as they were. Compound operations run inside
//! [`AstRewrite::atomically`] to get the same guarantee across several
//! records.

use indexmap::IndexMap;
use rustc_hash::{FxBuildHasher, FxHashMap, FxHashSet};
use tracing::{debug, trace};

use crate::change_set::{ChangeSet, ListChange, SlotChange};
use crate::edit::{EditGroup, ListState, PendingEdit, RewriteNode};
use crate::list_rewrite::{ListEdits, ListRewrite, SlotEdits};
use javelin_ast::{ChildSlot, NodeArena, NodeData, NodeIndex, NodeKind, SlotValue};
use javelin_common::{AnalysisError, AnalysisResult};

type SlotKey = (RewriteNode, ChildSlot);

pub struct AstRewrite<'a> {
    original: &'a NodeArena,
    arena: NodeArena,
    lists: IndexMap<SlotKey, ListEdits, FxBuildHasher>,
    slots: IndexMap<SlotKey, SlotEdits, FxBuildHasher>,
    /// Where each inserted or replacing node currently sits.
    placements: FxHashMap<RewriteNode, SlotKey>,
    move_targets: FxHashSet<NodeIndex>,
    copies: Vec<PendingEdit>,
    groups: Vec<String>,
}

/// Log lengths at the start of an atomic operation.
struct Savepoint {
    lists: Vec<usize>,
    slots: Vec<usize>,
    placements: FxHashMap<RewriteNode, SlotKey>,
    move_targets: FxHashSet<NodeIndex>,
    copies: usize,
    groups: usize,
}

impl<'a> AstRewrite<'a> {
    pub fn new(original: &'a NodeArena) -> Self {
        Self {
            original,
            arena: NodeArena::new(),
            lists: IndexMap::default(),
            slots: IndexMap::default(),
            placements: FxHashMap::default(),
            move_targets: FxHashSet::default(),
            copies: Vec::new(),
            groups: Vec::new(),
        }
    }

    /// The tree edits are recorded against.
    pub fn original(&self) -> &'a NodeArena {
        self.original
    }

    /// Nodes created by this rewrite.
    pub fn arena(&self) -> &NodeArena {
        &self.arena
    }

    pub fn new_edit_group(&mut self, name: impl Into<String>) -> EditGroup {
        self.groups.push(name.into());
        EditGroup(self.groups.len() as u32 - 1)
    }

    pub fn edit_group_name(&self, group: EditGroup) -> Option<&str> {
        self.groups.get(group.0 as usize).map(String::as_str)
    }

    // =========================================================================
    // Node Access
    // =========================================================================

    pub fn node_data(&self, node: RewriteNode) -> Option<&NodeData> {
        self.arena_of(node).data(node.index())
    }

    pub fn kind(&self, node: RewriteNode) -> Option<NodeKind> {
        self.node_data(node).map(NodeData::kind)
    }

    fn arena_of(&self, node: RewriteNode) -> &NodeArena {
        if node.is_in_original_tree() {
            self.original
        } else {
            &self.arena
        }
    }

    /// The parent and slot `node` occupies in the rewritten tree.
    pub fn location_of(&self, node: RewriteNode) -> AnalysisResult<(RewriteNode, ChildSlot)> {
        if let Some(location) = self.placements.get(&node) {
            return Ok(*location);
        }
        let arena = self.arena_of(node);
        let located = arena
            .parent(node.index())
            .zip(arena.slot(node.index()));
        match (node, located) {
            (RewriteNode::Original(_), Some((parent, slot))) => Ok((RewriteNode::Original(parent), slot)),
            (RewriteNode::Created(_), Some((parent, slot))) => Ok((RewriteNode::Created(parent), slot)),
            (RewriteNode::Moved(_), _) => Err(AnalysisError::precondition(format!(
                "{node:?} has not been placed"
            ))),
            _ => Err(AnalysisError::malformed(format!("{node:?} has no parent"))),
        }
    }

    // =========================================================================
    // Node Creation
    // =========================================================================

    /// Build a detached node in the rewrite's arena.
    ///
    /// `build` receives the arena and must return the root of the new
    /// subtree.
    pub fn create_synthetic(
        &mut self,
        build: impl FnOnce(&mut NodeArena) -> NodeIndex,
    ) -> AnalysisResult<RewriteNode> {
        let root = build(&mut self.arena);
        if self.arena.get(root).is_none() {
            return Err(AnalysisError::malformed("synthetic builder returned no node"));
        }
        if self.arena.parent(root).is_some() {
            return Err(AnalysisError::precondition(
                "synthetic root must be detached",
            ));
        }
        trace!(?root, kind = ?self.arena.kind(root), "created synthetic node");
        Ok(RewriteNode::Created(root))
    }

    /// Deep-copy an original node into the rewrite's arena.
    pub fn create_copy_target(
        &mut self,
        node: NodeIndex,
        group: Option<EditGroup>,
    ) -> AnalysisResult<RewriteNode> {
        if self.original.get(node).is_none() {
            return Err(AnalysisError::precondition(format!(
                "{node:?} is not a node of the original tree"
            )));
        }
        let copy = self.arena.copy_subtree_from(self.original, node);
        self.copies.push(PendingEdit::Copy {
            source: node,
            copy,
            group,
        });
        debug!(?node, ?copy, "created copy target");
        Ok(RewriteNode::Created(copy))
    }

    /// The original node `copy` was duplicated from.
    pub fn copy_source(&self, copy: NodeIndex) -> Option<NodeIndex> {
        self.copies.iter().find_map(|edit| match edit {
            PendingEdit::Copy { source, copy: c, .. } if *c == copy => Some(*source),
            _ => None,
        })
    }

    /// Detach an original node from its location so it can be placed
    /// elsewhere.
    ///
    /// The removal is recorded immediately; if the returned placeholder is
    /// never placed, the node is simply gone.
    pub fn create_move_target(
        &mut self,
        node: NodeIndex,
        group: Option<EditGroup>,
    ) -> AnalysisResult<RewriteNode> {
        if self.move_targets.contains(&node) {
            return Err(AnalysisError::precondition(format!(
                "{node:?} already has a move target"
            )));
        }
        let source = RewriteNode::Original(node);
        let (parent, slot) = self.location_of(source)?;
        if slot.is_list() {
            self.ensure_list(parent, slot)?;
            self.require_in_list(parent, slot, source)?;
            self.push_list_edit(parent, slot, PendingEdit::Move { node, group });
        } else {
            self.ensure_slot(parent, slot)?;
            if self.current_in_slot(parent, slot) != Some(source) {
                return Err(AnalysisError::precondition(format!(
                    "{node:?} is no longer in {slot:?}"
                )));
            }
            self.push_slot_edit(parent, slot, PendingEdit::Move { node, group });
        }
        self.move_targets.insert(node);
        debug!(?node, ?slot, "created move target");
        Ok(RewriteNode::Moved(node))
    }

    // =========================================================================
    // Generic Edits
    // =========================================================================

    /// Editing handle for the child list `slot` of `parent`.
    pub fn list(
        &mut self,
        parent: impl Into<RewriteNode>,
        slot: ChildSlot,
    ) -> AnalysisResult<ListRewrite<'_, 'a>> {
        let parent = parent.into();
        self.ensure_list(parent, slot)?;
        Ok(ListRewrite {
            rewrite: self,
            parent,
            slot,
        })
    }

    /// The edit log of a list slot, if the slot has been opened.
    pub fn list_edits(&self, parent: RewriteNode, slot: ChildSlot) -> Option<&ListEdits> {
        self.lists.get(&(parent, slot))
    }

    pub fn slot_edits(&self, parent: RewriteNode, slot: ChildSlot) -> Option<&SlotEdits> {
        self.slots.get(&(parent, slot))
    }

    /// Contents of a list slot with every recorded edit applied.
    pub fn rewritten_list(
        &self,
        parent: impl Into<RewriteNode>,
        slot: ChildSlot,
    ) -> AnalysisResult<Vec<RewriteNode>> {
        let parent = parent.into();
        match self.lists.get(&(parent, slot)) {
            Some(edits) => Ok(edits.rewritten_list()),
            None => self.snapshot_list(parent, slot),
        }
    }

    /// Child of a single-child slot with every recorded edit applied.
    pub fn current_child(
        &self,
        parent: impl Into<RewriteNode>,
        slot: ChildSlot,
    ) -> AnalysisResult<Option<RewriteNode>> {
        let parent = parent.into();
        match self.slots.get(&(parent, slot)) {
            Some(edits) => Ok(edits.current()),
            None => self.snapshot_single(parent, slot),
        }
    }

    /// Replace `old` wherever it currently sits.
    pub fn replace(
        &mut self,
        old: impl Into<RewriteNode>,
        new: RewriteNode,
        group: Option<EditGroup>,
    ) -> AnalysisResult<()> {
        let old = old.into();
        let (parent, slot) = self.location_of(old)?;
        if slot.is_list() {
            return self.replace_in_list(parent, slot, old, new, group);
        }
        self.ensure_slot(parent, slot)?;
        if self.current_in_slot(parent, slot) != Some(old) {
            return Err(AnalysisError::precondition(format!(
                "{old:?} is no longer in {slot:?}"
            )));
        }
        self.check_placeable(new)?;
        self.push_slot_edit(parent, slot, PendingEdit::Replace { old, new, group });
        self.placements.remove(&old);
        self.placements.insert(new, (parent, slot));
        debug!(?old, ?new, ?slot, "replace");
        Ok(())
    }

    /// Remove `node` from wherever it currently sits.
    pub fn remove(&mut self, node: impl Into<RewriteNode>, group: Option<EditGroup>) -> AnalysisResult<()> {
        let node = node.into();
        let (parent, slot) = self.location_of(node)?;
        if slot.is_list() {
            return self.remove_from_list(parent, slot, node, group);
        }
        self.ensure_slot(parent, slot)?;
        if self.current_in_slot(parent, slot) != Some(node) {
            return Err(AnalysisError::precondition(format!(
                "{node:?} is no longer in {slot:?}"
            )));
        }
        self.push_slot_edit(parent, slot, PendingEdit::Remove { node, group });
        self.placements.remove(&node);
        debug!(?node, ?slot, "remove");
        Ok(())
    }

    /// Set the child of a single-child slot, or clear it with `None`.
    pub fn set_child(
        &mut self,
        parent: impl Into<RewriteNode>,
        slot: ChildSlot,
        child: Option<RewriteNode>,
        group: Option<EditGroup>,
    ) -> AnalysisResult<()> {
        let parent = parent.into();
        self.ensure_slot(parent, slot)?;
        match (self.current_in_slot(parent, slot), child) {
            (Some(old), Some(new)) => self.replace(old, new, group),
            (Some(old), None) => self.remove(old, group),
            (None, Some(new)) => {
                self.check_placeable(new)?;
                self.push_slot_edit(
                    parent,
                    slot,
                    PendingEdit::Insert {
                        node: new,
                        index: 0,
                        group,
                    },
                );
                self.placements.insert(new, (parent, slot));
                Ok(())
            }
            (None, None) => Ok(()),
        }
    }

    /// Run `f`; if it fails, roll every log back to where it was.
    pub fn atomically<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> AnalysisResult<T>,
    ) -> AnalysisResult<T> {
        let savepoint = self.savepoint();
        let result = f(self);
        if let Err(err) = &result {
            debug!(%err, "rolling back rewrite operation");
            self.restore(savepoint);
        }
        result
    }

    // =========================================================================
    // Commit
    // =========================================================================

    /// Finish the session and hand the recorded edits over.
    ///
    /// Only slots with at least one edit are reported.
    #[tracing::instrument(level = "debug", skip(self), fields(lists = self.lists.len(), slots = self.slots.len()))]
    pub fn commit(self) -> ChangeSet {
        let lists = self
            .lists
            .into_values()
            .filter(|edits| !edits.log.is_empty())
            .map(|edits| ListChange {
                parent: edits.parent,
                slot: edits.slot,
                state: ListState::Committed,
                rewritten: edits.rewritten_list(),
                original: edits.original,
                edits: edits.log,
            })
            .collect::<Vec<_>>();
        let slots = self
            .slots
            .into_values()
            .filter(|edits| !edits.log.is_empty())
            .map(|edits| SlotChange {
                parent: edits.parent,
                slot: edits.slot,
                rewritten: edits.current(),
                original: edits.original,
                edits: edits.log,
            })
            .collect::<Vec<_>>();
        debug!(lists = lists.len(), slots = slots.len(), "committed rewrite");
        ChangeSet {
            lists,
            slots,
            copies: self.copies,
            groups: self.groups,
            arena: self.arena,
        }
    }

    // =========================================================================
    // List Recording
    // =========================================================================

    pub(crate) fn insert_into_list(
        &mut self,
        parent: RewriteNode,
        slot: ChildSlot,
        node: RewriteNode,
        index: usize,
        group: Option<EditGroup>,
    ) -> AnalysisResult<()> {
        self.ensure_list(parent, slot)?;
        let len = self.list_view(parent, slot).len();
        if index > len {
            return Err(AnalysisError::precondition(format!(
                "insert index {index} is past the end of a list of {len}"
            )));
        }
        self.check_placeable(node)?;
        self.push_list_edit(parent, slot, PendingEdit::Insert { node, index, group });
        self.placements.insert(node, (parent, slot));
        debug!(?node, index, ?slot, "insert");
        Ok(())
    }

    pub(crate) fn remove_from_list(
        &mut self,
        parent: RewriteNode,
        slot: ChildSlot,
        node: RewriteNode,
        group: Option<EditGroup>,
    ) -> AnalysisResult<()> {
        self.ensure_list(parent, slot)?;
        self.require_in_list(parent, slot, node)?;
        self.push_list_edit(parent, slot, PendingEdit::Remove { node, group });
        self.placements.remove(&node);
        debug!(?node, ?slot, "remove from list");
        Ok(())
    }

    pub(crate) fn replace_in_list(
        &mut self,
        parent: RewriteNode,
        slot: ChildSlot,
        old: RewriteNode,
        new: RewriteNode,
        group: Option<EditGroup>,
    ) -> AnalysisResult<()> {
        self.ensure_list(parent, slot)?;
        self.require_in_list(parent, slot, old)?;
        self.check_placeable(new)?;
        self.push_list_edit(parent, slot, PendingEdit::Replace { old, new, group });
        self.placements.remove(&old);
        self.placements.insert(new, (parent, slot));
        debug!(?old, ?new, ?slot, "replace in list");
        Ok(())
    }

    fn list_view(&self, parent: RewriteNode, slot: ChildSlot) -> Vec<RewriteNode> {
        self.lists
            .get(&(parent, slot))
            .map(ListEdits::rewritten_list)
            .unwrap_or_default()
    }

    fn require_in_list(&self, parent: RewriteNode, slot: ChildSlot, node: RewriteNode) -> AnalysisResult<()> {
        if self.list_view(parent, slot).contains(&node) {
            Ok(())
        } else {
            Err(AnalysisError::precondition(format!(
                "{node:?} is not in the rewritten {slot:?} list"
            )))
        }
    }

    fn push_list_edit(&mut self, parent: RewriteNode, slot: ChildSlot, edit: PendingEdit) {
        if let Some(edits) = self.lists.get_mut(&(parent, slot)) {
            edits.log.push(edit);
        }
    }

    fn ensure_list(&mut self, parent: RewriteNode, slot: ChildSlot) -> AnalysisResult<()> {
        if self.lists.contains_key(&(parent, slot)) {
            return Ok(());
        }
        let original = self.snapshot_list(parent, slot)?;
        self.lists
            .insert((parent, slot), ListEdits::new(parent, slot, original));
        Ok(())
    }

    fn snapshot_list(&self, parent: RewriteNode, slot: ChildSlot) -> AnalysisResult<Vec<RewriteNode>> {
        let data = self.parent_data(parent)?;
        match data.slot_value(slot) {
            Some(SlotValue::List(list)) => Ok(list
                .iter()
                .map(|child| Self::same_origin(parent, child))
                .collect()),
            _ => Err(AnalysisError::malformed(format!(
                "{:?} has no child list {slot:?}",
                data.kind()
            ))),
        }
    }

    // =========================================================================
    // Single-Slot Recording
    // =========================================================================

    fn current_in_slot(&self, parent: RewriteNode, slot: ChildSlot) -> Option<RewriteNode> {
        self.slots.get(&(parent, slot)).and_then(SlotEdits::current)
    }

    fn push_slot_edit(&mut self, parent: RewriteNode, slot: ChildSlot, edit: PendingEdit) {
        if let Some(edits) = self.slots.get_mut(&(parent, slot)) {
            edits.log.push(edit);
        }
    }

    fn ensure_slot(&mut self, parent: RewriteNode, slot: ChildSlot) -> AnalysisResult<()> {
        if self.slots.contains_key(&(parent, slot)) {
            return Ok(());
        }
        let original = self.snapshot_single(parent, slot)?;
        self.slots
            .insert((parent, slot), SlotEdits::new(parent, slot, original));
        Ok(())
    }

    fn snapshot_single(&self, parent: RewriteNode, slot: ChildSlot) -> AnalysisResult<Option<RewriteNode>> {
        let data = self.parent_data(parent)?;
        match data.slot_value(slot) {
            Some(SlotValue::Single(child)) => {
                Ok(child.into_option().map(|child| Self::same_origin(parent, child)))
            }
            _ => Err(AnalysisError::malformed(format!(
                "{:?} has no single-child slot {slot:?}",
                data.kind()
            ))),
        }
    }

    // =========================================================================
    // Validation
    // =========================================================================

    fn parent_data(&self, parent: RewriteNode) -> AnalysisResult<&NodeData> {
        if matches!(parent, RewriteNode::Moved(_)) {
            return Err(AnalysisError::precondition(
                "edit the original node, not its move target",
            ));
        }
        self.node_data(parent)
            .ok_or_else(|| AnalysisError::malformed(format!("{parent:?} does not exist")))
    }

    /// Children share the arena of their parent.
    fn same_origin(parent: RewriteNode, child: NodeIndex) -> RewriteNode {
        match parent {
            RewriteNode::Created(_) => RewriteNode::Created(child),
            _ => RewriteNode::Original(child),
        }
    }

    /// A node may enter the rewritten tree once, and original nodes only
    /// through move targets.
    fn check_placeable(&self, node: RewriteNode) -> AnalysisResult<()> {
        if self.placements.contains_key(&node) {
            return Err(AnalysisError::precondition(format!(
                "{node:?} is already placed in the rewritten tree"
            )));
        }
        match node {
            RewriteNode::Original(index) => Err(AnalysisError::precondition(format!(
                "{index:?} already belongs to the original tree; use a move or copy target"
            ))),
            RewriteNode::Moved(index) if !self.move_targets.contains(&index) => {
                Err(AnalysisError::precondition(format!(
                    "{index:?} has no move target"
                )))
            }
            RewriteNode::Moved(_) => Ok(()),
            RewriteNode::Created(index) => {
                if self.arena.get(index).is_none() {
                    Err(AnalysisError::malformed(format!(
                        "{index:?} is not a node of the rewrite arena"
                    )))
                } else if self.arena.parent(index).is_some() {
                    Err(AnalysisError::precondition(format!(
                        "{index:?} is part of another synthetic subtree"
                    )))
                } else {
                    Ok(())
                }
            }
        }
    }

    fn savepoint(&self) -> Savepoint {
        Savepoint {
            lists: self.lists.values().map(|edits| edits.log.len()).collect(),
            slots: self.slots.values().map(|edits| edits.log.len()).collect(),
            placements: self.placements.clone(),
            move_targets: self.move_targets.clone(),
            copies: self.copies.len(),
            groups: self.groups.len(),
        }
    }

    fn restore(&mut self, savepoint: Savepoint) {
        self.lists.truncate(savepoint.lists.len());
        for (edits, len) in self.lists.values_mut().zip(savepoint.lists) {
            edits.log.truncate(len);
        }
        self.slots.truncate(savepoint.slots.len());
        for (edits, len) in self.slots.values_mut().zip(savepoint.slots) {
            edits.log.truncate(len);
        }
        self.placements = savepoint.placements;
        self.move_targets = savepoint.move_targets;
        self.copies.truncate(savepoint.copies);
        self.groups.truncate(savepoint.groups);
    }
}

#[cfg(test)]
#[path = "tests/ast_rewrite_tests.rs"]
mod tests;
