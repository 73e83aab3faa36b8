//! The result of a committed rewrite.

use serde::{Deserialize, Serialize};

use crate::edit::{EditGroup, ListState, PendingEdit, RewriteNode};
use javelin_ast::{ChildSlot, NodeArena};
use javelin_common::{AnalysisError, AnalysisResult};

/// Every edit a rewrite recorded, per touched slot.
///
/// The original tree is left as it was; consumers project the change set
/// onto it. Nodes referenced as [`RewriteNode::Created`] live in
/// [`ChangeSet::arena`].
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeSet {
    pub lists: Vec<ListChange>,
    pub slots: Vec<SlotChange>,
    pub copies: Vec<PendingEdit>,
    pub groups: Vec<String>,
    #[serde(skip)]
    pub arena: NodeArena,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListChange {
    pub parent: RewriteNode,
    pub slot: ChildSlot,
    pub state: ListState,
    pub edits: Vec<PendingEdit>,
    pub original: Vec<RewriteNode>,
    pub rewritten: Vec<RewriteNode>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotChange {
    pub parent: RewriteNode,
    pub slot: ChildSlot,
    pub edits: Vec<PendingEdit>,
    pub original: Option<RewriteNode>,
    pub rewritten: Option<RewriteNode>,
}

impl ChangeSet {
    pub fn is_empty(&self) -> bool {
        self.lists.is_empty() && self.slots.is_empty() && self.copies.is_empty()
    }

    /// Number of recorded edits, copies included.
    pub fn edit_count(&self) -> usize {
        self.lists.iter().map(|change| change.edits.len()).sum::<usize>()
            + self.slots.iter().map(|change| change.edits.len()).sum::<usize>()
            + self.copies.len()
    }

    pub fn list_change(&self, parent: RewriteNode, slot: ChildSlot) -> Option<&ListChange> {
        self.lists
            .iter()
            .find(|change| change.parent == parent && change.slot == slot)
    }

    pub fn slot_change(&self, parent: RewriteNode, slot: ChildSlot) -> Option<&SlotChange> {
        self.slots
            .iter()
            .find(|change| change.parent == parent && change.slot == slot)
    }

    /// All edits tagged with `group`, in recording order per slot.
    pub fn edits_in_group(&self, group: EditGroup) -> Vec<&PendingEdit> {
        self.lists
            .iter()
            .flat_map(|change| change.edits.iter())
            .chain(self.slots.iter().flat_map(|change| change.edits.iter()))
            .chain(self.copies.iter())
            .filter(|edit| edit.group() == Some(group))
            .collect()
    }

    pub fn to_json(&self) -> AnalysisResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|err| AnalysisError::malformed(format!("change set is not serializable: {err}")))
    }

    /// Read back a change set written by [`ChangeSet::to_json`].
    ///
    /// The created-node arena is not part of the JSON form and comes back
    /// empty.
    pub fn from_json_str(json: &str) -> AnalysisResult<Self> {
        serde_json::from_str(json)
            .map_err(|err| AnalysisError::malformed(format!("invalid change set: {err}")))
    }
}

#[cfg(test)]
#[path = "tests/change_set_tests.rs"]
mod tests;
