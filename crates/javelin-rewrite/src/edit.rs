//! Edit records.
//!
//! A rewrite never touches the original tree. Every structural change is a
//! [`PendingEdit`] appended to the log of the slot it affects; the resulting
//! tree is a projection of the original slot contents through that log.

use serde::{Deserialize, Serialize};

use javelin_ast::NodeIndex;

/// A node as seen by a rewrite.
///
/// Original-tree nodes and nodes created by the rewrite live in different
/// arenas, so an index alone does not say which node is meant.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "origin", content = "index", rename_all = "camelCase")]
pub enum RewriteNode {
    /// A node of the original tree at its original location.
    Original(NodeIndex),
    /// Placeholder for an original node that is moved to a new location.
    Moved(NodeIndex),
    /// A node of the rewrite's own arena: synthetic nodes and copies.
    Created(NodeIndex),
}

impl RewriteNode {
    #[inline]
    pub const fn index(self) -> NodeIndex {
        match self {
            Self::Original(index) | Self::Moved(index) | Self::Created(index) => index,
        }
    }

    /// True when the node's data lives in the original arena.
    #[inline]
    pub const fn is_in_original_tree(self) -> bool {
        matches!(self, Self::Original(_) | Self::Moved(_))
    }
}

impl From<NodeIndex> for RewriteNode {
    fn from(index: NodeIndex) -> Self {
        Self::Original(index)
    }
}

/// Opaque tag grouping edits that belong to one user-level change.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EditGroup(pub u32);

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum PendingEdit {
    /// `node` enters the slot at `index` of the rewritten view at the time
    /// the edit was recorded.
    Insert {
        node: RewriteNode,
        index: usize,
        #[serde(skip_serializing_if = "Option::is_none")]
        group: Option<EditGroup>,
    },
    Remove {
        node: RewriteNode,
        #[serde(skip_serializing_if = "Option::is_none")]
        group: Option<EditGroup>,
    },
    Replace {
        old: RewriteNode,
        new: RewriteNode,
        #[serde(skip_serializing_if = "Option::is_none")]
        group: Option<EditGroup>,
    },
    /// The original `node` leaves this slot; a [`RewriteNode::Moved`]
    /// placeholder carries it elsewhere.
    Move {
        node: NodeIndex,
        #[serde(skip_serializing_if = "Option::is_none")]
        group: Option<EditGroup>,
    },
    /// `copy` in the rewrite arena is a deep duplicate of original `source`.
    Copy {
        source: NodeIndex,
        copy: NodeIndex,
        #[serde(skip_serializing_if = "Option::is_none")]
        group: Option<EditGroup>,
    },
}

impl PendingEdit {
    pub const fn group(&self) -> Option<EditGroup> {
        match self {
            Self::Insert { group, .. }
            | Self::Remove { group, .. }
            | Self::Replace { group, .. }
            | Self::Move { group, .. }
            | Self::Copy { group, .. } => *group,
        }
    }

    /// Apply this edit to a view of slot contents.
    ///
    /// Edits are validated when recorded, so a node that is not found here
    /// only means the view was built from a different log.
    pub(crate) fn apply(&self, view: &mut Vec<RewriteNode>) {
        match self {
            Self::Insert { node, index, .. } => {
                let index = (*index).min(view.len());
                view.insert(index, *node);
            }
            Self::Remove { node, .. } => {
                if let Some(position) = view.iter().position(|n| n == node) {
                    view.remove(position);
                }
            }
            Self::Replace { old, new, .. } => {
                if let Some(entry) = view.iter_mut().find(|n| *n == old) {
                    *entry = *new;
                }
            }
            Self::Move { node, .. } => {
                let original = RewriteNode::Original(*node);
                if let Some(position) = view.iter().position(|n| *n == original) {
                    view.remove(position);
                }
            }
            Self::Copy { .. } => {}
        }
    }
}

/// Lifecycle of one slot's edit log.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ListState {
    Unmodified,
    Pending,
    Committed,
}
