//! Base index types for the syntax tree arena.

use serde::{Deserialize, Serialize};

/// Index of a node in a [`NodeArena`](crate::NodeArena).
///
/// Parent links are stored as `NodeIndex` values, so a child never owns its
/// parent; `NodeIndex::NONE` marks "no node".
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeIndex(pub u32);

impl NodeIndex {
    pub const NONE: NodeIndex = NodeIndex(u32::MAX);

    #[inline]
    pub const fn is_none(self) -> bool {
        self.0 == u32::MAX
    }

    #[inline]
    pub const fn is_some(self) -> bool {
        self.0 != u32::MAX
    }

    /// `None` for [`NodeIndex::NONE`], `Some(self)` otherwise.
    #[inline]
    pub const fn into_option(self) -> Option<NodeIndex> {
        if self.is_none() { None } else { Some(self) }
    }
}

impl Default for NodeIndex {
    fn default() -> Self {
        NodeIndex::NONE
    }
}

/// Ordered children of a child-list slot.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeList {
    pub nodes: Vec<NodeIndex>,
}

impl NodeList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_slice(nodes: &[NodeIndex]) -> Self {
        Self {
            nodes: nodes.to_vec(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[inline]
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = NodeIndex> + '_ {
        self.nodes.iter().copied()
    }

    #[inline]
    pub fn first(&self) -> Option<NodeIndex> {
        self.nodes.first().copied()
    }

    #[inline]
    pub fn last(&self) -> Option<NodeIndex> {
        self.nodes.last().copied()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<NodeIndex> {
        self.nodes.get(index).copied()
    }

    pub fn position(&self, node: NodeIndex) -> Option<usize> {
        self.nodes.iter().position(|n| *n == node)
    }
}

impl From<Vec<NodeIndex>> for NodeList {
    fn from(nodes: Vec<NodeIndex>) -> Self {
        Self { nodes }
    }
}
