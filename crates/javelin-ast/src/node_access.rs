//! NodeArena access methods.
//!
//! Read-only navigation over an arena: node lookup, parent and slot queries,
//! child enumeration, ancestor walks and the binding-to-declaration index.

use javelin_common::limits::MAX_TREE_WALK_ITERATIONS;
use javelin_common::{BindingId, TextRange};

use crate::base::{NodeIndex, NodeList};
use crate::node::{ChildSlot, Node, NodeData, NodeKind, SlotValue};
use crate::node_arena::NodeArena;

impl NodeArena {
    #[inline]
    pub fn get(&self, index: NodeIndex) -> Option<&Node> {
        if index.is_none() {
            None
        } else {
            self.nodes.get(index.0 as usize)
        }
    }

    #[inline]
    pub fn get_mut(&mut self, index: NodeIndex) -> Option<&mut Node> {
        if index.is_none() {
            None
        } else {
            self.nodes.get_mut(index.0 as usize)
        }
    }

    #[inline]
    pub fn data(&self, index: NodeIndex) -> Option<&NodeData> {
        self.get(index).map(|n| &n.data)
    }

    #[inline]
    pub fn kind(&self, index: NodeIndex) -> Option<NodeKind> {
        self.get(index).map(Node::kind)
    }

    #[inline]
    pub fn is_kind(&self, index: NodeIndex, kind: NodeKind) -> bool {
        self.kind(index) == Some(kind)
    }

    #[inline]
    pub fn range(&self, index: NodeIndex) -> Option<TextRange> {
        self.get(index).and_then(|n| n.range)
    }

    /// Start offset of a positioned node.
    #[inline]
    pub fn start(&self, index: NodeIndex) -> Option<u32> {
        self.range(index).map(|r| r.start)
    }

    #[inline]
    pub fn end(&self, index: NodeIndex) -> Option<u32> {
        self.range(index).map(|r| r.end())
    }

    #[inline]
    pub fn binding(&self, index: NodeIndex) -> Option<BindingId> {
        self.get(index).and_then(|n| n.binding)
    }

    #[inline]
    pub fn type_binding(&self, index: NodeIndex) -> Option<BindingId> {
        self.get(index).and_then(|n| n.type_binding)
    }

    /// Parent of `index`, or `None` at a root.
    #[inline]
    pub fn parent(&self, index: NodeIndex) -> Option<NodeIndex> {
        self.get(index).and_then(|n| n.parent.into_option())
    }

    /// Slot `index` occupies in its parent.
    #[inline]
    pub fn slot(&self, index: NodeIndex) -> Option<ChildSlot> {
        self.get(index).and_then(|n| n.slot)
    }

    /// Identifier text of a `SimpleName`.
    pub fn identifier(&self, index: NodeIndex) -> Option<&str> {
        match self.data(index)? {
            NodeData::SimpleName { identifier } => Some(identifier.as_str()),
            _ => None,
        }
    }

    /// Declaration node of `binding`, when the binding was attached to one.
    #[inline]
    pub fn declaration_of(&self, binding: BindingId) -> Option<NodeIndex> {
        self.declarations.get(&binding).copied()
    }

    // ========================================================================
    // Slots and Children
    // ========================================================================

    /// The child held by a single-child slot.
    pub fn child_in_slot(&self, parent: NodeIndex, slot: ChildSlot) -> Option<NodeIndex> {
        match self.data(parent)?.slot_value(slot)? {
            SlotValue::Single(child) => child.into_option(),
            SlotValue::List(_) => None,
        }
    }

    /// The list held by a child-list slot.
    pub fn list_in_slot(&self, parent: NodeIndex, slot: ChildSlot) -> Option<&NodeList> {
        match self.data(parent)?.slot_value(slot)? {
            SlotValue::List(list) => Some(list),
            SlotValue::Single(_) => None,
        }
    }

    /// The list that contains `index`, if it sits in a child-list slot.
    pub fn containing_list(&self, index: NodeIndex) -> Option<&NodeList> {
        let slot = self.slot(index)?;
        if !slot.is_list() {
            return None;
        }
        self.list_in_slot(self.parent(index)?, slot)
    }

    /// Direct children ordered by start offset.
    ///
    /// Slot order is source order for parsed trees; the sort only matters for
    /// trees whose ranges were assigned out of band. Synthesized children keep
    /// their slot position.
    pub fn children(&self, index: NodeIndex) -> Vec<NodeIndex> {
        let Some(data) = self.data(index) else {
            return Vec::new();
        };
        let mut children: Vec<NodeIndex> =
            data.child_entries().into_iter().map(|(_, c)| c).collect();
        if children.iter().all(|c| self.range(*c).is_some()) {
            children.sort_by_key(|c| self.start(*c).unwrap_or(u32::MAX));
        }
        children
    }

    // ========================================================================
    // Ancestor Walks
    // ========================================================================

    /// Ancestors of `index`, nearest first, excluding `index` itself.
    ///
    /// Stops after `MAX_TREE_WALK_ITERATIONS` hops so a corrupted parent
    /// chain cannot loop forever.
    pub fn ancestors(&self, index: NodeIndex) -> Ancestors<'_> {
        Ancestors {
            arena: self,
            current: self.parent(index),
            iterations: 0,
        }
    }

    /// Nearest ancestor (excluding `index`) whose kind satisfies `pred`.
    pub fn find_ancestor(
        &self,
        index: NodeIndex,
        mut pred: impl FnMut(NodeKind) -> bool,
    ) -> Option<NodeIndex> {
        self.ancestors(index)
            .find(|a| self.kind(*a).is_some_and(&mut pred))
    }

    /// Nearest ancestor of exactly `kind`.
    pub fn find_ancestor_of_kind(&self, index: NodeIndex, kind: NodeKind) -> Option<NodeIndex> {
        self.find_ancestor(index, |k| k == kind)
    }

    /// True if `ancestor` is `node` or lies on its parent chain.
    pub fn is_ancestor_or_self(&self, ancestor: NodeIndex, node: NodeIndex) -> bool {
        node == ancestor || self.ancestors(node).any(|a| a == ancestor)
    }

    pub fn root_of(&self, index: NodeIndex) -> NodeIndex {
        self.ancestors(index).last().unwrap_or(index)
    }

    // ========================================================================
    // Subtree Walks
    // ========================================================================

    /// All nodes of the subtree rooted at `root`, in pre-order.
    pub fn descendants(&self, root: NodeIndex) -> Vec<NodeIndex> {
        let mut out = Vec::new();
        let mut stack = vec![root];
        while let Some(current) = stack.pop() {
            let Some(data) = self.data(current) else {
                continue;
            };
            out.push(current);
            let entries = data.child_entries();
            stack.extend(entries.into_iter().rev().map(|(_, c)| c));
        }
        out
    }
}

/// Iterator returned by [`NodeArena::ancestors`].
pub struct Ancestors<'a> {
    arena: &'a NodeArena,
    current: Option<NodeIndex>,
    iterations: usize,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeIndex;

    fn next(&mut self) -> Option<NodeIndex> {
        let current = self.current?;
        self.iterations += 1;
        if self.iterations > MAX_TREE_WALK_ITERATIONS {
            self.current = None;
            return None;
        }
        self.current = self.arena.parent(current);
        Some(current)
    }
}
