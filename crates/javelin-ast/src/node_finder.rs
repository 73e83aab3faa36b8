//! Offset-based node lookup.

use javelin_common::TextRange;

use crate::base::NodeIndex;
use crate::node_arena::NodeArena;

/// Result of a selection lookup.
///
/// `covering` is the innermost node whose range contains the whole
/// selection; `covered` is the first node lying entirely inside it.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct NodeFinder {
    pub covering: Option<NodeIndex>,
    pub covered: Option<NodeIndex>,
}

impl NodeFinder {
    pub fn new(arena: &NodeArena, root: NodeIndex, offset: u32, length: u32) -> Self {
        let selection = TextRange::new(offset, length);
        let mut covering = None;
        let mut covered = None;

        let mut current = root;
        let root_covers = arena
            .range(root)
            .is_some_and(|r| r.start <= selection.start && selection.end() <= r.end());
        if !root_covers {
            return Self { covering, covered };
        }
        covering = Some(root);

        'descend: loop {
            for child in arena.children(current) {
                let Some(range) = arena.range(child) else {
                    continue;
                };
                if range.start <= selection.start && selection.end() <= range.end() {
                    covering = Some(child);
                    covered = None;
                    current = child;
                    continue 'descend;
                }
                if covered.is_none() && selection.covers(range) && range.length > 0 {
                    covered = Some(child);
                }
            }
            break;
        }

        if let Some(node) = covering
            && arena.range(node) == Some(selection)
        {
            covered = Some(node);
        }
        Self { covering, covered }
    }

    /// Innermost node whose range contains `[offset, offset + length)`.
    pub fn covering_node(
        arena: &NodeArena,
        root: NodeIndex,
        offset: u32,
        length: u32,
    ) -> Option<NodeIndex> {
        Self::new(arena, root, offset, length).covering
    }

    /// First node lying inside `[offset, offset + length)`.
    pub fn covered_node(
        arena: &NodeArena,
        root: NodeIndex,
        offset: u32,
        length: u32,
    ) -> Option<NodeIndex> {
        Self::new(arena, root, offset, length).covered
    }
}
