//! Binding-aware structural equality of subtrees.
//!
//! Two subtrees match when they have the same shape, operators and literal
//! text, and every name in one resolves to the same binding and static type
//! as the corresponding name in the other. The subtrees may live in
//! different arenas.

use javelin_ast::{NodeArena, NodeIndex};
use javelin_bindings::BindingResolver;
use javelin_common::BindingId;

pub struct SubtreeMatcher<'a> {
    resolver: &'a BindingResolver<'a>,
}

impl<'a> SubtreeMatcher<'a> {
    pub fn new(resolver: &'a BindingResolver<'a>) -> Self {
        Self { resolver }
    }

    /// True if `left` (in `left_arena`) and `right` (in `right_arena`) are
    /// structurally equal.
    pub fn matches(
        &self,
        left_arena: &NodeArena,
        left: NodeIndex,
        right_arena: &NodeArena,
        right: NodeIndex,
    ) -> bool {
        let mut pending = vec![(left, right)];
        while let Some((l, r)) = pending.pop() {
            match (left_arena.get(l), right_arena.get(r)) {
                (None, None) => continue,
                (Some(_), None) | (None, Some(_)) => return false,
                (Some(a), Some(b)) => {
                    if !a.data.same_attributes(&b.data) {
                        return false;
                    }
                    if a.kind().is_name()
                        && !(self.same_binding(a.binding, b.binding)
                            && self.same_binding(a.type_binding, b.type_binding))
                    {
                        return false;
                    }
                    let left_children = a.data.child_entries();
                    let right_children = b.data.child_entries();
                    if left_children.len() != right_children.len() {
                        return false;
                    }
                    for ((ls, lc), (rs, rc)) in left_children.into_iter().zip(right_children) {
                        if ls != rs {
                            return false;
                        }
                        pending.push((lc, rc));
                    }
                }
            }
        }
        true
    }

    fn same_binding(&self, a: Option<BindingId>, b: Option<BindingId>) -> bool {
        match (a, b) {
            (None, None) => true,
            (Some(a), Some(b)) => self.resolver.bindings_equal(a, b),
            _ => false,
        }
    }
}

#[cfg(test)]
#[path = "tests/matcher_tests.rs"]
mod tests;
