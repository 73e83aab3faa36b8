//! Forward-only position over a [`ScopeTree`].
//!
//! Callers that scan a body front to back (name collision checks while
//! walking statements) advance a cursor instead of re-querying the tree at
//! every offset; each step reports only the declarations that became
//! visible since the previous one.

use crate::flags::DeclarationFlags;
use crate::scope::{ScopeDeclaration, ScopeTree};
use javelin_common::{AnalysisError, AnalysisResult};

pub struct ScopeCursor<'t> {
    tree: &'t ScopeTree,
    position: u32,
}

impl<'t> ScopeCursor<'t> {
    /// A cursor at `start`; nothing declared at or after `start` is visible
    /// yet.
    pub fn new(tree: &'t ScopeTree, start: u32) -> Self {
        Self {
            tree,
            position: start,
        }
    }

    #[inline]
    pub fn position(&self) -> u32 {
        self.position
    }

    /// Move to `offset` and return the declarations in scope there that
    /// were not visible at the previous position, in source order.
    pub fn advance_to(&mut self, offset: u32) -> AnalysisResult<Vec<&'t ScopeDeclaration>> {
        if offset < self.position {
            return Err(AnalysisError::precondition(format!(
                "scope cursor cannot move back from {} to {offset}",
                self.position
            )));
        }
        let previous = self.position;
        self.position = offset;
        let mut revealed: Vec<&'t ScopeDeclaration> = self
            .tree
            .declarations_visible_at(offset, DeclarationFlags::ALL_KINDS)
            .into_iter()
            .filter(|d| d.visible_after >= previous)
            .collect();
        revealed.sort_by_key(|d| d.visible_after);
        Ok(revealed)
    }

    /// Everything visible at the current position, innermost first.
    pub fn visible(&self, flags: DeclarationFlags) -> Vec<&'t ScopeDeclaration> {
        self.tree.declarations_visible_at(self.position, flags)
    }
}

#[cfg(test)]
#[path = "tests/cursor_tests.rs"]
mod tests;
