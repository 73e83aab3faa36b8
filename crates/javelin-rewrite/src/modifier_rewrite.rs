//! Modifier list editing.
//!
//! Keyword modifiers are kept after every annotation. A newly inserted
//! visibility keyword goes right after the last annotation; other keywords
//! are inserted ahead of the first keyword that sorts after them in
//! canonical order.

use tracing::debug;

use crate::ast_rewrite::AstRewrite;
use crate::edit::{EditGroup, RewriteNode};
use javelin_ast::{ChildSlot, NodeData, NodeIndex, NodeKind, SlotValue};
use javelin_common::{AnalysisError, AnalysisResult, ModifierKeyword, Modifiers};

#[derive(Clone, Copy, Debug)]
pub struct ModifierRewrite {
    declaration: RewriteNode,
    slot: ChildSlot,
}

impl ModifierRewrite {
    /// Fails with a malformed-input error when `declaration` has no
    /// modifier list.
    pub fn create(
        rewrite: &AstRewrite<'_>,
        declaration: impl Into<RewriteNode>,
    ) -> AnalysisResult<Self> {
        let declaration = declaration.into();
        let data = rewrite
            .node_data(declaration)
            .ok_or_else(|| AnalysisError::malformed(format!("{declaration:?} does not exist")))?;
        let slot = data.modifier_slot().ok_or_else(|| {
            AnalysisError::malformed(format!("{:?} has no modifier list", data.kind()))
        })?;
        Ok(Self { declaration, slot })
    }

    pub fn declaration(&self) -> RewriteNode {
        self.declaration
    }

    pub fn slot(&self) -> ChildSlot {
        self.slot
    }

    /// Keyword flags of the rewritten modifier list.
    pub fn modifiers(&self, rewrite: &AstRewrite<'_>) -> AnalysisResult<Modifiers> {
        Ok(rewrite
            .rewritten_list(self.declaration, self.slot)?
            .into_iter()
            .filter_map(|node| keyword_of(rewrite, node))
            .fold(Modifiers::empty(), |acc, keyword| acc | keyword.flag()))
    }

    /// Add every keyword in `included` and drop every keyword in `excluded`
    /// that is not also included. Annotations are never touched.
    #[tracing::instrument(level = "debug", skip(self, rewrite), fields(declaration = ?self.declaration))]
    pub fn set_modifiers(
        &self,
        rewrite: &mut AstRewrite<'_>,
        included: Modifiers,
        excluded: Modifiers,
        group: Option<EditGroup>,
    ) -> AnalysisResult<()> {
        if (included & Modifiers::VISIBILITY).bits().count_ones() > 1 {
            return Err(AnalysisError::precondition(format!(
                "conflicting visibility modifiers {included:?}"
            )));
        }
        rewrite.atomically(|rewrite| {
            let stale = rewrite
                .rewritten_list(self.declaration, self.slot)?
                .into_iter()
                .filter(|&node| {
                    keyword_of(rewrite, node).is_some_and(|keyword| {
                        excluded.contains(keyword.flag()) && !included.contains(keyword.flag())
                    })
                })
                .collect::<Vec<_>>();
            for node in stale {
                rewrite.list(self.declaration, self.slot)?.remove(node, group)?;
            }

            let present = self.modifiers(rewrite)?;
            for keyword in included.keywords() {
                if present.contains(keyword.flag()) {
                    continue;
                }
                let index = self.insertion_index(rewrite, keyword)?;
                let node = rewrite.create_synthetic(|arena| arena.add_modifier(keyword))?;
                rewrite
                    .list(self.declaration, self.slot)?
                    .insert_at(node, index, group)?;
                debug!(keyword = keyword.as_str(), index, "inserted modifier");
            }
            Ok(())
        })
    }

    /// Replace the visibility keyword. `Modifiers::empty()` makes the
    /// declaration package-private.
    pub fn set_visibility(
        &self,
        rewrite: &mut AstRewrite<'_>,
        visibility: Modifiers,
        group: Option<EditGroup>,
    ) -> AnalysisResult<()> {
        if !Modifiers::VISIBILITY.contains(visibility) {
            return Err(AnalysisError::precondition(format!(
                "{visibility:?} is not a visibility"
            )));
        }
        self.set_modifiers(rewrite, visibility, Modifiers::VISIBILITY, group)
    }

    /// Append copies of every modifier and annotation of `other`.
    pub fn copy_all_modifiers(
        &self,
        rewrite: &mut AstRewrite<'_>,
        other: NodeIndex,
        group: Option<EditGroup>,
    ) -> AnalysisResult<()> {
        let sources = original_modifiers(rewrite, other)?;
        rewrite.atomically(|rewrite| {
            for source in sources {
                let copy = rewrite.create_copy_target(source, group)?;
                rewrite
                    .list(self.declaration, self.slot)?
                    .insert_last(copy, group)?;
            }
            Ok(())
        })
    }

    /// Copy the annotations of `other` in order, after the last annotation
    /// already present.
    pub fn copy_all_annotations(
        &self,
        rewrite: &mut AstRewrite<'_>,
        other: NodeIndex,
        group: Option<EditGroup>,
    ) -> AnalysisResult<()> {
        let original = rewrite.original();
        let sources = original_modifiers(rewrite, other)?
            .into_iter()
            .filter(|&node| original.is_kind(node, NodeKind::MarkerAnnotation))
            .collect::<Vec<_>>();
        rewrite.atomically(|rewrite| {
            let mut index = self.keyword_start(rewrite)?;
            for source in sources {
                let copy = rewrite.create_copy_target(source, group)?;
                rewrite
                    .list(self.declaration, self.slot)?
                    .insert_at(copy, index, group)?;
                index += 1;
            }
            Ok(())
        })
    }

    /// Index just past the last annotation of the rewritten list.
    fn keyword_start(&self, rewrite: &AstRewrite<'_>) -> AnalysisResult<usize> {
        let view = rewrite.rewritten_list(self.declaration, self.slot)?;
        Ok(view
            .iter()
            .rposition(|&node| rewrite.kind(node) == Some(NodeKind::MarkerAnnotation))
            .map_or(0, |position| position + 1))
    }

    fn insertion_index(
        &self,
        rewrite: &AstRewrite<'_>,
        keyword: ModifierKeyword,
    ) -> AnalysisResult<usize> {
        let start = self.keyword_start(rewrite)?;
        if keyword.is_visibility() {
            return Ok(start);
        }
        let view = rewrite.rewritten_list(self.declaration, self.slot)?;
        let rank = canonical_rank(keyword);
        Ok(view
            .iter()
            .enumerate()
            .skip(start)
            .find(|&(_, &node)| keyword_of(rewrite, node).is_some_and(|k| canonical_rank(k) > rank))
            .map_or(view.len(), |(index, _)| index))
    }
}

fn keyword_of(rewrite: &AstRewrite<'_>, node: RewriteNode) -> Option<ModifierKeyword> {
    match rewrite.node_data(node)? {
        NodeData::Modifier { keyword } => Some(*keyword),
        _ => None,
    }
}

fn canonical_rank(keyword: ModifierKeyword) -> usize {
    ModifierKeyword::CANONICAL_ORDER
        .iter()
        .position(|k| *k == keyword)
        .unwrap_or(ModifierKeyword::CANONICAL_ORDER.len())
}

fn original_modifiers(rewrite: &AstRewrite<'_>, declaration: NodeIndex) -> AnalysisResult<Vec<NodeIndex>> {
    let data = rewrite
        .original()
        .data(declaration)
        .ok_or_else(|| AnalysisError::malformed(format!("{declaration:?} does not exist")))?;
    let list = data
        .modifier_slot()
        .and_then(|slot| data.slot_value(slot))
        .and_then(|value| match value {
            SlotValue::List(list) => Some(list.iter().collect::<Vec<_>>()),
            SlotValue::Single(_) => None,
        })
        .ok_or_else(|| AnalysisError::malformed(format!("{:?} has no modifier list", data.kind())))?;
    Ok(list)
}

#[cfg(test)]
#[path = "tests/modifier_rewrite_tests.rs"]
mod tests;
