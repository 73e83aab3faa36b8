//! Member insertion that respects a configured category order.

use tracing::debug;

use crate::ast_rewrite::AstRewrite;
use crate::edit::{EditGroup, RewriteNode};
use javelin_ast::{ChildSlot, NodeData};
use javelin_common::{AnalysisError, AnalysisOptions, AnalysisResult, MemberCategory, Modifiers};

#[derive(Clone, Copy, Debug)]
pub struct BodyDeclarationRewrite {
    type_declaration: RewriteNode,
    slot: ChildSlot,
}

impl BodyDeclarationRewrite {
    pub fn create(
        rewrite: &AstRewrite<'_>,
        type_declaration: impl Into<RewriteNode>,
    ) -> AnalysisResult<Self> {
        let type_declaration = type_declaration.into();
        let data = rewrite.node_data(type_declaration).ok_or_else(|| {
            AnalysisError::malformed(format!("{type_declaration:?} does not exist"))
        })?;
        let slot = data
            .slots()
            .iter()
            .map(|(slot, _)| *slot)
            .find(|slot| slot.is_body_declarations())
            .ok_or_else(|| AnalysisError::malformed(format!("{:?} has no type body", data.kind())))?;
        Ok(Self {
            type_declaration,
            slot,
        })
    }

    pub fn slot(&self) -> ChildSlot {
        self.slot
    }

    /// Insert `declaration` next to the closest member of its category and
    /// return the index it was inserted at.
    #[tracing::instrument(level = "debug", skip(self, rewrite, options))]
    pub fn insert(
        &self,
        rewrite: &mut AstRewrite<'_>,
        declaration: RewriteNode,
        options: &AnalysisOptions,
        group: Option<EditGroup>,
    ) -> AnalysisResult<usize> {
        let index = self.insertion_index(rewrite, declaration, options)?;
        rewrite
            .list(self.type_declaration, self.slot)?
            .insert_at(declaration, index, group)?;
        debug!(index, "inserted member");
        Ok(index)
    }

    /// Where [`insert`](Self::insert) would put `declaration`.
    ///
    /// Scans the members from last to first. The first member of the same
    /// category found fixes the position right after it. Until then a member
    /// that sorts earlier proposes the slot after itself (only if nothing was
    /// proposed yet), and a member that sorts later proposes the slot before
    /// itself.
    pub fn insertion_index(
        &self,
        rewrite: &AstRewrite<'_>,
        declaration: RewriteNode,
        options: &AnalysisOptions,
    ) -> AnalysisResult<usize> {
        let members = rewrite.rewritten_list(self.type_declaration, self.slot)?;
        let rank = member_rank(rewrite, declaration, options)?;
        let mut insert_pos = members.len();
        let mut pos_rank: Option<usize> = None;
        for (i, &member) in members.iter().enumerate().rev() {
            if pos_rank == Some(rank) {
                break;
            }
            let current = member_rank(rewrite, member, options)?;
            if current == rank {
                insert_pos = i + 1;
                pos_rank = Some(rank);
            } else if current < rank {
                if pos_rank.is_none() {
                    insert_pos = i + 1;
                    pos_rank = Some(current);
                }
            } else {
                insert_pos = i;
                pos_rank = Some(current);
            }
        }
        Ok(insert_pos)
    }
}

/// Ordering category of a body declaration, or `None` for kinds the order
/// does not know.
pub fn member_category(data: &NodeData, modifiers: Modifiers) -> Option<MemberCategory> {
    let category = match data {
        NodeData::FieldDeclaration { .. } => {
            if modifiers.is_static() && modifiers.is_final() {
                MemberCategory::StaticFinalField
            } else if modifiers.is_static() {
                MemberCategory::StaticField
            } else {
                MemberCategory::Field
            }
        }
        NodeData::Initializer { .. } => {
            if modifiers.is_static() {
                MemberCategory::StaticInitializer
            } else {
                MemberCategory::Initializer
            }
        }
        NodeData::MethodDeclaration { is_constructor, .. } => {
            if *is_constructor {
                MemberCategory::Constructor
            } else if modifiers.is_static() {
                MemberCategory::StaticMethod
            } else {
                MemberCategory::Method
            }
        }
        NodeData::TypeDeclaration { .. } | NodeData::EnumDeclaration { .. } => MemberCategory::Type,
        NodeData::EnumConstantDeclaration { .. } => MemberCategory::EnumConstant,
        _ => return None,
    };
    Some(category)
}

fn member_rank(
    rewrite: &AstRewrite<'_>,
    member: RewriteNode,
    options: &AnalysisOptions,
) -> AnalysisResult<usize> {
    // A move target reads like the original it stands for.
    let member = match member {
        RewriteNode::Moved(index) => RewriteNode::Original(index),
        other => other,
    };
    let data = rewrite
        .node_data(member)
        .ok_or_else(|| AnalysisError::malformed(format!("{member:?} does not exist")))?;
    let modifiers = match data.modifier_slot() {
        Some(slot) => rewrite
            .rewritten_list(member, slot)?
            .into_iter()
            .filter_map(|node| match rewrite.node_data(node) {
                Some(NodeData::Modifier { keyword }) => Some(keyword.flag()),
                _ => None,
            })
            .fold(Modifiers::empty(), |acc, flag| acc | flag),
        None => Modifiers::empty(),
    };
    Ok(member_category(data, modifiers)
        .map_or(options.member_order.len(), |category| options.category_rank(category)))
}

#[cfg(test)]
#[path = "tests/body_declaration_rewrite_tests.rs"]
mod tests;
