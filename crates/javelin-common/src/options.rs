//! Session configuration.
//!
//! `AnalysisOptions` carries the knobs a host may tune per refactoring
//! session. Every field has a default, so an empty JSON object is a valid
//! configuration.

use serde::{Deserialize, Serialize};

use crate::error::{AnalysisError, AnalysisResult};
use crate::limits::MAX_HIERARCHY_DEPTH;

/// Ordering category of a member inside a type body.
///
/// Used by member insertion to keep new declarations next to their kind.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MemberCategory {
    Type,
    StaticFinalField,
    StaticField,
    Field,
    StaticInitializer,
    Initializer,
    Constructor,
    StaticMethod,
    Method,
    EnumConstant,
}

impl MemberCategory {
    /// The conventional order: member types, static finals, statics, fields,
    /// initializers, constructors, methods.
    pub fn default_order() -> Vec<MemberCategory> {
        vec![
            MemberCategory::EnumConstant,
            MemberCategory::Type,
            MemberCategory::StaticFinalField,
            MemberCategory::StaticField,
            MemberCategory::Field,
            MemberCategory::StaticInitializer,
            MemberCategory::Initializer,
            MemberCategory::Constructor,
            MemberCategory::StaticMethod,
            MemberCategory::Method,
        ]
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnalysisOptions {
    /// Default for the `CHECK_VISIBILITY` flag of scope queries.
    pub check_visibility: bool,
    /// Cap on superclass/interface walk depth.
    pub max_hierarchy_depth: u32,
    /// Category order used when inserting body declarations.
    pub member_order: Vec<MemberCategory>,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            check_visibility: false,
            max_hierarchy_depth: MAX_HIERARCHY_DEPTH,
            member_order: MemberCategory::default_order(),
        }
    }
}

impl AnalysisOptions {
    pub fn from_json_str(text: &str) -> AnalysisResult<Self> {
        let options: AnalysisOptions = serde_json::from_str(text)
            .map_err(|err| AnalysisError::precondition(format!("invalid options: {err}")))?;
        if options.max_hierarchy_depth == 0 {
            return Err(AnalysisError::precondition(
                "maxHierarchyDepth must be at least 1",
            ));
        }
        Ok(options)
    }

    /// Position of `category` in the configured order; unknown categories
    /// sort last.
    pub fn category_rank(&self, category: MemberCategory) -> usize {
        self.member_order
            .iter()
            .position(|c| *c == category)
            .unwrap_or(self.member_order.len())
    }
}

#[cfg(test)]
#[path = "tests/options_tests.rs"]
mod tests;
