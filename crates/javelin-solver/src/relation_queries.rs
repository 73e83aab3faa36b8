//! Unified relation query entrypoints.
//!
//! Refactorings ask the same three questions about a pair of types. This
//! module names them so callers can pick a relation at runtime instead of
//! wiring the rule engine directly.

use crate::type_rules::TypeRules;
use javelin_bindings::BindingResolver;
use javelin_common::{AnalysisResult, BindingId};

/// Relation categories supported by the unified query API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationKind {
    /// Assignment conversion from source to target.
    Assignable,
    /// Cast conversion: `(target) source`.
    Castable,
    /// Reference subtyping without boxing.
    Subtype,
}

/// Policy knobs for relation checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelationPolicy {
    /// Permits boxing and unboxing during assignment.
    pub allow_boxing: bool,
    /// Permits raw types to stand in for parameterized ones.
    pub allow_unchecked_conversion: bool,
}

impl Default for RelationPolicy {
    fn default() -> Self {
        Self {
            allow_boxing: true,
            allow_unchecked_conversion: true,
        }
    }
}

impl RelationPolicy {
    pub fn with_boxing(mut self, allow: bool) -> Self {
        self.allow_boxing = allow;
        self
    }

    pub fn with_unchecked_conversion(mut self, allow: bool) -> Self {
        self.allow_unchecked_conversion = allow;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelationResult {
    pub kind: RelationKind,
    pub related: bool,
}

impl RelationResult {
    #[inline]
    pub const fn is_related(self) -> bool {
        self.related
    }
}

/// Checks `source` against `target` under `kind`.
pub fn query_relation(
    resolver: &BindingResolver<'_>,
    source: BindingId,
    target: BindingId,
    kind: RelationKind,
    policy: RelationPolicy,
) -> AnalysisResult<RelationResult> {
    let rules = TypeRules::new(resolver.clone()).with_policy(policy);
    let related = match kind {
        RelationKind::Assignable => rules.can_assign(source, target)?,
        RelationKind::Castable => rules.can_cast(target, source)?,
        RelationKind::Subtype => rules.is_subtype(source, target)?,
    };
    Ok(RelationResult { kind, related })
}

#[cfg(test)]
#[path = "tests/relation_queries_tests.rs"]
mod tests;
