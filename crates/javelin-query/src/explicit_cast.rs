//! The cast an inlined expression needs to keep its meaning.

use tracing::trace;

use crate::navigation::skip_parentheses_up;
use crate::queries::ExpressionQueries;
use javelin_ast::{ChildSlot, NodeIndex, NodeKind};
use javelin_bindings::TypeShape;
use javelin_common::limits::MAX_TYPE_ARGUMENT_DEPTH;
use javelin_common::{AnalysisResult, BindingId};
use javelin_solver::TypeRules;

impl<'a> ExpressionQueries<'a> {
    /// Type to cast `initializer` to when it replaces `reference`, or `None`
    /// if it can replace the reference as is.
    ///
    /// Both nodes must carry resolved types. A cast is needed when the
    /// primitive kinds differ, when boxing or unboxing would pick a
    /// different type, when a raw value flows into a parameterized
    /// reference, when a lambda or method reference would get a different
    /// target, or when the initializer's type is not assignable to the
    /// reference's.
    #[tracing::instrument(level = "debug", skip(self), fields(initializer = initializer.0, reference = reference.0))]
    pub fn explicit_cast(
        &self,
        initializer: NodeIndex,
        reference: NodeIndex,
    ) -> AnalysisResult<Option<BindingId>> {
        let arena = self.arena;
        let table = self.table();
        let (Some(initializer_type), Some(reference_type)) =
            (arena.type_binding(initializer), arena.type_binding(reference))
        else {
            return Ok(None);
        };

        let initializer_primitive = table.is_primitive(initializer_type);
        let reference_primitive = table.is_primitive(reference_type);
        if initializer_primitive && reference_primitive {
            return Ok((!self.resolver.bindings_equal(initializer_type, reference_type))
                .then_some(reference_type));
        }
        if initializer_primitive {
            let unboxed = self.resolver.unboxed_type(reference_type).unwrap_or(reference_type);
            if !self.resolver.bindings_equal(unboxed, initializer_type) {
                return Ok(Some(unboxed));
            }
            if self.needs_explicit_boxing(reference) {
                return Ok(Some(reference_type));
            }
        } else if reference_primitive {
            let unboxed = self
                .resolver
                .unboxed_type(initializer_type)
                .unwrap_or(initializer_type);
            if !self.resolver.bindings_equal(unboxed, reference_type) {
                return Ok(Some(reference_type));
            }
        }

        let raw = table.type_data(initializer_type).is_some_and(|t| t.raw);
        let parameterized = table
            .type_data(reference_type)
            .is_some_and(|t| t.is_parameterized());
        if raw && parameterized {
            return Ok(Some(reference_type));
        }

        if arena
            .kind(initializer)
            .is_some_and(|k| matches!(k, NodeKind::Lambda | NodeKind::MethodReference))
        {
            if self.is_target_ambiguous(reference, true)? {
                trace!("functional target would become ambiguous");
                return Ok(Some(reference_type));
            }
            let target = self.target_type(reference)?;
            return Ok(match target {
                Some(target) if self.resolver.bindings_equal(target, initializer_type) => None,
                _ => Some(reference_type),
            });
        }

        let rules = TypeRules::new(self.resolver.clone());
        if !rules.can_assign(initializer_type, reference_type)?
            && !self.contains_type_variables(reference_type)
        {
            return Ok(Some(reference_type));
        }
        Ok(None)
    }

    /// A boxed receiver (`((Integer) 1).toString()`) needs the cast written
    /// out; auto-boxing does not apply to qualifiers.
    fn needs_explicit_boxing(&self, reference: NodeIndex) -> bool {
        let outer = skip_parentheses_up(self.arena, reference);
        matches!(
            self.arena.slot(outer),
            Some(
                ChildSlot::ClassInstanceCreationExpression
                    | ChildSlot::FieldAccessExpression
                    | ChildSlot::MethodInvocationExpression
            )
        )
    }

    fn contains_type_variables(&self, ty: BindingId) -> bool {
        let table = self.table();
        let mut pending = vec![(ty, 0u32)];
        while let Some((current, depth)) = pending.pop() {
            if depth > MAX_TYPE_ARGUMENT_DEPTH {
                continue;
            }
            let Some(data) = table.type_data(current) else {
                continue;
            };
            match &data.shape {
                TypeShape::TypeVariable { .. } | TypeShape::Capture { .. } => return true,
                TypeShape::Array { element, .. } => pending.push((*element, depth + 1)),
                TypeShape::Wildcard {
                    bound: Some(bound), ..
                } => pending.push((*bound, depth + 1)),
                _ => {}
            }
            pending.extend(data.type_arguments.iter().map(|arg| (*arg, depth + 1)));
        }
        false
    }
}

#[cfg(test)]
#[path = "tests/explicit_cast_tests.rs"]
mod tests;
