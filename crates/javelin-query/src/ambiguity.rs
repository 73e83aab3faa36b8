//! Overload-ambiguity check for lambda and method-reference arguments.
//!
//! Replacing a lambda argument with an equivalent of another shape (or
//! inlining one) can make overload resolution pick a different method.
//! The check walks the invocation's receiver type and all its supertypes
//! and looks for another same-named method that could accept a functional
//! interface at the same argument position.

use tracing::{debug, trace};

use crate::navigation::{enclosing_type, expression_type};
use crate::queries::ExpressionQueries;
use javelin_ast::{ChildSlot, NodeData, NodeIndex, NodeKind};
use javelin_common::{AnalysisError, AnalysisResult, BindingId};

impl<'a> ExpressionQueries<'a> {
    /// True if overload resolution for the invocation `expression` is an
    /// argument of might pick a different method once `expression` changes.
    ///
    /// `explicitly_typed` tells whether the replacement is an explicitly
    /// typed lambda (or a method reference with an exact target). Implicitly
    /// typed replacements are ambiguous against any alternative accepting a
    /// functional interface; explicitly typed ones only against alternatives
    /// whose functional method differs in void-compatibility.
    ///
    /// Returns `false` for expressions that are not invocation arguments and
    /// `true` when the invocation has no resolved method.
    #[tracing::instrument(level = "debug", skip(self), fields(expression = expression.0))]
    pub fn is_target_ambiguous(
        &self,
        expression: NodeIndex,
        explicitly_typed: bool,
    ) -> AnalysisResult<bool> {
        let arena = self.arena;
        let mut argument = expression;
        while let Some(
            ChildSlot::ParenthesizedExpression
            | ChildSlot::ConditionalThenExpression
            | ChildSlot::ConditionalElseExpression,
        ) = arena.slot(argument)
        {
            match arena.parent(argument) {
                Some(parent) => argument = parent,
                None => return Ok(false),
            }
        }
        let Some((invocation, index)) = self.invocation_of_argument(argument) else {
            return Ok(false);
        };
        let Some(method) = self.invoked_method(invocation) else {
            return Ok(true);
        };
        let Some(target) = self.invocation_target_type(invocation, method)? else {
            return Ok(true);
        };
        let argument_count = arena.containing_list(argument).map_or(0, |list| list.len());

        let analyzer = AmbiguousTargetAnalyzer {
            queries: self,
            original: method,
            declaring_type: target,
            context: enclosing_type(arena, invocation),
            index,
            argument_count,
            explicitly_typed,
            original_void: self.functional_void_compatibility(self.parameter_type_at(method, index))?,
        };
        let mut failure: Option<AnalysisError> = None;
        let mut visit = |ty: BindingId| match analyzer.visit(ty) {
            Ok(keep_going) => keep_going,
            Err(err) => {
                failure = Some(err);
                false
            }
        };
        let completed = visit(target) && self.resolver.visit_hierarchy(target, &mut visit)?;
        if let Some(err) = failure {
            return Err(err);
        }
        debug!(ambiguous = !completed, "target ambiguity");
        Ok(!completed)
    }

    /// Static type overload resolution starts from for `invocation`.
    fn invocation_target_type(
        &self,
        invocation: NodeIndex,
        method: BindingId,
    ) -> AnalysisResult<Option<BindingId>> {
        let arena = self.arena;
        let table = self.table();
        match arena.data(invocation) {
            Some(NodeData::MethodInvocation { expression, .. }) if expression.is_some() => {
                Ok(expression_type(arena, *expression))
            }
            Some(NodeData::MethodInvocation { .. }) => {
                let Some(enclosing) = enclosing_type(arena, invocation) else {
                    return Ok(table.declaring_type(method));
                };
                let name = table.name(method).unwrap_or("");
                let params = table.parameter_types(method);
                let found = self
                    .resolver
                    .find_method_in_hierarchy(enclosing, name, Some(params))?;
                Ok(if found.is_some() {
                    Some(enclosing)
                } else {
                    table.declaring_type(method)
                })
            }
            Some(NodeData::SuperMethodInvocation { qualifier, .. }) => {
                let base = if qualifier.is_some() {
                    arena.binding(*qualifier).or_else(|| arena.type_binding(*qualifier))
                } else {
                    enclosing_type(arena, invocation)
                };
                Ok(base.and_then(|ty| self.resolver.superclass_of(ty)))
            }
            _ => Ok(table.declaring_type(method)),
        }
    }

    /// Whether the functional method of `ty` returns void; `None` when `ty`
    /// is not a functional interface.
    fn functional_void_compatibility(&self, ty: Option<BindingId>) -> AnalysisResult<Option<bool>> {
        let Some(ty) = ty else {
            return Ok(None);
        };
        let Some(method) = self.resolver.functional_method(ty)? else {
            return Ok(None);
        };
        Ok(Some(
            self.table()
                .type_of(method)
                .is_none_or(|ret| self.resolver.is_void_type(ret)),
        ))
    }
}

/// True for a lambda whose parameters carry declared types. A lambda
/// without parameters counts as explicitly typed.
pub fn is_explicitly_typed_lambda(arena: &javelin_ast::NodeArena, expression: NodeIndex) -> bool {
    match arena.data(expression) {
        Some(NodeData::Lambda { parameters, .. }) => parameters
            .first()
            .is_none_or(|first| arena.is_kind(first, NodeKind::SingleVariableDeclaration)),
        _ => false,
    }
}

struct AmbiguousTargetAnalyzer<'q, 'a> {
    queries: &'q ExpressionQueries<'a>,
    original: BindingId,
    declaring_type: BindingId,
    context: Option<BindingId>,
    index: usize,
    argument_count: usize,
    explicitly_typed: bool,
    original_void: Option<bool>,
}

impl AmbiguousTargetAnalyzer<'_, '_> {
    /// Checks the methods `ty` declares. Returns `false` as soon as one
    /// makes the call ambiguous.
    fn visit(&self, ty: BindingId) -> AnalysisResult<bool> {
        let resolver = &self.queries.resolver;
        let table = resolver.table();
        let Some(data) = table.type_data(table.declaration(ty)).or_else(|| table.type_data(ty)) else {
            return Ok(true);
        };
        let name = table.name(self.original).unwrap_or("");
        let original_count = table.parameter_types(self.original).len();
        let original_varargs = table.method_data(self.original).is_some_and(|m| m.is_varargs);

        for &candidate in &data.declared_methods {
            if resolver.equal_declarations(candidate, self.original) || table.name(candidate) != Some(name) {
                continue;
            }
            let Some(candidate_data) = table.method_data(candidate) else {
                continue;
            };
            let modifiers = table.modifiers(candidate);
            if !resolver.equal_declarations(table.declaring_type(candidate).unwrap_or(ty), self.declaring_type)
                && ((modifiers.is_static() && table.is_interface(ty)) || modifiers.is_private())
            {
                continue;
            }
            if resolver.method_overrides(self.original, candidate)?
                || resolver.method_overrides(candidate, self.original)?
            {
                continue;
            }
            if let Some(context) = self.context
                && !resolver.is_visible(candidate, context)?
            {
                continue;
            }
            let count = candidate_data.parameter_types.len();
            let minimum = if candidate_data.is_varargs { count.saturating_sub(1) } else { count };
            let arity_matches = count == original_count
                || ((candidate_data.is_varargs || original_varargs) && self.argument_count >= minimum);
            if !arity_matches {
                continue;
            }
            let candidate_void = self
                .queries
                .functional_void_compatibility(self.queries.parameter_type_at(candidate, self.index))?;
            let Some(candidate_void) = candidate_void else {
                continue;
            };
            trace!(candidate = candidate.0, candidate_void, "functional alternative");
            if !self.explicitly_typed || self.original_void != Some(candidate_void) {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

#[cfg(test)]
#[path = "tests/ambiguity_tests.rs"]
mod tests;
