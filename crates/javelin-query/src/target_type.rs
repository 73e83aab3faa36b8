//! Target-type inference: the type an expression's position expects.

use tracing::trace;

use crate::navigation::{declared_type_of_variable, expression_type};
use crate::queries::{ExpressionQueries, is_argument_slot};
use javelin_ast::{ChildSlot, NodeData, NodeIndex, NodeKind};
use javelin_common::{AnalysisResult, BindingId};

impl<'a> ExpressionQueries<'a> {
    /// Type the context of `expression` requires, from its parent and slot.
    ///
    /// `None` when the position imposes no type (expression statements,
    /// operands, conditions and so on) or when the binding it would come
    /// from is missing.
    #[tracing::instrument(level = "debug", skip(self), fields(expression = expression.0))]
    pub fn target_type(&self, expression: NodeIndex) -> AnalysisResult<Option<BindingId>> {
        let arena = self.arena;
        let mut current = expression;
        // Conditional branches and parentheses pass their parent's target
        // through; loop instead of recursing.
        loop {
            self.resolver.cancellation().check()?;
            let (Some(parent), Some(slot)) = (arena.parent(current), arena.slot(current)) else {
                return Ok(None);
            };
            trace!(?slot, "target type position");
            match slot {
                ChildSlot::FragmentInitializer | ChildSlot::SingleVariableDeclarationInitializer => {
                    return Ok(self.declared_variable_type(parent));
                }
                ChildSlot::AssignmentRightHandSide => {
                    let Some(NodeData::Assignment { left, .. }) = arena.data(parent) else {
                        return Ok(None);
                    };
                    return Ok(expression_type(arena, *left));
                }
                ChildSlot::ReturnExpression => return self.return_target(parent),
                ChildSlot::ArrayInitializerExpressions => return Ok(self.array_element_target(parent)),
                ChildSlot::LambdaBody => return self.lambda_return_type(parent),
                ChildSlot::ConditionalThenExpression
                | ChildSlot::ConditionalElseExpression
                | ChildSlot::ParenthesizedExpression => current = parent,
                ChildSlot::CastExpression => {
                    let Some(NodeData::Cast { ty, .. }) = arena.data(parent) else {
                        return Ok(None);
                    };
                    return Ok(arena.type_binding(*ty).or_else(|| arena.type_binding(parent)));
                }
                slot if is_argument_slot(slot) => {
                    let Some((invocation, index)) = self.invocation_of_argument(current) else {
                        return Ok(None);
                    };
                    return Ok(self
                        .invoked_method(invocation)
                        .and_then(|method| self.parameter_type_at(method, index)));
                }
                _ => {
                    trace!(kind = ?arena.kind(parent), "position imposes no target type");
                    return Ok(None);
                }
            }
        }
    }

    /// Declared type of a variable declaration: its binding's type, else
    /// the resolved type of the written type reference.
    fn declared_variable_type(&self, declaration: NodeIndex) -> Option<BindingId> {
        self.arena
            .binding(declaration)
            .and_then(|variable| self.table().type_of(variable))
            .or_else(|| {
                declared_type_of_variable(self.arena, declaration)
                    .and_then(|ty| self.arena.type_binding(ty))
            })
    }

    /// Return type of the lambda or method a `return` statement belongs to.
    fn return_target(&self, statement: NodeIndex) -> AnalysisResult<Option<BindingId>> {
        let owner = self.arena.find_ancestor(statement, |kind| {
            matches!(kind, NodeKind::Lambda | NodeKind::MethodDeclaration)
        });
        match owner {
            Some(lambda) if self.arena.is_kind(lambda, NodeKind::Lambda) => {
                self.lambda_return_type(lambda)
            }
            Some(method) => Ok(self
                .arena
                .binding(method)
                .and_then(|m| self.table().type_of(m))),
            None => Ok(None),
        }
    }

    /// Return type of the functional method a lambda implements.
    pub(crate) fn lambda_return_type(&self, lambda: NodeIndex) -> AnalysisResult<Option<BindingId>> {
        let table = self.table();
        if let Some(method) = self.arena.binding(lambda)
            && let Some(ret) = table.method_data(method).and_then(|m| m.return_type)
        {
            return Ok(Some(ret));
        }
        let Some(interface) = self.arena.type_binding(lambda) else {
            return Ok(None);
        };
        Ok(self
            .resolver
            .functional_method(interface)?
            .and_then(|method| table.type_of(method)))
    }

    /// Element type expected by an entry of `initializer`: from the nearest
    /// array creation or variable declaration above the initializer chain.
    fn array_element_target(&self, initializer: NodeIndex) -> Option<BindingId> {
        let arena = self.arena;
        let table = self.table();
        let mut current = initializer;
        while arena.slot(current) == Some(ChildSlot::ArrayInitializerExpressions) {
            current = arena.parent(current)?;
        }
        let owner = if arena.is_kind(current, NodeKind::ArrayInitializer) {
            arena.parent(current)?
        } else {
            current
        };
        match arena.data(owner)? {
            NodeData::ArrayCreation { ty, .. } => {
                let array = arena.type_binding(*ty).or_else(|| arena.type_binding(owner))?;
                Some(table.element_type(array))
            }
            NodeData::VariableDeclarationFragment { .. } | NodeData::SingleVariableDeclaration { .. } => {
                self.declared_variable_type(owner).map(|ty| table.element_type(ty))
            }
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "tests/target_type_tests.rs"]
mod tests;
