//! Binding-aware expression queries.
//!
//! [`ExpressionQueries`] pairs a syntax tree with a resolver and answers the
//! questions a refactoring asks before it moves an expression: what type
//! the context expects (`target_type.rs`), whether overload resolution
//! could pick a different method once the argument changes
//! (`ambiguity.rs`), and which cast keeps an inlined expression's meaning
//! (`explicit_cast.rs`).

use javelin_ast::{ChildSlot, NodeArena, NodeData, NodeIndex};
use javelin_bindings::{BindingResolver, BindingTable};
use javelin_common::BindingId;

pub struct ExpressionQueries<'a> {
    pub(crate) arena: &'a NodeArena,
    pub(crate) resolver: BindingResolver<'a>,
}

impl<'a> ExpressionQueries<'a> {
    pub fn new(arena: &'a NodeArena, resolver: BindingResolver<'a>) -> Self {
        Self { arena, resolver }
    }

    #[inline]
    pub fn arena(&self) -> &'a NodeArena {
        self.arena
    }

    #[inline]
    pub fn resolver(&self) -> &BindingResolver<'a> {
        &self.resolver
    }

    #[inline]
    pub(crate) fn table(&self) -> &'a BindingTable {
        self.resolver.table()
    }

    /// Method (or constructor) an argument is passed to, with the
    /// argument's index. `None` outside argument lists.
    pub(crate) fn invocation_of_argument(&self, argument: NodeIndex) -> Option<(NodeIndex, usize)> {
        let slot = self.arena.slot(argument)?;
        if !is_argument_slot(slot) {
            return None;
        }
        let invocation = self.arena.parent(argument)?;
        let index = self.arena.containing_list(argument)?.position(argument)?;
        Some((invocation, index))
    }

    /// Declared type of parameter `index` of `method`; trailing varargs
    /// arguments map to the component of the last parameter.
    pub(crate) fn parameter_type_at(&self, method: BindingId, index: usize) -> Option<BindingId> {
        let table = self.table();
        let data = table.method_data(method)?;
        let count = data.parameter_types.len();
        if data.is_varargs && count > 0 && index + 1 >= count {
            let last = *data.parameter_types.last()?;
            return self.resolver.component_type(last, 1);
        }
        data.parameter_types.get(index).copied()
    }

    /// Method binding of an invocation-like node.
    pub(crate) fn invoked_method(&self, invocation: NodeIndex) -> Option<BindingId> {
        match self.arena.data(invocation)? {
            NodeData::MethodInvocation { .. }
            | NodeData::SuperMethodInvocation { .. }
            | NodeData::ClassInstanceCreation { .. }
            | NodeData::ConstructorInvocation { .. }
            | NodeData::SuperConstructorInvocation { .. }
            | NodeData::EnumConstantDeclaration { .. } => self.arena.binding(invocation),
            _ => None,
        }
    }
}

/// Argument lists of invocations, instance creations, explicit constructor
/// calls and enum constants.
pub(crate) fn is_argument_slot(slot: ChildSlot) -> bool {
    matches!(
        slot,
        ChildSlot::MethodInvocationArguments
            | ChildSlot::SuperMethodInvocationArguments
            | ChildSlot::ClassInstanceCreationArguments
            | ChildSlot::ConstructorInvocationArguments
            | ChildSlot::SuperConstructorInvocationArguments
            | ChildSlot::EnumConstantArguments
    )
}
