//! Structural navigation over a syntax tree.
//!
//! Free functions answering "where is this node" questions: enclosing
//! nodes of a kind, the list a node sits in, what a name or type reference
//! normalizes to, and the declared type of a variable declaration. None of
//! them consult the binding table except where noted.

use javelin_ast::{ChildSlot, NodeArena, NodeData, NodeIndex, NodeKind, NodeList};
use javelin_bindings::BindingTable;
use javelin_common::BindingId;

// =============================================================================
// Ancestors and Lists
// =============================================================================

/// Nearest strict ancestor of `node` with the given kind.
///
/// Does not stop at statement, body or type boundaries; the result may lie in
/// a different scope than `node`.
#[inline]
pub fn get_parent_of_kind(arena: &NodeArena, node: NodeIndex, kind: NodeKind) -> Option<NodeIndex> {
    arena.find_ancestor_of_kind(node, kind)
}

/// True if `parent` is a strict ancestor of `node`.
pub fn is_parent(arena: &NodeArena, node: NodeIndex, parent: NodeIndex) -> bool {
    node != parent && arena.is_ancestor_or_self(parent, node)
}

/// The child list holding `node`, with its owner and slot.
pub fn containing_list(
    arena: &NodeArena,
    node: NodeIndex,
) -> Option<(NodeIndex, ChildSlot, &NodeList)> {
    let slot = arena.slot(node)?;
    let parent = arena.parent(node)?;
    let list = arena.containing_list(node)?;
    Some((parent, slot, list))
}

/// Direct children of `node` in source order.
#[inline]
pub fn children(arena: &NodeArena, node: NodeIndex) -> Vec<NodeIndex> {
    arena.children(node)
}

/// Member list of a class, enum or anonymous class body.
pub fn body_declarations(arena: &NodeArena, node: NodeIndex) -> Option<&NodeList> {
    match arena.data(node)? {
        NodeData::TypeDeclaration {
            body_declarations, ..
        }
        | NodeData::EnumDeclaration {
            body_declarations, ..
        }
        | NodeData::AnonymousClassDeclaration { body_declarations } => Some(body_declarations),
        _ => None,
    }
}

/// Innermost expression inside any number of parentheses.
pub fn skip_parentheses(arena: &NodeArena, mut node: NodeIndex) -> NodeIndex {
    while let Some(NodeData::Parenthesized { expression }) = arena.data(node) {
        node = *expression;
    }
    node
}

/// Outermost parenthesized expression wrapping `node`, or `node` itself.
pub fn skip_parentheses_up(arena: &NodeArena, mut node: NodeIndex) -> NodeIndex {
    while arena.slot(node) == Some(ChildSlot::ParenthesizedExpression) {
        match arena.parent(node) {
            Some(parent) => node = parent,
            None => break,
        }
    }
    node
}

// =============================================================================
// Node Classification
// =============================================================================

/// True if the node came from source (it has a range).
#[inline]
pub fn is_existing_node(arena: &NodeArena, node: NodeIndex) -> bool {
    arena.range(node).is_some()
}

#[inline]
pub fn is_literal(arena: &NodeArena, node: NodeIndex) -> bool {
    arena.kind(node).is_some_and(NodeKind::is_literal)
}

/// True if `name` is the label of a labeled statement, `break` or
/// `continue`.
pub fn is_label(arena: &NodeArena, name: NodeIndex) -> bool {
    matches!(
        arena.slot(name),
        Some(ChildSlot::LabeledLabel | ChildSlot::BreakLabel | ChildSlot::ContinueLabel)
    )
}

/// True if `statement` is the single-statement body of an `if`, `for`,
/// enhanced `for`, `while` or `do`.
pub fn is_control_statement_body(arena: &NodeArena, statement: NodeIndex) -> bool {
    arena
        .slot(statement)
        .is_some_and(ChildSlot::is_control_statement_body)
}

// =============================================================================
// Names and Type References
// =============================================================================

/// `a` for `a.b.c`; the name itself for a simple name.
pub fn left_most_simple_name(arena: &NodeArena, name: NodeIndex) -> NodeIndex {
    let mut current = name;
    while let Some(NodeData::QualifiedName { qualifier, .. }) = arena.data(current) {
        current = *qualifier;
    }
    current
}

/// The largest name `name` is part of: climbs while the parent is a name.
pub fn top_most_name(arena: &NodeArena, name: NodeIndex) -> NodeIndex {
    let mut current = name;
    while let Some(parent) = arena.parent(current)
        && arena.kind(parent).is_some_and(NodeKind::is_name)
    {
        current = parent;
    }
    current
}

/// Maps the last segment of a qualified name to the name, a type's name to
/// the type, and a parameterized type's base to the parameterized type.
pub fn normalized_node(arena: &NodeArena, node: NodeIndex) -> NodeIndex {
    let mut current = node;
    let climb = |current: NodeIndex, slots: &[ChildSlot]| match arena.slot(current) {
        Some(slot) if slots.contains(&slot) => arena.parent(current).unwrap_or(current),
        _ => current,
    };
    current = climb(current, &[ChildSlot::QualifiedNameName]);
    current = climb(current, &[ChildSlot::SimpleTypeName]);
    current = climb(current, &[ChildSlot::ParameterizedTypeType]);
    current
}

// =============================================================================
// Enclosing Types
// =============================================================================

/// Binding of the nearest class, enum or anonymous class containing `node`
/// (inclusive).
pub fn enclosing_type(arena: &NodeArena, node: NodeIndex) -> Option<BindingId> {
    std::iter::once(node)
        .chain(arena.ancestors(node))
        .find(|n| arena.kind(*n).is_some_and(NodeKind::is_type_body_owner))
        .and_then(|n| arena.binding(n))
}

/// Static type of the receiver of a member access: the qualifier's type
/// when there is one, otherwise the enclosing named type.
pub fn receiver_type(arena: &NodeArena, access: NodeIndex) -> Option<BindingId> {
    let qualifier = match arena.data(access)? {
        NodeData::MethodInvocation { expression, .. } | NodeData::FieldAccess { expression, .. } => {
            *expression
        }
        _ => NodeIndex::NONE,
    };
    if qualifier.is_some() {
        return expression_type(arena, qualifier);
    }
    arena
        .find_ancestor(access, NodeKind::is_type_declaration)
        .and_then(|decl| arena.binding(decl))
}

/// Resolved static type of an expression, looking through parentheses when
/// the wrapper itself carries none.
pub fn expression_type(arena: &NodeArena, expression: NodeIndex) -> Option<BindingId> {
    let mut current = expression;
    loop {
        if let Some(ty) = arena.type_binding(current) {
            return Some(ty);
        }
        match arena.data(current)? {
            NodeData::Parenthesized { expression } => current = *expression,
            _ => return None,
        }
    }
}

// =============================================================================
// Variable Declarations
// =============================================================================

/// Declared type node of a single-variable declaration or fragment.
///
/// `None` for lambda parameters written without a type.
pub fn declared_type_of_variable(arena: &NodeArena, declaration: NodeIndex) -> Option<NodeIndex> {
    match arena.data(declaration)? {
        NodeData::SingleVariableDeclaration { ty, .. } => ty.into_option(),
        NodeData::VariableDeclarationFragment { .. } => {
            match arena.data(arena.parent(declaration)?)? {
                NodeData::VariableDeclarationStatement { ty, .. }
                | NodeData::VariableDeclarationExpression { ty, .. }
                | NodeData::FieldDeclaration { ty, .. } => ty.into_option(),
                _ => None,
            }
        }
        _ => None,
    }
}

/// Total array dimensions of a declared variable: those of its type plus
/// the extra `[]` after the name. Implicitly typed lambda parameters take
/// theirs from the lambda's resolved method.
pub fn variable_dimensions(arena: &NodeArena, table: &BindingTable, declaration: NodeIndex) -> u32 {
    let extra = match arena.data(declaration) {
        Some(
            NodeData::SingleVariableDeclaration {
                extra_dimensions, ..
            }
            | NodeData::VariableDeclarationFragment {
                extra_dimensions, ..
            },
        ) => *extra_dimensions,
        _ => return 0,
    };
    if arena.slot(declaration) == Some(ChildSlot::LambdaParameters)
        && arena.is_kind(declaration, NodeKind::VariableDeclarationFragment)
    {
        let Some(lambda) = arena.parent(declaration) else {
            return extra;
        };
        let index = arena
            .containing_list(declaration)
            .and_then(|list| list.position(declaration));
        let parameter = arena
            .binding(lambda)
            .zip(index)
            .and_then(|(method, i)| table.parameter_types(method).get(i).copied());
        return parameter.map_or(extra, |ty| table.dimensions(ty));
    }
    let declared = declared_type_of_variable(arena, declaration).and_then(|t| arena.data(t));
    let type_dimensions = match declared {
        Some(NodeData::ArrayType { dimensions, .. }) => *dimensions,
        _ => 0,
    };
    extra + type_dimensions
}

/// True for a declaration that declares exactly one variable.
pub fn is_single_declaration(arena: &NodeArena, declaration: NodeIndex) -> bool {
    match arena.kind(declaration) {
        Some(NodeKind::SingleVariableDeclaration) => true,
        Some(NodeKind::VariableDeclarationFragment) => {
            arena.slot(declaration) == Some(ChildSlot::LambdaParameters)
                || arena
                    .containing_list(declaration)
                    .is_some_and(|fragments| fragments.len() == 1)
        }
        _ => false,
    }
}

#[cfg(test)]
#[path = "tests/navigation_tests.rs"]
mod tests;
