//! Centralized limits and thresholds for the analysis engine.
//!
//! Input trees and binding tables come from an external provider and may be
//! malformed (cyclic parent chains, cyclic supertype graphs). Every unbounded
//! walk in the engine is capped by one of the constants below.

// =============================================================================
// Tree Walks
// =============================================================================

/// Maximum number of parent hops taken when climbing from a node towards the
/// root.
///
/// A well-formed tree is never this deep; hitting the cap means the parent
/// links form a cycle and the walk stops as if it reached the root.
pub const MAX_TREE_WALK_ITERATIONS: usize = 10_000;

/// Maximum nesting depth of lexical scopes built for one declaration body.
pub const MAX_SCOPE_NESTING: usize = 1_000;

// =============================================================================
// Binding Hierarchy
// =============================================================================

/// Maximum depth of a superclass/interface walk.
///
/// Visited sets already stop cycles; this bounds pathological but acyclic
/// hierarchies generated by tooling.
pub const MAX_HIERARCHY_DEPTH: u32 = 256;

/// Maximum nesting of enclosing types followed by visibility checks.
pub const MAX_ENCLOSING_TYPE_DEPTH: u32 = 64;

/// Maximum recursion when comparing generic type arguments for
/// assignability (`List<List<List<...>>>`).
pub const MAX_TYPE_ARGUMENT_DEPTH: u32 = 32;

// =============================================================================
// Capacity
// =============================================================================

/// Initial capacity of the visited set used by hierarchy walks.
pub const HIERARCHY_VISITED_CAPACITY: usize = 16;
