//! Type Compatibility Engine for the javelin analysis engine.
//!
//! This crate answers the conversion questions refactorings ask before they
//! move an expression to a new context:
//! - assignment conversion (`TypeRules::can_assign`)
//! - cast conversion (`TypeRules::can_cast`)
//! - the wildcard-aware subtype relation behind both (`TypeRules::is_subtype`)
//! - a small query layer naming each relation (`query_relation`)

// Primitive widening and numeric promotion
pub mod primitives;

// Assignment, cast and subtype rules
pub mod type_rules;
pub use type_rules::TypeRules;

// Unified relation entrypoints
pub mod relation_queries;
pub use relation_queries::{RelationKind, RelationPolicy, RelationResult, query_relation};
