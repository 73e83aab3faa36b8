//! Scope Analyzer for the javelin analysis engine.
//!
//! - `scope`: scope records and the per-body [`ScopeTree`]
//! - `scope_builder`: one pass over a declaration body producing a tree
//! - `cursor`: forward-moving visibility cursor over a built tree
//! - `analyzer`: declaration queries (`declarations_in_scope`,
//!   `declarations_after`, `is_declared_in_scope`, `used_names`)
//!
//! `CHECK_VISIBILITY` filters results with [`BindingResolver::is_visible`].
//!
//! [`BindingResolver::is_visible`]: javelin_bindings::BindingResolver::is_visible

pub mod flags;
pub use flags::DeclarationFlags;

pub mod scope;
pub use scope::{DeclarationKind, Scope, ScopeDeclaration, ScopeId, ScopeKind, ScopeTree};

pub mod scope_builder;
pub use scope_builder::ScopeBuilder;

pub mod cursor;
pub use cursor::ScopeCursor;

mod requestor;

pub mod analyzer;
pub use analyzer::ScopeAnalyzer;
