//! Binding-aware syntax tree analysis and structural rewrites for a
//! class-based, statically typed language.
//!
//! The engine takes an already parsed and bound tree and answers scope,
//! visibility and type-compatibility queries over it, decides where
//! expressions need parentheses, and records structural edits without
//! touching the tree they were made against.
//!
//! This crate re-exports the component crates:
//!
//! - [`ast`]: the tree model (`NodeArena`, `NodeIndex`, `ChildSlot`)
//! - [`bindings`]: binding table and resolver
//! - [`solver`]: assignment, subtyping and cast compatibility
//! - [`binder`]: scope analysis
//! - [`query`]: structural queries, target types, parenthesization
//! - [`rewrite`]: deferred edits and change sets

pub use javelin_ast as ast;
pub use javelin_binder as binder;
pub use javelin_bindings as bindings;
pub use javelin_common as common;
pub use javelin_query as query;
pub use javelin_rewrite as rewrite;
pub use javelin_solver as solver;

pub use javelin_common::{AnalysisError, AnalysisOptions, AnalysisResult, BindingId, ErrorKind};

// Logging setup for embedding hosts
pub mod tracing_config;
pub use tracing_config::{LogFormat, init_tracing};
