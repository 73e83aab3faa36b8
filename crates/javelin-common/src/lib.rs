//! Common types and utilities for the javelin analysis engine.
//!
//! This crate provides foundational types used across all javelin crates:
//! - Binding ids shared by the tree and the binding table (`BindingId`)
//! - The error taxonomy (`AnalysisError`, `ErrorKind`)
//! - Cooperative cancellation (`CancellationToken`)
//! - Declaration modifiers (`Modifiers`, `ModifierKeyword`)
//! - Source ranges (`TextRange`)
//! - Session options (`AnalysisOptions`, `MemberCategory`)
//! - Traversal limits and thresholds

// Index newtypes
pub mod ids;
pub use ids::BindingId;

// Error taxonomy shared by every component
pub mod error;
pub use error::{AnalysisError, AnalysisResult, ErrorKind};

// Cooperative cancellation for long traversals
pub mod cancel;
pub use cancel::CancellationToken;

// Declaration modifiers
pub mod modifiers;
pub use modifiers::{ModifierKeyword, Modifiers};

// Source ranges (byte offsets)
pub mod span;
pub use span::TextRange;

// Session configuration
pub mod options;
pub use options::{AnalysisOptions, MemberCategory};

// Centralized limits and thresholds
pub mod limits;
