//! Syntax tree model for the javelin analysis engine.
//!
//! Nodes live in a [`NodeArena`] and are addressed by [`NodeIndex`]. Each
//! node records its parent as an index (never an owning pointer) plus the
//! [`ChildSlot`] it occupies, so upward navigation is O(1) and ownership stays
//! strictly top-down.
//!
//! - `base`: index and list types
//! - `node`: node payloads, kind tags, slots
//! - `node_arena`: creation (`add_*`) and deep copies
//! - `node_access`: lookup and navigation
//! - `node_finder`: offset-based lookup
//! - `printer`: debug rendering and synthetic layout

pub mod base;
pub use base::{NodeIndex, NodeList};

pub mod operators;
pub use operators::{
    AssignmentOperator, CommentStyle, InfixOperator, PostfixOperator, PrefixOperator,
    PrimitiveTypeCode,
};

pub mod node;
pub use node::{ChildSlot, Node, NodeData, NodeKind, SlotValue};

pub mod node_arena;
pub use node_arena::NodeArena;

pub mod node_access;
pub use node_access::Ancestors;

pub mod node_finder;
pub use node_finder::NodeFinder;

pub mod printer;
pub use printer::{layout, print_node};

#[cfg(test)]
#[path = "tests/node_arena_tests.rs"]
mod node_arena_tests;

#[cfg(test)]
#[path = "tests/node_finder_tests.rs"]
mod node_finder_tests;
