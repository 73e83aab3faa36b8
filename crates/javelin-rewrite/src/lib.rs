//! Deferred structural edits over javelin syntax trees.
//!
//! A rewrite never mutates the tree it was opened on. Each change is
//! recorded in the edit log of the slot it affects and the rewritten tree is
//! a projection of the original through those logs. Committing hands the
//! logs over as a [`ChangeSet`].
//!
//! - `edit`: edit records and node handles
//! - `list_rewrite`: per-slot logs and the list editing handle
//! - `ast_rewrite`: the rewrite session ([`AstRewrite`])
//! - `change_set`: the committed result
//! - `replace`: replacing runs of nodes, statement-aware variant
//! - `expression_rewrite`: replacement that adds parentheses when needed
//! - `modifier_rewrite` / `body_declaration_rewrite`: declaration-level
//!   helpers for modifier lists and member insertion

pub mod edit;
pub use edit::{EditGroup, ListState, PendingEdit, RewriteNode};

pub mod list_rewrite;
pub use list_rewrite::{ListEdits, ListRewrite, SlotEdits};

pub mod ast_rewrite;
pub use ast_rewrite::AstRewrite;

pub mod change_set;
pub use change_set::{ChangeSet, ListChange, SlotChange};

// Compound replacements
pub mod replace;
pub use replace::{ReplaceRewrite, Replacer, StatementRewrite, replace_statement};
pub mod expression_rewrite;
pub use expression_rewrite::ExpressionRewrite;

// Declaration helpers
pub mod modifier_rewrite;
pub use modifier_rewrite::ModifierRewrite;
pub mod body_declaration_rewrite;
pub use body_declaration_rewrite::{BodyDeclarationRewrite, member_category};
