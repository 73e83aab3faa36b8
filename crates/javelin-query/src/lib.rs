//! Structural queries, target-type inference and parenthesization for the
//! javelin analysis engine.
//!
//! - `navigation`: ancestor, list and name navigation over a tree
//! - `matcher`: binding-aware structural equality of subtrees
//! - `queries`: [`ExpressionQueries`], with target-type inference,
//!   the overload-ambiguity check and explicit-cast computation
//! - `precedence` / `parentheses`: when an expression needs parentheses
//!   at a location, and when existing ones can go

// Navigation helpers
pub mod navigation;
pub use navigation::{
    body_declarations, containing_list, declared_type_of_variable, enclosing_type,
    expression_type, get_parent_of_kind, is_control_statement_body, is_existing_node, is_label,
    is_literal, is_parent, is_single_declaration, left_most_simple_name, normalized_node,
    receiver_type, skip_parentheses, skip_parentheses_up, top_most_name, variable_dimensions,
};

// Structural equality
pub mod matcher;
pub use matcher::SubtreeMatcher;

// Binding-aware expression queries
pub mod queries;
mod target_type;
pub mod ambiguity;
mod explicit_cast;
pub use ambiguity::is_explicitly_typed_lambda;
pub use queries::ExpressionQueries;

// Parenthesization
pub mod precedence;
pub use precedence::{Precedence, expression_precedence, infix_precedence};
pub mod parentheses;
pub use parentheses::ParenthesesChecker;
