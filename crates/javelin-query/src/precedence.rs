//! Operator precedence of expressions.
//!
//! Higher binds tighter. Expressions that are not operators (names,
//! literals, lambdas and so on) report [`Precedence::ATOM`], so they never
//! need parentheses as operands.

use javelin_ast::{InfixOperator, NodeArena, NodeData, NodeIndex};

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Precedence(pub u8);

impl Precedence {
    pub const ASSIGNMENT: Precedence = Precedence(0);
    pub const CONDITIONAL: Precedence = Precedence(1);
    pub const CONDITIONAL_OR: Precedence = Precedence(2);
    pub const CONDITIONAL_AND: Precedence = Precedence(3);
    pub const BITWISE_OR: Precedence = Precedence(4);
    pub const BITWISE_XOR: Precedence = Precedence(5);
    pub const BITWISE_AND: Precedence = Precedence(6);
    pub const EQUALITY: Precedence = Precedence(7);
    pub const RELATIONAL: Precedence = Precedence(8);
    pub const SHIFT: Precedence = Precedence(9);
    pub const ADDITIVE: Precedence = Precedence(10);
    pub const MULTIPLICATIVE: Precedence = Precedence(11);
    /// Casts.
    pub const TYPE_GENERATION: Precedence = Precedence(12);
    pub const PREFIX: Precedence = Precedence(13);
    /// Postfix operators, member access, calls and instance creation.
    pub const POSTFIX: Precedence = Precedence(14);
    pub const ATOM: Precedence = Precedence(u8::MAX);
}

pub fn infix_precedence(operator: InfixOperator) -> Precedence {
    use InfixOperator::*;
    match operator {
        Times | Divide | Remainder => Precedence::MULTIPLICATIVE,
        Plus | Minus => Precedence::ADDITIVE,
        LeftShift | RightShiftSigned | RightShiftUnsigned => Precedence::SHIFT,
        Less | Greater | LessEquals | GreaterEquals => Precedence::RELATIONAL,
        Equals | NotEquals => Precedence::EQUALITY,
        And => Precedence::BITWISE_AND,
        Xor => Precedence::BITWISE_XOR,
        Or => Precedence::BITWISE_OR,
        ConditionalAnd => Precedence::CONDITIONAL_AND,
        ConditionalOr => Precedence::CONDITIONAL_OR,
    }
}

/// Precedence of the operator at the root of `expression`.
pub fn expression_precedence(arena: &NodeArena, expression: NodeIndex) -> Precedence {
    match arena.data(expression) {
        Some(NodeData::Infix { operator, .. }) => infix_precedence(*operator),
        Some(NodeData::Assignment { .. }) => Precedence::ASSIGNMENT,
        Some(NodeData::Conditional { .. }) => Precedence::CONDITIONAL,
        Some(NodeData::InstanceOf { .. }) => Precedence::RELATIONAL,
        Some(NodeData::Cast { .. }) => Precedence::TYPE_GENERATION,
        Some(NodeData::Prefix { .. }) => Precedence::PREFIX,
        Some(
            NodeData::Postfix { .. }
            | NodeData::ClassInstanceCreation { .. }
            | NodeData::FieldAccess { .. }
            | NodeData::MethodInvocation { .. }
            | NodeData::ArrayAccess { .. },
        ) => Precedence::POSTFIX,
        _ => Precedence::ATOM,
    }
}
