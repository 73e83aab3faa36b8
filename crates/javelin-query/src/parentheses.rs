//! Parenthesization Engine.
//!
//! Decides whether an expression placed at a given location must be wrapped
//! in parentheses to keep its meaning, and whether existing parentheses can
//! be dropped. The rules, in order:
//!
//! 1. Only operator-like expressions (infix, conditional, prefix, postfix,
//!    cast, `instanceof`, array creation, assignment) can ever need them.
//! 2. Locations the surrounding syntax already delimits (argument and other
//!    child lists, initializers, statement subjects, array indexes, lambda
//!    bodies, the inside of another parenthesized expression) never need
//!    them. A parenthesized expression statement would not even parse.
//! 3. Otherwise precedence decides: a looser child under a tighter parent
//!    needs parentheses, a tighter child never does, and a non-expression
//!    parent always does.
//! 4. At equal precedence under an infix parent, the left operand is safe;
//!    right and extended operands are safe only when the parent operator is
//!    associative for the operand types. A conditional in the condition of
//!    another conditional always needs them.
//! 5. `+`/`++` under `+` and `-`/`--` under `-` always need them, to avoid
//!    gluing tokens together.

use smallvec::SmallVec;
use tracing::trace;

use crate::navigation::{expression_type, skip_parentheses};
use crate::precedence::expression_precedence;
use javelin_ast::{ChildSlot, InfixOperator, NodeArena, NodeData, NodeIndex, NodeKind, PrefixOperator};
use javelin_bindings::{BindingTable, JAVA_LANG_STRING, PrimitiveKind};
use javelin_common::BindingId;
use javelin_solver::primitives::binary_promotion;

pub struct ParenthesesChecker<'a> {
    arena: &'a NodeArena,
    table: &'a BindingTable,
}

impl<'a> ParenthesesChecker<'a> {
    pub fn new(arena: &'a NodeArena, table: &'a BindingTable) -> Self {
        Self { arena, table }
    }

    /// Whether `expression` needs parentheses where it currently sits.
    pub fn needs_parentheses_in_place(&self, expression: NodeIndex) -> bool {
        match (self.arena.parent(expression), self.arena.slot(expression)) {
            (Some(parent), Some(slot)) => self.needs_parentheses(expression, parent, slot, None),
            _ => false,
        }
    }

    /// Whether `expression` needs parentheses when placed in `slot` of
    /// `parent`.
    ///
    /// `left_operand_type` is the type of the left operand when `parent` is
    /// an infix expression that is being built and has no resolved types
    /// yet; pass `None` to read the types from `parent` itself.
    pub fn needs_parentheses(
        &self,
        expression: NodeIndex,
        parent: NodeIndex,
        slot: ChildSlot,
        left_operand_type: Option<BindingId>,
    ) -> bool {
        let Some(data) = self.arena.data(expression) else {
            return false;
        };
        if !kind_can_need_parentheses(data.kind()) || !location_needs_parentheses(slot) {
            return false;
        }
        let Some(parent_data) = self.arena.data(parent) else {
            return true;
        };
        if !parent_data.kind().is_expression() {
            return true;
        }

        if let NodeData::Prefix { operator, .. } = data
            && tokens_would_glue(parent_data, *operator)
        {
            return true;
        }
        if let NodeData::ArrayCreation { initializer, .. } = data {
            return parent_data.kind() == NodeKind::ArrayAccess
                && slot == ChildSlot::ArrayAccessArray
                && initializer.is_none();
        }

        let own = expression_precedence(self.arena, expression);
        let outer = expression_precedence(self.arena, parent);
        trace!(own = own.0, outer = outer.0, ?slot, "comparing precedence");
        if own > outer {
            return false;
        }
        if own < outer {
            return true;
        }
        match parent_data {
            NodeData::Infix { .. } => {
                self.needs_parentheses_in_infix(expression, parent, slot, left_operand_type)
            }
            NodeData::Conditional { .. } => slot == ChildSlot::ConditionalExpression,
            _ => false,
        }
    }

    /// Whether the parentheses of `parenthesized` can be dropped where it
    /// sits.
    pub fn can_remove_parentheses(&self, parenthesized: NodeIndex) -> bool {
        match (self.arena.parent(parenthesized), self.arena.slot(parenthesized)) {
            (Some(parent), Some(slot)) => {
                self.can_remove_parentheses_at(parenthesized, parent, slot)
            }
            _ => self.arena.is_kind(parenthesized, NodeKind::Parenthesized),
        }
    }

    /// Whether `parenthesized`, placed in `slot` of `parent`, can lose its
    /// parentheses. Nested redundant parentheses are looked through.
    pub fn can_remove_parentheses_at(
        &self,
        parenthesized: NodeIndex,
        parent: NodeIndex,
        slot: ChildSlot,
    ) -> bool {
        if !self.arena.is_kind(parenthesized, NodeKind::Parenthesized) {
            return false;
        }
        let inner = skip_parentheses(self.arena, parenthesized);
        !self.needs_parentheses(inner, parent, slot, None)
    }

    // =========================================================================
    // Equal Precedence Under an Infix Parent
    // =========================================================================

    fn needs_parentheses_in_infix(
        &self,
        expression: NodeIndex,
        parent: NodeIndex,
        slot: ChildSlot,
        left_operand_type: Option<BindingId>,
    ) -> bool {
        if slot == ChildSlot::InfixLeftOperand {
            return false;
        }
        let Some(NodeData::Infix {
            operator: parent_operator,
            left,
            right,
            extended_operands,
        }) = self.arena.data(parent)
        else {
            return true;
        };
        let parent_operator = *parent_operator;

        let (left_type, right_type, parent_type) = match left_operand_type {
            None => (
                expression_type(self.arena, *left),
                expression_type(self.arena, *right),
                expression_type(self.arena, parent),
            ),
            Some(left_type) => {
                let right_type = expression_type(self.arena, expression);
                let parent_type = self.infix_result_type(parent_operator, Some(left_type), right_type);
                (Some(left_type), right_type, parent_type)
            }
        };
        let mut operand_types: SmallVec<[Option<BindingId>; 4]> = SmallVec::new();
        operand_types.push(right_type);
        if left_operand_type.is_none() {
            operand_types.extend(extended_operands.iter().map(|e| expression_type(self.arena, e)));
        }
        let same_type = left_type.is_some() && operand_types.iter().all(|t| *t == left_type);

        if !self.is_associative(parent_operator, parent_type, same_type) {
            return true;
        }
        let Some(NodeData::Infix {
            operator,
            left: inner_left,
            ..
        }) = self.arena.data(expression)
        else {
            return false;
        };

        if self.is_string_type(parent_type) {
            if parent_operator == InfixOperator::Plus
                && *operator == InfixOperator::Plus
                && self.is_string_type(expression_type(self.arena, expression))
            {
                // 1 + ("" + 2) == 1 + "" + 2, but 1 + (2 + "") != 1 + 2 + ""
                return !self.is_string_type(expression_type(self.arena, *inner_left))
                    && !self.is_string_type(left_type);
            }
            return true;
        }
        if parent_operator != InfixOperator::Times {
            return false;
        }
        // x * (y % z) != x * y % z; x * (y / z) rounds differently
        matches!(operator, InfixOperator::Remainder | InfixOperator::Divide)
    }

    fn is_associative(&self, operator: InfixOperator, result: Option<BindingId>, same_type: bool) -> bool {
        match operator {
            InfixOperator::Plus => {
                self.is_string_type(result) || (self.is_integer_type(result) && same_type)
            }
            InfixOperator::Times => self.is_integer_type(result) && same_type,
            InfixOperator::ConditionalAnd
            | InfixOperator::ConditionalOr
            | InfixOperator::And
            | InfixOperator::Or
            | InfixOperator::Xor => true,
            _ => false,
        }
    }

    // =========================================================================
    // Operand Types
    // =========================================================================

    fn is_string_type(&self, ty: Option<BindingId>) -> bool {
        ty.is_some_and(|t| self.table.qualified_name(t) == JAVA_LANG_STRING)
    }

    fn is_integer_type(&self, ty: Option<BindingId>) -> bool {
        ty.and_then(|t| self.table.primitive_kind(t))
            .is_some_and(PrimitiveKind::is_integral)
    }

    /// Primitive kind of a type after unboxing.
    fn numeric_kind(&self, ty: BindingId) -> Option<PrimitiveKind> {
        self.table.primitive_kind(ty).or_else(|| {
            let declaration = self.table.declaration(ty);
            PrimitiveKind::from_boxed_name(self.table.qualified_name(declaration))
        })
    }

    /// Result type of `left operator right` when the operands are known but
    /// the expression has not been resolved.
    fn infix_result_type(
        &self,
        operator: InfixOperator,
        left: Option<BindingId>,
        right: Option<BindingId>,
    ) -> Option<BindingId> {
        if operator.is_boolean_valued() {
            return Some(self.table.primitive(PrimitiveKind::Boolean));
        }
        if operator == InfixOperator::Plus && (self.is_string_type(left) || self.is_string_type(right)) {
            return self.table.find_type(JAVA_LANG_STRING);
        }
        let left = self.numeric_kind(left?)?;
        let right = self.numeric_kind(right?)?;
        let kind = match operator {
            InfixOperator::LeftShift
            | InfixOperator::RightShiftSigned
            | InfixOperator::RightShiftUnsigned => binary_promotion(left, PrimitiveKind::Int)?,
            InfixOperator::And | InfixOperator::Or | InfixOperator::Xor
                if left == PrimitiveKind::Boolean && right == PrimitiveKind::Boolean =>
            {
                PrimitiveKind::Boolean
            }
            _ => binary_promotion(left, right)?,
        };
        Some(self.table.primitive(kind))
    }
}

/// Expression kinds that can ever need parentheses.
fn kind_can_need_parentheses(kind: NodeKind) -> bool {
    matches!(
        kind,
        NodeKind::Infix
            | NodeKind::Conditional
            | NodeKind::Prefix
            | NodeKind::Postfix
            | NodeKind::Cast
            | NodeKind::InstanceOf
            | NodeKind::ArrayCreation
            | NodeKind::Assignment
    )
}

/// False for locations the surrounding syntax already delimits.
fn location_needs_parentheses(slot: ChildSlot) -> bool {
    if slot.is_list() && slot != ChildSlot::InfixExtendedOperands {
        return false;
    }
    !matches!(
        slot,
        ChildSlot::FragmentInitializer
            | ChildSlot::SingleVariableDeclarationInitializer
            | ChildSlot::ExpressionStatementExpression
            | ChildSlot::ReturnExpression
            | ChildSlot::ThrowExpression
            | ChildSlot::AssertExpression
            | ChildSlot::AssertMessage
            | ChildSlot::IfExpression
            | ChildSlot::WhileExpression
            | ChildSlot::DoExpression
            | ChildSlot::ForExpression
            | ChildSlot::EnhancedForExpression
            | ChildSlot::SwitchExpression
            | ChildSlot::SwitchCaseExpression
            | ChildSlot::SynchronizedExpression
            | ChildSlot::ArrayAccessIndex
            | ChildSlot::ParenthesizedExpression
            | ChildSlot::LambdaBody
    )
}

/// `a + +b`, `+ +b`, `a - -b`, `- -b` and their `++`/`--` variants.
fn tokens_would_glue(parent: &NodeData, operator: PrefixOperator) -> bool {
    let plus_like = matches!(operator, PrefixOperator::Plus | PrefixOperator::Increment);
    let minus_like = matches!(operator, PrefixOperator::Minus | PrefixOperator::Decrement);
    match parent {
        NodeData::Prefix {
            operator: PrefixOperator::Plus,
            ..
        }
        | NodeData::Infix {
            operator: InfixOperator::Plus,
            ..
        } => plus_like,
        NodeData::Prefix {
            operator: PrefixOperator::Minus,
            ..
        }
        | NodeData::Infix {
            operator: InfixOperator::Minus,
            ..
        } => minus_like,
        _ => false,
    }
}

#[cfg(test)]
#[path = "tests/parentheses_tests.rs"]
mod tests;
