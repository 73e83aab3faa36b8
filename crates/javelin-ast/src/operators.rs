//! Operator and keyword enums carried by node payloads.

use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InfixOperator {
    Times,
    Divide,
    Remainder,
    Plus,
    Minus,
    LeftShift,
    RightShiftSigned,
    RightShiftUnsigned,
    Less,
    Greater,
    LessEquals,
    GreaterEquals,
    Equals,
    NotEquals,
    Xor,
    And,
    Or,
    ConditionalAnd,
    ConditionalOr,
}

impl InfixOperator {
    pub const fn token(self) -> &'static str {
        match self {
            Self::Times => "*",
            Self::Divide => "/",
            Self::Remainder => "%",
            Self::Plus => "+",
            Self::Minus => "-",
            Self::LeftShift => "<<",
            Self::RightShiftSigned => ">>",
            Self::RightShiftUnsigned => ">>>",
            Self::Less => "<",
            Self::Greater => ">",
            Self::LessEquals => "<=",
            Self::GreaterEquals => ">=",
            Self::Equals => "==",
            Self::NotEquals => "!=",
            Self::Xor => "^",
            Self::And => "&",
            Self::Or => "|",
            Self::ConditionalAnd => "&&",
            Self::ConditionalOr => "||",
        }
    }

    /// Result is `boolean` regardless of operand types.
    pub const fn is_boolean_valued(self) -> bool {
        matches!(
            self,
            Self::Less
                | Self::Greater
                | Self::LessEquals
                | Self::GreaterEquals
                | Self::Equals
                | Self::NotEquals
                | Self::ConditionalAnd
                | Self::ConditionalOr
        )
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PrefixOperator {
    Increment,
    Decrement,
    Plus,
    Minus,
    Complement,
    Not,
}

impl PrefixOperator {
    pub const fn token(self) -> &'static str {
        match self {
            Self::Increment => "++",
            Self::Decrement => "--",
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Complement => "~",
            Self::Not => "!",
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PostfixOperator {
    Increment,
    Decrement,
}

impl PostfixOperator {
    pub const fn token(self) -> &'static str {
        match self {
            Self::Increment => "++",
            Self::Decrement => "--",
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssignmentOperator {
    Assign,
    PlusAssign,
    MinusAssign,
    TimesAssign,
    DivideAssign,
    RemainderAssign,
    BitAndAssign,
    BitOrAssign,
    BitXorAssign,
    LeftShiftAssign,
    RightShiftSignedAssign,
    RightShiftUnsignedAssign,
}

impl AssignmentOperator {
    pub const fn token(self) -> &'static str {
        match self {
            Self::Assign => "=",
            Self::PlusAssign => "+=",
            Self::MinusAssign => "-=",
            Self::TimesAssign => "*=",
            Self::DivideAssign => "/=",
            Self::RemainderAssign => "%=",
            Self::BitAndAssign => "&=",
            Self::BitOrAssign => "|=",
            Self::BitXorAssign => "^=",
            Self::LeftShiftAssign => "<<=",
            Self::RightShiftSignedAssign => ">>=",
            Self::RightShiftUnsignedAssign => ">>>=",
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PrimitiveTypeCode {
    Boolean,
    Byte,
    Char,
    Short,
    Int,
    Long,
    Float,
    Double,
    Void,
}

impl PrimitiveTypeCode {
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Boolean => "boolean",
            Self::Byte => "byte",
            Self::Char => "char",
            Self::Short => "short",
            Self::Int => "int",
            Self::Long => "long",
            Self::Float => "float",
            Self::Double => "double",
            Self::Void => "void",
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CommentStyle {
    Line,
    Block,
    Doc,
}
