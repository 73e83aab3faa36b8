//! Primitive conversions.

use javelin_bindings::PrimitiveKind;

/// Identity or widening primitive conversion from `from` to `to`.
///
/// `boolean` and `void` only convert to themselves.
pub fn is_widening(from: PrimitiveKind, to: PrimitiveKind) -> bool {
    use PrimitiveKind::*;
    if from == to {
        return true;
    }
    match from {
        Byte => matches!(to, Short | Int | Long | Float | Double),
        Short | Char => matches!(to, Int | Long | Float | Double),
        Int => matches!(to, Long | Float | Double),
        Long => matches!(to, Float | Double),
        Float => to == Double,
        Double | Boolean | Void => false,
    }
}

/// Kind resulting from binary numeric promotion of two operands, or `None`
/// when either side is not numeric.
pub fn binary_promotion(left: PrimitiveKind, right: PrimitiveKind) -> Option<PrimitiveKind> {
    use PrimitiveKind::*;
    if !left.is_numeric() || !right.is_numeric() {
        return None;
    }
    Some(if left == Double || right == Double {
        Double
    } else if left == Float || right == Float {
        Float
    } else if left == Long || right == Long {
        Long
    } else {
        Int
    })
}

#[cfg(test)]
#[path = "tests/primitives_tests.rs"]
mod tests;
