//! Source ranges measured in byte offsets.

use serde::{Deserialize, Serialize};

/// A half-open range `[start, start + length)`.
///
/// Nodes created by factory operations have no range; the tree stores
/// `Option<TextRange>` and treats `None` as "synthesized".
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TextRange {
    pub start: u32,
    pub length: u32,
}

impl TextRange {
    #[inline]
    pub const fn new(start: u32, length: u32) -> Self {
        Self { start, length }
    }

    #[inline]
    pub const fn from_bounds(start: u32, end: u32) -> Self {
        Self {
            start,
            length: end.saturating_sub(start),
        }
    }

    /// Exclusive end offset.
    #[inline]
    pub const fn end(&self) -> u32 {
        self.start + self.length
    }

    /// Inclusive end offset (`end - 1`), the last covered byte.
    #[inline]
    pub const fn inclusive_end(&self) -> u32 {
        self.end().saturating_sub(1)
    }

    #[inline]
    pub const fn contains_offset(&self, offset: u32) -> bool {
        self.start <= offset && offset < self.end()
    }

    /// True if `other` lies entirely within `self`.
    #[inline]
    pub const fn covers(&self, other: TextRange) -> bool {
        self.start <= other.start && other.end() <= self.end()
    }
}
