//! Declaration modifiers.
//!
//! `Modifiers` is the flag set carried by bindings; `ModifierKeyword` is the
//! keyword carried by a modifier node in the tree. Both use the same bit for
//! the same keyword.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Modifiers: u32 {
        const PUBLIC       = 1 << 0;
        const PRIVATE      = 1 << 1;
        const PROTECTED    = 1 << 2;
        const STATIC       = 1 << 3;
        const FINAL        = 1 << 4;
        const SYNCHRONIZED = 1 << 5;
        const VOLATILE     = 1 << 6;
        const TRANSIENT    = 1 << 7;
        const NATIVE       = 1 << 8;
        const ABSTRACT     = 1 << 10;
        const STRICTFP     = 1 << 11;
        const DEFAULT      = 1 << 16;

        const VISIBILITY = Self::PUBLIC.bits() | Self::PROTECTED.bits() | Self::PRIVATE.bits();
    }
}

impl Modifiers {
    #[inline]
    pub const fn is_public(self) -> bool {
        self.contains(Self::PUBLIC)
    }

    #[inline]
    pub const fn is_private(self) -> bool {
        self.contains(Self::PRIVATE)
    }

    #[inline]
    pub const fn is_protected(self) -> bool {
        self.contains(Self::PROTECTED)
    }

    #[inline]
    pub const fn is_static(self) -> bool {
        self.contains(Self::STATIC)
    }

    #[inline]
    pub const fn is_final(self) -> bool {
        self.contains(Self::FINAL)
    }

    #[inline]
    pub const fn is_abstract(self) -> bool {
        self.contains(Self::ABSTRACT)
    }

    /// No visibility keyword: package-private.
    #[inline]
    pub const fn is_package_visible(self) -> bool {
        !self.intersects(Self::VISIBILITY)
    }

    /// Keywords in canonical source order.
    pub fn keywords(self) -> Vec<ModifierKeyword> {
        ModifierKeyword::CANONICAL_ORDER
            .iter()
            .copied()
            .filter(|k| self.contains(k.flag()))
            .collect()
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModifierKeyword {
    Public,
    Protected,
    Private,
    Abstract,
    Static,
    Final,
    Synchronized,
    Native,
    Transient,
    Volatile,
    Strictfp,
    Default,
}

impl ModifierKeyword {
    /// The order a formatter writes keywords in.
    pub const CANONICAL_ORDER: [ModifierKeyword; 12] = [
        ModifierKeyword::Public,
        ModifierKeyword::Protected,
        ModifierKeyword::Private,
        ModifierKeyword::Abstract,
        ModifierKeyword::Static,
        ModifierKeyword::Final,
        ModifierKeyword::Synchronized,
        ModifierKeyword::Native,
        ModifierKeyword::Transient,
        ModifierKeyword::Volatile,
        ModifierKeyword::Strictfp,
        ModifierKeyword::Default,
    ];

    pub const fn flag(self) -> Modifiers {
        match self {
            Self::Public => Modifiers::PUBLIC,
            Self::Protected => Modifiers::PROTECTED,
            Self::Private => Modifiers::PRIVATE,
            Self::Abstract => Modifiers::ABSTRACT,
            Self::Static => Modifiers::STATIC,
            Self::Final => Modifiers::FINAL,
            Self::Synchronized => Modifiers::SYNCHRONIZED,
            Self::Native => Modifiers::NATIVE,
            Self::Transient => Modifiers::TRANSIENT,
            Self::Volatile => Modifiers::VOLATILE,
            Self::Strictfp => Modifiers::STRICTFP,
            Self::Default => Modifiers::DEFAULT,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Protected => "protected",
            Self::Private => "private",
            Self::Abstract => "abstract",
            Self::Static => "static",
            Self::Final => "final",
            Self::Synchronized => "synchronized",
            Self::Native => "native",
            Self::Transient => "transient",
            Self::Volatile => "volatile",
            Self::Strictfp => "strictfp",
            Self::Default => "default",
        }
    }

    #[inline]
    pub const fn is_visibility(self) -> bool {
        matches!(self, Self::Public | Self::Protected | Self::Private)
    }
}

#[cfg(test)]
#[path = "tests/modifiers_tests.rs"]
mod tests;
