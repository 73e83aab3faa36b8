//! Query flags for declaration lookups.

use bitflags::bitflags;

bitflags! {
    /// Which declarations a scope query reports.
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
    pub struct DeclarationFlags: u32 {
        const METHODS = 1 << 0;
        const VARIABLES = 1 << 1;
        const TYPES = 1 << 2;
        /// Drop declarations not accessible from the query's enclosing type.
        const CHECK_VISIBILITY = 1 << 4;
    }
}

impl DeclarationFlags {
    /// Methods, variables and types.
    pub const ALL_KINDS: DeclarationFlags = DeclarationFlags::METHODS
        .union(DeclarationFlags::VARIABLES)
        .union(DeclarationFlags::TYPES);

    /// Whether the query asks for anything that can be declared locally.
    #[inline]
    pub fn wants_locals(self) -> bool {
        self.intersects(DeclarationFlags::VARIABLES | DeclarationFlags::TYPES)
    }
}
