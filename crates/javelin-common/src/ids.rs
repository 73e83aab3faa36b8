//! Index newtypes shared between the tree and the binding table.

use serde::{Deserialize, Serialize};

/// Index of a binding inside a `BindingTable`.
///
/// Ids are only meaningful for the table that issued them. Cross-table
/// identity goes through the binding's key.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BindingId(pub u32);

impl BindingId {
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}
