//! Registry-local pool handle.

use core::fmt;

/// Index of a pool inside the [`PoolRegistry`](super::PoolRegistry) that
/// created it.
///
/// Ids are dense and stable: pools are never removed, so an id stays valid
/// for the registry's lifetime. An id is meaningless in another registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PoolId(usize);

impl PoolId {
    pub(crate) const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Position of the pool in creation order.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for PoolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pool#{}", self.0)
    }
}
