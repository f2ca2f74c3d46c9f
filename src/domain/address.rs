//! Account and token identity.

use core::fmt;

/// A 32-byte identity shared by accounts, pools, and token contracts.
///
/// All 32-byte sequences are valid, so construction is infallible. The
/// all-zero address is the null identity: the registry refuses to create a
/// pool for it.
///
/// # Examples
///
/// ```
/// use cereal_swap::domain::Address;
///
/// let addr = Address::from_bytes([1u8; 32]);
/// assert_eq!(addr.as_bytes(), [1u8; 32]);
/// assert!(Address::zero().is_zero());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Address([u8; 32]);

/// Leading byte of every registry-derived pool address.
const POOL_ADDRESS_TAG: u8 = 0xCE;

impl Address {
    /// Creates an `Address` from raw bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Returns the underlying 32-byte representation.
    #[must_use]
    pub const fn as_bytes(&self) -> [u8; 32] {
        self.0
    }

    /// Returns the all-zero (null) address.
    #[must_use]
    pub const fn zero() -> Self {
        Self([0u8; 32])
    }

    /// Returns `true` for the null address.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|b| *b == 0)
    }

    /// Deterministic account for the pool at `index` of a registry in the
    /// default namespace `0`.
    #[must_use]
    pub const fn for_pool(index: u64) -> Self {
        Self::for_registry_pool(0, index)
    }

    /// Deterministic account for the pool at `index` of the registry using
    /// `namespace`.
    ///
    /// Layout: the tag byte, the big-endian namespace in bytes 20..24 and
    /// the big-endian index in the last eight bytes. Distinct
    /// `(namespace, index)` pairs never collide and no derived address is
    /// the null address.
    #[must_use]
    pub const fn for_registry_pool(namespace: u32, index: u64) -> Self {
        let mut bytes = [0u8; 32];
        bytes[0] = POOL_ADDRESS_TAG;
        let ns = namespace.to_be_bytes();
        let mut i = 0;
        while i < 4 {
            bytes[20 + i] = ns[i];
            i += 1;
        }
        let idx = index.to_be_bytes();
        let mut i = 0;
        while i < 8 {
            bytes[24 + i] = idx[i];
            i += 1;
        }
        Self(bytes)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}
