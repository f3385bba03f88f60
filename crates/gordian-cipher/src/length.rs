//! Bit lengths used by block, key, IV and digest specifications.
//!
//! The declaration order of [`Length`] is part of the algorithm identifier
//! encoding. Variants may only ever be appended.

use serde::{Deserialize, Serialize};

/// A length in bits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Length {
    /// 32 bits.
    Len32,
    /// 64 bits.
    Len64,
    /// 128 bits.
    Len128,
    /// 192 bits.
    Len192,
    /// 256 bits.
    Len256,
    /// 384 bits.
    Len384,
    /// 512 bits.
    Len512,
    /// 1024 bits.
    Len1024,
}

impl Length {
    /// Every length, in ordinal order.
    pub const ALL: [Self; 8] = [
        Self::Len32,
        Self::Len64,
        Self::Len128,
        Self::Len192,
        Self::Len256,
        Self::Len384,
        Self::Len512,
        Self::Len1024,
    ];

    /// Number of bits.
    #[must_use]
    pub const fn bits(self) -> u32 {
        match self {
            Self::Len32 => 32,
            Self::Len64 => 64,
            Self::Len128 => 128,
            Self::Len192 => 192,
            Self::Len256 => 256,
            Self::Len384 => 384,
            Self::Len512 => 512,
            Self::Len1024 => 1024,
        }
    }

    /// Number of whole bytes.
    #[must_use]
    pub const fn bytes(self) -> usize {
        match self {
            Self::Len32 => 4,
            Self::Len64 => 8,
            Self::Len128 => 16,
            Self::Len192 => 24,
            Self::Len256 => 32,
            Self::Len384 => 48,
            Self::Len512 => 64,
            Self::Len1024 => 128,
        }
    }

    /// Look up the length with exactly `bits` bits.
    #[must_use]
    pub fn from_bits(bits: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|l| l.bits() == bits)
    }

    /// Position of this length in declaration order.
    #[must_use]
    pub const fn ordinal(self) -> u32 {
        self as u32
    }
}

impl std::fmt::Display for Length {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.bits())
    }
}
