//! Symmetric and stream key specifications.
//!
//! The declaration order of every enum in this module feeds the algorithm
//! identifier encoding, so new variants are only ever appended.

use crate::length::Length;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Key lengths considered when enumerating symmetric key specs.
pub const SYM_KEY_LENGTHS: [Length; 5] = [
    Length::Len128,
    Length::Len192,
    Length::Len256,
    Length::Len512,
    Length::Len1024,
];

/// Key lengths considered when enumerating stream key specs.
pub const STREAM_KEY_LENGTHS: [Length; 2] = [Length::Len128, Length::Len256];

// ---------------------------------------------------------------------------
// Symmetric keys
// ---------------------------------------------------------------------------

/// Block cipher algorithms.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SymKeyType {
    Aes,
    Serpent,
    Twofish,
    Camellia,
    Rc6,
    Cast6,
    Aria,
    Sm4,
    Noekeon,
    Seed,
    Kalyna,
    Threefish,
    Speck,
    Simon,
    Kuznyechik,
    Lea,
    Shacal2,
    Blowfish,
    Cast5,
    DesEde,
    Idea,
    Rc2,
    /// RC5-32 with a 64-bit block, RC5-64 with a 128-bit block.
    Rc5,
    Xtea,
    Gost,
}

impl SymKeyType {
    /// Every algorithm, in ordinal order.
    pub const ALL: [Self; 25] = [
        Self::Aes,
        Self::Serpent,
        Self::Twofish,
        Self::Camellia,
        Self::Rc6,
        Self::Cast6,
        Self::Aria,
        Self::Sm4,
        Self::Noekeon,
        Self::Seed,
        Self::Kalyna,
        Self::Threefish,
        Self::Speck,
        Self::Simon,
        Self::Kuznyechik,
        Self::Lea,
        Self::Shacal2,
        Self::Blowfish,
        Self::Cast5,
        Self::DesEde,
        Self::Idea,
        Self::Rc2,
        Self::Rc5,
        Self::Xtea,
        Self::Gost,
    ];

    /// Position of this algorithm in declaration order.
    #[must_use]
    pub const fn ordinal(self) -> u32 {
        self as u32
    }

    /// Block lengths the algorithm is defined for.
    #[must_use]
    pub const fn block_lengths(self) -> &'static [Length] {
        match self {
            Self::Kalyna => &[Length::Len128, Length::Len256, Length::Len512],
            Self::Threefish => &[Length::Len256, Length::Len512, Length::Len1024],
            Self::Speck | Self::Simon | Self::Rc5 => &[Length::Len64, Length::Len128],
            Self::Shacal2 => &[Length::Len256],
            Self::Blowfish | Self::Cast5 | Self::DesEde | Self::Idea | Self::Rc2 | Self::Xtea
            | Self::Gost => &[Length::Len64],
            Self::Aes
            | Self::Serpent
            | Self::Twofish
            | Self::Camellia
            | Self::Rc6
            | Self::Cast6
            | Self::Aria
            | Self::Sm4
            | Self::Noekeon
            | Self::Seed
            | Self::Kuznyechik
            | Self::Lea => &[Length::Len128],
        }
    }

    /// Whether `key_length` is legal for this algorithm at `block_length`.
    #[must_use]
    pub fn supports_key_length(self, block_length: Length, key_length: Length) -> bool {
        if !self.block_lengths().contains(&block_length) {
            return false;
        }
        match self {
            Self::Kalyna => match block_length {
                Length::Len128 => matches!(key_length, Length::Len128 | Length::Len256),
                Length::Len256 => matches!(key_length, Length::Len256 | Length::Len512),
                _ => key_length == Length::Len512,
            },
            Self::Threefish => key_length == block_length,
            Self::Speck | Self::Simon => match block_length {
                Length::Len64 => key_length == Length::Len128,
                _ => matches!(key_length, Length::Len128 | Length::Len192 | Length::Len256),
            },
            Self::Shacal2 => matches!(
                key_length,
                Length::Len128 | Length::Len192 | Length::Len256 | Length::Len512
            ),
            Self::Aes
            | Self::Serpent
            | Self::Twofish
            | Self::Camellia
            | Self::Rc6
            | Self::Cast6
            | Self::Aria
            | Self::Lea
            | Self::Blowfish
            | Self::Rc5 => matches!(key_length, Length::Len128 | Length::Len192 | Length::Len256),
            Self::DesEde => matches!(key_length, Length::Len128 | Length::Len192),
            Self::Kuznyechik | Self::Gost => key_length == Length::Len256,
            Self::Sm4 | Self::Noekeon | Self::Seed | Self::Cast5 | Self::Idea | Self::Rc2
            | Self::Xtea => key_length == Length::Len128,
        }
    }
}

/// Specification of a block cipher key: algorithm, block length and key length.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SymKeySpec {
    key_type: SymKeyType,
    block_length: Length,
    key_length: Length,
}

impl SymKeySpec {
    /// Create a spec. Validity is checked separately by [`Self::is_valid`].
    #[must_use]
    pub const fn new(key_type: SymKeyType, block_length: Length, key_length: Length) -> Self {
        Self {
            key_type,
            block_length,
            key_length,
        }
    }

    /// Create a spec using the algorithm's first (standard) block length.
    #[must_use]
    pub const fn standard(key_type: SymKeyType, key_length: Length) -> Self {
        Self::new(key_type, key_type.block_lengths()[0], key_length)
    }

    /// AES with the given key length.
    #[must_use]
    pub const fn aes(key_length: Length) -> Self {
        Self::new(SymKeyType::Aes, Length::Len128, key_length)
    }

    #[must_use]
    pub const fn key_type(&self) -> SymKeyType {
        self.key_type
    }

    #[must_use]
    pub const fn block_length(&self) -> Length {
        self.block_length
    }

    #[must_use]
    pub const fn key_length(&self) -> Length {
        self.key_length
    }

    /// Whether the algorithm/block/key combination is legal.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.key_type
            .supports_key_length(self.block_length, self.key_length)
    }
}

impl fmt::Display for SymKeySpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:?}-{}/{}",
            self.key_type, self.block_length, self.key_length
        )
    }
}

// ---------------------------------------------------------------------------
// Stream keys
// ---------------------------------------------------------------------------

/// Stream cipher algorithms.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum StreamKeyType {
    Salsa20,
    Hc,
    ChaCha20,
    Vmpc,
    Isaac,
    Grain,
    Rc4,
    Sosemanuk,
    Rabbit,
    Snow3G,
    Zuc,
    Ascon,
}

impl StreamKeyType {
    /// Every algorithm, in ordinal order.
    pub const ALL: [Self; 12] = [
        Self::Salsa20,
        Self::Hc,
        Self::ChaCha20,
        Self::Vmpc,
        Self::Isaac,
        Self::Grain,
        Self::Rc4,
        Self::Sosemanuk,
        Self::Rabbit,
        Self::Snow3G,
        Self::Zuc,
        Self::Ascon,
    ];

    /// Position of this algorithm in declaration order.
    #[must_use]
    pub const fn ordinal(self) -> u32 {
        self as u32
    }

    /// Sub-variants of this algorithm. Empty when the algorithm has none.
    #[must_use]
    pub const fn sub_key_types(self) -> &'static [StreamSubKeyType] {
        match self {
            Self::Salsa20 => &[StreamSubKeyType::Salsa20, StreamSubKeyType::XSalsa20],
            Self::ChaCha20 => &[
                StreamSubKeyType::ChaCha20,
                StreamSubKeyType::ChaCha7539,
                StreamSubKeyType::XChaCha20,
            ],
            Self::Vmpc => &[StreamSubKeyType::Vmpc, StreamSubKeyType::VmpcKsa3],
            Self::Hc
            | Self::Isaac
            | Self::Grain
            | Self::Rc4
            | Self::Sosemanuk
            | Self::Rabbit
            | Self::Snow3G
            | Self::Zuc
            | Self::Ascon => &[],
        }
    }

    /// Whether `key_length` is legal for this algorithm.
    #[must_use]
    pub const fn supports_key_length(self, key_length: Length) -> bool {
        match self {
            Self::Grain | Self::Rabbit | Self::Snow3G | Self::Ascon => {
                matches!(key_length, Length::Len128)
            }
            Self::Salsa20
            | Self::Hc
            | Self::ChaCha20
            | Self::Vmpc
            | Self::Isaac
            | Self::Rc4
            | Self::Sosemanuk
            | Self::Zuc => matches!(key_length, Length::Len128 | Length::Len256),
        }
    }
}

/// Sub-variants of stream cipher algorithms.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum StreamSubKeyType {
    Salsa20,
    XSalsa20,
    ChaCha20,
    /// RFC 7539 ChaCha20 with a 96-bit nonce.
    ChaCha7539,
    XChaCha20,
    Vmpc,
    VmpcKsa3,
}

impl StreamSubKeyType {
    /// Position of this sub-variant in declaration order.
    #[must_use]
    pub const fn ordinal(self) -> u32 {
        self as u32
    }

    /// Whether the sub-variant only exists with 256-bit keys.
    const fn needs_256_bit_key(self) -> bool {
        matches!(self, Self::XSalsa20 | Self::ChaCha7539 | Self::XChaCha20)
    }
}

/// Specification of a stream cipher key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StreamKeySpec {
    key_type: StreamKeyType,
    key_length: Length,
    sub_key_type: Option<StreamSubKeyType>,
}

impl StreamKeySpec {
    /// Create a spec. Validity is checked separately by [`Self::is_valid`].
    #[must_use]
    pub const fn new(
        key_type: StreamKeyType,
        key_length: Length,
        sub_key_type: Option<StreamSubKeyType>,
    ) -> Self {
        Self {
            key_type,
            key_length,
            sub_key_type,
        }
    }

    /// RFC 7539 ChaCha20 with a 256-bit key.
    #[must_use]
    pub const fn chacha7539() -> Self {
        Self::new(
            StreamKeyType::ChaCha20,
            Length::Len256,
            Some(StreamSubKeyType::ChaCha7539),
        )
    }

    #[must_use]
    pub const fn key_type(&self) -> StreamKeyType {
        self.key_type
    }

    #[must_use]
    pub const fn key_length(&self) -> Length {
        self.key_length
    }

    #[must_use]
    pub const fn sub_key_type(&self) -> Option<StreamSubKeyType> {
        self.sub_key_type
    }

    /// Whether the algorithm/key length/sub-variant combination is legal.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        if !self.key_type.supports_key_length(self.key_length) {
            return false;
        }
        let subs = self.key_type.sub_key_types();
        match self.sub_key_type {
            None => subs.is_empty(),
            Some(sub) => {
                subs.contains(&sub)
                    && (!sub.needs_256_bit_key() || self.key_length == Length::Len256)
            }
        }
    }

    /// IV length in bytes for this stream cipher.
    ///
    /// HC and ZUC size their IV from `key_length`.
    #[must_use]
    pub const fn iv_length(&self, key_length: Length) -> usize {
        match self.key_type {
            StreamKeyType::Salsa20 => match self.sub_key_type {
                Some(StreamSubKeyType::XSalsa20) => 24,
                _ => 8,
            },
            StreamKeyType::ChaCha20 => match self.sub_key_type {
                Some(StreamSubKeyType::ChaCha7539) => 12,
                Some(StreamSubKeyType::XChaCha20) => 24,
                _ => 8,
            },
            StreamKeyType::Hc => key_length.bytes(),
            StreamKeyType::Zuc => match key_length {
                Length::Len256 => 25,
                _ => 16,
            },
            StreamKeyType::Vmpc
            | StreamKeyType::Sosemanuk
            | StreamKeyType::Snow3G
            | StreamKeyType::Ascon => 16,
            StreamKeyType::Grain => 12,
            StreamKeyType::Rabbit => 8,
            StreamKeyType::Isaac | StreamKeyType::Rc4 => 0,
        }
    }
}

impl fmt::Display for StreamKeySpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.sub_key_type {
            Some(sub) => write!(f, "{sub:?}-{}", self.key_length),
            None => write!(f, "{:?}-{}", self.key_type, self.key_length),
        }
    }
}

// ---------------------------------------------------------------------------
// KeySpec
// ---------------------------------------------------------------------------

/// Any key specification handled by the factory.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeySpec {
    Sym(SymKeySpec),
    Stream(StreamKeySpec),
}

impl KeySpec {
    #[must_use]
    pub const fn key_length(&self) -> Length {
        match self {
            Self::Sym(spec) => spec.key_length(),
            Self::Stream(spec) => spec.key_length(),
        }
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        match self {
            Self::Sym(spec) => spec.is_valid(),
            Self::Stream(spec) => spec.is_valid(),
        }
    }
}

impl From<SymKeySpec> for KeySpec {
    fn from(spec: SymKeySpec) -> Self {
        Self::Sym(spec)
    }
}

impl From<StreamKeySpec> for KeySpec {
    fn from(spec: StreamKeySpec) -> Self {
        Self::Stream(spec)
    }
}

impl fmt::Display for KeySpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sym(spec) => spec.fmt(f),
            Self::Stream(spec) => spec.fmt(f),
        }
    }
}
