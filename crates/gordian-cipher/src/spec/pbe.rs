//! Password-based encryption specifications and their presets.
//!
//! This module provides:
//! - [`DigestSpec`] — digest family plus output length
//! - [`PbeSpec`] — one closed variant per KDF family, each carrying its own parameters
//! - [`PbeCipherSpec`] — a KDF paired with the cipher whose key and IV it derives
//!
//! The presets ([`PbeSpec::pbkdf2`], [`PbeSpec::scrypt`], ...) are the
//! configuration surface of the crate: they are plain serde values, so callers
//! persist whichever parameters they used next to the protected data.

use crate::length::Length;
use crate::spec::cipher::CipherSpec;
use serde::{Deserialize, Serialize};
use std::fmt;

/// PBKDF2 and PKCS#12 iteration count used by the presets.
pub const DEFAULT_ITERATIONS: u32 = 210_000;

/// scrypt CPU/memory cost (N) used by the presets.
pub const DEFAULT_SCRYPT_COST: u32 = 1 << 17;

/// scrypt block size (r) used by the presets.
pub const DEFAULT_SCRYPT_BLOCK_SIZE: u32 = 8;

/// Argon2 memory in KiB used by the presets (64 MiB).
pub const DEFAULT_ARGON2_MEMORY_KB: u32 = 65_536;

/// Argon2 pass count used by the presets.
pub const DEFAULT_ARGON2_ITERATIONS: u32 = 3;

/// Argon2 lane count used by the presets.
pub const DEFAULT_ARGON2_LANES: u32 = 4;

// ---------------------------------------------------------------------------
// Digests
// ---------------------------------------------------------------------------

/// Digest families.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DigestType {
    Sha2,
    Sha3,
    Blake2b,
    Skein,
}

/// A digest family and its output length.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DigestSpec {
    pub digest_type: DigestType,
    pub length: Length,
}

impl DigestSpec {
    #[must_use]
    pub const fn new(digest_type: DigestType, length: Length) -> Self {
        Self {
            digest_type,
            length,
        }
    }

    /// SHA-512, the only digest accepted for PBE.
    #[must_use]
    pub const fn sha2_512() -> Self {
        Self::new(DigestType::Sha2, Length::Len512)
    }

    #[must_use]
    pub const fn is_valid(&self) -> bool {
        match self.digest_type {
            DigestType::Sha2 | DigestType::Sha3 | DigestType::Blake2b => {
                matches!(self.length, Length::Len256 | Length::Len384 | Length::Len512)
            }
            DigestType::Skein => {
                matches!(self.length, Length::Len256 | Length::Len512 | Length::Len1024)
            }
        }
    }
}

impl fmt::Display for DigestSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}-{}", self.digest_type, self.length)
    }
}

// ---------------------------------------------------------------------------
// PBE specs
// ---------------------------------------------------------------------------

/// Parameters shared by the iterated-digest KDFs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DigestAndCount {
    pub digest: DigestSpec,
    pub iterations: u32,
}

/// KDF family tag of a [`PbeSpec`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PbeType {
    Pbkdf2,
    Pkcs12,
    Scrypt,
    Argon2,
}

/// A password-based key derivation function and its parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kdf", rename_all = "snake_case")]
pub enum PbeSpec {
    /// PBKDF2 with HMAC over the digest.
    Pbkdf2(DigestAndCount),
    /// PKCS#12 v1.0 appendix B derivation.
    Pkcs12(DigestAndCount),
    /// scrypt. `cost` is N and must be a power of two.
    Scrypt {
        cost: u32,
        block_size: u32,
        parallelism: u32,
    },
    /// Argon2id version 1.3.
    Argon2 {
        iterations: u32,
        lanes: u32,
        memory_kb: u32,
    },
}

impl PbeSpec {
    /// PBKDF2-HMAC-SHA512 with `iterations` rounds.
    #[must_use]
    pub const fn pbkdf2(iterations: u32) -> Self {
        Self::Pbkdf2(DigestAndCount {
            digest: DigestSpec::sha2_512(),
            iterations,
        })
    }

    /// PKCS#12 with SHA-512 and `iterations` rounds.
    #[must_use]
    pub const fn pkcs12(iterations: u32) -> Self {
        Self::Pkcs12(DigestAndCount {
            digest: DigestSpec::sha2_512(),
            iterations,
        })
    }

    #[must_use]
    pub const fn scrypt(cost: u32, block_size: u32, parallelism: u32) -> Self {
        Self::Scrypt {
            cost,
            block_size,
            parallelism,
        }
    }

    #[must_use]
    pub const fn argon2(iterations: u32, lanes: u32, memory_kb: u32) -> Self {
        Self::Argon2 {
            iterations,
            lanes,
            memory_kb,
        }
    }

    #[must_use]
    pub const fn pbe_type(&self) -> PbeType {
        match self {
            Self::Pbkdf2(_) => PbeType::Pbkdf2,
            Self::Pkcs12(_) => PbeType::Pkcs12,
            Self::Scrypt { .. } => PbeType::Scrypt,
            Self::Argon2 { .. } => PbeType::Argon2,
        }
    }

    /// Digest of the iterated-digest families, `None` for scrypt and Argon2.
    #[must_use]
    pub const fn digest(&self) -> Option<DigestSpec> {
        match self {
            Self::Pbkdf2(p) | Self::Pkcs12(p) => Some(p.digest),
            Self::Scrypt { .. } | Self::Argon2 { .. } => None,
        }
    }

    /// Whether the parameters are usable by the KDF.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        match *self {
            Self::Pbkdf2(p) | Self::Pkcs12(p) => p.iterations >= 1 && p.digest.is_valid(),
            Self::Scrypt {
                cost,
                block_size,
                parallelism,
            } => cost > 1 && cost.is_power_of_two() && block_size >= 1 && parallelism >= 1,
            Self::Argon2 {
                iterations,
                lanes,
                memory_kb,
            } => {
                iterations >= 1
                    && lanes >= 1
                    && lanes
                        .checked_mul(8)
                        .is_some_and(|min_memory| memory_kb >= min_memory)
            }
        }
    }
}

impl Default for PbeSpec {
    fn default() -> Self {
        Self::argon2(
            DEFAULT_ARGON2_ITERATIONS,
            DEFAULT_ARGON2_LANES,
            DEFAULT_ARGON2_MEMORY_KB,
        )
    }
}

impl fmt::Display for PbeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pbkdf2(p) => write!(f, "PBKDF2/{}/{}", p.digest, p.iterations),
            Self::Pkcs12(p) => write!(f, "PKCS12/{}/{}", p.digest, p.iterations),
            Self::Scrypt {
                cost,
                block_size,
                parallelism,
            } => write!(f, "scrypt/{cost}/{block_size}/{parallelism}"),
            Self::Argon2 {
                iterations,
                lanes,
                memory_kb,
            } => write!(f, "Argon2id/{iterations}/{lanes}/{memory_kb}"),
        }
    }
}

/// A KDF together with the cipher it keys.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PbeCipherSpec {
    pub pbe_spec: PbeSpec,
    pub cipher_spec: CipherSpec,
}

impl PbeCipherSpec {
    #[must_use]
    pub const fn new(pbe_spec: PbeSpec, cipher_spec: CipherSpec) -> Self {
        Self {
            pbe_spec,
            cipher_spec,
        }
    }

    /// Whether the KDF half is acceptable for PBE: valid parameters and, for
    /// the iterated-digest families, exactly SHA-512.
    ///
    /// The cipher half is checked by the factory against its provider.
    #[must_use]
    pub fn has_valid_kdf(&self) -> bool {
        self.pbe_spec.is_valid()
            && self
                .pbe_spec
                .digest()
                .map_or(true, |digest| digest == DigestSpec::sha2_512())
    }
}
