//! Cipher specifications: a key spec plus, for block ciphers, a mode and padding.

use crate::length::Length;
use crate::spec::key::{KeySpec, StreamKeySpec, SymKeySpec};
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Modes
// ---------------------------------------------------------------------------

/// Block cipher modes of operation.
///
/// Declaration order feeds the identifier encoding.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CipherMode {
    Ecb,
    Cbc,
    /// Segmented integer counter (CTR).
    Sic,
    Cfb,
    Cfb8,
    /// GOST 28147 CFB.
    Gcfb,
    Ofb,
    Ofb8,
    /// GOST 28147 OFB.
    Gofb,
    /// Kalyna (DSTU 7624) counter mode.
    Kctr,
    /// Kalyna CCM.
    Kccm,
    /// Kalyna GCM.
    Kgcm,
    /// GOST R 34.13 CBC.
    G3413Cbc,
    /// GOST R 34.13 CFB.
    G3413Cfb,
    /// GOST R 34.13 OFB.
    G3413Ofb,
    /// GOST R 34.13 CTR.
    G3413Ctr,
    Eax,
    Ccm,
    Gcm,
    Ocb,
    GcmSiv,
}

impl CipherMode {
    /// Every mode, in ordinal order.
    pub const ALL: [Self; 21] = [
        Self::Ecb,
        Self::Cbc,
        Self::Sic,
        Self::Cfb,
        Self::Cfb8,
        Self::Gcfb,
        Self::Ofb,
        Self::Ofb8,
        Self::Gofb,
        Self::Kctr,
        Self::Kccm,
        Self::Kgcm,
        Self::G3413Cbc,
        Self::G3413Cfb,
        Self::G3413Ofb,
        Self::G3413Ctr,
        Self::Eax,
        Self::Ccm,
        Self::Gcm,
        Self::Ocb,
        Self::GcmSiv,
    ];

    /// Position of this mode in declaration order.
    #[must_use]
    pub const fn ordinal(self) -> u32 {
        self as u32
    }

    /// Whether the mode works on whole blocks and therefore takes a padding.
    #[must_use]
    pub const fn has_padding(self) -> bool {
        matches!(self, Self::Ecb | Self::Cbc | Self::G3413Cbc)
    }

    /// Whether the mode is an AEAD mode accepting associated data.
    #[must_use]
    pub const fn is_aad(self) -> bool {
        matches!(
            self,
            Self::Kccm | Self::Kgcm | Self::Eax | Self::Ccm | Self::Gcm | Self::Ocb | Self::GcmSiv
        )
    }

    /// Whether the mode is defined for blocks shorter than 128 bits.
    #[must_use]
    pub const fn allows_short_block(self) -> bool {
        matches!(
            self,
            Self::Ecb
                | Self::Cbc
                | Self::Sic
                | Self::Cfb
                | Self::Cfb8
                | Self::Gcfb
                | Self::Ofb
                | Self::Ofb8
                | Self::Gofb
                | Self::G3413Cbc
                | Self::G3413Cfb
                | Self::G3413Ofb
                | Self::G3413Ctr
                | Self::Eax
        )
    }

    /// Whether the mode is only defined for exactly 128-bit blocks.
    #[must_use]
    pub const fn needs_standard_block(self) -> bool {
        matches!(self, Self::Ccm | Self::Gcm | Self::Ocb | Self::GcmSiv)
    }

    /// Whether the mode runs without an IV.
    #[must_use]
    pub const fn needs_no_iv(self) -> bool {
        matches!(self, Self::Ecb)
    }
}

/// Block padding schemes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Padding {
    None,
    /// Ciphertext stealing.
    Cts,
    X923,
    Iso7816d4,
    Iso10126d2,
    Pkcs7,
    /// Trailing bit complement.
    Tbc,
}

impl Padding {
    /// Every padding, in ordinal order.
    pub const ALL: [Self; 7] = [
        Self::None,
        Self::Cts,
        Self::X923,
        Self::Iso7816d4,
        Self::Iso10126d2,
        Self::Pkcs7,
        Self::Tbc,
    ];

    /// Position of this padding in declaration order.
    #[must_use]
    pub const fn ordinal(self) -> u32 {
        self as u32
    }
}

// ---------------------------------------------------------------------------
// Cipher specs
// ---------------------------------------------------------------------------

/// A block cipher: key spec, mode and padding.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SymCipherSpec {
    key_spec: SymKeySpec,
    mode: CipherMode,
    padding: Padding,
}

impl SymCipherSpec {
    #[must_use]
    pub const fn new(key_spec: SymKeySpec, mode: CipherMode, padding: Padding) -> Self {
        Self {
            key_spec,
            mode,
            padding,
        }
    }

    /// ECB with the given padding. `Padding::None` gives the raw block cipher.
    #[must_use]
    pub const fn ecb(key_spec: SymKeySpec, padding: Padding) -> Self {
        Self::new(key_spec, CipherMode::Ecb, padding)
    }

    #[must_use]
    pub const fn cbc(key_spec: SymKeySpec, padding: Padding) -> Self {
        Self::new(key_spec, CipherMode::Cbc, padding)
    }

    #[must_use]
    pub const fn sic(key_spec: SymKeySpec) -> Self {
        Self::new(key_spec, CipherMode::Sic, Padding::None)
    }

    #[must_use]
    pub const fn gcm(key_spec: SymKeySpec) -> Self {
        Self::new(key_spec, CipherMode::Gcm, Padding::None)
    }

    #[must_use]
    pub const fn key_spec(&self) -> &SymKeySpec {
        &self.key_spec
    }

    #[must_use]
    pub const fn mode(&self) -> CipherMode {
        self.mode
    }

    #[must_use]
    pub const fn padding(&self) -> Padding {
        self.padding
    }

    /// IV length in bytes: none for ECB, half a block for GOST R 34.13 CTR,
    /// one block otherwise.
    #[must_use]
    pub const fn iv_length(&self) -> usize {
        let block = self.key_spec.block_length().bytes();
        match self.mode {
            CipherMode::Ecb => 0,
            CipherMode::G3413Ctr => block / 2,
            _ => block,
        }
    }
}

impl fmt::Display for SymCipherSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.mode.has_padding() {
            write!(f, "{}/{:?}/{:?}", self.key_spec, self.mode, self.padding)
        } else {
            write!(f, "{}/{:?}", self.key_spec, self.mode)
        }
    }
}

/// A stream cipher: the key spec alone.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StreamCipherSpec {
    key_spec: StreamKeySpec,
}

impl StreamCipherSpec {
    #[must_use]
    pub const fn new(key_spec: StreamKeySpec) -> Self {
        Self { key_spec }
    }

    #[must_use]
    pub const fn key_spec(&self) -> &StreamKeySpec {
        &self.key_spec
    }
}

impl fmt::Display for StreamCipherSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.key_spec.fmt(f)
    }
}

/// Any cipher specification handled by the factory.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CipherSpec {
    Sym(SymCipherSpec),
    Stream(StreamCipherSpec),
}

impl CipherSpec {
    /// The key spec a key must carry to be used with this cipher.
    #[must_use]
    pub const fn key_spec(&self) -> KeySpec {
        match self {
            Self::Sym(spec) => KeySpec::Sym(spec.key_spec),
            Self::Stream(spec) => KeySpec::Stream(spec.key_spec),
        }
    }

    /// IV length in bytes.
    ///
    /// `key_length` sizes the IV of stream ciphers whose IV depends on the
    /// key; 128 bits is assumed when it is not known.
    #[must_use]
    pub const fn iv_length(&self, key_length: Option<Length>) -> usize {
        match self {
            Self::Sym(spec) => spec.iv_length(),
            Self::Stream(spec) => {
                let key_length = match key_length {
                    Some(len) => len,
                    None => Length::Len128,
                };
                spec.key_spec.iv_length(key_length)
            }
        }
    }

    /// Whether the cipher accepts associated data.
    #[must_use]
    pub const fn is_aad(&self) -> bool {
        match self {
            Self::Sym(spec) => spec.mode.is_aad(),
            Self::Stream(_) => false,
        }
    }
}

impl From<SymCipherSpec> for CipherSpec {
    fn from(spec: SymCipherSpec) -> Self {
        Self::Sym(spec)
    }
}

impl From<StreamCipherSpec> for CipherSpec {
    fn from(spec: StreamCipherSpec) -> Self {
        Self::Stream(spec)
    }
}

impl fmt::Display for CipherSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sym(spec) => spec.fmt(f),
            Self::Stream(spec) => spec.fmt(f),
        }
    }
}
