//! Primitive providers: the seam between spec handling and the library that
//! actually implements block ciphers.
//!
//! This module provides:
//! - [`PrimitiveProvider`] — which algorithms and modes exist, and block engines for them
//! - [`BlockEngine`] — a keyed single-block permutation
//! - [`RustCryptoProvider`] — AES from the `aes` crate
//! - [`CapabilityTable`] — a configurable provider for embedding wider primitive sets
//! - [`standard_mode_support`] — the reference algorithm/mode compatibility table

use crate::error::CipherError;
use crate::length::Length;
use crate::spec::{CipherMode, StreamKeyType, SymKeySpec, SymKeyType};
use aes::cipher::generic_array::GenericArray;
use aes::cipher::{BlockDecrypt, BlockEncrypt, KeyInit};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// A keyed block permutation.
pub trait BlockEngine: Send + Sync {
    /// Block length in bytes.
    fn block_len(&self) -> usize;

    /// Encrypt exactly one block in place.
    ///
    /// # Errors
    ///
    /// Returns `CipherError::InvalidLength` if `block` is not one block long.
    fn encrypt_block(&self, block: &mut [u8]) -> Result<(), CipherError>;

    /// Decrypt exactly one block in place.
    ///
    /// # Errors
    ///
    /// Returns `CipherError::InvalidLength` if `block` is not one block long.
    fn decrypt_block(&self, block: &mut [u8]) -> Result<(), CipherError>;
}

/// Capability and engine source for the cipher factory.
pub trait PrimitiveProvider: Send + Sync {
    /// Block cipher algorithms available.
    fn sym_key_types(&self) -> &[SymKeyType];

    /// Stream cipher algorithms available.
    fn stream_key_types(&self) -> &[StreamKeyType];

    /// Whether `mode` can be run over `key_type`.
    fn supports_mode(&self, key_type: SymKeyType, mode: CipherMode) -> bool;

    /// Key a block engine for `spec`.
    ///
    /// # Errors
    ///
    /// Returns `CipherError::Primitive` if the provider has no engine for the
    /// spec, `CipherError::InvalidLength` if `key` has the wrong size.
    fn block_engine(&self, spec: &SymKeySpec, key: &[u8])
        -> Result<Box<dyn BlockEngine>, CipherError>;
}

/// Reference compatibility between block algorithms and modes.
///
/// Kalyna modes need Kalyna, GOST 28147 modes need GOST, GOST R 34.13 modes
/// need GOST or Kuznyechik and GCM-SIV needs AES. Every other mode is
/// generic.
#[must_use]
pub const fn standard_mode_support(key_type: SymKeyType, mode: CipherMode) -> bool {
    match mode {
        CipherMode::Kctr | CipherMode::Kccm | CipherMode::Kgcm => {
            matches!(key_type, SymKeyType::Kalyna)
        }
        CipherMode::Gcfb | CipherMode::Gofb => matches!(key_type, SymKeyType::Gost),
        CipherMode::G3413Cbc | CipherMode::G3413Cfb | CipherMode::G3413Ofb | CipherMode::G3413Ctr => {
            matches!(key_type, SymKeyType::Gost | SymKeyType::Kuznyechik)
        }
        CipherMode::GcmSiv => matches!(key_type, SymKeyType::Aes),
        CipherMode::Ecb
        | CipherMode::Cbc
        | CipherMode::Sic
        | CipherMode::Cfb
        | CipherMode::Cfb8
        | CipherMode::Ofb
        | CipherMode::Ofb8
        | CipherMode::Eax
        | CipherMode::Ccm
        | CipherMode::Gcm
        | CipherMode::Ocb => true,
    }
}

fn check_key_len(spec: &SymKeySpec, key: &[u8]) -> Result<(), CipherError> {
    let expected = spec.key_length().bytes();
    if key.len() == expected {
        Ok(())
    } else {
        Err(CipherError::InvalidLength(format!(
            "{spec} needs a {expected}-byte key, got {}",
            key.len()
        )))
    }
}

// ---------------------------------------------------------------------------
// RustCrypto AES
// ---------------------------------------------------------------------------

/// AES block engines from the RustCrypto `aes` crate.
#[derive(Clone, Copy, Debug, Default)]
pub struct RustCryptoProvider;

const AES_ONLY: [SymKeyType; 1] = [SymKeyType::Aes];

impl PrimitiveProvider for RustCryptoProvider {
    fn sym_key_types(&self) -> &[SymKeyType] {
        &AES_ONLY
    }

    fn stream_key_types(&self) -> &[StreamKeyType] {
        &[]
    }

    fn supports_mode(&self, key_type: SymKeyType, mode: CipherMode) -> bool {
        key_type == SymKeyType::Aes && standard_mode_support(key_type, mode)
    }

    fn block_engine(
        &self,
        spec: &SymKeySpec,
        key: &[u8],
    ) -> Result<Box<dyn BlockEngine>, CipherError> {
        if spec.key_type() != SymKeyType::Aes || spec.block_length() != Length::Len128 {
            return Err(CipherError::Primitive(format!("no block engine for {spec}")));
        }
        check_key_len(spec, key)?;
        let engine = match spec.key_length() {
            Length::Len128 => AesEngine::Aes128(new_aes(key)?),
            Length::Len192 => AesEngine::Aes192(new_aes(key)?),
            Length::Len256 => AesEngine::Aes256(new_aes(key)?),
            other => {
                return Err(CipherError::Primitive(format!(
                    "AES has no {other}-bit key variant"
                )))
            }
        };
        Ok(Box::new(engine))
    }
}

fn new_aes<C: KeyInit>(key: &[u8]) -> Result<C, CipherError> {
    C::new_from_slice(key).map_err(|e| CipherError::InvalidLength(format!("AES key: {e}")))
}

enum AesEngine {
    Aes128(aes::Aes128),
    Aes192(aes::Aes192),
    Aes256(aes::Aes256),
}

const AES_BLOCK_LEN: usize = 16;

fn check_block(block: &[u8], block_len: usize) -> Result<(), CipherError> {
    if block.len() == block_len {
        Ok(())
    } else {
        Err(CipherError::InvalidLength(format!(
            "expected a {block_len}-byte block, got {}",
            block.len()
        )))
    }
}

impl BlockEngine for AesEngine {
    fn block_len(&self) -> usize {
        AES_BLOCK_LEN
    }

    fn encrypt_block(&self, block: &mut [u8]) -> Result<(), CipherError> {
        check_block(block, AES_BLOCK_LEN)?;
        let block = GenericArray::from_mut_slice(block);
        match self {
            Self::Aes128(c) => c.encrypt_block(block),
            Self::Aes192(c) => c.encrypt_block(block),
            Self::Aes256(c) => c.encrypt_block(block),
        }
        Ok(())
    }

    fn decrypt_block(&self, block: &mut [u8]) -> Result<(), CipherError> {
        check_block(block, AES_BLOCK_LEN)?;
        let block = GenericArray::from_mut_slice(block);
        match self {
            Self::Aes128(c) => c.decrypt_block(block),
            Self::Aes192(c) => c.decrypt_block(block),
            Self::Aes256(c) => c.decrypt_block(block),
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Capability table
// ---------------------------------------------------------------------------

/// A provider whose capabilities are configured explicitly.
///
/// Mode support falls back to [`standard_mode_support`] unless overridden.
/// Block engines are delegated to an inner provider when one is attached.
#[derive(Clone, Default)]
pub struct CapabilityTable {
    sym_key_types: Vec<SymKeyType>,
    stream_key_types: Vec<StreamKeyType>,
    mode_overrides: HashMap<(SymKeyType, CipherMode), bool>,
    engines: Option<Arc<dyn PrimitiveProvider>>,
}

impl CapabilityTable {
    /// An empty table: no algorithms at all.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every block and stream algorithm, standard mode support, no engines.
    #[must_use]
    pub fn everything() -> Self {
        Self::new()
            .with_sym_key_types(SymKeyType::ALL)
            .with_stream_key_types(StreamKeyType::ALL)
    }

    #[must_use]
    pub fn with_sym_key_types(mut self, types: impl IntoIterator<Item = SymKeyType>) -> Self {
        for t in types {
            if !self.sym_key_types.contains(&t) {
                self.sym_key_types.push(t);
            }
        }
        self
    }

    #[must_use]
    pub fn with_stream_key_types(
        mut self,
        types: impl IntoIterator<Item = StreamKeyType>,
    ) -> Self {
        for t in types {
            if !self.stream_key_types.contains(&t) {
                self.stream_key_types.push(t);
            }
        }
        self
    }

    /// Force `mode` on or off for `key_type`.
    #[must_use]
    pub fn with_mode(mut self, key_type: SymKeyType, mode: CipherMode, supported: bool) -> Self {
        self.mode_overrides.insert((key_type, mode), supported);
        self
    }

    /// Source block engines from `provider`.
    #[must_use]
    pub fn with_engines(mut self, provider: Arc<dyn PrimitiveProvider>) -> Self {
        self.engines = Some(provider);
        self
    }
}

impl fmt::Debug for CapabilityTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CapabilityTable")
            .field("sym_key_types", &self.sym_key_types)
            .field("stream_key_types", &self.stream_key_types)
            .field("mode_overrides", &self.mode_overrides.len())
            .field("engines", &self.engines.is_some())
            .finish()
    }
}

impl PrimitiveProvider for CapabilityTable {
    fn sym_key_types(&self) -> &[SymKeyType] {
        &self.sym_key_types
    }

    fn stream_key_types(&self) -> &[StreamKeyType] {
        &self.stream_key_types
    }

    fn supports_mode(&self, key_type: SymKeyType, mode: CipherMode) -> bool {
        self.mode_overrides
            .get(&(key_type, mode))
            .copied()
            .unwrap_or_else(|| standard_mode_support(key_type, mode))
    }

    fn block_engine(
        &self,
        spec: &SymKeySpec,
        key: &[u8],
    ) -> Result<Box<dyn BlockEngine>, CipherError> {
        if !self.sym_key_types.contains(&spec.key_type()) {
            return Err(CipherError::Primitive(format!("{spec} is not in the capability table")));
        }
        match &self.engines {
            Some(provider) => provider.block_engine(spec, key),
            None => Err(CipherError::Primitive(format!("no block engine for {spec}"))),
        }
    }
}
