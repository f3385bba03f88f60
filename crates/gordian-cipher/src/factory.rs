//! Spec validation against a primitive provider, and the cipher factory that
//! owns the provider, the validator and the identifier registry.
//!
//! This module provides:
//! - [`SpecValidator`] — accepts or rejects key, cipher and PBE specs, and enumerates supported ones
//! - [`CipherFactory`] — the entry point: identifiers, key generators, ciphers, key wrappers, PBE

use crate::cipher::Cipher;
use crate::error::CipherError;
use crate::identifier::AlgorithmIdentifier;
use crate::key::{Key, KeyGenerator};
use crate::length::Length;
use crate::params::derive_key_and_iv;
use crate::provider::PrimitiveProvider;
use crate::registry::AlgorithmRegistry;
use crate::spec::{
    CipherMode, CipherSpec, KeySpec, Padding, PbeCipherSpec, PbeSpec, StreamCipherSpec,
    StreamKeySpec, StreamKeyType, SymCipherSpec, SymKeySpec, SymKeyType, STREAM_KEY_LENGTHS,
    SYM_KEY_LENGTHS,
};
use crate::wrap::KeyWrapper;
use secrecy::SecretString;
use std::fmt;
use std::sync::Arc;

// ---------------------------------------------------------------------------
// Validator
// ---------------------------------------------------------------------------

/// Decides which specs the provider can serve.
#[derive(Clone)]
pub struct SpecValidator {
    provider: Arc<dyn PrimitiveProvider>,
}

impl SpecValidator {
    #[must_use]
    pub fn new(provider: Arc<dyn PrimitiveProvider>) -> Self {
        Self { provider }
    }

    #[must_use]
    pub fn valid_sym_key_spec(&self, spec: &SymKeySpec) -> bool {
        spec.is_valid() && self.provider.sym_key_types().contains(&spec.key_type())
    }

    #[must_use]
    pub fn valid_stream_key_spec(&self, spec: &StreamKeySpec) -> bool {
        spec.is_valid() && self.provider.stream_key_types().contains(&spec.key_type())
    }

    #[must_use]
    pub fn valid_key_spec(&self, spec: &KeySpec) -> bool {
        match spec {
            KeySpec::Sym(s) => self.valid_sym_key_spec(s),
            KeySpec::Stream(s) => self.valid_stream_key_spec(s),
        }
    }

    /// Whether a block cipher spec is usable.
    ///
    /// The key spec must be valid and supported, the mode supported for the
    /// algorithm and compatible with the block length, and the padding
    /// `None` unless the mode pads. RC5-64 never runs in an AEAD mode.
    #[must_use]
    pub fn valid_sym_cipher_spec(&self, spec: &SymCipherSpec) -> bool {
        let key = spec.key_spec();
        let mode = spec.mode();
        if !self.valid_sym_key_spec(key) || !self.provider.supports_mode(key.key_type(), mode) {
            return false;
        }
        if key.key_type() == SymKeyType::Rc5 && key.block_length() == Length::Len128 && mode.is_aad()
        {
            return false;
        }
        let block_bits = key.block_length().bits();
        if block_bits < Length::Len128.bits() && !mode.allows_short_block() {
            return false;
        }
        if block_bits != Length::Len128.bits() && mode.needs_standard_block() {
            return false;
        }
        mode.has_padding() || spec.padding() == Padding::None
    }

    #[must_use]
    pub fn valid_stream_cipher_spec(&self, spec: &StreamCipherSpec) -> bool {
        self.valid_stream_key_spec(spec.key_spec())
    }

    #[must_use]
    pub fn valid_cipher_spec(&self, spec: &CipherSpec) -> bool {
        match spec {
            CipherSpec::Sym(s) => self.valid_sym_cipher_spec(s),
            CipherSpec::Stream(s) => self.valid_stream_cipher_spec(s),
        }
    }

    /// KDF parameters valid, SHA-512 for the digest families, cipher valid.
    #[must_use]
    pub fn valid_pbe_cipher_spec(&self, spec: &PbeCipherSpec) -> bool {
        spec.has_valid_kdf() && self.valid_cipher_spec(&spec.cipher_spec)
    }

    /// # Errors
    ///
    /// Returns `CipherError::InvalidSpecification` if the spec is not valid.
    pub fn check_key_spec(&self, spec: &KeySpec) -> Result<(), CipherError> {
        if self.valid_key_spec(spec) {
            Ok(())
        } else {
            Err(CipherError::InvalidSpecification(format!(
                "key spec {spec} is not supported"
            )))
        }
    }

    /// # Errors
    ///
    /// Returns `CipherError::InvalidSpecification` if the spec is not valid.
    pub fn check_cipher_spec(&self, spec: &CipherSpec) -> Result<(), CipherError> {
        if self.valid_cipher_spec(spec) {
            Ok(())
        } else {
            Err(CipherError::InvalidSpecification(format!(
                "cipher spec {spec} is not supported"
            )))
        }
    }

    /// # Errors
    ///
    /// Returns `CipherError::InvalidSpecification` if the spec is not valid.
    pub fn check_pbe_cipher_spec(&self, spec: &PbeCipherSpec) -> Result<(), CipherError> {
        if self.valid_pbe_cipher_spec(spec) {
            Ok(())
        } else {
            Err(CipherError::InvalidSpecification(format!(
                "PBE spec {} with {} is not supported",
                spec.pbe_spec, spec.cipher_spec
            )))
        }
    }

    /// Every supported symmetric key spec, in ordinal order.
    #[must_use]
    pub fn list_supported_sym_key_specs(&self) -> Vec<SymKeySpec> {
        SymKeyType::ALL
            .into_iter()
            .flat_map(|key_type| {
                key_type.block_lengths().iter().flat_map(move |&block| {
                    SYM_KEY_LENGTHS
                        .into_iter()
                        .map(move |key_len| SymKeySpec::new(key_type, block, key_len))
                })
            })
            .filter(|spec| self.valid_sym_key_spec(spec))
            .collect()
    }

    /// Every supported cipher spec over `key_spec`, AEAD modes only when
    /// `aad` is set, non-AEAD modes only otherwise.
    #[must_use]
    pub fn list_supported_sym_cipher_specs(
        &self,
        key_spec: &SymKeySpec,
        aad: bool,
    ) -> Vec<SymCipherSpec> {
        let key_spec = *key_spec;
        CipherMode::ALL
            .into_iter()
            .filter(|mode| mode.is_aad() == aad)
            .flat_map(|mode| {
                let paddings: &[Padding] = if mode.has_padding() {
                    &Padding::ALL
                } else {
                    &[Padding::None]
                };
                paddings
                    .iter()
                    .map(move |&padding| SymCipherSpec::new(key_spec, mode, padding))
            })
            .filter(|spec| self.valid_sym_cipher_spec(spec))
            .collect()
    }

    /// Every supported stream key spec, in ordinal order.
    #[must_use]
    pub fn list_supported_stream_key_specs(&self) -> Vec<StreamKeySpec> {
        let mut specs = Vec::new();
        for key_type in StreamKeyType::ALL {
            for key_len in STREAM_KEY_LENGTHS {
                let subs = key_type.sub_key_types();
                if subs.is_empty() {
                    specs.push(StreamKeySpec::new(key_type, key_len, None));
                } else {
                    specs.extend(
                        subs.iter()
                            .map(|&sub| StreamKeySpec::new(key_type, key_len, Some(sub))),
                    );
                }
            }
        }
        specs.retain(|spec| self.valid_stream_key_spec(spec));
        specs
    }

    #[must_use]
    pub fn list_supported_stream_cipher_specs(&self) -> Vec<StreamCipherSpec> {
        self.list_supported_stream_key_specs()
            .into_iter()
            .map(StreamCipherSpec::new)
            .collect()
    }
}

impl fmt::Debug for SpecValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpecValidator")
            .field("sym_key_types", &self.provider.sym_key_types())
            .field("stream_key_types", &self.provider.stream_key_types())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Factory
// ---------------------------------------------------------------------------

/// Owns a provider, its validator and the identifier registry built from it.
///
/// Immutable after construction and safe to share across threads.
pub struct CipherFactory {
    provider: Arc<dyn PrimitiveProvider>,
    validator: SpecValidator,
    registry: AlgorithmRegistry,
}

impl CipherFactory {
    /// Validate against `provider` and build the registry.
    ///
    /// # Errors
    ///
    /// Returns `CipherError::Logic` if the registry cannot be built as a bijection.
    pub fn new(provider: Arc<dyn PrimitiveProvider>) -> Result<Self, CipherError> {
        let validator = SpecValidator::new(Arc::clone(&provider));
        let registry = AlgorithmRegistry::build(&validator)?;
        Ok(Self {
            provider,
            validator,
            registry,
        })
    }

    /// Validation and listing of supported specs.
    #[must_use]
    pub const fn validator(&self) -> &SpecValidator {
        &self.validator
    }

    #[must_use]
    pub const fn registry(&self) -> &AlgorithmRegistry {
        &self.registry
    }

    // ---- Identifiers ----

    /// # Errors
    ///
    /// Returns `CipherError::UnknownIdentifier` if `id` names no supported cipher.
    pub fn resolve_cipher_spec(&self, id: &AlgorithmIdentifier) -> Result<CipherSpec, CipherError> {
        self.registry.cipher_spec(id)
    }

    #[must_use]
    pub fn cipher_identifier(&self, spec: &CipherSpec) -> Option<AlgorithmIdentifier> {
        self.registry.cipher_identifier(spec)
    }

    /// # Errors
    ///
    /// Returns `CipherError::UnknownIdentifier` if `id` names no supported key.
    pub fn resolve_key_spec(&self, id: &AlgorithmIdentifier) -> Result<KeySpec, CipherError> {
        self.registry.key_spec(id)
    }

    #[must_use]
    pub fn key_identifier(&self, spec: &KeySpec) -> Option<AlgorithmIdentifier> {
        self.registry.key_identifier(spec)
    }

    // ---- Construction ----

    /// # Errors
    ///
    /// Returns `CipherError::InvalidSpecification` for an unsupported spec.
    pub fn key_generator(&self, spec: KeySpec) -> Result<KeyGenerator, CipherError> {
        self.validator.check_key_spec(&spec)?;
        Ok(KeyGenerator::new(spec))
    }

    /// An uninitialised cipher.
    ///
    /// # Errors
    ///
    /// Returns `CipherError::InvalidSpecification` for an unsupported spec.
    pub fn create_cipher(&self, spec: CipherSpec) -> Result<Cipher, CipherError> {
        self.validator.check_cipher_spec(&spec)?;
        Ok(Cipher::new(spec, Arc::clone(&self.provider)))
    }

    /// A key wrapper running raw ECB over `key_spec`.
    ///
    /// # Errors
    ///
    /// - `CipherError::InvalidSpecification` if the raw block cipher is unsupported
    /// - `CipherError::InvalidLength` if the block is shorter than 64 bits
    pub fn create_key_wrapper(&self, key_spec: &SymKeySpec) -> Result<KeyWrapper<'_>, CipherError> {
        KeyWrapper::new(self, SymCipherSpec::ecb(*key_spec, Padding::None))
    }

    /// Derive the key and IV for `cipher_spec` from a password and salt.
    ///
    /// # Errors
    ///
    /// `CipherError::InvalidSpecification` for an unsupported combination,
    /// otherwise as [`crate::kdf::derive`].
    pub fn derive_from_password(
        &self,
        pbe_spec: &PbeSpec,
        password: &SecretString,
        salt: &[u8],
        cipher_spec: &CipherSpec,
    ) -> Result<(Key, Option<Vec<u8>>), CipherError> {
        self.validator.check_pbe_cipher_spec(&PbeCipherSpec::new(*pbe_spec, *cipher_spec))?;
        derive_key_and_iv(cipher_spec, pbe_spec, password, salt)
    }
}

impl fmt::Debug for CipherFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CipherFactory")
            .field("validator", &self.validator)
            .field("keys", &self.registry.key_count())
            .field("ciphers", &self.registry.cipher_count())
            .finish_non_exhaustive()
    }
}
