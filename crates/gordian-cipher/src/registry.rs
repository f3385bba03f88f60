//! The algorithm identifier registry: a bijection between every spec the
//! provider supports and its [`AlgorithmIdentifier`].
//!
//! Built once, eagerly, by [`crate::factory::CipherFactory::new`] and never
//! modified afterwards. Lookups never construct identifiers on the fly, so
//! an identifier that resolves is guaranteed to name a supported spec.

use crate::error::CipherError;
use crate::factory::SpecValidator;
use crate::identifier::AlgorithmIdentifier;
use crate::spec::{CipherSpec, KeySpec, StreamCipherSpec};
use std::collections::HashMap;
use std::hash::Hash;

/// Two-way map between specs and identifiers.
#[derive(Debug)]
struct BiMap<S> {
    ids: HashMap<S, AlgorithmIdentifier>,
    specs: HashMap<AlgorithmIdentifier, S>,
}

impl<S> Default for BiMap<S> {
    fn default() -> Self {
        Self {
            ids: HashMap::new(),
            specs: HashMap::new(),
        }
    }
}

impl<S: Copy + Eq + Hash + std::fmt::Display> BiMap<S> {
    fn insert(&mut self, spec: S, id: AlgorithmIdentifier) -> Result<(), CipherError> {
        if let Some(existing) = self.specs.get(&id) {
            return Err(CipherError::Logic(format!(
                "identifier {id} assigned to both {existing} and {spec}"
            )));
        }
        if self.ids.contains_key(&spec) {
            return Err(CipherError::Logic(format!("{spec} registered twice")));
        }
        self.ids.insert(spec, id.clone());
        self.specs.insert(id, spec);
        Ok(())
    }

    fn lookup(&self, id: &AlgorithmIdentifier) -> Result<S, CipherError> {
        self.specs
            .get(id)
            .copied()
            .ok_or_else(|| CipherError::UnknownIdentifier(id.to_string()))
    }
}

/// Immutable spec/identifier registry.
#[derive(Debug, Default)]
pub struct AlgorithmRegistry {
    keys: BiMap<KeySpec>,
    ciphers: BiMap<CipherSpec>,
}

impl AlgorithmRegistry {
    /// Enumerate every spec `validator` accepts and assign identifiers.
    ///
    /// Symmetric key specs come first, each followed by its non-AEAD then
    /// AEAD cipher specs, then stream specs; all in ordinal order.
    ///
    /// # Errors
    ///
    /// Returns `CipherError::Logic` if two specs map to the same identifier.
    pub fn build(validator: &SpecValidator) -> Result<Self, CipherError> {
        let mut registry = Self::default();
        for key_spec in validator.list_supported_sym_key_specs() {
            registry.add_key(KeySpec::Sym(key_spec))?;
            for aad in [false, true] {
                for cipher_spec in validator.list_supported_sym_cipher_specs(&key_spec, aad) {
                    registry.add_cipher(CipherSpec::Sym(cipher_spec))?;
                }
            }
        }
        for key_spec in validator.list_supported_stream_key_specs() {
            registry.add_key(KeySpec::Stream(key_spec))?;
            registry.add_cipher(CipherSpec::Stream(StreamCipherSpec::new(key_spec)))?;
        }
        tracing::debug!(
            keys = registry.key_count(),
            ciphers = registry.cipher_count(),
            "algorithm registry built"
        );
        Ok(registry)
    }

    fn add_key(&mut self, spec: KeySpec) -> Result<(), CipherError> {
        self.keys.insert(spec, AlgorithmIdentifier::for_key_spec(&spec))
    }

    fn add_cipher(&mut self, spec: CipherSpec) -> Result<(), CipherError> {
        self.ciphers
            .insert(spec, AlgorithmIdentifier::for_cipher_spec(&spec))
    }

    /// Identifier of a registered key spec.
    #[must_use]
    pub fn key_identifier(&self, spec: &KeySpec) -> Option<AlgorithmIdentifier> {
        self.keys.ids.get(spec).cloned()
    }

    /// Identifier of a registered cipher spec.
    #[must_use]
    pub fn cipher_identifier(&self, spec: &CipherSpec) -> Option<AlgorithmIdentifier> {
        self.ciphers.ids.get(spec).cloned()
    }

    /// # Errors
    ///
    /// Returns `CipherError::UnknownIdentifier` if `id` names no registered key spec.
    pub fn key_spec(&self, id: &AlgorithmIdentifier) -> Result<KeySpec, CipherError> {
        self.keys.lookup(id)
    }

    /// # Errors
    ///
    /// Returns `CipherError::UnknownIdentifier` if `id` names no registered cipher spec.
    pub fn cipher_spec(&self, id: &AlgorithmIdentifier) -> Result<CipherSpec, CipherError> {
        self.ciphers.lookup(id)
    }

    #[must_use]
    pub fn key_count(&self) -> usize {
        self.keys.ids.len()
    }

    #[must_use]
    pub fn cipher_count(&self) -> usize {
        self.ciphers.ids.len()
    }

    /// Every registered key spec with its identifier, in no particular order.
    pub fn key_entries(&self) -> impl Iterator<Item = (&KeySpec, &AlgorithmIdentifier)> {
        self.keys.ids.iter()
    }

    /// Every registered cipher spec with its identifier, in no particular order.
    pub fn cipher_entries(&self) -> impl Iterator<Item = (&CipherSpec, &AlgorithmIdentifier)> {
        self.ciphers.ids.iter()
    }
}
