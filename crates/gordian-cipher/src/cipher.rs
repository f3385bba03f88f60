//! Cipher instances: a spec plus the parameters it was last initialised with.
//!
//! Stream processing and the padded/AEAD modes belong to the primitive
//! library. A [`Cipher`] runs blocks itself only for raw ECB, which is all
//! the key wrapper needs.

use crate::error::CipherError;
use crate::params::{CipherParameters, ParameterResolver, ResolvedParameters};
use crate::provider::{BlockEngine, PrimitiveProvider};
use crate::spec::{CipherMode, CipherSpec, PbeSpec};
use std::fmt;
use std::sync::Arc;

struct CipherState {
    encrypting: bool,
    params: ResolvedParameters,
    engine: Option<Box<dyn BlockEngine>>,
}

/// A cipher of one spec, initialised for one direction at a time.
pub struct Cipher {
    spec: CipherSpec,
    provider: Arc<dyn PrimitiveProvider>,
    state: Option<CipherState>,
}

impl Cipher {
    pub(crate) fn new(spec: CipherSpec, provider: Arc<dyn PrimitiveProvider>) -> Self {
        Self {
            spec,
            provider,
            state: None,
        }
    }

    /// Initialise for encryption, replacing any earlier parameters.
    ///
    /// # Errors
    ///
    /// Fails as [`ParameterResolver::resolve`] does, or with
    /// `CipherError::Primitive` if no block engine exists for an ECB spec.
    /// The cipher is left uninitialised on error.
    pub fn init_for_encrypt(&mut self, params: CipherParameters) -> Result<(), CipherError> {
        self.init(true, params)
    }

    /// Initialise for decryption, replacing any earlier parameters.
    ///
    /// # Errors
    ///
    /// Same as [`Self::init_for_encrypt`].
    pub fn init_for_decrypt(&mut self, params: CipherParameters) -> Result<(), CipherError> {
        self.init(false, params)
    }

    fn init(&mut self, encrypting: bool, params: CipherParameters) -> Result<(), CipherError> {
        self.state = None;
        let params = ParameterResolver::resolve(&self.spec, params)?;
        let engine = match &self.spec {
            CipherSpec::Sym(sym) if sym.mode() == CipherMode::Ecb => Some(
                self.provider
                    .block_engine(sym.key_spec(), params.key.expose())?,
            ),
            CipherSpec::Sym(_) | CipherSpec::Stream(_) => None,
        };
        self.state = Some(CipherState {
            encrypting,
            params,
            engine,
        });
        Ok(())
    }

    #[must_use]
    pub const fn spec(&self) -> &CipherSpec {
        &self.spec
    }

    /// Parameters from the last successful init.
    #[must_use]
    pub fn parameters(&self) -> Option<&ResolvedParameters> {
        self.state.as_ref().map(|s| &s.params)
    }

    #[must_use]
    pub fn init_vector(&self) -> Option<&[u8]> {
        self.parameters()?.init_vector.as_deref()
    }

    #[must_use]
    pub fn initial_aad(&self) -> Option<&[u8]> {
        self.parameters()?.initial_aad.as_deref()
    }

    #[must_use]
    pub fn pbe_salt(&self) -> Option<&[u8]> {
        self.parameters()?.pbe_salt.as_deref()
    }

    #[must_use]
    pub fn pbe_spec(&self) -> Option<PbeSpec> {
        self.parameters()?.pbe_spec
    }

    /// `true` once initialised for encryption, `false` otherwise.
    #[must_use]
    pub fn is_encrypting(&self) -> bool {
        self.state.as_ref().is_some_and(|s| s.encrypting)
    }

    /// Block length in bytes of an initialised ECB cipher.
    #[must_use]
    pub fn block_len(&self) -> Option<usize> {
        self.engine().ok().map(|e| e.block_len())
    }

    fn engine(&self) -> Result<&dyn BlockEngine, CipherError> {
        let state = self
            .state
            .as_ref()
            .ok_or_else(|| CipherError::Logic(format!("{} is not initialised", self.spec)))?;
        state.engine.as_deref().ok_or_else(|| {
            CipherError::Logic(format!("{} does not process raw blocks", self.spec))
        })
    }

    /// Encrypt or decrypt `data` in place, block by block, in the direction
    /// chosen at init.
    ///
    /// # Errors
    ///
    /// - `CipherError::Logic` if the cipher is uninitialised or not ECB
    /// - `CipherError::InvalidLength` if `data` is not a whole number of blocks
    pub fn process_blocks(&self, data: &mut [u8]) -> Result<(), CipherError> {
        let engine = self.engine()?;
        let block_len = engine.block_len();
        if data.len().checked_rem(block_len) != Some(0) {
            return Err(CipherError::InvalidLength(format!(
                "{} bytes is not a multiple of the {block_len}-byte block",
                data.len()
            )));
        }
        let encrypting = self.is_encrypting();
        for block in data.chunks_exact_mut(block_len) {
            if encrypting {
                engine.encrypt_block(block)?;
            } else {
                engine.decrypt_block(block)?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Cipher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cipher")
            .field("spec", &self.spec)
            .field("initialised", &self.state.is_some())
            .field("encrypting", &self.is_encrypting())
            .finish_non_exhaustive()
    }
}
