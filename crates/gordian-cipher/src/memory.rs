//! Secret byte buffers for key material and the secure random source.
//!
//! This module provides:
//! - [`KeyMaterial`] — zeroize-on-drop buffer with masked `Debug`/`Display`
//! - [`fill_random`] — fill a buffer from the operating system CSPRNG

use crate::error::CipherError;
use rand::rngs::OsRng;
use rand::RngCore;
use secrecy::{ExposeSecret, SecretSlice};
use std::fmt;
use subtle::ConstantTimeEq;
use zeroize::Zeroize;

/// Fill `buf` from `OsRng`.
///
/// # Errors
///
/// Returns `CipherError::Random` if the operating system source fails.
pub fn fill_random(buf: &mut [u8]) -> Result<(), CipherError> {
    OsRng
        .try_fill_bytes(buf)
        .map_err(|e| CipherError::Random(format!("CSPRNG fill failed: {e}")))
}

/// Variable-length secret bytes: raw key material, derived bytes, unwrapped
/// plaintext.
///
/// Wraps [`SecretSlice<u8>`], so the bytes are zeroized on drop. Equality is
/// constant time.
pub struct KeyMaterial {
    inner: SecretSlice<u8>,
}

impl KeyMaterial {
    /// Copy `data` into a new secret buffer. The caller should zeroize its
    /// source afterwards.
    #[must_use]
    pub fn new(data: &[u8]) -> Self {
        Self {
            inner: data.to_vec().into(),
        }
    }

    /// Take ownership of `data` without copying.
    #[must_use]
    pub fn from_vec(data: Vec<u8>) -> Self {
        Self { inner: data.into() }
    }

    /// `len` bytes from the CSPRNG.
    ///
    /// # Errors
    ///
    /// Returns `CipherError::Random` if the CSPRNG fails.
    pub fn random(len: usize) -> Result<Self, CipherError> {
        let mut bytes = vec![0u8; len];
        if let Err(e) = fill_random(&mut bytes) {
            bytes.zeroize();
            return Err(e);
        }
        Ok(Self::from_vec(bytes))
    }

    /// Expose the underlying bytes. Keep the borrow short.
    #[must_use]
    pub fn expose(&self) -> &[u8] {
        self.inner.expose_secret()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.expose().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Clone for KeyMaterial {
    fn clone(&self) -> Self {
        Self::new(self.expose())
    }
}

impl PartialEq for KeyMaterial {
    fn eq(&self, other: &Self) -> bool {
        self.expose().ct_eq(other.expose()).into()
    }
}

impl Eq for KeyMaterial {}

impl fmt::Debug for KeyMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("KeyMaterial(***)")
    }
}

impl fmt::Display for KeyMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("KeyMaterial(***)")
    }
}

impl From<Vec<u8>> for KeyMaterial {
    fn from(data: Vec<u8>) -> Self {
        Self::from_vec(data)
    }
}
