//! Symmetric keys and the generator that builds them for a spec.

use crate::error::CipherError;
use crate::memory::KeyMaterial;
use crate::spec::KeySpec;

/// A symmetric or stream key: its spec plus secret bytes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Key {
    spec: KeySpec,
    material: KeyMaterial,
}

impl Key {
    #[must_use]
    pub const fn spec(&self) -> &KeySpec {
        &self.spec
    }

    #[must_use]
    pub const fn material(&self) -> &KeyMaterial {
        &self.material
    }

    /// Expose the raw key bytes.
    #[must_use]
    pub fn expose(&self) -> &[u8] {
        self.material.expose()
    }
}

/// Builds keys of one spec, from bytes or from the CSPRNG.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyGenerator {
    spec: KeySpec,
}

impl KeyGenerator {
    #[must_use]
    pub const fn new(spec: KeySpec) -> Self {
        Self { spec }
    }

    #[must_use]
    pub const fn spec(&self) -> &KeySpec {
        &self.spec
    }

    /// Number of key bytes the spec requires.
    #[must_use]
    pub const fn key_len(&self) -> usize {
        self.spec.key_length().bytes()
    }

    /// Build a key from exactly [`Self::key_len`] bytes.
    ///
    /// # Errors
    ///
    /// Returns `CipherError::InvalidLength` on a size mismatch.
    pub fn build_key_from_bytes(&self, bytes: &[u8]) -> Result<Key, CipherError> {
        self.check_len(bytes.len())?;
        Ok(Key {
            spec: self.spec,
            material: KeyMaterial::new(bytes),
        })
    }

    /// Like [`Self::build_key_from_bytes`], taking ownership of the material.
    ///
    /// # Errors
    ///
    /// Returns `CipherError::InvalidLength` on a size mismatch.
    pub fn build_key(&self, material: KeyMaterial) -> Result<Key, CipherError> {
        self.check_len(material.len())?;
        Ok(Key {
            spec: self.spec,
            material,
        })
    }

    /// A fresh random key.
    ///
    /// # Errors
    ///
    /// Returns `CipherError::Random` if the CSPRNG fails.
    pub fn generate_key(&self) -> Result<Key, CipherError> {
        Ok(Key {
            spec: self.spec,
            material: KeyMaterial::random(self.key_len())?,
        })
    }

    fn check_len(&self, len: usize) -> Result<(), CipherError> {
        if len == self.key_len() {
            Ok(())
        } else {
            Err(CipherError::InvalidLength(format!(
                "{} needs {} key bytes, got {len}",
                self.spec,
                self.key_len()
            )))
        }
    }
}
