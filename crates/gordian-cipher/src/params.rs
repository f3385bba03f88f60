//! Cipher initialisation requests and their resolution into concrete key, IV,
//! associated data and PBE bookkeeping.

use crate::error::CipherError;
use crate::kdf;
use crate::key::{Key, KeyGenerator};
use crate::memory::fill_random;
use crate::spec::{CipherSpec, PbeSpec};
use secrecy::SecretString;

/// Minimum length of a randomly generated PBE salt in bytes.
pub const MIN_PBE_SALT_LEN: usize = 16;

/// Where an IV (or PBE salt) comes from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Nonce {
    /// Freshly generated by the CSPRNG.
    Random,
    /// Supplied verbatim, typically when decrypting.
    Explicit(Vec<u8>),
}

/// A request to initialise a cipher.
#[derive(Debug)]
pub enum CipherParameters {
    /// Key only, no IV.
    Key { key: Key },
    /// Key and IV source.
    Nonce { key: Key, nonce: Nonce },
    /// Key, IV source and initial associated data.
    Aead {
        key: Key,
        nonce: Nonce,
        initial_aad: Vec<u8>,
    },
    /// Key and IV derived from a password; `nonce` is the salt.
    Pbe {
        pbe_spec: PbeSpec,
        password: SecretString,
        nonce: Nonce,
    },
}

/// The concrete values a cipher is initialised with.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedParameters {
    pub key: Key,
    pub init_vector: Option<Vec<u8>>,
    pub initial_aad: Option<Vec<u8>>,
    pub pbe_salt: Option<Vec<u8>>,
    /// Set iff the request was [`CipherParameters::Pbe`].
    pub pbe_spec: Option<PbeSpec>,
}

/// Resolves [`CipherParameters`] against a [`CipherSpec`].
pub struct ParameterResolver;

impl ParameterResolver {
    /// Turn `params` into fresh [`ResolvedParameters`] for `spec`.
    ///
    /// # Errors
    ///
    /// - `CipherError::Logic` if a supplied key's spec differs from the cipher's key spec
    /// - `CipherError::InvalidSpecification` for an empty explicit PBE salt
    /// - `CipherError::Random` if the CSPRNG fails
    /// - KDF errors for [`CipherParameters::Pbe`] (see [`kdf::derive`])
    pub fn resolve(
        spec: &CipherSpec,
        params: CipherParameters,
    ) -> Result<ResolvedParameters, CipherError> {
        match params {
            CipherParameters::Key { key } => Self::with_key(spec, key, None, None),
            CipherParameters::Nonce { key, nonce } => Self::with_key(spec, key, Some(&nonce), None),
            CipherParameters::Aead {
                key,
                nonce,
                initial_aad,
            } => Self::with_key(spec, key, Some(&nonce), Some(initial_aad)),
            CipherParameters::Pbe {
                pbe_spec,
                password,
                nonce,
            } => Self::with_password(spec, pbe_spec, &password, nonce),
        }
    }

    fn with_key(
        spec: &CipherSpec,
        key: Key,
        nonce: Option<&Nonce>,
        initial_aad: Option<Vec<u8>>,
    ) -> Result<ResolvedParameters, CipherError> {
        let expected = spec.key_spec();
        if *key.spec() != expected {
            return Err(CipherError::Logic(format!(
                "{spec} needs a {expected} key, got {}",
                key.spec()
            )));
        }
        let iv_len = spec.iv_length(Some(expected.key_length()));
        let init_vector = match nonce {
            Some(Nonce::Random) if iv_len > 0 => {
                let mut iv = vec![0u8; iv_len];
                fill_random(&mut iv)?;
                Some(iv)
            }
            Some(Nonce::Explicit(bytes)) if !bytes.is_empty() => Some(bytes.clone()),
            _ => None,
        };
        Ok(ResolvedParameters {
            key,
            init_vector,
            initial_aad,
            pbe_salt: None,
            pbe_spec: None,
        })
    }

    fn with_password(
        spec: &CipherSpec,
        pbe_spec: PbeSpec,
        password: &SecretString,
        nonce: Nonce,
    ) -> Result<ResolvedParameters, CipherError> {
        let salt = match nonce {
            Nonce::Random => {
                let iv_len = spec.iv_length(Some(spec.key_spec().key_length()));
                let mut salt = vec![0u8; iv_len.max(MIN_PBE_SALT_LEN)];
                fill_random(&mut salt)?;
                salt
            }
            Nonce::Explicit(bytes) if bytes.is_empty() => {
                return Err(CipherError::InvalidSpecification(
                    "PBE salt must not be empty".into(),
                ));
            }
            Nonce::Explicit(bytes) => bytes,
        };
        let (key, init_vector) = derive_key_and_iv(spec, &pbe_spec, password, &salt)?;
        Ok(ResolvedParameters {
            key,
            init_vector,
            initial_aad: None,
            pbe_salt: Some(salt),
            pbe_spec: Some(pbe_spec),
        })
    }
}

/// Derive the key and IV `spec` needs from a password.
///
/// The IV is `None` when the spec takes none.
pub(crate) fn derive_key_and_iv(
    spec: &CipherSpec,
    pbe_spec: &PbeSpec,
    password: &SecretString,
    salt: &[u8],
) -> Result<(Key, Option<Vec<u8>>), CipherError> {
    let generator = KeyGenerator::new(spec.key_spec());
    let iv_len = spec.iv_length(Some(spec.key_spec().key_length()));
    let derived = kdf::derive(pbe_spec, password, salt, generator.key_len(), iv_len)?;
    let key = generator.build_key(derived.key)?;
    Ok((key, (!derived.iv.is_empty()).then_some(derived.iv)))
}
