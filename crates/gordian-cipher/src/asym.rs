//! Opaque asymmetric key material.
//!
//! No asymmetric algorithm is implemented here. Public keys are carried as
//! DER `SubjectPublicKeyInfo`, private keys as DER PKCS#8 `PrivateKeyInfo`,
//! and the only thing ever inspected is the embedded `AlgorithmIdentifier`,
//! which serves as the key spec.

use crate::error::CipherError;
use crate::memory::KeyMaterial;
use der::asn1::ObjectIdentifier;
use der::Encode;
use pkcs8::PrivateKeyInfo;
use spki::SubjectPublicKeyInfoRef;
use std::fmt;

/// Key spec of an asymmetric key: its DER-encoded `AlgorithmIdentifier`.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct AsymKeySpec {
    oid: ObjectIdentifier,
    der: Vec<u8>,
}

impl AsymKeySpec {
    fn from_algorithm(algorithm: &spki::AlgorithmIdentifierRef<'_>) -> Result<Self, CipherError> {
        let der = algorithm
            .to_der()
            .map_err(|e| CipherError::Encoding(format!("algorithm identifier: {e}")))?;
        Ok(Self {
            oid: algorithm.oid,
            der,
        })
    }

    /// The algorithm OID.
    #[must_use]
    pub const fn oid(&self) -> ObjectIdentifier {
        self.oid
    }

    /// The full `AlgorithmIdentifier`, parameters included.
    #[must_use]
    pub fn algorithm_der(&self) -> &[u8] {
        &self.der
    }
}

impl fmt::Debug for AsymKeySpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AsymKeySpec({})", self.oid)
    }
}

/// A public key as DER `SubjectPublicKeyInfo`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PublicKey {
    spec: AsymKeySpec,
    spki_der: Vec<u8>,
}

impl PublicKey {
    /// Parse the algorithm out of `spki_der` and keep the encoding.
    ///
    /// # Errors
    ///
    /// Returns `CipherError::Encoding` if the bytes are not a DER SPKI.
    pub fn from_spki_der(spki_der: &[u8]) -> Result<Self, CipherError> {
        let info = SubjectPublicKeyInfoRef::try_from(spki_der)
            .map_err(|e| CipherError::Encoding(format!("SubjectPublicKeyInfo: {e}")))?;
        Ok(Self {
            spec: AsymKeySpec::from_algorithm(&info.algorithm)?,
            spki_der: spki_der.to_vec(),
        })
    }

    #[must_use]
    pub const fn spec(&self) -> &AsymKeySpec {
        &self.spec
    }

    #[must_use]
    pub fn as_der(&self) -> &[u8] {
        &self.spki_der
    }
}

/// A private key as DER PKCS#8, held in secret memory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PrivateKey {
    spec: AsymKeySpec,
    pkcs8_der: KeyMaterial,
}

impl PrivateKey {
    /// Parse the algorithm out of `pkcs8_der` and keep the encoding.
    ///
    /// # Errors
    ///
    /// Returns `CipherError::Encoding` if the bytes are not a DER PKCS#8 key.
    pub fn from_pkcs8_der(pkcs8_der: &[u8]) -> Result<Self, CipherError> {
        Self::from_material(KeyMaterial::new(pkcs8_der))
    }

    pub(crate) fn from_material(pkcs8_der: KeyMaterial) -> Result<Self, CipherError> {
        let spec = {
            let info = PrivateKeyInfo::try_from(pkcs8_der.expose())
                .map_err(|e| CipherError::Encoding(format!("PrivateKeyInfo: {e}")))?;
            AsymKeySpec::from_algorithm(&info.algorithm)?
        };
        Ok(Self { spec, pkcs8_der })
    }

    #[must_use]
    pub const fn spec(&self) -> &AsymKeySpec {
        &self.spec
    }

    /// Expose the PKCS#8 encoding.
    #[must_use]
    pub fn expose_der(&self) -> &[u8] {
        self.pkcs8_der.expose()
    }
}

/// A public and private key of the same algorithm.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyPair {
    public: PublicKey,
    private: PrivateKey,
}

impl KeyPair {
    /// Pair two keys.
    ///
    /// # Errors
    ///
    /// Returns `CipherError::Logic` if the two algorithm identifiers differ.
    pub fn new(public: PublicKey, private: PrivateKey) -> Result<Self, CipherError> {
        if public.spec != private.spec {
            return Err(CipherError::Logic(format!(
                "public key is {} but private key is {}",
                public.spec.oid, private.spec.oid
            )));
        }
        Ok(Self { public, private })
    }

    #[must_use]
    pub const fn public(&self) -> &PublicKey {
        &self.public
    }

    #[must_use]
    pub const fn private(&self) -> &PrivateKey {
        &self.private
    }
}
