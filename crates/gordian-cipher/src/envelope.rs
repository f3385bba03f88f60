//! Self-describing container for wrapped key material.
//!
//! ```text
//! WrappedKeyEnvelope ::= SEQUENCE {
//!     algorithm  OBJECT IDENTIFIER,   -- cipher spec used to wrap
//!     payload    OCTET STRING         -- wrapped bytes
//! }
//! ```

use crate::error::CipherError;
use crate::identifier::AlgorithmIdentifier;
use der::asn1::{AnyRef, ObjectIdentifier, OctetStringRef};
use der::{Decode, Encode, Sequence};

/// Wrapped bytes tagged with the identifier of the wrapping cipher.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WrappedKeyEnvelope {
    pub algorithm: AlgorithmIdentifier,
    pub payload: Vec<u8>,
}

#[derive(Sequence)]
struct EnvelopeDer<'a> {
    algorithm: ObjectIdentifier,
    payload: OctetStringRef<'a>,
}

/// Number of elements in an envelope sequence.
const ENVELOPE_ELEMENTS: usize = 2;

impl WrappedKeyEnvelope {
    #[must_use]
    pub const fn new(algorithm: AlgorithmIdentifier, payload: Vec<u8>) -> Self {
        Self { algorithm, payload }
    }

    /// DER encoding.
    ///
    /// # Errors
    ///
    /// Returns `CipherError::Encoding` if the identifier is not a valid OID.
    pub fn to_der(&self) -> Result<Vec<u8>, CipherError> {
        let payload = OctetStringRef::new(&self.payload)
            .map_err(|e| CipherError::Encoding(format!("envelope payload: {e}")))?;
        EnvelopeDer {
            algorithm: self.algorithm.to_oid()?,
            payload,
        }
        .to_der()
        .map_err(|e| CipherError::Encoding(format!("envelope encoding failed: {e}")))
    }

    /// Parse a DER envelope.
    ///
    /// # Errors
    ///
    /// Returns `CipherError::Encoding` if `der` is not a sequence of exactly
    /// an OID followed by an octet string.
    pub fn from_der(der: &[u8]) -> Result<Self, CipherError> {
        let elements = Vec::<AnyRef<'_>>::from_der(der)
            .map_err(|e| CipherError::Encoding(format!("envelope is not a sequence: {e}")))?;
        if elements.len() != ENVELOPE_ELEMENTS {
            return Err(CipherError::Encoding(format!(
                "envelope has {} elements, expected {ENVELOPE_ELEMENTS}",
                elements.len()
            )));
        }
        let parsed = EnvelopeDer::from_der(der)
            .map_err(|e| CipherError::Encoding(format!("malformed envelope: {e}")))?;
        Ok(Self {
            algorithm: AlgorithmIdentifier::from_oid(&parsed.algorithm),
            payload: parsed.payload.as_bytes().to_vec(),
        })
    }
}
