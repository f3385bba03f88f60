//! Error types for `gordian-cipher`.

use thiserror::Error;

/// Errors produced by specification, derivation and wrapping operations.
///
/// Nothing in this crate recovers from or retries on an error; every failure
/// is surfaced to the caller exactly once.
#[derive(Debug, Error)]
pub enum CipherError {
    /// A key, cipher or PBE specification was rejected by the validator.
    #[error("invalid specification: {0}")]
    InvalidSpecification(String),

    /// An algorithm identifier has no entry in the registry.
    #[error("unknown algorithm identifier: {0}")]
    UnknownIdentifier(String),

    /// Integration error: mismatched key types, swapped key pairs, misuse of
    /// an uninitialised cipher.
    #[error("logic error: {0}")]
    Logic(String),

    /// Unwrap detected tampering, corruption or the wrong key.
    ///
    /// Deliberately carries no detail about which check failed.
    #[error("integrity check failed")]
    Integrity,

    /// Malformed wrapped-data length or key bytes of the wrong size.
    #[error("invalid length: {0}")]
    InvalidLength(String),

    /// The password-based key derivation function rejected its parameters.
    #[error("key derivation failed: {0}")]
    KeyDerivation(String),

    /// The secure random source failed.
    #[error("random source failure: {0}")]
    Random(String),

    /// The underlying primitive library failed or lacks an engine.
    #[error("primitive failure: {0}")]
    Primitive(String),

    /// DER encoding or decoding of an identifier or envelope failed.
    #[error("encoding error: {0}")]
    Encoding(String),
}
