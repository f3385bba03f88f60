//! `gordian-cipher` — cipher specifications, stable algorithm identifiers,
//! password-based key derivation and key wrapping.
//!
//! No bulk encryption lives here: the block primitives come from a
//! [`PrimitiveProvider`], and this crate decides which specs are legal,
//! names them, derives keys from passwords and wraps secrets.

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::arithmetic_side_effects))]

pub mod error;
pub mod length;
pub mod memory;

pub mod spec;

pub mod identifier;
pub mod registry;

pub mod provider;

pub mod factory;

pub mod asym;
pub mod key;

pub mod kdf;
pub mod params;

pub mod cipher;

pub mod envelope;
pub mod wrap;

pub use asym::{AsymKeySpec, KeyPair, PrivateKey, PublicKey};
pub use cipher::Cipher;
pub use envelope::WrappedKeyEnvelope;
pub use error::CipherError;
pub use factory::{CipherFactory, SpecValidator};
pub use identifier::AlgorithmIdentifier;
pub use kdf::Derived;
pub use key::{Key, KeyGenerator};
pub use length::Length;
pub use memory::{fill_random, KeyMaterial};
pub use params::{CipherParameters, Nonce, ParameterResolver, ResolvedParameters, MIN_PBE_SALT_LEN};
pub use provider::{BlockEngine, CapabilityTable, PrimitiveProvider, RustCryptoProvider};
pub use registry::AlgorithmRegistry;
pub use spec::pbe::{
    DEFAULT_ARGON2_ITERATIONS, DEFAULT_ARGON2_LANES, DEFAULT_ARGON2_MEMORY_KB, DEFAULT_ITERATIONS,
    DEFAULT_SCRYPT_BLOCK_SIZE, DEFAULT_SCRYPT_COST,
};
pub use spec::{
    CipherMode, CipherSpec, DigestAndCount, DigestSpec, DigestType, KeySpec, Padding,
    PbeCipherSpec, PbeSpec, PbeType, StreamCipherSpec, StreamKeySpec, StreamKeyType,
    StreamSubKeyType, SymCipherSpec, SymKeySpec, SymKeyType,
};
pub use wrap::{key_wrap_expansion, KeyWrapper, INTEGER_BYTES, WRAP_COUNT};
