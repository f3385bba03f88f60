//! Value types describing keys, ciphers and password-based encryption.
//!
//! Specs are immutable `Copy` values. Whether a spec is usable with a given
//! primitive provider is decided by [`crate::factory::SpecValidator`].

pub mod cipher;
pub mod key;
pub mod pbe;

pub use cipher::{CipherMode, CipherSpec, Padding, StreamCipherSpec, SymCipherSpec};
pub use key::{
    KeySpec, StreamKeySpec, StreamKeyType, StreamSubKeyType, SymKeySpec, SymKeyType,
    STREAM_KEY_LENGTHS, SYM_KEY_LENGTHS,
};
pub use pbe::{DigestAndCount, DigestSpec, DigestType, PbeCipherSpec, PbeSpec, PbeType};
