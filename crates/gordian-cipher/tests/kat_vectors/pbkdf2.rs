//! PBKDF2-HMAC-SHA512 known-answer vector.
//!
//! P = "password", S = "salt", c = 1, dkLen = 64. The derivation splits the
//! output key first, IV second.

use super::hex;
use gordian_cipher::kdf::derive;
use gordian_cipher::{
    CipherFactory, CipherSpec, Length, PbeSpec, RustCryptoProvider, SymCipherSpec, SymKeySpec,
};
use secrecy::SecretString;
use std::sync::Arc;

const DK: &str = "867f70cf1ade02cff3752599a3a53dc4af34c7a669815ae5d513554e1c8cf252\
                  c02d470a285a0501bad999bfe943c08f050235d7d68b1da55e63f73b60a57fce";

#[test]
fn pbkdf2_sha512_one_iteration() {
    let derived = derive(
        &PbeSpec::pbkdf2(1),
        &SecretString::from("password"),
        b"salt",
        32,
        32,
    )
    .expect("derive should succeed");
    let dk = hex(DK);
    assert_eq!(derived.key.expose(), &dk[..32]);
    assert_eq!(derived.iv, &dk[32..]);
}

#[test]
fn factory_derivation_uses_the_same_split() {
    let factory = CipherFactory::new(Arc::new(RustCryptoProvider)).expect("factory should build");
    let spec = CipherSpec::Sym(SymCipherSpec::gcm(SymKeySpec::aes(Length::Len256)));
    let (key, iv) = factory
        .derive_from_password(
            &PbeSpec::pbkdf2(1),
            &SecretString::from("password"),
            b"salt",
            &spec,
        )
        .expect("derive should succeed");
    let dk = hex(DK);
    assert_eq!(key.expose(), &dk[..32]);
    assert_eq!(iv.as_deref(), Some(&dk[32..48]));
}
