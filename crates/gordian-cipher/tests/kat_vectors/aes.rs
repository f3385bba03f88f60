//! FIPS-197 Appendix C — AES known-answer vectors, run through a factory-built
//! ECB cipher.

use super::hex;
use gordian_cipher::{
    CipherFactory, CipherParameters, KeyGenerator, Length, Padding, RustCryptoProvider,
    SymCipherSpec, SymKeySpec,
};
use std::sync::Arc;

const PLAINTEXT: &str = "00112233445566778899aabbccddeeff";

fn check(len: Length, expected: &str) {
    let factory = CipherFactory::new(Arc::new(RustCryptoProvider)).expect("factory should build");
    let key_spec = SymKeySpec::aes(len);
    let key_bytes: Vec<u8> = (0u8..).take(len.bytes()).collect();
    let key = KeyGenerator::new(key_spec.into())
        .build_key_from_bytes(&key_bytes)
        .expect("key should build");

    let mut cipher = factory
        .create_cipher(SymCipherSpec::ecb(key_spec, Padding::None).into())
        .expect("ecb should be supported");
    cipher
        .init_for_encrypt(CipherParameters::Key { key: key.clone() })
        .expect("init should succeed");
    let mut block = hex(PLAINTEXT);
    cipher.process_blocks(&mut block).expect("encrypt should succeed");
    assert_eq!(block, hex(expected), "{key_spec}");

    cipher
        .init_for_decrypt(CipherParameters::Key { key })
        .expect("init should succeed");
    cipher.process_blocks(&mut block).expect("decrypt should succeed");
    assert_eq!(block, hex(PLAINTEXT));
}

/// C.1 — AES-128.
#[test]
fn fips197_c1_aes128() {
    check(Length::Len128, "69c4e0d86a7b0430d8cdb78070b4c55a");
}

/// C.2 — AES-192.
#[test]
fn fips197_c2_aes192() {
    check(Length::Len192, "dda97ca4864cdfe06eaf70a0ec0d7191");
}

/// C.3 — AES-256.
#[test]
fn fips197_c3_aes256() {
    check(Length::Len256, "8ea2b7ca516745bfeafc49904b496089");
}
