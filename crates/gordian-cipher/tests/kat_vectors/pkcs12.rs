//! PKCS#12 (RFC 7292 appendix B) SHA-512 known-answer vectors.
//!
//! Password "pw" as BMPString: `00 70 00 77 00 00`. Key bytes use ID 1, IV
//! bytes use ID 2.

use super::hex;
use gordian_cipher::kdf::derive;
use gordian_cipher::PbeSpec;
use secrecy::SecretString;
use std::fmt::Write;

fn upper_hex(bytes: &[u8]) -> String {
    bytes.iter().fold(String::new(), |mut s, b| {
        write!(s, "{b:02X}").expect("writing to a String cannot fail");
        s
    })
}

#[test]
fn sha512_key_and_iv_ten_iterations() {
    let derived = derive(
        &PbeSpec::pkcs12(10),
        &SecretString::from("pw"),
        &[0x05; 16],
        32,
        16,
    )
    .expect("derive should succeed");
    assert_eq!(
        derived.key.expose(),
        hex("d36081ca673d760014532789ea29f39ce1b8b151deb56e4362e439df81c0427b").as_slice()
    );
    assert_eq!(derived.iv, hex("87155de86986da2a9c3e8adfbbe8da66"));
}

/// 130 bytes spans three SHA-512 blocks, exercising the `I` update.
#[test]
fn sha512_key_longer_than_two_blocks() {
    let derived = derive(
        &PbeSpec::pkcs12(2),
        &SecretString::from("pw"),
        &[0x01; 8],
        130,
        0,
    )
    .expect("derive should succeed");
    assert_eq!(derived.key.len(), 130);
    assert!(derived.iv.is_empty());
    let encoded = upper_hex(derived.key.expose());
    assert!(encoded.ends_with("F4DBBF240621B2D5904"), "got {encoded}");
}

#[test]
fn key_and_iv_diversifiers_differ() {
    let derived = derive(
        &PbeSpec::pkcs12(10),
        &SecretString::from("pw"),
        &[0x05; 16],
        16,
        16,
    )
    .expect("derive should succeed");
    assert_ne!(derived.key.expose(), derived.iv.as_slice());
}
