//! Integration tests for wrapping keys, private keys and raw bytes.

use gordian_cipher::{
    CipherError, CipherFactory, CipherSpec, Key, KeyGenerator, KeySpec, Length, PrivateKey,
    PublicKey, RustCryptoProvider, SymKeySpec, WrappedKeyEnvelope,
};
use std::sync::Arc;

fn factory() -> CipherFactory {
    CipherFactory::new(Arc::new(RustCryptoProvider)).expect("factory should build")
}

fn random_key(spec: impl Into<KeySpec>) -> Key {
    KeyGenerator::new(spec.into())
        .generate_key()
        .expect("generate should succeed")
}

/// DER PKCS#8 Ed25519 private key with a constant seed.
fn ed25519_pkcs8(seed: u8) -> Vec<u8> {
    let mut der = vec![
        0x30, 0x2e, 0x02, 0x01, 0x00, 0x30, 0x05, 0x06, 0x03, 0x2b, 0x65, 0x70, 0x04, 0x22, 0x04,
        0x20,
    ];
    der.extend(std::iter::repeat(seed).take(32));
    der
}

/// DER SPKI for an Ed25519 (`0x70`) or X25519 (`0x6e`) public key.
fn spki(oid_last: u8) -> Vec<u8> {
    let mut der = vec![
        0x30, 0x2a, 0x30, 0x05, 0x06, 0x03, 0x2b, 0x65, oid_last, 0x03, 0x21, 0x00,
    ];
    der.extend(std::iter::repeat(0x5a).take(32));
    der
}

/// `"GORDIAN"` under a 128-bit block wraps to 24 bytes, and every one of its
/// 192 bits is protected.
#[test]
fn gordian_scenario_with_every_bit_flipped() {
    let factory = factory();
    let wrapper = factory
        .create_key_wrapper(&SymKeySpec::aes(Length::Len128))
        .expect("wrapper should build");
    let kek = random_key(SymKeySpec::aes(Length::Len128));
    let wrapped = wrapper.secure_bytes(&kek, b"GORDIAN").expect("wrap should succeed");
    assert_eq!(wrapped.len(), 24);
    assert_eq!(
        wrapper.derive_bytes(&kek, &wrapped).expect("unwrap should succeed").expose(),
        b"GORDIAN"
    );

    for i in 0..wrapped.len() {
        for bit in 0..8 {
            let mut tampered = wrapped.clone();
            tampered[i] ^= 1 << bit;
            assert!(
                matches!(wrapper.derive_bytes(&kek, &tampered), Err(CipherError::Integrity)),
                "flip of byte {i} bit {bit} went undetected"
            );
        }
    }
}

#[test]
fn every_aes_size_wraps_every_aes_key() {
    let factory = factory();
    for kek_len in [Length::Len128, Length::Len192, Length::Len256] {
        let wrapper = factory
            .create_key_wrapper(&SymKeySpec::aes(kek_len))
            .expect("wrapper should build");
        let kek = random_key(SymKeySpec::aes(kek_len));
        for key_len in [Length::Len128, Length::Len192, Length::Len256] {
            let key = random_key(SymKeySpec::aes(key_len));
            let wrapped = wrapper.secure_key(&kek, &key).expect("wrap should succeed");
            assert_eq!(wrapped.len(), key_len.bytes() + wrapper.key_wrap_expansion());
            let back = wrapper
                .derive_key(&kek, &wrapped, *key.spec())
                .expect("unwrap should succeed");
            assert_eq!(back, key);
        }
    }
}

#[test]
fn truncated_wrap_is_rejected() {
    let factory = factory();
    let wrapper = factory
        .create_key_wrapper(&SymKeySpec::aes(Length::Len256))
        .expect("wrapper should build");
    let kek = random_key(SymKeySpec::aes(Length::Len256));
    let wrapped = wrapper.secure_bytes(&kek, &[0x33; 40]).expect("wrap should succeed");
    let short = &wrapped[..wrapped.len() - 8];
    assert!(matches!(
        wrapper.derive_bytes(&kek, short),
        Err(CipherError::Integrity)
    ));
    assert!(matches!(
        wrapper.derive_bytes(&kek, &wrapped[..8]),
        Err(CipherError::InvalidLength(_))
    ));
}

#[test]
fn private_key_pairs_back_with_its_public_half() {
    let factory = factory();
    let wrapper = factory
        .create_key_wrapper(&SymKeySpec::aes(Length::Len256))
        .expect("wrapper should build");
    let kek = random_key(SymKeySpec::aes(Length::Len256));
    let private = PrivateKey::from_pkcs8_der(&ed25519_pkcs8(0x11)).expect("pkcs8 should parse");
    let wrapped = wrapper
        .secure_private_key(&kek, &private)
        .expect("wrap should succeed");

    let public = PublicKey::from_spki_der(&spki(0x70)).expect("spki should parse");
    let pair = wrapper
        .derive_key_pair(&kek, &wrapped, public.clone())
        .expect("unwrap should succeed");
    assert_eq!(pair.public(), &public);
    assert_eq!(pair.private().expose_der(), private.expose_der());

    let x25519 = PublicKey::from_spki_der(&spki(0x6e)).expect("spki should parse");
    assert!(matches!(
        wrapper.derive_key_pair(&kek, &wrapped, x25519),
        Err(CipherError::Logic(_))
    ));
}

#[test]
fn unwrapped_garbage_is_not_a_private_key() {
    let factory = factory();
    let wrapper = factory
        .create_key_wrapper(&SymKeySpec::aes(Length::Len128))
        .expect("wrapper should build");
    let kek = random_key(SymKeySpec::aes(Length::Len128));
    let wrapped = wrapper.secure_bytes(&kek, b"not der").expect("wrap should succeed");
    let public = PublicKey::from_spki_der(&spki(0x70)).expect("spki should parse");
    assert!(matches!(
        wrapper.derive_key_pair(&kek, &wrapped, public),
        Err(CipherError::Encoding(_))
    ));
}

#[test]
fn envelope_names_the_wrap_cipher() {
    let factory = factory();
    let wrapper = factory
        .create_key_wrapper(&SymKeySpec::aes(Length::Len192))
        .expect("wrapper should build");
    let kek = random_key(SymKeySpec::aes(Length::Len192));
    let der = wrapper
        .secure_bytes_envelope(&kek, b"enveloped")
        .expect("wrap should succeed");

    let envelope = WrappedKeyEnvelope::from_der(&der).expect("envelope should parse");
    assert_eq!(
        factory
            .resolve_cipher_spec(&envelope.algorithm)
            .expect("identifier should resolve"),
        CipherSpec::from(*wrapper.spec())
    );
    assert_eq!(
        wrapper
            .derive_bytes_envelope(&kek, &der)
            .expect("unwrap should succeed")
            .expose(),
        b"enveloped"
    );

    let mut tampered = envelope.clone();
    tampered.payload[3] ^= 0x40;
    let der = tampered.to_der().expect("encode should succeed");
    assert!(matches!(
        wrapper.derive_bytes_envelope(&kek, &der),
        Err(CipherError::Integrity)
    ));
}
