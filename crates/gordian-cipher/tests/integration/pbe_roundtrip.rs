//! Integration tests for password-initialised ciphers.

use gordian_cipher::{
    CipherError, CipherFactory, CipherParameters, CipherSpec, DigestAndCount, DigestSpec,
    DigestType, Length, Nonce, PbeCipherSpec, PbeSpec, RustCryptoProvider, SymCipherSpec,
    SymKeySpec, MIN_PBE_SALT_LEN,
};
use secrecy::SecretString;
use std::sync::Arc;

fn factory() -> CipherFactory {
    CipherFactory::new(Arc::new(RustCryptoProvider)).expect("factory should build")
}

fn gcm256() -> CipherSpec {
    CipherSpec::Sym(SymCipherSpec::gcm(SymKeySpec::aes(Length::Len256)))
}

fn pbe(pbe_spec: PbeSpec, nonce: Nonce) -> CipherParameters {
    CipherParameters::Pbe {
        pbe_spec,
        password: SecretString::from("correct horse battery staple"),
        nonce,
    }
}

/// Encrypt-side init picks a salt; decrypt-side init with that salt
/// reproduces the same key and IV.
#[test]
fn salt_from_encrypt_reproduces_key_on_decrypt() {
    let factory = factory();
    for pbe_spec in [
        PbeSpec::pbkdf2(10),
        PbeSpec::pkcs12(10),
        PbeSpec::scrypt(1024, 8, 1),
        PbeSpec::argon2(1, 2, 64),
    ] {
        let mut encryptor = factory.create_cipher(gcm256()).expect("cipher should build");
        encryptor
            .init_for_encrypt(pbe(pbe_spec, Nonce::Random))
            .expect("init should succeed");
        let salt = encryptor.pbe_salt().expect("salt should be recorded").to_vec();
        assert!(salt.len() >= MIN_PBE_SALT_LEN);
        assert_eq!(encryptor.pbe_spec(), Some(pbe_spec));

        let mut decryptor = factory.create_cipher(gcm256()).expect("cipher should build");
        decryptor
            .init_for_decrypt(pbe(pbe_spec, Nonce::Explicit(salt.clone())))
            .expect("init should succeed");
        assert_eq!(encryptor.parameters(), decryptor.parameters());

        let (key, iv) = factory
            .derive_from_password(
                &pbe_spec,
                &SecretString::from("correct horse battery staple"),
                &salt,
                &gcm256(),
            )
            .expect("derive should succeed");
        let params = decryptor.parameters().expect("cipher is initialised");
        assert_eq!(params.key, key);
        assert_eq!(params.init_vector, iv);
    }
}

#[test]
fn ecb_derivation_has_no_iv() {
    let factory = factory();
    let spec = CipherSpec::Sym(SymCipherSpec::ecb(
        SymKeySpec::aes(Length::Len128),
        gordian_cipher::Padding::Pkcs7,
    ));
    let (key, iv) = factory
        .derive_from_password(&PbeSpec::pbkdf2(3), &SecretString::from("pw"), &[7; 16], &spec)
        .expect("derive should succeed");
    assert_eq!(key.expose().len(), 16);
    assert!(iv.is_none());
}

#[test]
fn non_sha512_digest_is_rejected() {
    let factory = factory();
    let sha256 = PbeSpec::Pbkdf2(DigestAndCount {
        digest: DigestSpec::new(DigestType::Sha2, Length::Len256),
        iterations: 10,
    });
    assert!(!factory.validator().valid_pbe_cipher_spec(&PbeCipherSpec::new(sha256, gcm256())));
    assert!(matches!(
        factory.derive_from_password(&sha256, &SecretString::from("pw"), &[0; 16], &gcm256()),
        Err(CipherError::InvalidSpecification(_))
    ));
}

#[test]
fn unusable_kdf_parameters_are_rejected() {
    let factory = factory();
    for bad in [
        PbeSpec::pbkdf2(0),
        PbeSpec::scrypt(1000, 8, 1),
        PbeSpec::argon2(1, 4, 16),
    ] {
        assert!(matches!(
            factory.derive_from_password(&bad, &SecretString::from("pw"), &[0; 16], &gcm256()),
            Err(CipherError::InvalidSpecification(_))
        ));
    }
}

#[test]
fn pbe_cipher_spec_serde_round_trip() {
    let spec = PbeCipherSpec::new(PbeSpec::scrypt(1 << 15, 8, 1), gcm256());
    let json = serde_json::to_string(&spec).expect("serialize should succeed");
    let back: PbeCipherSpec = serde_json::from_str(&json).expect("deserialize should succeed");
    assert_eq!(back, spec);
}
