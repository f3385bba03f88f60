//! RFC 9106 Section 5.4 Argon2id known-answer vector.
//!
//! The RFC vector uses a secret and associated data, which `derive` never
//! passes, so it is checked against the `argon2` crate directly. `derive` is
//! then checked against the same crate with the parameters it does use.

use gordian_cipher::kdf::derive;
use gordian_cipher::PbeSpec;
use secrecy::SecretString;

#[test]
fn rfc9106_section_5_4_argon2id() {
    // m = 32 KiB, t = 3, p = 4, password 0x01 x32, salt 0x02 x16,
    // secret 0x03 x8, associated data 0x04 x12.
    let ad = argon2::AssociatedData::new(&[0x04; 12]).expect("AD should be valid");
    let mut builder = argon2::ParamsBuilder::new();
    builder.m_cost(32).t_cost(3).p_cost(4).output_len(32).data(ad);
    let params = builder.build().expect("params should be valid");
    let argon2 = argon2::Argon2::new_with_secret(
        &[0x03; 8],
        argon2::Algorithm::Argon2id,
        argon2::Version::V0x13,
        params,
    )
    .expect("argon2 with secret should be valid");

    let mut output = [0u8; 32];
    argon2
        .hash_password_into(&[0x01; 32], &[0x02; 16], &mut output)
        .expect("hash_password_into should succeed");

    let expected: [u8; 32] = [
        0x0d, 0x64, 0x0d, 0xf5, 0x8d, 0x78, 0x76, 0x6c, 0x08, 0xc0, 0x37, 0xa3, 0x4a, 0x8b, 0x53,
        0xc9, 0xd0, 0x1e, 0xf0, 0x45, 0x2d, 0x75, 0xb6, 0x5e, 0xb5, 0x25, 0x20, 0xe9, 0x6b, 0x01,
        0xe6, 0x59,
    ];
    assert_eq!(output, expected, "RFC 9106 Section 5.4 Argon2id vector mismatch");
}

/// `derive` is Argon2id v1.3 with no secret or AD, split key first then IV.
#[test]
fn derive_matches_raw_argon2id() {
    let password = "match_test";
    let salt = b"salt_for_matching";
    let derived = derive(
        &PbeSpec::argon2(2, 1, 64),
        &SecretString::from(password),
        salt,
        32,
        16,
    )
    .expect("derive should succeed");

    let params = argon2::Params::new(64, 2, 1, Some(48)).expect("params should be valid");
    let argon2 =
        argon2::Argon2::new(argon2::Algorithm::Argon2id, argon2::Version::V0x13, params);
    let mut raw = [0u8; 48];
    argon2
        .hash_password_into(password.as_bytes(), salt, &mut raw)
        .expect("raw argon2 should succeed");

    assert_eq!(derived.key.expose(), &raw[..32]);
    assert_eq!(derived.iv, &raw[32..]);
}
