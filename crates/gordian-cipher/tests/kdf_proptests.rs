#![allow(clippy::unwrap_used, clippy::arithmetic_side_effects)]

//! Property-based tests for password-based key derivation.

use gordian_cipher::kdf::derive;
use gordian_cipher::PbeSpec;
use proptest::prelude::*;
use secrecy::SecretString;

/// Small parameters for fast property tests, one per KDF family.
fn families() -> [PbeSpec; 4] {
    [
        PbeSpec::pbkdf2(2),
        PbeSpec::pkcs12(2),
        PbeSpec::scrypt(16, 1, 1),
        PbeSpec::argon2(1, 1, 8),
    ]
}

fn run(spec: &PbeSpec, password: &str, salt: &[u8]) -> (Vec<u8>, Vec<u8>) {
    let derived = derive(spec, &SecretString::from(password), salt, 32, 16)
        .expect("derive should succeed with valid inputs");
    (derived.key.expose().to_vec(), derived.iv)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// Same inputs, same key and IV, for every family.
    #[test]
    fn derivation_is_deterministic(
        password in "[ -~]{0,32}",
        salt in proptest::collection::vec(any::<u8>(), 16..32),
    ) {
        for spec in families() {
            prop_assert_eq!(run(&spec, &password, &salt), run(&spec, &password, &salt));
        }
    }

    /// Key and IV always have the requested sizes.
    #[test]
    fn output_sizes_match_request(
        key_len in 4usize..80,
        iv_len in 0usize..40,
    ) {
        for spec in families() {
            let derived = derive(&spec, &SecretString::from("pw"), b"sixteen byte salt", key_len, iv_len)
                .expect("derive should succeed");
            prop_assert_eq!(derived.key.len(), key_len);
            prop_assert_eq!(derived.iv.len(), iv_len);
        }
    }

    /// Changing the password changes the output.
    #[test]
    fn password_changes_output(
        password in "[a-z]{1,16}",
        suffix in "[A-Z]{1,4}",
    ) {
        let salt = b"proptest_salt_16b";
        let other = format!("{password}{suffix}");
        for spec in families() {
            prop_assert_ne!(run(&spec, &password, salt), run(&spec, &other, salt));
        }
    }

    /// Changing the salt changes the output.
    #[test]
    fn salt_changes_output(
        salt in proptest::collection::vec(any::<u8>(), 16..32),
        flip in any::<prop::sample::Index>(),
    ) {
        let mut other = salt.clone();
        other[flip.index(salt.len())] ^= 0x80;
        for spec in families() {
            prop_assert_ne!(run(&spec, "pw", &salt), run(&spec, "pw", &other));
        }
    }

    /// PBKDF2 and PKCS#12 never agree on the same password, salt and count.
    #[test]
    fn pbkdf2_and_pkcs12_diverge(
        password in "[ -~]{0,24}",
        salt in proptest::collection::vec(any::<u8>(), 16..24),
        iterations in 1u32..4,
    ) {
        let a = run(&PbeSpec::pbkdf2(iterations), &password, &salt);
        let b = run(&PbeSpec::pkcs12(iterations), &password, &salt);
        prop_assert_ne!(a, b);
    }
}

#[test]
fn parameter_changes_change_output() {
    let salt = b"parameter_salt_16";
    let pairs = [
        (PbeSpec::pbkdf2(1), PbeSpec::pbkdf2(2)),
        (PbeSpec::pkcs12(1), PbeSpec::pkcs12(2)),
        (PbeSpec::scrypt(16, 1, 1), PbeSpec::scrypt(32, 1, 1)),
        (PbeSpec::argon2(1, 1, 8), PbeSpec::argon2(2, 1, 8)),
    ];
    for (a, b) in pairs {
        assert_ne!(run(&a, "pw", salt), run(&b, "pw", salt), "{a} vs {b}");
    }
}

#[test]
fn default_preset_snapshot() {
    insta::assert_json_snapshot!(PbeSpec::default(), @r#"
    {
      "kdf": "argon2",
      "iterations": 3,
      "lanes": 4,
      "memory_kb": 65536
    }
    "#);
}
