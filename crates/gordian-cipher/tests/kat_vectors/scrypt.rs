//! RFC 7914 Section 12 — scrypt known-answer vectors.

use super::hex;
use gordian_cipher::kdf::derive;
use gordian_cipher::PbeSpec;
use secrecy::SecretString;

fn check(spec: &PbeSpec, password: &str, salt: &[u8], expected: &str) {
    let derived = derive(spec, &SecretString::from(password), salt, 32, 32)
        .expect("derive should succeed");
    let dk = hex(expected);
    assert_eq!(derived.key.expose(), &dk[..32]);
    assert_eq!(derived.iv, &dk[32..]);
}

/// P = "", S = "", N = 16, r = 1, p = 1.
#[test]
fn rfc7914_empty_inputs() {
    check(
        &PbeSpec::scrypt(16, 1, 1),
        "",
        b"",
        "77d6576238657b203b19ca42c18a0497f16b4844e3074ae8dfdffa3fede21442\
         fcd0069ded0948f8326a753a0fc81f17e8d3e0fb2e0d3628cf35e20c38d18906",
    );
}

/// P = "password", S = "NaCl", N = 1024, r = 8, p = 16.
#[test]
fn rfc7914_password_nacl() {
    check(
        &PbeSpec::scrypt(1024, 8, 16),
        "password",
        b"NaCl",
        "fdbabe1c9d3472007856e7190d01e9fe7c6ad7cbc8237830e77376634b373162\
         2eaf30d92e22a3886ff109279d9830dac727afb94a83ee6d8360cbdfa2cc0640",
    );
}
