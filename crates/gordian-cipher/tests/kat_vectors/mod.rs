mod aes;
mod argon2id;
mod pbkdf2;
mod pkcs12;
mod scrypt;

/// Decode a lowercase hex string.
pub fn hex(s: &str) -> Vec<u8> {
    assert_eq!(s.len() % 2, 0, "hex string must have even length");
    (0..s.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&s[i..i + 2], 16).expect("valid hex digit"))
        .collect()
}
