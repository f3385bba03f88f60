//! Password-based derivation of cipher keys and IVs.
//!
//! This module provides:
//! - [`derive`] — run the KDF named by a [`PbeSpec`] and split its output into key and IV
//! - [`Derived`] — the resulting key material and IV
//!
//! Every family produces `key_len + iv_len` bytes which are split key first,
//! IV second, except PKCS#12 which derives key and IV as separate outputs
//! with diversifier IDs 1 and 2.

use crate::error::CipherError;
use crate::memory::KeyMaterial;
use crate::spec::{DigestSpec, PbeSpec};
use secrecy::{ExposeSecret, SecretString};
use sha2::{Digest, Sha512};
use zeroize::Zeroize;

/// PKCS#12 diversifier for key material.
const PKCS12_KEY_ID: u8 = 1;

/// PKCS#12 diversifier for IVs.
const PKCS12_IV_ID: u8 = 2;

/// SHA-512 output length (u).
const SHA512_OUTPUT_LEN: usize = 64;

/// SHA-512 block length (v).
const SHA512_BLOCK_LEN: usize = 128;

/// Output of a password-based derivation.
#[derive(Debug)]
pub struct Derived {
    /// Cipher key bytes.
    pub key: KeyMaterial,
    /// IV bytes, empty when the cipher takes no IV.
    pub iv: Vec<u8>,
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

/// Derive `key_len` key bytes and `iv_len` IV bytes from `password` and `salt`.
///
/// # Errors
///
/// Returns `CipherError::InvalidSpecification` if `pbe_spec` is not usable
/// (zero iterations, non power-of-two scrypt cost, digest other than
/// SHA-512, ...), and `CipherError::KeyDerivation` if the KDF itself fails,
/// for example on an Argon2 salt shorter than 8 bytes.
pub fn derive(
    pbe_spec: &PbeSpec,
    password: &SecretString,
    salt: &[u8],
    key_len: usize,
    iv_len: usize,
) -> Result<Derived, CipherError> {
    if !pbe_spec.is_valid() {
        return Err(CipherError::InvalidSpecification(format!(
            "unusable PBE parameters: {pbe_spec}"
        )));
    }
    if let Some(digest) = pbe_spec.digest() {
        if digest != DigestSpec::sha2_512() {
            return Err(CipherError::InvalidSpecification(format!(
                "PBE digest must be SHA-512, got {digest}"
            )));
        }
    }
    let total = key_len
        .checked_add(iv_len)
        .ok_or_else(|| CipherError::KeyDerivation("derived length overflows".into()))?;

    tracing::debug!(kdf = ?pbe_spec.pbe_type(), key_len, iv_len, "deriving key from password");

    let pwd = password.expose_secret().as_bytes();
    match *pbe_spec {
        PbeSpec::Pbkdf2(p) => {
            let mut out = vec![0u8; total];
            pbkdf2::pbkdf2_hmac::<Sha512>(pwd, salt, p.iterations, &mut out);
            Ok(split(out, key_len))
        }
        PbeSpec::Pkcs12(p) => {
            let mut bmp = bmp_password(password.expose_secret());
            let key = pkcs12_kdf(&bmp, salt, PKCS12_KEY_ID, p.iterations, key_len);
            let iv = pkcs12_kdf(&bmp, salt, PKCS12_IV_ID, p.iterations, iv_len);
            bmp.zeroize();
            Ok(Derived {
                key: KeyMaterial::from_vec(key),
                iv,
            })
        }
        PbeSpec::Scrypt {
            cost,
            block_size,
            parallelism,
        } => {
            let params = scrypt::Params::new(log2(cost)?, block_size, parallelism, 32)
                .map_err(|e| CipherError::KeyDerivation(format!("invalid scrypt params: {e}")))?;
            let mut out = vec![0u8; total];
            if let Err(e) = scrypt::scrypt(pwd, salt, &params, &mut out) {
                out.zeroize();
                return Err(CipherError::KeyDerivation(format!(
                    "scrypt derivation failed: {e}"
                )));
            }
            Ok(split(out, key_len))
        }
        PbeSpec::Argon2 {
            iterations,
            lanes,
            memory_kb,
        } => {
            let params = argon2::Params::new(memory_kb, iterations, lanes, Some(total))
                .map_err(|e| CipherError::KeyDerivation(format!("invalid argon2 params: {e}")))?;
            let argon2 =
                argon2::Argon2::new(argon2::Algorithm::Argon2id, argon2::Version::V0x13, params);
            let mut out = vec![0u8; total];
            if let Err(e) = argon2.hash_password_into(pwd, salt, &mut out) {
                out.zeroize();
                return Err(CipherError::KeyDerivation(format!(
                    "argon2id derivation failed: {e}"
                )));
            }
            Ok(split(out, key_len))
        }
    }
}

/// Split `out` into key (first `key_len` bytes) and IV (the rest).
fn split(mut out: Vec<u8>, key_len: usize) -> Derived {
    let iv = out.split_off(key_len);
    Derived {
        key: KeyMaterial::from_vec(out),
        iv,
    }
}

/// `log2(n)` for scrypt's `log_n` parameter. `n` must be a power of two.
fn log2(n: u32) -> Result<u8, CipherError> {
    if !n.is_power_of_two() {
        return Err(CipherError::InvalidSpecification(format!(
            "scrypt cost must be a power of 2, got {n}"
        )));
    }
    // trailing_zeros of a u32 is at most 31.
    #[allow(clippy::cast_possible_truncation)]
    Ok(n.trailing_zeros() as u8)
}

// ---------------------------------------------------------------------------
// PKCS#12 (RFC 7292 appendix B.2)
// ---------------------------------------------------------------------------

/// BMPString encoding of a password: UTF-16BE followed by a two-byte NUL
/// terminator. The empty password encodes to no bytes at all.
fn bmp_password(password: &str) -> Vec<u8> {
    if password.is_empty() {
        return Vec::new();
    }
    let mut out: Vec<u8> = password.encode_utf16().flat_map(u16::to_be_bytes).collect();
    out.extend_from_slice(&[0, 0]);
    out
}

/// Concatenate copies of `data` up to the next multiple of `v` bytes.
fn fill_to_blocks(data: &[u8], v: usize) -> Vec<u8> {
    if data.is_empty() {
        return Vec::new();
    }
    let len = data.len().div_ceil(v).saturating_mul(v);
    data.iter().copied().cycle().take(len).collect()
}

/// Derive `n` bytes with diversifier `id`.
fn pkcs12_kdf(password: &[u8], salt: &[u8], id: u8, iterations: u32, n: usize) -> Vec<u8> {
    let v = SHA512_BLOCK_LEN;
    let d = [id; SHA512_BLOCK_LEN];
    let mut i_buf = fill_to_blocks(salt, v);
    i_buf.extend(fill_to_blocks(password, v));

    let mut out = Vec::with_capacity(n.saturating_add(SHA512_OUTPUT_LEN));
    while out.len() < n {
        let mut a = Sha512::new().chain_update(d).chain_update(&i_buf).finalize();
        for _ in 1..iterations {
            a = Sha512::digest(a);
        }
        out.extend_from_slice(&a);
        if out.len() >= n {
            break;
        }
        let b: Vec<u8> = a.iter().copied().cycle().take(v).collect();
        for chunk in i_buf.chunks_exact_mut(v) {
            add_one_plus(chunk, &b);
        }
    }
    i_buf.zeroize();
    out.truncate(n);
    out
}

/// `block = (block + b + 1) mod 2^(8v)`, big endian.
#[allow(clippy::arithmetic_side_effects, clippy::cast_possible_truncation)]
fn add_one_plus(block: &mut [u8], b: &[u8]) {
    // Each partial sum is at most 0xff + 0xff + 1 and fits a u16.
    let mut carry: u16 = 1;
    for (x, y) in block.iter_mut().zip(b).rev() {
        let sum = u16::from(*x) + u16::from(*y) + carry;
        *x = sum as u8;
        carry = sum >> 8;
    }
}
