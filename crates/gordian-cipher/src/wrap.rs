//! Deterministic key wrapping over a raw block cipher.
//!
//! A generalisation of the RFC 5649 construction to any block length of 64
//! bits or more. The wrapped buffer is laid out before mixing as
//!
//! ```text
//! integrity(check_len) | length (u32 BE) | random(half) | data | zero pad
//! ```
//!
//! and then mixed through [`WRAP_COUNT`] cycles of the block cipher, each
//! pairing the leading half-block with every following half-block in turn.
//!
//! This module provides:
//! - [`wrap`] / [`unwrap`] — the raw primitive over an initialised ECB [`Cipher`]
//! - [`KeyWrapper`] — wraps bytes, keys and private keys under a wrapping key
//! - [`key_wrap_expansion`] — bytes added on top of the padded payload

use crate::asym::{KeyPair, PrivateKey, PublicKey};
use crate::cipher::Cipher;
use crate::envelope::WrappedKeyEnvelope;
use crate::error::CipherError;
use crate::factory::CipherFactory;
use crate::key::{Key, KeyGenerator};
use crate::length::Length;
use crate::memory::{fill_random, KeyMaterial};
use crate::params::CipherParameters;
use crate::spec::{CipherSpec, KeySpec, SymCipherSpec};
use subtle::{Choice, ConstantTimeEq};
use zeroize::Zeroizing;

/// Number of mixing cycles over the whole buffer.
pub const WRAP_COUNT: usize = 6;

/// Width of the encoded plaintext length.
pub const INTEGER_BYTES: usize = 4;

const INTEGRITY_HIGH: u8 = 0xA6;
const INTEGRITY_LOW: u8 = 0x59;

/// Integrity pattern byte at position `index`.
const fn integrity_byte(index: usize) -> u8 {
    if index.wrapping_add(1) % 4 < 2 {
        INTEGRITY_HIGH
    } else {
        INTEGRITY_LOW
    }
}

// ---- Layout ----

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Layout {
    half: usize,
    check_len: usize,
}

impl Layout {
    /// With a 64-bit block the length field cannot share the leading
    /// half-block, so it gets a half-block of its own.
    const fn of(block_len: usize) -> Self {
        let half = block_len / 2;
        let check_len = if half == INTEGER_BYTES {
            half
        } else {
            half.saturating_sub(INTEGER_BYTES)
        };
        Self { half, check_len }
    }

    fn checked(block_len: usize) -> Result<Self, CipherError> {
        let layout = Self::of(block_len);
        if layout.half < INTEGER_BYTES {
            return Err(CipherError::InvalidLength(format!(
                "{}-bit block is too short to wrap with",
                block_len.saturating_mul(8)
            )));
        }
        Ok(layout)
    }

    const fn header_len(self) -> usize {
        self.check_len
            .saturating_add(INTEGER_BYTES)
            .saturating_add(self.half)
    }
}

/// Bytes that wrapping adds over the zero-padded payload for a cipher with
/// `block_length` blocks.
#[must_use]
pub const fn key_wrap_expansion(block_length: Length) -> usize {
    Layout::of(block_length.bytes()).header_len()
}

// ---- Raw primitive ----

fn raw_block_len(cipher: &Cipher) -> Result<usize, CipherError> {
    cipher.block_len().ok_or_else(|| {
        CipherError::Logic(format!(
            "{} is not an initialised raw block cipher",
            cipher.spec()
        ))
    })
}

/// XOR `counter` big-endian into the trailing bytes of `block`.
fn xor_counter(block: &mut [u8], counter: u64) {
    for (b, c) in block.iter_mut().rev().zip(counter.to_be_bytes().iter().rev()) {
        *b ^= c;
    }
}

fn block_count(layout: Layout, buf_len: usize) -> usize {
    buf_len.saturating_sub(layout.half) / layout.half
}

// Offsets are `j * half` with `j <= block_count`, so every slice below lies
// inside `buf`, and the counter never exceeds `block_count * WRAP_COUNT`.
#[allow(clippy::arithmetic_side_effects)]
fn mix(cipher: &Cipher, layout: Layout, buf: &mut [u8]) -> Result<(), CipherError> {
    let half = layout.half;
    let num_blocks = block_count(layout, buf.len());
    let mut scratch = Zeroizing::new(vec![0u8; half * 2]);
    let mut counter: u64 = 1;
    for _ in 0..WRAP_COUNT {
        for j in 1..=num_blocks {
            let offset = j * half;
            scratch[..half].copy_from_slice(&buf[..half]);
            scratch[half..].copy_from_slice(&buf[offset..offset + half]);
            cipher.process_blocks(&mut scratch)?;
            xor_counter(&mut scratch, counter);
            buf[..half].copy_from_slice(&scratch[..half]);
            buf[offset..offset + half].copy_from_slice(&scratch[half..]);
            counter += 1;
        }
    }
    Ok(())
}

// Same bounds as `mix`, counting down.
#[allow(clippy::arithmetic_side_effects)]
fn unmix(cipher: &Cipher, layout: Layout, buf: &mut [u8]) -> Result<(), CipherError> {
    let half = layout.half;
    let num_blocks = block_count(layout, buf.len());
    let mut counter = u64::try_from(num_blocks)
        .ok()
        .and_then(|n| n.checked_mul(WRAP_COUNT as u64))
        .ok_or_else(|| CipherError::InvalidLength(format!("{} bytes is too long", buf.len())))?;
    let mut scratch = Zeroizing::new(vec![0u8; half * 2]);
    for _ in 0..WRAP_COUNT {
        for j in (1..=num_blocks).rev() {
            let offset = j * half;
            scratch[..half].copy_from_slice(&buf[..half]);
            scratch[half..].copy_from_slice(&buf[offset..offset + half]);
            xor_counter(&mut scratch, counter);
            cipher.process_blocks(&mut scratch)?;
            buf[..half].copy_from_slice(&scratch[..half]);
            buf[offset..offset + half].copy_from_slice(&scratch[half..]);
            counter -= 1;
        }
    }
    Ok(())
}

/// Wrap `plaintext` with a raw ECB cipher initialised for encryption.
///
/// The output is `plaintext` padded to a half-block multiple plus
/// [`key_wrap_expansion`] bytes.
///
/// # Errors
///
/// - `CipherError::Logic` if `cipher` is not an ECB cipher initialised for encryption
/// - `CipherError::InvalidLength` if the block is under 64 bits or `plaintext`
///   is longer than `u32::MAX` bytes
/// - `CipherError::Random` if the CSPRNG fails
pub fn wrap(cipher: &Cipher, plaintext: &[u8]) -> Result<Vec<u8>, CipherError> {
    if !cipher.is_encrypting() {
        return Err(CipherError::Logic(format!(
            "{} is not initialised for encryption",
            cipher.spec()
        )));
    }
    let layout = Layout::checked(raw_block_len(cipher)?)?;
    let encoded = u32::try_from(plaintext.len()).map_err(|_| {
        CipherError::InvalidLength(format!("{} bytes is too long to wrap", plaintext.len()))
    })?;
    let total = plaintext
        .len()
        .checked_next_multiple_of(layout.half)
        .and_then(|padded| padded.checked_add(layout.header_len()))
        .ok_or_else(|| {
            CipherError::InvalidLength(format!("{} bytes is too long to wrap", plaintext.len()))
        })?;

    let mut buf = Zeroizing::new(Vec::with_capacity(total));
    buf.extend((0..layout.check_len).map(integrity_byte));
    buf.extend_from_slice(&encoded.to_be_bytes());
    let random_start = buf.len();
    buf.resize(layout.header_len(), 0);
    fill_random(&mut buf[random_start..])?;
    buf.extend_from_slice(plaintext);
    buf.resize(total, 0);

    mix(cipher, layout, &mut buf)?;
    Ok(std::mem::take(&mut *buf))
}

/// Unwrap bytes produced by [`wrap`] with a raw ECB cipher initialised for
/// decryption under the same key.
///
/// Every integrity check runs before the result is decided.
///
/// # Errors
///
/// - `CipherError::Logic` if `cipher` is not an ECB cipher initialised for decryption
/// - `CipherError::InvalidLength` if `wrapped` is not a half-block multiple or
///   is shorter than the header
/// - `CipherError::Integrity` if the unwrapped buffer fails verification
pub fn unwrap(cipher: &Cipher, wrapped: &[u8]) -> Result<KeyMaterial, CipherError> {
    if cipher.parameters().is_none() || cipher.is_encrypting() {
        return Err(CipherError::Logic(format!(
            "{} is not initialised for decryption",
            cipher.spec()
        )));
    }
    let layout = Layout::checked(raw_block_len(cipher)?)?;
    let header_len = layout.header_len();
    if wrapped.len().checked_rem(layout.half) != Some(0) || wrapped.len() < header_len {
        return Err(CipherError::InvalidLength(format!(
            "{} bytes is not a valid wrapped length for a {}-byte half block",
            wrapped.len(),
            layout.half
        )));
    }

    let mut buf = Zeroizing::new(wrapped.to_vec());
    unmix(cipher, layout, &mut buf)?;

    let (header, data) = buf.split_at(header_len);
    let (check, rest) = header.split_at(layout.check_len);
    let mut valid = Choice::from(1u8);
    for (i, b) in check.iter().enumerate() {
        valid &= b.ct_eq(&integrity_byte(i));
    }

    let mut length_field = [0u8; INTEGER_BYTES];
    length_field.copy_from_slice(&rest[..INTEGER_BYTES]);
    let encoded = usize::try_from(u32::from_be_bytes(length_field)).unwrap_or(usize::MAX);
    let in_range = encoded <= data.len() && data.len().wrapping_sub(encoded) < layout.half;
    valid &= Choice::from(u8::from(in_range));

    for (i, b) in data.iter().enumerate() {
        let is_pad = Choice::from(u8::from(i >= encoded));
        valid &= !is_pad | b.ct_eq(&0);
    }

    if !bool::from(valid) {
        tracing::warn!(spec = %cipher.spec(), "key unwrap failed verification");
        return Err(CipherError::Integrity);
    }
    Ok(KeyMaterial::new(&data[..encoded]))
}

// ---- KeyWrapper ----

/// Wraps secrets under a symmetric wrapping key using one raw block cipher
/// spec. Holds no state between calls.
#[derive(Debug)]
pub struct KeyWrapper<'a> {
    factory: &'a CipherFactory,
    spec: SymCipherSpec,
    layout: Layout,
}

impl<'a> KeyWrapper<'a> {
    pub(crate) fn new(factory: &'a CipherFactory, spec: SymCipherSpec) -> Result<Self, CipherError> {
        factory.validator().check_cipher_spec(&spec.into())?;
        let layout = Layout::checked(spec.key_spec().block_length().bytes())?;
        Ok(Self {
            factory,
            spec,
            layout,
        })
    }

    /// The raw block cipher spec used for wrapping.
    #[must_use]
    pub const fn spec(&self) -> &SymCipherSpec {
        &self.spec
    }

    /// Bytes added on top of the padded payload.
    #[must_use]
    pub const fn key_wrap_expansion(&self) -> usize {
        self.layout.header_len()
    }

    fn cipher(&self, wrapping_key: &Key, encrypting: bool) -> Result<Cipher, CipherError> {
        let mut cipher = self.factory.create_cipher(self.spec.into())?;
        let params = CipherParameters::Key {
            key: wrapping_key.clone(),
        };
        if encrypting {
            cipher.init_for_encrypt(params)?;
        } else {
            cipher.init_for_decrypt(params)?;
        }
        Ok(cipher)
    }

    /// Wrap arbitrary bytes.
    ///
    /// # Errors
    ///
    /// `CipherError::Logic` if `wrapping_key` does not match the wrap cipher,
    /// otherwise as [`wrap`].
    pub fn secure_bytes(&self, wrapping_key: &Key, data: &[u8]) -> Result<Vec<u8>, CipherError> {
        wrap(&self.cipher(wrapping_key, true)?, data)
    }

    /// Unwrap bytes produced by [`Self::secure_bytes`].
    ///
    /// # Errors
    ///
    /// `CipherError::Logic` if `wrapping_key` does not match the wrap cipher,
    /// otherwise as [`unwrap`].
    pub fn derive_bytes(&self, wrapping_key: &Key, wrapped: &[u8]) -> Result<KeyMaterial, CipherError> {
        unwrap(&self.cipher(wrapping_key, false)?, wrapped)
    }

    /// Wrap the raw bytes of `key`.
    ///
    /// # Errors
    ///
    /// As [`Self::secure_bytes`].
    pub fn secure_key(&self, wrapping_key: &Key, key: &Key) -> Result<Vec<u8>, CipherError> {
        self.secure_bytes(wrapping_key, key.expose())
    }

    /// Unwrap a key and rebuild it as `spec`.
    ///
    /// # Errors
    ///
    /// - `CipherError::InvalidSpecification` if `spec` is malformed
    /// - `CipherError::InvalidLength` if the unwrapped bytes do not fit `spec`
    /// - otherwise as [`Self::derive_bytes`]
    pub fn derive_key(&self, wrapping_key: &Key, wrapped: &[u8], spec: KeySpec) -> Result<Key, CipherError> {
        if !spec.is_valid() {
            return Err(CipherError::InvalidSpecification(format!("invalid key spec {spec}")));
        }
        let material = self.derive_bytes(wrapping_key, wrapped)?;
        KeyGenerator::new(spec).build_key(material)
    }

    /// Wrap the PKCS#8 encoding of a private key.
    ///
    /// # Errors
    ///
    /// As [`Self::secure_bytes`].
    pub fn secure_private_key(
        &self,
        wrapping_key: &Key,
        private: &PrivateKey,
    ) -> Result<Vec<u8>, CipherError> {
        self.secure_bytes(wrapping_key, private.expose_der())
    }

    /// Unwrap a private key and pair it with `public`.
    ///
    /// # Errors
    ///
    /// - `CipherError::Encoding` if the unwrapped bytes are not PKCS#8
    /// - `CipherError::Logic` if the two halves are different algorithms
    /// - otherwise as [`Self::derive_bytes`]
    pub fn derive_key_pair(
        &self,
        wrapping_key: &Key,
        wrapped: &[u8],
        public: PublicKey,
    ) -> Result<KeyPair, CipherError> {
        let private = PrivateKey::from_material(self.derive_bytes(wrapping_key, wrapped)?)?;
        KeyPair::new(public, private)
    }

    /// Wrap `data` and tag it with the wrap cipher's identifier.
    ///
    /// # Errors
    ///
    /// As [`Self::secure_bytes`], or `CipherError::Encoding`.
    pub fn secure_bytes_envelope(&self, wrapping_key: &Key, data: &[u8]) -> Result<Vec<u8>, CipherError> {
        let spec = CipherSpec::from(self.spec);
        let algorithm = self.factory.cipher_identifier(&spec).ok_or_else(|| {
            CipherError::Logic(format!("{spec} has no registered identifier"))
        })?;
        let payload = self.secure_bytes(wrapping_key, data)?;
        WrappedKeyEnvelope::new(algorithm, payload).to_der()
    }

    /// Unwrap an envelope produced by [`Self::secure_bytes_envelope`].
    ///
    /// # Errors
    ///
    /// - `CipherError::Encoding` if `der` is not an envelope
    /// - `CipherError::UnknownIdentifier` if the envelope names no registered cipher
    /// - `CipherError::InvalidSpecification` if it names a different cipher than this wrapper's
    /// - otherwise as [`Self::derive_bytes`]
    pub fn derive_bytes_envelope(&self, wrapping_key: &Key, der: &[u8]) -> Result<KeyMaterial, CipherError> {
        let envelope = WrappedKeyEnvelope::from_der(der)?;
        let named = self.factory.resolve_cipher_spec(&envelope.algorithm)?;
        let expected = CipherSpec::from(self.spec);
        if named != expected {
            return Err(CipherError::InvalidSpecification(format!(
                "envelope was wrapped with {named}, not {expected}"
            )));
        }
        self.derive_bytes(wrapping_key, &envelope.payload)
    }
}
