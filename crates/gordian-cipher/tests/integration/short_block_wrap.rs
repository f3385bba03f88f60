//! Key wrapping over a 64-bit block cipher.
//!
//! No 64-bit block engine ships with the crate, so a toy Feistel network is
//! plugged in through a [`CapabilityTable`]. With a 4-byte half block the
//! length field gets a half block of its own.

use gordian_cipher::{
    key_wrap_expansion, BlockEngine, CapabilityTable, CipherError, CipherFactory, CipherMode, Key,
    KeyGenerator, Length, PrimitiveProvider, StreamKeyType, SymKeySpec, SymKeyType,
};
use std::sync::Arc;

const ROUNDS: usize = 8;

/// Balanced Feistel network over two 32-bit halves.
struct ToyFeistel {
    round_keys: [u32; 4],
}

impl ToyFeistel {
    fn round(half: u32, key: u32) -> u32 {
        (half.wrapping_mul(0x9e37_79b1) ^ key).rotate_left(7).wrapping_add(key)
    }

    fn split(block: &[u8]) -> (u32, u32) {
        let l = u32::from_be_bytes(block[..4].try_into().unwrap());
        let r = u32::from_be_bytes(block[4..].try_into().unwrap());
        (l, r)
    }

    fn join(block: &mut [u8], l: u32, r: u32) {
        block[..4].copy_from_slice(&l.to_be_bytes());
        block[4..].copy_from_slice(&r.to_be_bytes());
    }

    fn check(block: &[u8]) -> Result<(), CipherError> {
        if block.len() == 8 {
            Ok(())
        } else {
            Err(CipherError::InvalidLength(format!("{} byte block", block.len())))
        }
    }
}

impl BlockEngine for ToyFeistel {
    fn block_len(&self) -> usize {
        8
    }

    fn encrypt_block(&self, block: &mut [u8]) -> Result<(), CipherError> {
        Self::check(block)?;
        let (mut l, mut r) = Self::split(block);
        for i in 0..ROUNDS {
            (l, r) = (r, l ^ Self::round(r, self.round_keys[i % 4]));
        }
        Self::join(block, l, r);
        Ok(())
    }

    fn decrypt_block(&self, block: &mut [u8]) -> Result<(), CipherError> {
        Self::check(block)?;
        let (mut l, mut r) = Self::split(block);
        for i in (0..ROUNDS).rev() {
            (l, r) = (r ^ Self::round(l, self.round_keys[i % 4]), l);
        }
        Self::join(block, l, r);
        Ok(())
    }
}

struct ToyProvider;

impl PrimitiveProvider for ToyProvider {
    fn sym_key_types(&self) -> &[SymKeyType] {
        &[SymKeyType::Blowfish]
    }

    fn stream_key_types(&self) -> &[StreamKeyType] {
        &[]
    }

    fn supports_mode(&self, _key_type: SymKeyType, mode: CipherMode) -> bool {
        mode == CipherMode::Ecb
    }

    fn block_engine(
        &self,
        _spec: &SymKeySpec,
        key: &[u8],
    ) -> Result<Box<dyn BlockEngine>, CipherError> {
        let mut round_keys = [0u32; 4];
        for (k, chunk) in round_keys.iter_mut().zip(key.chunks(4)) {
            let mut word = [0u8; 4];
            word[..chunk.len()].copy_from_slice(chunk);
            *k = u32::from_be_bytes(word);
        }
        Ok(Box::new(ToyFeistel { round_keys }))
    }
}

fn blowfish() -> SymKeySpec {
    SymKeySpec::new(SymKeyType::Blowfish, Length::Len64, Length::Len128)
}

fn factory() -> CipherFactory {
    let table = CapabilityTable::new()
        .with_sym_key_types([SymKeyType::Blowfish])
        .with_engines(Arc::new(ToyProvider));
    CipherFactory::new(Arc::new(table)).expect("factory should build")
}

fn key(fill: u8) -> Key {
    KeyGenerator::new(blowfish().into())
        .build_key_from_bytes(&[fill; 16])
        .expect("key should build")
}

#[test]
fn feistel_engine_inverts() {
    let engine = ToyProvider
        .block_engine(&blowfish(), &[9; 16])
        .expect("engine should build");
    let mut block = *b"64-bits!";
    engine.encrypt_block(&mut block).expect("encrypt should succeed");
    assert_ne!(&block, b"64-bits!");
    engine.decrypt_block(&mut block).expect("decrypt should succeed");
    assert_eq!(&block, b"64-bits!");
}

#[test]
fn expansion_has_an_extra_half_block() {
    assert_eq!(key_wrap_expansion(Length::Len64), 12);
    let factory = factory();
    let wrapper = factory.create_key_wrapper(&blowfish()).expect("wrapper should build");
    assert_eq!(wrapper.key_wrap_expansion(), 12);
}

#[test]
fn short_block_round_trip() {
    let factory = factory();
    let wrapper = factory.create_key_wrapper(&blowfish()).expect("wrapper should build");
    let kek = key(0x42);
    for len in [0usize, 1, 3, 4, 5, 8, 31, 64] {
        let data: Vec<u8> = (0u8..).take(len).collect();
        let wrapped = wrapper.secure_bytes(&kek, &data).expect("wrap should succeed");
        assert_eq!(wrapped.len(), len.div_ceil(4) * 4 + 12);
        let plain = wrapper.derive_bytes(&kek, &wrapped).expect("unwrap should succeed");
        assert_eq!(plain.expose(), data.as_slice());
    }
}

#[test]
fn short_block_detects_tampering_and_wrong_key() {
    let factory = factory();
    let wrapper = factory.create_key_wrapper(&blowfish()).expect("wrapper should build");
    let kek = key(0x42);
    let wrapped = wrapper.secure_bytes(&kek, b"GORDIAN").expect("wrap should succeed");
    assert_eq!(wrapped.len(), 20);

    assert!(matches!(
        wrapper.derive_bytes(&key(0x43), &wrapped),
        Err(CipherError::Integrity)
    ));
    for i in 0..wrapped.len() {
        let mut tampered = wrapped.clone();
        tampered[i] ^= 0x01;
        assert!(matches!(
            wrapper.derive_bytes(&kek, &tampered),
            Err(CipherError::Integrity)
        ));
    }
    assert!(matches!(
        wrapper.derive_bytes(&kek, &wrapped[..8]),
        Err(CipherError::InvalidLength(_))
    ));
}
