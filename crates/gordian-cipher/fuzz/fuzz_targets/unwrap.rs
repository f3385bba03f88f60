//! Fuzz target for key unwrapping.
//!
//! Feeds arbitrary bytes to `KeyWrapper::derive_bytes` and
//! `derive_bytes_envelope` under a fixed AES-128 key. Every input must fail
//! cleanly or unwrap; none may panic.
//!
//! # Usage
//!
//! ```sh
//! cd crates/gordian-cipher
//! cargo +nightly fuzz run unwrap -- -max_len=8192
//! ```

#![no_main]

use gordian_cipher::{CipherFactory, KeyGenerator, Length, RustCryptoProvider, SymKeySpec};
use libfuzzer_sys::fuzz_target;
use std::sync::Arc;

fuzz_target!(|data: &[u8]| {
    let Ok(factory) = CipherFactory::new(Arc::new(RustCryptoProvider)) else {
        return;
    };
    let spec = SymKeySpec::aes(Length::Len128);
    let Ok(wrapper) = factory.create_key_wrapper(&spec) else {
        return;
    };
    let Ok(key) = KeyGenerator::new(spec.into()).build_key_from_bytes(&[0x5c; 16]) else {
        return;
    };
    let _ = wrapper.derive_bytes(&key, data);
    let _ = wrapper.derive_bytes_envelope(&key, data);
});
