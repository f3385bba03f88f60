//! Fuzz target for the wrapped-key envelope decoder.
//!
//! Feeds arbitrary bytes to `WrappedKeyEnvelope::from_der` and arbitrary
//! strings to the dotted identifier parser. Must never panic.
//!
//! # Usage
//!
//! ```sh
//! cd crates/gordian-cipher
//! cargo +nightly fuzz run envelope_decode -- -max_len=4096
//! ```

#![no_main]

use gordian_cipher::{AlgorithmIdentifier, WrappedKeyEnvelope};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(envelope) = WrappedKeyEnvelope::from_der(data) {
        // Anything that decodes must re-encode.
        let _ = envelope.to_der();
    }
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(id) = s.parse::<AlgorithmIdentifier>() {
            let _ = id.to_oid();
        }
    }
});
