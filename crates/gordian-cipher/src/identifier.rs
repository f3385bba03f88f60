//! Algorithm identifiers: the canonical, versionable encoding of a key or
//! cipher choice as an OID arc sequence.
//!
//! Layout under [`ROOT`]:
//!
//! ```text
//! root.1.1.type.block.key              symmetric key
//! root.1.2.type.key[.sub]              stream key
//! root.2.1.type.block.key.mode[.pad]   symmetric cipher (pad only for padded modes)
//! root.2.2.type.key[.sub]              stream cipher
//! ```
//!
//! Every component arc is the component's declaration ordinal plus one, so an
//! arc is never zero and appending enum variants never moves existing
//! identifiers.

use crate::error::CipherError;
use crate::spec::{CipherSpec, KeySpec, StreamKeySpec, SymKeySpec};
use der::asn1::ObjectIdentifier;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Root arc sequence for every identifier issued by this crate.
///
/// 32473 is the private enterprise number reserved for documentation.
pub const ROOT: [u32; 8] = [1, 3, 6, 1, 4, 1, 32473, 1];

const KEY_BRANCH: u32 = 1;
const CIPHER_BRANCH: u32 = 2;
const SYM_BRANCH: u32 = 1;
const STREAM_BRANCH: u32 = 2;

const fn arc(ordinal: u32) -> u32 {
    ordinal.saturating_add(1)
}

/// An ordered sequence of OID arcs naming a key or cipher spec.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AlgorithmIdentifier(Vec<u32>);

impl AlgorithmIdentifier {
    /// Wrap an arbitrary arc sequence.
    #[must_use]
    pub fn from_arcs(arcs: Vec<u32>) -> Self {
        Self(arcs)
    }

    #[must_use]
    pub fn arcs(&self) -> &[u32] {
        &self.0
    }

    /// Identifier of a key spec.
    #[must_use]
    pub fn for_key_spec(spec: &KeySpec) -> Self {
        let mut arcs = branch(KEY_BRANCH);
        match spec {
            KeySpec::Sym(sym) => {
                arcs.push(SYM_BRANCH);
                push_sym_key(&mut arcs, sym);
            }
            KeySpec::Stream(stream) => {
                arcs.push(STREAM_BRANCH);
                push_stream_key(&mut arcs, stream);
            }
        }
        Self(arcs)
    }

    /// Identifier of a cipher spec.
    #[must_use]
    pub fn for_cipher_spec(spec: &CipherSpec) -> Self {
        let mut arcs = branch(CIPHER_BRANCH);
        match spec {
            CipherSpec::Sym(sym) => {
                arcs.push(SYM_BRANCH);
                push_sym_key(&mut arcs, sym.key_spec());
                arcs.push(arc(sym.mode().ordinal()));
                if sym.mode().has_padding() {
                    arcs.push(arc(sym.padding().ordinal()));
                }
            }
            CipherSpec::Stream(stream) => {
                arcs.push(STREAM_BRANCH);
                push_stream_key(&mut arcs, stream.key_spec());
            }
        }
        Self(arcs)
    }

    /// Convert to a DER object identifier.
    ///
    /// # Errors
    ///
    /// Returns `CipherError::Encoding` if the arcs do not form a valid OID.
    pub fn to_oid(&self) -> Result<ObjectIdentifier, CipherError> {
        ObjectIdentifier::new(&self.to_string())
            .map_err(|e| CipherError::Encoding(format!("invalid object identifier {self}: {e}")))
    }

    /// Build from a DER object identifier.
    #[must_use]
    pub fn from_oid(oid: &ObjectIdentifier) -> Self {
        Self(oid.arcs().collect())
    }
}

fn branch(kind: u32) -> Vec<u32> {
    let mut arcs = ROOT.to_vec();
    arcs.push(kind);
    arcs
}

fn push_sym_key(arcs: &mut Vec<u32>, spec: &SymKeySpec) {
    arcs.push(arc(spec.key_type().ordinal()));
    arcs.push(arc(spec.block_length().ordinal()));
    arcs.push(arc(spec.key_length().ordinal()));
}

fn push_stream_key(arcs: &mut Vec<u32>, spec: &StreamKeySpec) {
    arcs.push(arc(spec.key_type().ordinal()));
    arcs.push(arc(spec.key_length().ordinal()));
    if let Some(sub) = spec.sub_key_type() {
        arcs.push(arc(sub.ordinal()));
    }
}

impl fmt::Display for AlgorithmIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for a in &self.0 {
            if !first {
                f.write_str(".")?;
            }
            write!(f, "{a}")?;
            first = false;
        }
        Ok(())
    }
}

impl FromStr for AlgorithmIdentifier {
    type Err = CipherError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(CipherError::Encoding("empty algorithm identifier".into()));
        }
        s.split('.')
            .map(|part| {
                part.parse::<u32>().map_err(|e| {
                    CipherError::Encoding(format!("invalid identifier arc {part:?}: {e}"))
                })
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }
}

impl Serialize for AlgorithmIdentifier {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for AlgorithmIdentifier {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let dotted = String::deserialize(deserializer)?;
        dotted.parse().map_err(serde::de::Error::custom)
    }
}
