//! `cn_fast_hash`: Keccak-256 with original Keccak padding.
//!
//! This is the base hash primitive of the Cryptonote blockchain family.
//! It is Keccak-256, **not** SHA3-256: SHA3's FIPS-202 domain-separated
//! padding (`0x06`) produces a different digest that will never match an
//! independently computed checkpoint. The padding here appends `0x01`,
//! zero-fills to the 136-byte rate, and ORs `0x80` into the final byte.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::keccak::keccak_f1600;

/// Sponge rate in bytes (1088 bits; capacity 512 bits).
pub const KECCAK_RATE: usize = 136;

/// A 32-byte Keccak-256 digest.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Digest(pub [u8; 32]);

impl Digest {
    /// Create from raw bytes.
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Convert to hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse from hex string.
    pub fn from_hex(s: &str) -> Result<Self, hex::FromHexError> {
        let bytes = hex::decode(s)?;
        if bytes.len() != 32 {
            return Err(hex::FromHexError::InvalidStringLength);
        }
        let mut arr = [0u8; 32];
        arr.copy_from_slice(&bytes);
        Ok(Self(arr))
    }

    /// The zero digest (sentinel value).
    pub const ZERO: Self = Self([0u8; 32]);
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Digest({})", &self.to_hex()[..16])
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl AsRef<[u8]> for Digest {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; 32]> for Digest {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

/// Compute `cn_fast_hash` (Keccak-256 with Keccak padding) over `data`.
pub fn cn_fast_hash(data: &[u8]) -> Digest {
    let mut state = [0u64; 25];

    let mut padded = Vec::with_capacity(data.len() + KECCAK_RATE);
    padded.extend_from_slice(data);
    padded.push(0x01);
    while padded.len() % KECCAK_RATE != 0 {
        padded.push(0x00);
    }
    let last = padded.len() - 1;
    padded[last] |= 0x80;

    // Absorb: 17 little-endian u64 lanes per rate block.
    for block in padded.chunks_exact(KECCAK_RATE) {
        for i in 0..KECCAK_RATE / 8 {
            let mut lane = [0u8; 8];
            lane.copy_from_slice(&block[i * 8..i * 8 + 8]);
            state[i] ^= u64::from_le_bytes(lane);
        }
        keccak_f1600(&mut state);
    }

    // Squeeze: 32 bytes < rate, so a single squeeze suffices.
    let mut out = [0u8; 32];
    for i in 0..4 {
        out[i * 8..i * 8 + 8].copy_from_slice(&state[i].to_le_bytes());
    }
    Digest(out)
}

/// The hash capability used by the aggregator.
///
/// The pure implementation is always available; a faster backend (e.g. a
/// native library binding) can be substituted behind the same interface.
/// The backend is resolved once when the aggregator is constructed, not
/// per call.
pub trait Keccak256: Send + Sync {
    /// Hash arbitrary bytes to a 32-byte digest.
    fn digest(&self, data: &[u8]) -> Digest;
}

/// The from-scratch software backend.
#[derive(Debug, Clone, Copy, Default)]
pub struct PureKeccak;

impl Keccak256 for PureKeccak {
    fn digest(&self, data: &[u8]) -> Digest {
        cn_fast_hash(data)
    }
}
