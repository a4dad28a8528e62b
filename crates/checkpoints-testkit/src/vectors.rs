//! Shared known-answer vectors for `cn_fast_hash`.
//!
//! Any alternate hash backend must reproduce these exactly; they are the
//! standard Keccak-256 values, deliberately distinct from SHA3-256.

use checkpoints_core::{cn_fast_hash, Digest, Keccak256};

/// A single known-answer vector.
pub struct HashVector {
    pub name: &'static str,
    pub input: &'static [u8],
    pub digest_hex: &'static str,
}

/// The canonical vector table.
pub const HASH_VECTORS: &[HashVector] = &[
    HashVector {
        name: "empty",
        input: b"",
        digest_hex: "c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470",
    },
    HashVector {
        name: "abc",
        input: b"abc",
        digest_hex: "4e03657aea45a94fc7d47ba826c8d667c0d1e6e33a64a036ec44f58fa12d6c45",
    },
    HashVector {
        name: "fox",
        input: b"The quick brown fox jumps over the lazy dog",
        digest_hex: "4d741b6f1eb29cb2a9b9911c82f56fa8d73b04959d3d9d222895df6c0b28aa15",
    },
];

/// Assert that a backend reproduces every vector. Panics with the vector
/// name on the first divergence.
pub fn assert_backend_matches_vectors<B: Keccak256>(backend: &B) {
    for vector in HASH_VECTORS {
        let got = backend.digest(vector.input).to_hex();
        assert_eq!(
            got, vector.digest_hex,
            "backend diverges on vector {:?}",
            vector.name
        );
    }
}

/// Parse a vector's expected digest.
pub fn expected_digest(vector: &HashVector) -> Digest {
    Digest::from_hex(vector.digest_hex).expect("vector table digest is valid hex")
}
