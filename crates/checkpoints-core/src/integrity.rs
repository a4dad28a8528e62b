//! Transport-level integrity over the encoded checkpoint file.
//!
//! This layer is plain SHA-256 and exists purely for corruption detection
//! during distribution; it does not bind to the chain (that is what the
//! Keccak commitment inside the file is for).

use sha2::{Digest as _, Sha256};
use thiserror::Error;

/// Filename used in the published sidecar line.
pub const CHECKPOINT_FILE_NAME: &str = "checkpoints.dat";

/// Compute the SHA-256 of the encoded file as lowercase hex.
pub fn sha256_hex(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

/// Outcome of comparing a computed digest against a published one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verification {
    Match,
    Mismatch,
}

impl Verification {
    pub fn is_match(&self) -> bool {
        matches!(self, Verification::Match)
    }
}

/// Compare a computed SHA-256 hex string against a published value.
///
/// Hex case is irrelevant; anything else is a mismatch.
pub fn verify(computed: &str, published: &str) -> Verification {
    if computed.eq_ignore_ascii_case(published.trim()) {
        Verification::Match
    } else {
        Verification::Mismatch
    }
}

/// Errors from parsing the published sidecar line.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SidecarError {
    #[error("sidecar line is empty")]
    Empty,

    #[error("sidecar digest is not 64 hex characters: {0:?}")]
    BadDigest(String),
}

/// Render the sidecar text line, `sha256sum` convention (two spaces):
/// `"<64-hex sha256>  checkpoints.dat\n"`.
pub fn sidecar_line(sha256: &str) -> String {
    format!("{}  {}\n", sha256, CHECKPOINT_FILE_NAME)
}

/// Extract the digest from a published sidecar line.
pub fn parse_sidecar_line(line: &str) -> Result<String, SidecarError> {
    let token = line.split_whitespace().next().ok_or(SidecarError::Empty)?;
    if token.len() != 64 || !token.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(SidecarError::BadDigest(token.to_string()));
    }
    Ok(token.to_ascii_lowercase())
}
