//! Acceptance of a downloaded `checkpoints.dat`.
//!
//! A malformed file is rejected outright. On a transport SHA-256 mismatch
//! the default policy blocks acceptance; proceeding past a mismatch exists
//! only as an explicit opt-in and is loudly logged.

use tracing::{info, warn};

use checkpoints_core::{codec, sha256_hex, verify, CheckpointFile};

use crate::error::{EngineError, Result};

/// What to do when a downloaded file's SHA-256 disagrees with the
/// published value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MismatchPolicy {
    /// Refuse the file. The safe default.
    #[default]
    Reject,
    /// Log a warning and accept anyway.
    Warn,
}

/// Validate a downloaded checkpoint file against its published digest.
///
/// `published` is the digest from the `.sha256` sidecar when one was
/// available; without it acceptance proceeds on the length check alone.
pub fn accept_download(
    bytes: &[u8],
    published: Option<&str>,
    policy: MismatchPolicy,
) -> Result<CheckpointFile> {
    let file = codec::decode(bytes)?;

    match published {
        Some(published) => {
            let computed = sha256_hex(bytes);
            if !verify(&computed, published).is_match() {
                match policy {
                    MismatchPolicy::Reject => {
                        return Err(EngineError::IntegrityMismatch {
                            computed,
                            published: published.to_string(),
                        });
                    }
                    MismatchPolicy::Warn => {
                        warn!(
                            %computed,
                            published,
                            "accepting checkpoint file despite SHA-256 mismatch"
                        );
                    }
                }
            }
        }
        None => {
            info!("no published SHA-256 available; skipping transport verification");
        }
    }

    Ok(file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use checkpoints_core::{CodecError, Digest, GroupDigestPair};

    fn encoded(n: u8) -> Vec<u8> {
        let pairs = (0..n)
            .map(|i| GroupDigestPair {
                hash_of_hashes: Digest::from_bytes([i; 32]),
                hash_of_weights: Digest::from_bytes([i ^ 0xff; 32]),
            })
            .collect();
        codec::encode(&CheckpointFile::new(pairs)).unwrap()
    }

    #[test]
    fn test_accepts_matching_digest() {
        let bytes = encoded(2);
        let digest = sha256_hex(&bytes);
        let file = accept_download(&bytes, Some(&digest), MismatchPolicy::Reject).unwrap();
        assert_eq!(file.group_count(), 2);
    }

    #[test]
    fn test_rejects_mismatch_by_default() {
        let bytes = encoded(2);
        let wrong = sha256_hex(b"something else");
        let err = accept_download(&bytes, Some(&wrong), MismatchPolicy::default()).unwrap_err();
        assert!(matches!(err, EngineError::IntegrityMismatch { .. }));
    }

    #[test]
    fn test_warn_policy_proceeds() {
        let bytes = encoded(1);
        let wrong = sha256_hex(b"something else");
        let file = accept_download(&bytes, Some(&wrong), MismatchPolicy::Warn).unwrap();
        assert_eq!(file.group_count(), 1);
    }

    #[test]
    fn test_no_published_digest_proceeds() {
        let bytes = encoded(3);
        assert!(accept_download(&bytes, None, MismatchPolicy::Reject).is_ok());
    }

    #[test]
    fn test_malformed_rejected_under_any_policy() {
        let mut bytes = encoded(2);
        bytes.truncate(100);
        let digest = sha256_hex(&bytes);
        let err = accept_download(&bytes, Some(&digest), MismatchPolicy::Warn).unwrap_err();
        assert!(matches!(
            err,
            EngineError::Codec(CodecError::MalformedFile {
                expected: 132,
                got: 100
            })
        ));
    }
}
