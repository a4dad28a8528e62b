//! # Checkpoints Testkit
//!
//! Shared testing utilities for the checkpoint engine workspace:
//! proptest generators for core types, deterministic synthetic-chain
//! fixtures (including an in-memory [`BlockSource`]), and the
//! `cn_fast_hash` known-answer vector table.
//!
//! [`BlockSource`]: checkpoints_engine::BlockSource

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::{synthetic_chain, MemorySource};
pub use vectors::{assert_backend_matches_vectors, HashVector, HASH_VECTORS};
