//! Property-based tests for slip39-tool
//!
//! This test suite uses quickcheck to verify correctness across random inputs,
//! including random secrets, passphrases, thresholds, and share selections.
//!
//! Run with: cargo test --test proptests

#[path = "proptests/hex.rs"]
mod hex;

#[path = "proptests/split_combine.rs"]
mod split_combine;
