//! Pipelines run by the hosts on every input change
//!
//! Each run takes an immutable snapshot of the form fields and returns a
//! complete output view. Nothing is carried over from a previous run, so the
//! last run always wins.

pub mod generation;
pub mod reconstruction;
