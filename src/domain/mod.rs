//! Domain types for share generation
//!
//! Validated newtypes behind the generation form:
//! - [`MasterSecret`] - Secret bytes (>= 16, even length)
//! - [`ShareCount`] - Total number of shares to create (1..=16)
//! - [`Threshold`] - Minimum shares required for reconstruction (>= 1)
//! - [`SplitConfig`] - Validated threshold and share count pair
//! - [`DerivationPath`] - Address of a share inside a split result

mod config;
mod derivation_path;
mod master_secret;
mod share_count;
mod threshold;

pub use config::SplitConfig;
pub use derivation_path::DerivationPath;
pub use master_secret::MasterSecret;
pub use share_count::ShareCount;
pub use threshold::Threshold;
