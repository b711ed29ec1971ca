// Library behind the slip39-tool CLI and the browser page bindings

#[cfg(feature = "cli")]
pub mod cli;
#[cfg(feature = "cli")]
pub mod commands;
pub mod domain;
pub mod hex_codec;
pub mod pipeline;
pub mod primitive;
pub mod secret;
pub mod slip39;
pub mod validate;
pub mod wasm;
