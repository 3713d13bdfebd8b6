//! Configuration for the terminal client.
//!
//! Values are resolved from built-in defaults, then `config.toml`, then
//! command-line flags and environment variables.

mod config;

pub use config::*;
