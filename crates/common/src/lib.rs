//! Shared building blocks for the shoes shop binaries and crates:
//! logging setup, filesystem sanity checks and small wire types.

pub mod env;
pub mod types;
pub mod utils;
