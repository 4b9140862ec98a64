//! # wavplay-core
//!
//! Core types and error handling for wavplay, a thin controller over
//! platform-native command-line audio players.

pub mod error;
pub mod types;

pub use error::{Error, Result};
pub use types::*;
