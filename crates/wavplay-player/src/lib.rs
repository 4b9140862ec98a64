//! # wavplay-player
//!
//! Plays a single audio file through the host's command-line player.
//!
//! Features:
//! - Platform dispatch to `PowerShell`, `afplay` or `aplay`
//! - Fire-and-forget completion after a short grace period, or a full wait
//!   for the player to exit
//! - Global `stop()` that ends the tracked player without reporting failure

pub mod command;
pub mod config;
pub mod controller;

pub use command::PlayerCommand;
pub use config::{PlayerConfig, DEFAULT_GRACE_PERIOD};
pub use controller::PlaybackController;
