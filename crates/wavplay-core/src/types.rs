//! Core domain types for wavplay.

pub mod platform;
pub mod request;

pub use platform::Platform;
pub use request::PlaybackRequest;
