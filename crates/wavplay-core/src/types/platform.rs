//! Host platform families.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Platform family, used to pick a native player.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// Windows (`PowerShell` + `Media.SoundPlayer`).
    Windows,
    /// macOS (`afplay`).
    Mac,
    /// Linux (`aplay`).
    Linux,
    /// Anything else. No player is available.
    Other,
}

impl Platform {
    /// Resolve the platform of the running host.
    pub fn current() -> Self {
        Self::from_os(std::env::consts::OS)
    }

    /// Map an OS name as reported by `std::env::consts::OS`.
    pub fn from_os(os: &str) -> Self {
        match os {
            "windows" => Self::Windows,
            "macos" => Self::Mac,
            "linux" => Self::Linux,
            _ => Self::Other,
        }
    }

    /// Whether a native player is known for this platform.
    pub const fn is_supported(&self) -> bool {
        !matches!(self, Self::Other)
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Windows => "windows",
            Self::Mac => "macos",
            Self::Linux => "linux",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_os() {
        assert_eq!(Platform::from_os("windows"), Platform::Windows);
        assert_eq!(Platform::from_os("macos"), Platform::Mac);
        assert_eq!(Platform::from_os("linux"), Platform::Linux);
        assert_eq!(Platform::from_os("freebsd"), Platform::Other);
        assert_eq!(Platform::from_os(""), Platform::Other);
    }

    #[test]
    fn test_supported() {
        assert!(Platform::Linux.is_supported());
        assert!(!Platform::Other.is_supported());
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_current_linux() {
        assert_eq!(Platform::current(), Platform::Linux);
    }

    #[test]
    fn test_display() {
        assert_eq!(Platform::Mac.to_string(), "macos");
        assert_eq!(Platform::Other.to_string(), "other");
    }
}
