//! Playback request type.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// A request to play one audio file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlaybackRequest {
    /// Path of the audio file.
    pub path: PathBuf,
    /// Wait for the player to exit instead of resolving after the grace period.
    #[serde(default)]
    pub sync: bool,
}

impl PlaybackRequest {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            sync: false,
        }
    }

    #[must_use]
    pub fn with_sync(mut self, sync: bool) -> Self {
        self.sync = sync;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Build a request from an untyped JSON value.
    ///
    /// Checks, in order: the value is an object, `path` is present, `path`
    /// is a non-empty string, the file exists, and `sync` (if present) is a
    /// boolean.
    pub fn from_value(value: &Value) -> Result<Self> {
        let Some(params) = value.as_object() else {
            return Err(Error::InvalidArgument(format!(
                "request must be an object, got {}",
                json_kind(value)
            )));
        };

        let path = match params.get("path") {
            None => return Err(Error::MissingPath),
            Some(Value::String(path)) if !path.is_empty() => path.clone(),
            Some(Value::String(_)) => return Err(Error::InvalidPath("empty string".to_string())),
            Some(other) => return Err(Error::InvalidPath(format!("got {}", json_kind(other)))),
        };
        let request = Self::new(path);
        request.validate()?;

        let sync = match params.get("sync") {
            None => false,
            Some(Value::Bool(sync)) => *sync,
            Some(other) => return Err(Error::InvalidSyncFlag(other.to_string())),
        };

        Ok(request.with_sync(sync))
    }

    /// Parse a JSON document and build a request from it.
    pub fn from_json(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(&value)
    }

    /// Check the path is non-empty and exists right now.
    ///
    /// This is an existence check only; the file format is left to the player.
    pub fn validate(&self) -> Result<()> {
        if self.path.as_os_str().is_empty() {
            return Err(Error::InvalidPath("empty string".to_string()));
        }
        if !self.path.exists() {
            return Err(Error::FileNotFound(self.path.clone()));
        }
        Ok(())
    }
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
