//! Native player command lines.

use std::ffi::OsString;
use std::path::Path;
use std::process::Stdio;

use tokio::process::Command;
use wavplay_core::Platform;

/// A player program and its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerCommand {
    program: OsString,
    args: Vec<OsString>,
}

impl PlayerCommand {
    pub fn new(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    #[must_use]
    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// The native command that plays `path` on `platform`, if there is one.
    pub fn for_platform(platform: Platform, path: &Path) -> Option<Self> {
        match platform {
            Platform::Windows => Some(Self::new("powershell").args([
                "-c".to_string(),
                format!(
                    "(New-Object Media.SoundPlayer '{}').PlaySync();",
                    path.to_string_lossy().replace('\'', "''")
                ),
            ])),
            Platform::Mac => Some(Self::new("afplay").arg(path)),
            Platform::Linux => Some(Self::new("aplay").arg(path)),
            Platform::Other => None,
        }
    }

    /// Use this command as a template: `path` becomes its final argument.
    #[must_use]
    pub fn with_path(&self, path: &Path) -> Self {
        self.clone().arg(path)
    }

    /// Program name, for logs and errors.
    pub fn program(&self) -> String {
        self.program.to_string_lossy().into_owned()
    }

    pub fn arguments(&self) -> &[OsString] {
        &self.args
    }

    /// Build a tokio command with all stdio discarded.
    pub fn build(&self) -> Command {
        let mut command = Command::new(&self.program);
        command
            .args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());
        command
    }
}
