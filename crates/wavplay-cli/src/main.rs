//! # wavplay
//!
//! Play one audio file through the platform's command-line player.
//!
//! ```text
//! wavplay [--sync] [--grace-ms <ms>] <path>
//! wavplay --json '{"path": "chime.wav", "sync": true}'
//! ```
//!
//! Ctrl-C stops the player and exits cleanly. Exit status is 0 on success,
//! 2 for a bad request and 1 for any other failure.

use std::process::ExitCode;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use tracing::{debug, error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use wavplay_core::{Error, PlaybackRequest};
use wavplay_player::{PlaybackController, PlayerConfig};

const USAGE: &str = "\
usage: wavplay [--sync] [--grace-ms <ms>] <path>
       wavplay --json '<request>'

options:
  --sync           wait until the player exits
  --grace-ms <ms>  how long to watch for an early failure (default 500)
  --json <request> take the request as a JSON object
  -h, --help       show this message";

/// What the command line asked for.
#[derive(Debug, PartialEq, Eq)]
enum Invocation {
    Help,
    Play {
        request: PlaybackRequest,
        grace_period: Option<Duration>,
    },
}

fn parse_args(args: &[String]) -> Result<Invocation> {
    let mut sync = false;
    let mut grace_period = None;
    let mut json = None;
    let mut path = None;

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-h" | "--help" => return Ok(Invocation::Help),
            "--sync" => sync = true,
            "--grace-ms" => {
                let value = iter.next().context("--grace-ms needs a value")?;
                let ms: u64 = value
                    .parse()
                    .with_context(|| format!("invalid --grace-ms value: {value}"))?;
                grace_period = Some(Duration::from_millis(ms));
            }
            "--json" => {
                json = Some(iter.next().context("--json needs a value")?.clone());
            }
            other if other.starts_with("--") => bail!("unknown option: {other}"),
            other => {
                if path.replace(other.to_string()).is_some() {
                    bail!("only one path can be played at a time");
                }
            }
        }
    }

    let request = match (json, path) {
        (Some(_), Some(_)) => bail!("give either a path or --json, not both"),
        (Some(json), None) => {
            let request = PlaybackRequest::from_json(&json)?;
            if sync {
                request.with_sync(true)
            } else {
                request
            }
        }
        (None, Some(path)) => PlaybackRequest::new(path).with_sync(sync),
        (None, None) => return Ok(Invocation::Help),
    };

    Ok(Invocation::Play {
        request,
        grace_period,
    })
}

/// Process exit status for a failed playback.
const fn failure_status(err: &Error) -> u8 {
    if err.is_validation() {
        2
    } else {
        1
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wavplay=info,wavplay_player=info".into()),
        )
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let invocation = match parse_args(&args) {
        Ok(invocation) => invocation,
        Err(e) => {
            error!("{e:#}");
            return Ok(ExitCode::from(2));
        }
    };
    let (request, grace_period) = match invocation {
        Invocation::Help => {
            println!("{USAGE}");
            return Ok(ExitCode::SUCCESS);
        }
        Invocation::Play {
            request,
            grace_period,
        } => (request, grace_period),
    };

    let mut config = PlayerConfig::new();
    if let Some(grace_period) = grace_period {
        config = config.with_grace_period(grace_period);
    }
    let controller = PlaybackController::with_config(config);
    debug!("Platform: {}", controller.config().platform());

    let path = request.path.clone();
    let playback = controller.play(request);
    tokio::pin!(playback);

    let result = tokio::select! {
        result = &mut playback => result,
        _ = tokio::signal::ctrl_c() => {
            info!("Interrupted, stopping playback");
            controller.stop();
            playback.await
        }
    };

    match result {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(e) => {
            error!("Failed to play {}: {e}", path.display());
            Ok(ExitCode::from(failure_status(&e)))
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_parse_path() {
        let parsed = parse_args(&args(&["chime.wav"])).unwrap();
        assert_eq!(
            parsed,
            Invocation::Play {
                request: PlaybackRequest::new("chime.wav"),
                grace_period: None,
            }
        );
    }

    #[test]
    fn test_parse_flags() {
        let parsed = parse_args(&args(&["--sync", "--grace-ms", "250", "a.wav"])).unwrap();
        assert_eq!(
            parsed,
            Invocation::Play {
                request: PlaybackRequest::new("a.wav").with_sync(true),
                grace_period: Some(Duration::from_millis(250)),
            }
        );
    }

    #[test]
    fn test_parse_json() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let json = format!(r#"{{"path": "{}", "sync": true}}"#, file.path().display());
        let parsed = parse_args(&args(&["--json", json.as_str()])).unwrap();
        assert_eq!(
            parsed,
            Invocation::Play {
                request: PlaybackRequest::new(file.path()).with_sync(true),
                grace_period: None,
            }
        );
        assert!(parse_args(&args(&["--json", r#"{"sync": true}"#])).is_err());
    }

    #[test]
    fn test_failure_status() {
        assert_eq!(failure_status(&Error::MissingPath), 2);
        assert_eq!(failure_status(&Error::InvalidSyncFlag("1".into())), 2);
        assert_eq!(failure_status(&Error::PlaybackFailed(Some(1))), 1);
    }

    #[test]
    fn test_parse_help_and_errors() {
        assert_eq!(parse_args(&[]).unwrap(), Invocation::Help);
        assert_eq!(parse_args(&args(&["-h"])).unwrap(), Invocation::Help);
        assert!(parse_args(&args(&["--grace-ms", "soon", "a.wav"])).is_err());
        assert!(parse_args(&args(&["--loud", "a.wav"])).is_err());
        assert!(parse_args(&args(&["a.wav", "b.wav"])).is_err());
        assert!(parse_args(&args(&["--json", "{}", "a.wav"])).is_err());
    }
}
