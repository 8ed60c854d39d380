//! Client configuration resolved from global CLI options and environment.

use std::{path::PathBuf, time::Duration};

use reqwest::Url;
use tracing::debug;

use crate::{cli::GlobalArgs, Error, Result};

pub const DEFAULT_SERVER_URL: &str = "https://localhost";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const IDENTITY_FILE_NAME: &str = "consumer.json";

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub server_url: Url,
    pub identity_path: PathBuf,
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn from_args(args: &GlobalArgs) -> Result<Self> {
        let server_url = parse_server_url(&args.server)?;

        if args.timeout_secs == 0 {
            return Err(Error::Cli("timeout_secs must be greater than zero".into()).into());
        }

        let identity_path = args
            .identity_file
            .clone()
            .unwrap_or_else(default_identity_path);

        debug!(server = %server_url, identity = %identity_path.display(), "client config resolved");

        Ok(Self {
            server_url,
            identity_path,
            timeout: Duration::from_secs(args.timeout_secs),
        })
    }
}

/// `<config_dir>/repobind/consumer.json`, or `./consumer.json` when the
/// platform has no config directory.
pub fn default_identity_path() -> PathBuf {
    dirs::config_dir()
        .map(|dir| dir.join("repobind").join(IDENTITY_FILE_NAME))
        .unwrap_or_else(|| PathBuf::from(IDENTITY_FILE_NAME))
}

pub fn parse_server_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw.trim()).map_err(|e| Error::InvalidServerUrl(format!("{raw}: {e}")))?;
    match url.scheme() {
        "http" | "https" => {}
        other => {
            return Err(
                Error::InvalidServerUrl(format!("{raw}: unsupported scheme {other}")).into(),
            )
        }
    }
    if url.cannot_be_a_base() {
        return Err(Error::InvalidServerUrl(raw.to_string()).into());
    }
    Ok(url)
}
