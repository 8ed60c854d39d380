use std::path::PathBuf;

use thiserror::Error;

pub mod binding;
pub mod cli;
pub mod config;
pub mod identity;
pub mod logging;
pub mod output;
pub mod remote;

pub use binding::{Action, Binding, BindingClient, Missing, Outcome, YUM_DISTRIBUTOR_ID};

pub type Result<T> = anyhow::Result<T>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("cli error: {0}")]
    Cli(String),
    #[error("invalid server url: {0}")]
    InvalidServerUrl(String),
    #[error("invalid identity file {path}: {reason}")]
    InvalidIdentity { path: PathBuf, reason: String },
    #[error(transparent)]
    Remote(#[from] remote::ServiceError),
    #[error("serialization error")]
    Serde(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Entry point for the library, called by the CLI thin wrapper.
///
/// Builds the production identity source and HTTP service from the global
/// options, runs the selected command and renders its outcome to stdout.
pub fn run<I, S>(args: I) -> Result<Outcome>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let cli_args = cli::parse_args(args.into_iter().map(Into::into))?;
    logging::init_logging(cli_args.global.log_format)?;

    let config = config::ClientConfig::from_args(&cli_args.global)?;
    let client = BindingClient::new(
        Box::new(identity::IdentityFile::new(&config.identity_path)),
        Box::new(remote::HttpBindingService::new(&config)?),
    );

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    cli::dispatch(cli_args, &client, &mut out)
}
