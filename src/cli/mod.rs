//! Command-line surface: global options plus the `bind` and `unbind`
//! subcommands.

use std::{io::Write, path::PathBuf};

use clap::{error::ErrorKind, Args, CommandFactory, Parser, Subcommand};

use crate::{
    config::{DEFAULT_SERVER_URL, DEFAULT_TIMEOUT_SECS},
    logging::LogFormat,
    output::{self, OutputFormat},
    BindingClient, Error, Outcome, Result,
};

pub mod bind;
pub mod unbind;

#[derive(Debug, Clone)]
pub enum Command {
    Bind(bind::BindArgs),
    Unbind(unbind::UnbindArgs),
}

#[derive(Debug, Clone)]
pub struct CliArgs {
    pub global: GlobalArgs,
    pub command: Command,
}

#[derive(Debug, Clone, Args)]
pub struct GlobalArgs {
    /// Base URL of the repository server
    #[arg(
        long = "server",
        global = true,
        env = "REPOBIND_SERVER",
        default_value = DEFAULT_SERVER_URL
    )]
    pub server: String,

    /// Consumer identity file written at registration
    #[arg(long = "identity-file", global = true, env = "REPOBIND_IDENTITY_FILE")]
    pub identity_file: Option<PathBuf>,

    /// Request timeout in seconds
    #[arg(
        long = "timeout-secs",
        global = true,
        env = "REPOBIND_TIMEOUT_SECS",
        default_value_t = DEFAULT_TIMEOUT_SECS
    )]
    pub timeout_secs: u64,

    /// Output machine-readable JSON
    #[arg(long = "json", global = true)]
    pub json: bool,

    /// Format of diagnostic logs written to stderr
    #[arg(long = "log-format", global = true, value_enum, default_value = "human")]
    pub log_format: LogFormat,
}

impl GlobalArgs {
    pub fn output_format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "repobind",
    version,
    about = "Bind this consumer to yum repositories on a repository server",
    disable_help_subcommand = true
)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Subcommands,
}

#[derive(Subcommand, Debug)]
enum Subcommands {
    /// binds this consumer to a repository
    Bind(bind::BindArgs),
    /// unbinds this consumer from a repository
    Unbind(unbind::UnbindArgs),
}

/// Parse CLI arguments into internal representation.
///
/// `--help` and `--version` print and exit the process; every other parse
/// failure is returned as [`Error::Cli`].
pub fn parse_args<I, S>(args: I) -> Result<CliArgs>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let argv: Vec<String> = args.into_iter().map(Into::into).collect();
    let cli = match Cli::try_parse_from(argv) {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            err.exit()
        }
        Err(err) => return Err(Error::Cli(err.to_string().trim_end().to_string()).into()),
    };

    let command = match cli.command {
        Subcommands::Bind(args) => Command::Bind(args),
        Subcommands::Unbind(args) => Command::Unbind(args),
    };

    Ok(CliArgs {
        global: cli.global,
        command,
    })
}

/// Run the parsed command against `client` and render its outcome to `out`.
pub fn dispatch(args: CliArgs, client: &BindingClient, out: &mut dyn Write) -> Result<Outcome> {
    let outcome = match args.command {
        Command::Bind(b) => bind::execute(client, b)?,
        Command::Unbind(u) => unbind::execute(client, u)?,
    };
    output::render(&outcome, args.global.output_format(), out)?;
    Ok(outcome)
}

/// Names of the registered subcommands.
pub fn command_names() -> Vec<String> {
    Cli::command()
        .get_subcommands()
        .map(|c| c.get_name().to_string())
        .collect()
}

/// Build the underlying clap `Command` (useful for help/usage contract tests).
pub fn clap_command() -> clap::Command {
    Cli::command()
}
