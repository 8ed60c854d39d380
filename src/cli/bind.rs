//! Implementation of `repobind bind` subcommand.

use clap::Args;
use tracing::instrument;

use crate::{BindingClient, Outcome, Result};

#[derive(Debug, Clone, Args)]
pub struct BindArgs {
    /// repository id
    #[arg(long = "repo-id")]
    pub repo_id: String,
}

#[instrument(skip_all, fields(repo_id = %args.repo_id))]
pub fn execute(client: &BindingClient, args: BindArgs) -> Result<Outcome> {
    client.bind(&args.repo_id)
}
