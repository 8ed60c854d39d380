//! Implementation of `repobind unbind` subcommand.

use clap::Args;
use tracing::instrument;

use crate::{BindingClient, Outcome, Result};

#[derive(Debug, Clone, Args)]
pub struct UnbindArgs {
    /// repository id
    #[arg(long = "repo-id")]
    pub repo_id: String,

    /// delete the binding immediately and discontinue tracking consumer actions
    #[arg(long = "force")]
    pub force: bool,
}

#[instrument(skip_all, fields(repo_id = %args.repo_id, force = args.force))]
pub fn execute(client: &BindingClient, args: UnbindArgs) -> Result<Outcome> {
    client.unbind(&args.repo_id, args.force)
}
