//! Consumer-to-repository bindings.
//!
//! A binding ties a registered consumer to a repository through a single
//! distributor. Bindings live only on the server; this module issues the
//! create/remove requests and classifies what came back into an [`Outcome`].

pub mod client;

pub use client::BindingClient;

use std::fmt;

use serde::Serialize;

/// Distributor every binding made by this tool goes through.
pub const YUM_DISTRIBUTOR_ID: &str = "yum_distributor";

pub const NOT_REGISTERED_MESSAGE: &str = "This consumer is not registered to the server";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Binding {
    pub consumer_id: String,
    pub repo_id: String,
    pub distributor_id: String,
}

impl Binding {
    pub fn yum(consumer_id: impl Into<String>, repo_id: impl Into<String>) -> Self {
        Self {
            consumer_id: consumer_id.into(),
            repo_id: repo_id.into(),
            distributor_id: YUM_DISTRIBUTOR_ID.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Bound,
    Unbound,
}

/// Which server-side entity a not-found reply referred to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Missing {
    Consumer { id: String },
    Repository { id: String },
    Binding { consumer_id: String, repo_id: String },
}

impl fmt::Display for Missing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Missing::Consumer { id } => write!(f, "Consumer [{id}] does not exist on the server"),
            Missing::Repository { id } => {
                write!(f, "Repository [{id}] does not exist on the server")
            }
            Missing::Binding {
                consumer_id,
                repo_id,
            } => write!(
                f,
                "Binding [consumer: {consumer_id}, repository: {repo_id}] does not exist on the server"
            ),
        }
    }
}

/// Terminal result of a single bind or unbind invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Success { action: Action, binding: Binding },
    NotRegistered,
    NotFound(Missing),
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success { .. })
    }

    pub fn exit_code(&self) -> i32 {
        if self.is_success() {
            0
        } else {
            1
        }
    }

    pub fn message(&self) -> String {
        match self {
            Outcome::Success {
                action: Action::Bound,
                binding,
            } => format!(
                "Consumer [{}] successfully bound to repository [{}]",
                binding.consumer_id, binding.repo_id
            ),
            Outcome::Success {
                action: Action::Unbound,
                binding,
            } => format!(
                "Consumer [{}] successfully unbound from repository [{}]",
                binding.consumer_id, binding.repo_id
            ),
            Outcome::NotRegistered => NOT_REGISTERED_MESSAGE.to_string(),
            Outcome::NotFound(missing) => missing.to_string(),
        }
    }
}
