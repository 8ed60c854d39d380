use tracing::{debug, info, warn};

use super::{Action, Binding, Missing, Outcome};
use crate::{
    identity::IdentitySource,
    remote::{BindingService, ServiceError},
    Error, Result,
};

/// Issues bind/unbind requests for the locally registered consumer.
pub struct BindingClient {
    identity: Box<dyn IdentitySource>,
    service: Box<dyn BindingService>,
}

impl BindingClient {
    pub fn new(identity: Box<dyn IdentitySource>, service: Box<dyn BindingService>) -> Self {
        Self { identity, service }
    }

    /// Bind the registered consumer to `repo_id` through the yum distributor.
    pub fn bind(&self, repo_id: &str) -> Result<Outcome> {
        let Some(binding) = self.resolve(repo_id)? else {
            return Ok(Outcome::NotRegistered);
        };

        debug!(
            consumer_id = %binding.consumer_id,
            repo_id = %binding.repo_id,
            distributor_id = %binding.distributor_id,
            "creating binding"
        );

        match self.service.create_binding(
            &binding.consumer_id,
            &binding.repo_id,
            &binding.distributor_id,
        ) {
            Ok(()) => {
                info!(consumer_id = %binding.consumer_id, repo_id = %binding.repo_id, "binding created");
                Ok(Outcome::Success {
                    action: Action::Bound,
                    binding,
                })
            }
            Err(ServiceError::NotFound(resources)) => {
                let missing = if resources.contains_kind("consumer") {
                    Missing::Consumer {
                        id: binding.consumer_id,
                    }
                } else {
                    Missing::Repository { id: binding.repo_id }
                };
                warn!(%resources, ?missing, "bind target not found");
                Ok(Outcome::NotFound(missing))
            }
            Err(err) => Err(Error::Remote(err).into()),
        }
    }

    /// Remove the binding between the registered consumer and `repo_id`.
    ///
    /// `force` asks the server to delete the binding immediately instead of
    /// waiting for the consumer to acknowledge the unbind.
    pub fn unbind(&self, repo_id: &str, force: bool) -> Result<Outcome> {
        let Some(binding) = self.resolve(repo_id)? else {
            return Ok(Outcome::NotRegistered);
        };

        debug!(
            consumer_id = %binding.consumer_id,
            repo_id = %binding.repo_id,
            distributor_id = %binding.distributor_id,
            force,
            "removing binding"
        );

        match self.service.remove_binding(
            &binding.consumer_id,
            &binding.repo_id,
            &binding.distributor_id,
            force,
        ) {
            Ok(()) => {
                info!(consumer_id = %binding.consumer_id, repo_id = %binding.repo_id, force, "binding removed");
                Ok(Outcome::Success {
                    action: Action::Unbound,
                    binding,
                })
            }
            Err(ServiceError::NotFound(resources)) => {
                // The server echoes the exact binding lookup that failed.
                let missing = match resources.binding_id() {
                    Some(id) => Missing::Binding {
                        consumer_id: id.consumer_id,
                        repo_id: id.repo_id,
                    },
                    None => Missing::Binding {
                        consumer_id: binding.consumer_id,
                        repo_id: binding.repo_id,
                    },
                };
                warn!(%resources, ?missing, "binding not found");
                Ok(Outcome::NotFound(missing))
            }
            Err(err) => Err(Error::Remote(err).into()),
        }
    }

    /// Loads the consumer id and pairs it with `repo_id`. `None` means this
    /// machine is not registered; no request may be sent in that case.
    fn resolve(&self, repo_id: &str) -> Result<Option<Binding>> {
        let consumer_id = match self.identity.load_consumer_id()? {
            Some(id) if !id.trim().is_empty() => id,
            _ => {
                warn!("consumer is not registered; skipping request");
                return Ok(None);
            }
        };

        let repo_id = repo_id.trim();
        if repo_id.is_empty() {
            return Err(Error::Cli("repo_id is required".into()).into());
        }

        Ok(Some(Binding::yum(consumer_id, repo_id)))
    }
}
