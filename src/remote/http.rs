//! Blocking HTTP implementation of [`BindingService`] against the v2 REST API.

use std::time::Duration;

use reqwest::{
    blocking::{Client, Response},
    StatusCode, Url,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use super::{BindingService, MissingResources, ServiceError};
use crate::{config::ClientConfig, Error};

const API_ROOT: [&str; 3] = ["pulp", "api", "v2"];

#[derive(Debug, Serialize)]
struct BindRequest<'a> {
    repo_id: &'a str,
    distributor_id: &'a str,
    notify_agent: bool,
    binding_config: Map<String, Value>,
}

#[derive(Debug, Serialize)]
struct UnbindRequest {
    force: bool,
    options: Map<String, Value>,
}

/// Error body returned by the server on non-2xx replies.
#[derive(Debug, Default, Deserialize)]
struct ErrorReport {
    #[serde(default)]
    error_message: Option<String>,
    #[serde(default)]
    resources: Value,
}

#[derive(Debug, Clone)]
pub struct HttpBindingService {
    base_url: Url,
    client: Client,
}

impl HttpBindingService {
    pub fn new(config: &ClientConfig) -> crate::Result<Self> {
        Self::with_timeout(config.server_url.clone(), config.timeout)
    }

    pub fn with_timeout(base_url: Url, timeout: Duration) -> crate::Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("repobind/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::Remote(e.into()))?;
        Ok(Self { base_url, client })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Builds `<base>/pulp/api/v2/<segments>/` with each segment
    /// percent-encoded.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ServiceError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ServiceError::InvalidBaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(API_ROOT)
            .extend(segments)
            .push("");
        Ok(url)
    }
}

impl BindingService for HttpBindingService {
    fn create_binding(
        &self,
        consumer_id: &str,
        repo_id: &str,
        distributor_id: &str,
    ) -> Result<(), ServiceError> {
        let url = self.endpoint(&["consumers", consumer_id, "bindings"])?;
        debug!(%url, "POST create binding");

        let body = BindRequest {
            repo_id,
            distributor_id,
            notify_agent: true,
            binding_config: Map::new(),
        };
        let response = self.client.post(url).json(&body).send()?;
        check_response(response)
    }

    fn remove_binding(
        &self,
        consumer_id: &str,
        repo_id: &str,
        distributor_id: &str,
        force: bool,
    ) -> Result<(), ServiceError> {
        let url = self.endpoint(&["consumers", consumer_id, "bindings", repo_id, distributor_id])?;
        debug!(%url, force, "DELETE remove binding");

        let body = UnbindRequest {
            force,
            options: Map::new(),
        };
        let response = self.client.delete(url).json(&body).send()?;
        check_response(response)
    }
}

fn check_response(response: Response) -> Result<(), ServiceError> {
    let status = response.status();
    if status.is_success() {
        return Ok(());
    }

    let body = response.text().unwrap_or_default();
    let report: ErrorReport = serde_json::from_str(&body).unwrap_or_default();

    if status == StatusCode::NOT_FOUND {
        return Err(ServiceError::NotFound(MissingResources::new(report.resources)));
    }

    let message = report
        .error_message
        .unwrap_or_else(|| body.trim().to_string());
    Err(ServiceError::Status {
        status: status.as_u16(),
        message,
    })
}
