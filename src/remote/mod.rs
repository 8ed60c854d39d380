//! Remote binding service seam.
//!
//! [`BindingService`] is the only way the binding client talks to the
//! repository server. The production implementation is
//! [`HttpBindingService`]; tests substitute their own.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

pub mod http;

pub use http::HttpBindingService;

pub trait BindingService {
    fn create_binding(
        &self,
        consumer_id: &str,
        repo_id: &str,
        distributor_id: &str,
    ) -> Result<(), ServiceError>;

    fn remove_binding(
        &self,
        consumer_id: &str,
        repo_id: &str,
        distributor_id: &str,
        force: bool,
    ) -> Result<(), ServiceError>;
}

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("resource not found: {0}")]
    NotFound(MissingResources),
    #[error("server returned {status}: {message}")]
    Status { status: u16, message: String },
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server url cannot carry a path: {0}")]
    InvalidBaseUrl(String),
}

/// The `resources` payload of a not-found reply.
///
/// Servers report it either as an object keyed by resource kind
/// (`{"repository": "r1"}`, `{"bind_id": {...}}`) or as a list of kinds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MissingResources(pub Value);

/// Composite id of a binding echoed back when a removal lookup fails.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BindingId {
    pub consumer_id: String,
    pub repo_id: String,
}

impl MissingResources {
    pub fn new(resources: Value) -> Self {
        Self(resources)
    }

    pub fn contains_kind(&self, kind: &str) -> bool {
        match &self.0 {
            Value::Object(map) => map.contains_key(kind),
            Value::Array(items) => items.iter().any(|item| item.as_str() == Some(kind)),
            Value::String(single) => single == kind,
            _ => false,
        }
    }

    pub fn binding_id(&self) -> Option<BindingId> {
        let raw = self.0.get("bind_id")?;
        serde_json::from_value(raw.clone()).ok()
    }
}

impl std::fmt::Display for MissingResources {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.0 {
            Value::Null => f.write_str("unspecified"),
            other => write!(f, "{other}"),
        }
    }
}
