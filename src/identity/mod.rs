//! Consumer identity loading.
//!
//! The binding client never reads identity state directly; it goes through
//! an [`IdentitySource`] so callers can substitute the lookup.

pub mod file;

pub use file::{ConsumerIdentity, IdentityFile};

use crate::Result;

pub trait IdentitySource {
    /// Returns the registered consumer id, or `None` when this machine is
    /// not registered.
    fn load_consumer_id(&self) -> Result<Option<String>>;
}

impl<F> IdentitySource for F
where
    F: Fn() -> Option<String>,
{
    fn load_consumer_id(&self) -> Result<Option<String>> {
        Ok(normalize(self()))
    }
}

/// Blank ids count as unregistered.
pub(crate) fn normalize(id: Option<String>) -> Option<String> {
    id.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}
