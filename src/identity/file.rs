use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{normalize, IdentitySource};
use crate::{Error, Result};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConsumerIdentity {
    pub consumer_id: String,
}

impl ConsumerIdentity {
    pub fn new(consumer_id: impl Into<String>) -> Self {
        Self {
            consumer_id: consumer_id.into(),
        }
    }
}

/// On-disk consumer identity written at registration time.
///
/// Accepts either a JSON object with a `consumer_id` field or plain text
/// whose first non-empty line is the id. A missing file means the consumer
/// is not registered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityFile {
    pub path: PathBuf,
}

impl IdentityFile {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn load(&self) -> Result<Option<ConsumerIdentity>> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "identity file not present");
                return Ok(None);
            }
            Err(err) => return Err(Error::Io(err).into()),
        };

        parse_identity(&contents).map_err(|reason| {
            Error::InvalidIdentity {
                path: self.path.clone(),
                reason,
            }
            .into()
        })
    }

    pub fn save(&self, identity: &ConsumerIdentity) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let data = serde_json::to_vec_pretty(identity)?;
        fs::write(&self.path, data)?;
        Ok(())
    }
}

impl IdentitySource for IdentityFile {
    fn load_consumer_id(&self) -> Result<Option<String>> {
        Ok(self.load()?.map(|identity| identity.consumer_id))
    }
}

fn parse_identity(contents: &str) -> std::result::Result<Option<ConsumerIdentity>, String> {
    let trimmed = contents.trim_start();

    if trimmed.starts_with('{') {
        #[derive(Deserialize)]
        struct RawIdentity {
            consumer_id: Option<String>,
        }

        let raw: RawIdentity = serde_json::from_str(trimmed).map_err(|e| e.to_string())?;
        return Ok(normalize(raw.consumer_id).map(ConsumerIdentity::new));
    }

    Ok(trimmed
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map(ConsumerIdentity::new))
}
