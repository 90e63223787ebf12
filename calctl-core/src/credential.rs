//! The cached OAuth credential and its on-disk store.

use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::{CalctlError, CalctlResult};

/// Tokens are treated as expired slightly early so a request doesn't race the expiry.
fn expiry_delta() -> Duration {
    Duration::seconds(10)
}

fn bearer() -> String {
    "Bearer".to_string()
}

/// Access/refresh token pair. Field names match the `token.json` written by
/// other OAuth2 clients so an existing file can be reused.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Credential {
    pub access_token: String,
    #[serde(default = "bearer")]
    pub token_type: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub refresh_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry: Option<DateTime<Utc>>,
}

impl Credential {
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    /// A credential without an expiry never expires locally.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        match self.expiry {
            Some(expiry) => now + expiry_delta() >= expiry,
            None => false,
        }
    }

    pub fn can_refresh(&self) -> bool {
        !self.refresh_token.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct CredentialStore {
    path: PathBuf,
}

impl CredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        CredentialStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> CalctlResult<Credential> {
        if !self.path.exists() {
            return Err(CalctlError::CredentialNotFound(
                self.path.display().to_string(),
            ));
        }

        let contents = std::fs::read_to_string(&self.path)?;

        let credential: Credential = serde_json::from_str(&contents).map_err(|e| {
            CalctlError::Serialization(format!(
                "Failed to parse credential from {}: {e}",
                self.path.display()
            ))
        })?;

        debug!(path = %self.path.display(), "loaded cached credential");
        Ok(credential)
    }

    /// Replace the stored credential.
    ///
    /// The new contents are written to a sibling temp file which is renamed over
    /// the target, so a reader sees either the old or the new record.
    pub fn save(&self, credential: &Credential) -> CalctlResult<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        std::fs::create_dir_all(dir)?;

        let mut file = NamedTempFile::new_in(dir)?;
        serde_json::to_writer_pretty(&mut file, credential)?;
        writeln!(file)?;

        // Owner-only (0600): the file holds a bearer token.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(file.path(), std::fs::Permissions::from_mode(0o600))?;
        }

        file.persist(&self.path).map_err(|e| CalctlError::Io(e.error))?;

        debug!(path = %self.path.display(), "saved credential");
        Ok(())
    }
}
