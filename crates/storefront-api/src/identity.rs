//! # Client Identity
//!
//! The server resolves `/cart` to a session by a numeric token the client
//! sends in a header. The token is generated once, persisted, and replaced
//! whenever the server answers with a different one.
//!
//! ```text
//!   first run:   no file ──► token = epoch millis ──► write file
//!   next runs:   read file ──► token
//!   response:    X-User-ID: 1712345678901 ──► differs? ──► replace + write
//! ```

use std::path::{Path, PathBuf};
use std::sync::RwLock;

use chrono::Utc;
use tracing::{debug, info};

use crate::error::{ApiError, ApiResult};

/// Holds the current identity token.
#[derive(Debug)]
pub struct IdentityStore {
    token: RwLock<String>,
    path: Option<PathBuf>,
}

impl IdentityStore {
    /// An identity that is never persisted.
    pub fn in_memory(token: impl Into<String>) -> Self {
        IdentityStore {
            token: RwLock::new(token.into()),
            path: None,
        }
    }

    /// A freshly generated identity that is never persisted.
    pub fn generated() -> Self {
        Self::in_memory(generate_token())
    }

    /// Loads the identity from `path`, generating and persisting a new one
    /// if the file is missing or empty.
    pub fn load(path: impl Into<PathBuf>) -> ApiResult<Self> {
        let path = path.into();

        let existing = match std::fs::read_to_string(&path) {
            Ok(contents) => Some(contents.trim().to_string()).filter(|t| !t.is_empty()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => return Err(ApiError::Identity(format!("{}: {}", path.display(), e))),
        };

        let token = match existing {
            Some(token) => {
                debug!(?path, "Loaded client identity");
                token
            }
            None => {
                let token = generate_token();
                persist(&path, &token)?;
                info!(?path, token = %token, "Generated new client identity");
                token
            }
        };

        Ok(IdentityStore {
            token: RwLock::new(token),
            path: Some(path),
        })
    }

    /// The token to send with the next request.
    pub fn current(&self) -> String {
        match self.token.read() {
            Ok(token) => token.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Adopts a server-issued token. Returns `true` if it differed.
    pub fn replace(&self, token: &str) -> ApiResult<bool> {
        let token = token.trim();
        if token.is_empty() {
            return Ok(false);
        }

        {
            let mut current = match self.token.write() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
            if current.as_str() == token {
                return Ok(false);
            }
            *current = token.to_string();
        }

        if let Some(path) = &self.path {
            persist(path, token)?;
        }
        debug!(token = %token, "Client identity replaced by server");
        Ok(true)
    }

    /// The backing file, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

fn generate_token() -> String {
    Utc::now().timestamp_millis().to_string()
}

fn persist(path: &Path, token: &str) -> ApiResult<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| ApiError::Identity(format!("{}: {}", parent.display(), e)))?;
    }
    std::fs::write(path, token)
        .map_err(|e| ApiError::Identity(format!("{}: {}", path.display(), e)))
}
