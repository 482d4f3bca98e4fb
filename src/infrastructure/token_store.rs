// Session token stores - file-backed, plus an in-memory one for tests
use crate::application::session::SessionProvider;
use anyhow::Context;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
#[cfg(test)]
use std::sync::RwLock;

/// Keeps the bearer token in a single file, the CLI's cookie jar
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl SessionProvider for FileTokenStore {
    fn get_token(&self) -> Option<String> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => {
                let token = contents.trim();
                (!token.is_empty()).then(|| token.to_string())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => None,
            Err(e) => {
                tracing::warn!("Failed to read token file {}: {}", self.path.display(), e);
                None
            }
        }
    }

    fn set_token(&self, token: &str) -> anyhow::Result<()> {
        fs::write(&self.path, token)
            .with_context(|| format!("Failed to write token file {}", self.path.display()))
    }

    fn clear_token(&self) {
        match fs::remove_file(&self.path) {
            Ok(()) => tracing::debug!("Removed token file {}", self.path.display()),
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => {
                tracing::error!("Failed to remove token file {}: {}", self.path.display(), e);
            }
        }
    }
}

#[cfg(test)]
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: RwLock<Option<String>>,
}

#[cfg(test)]
impl MemoryTokenStore {
    pub fn with_token(token: &str) -> Self {
        Self {
            token: RwLock::new(Some(token.to_string())),
        }
    }
}

#[cfg(test)]
impl SessionProvider for MemoryTokenStore {
    fn get_token(&self) -> Option<String> {
        self.token.read().ok().and_then(|t| t.clone())
    }

    fn set_token(&self, token: &str) -> anyhow::Result<()> {
        let mut slot = self
            .token
            .write()
            .map_err(|_| anyhow::anyhow!("Token store lock poisoned"))?;
        *slot = Some(token.to_string());
        Ok(())
    }

    fn clear_token(&self) {
        if let Ok(mut slot) = self.token.write() {
            *slot = None;
        }
    }
}
