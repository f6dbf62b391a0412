use std::{
    io::{self, ErrorKind},
    path::{Path, PathBuf},
};

use thiserror::Error;

use crate::types::Credential;

#[derive(Error, Debug)]
pub enum CredentialError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("malformed credential file: {0}")]
    Serde(#[from] serde_json::Error),
}

/// JSON file holding the single stored [`Credential`].
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

    /// Returns `Ok(None)` when no credential has been stored.
    pub async fn load(&self) -> Result<Option<Credential>, CredentialError> {
        let content = match async_fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        Ok(Some(serde_json::from_str(&content)?))
    }

    pub async fn persist(&self, credential: &Credential) -> Result<(), CredentialError> {
        if let Some(parent) = self.path.parent() {
            async_fs::create_dir_all(parent).await?;
        }

        let json = serde_json::to_string_pretty(credential)?;
        async_fs::write(&self.path, json).await?;
        Ok(())
    }

    /// Deletes the stored credential. Deleting a missing file is not an error.
    pub async fn clear(&self) -> Result<(), CredentialError> {
        match async_fs::remove_file(&self.path).await {
            Err(e) if e.kind() != ErrorKind::NotFound => Err(e.into()),
            _ => Ok(()),
        }
    }
}
