use std::{
    io::{self, ErrorKind},
    path::{Path, PathBuf},
};

use crate::lyrics::LyricDocument;

/// The published lyric document the display surface reads.
#[derive(Debug, Clone)]
pub struct LyricStore {
    path: PathBuf,
}

impl LyricStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        LyricStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replaces the published document.
    ///
    /// The text is written to a sibling temporary file and renamed over the
    /// target, so a reader sees either the previous document or the new one
    /// in full.
    pub async fn publish(&self, document: &LyricDocument) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            async_fs::create_dir_all(parent).await?;
        }

        let staging = self.path.with_extension("lrc.tmp");
        async_fs::write(&staging, document.to_lrc()).await?;
        async_fs::rename(&staging, &self.path).await
    }

    /// Raw document text, `None` before the first publish.
    pub async fn read(&self) -> io::Result<Option<String>> {
        match async_fs::read_to_string(&self.path).await {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    pub async fn load(&self) -> io::Result<Option<LyricDocument>> {
        Ok(self.read().await?.map(|text| LyricDocument::parse(&text)))
    }
}
