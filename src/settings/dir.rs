use super::SettingsStore;
use crate::error::Result;
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::PathBuf;

/// Settings files read from a local directory.
#[derive(Debug, Clone)]
pub struct DirSettings {
    root: PathBuf,
}

impl DirSettings {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl SettingsStore for DirSettings {
    async fn fetch(&self, key: &str) -> Result<Option<String>> {
        match tokio::fs::read_to_string(self.root.join(key)).await {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}
