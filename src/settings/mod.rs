//! Remote settings: which repositories carry a fixed label, and which
//! `api:` labels exist at all.

pub mod bucket;
pub mod dir;

use crate::error::Result;
use async_trait::async_trait;
use serde::Deserialize;
use tracing::error;

/// Source of raw settings files keyed by file name.
#[async_trait]
pub trait SettingsStore: Send + Sync {
    /// Returns `Ok(None)` when the file does not exist.
    async fn fetch(&self, key: &str) -> Result<Option<String>>;
}

/// A monitored repository and the label every one of its issues gets.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DriftRepo {
    #[serde(default)]
    pub github_label: String,
    pub repo: String,
}

/// A known product area label, e.g. `api: spanner`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DriftApi {
    pub github_label: String,
}

#[derive(Deserialize)]
struct ReposFile {
    repos: Vec<DriftRepo>,
}

#[derive(Deserialize)]
struct ApisFile {
    apis: Vec<DriftApi>,
}

/// File names of the two settings documents.
#[derive(Debug, Clone)]
pub struct SettingsKeys {
    pub repos: String,
    pub apis: String,
}

impl Default for SettingsKeys {
    fn default() -> Self {
        Self {
            repos: "public_repos.json".to_string(),
            apis: "apis.json".to_string(),
        }
    }
}

pub async fn load_drift_repos(store: &dyn SettingsStore, key: &str) -> Option<Vec<DriftRepo>> {
    let contents = download(store, key).await?;
    match serde_json::from_str::<ReposFile>(&contents) {
        Ok(file) => Some(file.repos),
        Err(e) => {
            error!(key, "could not parse settings file: {e}");
            None
        }
    }
}

pub async fn load_drift_apis(store: &dyn SettingsStore, key: &str) -> Option<Vec<DriftApi>> {
    let contents = download(store, key).await?;
    match serde_json::from_str::<ApisFile>(&contents) {
        Ok(file) => Some(file.apis),
        Err(e) => {
            error!(key, "could not parse settings file: {e}");
            None
        }
    }
}

async fn download(store: &dyn SettingsStore, key: &str) -> Option<String> {
    match store.fetch(key).await {
        Ok(Some(contents)) if !contents.trim().is_empty() => Some(contents),
        Ok(_) => {
            error!(key, "{key} downloaded from settings store was empty");
            None
        }
        Err(e) => {
            error!(key, "failed to download {key}: {e}");
            None
        }
    }
}
