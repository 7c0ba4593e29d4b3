use super::SettingsStore;
use crate::error::{AutoLabelError, Result};
use async_trait::async_trait;
use reqwest::StatusCode;
use tracing::debug;

/// Settings objects served over HTTP from a storage bucket.
#[derive(Clone)]
pub struct BucketSettings {
    http: reqwest::Client,
    base_url: String,
    bucket: String,
}

impl BucketSettings {
    pub fn new(base_url: &str, bucket: &str) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("auto-label/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            bucket: bucket.to_string(),
        })
    }

    fn object_url(&self, key: &str) -> String {
        format!("{}/{}/{}", self.base_url, self.bucket, key)
    }
}

#[async_trait]
impl SettingsStore for BucketSettings {
    async fn fetch(&self, key: &str) -> Result<Option<String>> {
        let url = self.object_url(key);
        debug!(%url, "downloading settings file");

        let response = self.http.get(&url).send().await?;
        match response.status() {
            StatusCode::NOT_FOUND => Ok(None),
            status if status.is_success() => Ok(Some(response.text().await?)),
            status => Err(AutoLabelError::Settings(format!("GET {url} returned {status}"))),
        }
    }
}
