pub mod client;
pub mod types;

use crate::error::Result;
use async_trait::async_trait;
use types::{IssuePage, LabelInfo};

/// The label operations the bot performs against an issue tracker.
#[async_trait]
pub trait IssueTracker: Send + Sync {
    async fn list_labels_on_issue(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
    ) -> Result<Vec<LabelInfo>>;

    /// Fails with status 422 when the label already exists.
    async fn create_label(&self, owner: &str, repo: &str, name: &str, color: &str) -> Result<()>;

    async fn add_labels(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
        labels: &[String],
    ) -> Result<()>;

    async fn remove_label(&self, owner: &str, repo: &str, number: u64, name: &str) -> Result<()>;

    /// One page of the repository's issues, pages numbered from 1.
    async fn list_issues(&self, owner: &str, repo: &str, page: u32) -> Result<IssuePage>;
}
