use super::types::{IssuePage, IssueSummary, LabelInfo};
use super::IssueTracker;
use crate::error::{AutoLabelError, Result};
use async_trait::async_trait;
use octocrab::Octocrab;

const PER_PAGE: u8 = 100;

#[derive(Clone)]
pub struct GitHubClient {
    octo: Octocrab,
}

impl GitHubClient {
    pub fn new(token: &str) -> Result<Self> {
        let octo = Octocrab::builder()
            .personal_token(token.to_string())
            .build()
            .map_err(AutoLabelError::from)?;

        Ok(Self { octo })
    }
}

#[async_trait]
impl IssueTracker for GitHubClient {
    async fn list_labels_on_issue(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
    ) -> Result<Vec<LabelInfo>> {
        let mut labels = Vec::new();
        let mut page = 1u32;

        loop {
            let result = self
                .octo
                .issues(owner, repo)
                .list_labels_for_issue(number)
                .per_page(PER_PAGE)
                .page(page)
                .send()
                .await?;

            if result.items.is_empty() {
                break;
            }

            labels.extend(result.items.into_iter().map(|l| LabelInfo {
                name: l.name,
                color: l.color,
            }));

            if result.next.is_none() {
                break;
            }
            page += 1;
        }

        Ok(labels)
    }

    async fn create_label(&self, owner: &str, repo: &str, name: &str, color: &str) -> Result<()> {
        self.octo
            .issues(owner, repo)
            .create_label(name, color, "")
            .await?;
        Ok(())
    }

    async fn add_labels(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
        labels: &[String],
    ) -> Result<()> {
        self.octo
            .issues(owner, repo)
            .add_labels(number, labels)
            .await?;
        Ok(())
    }

    async fn remove_label(&self, owner: &str, repo: &str, number: u64, name: &str) -> Result<()> {
        self.octo
            .issues(owner, repo)
            .remove_label(number, name)
            .await?;
        Ok(())
    }

    async fn list_issues(&self, owner: &str, repo: &str, page: u32) -> Result<IssuePage> {
        let result = self
            .octo
            .issues(owner, repo)
            .list()
            .per_page(PER_PAGE)
            .page(page)
            .send()
            .await?;

        let issues = result
            .items
            .into_iter()
            .map(|i| IssueSummary {
                number: i.number,
                title: i.title,
            })
            .collect();

        Ok(IssuePage {
            issues,
            has_next: result.next.is_some(),
        })
    }
}
