#![cfg(test)]

use crate::error::{AutoLabelError, Result};
use crate::github::types::{IssuePage, IssueSummary, LabelInfo};
use crate::github::IssueTracker;
use crate::settings::SettingsStore;
use async_trait::async_trait;
use std::collections::{BTreeSet, HashMap, HashSet};
use std::sync::Mutex;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TrackerCall {
    ListLabels(u64),
    CreateLabel(String, String),
    AddLabels(u64, Vec<String>),
    RemoveLabel(u64, String),
    ListIssues(String, u32),
}

#[derive(Default)]
struct TrackerState {
    calls: Vec<TrackerCall>,
    repo_labels: BTreeSet<String>,
    issue_labels: HashMap<u64, BTreeSet<String>>,
    issue_pages: HashMap<String, Vec<Vec<IssueSummary>>>,
}

/// In-memory issue tracker that records every call.
#[derive(Default)]
pub struct FakeTracker {
    state: Mutex<TrackerState>,
    fail_list_labels: bool,
    fail_create_label: bool,
    fail_add_labels: bool,
    fail_remove: HashSet<String>,
}

fn server_error(what: &str) -> AutoLabelError {
    AutoLabelError::GitHub {
        status: Some(500),
        message: format!("{what} failed"),
    }
}

impl FakeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_issue_labels(self, number: u64, labels: &[&str]) -> Self {
        self.state
            .lock()
            .unwrap()
            .issue_labels
            .insert(number, labels.iter().map(|l| l.to_string()).collect());
        self
    }

    pub fn with_existing_repo_label(self, name: &str) -> Self {
        self.state
            .lock()
            .unwrap()
            .repo_labels
            .insert(name.to_string());
        self
    }

    /// Issues of `owner/repo`, one inner vec per page.
    pub fn with_issue_pages(self, full_repo: &str, pages: Vec<Vec<(u64, &str)>>) -> Self {
        let pages = pages
            .into_iter()
            .map(|page| {
                page.into_iter()
                    .map(|(number, title)| IssueSummary {
                        number,
                        title: title.to_string(),
                    })
                    .collect()
            })
            .collect();
        self.state
            .lock()
            .unwrap()
            .issue_pages
            .insert(full_repo.to_string(), pages);
        self
    }

    pub fn failing_list_labels(mut self) -> Self {
        self.fail_list_labels = true;
        self
    }

    pub fn failing_create_label(mut self) -> Self {
        self.fail_create_label = true;
        self
    }

    pub fn failing_add_labels(mut self) -> Self {
        self.fail_add_labels = true;
        self
    }

    pub fn failing_remove_label(mut self, name: &str) -> Self {
        self.fail_remove.insert(name.to_string());
        self
    }

    pub fn calls(&self) -> Vec<TrackerCall> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.state.lock().unwrap().calls.clear();
    }

    /// Issue numbers whose labels were listed, in call order.
    pub fn reconciled_issues(&self) -> Vec<u64> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                TrackerCall::ListLabels(n) => Some(n),
                _ => None,
            })
            .collect()
    }

    pub fn repo_labels(&self) -> Vec<String> {
        self.state
            .lock()
            .unwrap()
            .repo_labels
            .iter()
            .cloned()
            .collect()
    }

    /// Labels on the issue, sorted by name.
    pub fn labels_on(&self, number: u64) -> Vec<String> {
        self.state
            .lock()
            .unwrap()
            .issue_labels
            .get(&number)
            .map(|labels| labels.iter().cloned().collect())
            .unwrap_or_default()
    }

    fn record(&self, call: TrackerCall) {
        self.state.lock().unwrap().calls.push(call);
    }
}

#[async_trait]
impl IssueTracker for FakeTracker {
    async fn list_labels_on_issue(
        &self,
        _owner: &str,
        _repo: &str,
        number: u64,
    ) -> Result<Vec<LabelInfo>> {
        self.record(TrackerCall::ListLabels(number));
        if self.fail_list_labels {
            return Err(server_error("list labels"));
        }
        Ok(self
            .labels_on(number)
            .into_iter()
            .map(|name| LabelInfo {
                name,
                color: "ededed".to_string(),
            })
            .collect())
    }

    async fn create_label(&self, _owner: &str, _repo: &str, name: &str, color: &str) -> Result<()> {
        self.record(TrackerCall::CreateLabel(name.to_string(), color.to_string()));
        if self.fail_create_label {
            return Err(server_error("create label"));
        }
        let created = self
            .state
            .lock()
            .unwrap()
            .repo_labels
            .insert(name.to_string());
        if !created {
            return Err(AutoLabelError::GitHub {
                status: Some(422),
                message: "Validation Failed".to_string(),
            });
        }
        Ok(())
    }

    async fn add_labels(
        &self,
        _owner: &str,
        _repo: &str,
        number: u64,
        labels: &[String],
    ) -> Result<()> {
        self.record(TrackerCall::AddLabels(number, labels.to_vec()));
        if self.fail_add_labels {
            return Err(server_error("add labels"));
        }
        self.state
            .lock()
            .unwrap()
            .issue_labels
            .entry(number)
            .or_default()
            .extend(labels.iter().cloned());
        Ok(())
    }

    async fn remove_label(&self, _owner: &str, _repo: &str, number: u64, name: &str) -> Result<()> {
        self.record(TrackerCall::RemoveLabel(number, name.to_string()));
        if self.fail_remove.contains(name) {
            return Err(server_error("remove label"));
        }
        if let Some(labels) = self.state.lock().unwrap().issue_labels.get_mut(&number) {
            labels.remove(name);
        }
        Ok(())
    }

    async fn list_issues(&self, owner: &str, repo: &str, page: u32) -> Result<IssuePage> {
        let full_repo = format!("{owner}/{repo}");
        self.record(TrackerCall::ListIssues(full_repo.clone(), page));
        let state = self.state.lock().unwrap();
        let pages = state.issue_pages.get(&full_repo);
        let idx = page.saturating_sub(1) as usize;
        Ok(IssuePage {
            issues: pages.and_then(|p| p.get(idx)).cloned().unwrap_or_default(),
            has_next: pages.is_some_and(|p| idx + 1 < p.len()),
        })
    }
}

/// Settings files held in memory.
#[derive(Default)]
pub struct MemorySettings {
    files: HashMap<String, String>,
    fail: bool,
    fetched: Mutex<Vec<String>>,
}

impl MemorySettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: &str, contents: &str) -> Self {
        self.files.insert(key.to_string(), contents.to_string());
        self
    }

    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }

    pub fn fetched(&self) -> Vec<String> {
        self.fetched.lock().unwrap().clone()
    }
}

#[async_trait]
impl SettingsStore for MemorySettings {
    async fn fetch(&self, key: &str) -> Result<Option<String>> {
        self.fetched.lock().unwrap().push(key.to_string());
        if self.fail {
            return Err(AutoLabelError::Settings("bucket unavailable".to_string()));
        }
        Ok(self.files.get(key).cloned())
    }
}
