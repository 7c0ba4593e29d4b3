//! Bringing one issue's labels in line with the configured or detected
//! `api:` label.
//!
//! Every tracker call here is best-effort: a failure is logged and the
//! remaining steps still run. Only a successful add counts as "added".

use super::detect::auto_detect_label;
use super::palette::{color_at, color_index};
use super::{LabelContext, SAMPLES_LABEL};
use crate::github::types::{IssueRef, LabelInfo};
use crate::settings::{load_drift_apis, DriftRepo};
use tracing::{error, info};

/// Returns `true` when no label was newly attached to the issue.
pub async fn add_label_to_repo_and_issue(
    ctx: &LabelContext<'_>,
    issue: &IssueRef,
    drift_repos: &[DriftRepo],
) -> bool {
    let full_repo = issue.full_repo();
    let drift_repo = drift_repos.iter().find(|r| r.repo == full_repo);

    let labels_on_issue = match ctx
        .tracker
        .list_labels_on_issue(&issue.owner, &issue.repo, issue.number)
        .await
    {
        Ok(labels) => Some(labels),
        Err(e) => {
            error!(repo = %full_repo, issue = issue.number, "failed to list labels on issue: {e}");
            None
        }
    };

    let configured = drift_repo
        .map(|r| r.github_label.as_str())
        .filter(|l| !l.is_empty());

    let auto_detected = match configured {
        Some(_) => None,
        None => {
            info!(
                repo = %issue.repo,
                "no configured match for the repo, trying to auto-detect the right label"
            );
            let apis = load_drift_apis(ctx.settings, &ctx.keys.apis).await;
            auto_detect_label(apis.as_deref(), &issue.title)
        }
    };

    let color = color_at(color_index(drift_repos, drift_repo));
    let github_label = configured
        .map(str::to_string)
        .or_else(|| auto_detected.clone())
        .filter(|l| !l.is_empty());

    let mut added = false;

    if let Some(github_label) = github_label.as_deref() {
        if create_label(ctx, issue, github_label, color).await {
            info!(repo = %full_repo, label = github_label, "label created on repo");
        }

        match labels_on_issue.as_deref() {
            Some(current) => {
                let found = current.iter().find(|l| l.name == github_label);
                let stale = stale_api_labels(
                    current,
                    found.map(|l| l.name.as_str()),
                    auto_detected.as_deref(),
                );

                if found.is_some() {
                    info!(repo = %full_repo, issue = issue.number, label = github_label, "label already on issue");
                } else if add_label(ctx, issue, github_label).await {
                    added = true;
                }

                for label in stale {
                    remove_label(ctx, issue, &label.name).await;
                }
            }
            None => {
                if add_label(ctx, issue, github_label).await {
                    added = true;
                }
            }
        }
    }

    let has_samples_label = labels_on_issue
        .as_deref()
        .is_some_and(|labels| labels.iter().any(|l| l.name == SAMPLES_LABEL));

    if !has_samples_label && is_sample_issue(issue) {
        create_label(ctx, issue, SAMPLES_LABEL, color).await;
        info!(
            repo = %full_repo,
            issue = issue.number,
            "issue is about samples but has no samples label, adding it"
        );
        if add_label(ctx, issue, SAMPLES_LABEL).await {
            added = true;
        }
    }

    !added
}

/// `api` labels on the issue that compete with the one being applied.
fn stale_api_labels<'a>(
    current: &'a [LabelInfo],
    matched: Option<&str>,
    auto_detected: Option<&str>,
) -> Vec<&'a LabelInfo> {
    current
        .iter()
        .filter(|l| l.name.starts_with("api"))
        .filter(|l| Some(l.name.as_str()) != matched)
        .filter(|l| Some(l.name.as_str()) != auto_detected)
        .collect()
}

fn is_sample_issue(issue: &IssueRef) -> bool {
    issue.repo.contains("samples") || issue.title.contains("sample")
}

/// Returns `true` only when the label was newly created.
async fn create_label(ctx: &LabelContext<'_>, issue: &IssueRef, name: &str, color: &str) -> bool {
    match ctx
        .tracker
        .create_label(&issue.owner, &issue.repo, name, color)
        .await
    {
        Ok(()) => true,
        Err(e) if e.is_already_exists() => false,
        Err(e) => {
            error!(repo = %issue.full_repo(), label = name, "error creating label: {e}");
            false
        }
    }
}

async fn add_label(ctx: &LabelContext<'_>, issue: &IssueRef, name: &str) -> bool {
    match ctx
        .tracker
        .add_labels(&issue.owner, &issue.repo, issue.number, &[name.to_string()])
        .await
    {
        Ok(()) => {
            info!(repo = %issue.full_repo(), issue = issue.number, label = name, "label added to issue");
            true
        }
        Err(e) => {
            error!(repo = %issue.full_repo(), issue = issue.number, label = name, "error adding label: {e}");
            false
        }
    }
}

async fn remove_label(ctx: &LabelContext<'_>, issue: &IssueRef, name: &str) {
    match ctx
        .tracker
        .remove_label(&issue.owner, &issue.repo, issue.number, name)
        .await
    {
        Ok(()) => {
            info!(repo = %issue.full_repo(), issue = issue.number, label = name, "stale label removed");
        }
        Err(e) => {
            error!(repo = %issue.full_repo(), issue = issue.number, label = name, "error removing label: {e}");
        }
    }
}
