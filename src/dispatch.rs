//! Routing decoded events to label reconciliation.
//!
//! Issues are processed one at a time. A scheduled sweep gives up on a
//! repository once too many issues in a row end up without a new label.

use crate::event::LabelEvent;
use crate::github::types::IssueRef;
use crate::labels::reconcile::add_label_to_repo_and_issue;
use crate::labels::LabelContext;
use crate::settings::{load_drift_repos, DriftRepo};
use tracing::{debug, error, info, warn};

const MAX_NOT_ADDED_IN_A_ROW: usize = 5;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SweepOutcome {
    pub processed: usize,
    pub tripped: bool,
}

pub async fn handle_event(ctx: &LabelContext<'_>, event: &LabelEvent) {
    match event {
        LabelEvent::IssueOpened {
            owner,
            repo,
            number,
            title,
        } => {
            let Some(drift_repos) = load_drift_repos(ctx.settings, &ctx.keys.repos).await else {
                return;
            };
            let issue = IssueRef::new(owner, repo, *number, title);
            add_label_to_repo_and_issue(ctx, &issue, &drift_repos).await;
        }
        LabelEvent::Schedule {
            cron_org,
            owner,
            repo,
        } => {
            info!(org = %cron_org, "running scheduled sweep");
            if cron_org != owner {
                info!(org = %cron_org, "skipping run for {cron_org}");
                return;
            }
            let Some(drift_repos) = load_drift_repos(ctx.settings, &ctx.keys.repos).await else {
                return;
            };
            let outcome =
                sweep_repo(ctx, owner, repo, &drift_repos, Some(MAX_NOT_ADDED_IN_A_ROW)).await;
            info!(
                %owner,
                %repo,
                processed = outcome.processed,
                tripped = outcome.tripped,
                "scheduled sweep done"
            );
        }
        LabelEvent::Installed { repositories } => {
            let Some(drift_repos) = load_drift_repos(ctx.settings, &ctx.keys.repos).await else {
                return;
            };
            for full_name in repositories {
                let Some((owner, repo)) = full_name.split_once('/') else {
                    warn!(repository = %full_name, "skipping repository without owner/name");
                    continue;
                };
                let outcome = sweep_repo(ctx, owner, repo, &drift_repos, None).await;
                info!(%owner, %repo, processed = outcome.processed, "installation sweep done");
            }
        }
    }
}

/// Reconciles every issue of `owner/repo`, page by page. With a
/// `breaker` limit the sweep stops once more than that many issues in a
/// row received no new label.
pub async fn sweep_repo(
    ctx: &LabelContext<'_>,
    owner: &str,
    repo: &str,
    drift_repos: &[DriftRepo],
    breaker: Option<usize>,
) -> SweepOutcome {
    let mut outcome = SweepOutcome::default();
    let mut not_added_in_a_row = 0usize;
    let mut page = 1u32;

    loop {
        let result = match ctx.tracker.list_issues(owner, repo, page).await {
            Ok(r) => r,
            Err(e) => {
                error!(%owner, %repo, page, "failed to list issues: {e}");
                return outcome;
            }
        };

        for summary in &result.issues {
            let issue = IssueRef::new(owner, repo, summary.number, &summary.title);
            let not_added = add_label_to_repo_and_issue(ctx, &issue, drift_repos).await;
            outcome.processed += 1;

            if not_added {
                info!(
                    "label for {} in {owner}/{repo} was not added",
                    summary.number
                );
                not_added_in_a_row += 1;
            } else {
                not_added_in_a_row = 0;
            }

            if let Some(limit) = breaker.filter(|limit| not_added_in_a_row > *limit) {
                info!(
                    "{owner}/{repo} has {limit} issues where labels were not added; skipping the rest of this repo check."
                );
                outcome.tripped = true;
                return outcome;
            }
        }

        if !result.has_next {
            break;
        }
        page += 1;
    }

    debug!(%owner, %repo, processed = outcome.processed, "sweep finished");
    outcome
}
