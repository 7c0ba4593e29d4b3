use crate::error::{AutoLabelError, Result};
use serde::de::DeserializeOwned;
use serde::Deserialize;

/// An event the bot reacts to, decoded from a webhook payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LabelEvent {
    IssueOpened {
        owner: String,
        repo: String,
        number: u64,
        title: String,
    },
    Schedule {
        cron_org: String,
        owner: String,
        repo: String,
    },
    /// Repositories newly reachable by the installation, as `owner/name`.
    Installed { repositories: Vec<String> },
}

#[derive(Deserialize)]
struct Account {
    login: String,
}

#[derive(Deserialize)]
struct RepositoryPayload {
    name: String,
    #[serde(default)]
    owner: Option<Account>,
}

#[derive(Deserialize)]
struct IssuePayload {
    number: u64,
    #[serde(default)]
    title: String,
}

#[derive(Deserialize)]
struct IssuesEvent {
    action: String,
    repository: RepositoryPayload,
    issue: IssuePayload,
}

#[derive(Deserialize)]
struct ScheduleEvent {
    cron_org: String,
    organization: Account,
    repository: RepositoryPayload,
}

#[derive(Deserialize)]
struct InstalledRepository {
    full_name: String,
}

#[derive(Deserialize)]
struct InstallationEvent {
    action: String,
    #[serde(default)]
    repositories: Vec<InstalledRepository>,
}

#[derive(Deserialize)]
struct InstallationRepositoriesEvent {
    action: String,
    #[serde(default)]
    repositories_added: Vec<InstalledRepository>,
}

impl LabelEvent {
    /// Decodes a delivery. Returns `Ok(None)` for events the bot ignores.
    pub fn from_webhook(name: &str, payload: &[u8]) -> Result<Option<Self>> {
        match name {
            "issues" => {
                let event: IssuesEvent = parse(payload)?;
                if !matches!(event.action.as_str(), "opened" | "reopened") {
                    return Ok(None);
                }
                let owner = event
                    .repository
                    .owner
                    .ok_or_else(|| AutoLabelError::Payload("repository.owner missing".into()))?;
                Ok(Some(LabelEvent::IssueOpened {
                    owner: owner.login,
                    repo: event.repository.name,
                    number: event.issue.number,
                    title: event.issue.title,
                }))
            }
            "schedule.repository" => {
                let event: ScheduleEvent = parse(payload)?;
                Ok(Some(LabelEvent::Schedule {
                    cron_org: event.cron_org,
                    owner: event.organization.login,
                    repo: event.repository.name,
                }))
            }
            "installation" => {
                let event: InstallationEvent = parse(payload)?;
                if event.action != "created" {
                    return Ok(None);
                }
                Ok(Some(LabelEvent::Installed {
                    repositories: event
                        .repositories
                        .into_iter()
                        .map(|r| r.full_name)
                        .collect(),
                }))
            }
            "installation_repositories" => {
                let event: InstallationRepositoriesEvent = parse(payload)?;
                if event.action != "added" {
                    return Ok(None);
                }
                Ok(Some(LabelEvent::Installed {
                    repositories: event
                        .repositories_added
                        .into_iter()
                        .map(|r| r.full_name)
                        .collect(),
                }))
            }
            _ => Ok(None),
        }
    }
}

fn parse<T: DeserializeOwned>(payload: &[u8]) -> Result<T> {
    serde_json::from_slice(payload).map_err(|e| AutoLabelError::Payload(e.to_string()))
}
