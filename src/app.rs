use crate::config::Config;
use crate::dispatch;
use crate::error::{AutoLabelError, Result};
use crate::event::LabelEvent;
use crate::github::client::GitHubClient;
use crate::labels::LabelContext;
use crate::settings::bucket::BucketSettings;
use crate::settings::dir::DirSettings;
use crate::settings::{SettingsKeys, SettingsStore};
use tracing::info;

pub struct App {
    pub github: GitHubClient,
    pub settings: Box<dyn SettingsStore>,
    pub keys: SettingsKeys,
}

impl App {
    pub fn new(config: &Config) -> Result<Self> {
        let token = config
            .token()
            .ok_or_else(|| AutoLabelError::Config("GITHUB_TOKEN is not set".to_string()))?;
        let github = GitHubClient::new(token)?;

        Ok(Self {
            github,
            settings: settings_store(config)?,
            keys: SettingsKeys {
                repos: config.repos_file.clone(),
                apis: config.apis_file.clone(),
            },
        })
    }

    pub async fn handle(&self, event: &LabelEvent) {
        let ctx = LabelContext {
            tracker: &self.github,
            settings: self.settings.as_ref(),
            keys: &self.keys,
        };
        dispatch::handle_event(&ctx, event).await;
    }
}

fn settings_store(config: &Config) -> Result<Box<dyn SettingsStore>> {
    match &config.settings_dir {
        Some(dir) => {
            info!(dir = %dir.display(), "reading settings from directory");
            Ok(Box::new(DirSettings::new(dir)))
        }
        None => {
            info!(bucket = %config.settings_bucket, "reading settings from bucket");
            Ok(Box::new(BucketSettings::new(
                &config.settings_base_url,
                &config.settings_bucket,
            )?))
        }
    }
}
