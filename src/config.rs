use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::warn;

pub const DEFAULT_BUCKET: &str = "devrel-prod-settings";
pub const DEFAULT_BASE_URL: &str = "https://storage.googleapis.com";

#[derive(Clone, Serialize, Deserialize)]
pub struct Config {
    pub github_token: Option<String>,
    pub settings_bucket: String,
    pub settings_base_url: String,
    /// Read settings from this directory instead of the bucket.
    #[serde(default)]
    pub settings_dir: Option<PathBuf>,
    pub repos_file: String,
    pub apis_file: String,
    pub log_filter: String,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field(
                "github_token",
                &self.github_token.as_ref().map(|_| "[REDACTED]"),
            )
            .field("settings_bucket", &self.settings_bucket)
            .field("settings_base_url", &self.settings_base_url)
            .field("settings_dir", &self.settings_dir)
            .field("repos_file", &self.repos_file)
            .field("apis_file", &self.apis_file)
            .field("log_filter", &self.log_filter)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            github_token: None,
            settings_bucket: DEFAULT_BUCKET.to_string(),
            settings_base_url: DEFAULT_BASE_URL.to_string(),
            settings_dir: None,
            repos_file: "public_repos.json".to_string(),
            apis_file: "apis.json".to_string(),
            log_filter: "auto_label=info".to_string(),
        }
    }
}

impl Config {
    pub fn load(config_path: Option<&Path>) -> Self {
        let config_file = config_path
            .map(Path::to_path_buf)
            .unwrap_or_else(|| config_dir().join("auto-label").join("config.toml"));

        let mut figment = Figment::from(Serialized::defaults(Config::default()));

        if config_file.exists() {
            figment = figment.merge(Toml::file(&config_file));
        }

        figment = figment.merge(Env::prefixed("AUTO_LABEL_")).merge(
            Env::raw()
                .only(&["GITHUB_TOKEN"])
                .map(|_| "github_token".into()),
        );

        match figment.extract() {
            Ok(config) => config,
            Err(e) => {
                warn!("config parse error, using defaults: {e}");
                Config::default()
            }
        }
    }

    pub fn token(&self) -> Option<&str> {
        self.github_token.as_deref().filter(|t| !t.is_empty())
    }
}

pub fn config_dir() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .ok()
        .map(PathBuf::from)
        .or_else(|| {
            std::env::var("HOME")
                .ok()
                .map(|h| PathBuf::from(h).join(".config"))
        })
        .unwrap_or_else(|| PathBuf::from("."))
}
