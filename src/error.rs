use thiserror::Error;

#[derive(Error, Debug)]
pub enum AutoLabelError {
    #[error("github error ({}): {message}", status_label(.status))]
    GitHub {
        status: Option<u16>,
        message: String,
    },

    #[error("settings error: {0}")]
    Settings(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("invalid event payload: {0}")]
    Payload(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
}

impl AutoLabelError {
    pub fn status(&self) -> Option<u16> {
        match self {
            AutoLabelError::GitHub { status, .. } => *status,
            AutoLabelError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// GitHub answers 422 Unprocessable Entity when a label name is taken.
    pub fn is_already_exists(&self) -> bool {
        self.status() == Some(422)
    }
}

impl From<octocrab::Error> for AutoLabelError {
    fn from(e: octocrab::Error) -> Self {
        match e {
            octocrab::Error::GitHub { source, .. } => AutoLabelError::GitHub {
                status: Some(source.status_code.as_u16()),
                message: source.message.clone(),
            },
            other => AutoLabelError::GitHub {
                status: None,
                message: other.to_string(),
            },
        }
    }
}

fn status_label(status: &Option<u16>) -> String {
    match status {
        Some(code) => code.to_string(),
        None => "no status".to_string(),
    }
}

pub type Result<T> = std::result::Result<T, AutoLabelError>;
