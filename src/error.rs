use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SecdeskError {
    #[error("invalid event id '{0}'")]
    InvalidEventId(String),

    #[error("invalid status '{0}', expected one of: NEW, ASSIGNED, RESOLVED")]
    InvalidStatus(String),

    #[error("invalid security level '{0}', expected one of: Critical, High, Normal")]
    InvalidLevel(String),

    #[error("invalid sort field '{0}'")]
    InvalidSortField(String),

    #[error("no events selected")]
    EmptySelection,

    #[error("event {0} is not on the current page")]
    NotDisplayed(u64),

    /// A request failed and the failure was already reported as a notice.
    #[error("{0}")]
    Aborted(String),

    // Endpoint errors
    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("{endpoint} endpoint returned HTTP {status}")]
    HttpStatus { endpoint: &'static str, status: u16 },

    #[error("malformed {endpoint} response: {message}")]
    MalformedResponse {
        endpoint: &'static str,
        message: String,
    },

    #[error("template error: {0}")]
    Template(#[from] askama::Error),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("YAML parse error in {}: {source}", path.display())]
    YamlParse {
        path: PathBuf,
        #[source]
        source: serde_yaml_ng::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SecdeskError {
    pub fn malformed(endpoint: &'static str, message: impl Into<String>) -> Self {
        SecdeskError::MalformedResponse {
            endpoint,
            message: message.into(),
        }
    }

    /// True for failures that happened on the wire rather than in the payload.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            SecdeskError::Transport(_) | SecdeskError::HttpStatus { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, SecdeskError>;
