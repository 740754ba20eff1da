use serde::Serialize;
use thiserror::Error;

/// Failure while resolving a source, fetching a page or extracting links.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Request to {url} failed: {message}")]
    Network { url: String, message: String },

    #[error("Unsupported or unreadable source: {location}{}", reason_suffix(.reason))]
    UnreadableSource {
        location: String,
        reason: Option<String>,
    },

    #[error("Could not parse content from {location}: {message}")]
    Parse { location: String, message: String },

    #[error("No valid URLs found in {location}")]
    NoLinksFound { location: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FetchErrorKind {
    Network,
    UnreadableSource,
    Parse,
    NoLinksFound,
}

impl FetchError {
    pub fn network(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Network { url: url.into(), message: message.into() }
    }

    pub fn unreadable(location: impl Into<String>) -> Self {
        Self::UnreadableSource { location: location.into(), reason: None }
    }

    pub fn unreadable_because(location: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::UnreadableSource { location: location.into(), reason: Some(reason.into()) }
    }

    pub fn parse(location: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Parse { location: location.into(), message: message.into() }
    }

    pub fn kind(&self) -> FetchErrorKind {
        match self {
            Self::Network { .. } => FetchErrorKind::Network,
            Self::UnreadableSource { .. } => FetchErrorKind::UnreadableSource,
            Self::Parse { .. } => FetchErrorKind::Parse,
            Self::NoLinksFound { .. } => FetchErrorKind::NoLinksFound,
        }
    }

    /// Map a transport-level reqwest failure onto the taxonomy.
    pub fn from_reqwest(url: &str, err: &reqwest::Error) -> Self {
        let message = if err.is_timeout() {
            format!("timed out ({err})")
        } else if err.is_connect() {
            format!("connection failed ({err})")
        } else {
            err.to_string()
        };
        Self::network(url, message)
    }
}

fn reason_suffix(reason: &Option<String>) -> String {
    reason.as_ref().map(|r| format!(" ({r})")).unwrap_or_default()
}

/// Error returned by a tool handler. The server layer decides how each
/// variant is rendered on the wire.
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("{0}")]
    InvalidArguments(String),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("{0}")]
    Internal(String),
}

pub type ToolResult<T> = std::result::Result<T, ToolError>;
