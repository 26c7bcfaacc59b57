//! Error types for cfb-cal.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// What kind of named entity failed to resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Team,
    Conference,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Team => write!(f, "team"),
            EntityKind::Conference => write!(f, "conference"),
        }
    }
}

/// Errors that can occur in cfb-cal operations.
#[derive(Error, Debug)]
pub enum CfbError {
    /// The sports-data provider failed or returned data we could not use.
    #[error("Provider error: {0}")]
    Provider(String),

    #[error("Unknown {kind}: '{name}'")]
    NotFound { kind: EntityKind, name: String },

    /// The preference document is missing, unreadable or corrupt.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Writing a calendar document failed.
    #[error("Could not publish {}: {reason}", path.display())]
    Publish { path: PathBuf, reason: String },

    #[error("ICS parse error: {0}")]
    IcsParse(String),
}

impl CfbError {
    pub fn team_not_found(name: impl Into<String>) -> Self {
        CfbError::NotFound {
            kind: EntityKind::Team,
            name: name.into(),
        }
    }

    pub fn conference_not_found(name: impl Into<String>) -> Self {
        CfbError::NotFound {
            kind: EntityKind::Conference,
            name: name.into(),
        }
    }

    pub fn publish(path: impl Into<PathBuf>, reason: impl fmt::Display) -> Self {
        CfbError::Publish {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

impl From<reqwest::Error> for CfbError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            CfbError::Provider("request timed out".into())
        } else if e.is_decode() {
            CfbError::Provider(format!("malformed response: {e}"))
        } else {
            CfbError::Provider(e.to_string())
        }
    }
}

/// Result type alias for cfb-cal operations.
pub type CfbResult<T> = Result<T, CfbError>;
