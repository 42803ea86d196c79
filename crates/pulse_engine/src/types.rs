use std::fmt;

use pulse_core::{StatKind, Username};
use thiserror::Error;

/// Raw bytes from one settled upstream call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOutput {
    pub bytes: Vec<u8>,
    pub content_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchError {
    pub kind: FailureKind,
    pub message: String,
}

impl FetchError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    RedirectLimitExceeded,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    Network,
}

impl FailureKind {
    /// Upstream HTTP status carried by this failure, when one was observed.
    pub fn status(&self) -> Option<u16> {
        match self {
            FailureKind::HttpStatus(code) => Some(*code),
            _ => None,
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::RedirectLimitExceeded => write!(f, "redirect limit exceeded"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::Network => write!(f, "network error"),
        }
    }
}

/// How one dashboard panel reaches the presenter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelBody {
    /// Fetched payload embedded in the result, decoded as UTF-8.
    Inline(String),
    /// The presenter loads the panel straight from its URL.
    Linked,
    /// Marked failed under best-effort aggregation.
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Panel {
    pub kind: StatKind,
    pub url: String,
    pub body: PanelBody,
}

/// The combined result of one lookup: every panel settled, avatar resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dashboard {
    pub username: Username,
    pub avatar_url: String,
    /// One entry per non-profile kind, in catalog order.
    pub panels: Vec<Panel>,
}

impl Dashboard {
    pub fn panel(&self, kind: StatKind) -> Option<&Panel> {
        self.panels.iter().find(|panel| panel.kind == kind)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AggregateError {
    /// The profile lookup said the user does not exist.
    #[error("GitHub user `{username}` was not found")]
    NotFound { username: String },
    /// Every other way an aggregation can fail: a failed sub-fetch, the
    /// join deadline, a malformed profile payload.
    #[error("failed to fetch GitHub stats for `{username}`: {message}")]
    Upstream {
        username: String,
        message: String,
        /// Upstream HTTP status, when one was observed.
        status: Option<u16>,
    },
}

impl AggregateError {
    pub fn status(&self) -> Option<u16> {
        match self {
            AggregateError::NotFound { .. } => Some(404),
            AggregateError::Upstream { status, .. } => *status,
        }
    }
}
