/// Page state definitions for recording what happened to each visited page
use crate::crawler::FetchError;
use std::fmt;

/// Represents the final state of a visited page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageState {
    // ===== Success =====
    /// Page was fetched, parsed, and its links examined
    Processed,

    // ===== Retrieval failures =====
    /// Page returned HTTP 404 or 410
    DeadLink,

    /// Page could not be reached (timeout, connection refused, DNS failure)
    Unreachable,

    /// Page Content-Type is not HTML
    ContentMismatch,

    /// Any other retrieval failure (non-success status, body read error)
    Failed,
}

impl PageState {
    /// Returns true if this represents a successful visit
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Processed)
    }

    /// Returns true if this represents a retrieval failure
    pub fn is_error(&self) -> bool {
        !self.is_success()
    }

    /// Short lowercase label used in reports
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Processed => "processed",
            Self::DeadLink => "dead_link",
            Self::Unreachable => "unreachable",
            Self::ContentMismatch => "content_mismatch",
            Self::Failed => "failed",
        }
    }

    /// Returns all possible page states
    pub fn all_states() -> [Self; 5] {
        [
            Self::Processed,
            Self::DeadLink,
            Self::Unreachable,
            Self::ContentMismatch,
            Self::Failed,
        ]
    }
}

impl From<&FetchError> for PageState {
    fn from(error: &FetchError) -> Self {
        match error {
            FetchError::Status { status: 404 | 410 } => Self::DeadLink,
            FetchError::Status { .. } => Self::Failed,
            FetchError::Timeout | FetchError::Connect(_) => Self::Unreachable,
            FetchError::ContentMismatch { .. } => Self::ContentMismatch,
            FetchError::Network(_) => Self::Failed,
        }
    }
}

impl fmt::Display for PageState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
