use std::fmt;

use thiserror::Error;

use super::ApiError;

/// Input required before an alert request may be built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertField {
    Email,
    Line,
    StartPoint,
}

impl fmt::Display for AlertField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlertField::Email => f.write_str("email"),
            AlertField::Line => f.write_str("line"),
            AlertField::StartPoint => f.write_str("start point"),
        }
    }
}

#[derive(Debug, Error)]
pub enum AlertError {
    #[error("Alert is missing its {missing}.")]
    Incomplete { missing: AlertField },
    #[error("Alert service answered with status '{status}'.")]
    Rejected { status: String },
    #[error("Alert request failed: {source}")]
    Network {
        #[source]
        source: ApiError,
    },
}

impl AlertError {
    pub const INCOMPLETE_MESSAGE: &'static str =
        "Fill in every field and click the map to set your start point.";
    pub const FAILURE_MESSAGE: &'static str = "Failed to create the alert.";

    /// `true` when the error was raised locally, before any request went out.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, AlertError::Incomplete { .. })
    }

    /// Text shown to the user next to the alert form.
    #[must_use]
    pub const fn user_message(&self) -> &'static str {
        match self {
            AlertError::Incomplete { .. } => Self::INCOMPLETE_MESSAGE,
            AlertError::Rejected { .. } | AlertError::Network { .. } => Self::FAILURE_MESSAGE,
        }
    }
}

impl From<ApiError> for AlertError {
    fn from(source: ApiError) -> Self {
        AlertError::Network { source }
    }
}
