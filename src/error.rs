//! Errors returned by the task collections and the task store

use chrono::NaiveDate;
use reqwest::StatusCode;

/// Errors that can happen when talking to a task collection, or when validating user input
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The request could not be sent, or its response could not be read
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The collection answered with a non-success HTTP status
    #[error("unexpected HTTP status code {status} for {url}")]
    Status { status: StatusCode, url: String },

    /// The response body is not a valid task (or list of tasks)
    #[error("invalid response body: {0}")]
    Body(#[from] serde_json::Error),

    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// The input was rejected before anything was sent
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A failure scripted by a [`MockBehaviour`](crate::mock_behaviour::MockBehaviour)
    #[error("{0}")]
    Mocked(String),
}

/// Reasons for rejecting a draft or an edit locally
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("task text must not be empty")]
    EmptyText,
    #[error("start date {start} is after end date {end}")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },
}

/// The broad family of an [`Error`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// Network or transport failure (including undecodable responses)
    Network,
    /// The remote collection did not answer with a 2xx status
    Status,
    /// Local validation failure, nothing was sent
    Validation,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Transport(_) | Error::Body(_) | Error::Url(_) | Error::Mocked(_) => ErrorKind::Network,
            Error::Status { .. } => ErrorKind::Status,
            Error::Validation(_) => ErrorKind::Validation,
        }
    }

    /// The HTTP status, in case the collection answered with a non-success one
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// The kind of store operation an error banner refers to
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
    Load,
    Create,
    Update,
    Delete,
}

impl Operation {
    /// The static message shown to the user when this operation fails.
    ///
    /// Whatever the underlying error is, users always see the same message for a given operation.
    pub fn user_message(&self) -> &'static str {
        match self {
            Operation::Load => "Unable to load the tasks.",
            Operation::Create => "Unable to add the task.",
            Operation::Update => "Unable to update the task.",
            Operation::Delete => "Unable to delete the task.",
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Load => write!(f, "load"),
            Operation::Create => write!(f, "create"),
            Operation::Update => write!(f, "update"),
            Operation::Delete => write!(f, "delete"),
        }
    }
}
