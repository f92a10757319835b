// Error types for the dashboard pipeline.
//
// Fetch and render errors halt the run. Validation errors are per row:
// the offending record is skipped and the rest of the batch continues.

use thiserror::Error;

/// Failures of the single fetch against the records endpoint.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Network response was not ok (Status: {status})")]
    Network { status: u16 },

    #[error("Request failed: {0}")]
    Transport(String),

    #[error("Response is not a JSON array: {0}")]
    Parse(#[from] serde_json::Error),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        FetchError::Transport(err.to_string())
    }
}

/// A fetched row that does not match the record schema.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("record {index}: expected an object")]
    NotAnObject { index: usize },

    #[error("record {index}: missing field `{field}`")]
    Missing { index: usize, field: &'static str },

    #[error("record {index}: field `{field}` is not {expected}")]
    Mistyped {
        index: usize,
        field: &'static str,
        expected: &'static str,
    },
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("render target `#{id}` not found or not closed in page")]
    DomUnavailable { id: String },
}
