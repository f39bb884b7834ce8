use std::fmt;
use thiserror::Error;

/// Exit codes for the CLI driver.
///
/// A produced response envelope is always a success from the process point
/// of view, whatever HTTP status it carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// An envelope was produced and printed
    Success = 0,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
    /// Configuration, event decoding or output error
    ApplicationError = 3,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
            ExitCode::ApplicationError => write!(f, "Application Error (3)"),
        }
    }
}

/// Failures of the document fetch step.
///
/// Produced by [`crate::ports::outbound::DocumentStore`] implementations
/// (`NotFound`, `Fetch`) and by the fetcher's decode step (`Parse`).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("File {key} not found")]
    NotFound { key: String },

    #[error("{0}")]
    Fetch(String),

    #[error("{0}")]
    Parse(String),
}

/// Errors surfaced by a single query invocation.
///
/// Every variant maps to exactly one HTTP status; the `Display` output is
/// the message placed in the `{"error": ...}` body.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QueryError {
    #[error("Invalid request path")]
    BadRoute { path: String },

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Upstream(String),
}

impl QueryError {
    pub fn status_code(&self) -> u16 {
        match self {
            QueryError::BadRoute { .. } => 400,
            QueryError::NotFound(_) => 404,
            QueryError::Upstream(_) => 500,
        }
    }

    pub fn component_not_found(component: &str) -> Self {
        QueryError::NotFound(format!("Component '{}' not found", component))
    }

    pub fn resource_not_found(resource: &str, component: &str) -> Self {
        QueryError::NotFound(format!(
            "Resource '{}' not found in component '{}'",
            resource, component
        ))
    }

    pub fn vulnerability_not_found(id: &str) -> Self {
        QueryError::NotFound(format!("Vulnerability '{}' not found", id))
    }

    /// A missing sub-object of the report such as `metadata` or `$schema`
    pub fn section_not_found(section: &str) -> Self {
        QueryError::NotFound(format!("{} not found", section))
    }
}

impl From<FetchError> for QueryError {
    fn from(err: FetchError) -> Self {
        match err {
            FetchError::NotFound { .. } => QueryError::NotFound(err.to_string()),
            FetchError::Fetch(_) | FetchError::Parse(_) => QueryError::Upstream(err.to_string()),
        }
    }
}
