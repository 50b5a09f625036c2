use std::{fmt, path::PathBuf, time::Duration};

use thiserror::Error;

/// What kind of entry a lookup or removal was aimed at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Location,
    Variable,
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryKind::Location => f.write_str("Location"),
            EntryKind::Variable => f.write_str("Variable"),
        }
    }
}

/// Why an outbound weather request did not produce a body.
#[derive(Debug, Error)]
pub enum RequestFailure {
    #[error("no response within {after:?}")]
    Timeout { after: Duration },

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("server answered with status {status}: {body}")]
    Status { status: u16, body: String },
}

/// Errors returned by the core operations.
#[derive(Debug, Error)]
pub enum MeteoError {
    /// Lookup or removal target is absent.
    #[error("{kind} '{name}' not found")]
    NotFound { kind: EntryKind, name: String },

    /// HTTP transport failure or non-success status.
    #[error("request to {url} failed: {reason}")]
    Request {
        url: String,
        #[source]
        reason: RequestFailure,
    },

    /// A file could not be opened or written.
    #[error("unable to write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl MeteoError {
    pub(crate) fn not_found(kind: EntryKind, name: impl Into<String>) -> Self {
        Self::NotFound { kind, name: name.into() }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, MeteoError::NotFound { .. })
    }

    pub fn is_request(&self) -> bool {
        matches!(self, MeteoError::Request { .. })
    }

    pub fn is_io(&self) -> bool {
        matches!(self, MeteoError::Io { .. })
    }
}

pub type Result<T, E = MeteoError> = std::result::Result<T, E>;
