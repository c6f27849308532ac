//! Shared error type across sitemeter crates.

use std::fmt;
use std::io;

use thiserror::Error;

/// Stable error codes (logged and asserted on by tests).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// An identifier listing could not be read.
    IdentifierSourceUnavailable,
    /// Invalid configuration value.
    BadConfig,
    /// Unsupported config version.
    UnsupportedVersion,
    /// Malformed sitemap input.
    InvalidInput,
    /// Internal error.
    Internal,
}

impl ErrorCode {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::IdentifierSourceUnavailable => "IDENTIFIER_SOURCE_UNAVAILABLE",
            ErrorCode::BadConfig => "BAD_CONFIG",
            ErrorCode::UnsupportedVersion => "UNSUPPORTED_VERSION",
            ErrorCode::InvalidInput => "INVALID_INPUT",
            ErrorCode::Internal => "INTERNAL",
        }
    }
}

/// Which identifier set a read was for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdentifierSet {
    Roadmaps,
    BestPractices,
}

impl IdentifierSet {
    pub fn as_str(self) -> &'static str {
        match self {
            IdentifierSet::Roadmaps => "roadmaps",
            IdentifierSet::BestPractices => "best_practices",
        }
    }
}

impl fmt::Display for IdentifierSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, SiteError>;

/// Unified error type used by core and server.
#[derive(Debug, Error)]
pub enum SiteError {
    #[error("identifier source unavailable ({set}, {kind:?}): {path}")]
    IdentifierSourceUnavailable {
        set: IdentifierSet,
        kind: io::ErrorKind,
        path: String,
    },
    #[error("bad config: {0}")]
    BadConfig(String),
    #[error("unsupported config version")]
    UnsupportedVersion,
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("internal: {0}")]
    Internal(String),
}

impl SiteError {
    /// Build an `IdentifierSourceUnavailable` from a failed listing.
    pub fn source_unavailable(set: IdentifierSet, path: impl Into<String>, err: &io::Error) -> Self {
        SiteError::IdentifierSourceUnavailable {
            set,
            kind: err.kind(),
            path: path.into(),
        }
    }

    /// Map to a stable code.
    pub fn code(&self) -> ErrorCode {
        match self {
            SiteError::IdentifierSourceUnavailable { .. } => ErrorCode::IdentifierSourceUnavailable,
            SiteError::BadConfig(_) => ErrorCode::BadConfig,
            SiteError::UnsupportedVersion => ErrorCode::UnsupportedVersion,
            SiteError::InvalidInput(_) => ErrorCode::InvalidInput,
            SiteError::Internal(_) => ErrorCode::Internal,
        }
    }
}
