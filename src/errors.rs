//! Error taxonomy for metadata resolution.

use failure::Fail;

/// Fatal errors of a single resolution run.
#[derive(Debug, Fail, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// Unrecognized track selector.
    #[fail(display = "invalid track '{}'", track)]
    InvalidTrack { track: String },

    /// Transport failure or non-success status from an upstream endpoint.
    #[fail(display = "failed to fetch '{}': {}", url, reason)]
    Fetch { url: String, reason: String },

    /// Upstream payload does not have the expected shape.
    #[fail(display = "failed to parse '{}': {}", subject, reason)]
    Parse { subject: String, reason: String },

    /// Kernel version is not dot-separated.
    #[fail(display = "invalid kernel version '{}'", version)]
    InvalidVersion { version: String },

    /// Metadata construction produced nothing.
    #[fail(display = "could not resolve metadata, inspect '{}' manually", url)]
    Resolution { url: String },

    /// Patch and kernel records share a key.
    #[fail(display = "duplicate metadata key '{}'", key)]
    KeyCollision { key: String },
}

impl ResolveError {
    pub(crate) fn fetch<U, R>(url: U, reason: R) -> Self
    where
        U: Into<String>,
        R: ToString,
    {
        ResolveError::Fetch {
            url: url.into(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn parse<S, R>(subject: S, reason: R) -> Self
    where
        S: Into<String>,
        R: ToString,
    {
        ResolveError::Parse {
            subject: subject.into(),
            reason: reason.to_string(),
        }
    }
}
