//! Error types for the archive API.
//!
//! One enum per operation so the orchestrator can tell fatal failures
//! (login, listing) apart from per-recording ones.

use thiserror::Error;

/// A metadata request did not complete.
#[derive(Debug, Error)]
#[error("request to {url} failed: {source}")]
pub struct TransportError {
    /// The endpoint that was requested.
    pub url: String,
    /// The underlying network error.
    #[source]
    pub source: reqwest::Error,
}

impl TransportError {
    /// Creates a transport error for `url`.
    pub fn new(url: impl Into<String>, source: reqwest::Error) -> Self {
        Self {
            url: url.into(),
            source,
        }
    }
}

/// Login failures. Always fatal for a run.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The response body did not carry the success marker.
    #[error("login denied")]
    Denied,

    /// Login succeeded but no session cookie was issued.
    #[error("login response carried no session cookie")]
    MissingCookie,

    /// The login request itself failed.
    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// Archive listing failures. Always fatal for a run.
#[derive(Debug, Error)]
pub enum ListError {
    /// Called without a usable session.
    #[error("no session token, did you login?")]
    NoSession,

    /// The listing request failed.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The listing body was not the expected JSON document.
    #[error("malformed archive listing: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Download-url resolution failures for a single recording.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// Called without a usable session.
    #[error("no session token, did you login?")]
    NoSession,

    /// The recording has no ad-free encoding to request.
    #[error("no ad-free download available for telecast {id}")]
    NoQuality {
        /// Telecast the url was requested for.
        id: String,
    },

    /// The service did not answer with an `OK` status and a url.
    #[error("no download url from server for telecast {id}")]
    NoUrl {
        /// Telecast the url was requested for.
        id: String,
    },

    /// The resolution request failed.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The response body was not JSON.
    #[error("malformed download url response: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Remote deletion failures for a single recording.
#[derive(Debug, Error)]
pub enum RemoveError {
    /// Called without a usable session.
    #[error("no session token, did you login?")]
    NoSession,

    /// The deletion request failed.
    #[error(transparent)]
    Transport(#[from] TransportError),
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_error_messages_name_the_telecast() {
        let err = ResolveError::NoUrl {
            id: "12345".to_string(),
        };
        assert!(err.to_string().contains("12345"));

        let err = ResolveError::NoQuality {
            id: "777".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("ad-free"), "unexpected message: {msg}");
        assert!(msg.contains("777"), "unexpected message: {msg}");
    }

    #[test]
    fn test_no_session_message_hints_at_login() {
        assert!(ListError::NoSession.to_string().contains("login"));
        assert!(RemoveError::NoSession.to_string().contains("login"));
    }

    #[test]
    fn test_list_parse_error_from_serde() {
        let source = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err = ListError::from(source);
        assert!(err.to_string().starts_with("malformed archive listing"));
    }
}
