//! Session token obtained at login.

use std::fmt;

/// Opaque session cookie (`NAME=value`) attached to every authenticated call.
///
/// The token is redacted in `Debug` output so it never reaches the logs.
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    token: String,
}

impl Session {
    /// Wraps a raw cookie pair.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }

    /// Builds a session from a `Set-Cookie` directive, keeping only the
    /// part before the first attribute delimiter.
    ///
    /// `SNUUID=abc;path=/` becomes `SNUUID=abc`.
    #[must_use]
    pub fn from_set_cookie(directive: &str) -> Option<Self> {
        let pair = directive.split(';').next().unwrap_or_default().trim();
        (!pair.is_empty()).then(|| Self::new(pair))
    }

    /// Value for the `Cookie` request header, `None` when the token is blank.
    #[must_use]
    pub fn cookie_header(&self) -> Option<&str> {
        let token = self.token.trim();
        (!token.is_empty()).then_some(token)
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self.token.split('=').next().unwrap_or_default();
        f.debug_struct("Session")
            .field("cookie", &format_args!("{name}=<redacted>"))
            .finish()
    }
}
