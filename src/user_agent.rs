//! Shared User-Agent string for API and video requests.

/// User-Agent sent on every request (identifies the tool and its version).
#[must_use]
pub(crate) fn default_user_agent() -> String {
    let version = env!("CARGO_PKG_VERSION");
    format!("savetv-dl/{version}")
}
