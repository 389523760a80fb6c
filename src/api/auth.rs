//! Login: exchanges credentials for a session cookie.

use reqwest::header::SET_COOKIE;
use tracing::{debug, instrument};

use super::client::{ApiClient, ApiResponse};
use super::error::AuthError;
use super::session::Session;

/// Login form endpoint.
pub(crate) const LOGIN_PATH: &str = "/STV/M/Index.cfm?sk=PREMIUM";

/// Literal the service puts in the body of a successful login page.
const LOGIN_SUCCESS_MARKER: &str = "Login_Succeed";

/// Posts the login form and returns the session cookie.
///
/// # Errors
///
/// - [`AuthError::Transport`] if the request fails
/// - [`AuthError::Denied`] if the body lacks the success marker
/// - [`AuthError::MissingCookie`] if no `Set-Cookie` header was sent
#[instrument(skip(client, password))]
pub async fn login(client: &ApiClient, user: &str, password: &str) -> Result<Session, AuthError> {
    let response = client
        .post_form(
            LOGIN_PATH,
            &[("sUsername", user), ("sPassword", password), ("value", "Login")],
        )
        .await?;
    session_from_login_response(&response)
}

/// Applies the success predicate and extracts the first cookie pair.
pub(crate) fn session_from_login_response(response: &ApiResponse) -> Result<Session, AuthError> {
    if !response.body.contains(LOGIN_SUCCESS_MARKER) {
        debug!(body_len = response.body.len(), "login marker not found");
        return Err(AuthError::Denied);
    }

    response
        .headers
        .get_all(SET_COOKIE)
        .iter()
        .next()
        .and_then(|value| value.to_str().ok())
        .and_then(Session::from_set_cookie)
        .ok_or(AuthError::MissingCookie)
}
