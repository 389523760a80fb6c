//! Metadata-mode HTTP transport for the archive API.
//!
//! Requests go to the configured base URL, bodies are collected as text and
//! handed back together with the response headers. Status codes are not
//! interpreted here; each endpoint decides what counts as success.

use reqwest::header::{CONTENT_TYPE, COOKIE, HeaderMap};
use reqwest::redirect::Policy;
use reqwest::{Client, RequestBuilder};
use tracing::{debug, instrument};

use super::error::TransportError;
use crate::config::ApiConfig;
use crate::user_agent;

/// Headers and text body of a completed API request.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    /// Response headers.
    pub headers: HeaderMap,
    /// Full response body.
    pub body: String,
}

/// Thin request/response wrapper around a `reqwest` client.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    config: ApiConfig,
}

impl ApiClient {
    /// Builds a client for the given API settings.
    ///
    /// Redirects are not followed so the login response's `Set-Cookie`
    /// header stays visible. No request timeout is configured.
    ///
    /// # Errors
    ///
    /// Returns the `reqwest` builder error if the TLS backend cannot be set up.
    pub fn new(config: ApiConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .redirect(Policy::none())
            .gzip(true)
            .user_agent(user_agent::default_user_agent())
            .build()?;
        Ok(Self { client, config })
    }

    /// API settings this client was built with.
    #[must_use]
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Sends a GET to `path_and_query` carrying the session cookie.
    ///
    /// Callers check [`Session::cookie_header`](super::Session::cookie_header) first so a blank session
    /// surfaces as their own `NoSession` error.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] if the request or the body read fails.
    #[instrument(level = "debug", skip(self, cookie))]
    pub async fn get(
        &self,
        path_and_query: &str,
        cookie: &str,
    ) -> Result<ApiResponse, TransportError> {
        let url = self.config.endpoint(path_and_query);
        let request = self.client.get(&url).header(COOKIE, cookie);
        send(request, url).await
    }

    /// POSTs a url-encoded form body to `path_and_query`.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] if the request or the body read fails.
    #[instrument(level = "debug", skip(self, form))]
    pub async fn post_form(
        &self,
        path_and_query: &str,
        form: &[(&str, &str)],
    ) -> Result<ApiResponse, TransportError> {
        let url = self.config.endpoint(path_and_query);
        let request = self
            .client
            .post(&url)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(encode_form(form));
        send(request, url).await
    }
}

async fn send(request: RequestBuilder, url: String) -> Result<ApiResponse, TransportError> {
    let response = request
        .send()
        .await
        .map_err(|e| TransportError::new(url.clone(), e))?;
    debug!(url = %url, status = response.status().as_u16(), "response received");

    let headers = response.headers().clone();
    let body = response
        .text()
        .await
        .map_err(|e| TransportError::new(url, e))?;
    Ok(ApiResponse { headers, body })
}

/// Encodes `key=value` pairs as `application/x-www-form-urlencoded`.
pub(crate) fn encode_form(fields: &[(&str, &str)]) -> String {
    fields
        .iter()
        .map(|(key, value)| {
            format!(
                "{}={}",
                urlencoding::encode(key),
                urlencoding::encode(value)
            )
        })
        .collect::<Vec<_>>()
        .join("&")
}
