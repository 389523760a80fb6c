//! Save.TV archive API.
//!
//! Four endpoints are used, all relative to the configured base URL:
//! - login (form POST, success detected by a body marker)
//! - archive listing (GET, JSON)
//! - download-url resolution (GET, JSON with a positional status array)
//! - deletion (GET)
//!
//! Every call after login carries the [`Session`] cookie explicitly.
//!
//! # Example
//!
//! ```no_run
//! use savetv_core::api::{SaveTvApi, SaveTvClient};
//! use savetv_core::config::ApiConfig;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let api = SaveTvClient::new(ApiConfig::default())?;
//! let session = api.login("user", "secret").await?;
//! for item in api.list_recordings(&session).await? {
//!     println!("{}: {}", item.id, item.display_name);
//! }
//! # Ok(())
//! # }
//! ```

mod auth;
mod catalog;
mod client;
mod error;
mod remove;
mod resolve;
mod session;

pub use auth::login;
pub use catalog::{CatalogItem, TelecastId, list_recordings, parse_listing};
pub use client::{ApiClient, ApiResponse};
pub use error::{AuthError, ListError, RemoveError, ResolveError, TransportError};
pub use remove::remove_recording;
pub use resolve::{extract_download_url, resolve_download_url, url_from_status_array};
pub use session::Session;

use async_trait::async_trait;

use crate::config::ApiConfig;

/// Remote operations the pipeline depends on.
#[async_trait]
pub trait SaveTvApi: Send + Sync {
    /// Exchanges credentials for a session.
    async fn login(&self, user: &str, password: &str) -> Result<Session, AuthError>;

    /// Lists recordings in server order.
    async fn list_recordings(&self, session: &Session) -> Result<Vec<CatalogItem>, ListError>;

    /// Resolves the one-time download url for an item.
    async fn resolve_download_url(
        &self,
        session: &Session,
        item: &CatalogItem,
    ) -> Result<String, ResolveError>;

    /// Deletes a recording remotely; `Ok(false)` when deletion is disabled.
    async fn remove_recording(&self, session: &Session, id: &TelecastId)
    -> Result<bool, RemoveError>;
}

/// [`SaveTvApi`] backed by HTTP requests to the live service.
#[derive(Debug, Clone)]
pub struct SaveTvClient {
    client: ApiClient,
}

impl SaveTvClient {
    /// Builds a client for the given API settings.
    ///
    /// # Errors
    ///
    /// Returns the `reqwest` builder error if the HTTP client cannot be built.
    pub fn new(config: ApiConfig) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: ApiClient::new(config)?,
        })
    }
}

#[async_trait]
impl SaveTvApi for SaveTvClient {
    async fn login(&self, user: &str, password: &str) -> Result<Session, AuthError> {
        auth::login(&self.client, user, password).await
    }

    async fn list_recordings(&self, session: &Session) -> Result<Vec<CatalogItem>, ListError> {
        catalog::list_recordings(&self.client, session).await
    }

    async fn resolve_download_url(
        &self,
        session: &Session,
        item: &CatalogItem,
    ) -> Result<String, ResolveError> {
        resolve::resolve_download_url(&self.client, session, item).await
    }

    async fn remove_recording(
        &self,
        session: &Session,
        id: &TelecastId,
    ) -> Result<bool, RemoveError> {
        remove::remove_recording(&self.client, session, id).await
    }
}
