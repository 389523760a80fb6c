//! Download-url resolution for one recording at one quality tier.

use serde_json::Value;
use tracing::{debug, instrument};

use super::catalog::{CatalogItem, TelecastId};
use super::client::ApiClient;
use super::error::ResolveError;
use super::session::Session;
use crate::quality::QualityTier;

/// Status literal the service puts in the second slot on success.
const STATUS_OK: &str = "OK";

/// Member of the response object holding the positional status array.
const URL_ARRAY_KEY: &str = "ARRVIDEOURL";

pub(crate) fn download_url_path(id: &TelecastId, quality: QualityTier) -> String {
    format!(
        "/STV/M/obj/cRecordOrder/croGetDownloadUrl.cfm?TelecastId={}&iFormat={}&bAdFree=true",
        urlencoding::encode(id.as_str()),
        quality.value()
    )
}

/// Requests a one-time download url for `item` at its chosen quality.
///
/// # Errors
///
/// - [`ResolveError::NoSession`] if the session is blank
/// - [`ResolveError::NoQuality`] if the item has no ad-free encoding
/// - [`ResolveError::Transport`] / [`ResolveError::Parse`] on request or JSON failure
/// - [`ResolveError::NoUrl`] if the service did not answer `OK` with a url
#[instrument(skip(client, session, item), fields(id = %item.id))]
pub async fn resolve_download_url(
    client: &ApiClient,
    session: &Session,
    item: &CatalogItem,
) -> Result<String, ResolveError> {
    let cookie = session.cookie_header().ok_or(ResolveError::NoSession)?;
    let quality = item.quality.ok_or_else(|| ResolveError::NoQuality {
        id: item.id.to_string(),
    })?;

    let response = client
        .get(&download_url_path(&item.id, quality), cookie)
        .await?;
    let document: Value = serde_json::from_str(&response.body)?;

    let url = extract_download_url(&document).ok_or_else(|| ResolveError::NoUrl {
        id: item.id.to_string(),
    })?;
    debug!("download url resolved");
    Ok(url)
}

/// Reads the url out of the `ARRVIDEOURL` member of a resolution response.
#[must_use]
pub fn extract_download_url(document: &Value) -> Option<String> {
    document
        .get(URL_ARRAY_KEY)
        .and_then(Value::as_array)
        .and_then(|fields| url_from_status_array(fields))
}

/// Positional contract: `[_, "OK", url]` yields `url`, anything else nothing.
#[must_use]
pub fn url_from_status_array(fields: &[Value]) -> Option<String> {
    match (fields.get(1), fields.get(2)) {
        (Some(Value::String(status)), Some(Value::String(url)))
            if status == STATUS_OK && !url.is_empty() =>
        {
            Some(url.clone())
        }
        _ => None,
    }
}
