//! Remote deletion of a recording after it was saved locally.

use tracing::instrument;

use super::catalog::TelecastId;
use super::client::ApiClient;
use super::error::RemoveError;
use super::session::Session;

pub(crate) fn delete_path(id: &TelecastId) -> String {
    format!(
        "/STV/M/obj/cRecordOrder/croDelete.cfm?TelecastID={}",
        urlencoding::encode(id.as_str())
    )
}

/// Deletes the recording `id` from the online archive.
///
/// Returns `Ok(false)` without contacting the service when remote deletion
/// is disabled. Any completed request counts as a successful deletion.
///
/// # Errors
///
/// - [`RemoveError::NoSession`] if the session is blank
/// - [`RemoveError::Transport`] if the request fails
#[instrument(skip(client, session))]
pub async fn remove_recording(
    client: &ApiClient,
    session: &Session,
    id: &TelecastId,
) -> Result<bool, RemoveError> {
    if !client.config().remove_remote {
        return Ok(false);
    }
    let cookie = session.cookie_header().ok_or(RemoveError::NoSession)?;
    client.get(&delete_path(id), cookie).await?;
    Ok(true)
}
