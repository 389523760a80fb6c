//! Archive listing: fetches recorded telecasts and picks their best
//! ad-free encoding.

use std::fmt;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::{debug, instrument};

use super::client::ApiClient;
use super::error::ListError;
use super::session::Session;
use crate::quality::{EncodingOption, QualityTier, select_best};

/// Listing endpoint: all finished recordings, one page of up to 1000 entries.
pub(crate) const LIST_PATH: &str = "/STV/M/obj/archive/JSON/VideoArchiveApi.cfm?bAggregateEntries=false&iEntriesPerPage=1000&iRecordingState=1";

/// Remote identifier of one recording.
///
/// The service sends it as a JSON number; it is kept in its textual form.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TelecastId(String);

impl TelecastId {
    /// Wraps an identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Identifier as sent back to the service.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TelecastId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for TelecastId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Value::deserialize(deserializer)? {
            Value::String(s) if !s.trim().is_empty() => Ok(Self(s.trim().to_string())),
            Value::Number(n) => number_text(&n)
                .map(Self)
                .ok_or_else(|| D::Error::custom(format!("invalid telecast id: {n}"))),
            other => Err(D::Error::custom(format!("invalid telecast id: {other}"))),
        }
    }
}

/// One downloadable recording, in server order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogItem {
    /// Remote identifier.
    pub id: TelecastId,
    /// `title` or `title - subtitle`.
    pub display_name: String,
    /// Best ad-free tier, `None` if the recording has no ad-free encoding.
    pub quality: Option<QualityTier>,
}

#[derive(Debug, Deserialize)]
struct ArchiveListing {
    #[serde(rename = "ARRVIDEOARCHIVEENTRIES")]
    entries: Vec<ArchiveEntry>,
}

#[derive(Debug, Deserialize)]
struct ArchiveEntry {
    #[serde(rename = "STRTELECASTENTRY")]
    telecast: TelecastEntry,
}

#[derive(Debug, Deserialize)]
struct TelecastEntry {
    #[serde(rename = "ITELECASTID")]
    id: TelecastId,
    #[serde(rename = "STITLE", default, deserialize_with = "lenient_text")]
    title: Option<String>,
    #[serde(rename = "SSUBTITLE", default, deserialize_with = "lenient_text")]
    subtitle: Option<String>,
    #[serde(rename = "ARRALLOWDDOWNLOADFORMATS", default)]
    formats: Vec<DownloadFormat>,
}

#[derive(Debug, Deserialize)]
struct DownloadFormat {
    #[serde(rename = "BADCUTENABLED", default, deserialize_with = "lenient_flag")]
    ad_free: bool,
    #[serde(rename = "RECORDINGFORMATID", default, deserialize_with = "lenient_rank")]
    rank: Option<u32>,
}

impl TelecastEntry {
    fn into_item(self) -> CatalogItem {
        let options: Vec<EncodingOption> = self
            .formats
            .iter()
            .filter_map(|format| {
                format.rank.map(|rank| EncodingOption::new(format.ad_free, rank))
            })
            .collect();
        let quality = select_best(&options).map(|option| option.rank);

        let title = self.title.unwrap_or_default();
        let display_name = match self.subtitle.filter(|s| !s.is_empty()) {
            Some(subtitle) => format!("{title} - {subtitle}"),
            None => title,
        };

        CatalogItem {
            id: self.id,
            display_name,
            quality,
        }
    }
}

/// Fetches the archive listing.
///
/// # Errors
///
/// - [`ListError::NoSession`] if the session is blank
/// - [`ListError::Transport`] if the request fails
/// - [`ListError::Parse`] if the body is not the expected JSON document
#[instrument(skip(client, session))]
pub async fn list_recordings(
    client: &ApiClient,
    session: &Session,
) -> Result<Vec<CatalogItem>, ListError> {
    let cookie = session.cookie_header().ok_or(ListError::NoSession)?;
    let response = client.get(LIST_PATH, cookie).await?;
    let items = parse_listing(&response.body)?;
    debug!(count = items.len(), "archive listing parsed");
    Ok(items)
}

/// Parses a listing body into catalog items, preserving server order.
///
/// # Errors
///
/// Returns the `serde_json` error if the document does not match.
pub fn parse_listing(body: &str) -> Result<Vec<CatalogItem>, serde_json::Error> {
    let listing: ArchiveListing = serde_json::from_str(body)?;
    Ok(listing
        .entries
        .into_iter()
        .map(|entry| entry.telecast.into_item())
        .collect())
}

fn number_text(n: &serde_json::Number) -> Option<String> {
    if let Some(v) = n.as_u64() {
        return Some(v.to_string());
    }
    if let Some(v) = n.as_i64() {
        return Some(v.to_string());
    }
    // ColdFusion occasionally serializes integers as `123.0`.
    n.as_f64()
        .filter(|v| v.fract() == 0.0 && v.is_finite())
        .map(|v| format!("{v:.0}"))
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        _ => None,
    })
}

fn lenient_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Bool(b)) => b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|v| v != 0.0),
        Some(Value::String(s)) => matches!(
            s.trim().to_ascii_lowercase().as_str(),
            "true" | "yes" | "1"
        ),
        _ => false,
    })
}

// Float ranks are range-checked before the cast; `6.0` means 6.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn lenient_rank<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(n)) => n.as_u64().map_or_else(
            || {
                n.as_f64()
                    .filter(|v| (0.0..=f64::from(u32::MAX)).contains(v))
                    .map(|v| v as u32)
            },
            |v| u32::try_from(v).ok(),
        ),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}
