//! Filename extraction, sanitization, and URL rewriting for video transfers.

use std::path::Path;

use url::Url;

use super::constants::TEMP_EXTENSION;
use super::error::DownloadError;

/// Filename announced by a `Content-Disposition` header value.
///
/// The service sends `attachment; filename=<name>`. Quoted names and the
/// RFC 5987 `filename*=UTF-8''<percent-encoded>` form are accepted too; the
/// latter wins when both are present.
pub(crate) fn parse_content_disposition(header: &str) -> Option<String> {
    let mut plain = None;
    let mut extended = None;

    for param in header.split(';').map(str::trim) {
        let Some((key, value)) = param.split_once('=') else {
            continue;
        };
        let value = value.trim();
        match key.trim().to_ascii_lowercase().as_str() {
            "filename*" => {
                extended = value
                    .split_once("''")
                    .and_then(|(_charset, encoded)| urlencoding::decode(encoded).ok())
                    .map(|decoded| decoded.into_owned());
            }
            "filename" => {
                plain = Some(
                    value
                        .strip_prefix('"')
                        .and_then(|v| v.strip_suffix('"'))
                        .unwrap_or(value)
                        .to_string(),
                );
            }
            _ => {}
        }
    }

    extended
        .filter(|name| !name.is_empty())
        .or(plain)
        .filter(|name| !name.is_empty())
}

/// Makes a server-supplied name safe to join onto the target directory.
///
/// Path separators, characters reserved on Windows and control characters
/// become `_`. A bare `.` or `..` has its dots replaced too.
pub(crate) fn sanitize_filename(name: &str) -> String {
    const RESERVED: &[char] = &['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

    let cleaned: String = name
        .chars()
        .map(|c| if RESERVED.contains(&c) || c.is_control() { '_' } else { c })
        .collect();

    match cleaned.as_str() {
        "" => "_".to_string(),
        "." | ".." => cleaned.replace('.', "_"),
        _ => cleaned,
    }
}

/// Name of the in-progress file for `filename`.
#[must_use]
pub fn temp_file_name(filename: &str) -> String {
    format!("{filename}.{TEMP_EXTENSION}")
}

/// Whether `path` carries the in-progress extension.
#[must_use]
pub fn is_temp_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext == TEMP_EXTENSION)
}

/// Rewrites a resolved download URL onto plain HTTP at a fixed port.
///
/// Host, path, and query are kept as sent by the service.
///
/// # Errors
///
/// Returns [`DownloadError::InvalidUrl`] if `url` does not parse or has no host.
pub fn plaintext_video_url(url: &str, port: u16) -> Result<Url, DownloadError> {
    let mut parsed = Url::parse(url).map_err(|_| DownloadError::invalid_url(url))?;
    if parsed.host_str().is_none_or(str::is_empty) {
        return Err(DownloadError::invalid_url(url));
    }
    parsed
        .set_scheme("http")
        .map_err(|()| DownloadError::invalid_url(url))?;
    parsed
        .set_port(Some(port))
        .map_err(|()| DownloadError::invalid_url(url))?;
    Ok(parsed)
}
