//! Transfer failures.

use std::path::PathBuf;

use thiserror::Error;

/// Why a video could not be saved.
#[derive(Debug, Error)]
pub enum DownloadError {
    /// The resolved url has no usable host or does not parse.
    #[error("unusable video url: {url}")]
    InvalidUrl {
        /// Url as returned by the service.
        url: String,
    },

    /// Connecting or receiving the body failed.
    #[error("transfer of {url} failed: {source}")]
    Network {
        /// Url after the scheme and port rewrite.
        url: String,
        /// Underlying client error.
        #[source]
        source: reqwest::Error,
    },

    /// No `Content-Disposition` filename. The service answers like this when
    /// it has nothing to hand out.
    #[error("server didn't respond with video file for {url}")]
    MissingFilename {
        /// Requested url.
        url: String,
    },

    /// Writing the temp file or copying it to the target failed.
    #[error("cannot write {path}: {source}")]
    Io {
        /// File being written.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
}

impl DownloadError {
    pub(crate) fn invalid_url(url: &str) -> Self {
        Self::InvalidUrl {
            url: url.to_string(),
        }
    }

    pub(crate) fn network(url: &str, source: reqwest::Error) -> Self {
        Self::Network {
            url: url.to_string(),
            source,
        }
    }

    pub(crate) fn missing_filename(url: &str) -> Self {
        Self::MissingFilename {
            url: url.to_string(),
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
