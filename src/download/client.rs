//! Stream-mode HTTP transport: writes a video to disk.
//!
//! The body is streamed into `<work_dir>/<name>.savetv_temp`, copied to
//! `<target_dir>/<name>` and the temp file is deleted. Copying instead of
//! renaming keeps targets on other filesystems (external drives, network
//! mounts) working.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use futures_util::StreamExt;
use reqwest::Client;
use reqwest::header::{CONTENT_DISPOSITION, CONTENT_LENGTH};
use tokio::fs::File;
use tokio::io::{AsyncWriteExt, BufWriter};
use tracing::{debug, info, instrument, warn};

use super::VideoFetcher;
use super::constants::WRITE_BUFFER_BYTES;
use super::error::DownloadError;
use super::filename::{
    parse_content_disposition, plaintext_video_url, sanitize_filename, temp_file_name,
};
use crate::config::Config;
use crate::progress::{NoopReporter, ProgressReporter};
use crate::user_agent;

/// HTTP client for video transfers.
///
/// Created once per run and reused for every recording.
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    work_dir: PathBuf,
    target_dir: PathBuf,
    video_port: u16,
    progress: Arc<dyn ProgressReporter>,
}

impl fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpClient")
            .field("work_dir", &self.work_dir)
            .field("target_dir", &self.target_dir)
            .field("video_port", &self.video_port)
            .finish_non_exhaustive()
    }
}

impl HttpClient {
    /// Creates a client that reports progress to nobody.
    ///
    /// # Errors
    ///
    /// Returns the `reqwest` builder error if the HTTP client cannot be built.
    pub fn new(config: &Config) -> Result<Self, reqwest::Error> {
        Self::with_progress(config, Arc::new(NoopReporter))
    }

    /// Creates a client that reports transfer progress to `progress`.
    ///
    /// Compression is disabled so byte counts line up with `Content-Length`.
    /// No request timeout is configured.
    ///
    /// # Errors
    ///
    /// Returns the `reqwest` builder error if the HTTP client cannot be built.
    pub fn with_progress(
        config: &Config,
        progress: Arc<dyn ProgressReporter>,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .gzip(false)
            .user_agent(user_agent::default_user_agent())
            .build()?;
        Ok(Self {
            client,
            work_dir: config.work_dir.clone(),
            target_dir: config.target_dir.clone(),
            video_port: config.api.video_port,
            progress,
        })
    }

    /// Downloads the video behind a resolved download URL.
    ///
    /// The URL is rewritten to plain HTTP on the configured video port.
    ///
    /// # Returns
    ///
    /// The final path inside the target directory.
    ///
    /// # Errors
    ///
    /// Returns `DownloadError` if:
    /// - The URL is invalid
    /// - The request or the transfer fails
    /// - The response names no file (`MissingFilename`)
    /// - Writing, copying or deleting files fails
    #[instrument(skip(self), fields(url = %url))]
    pub async fn download_video(&self, url: &str) -> Result<PathBuf, DownloadError> {
        let video_url = plaintext_video_url(url, self.video_port)?;
        debug!(video_url = %video_url, "starting transfer");

        let response = self
            .client
            .get(video_url.as_str())
            .send()
            .await
            .map_err(|e| DownloadError::network(video_url.as_str(), e))?;

        let filename = response
            .headers()
            .get(CONTENT_DISPOSITION)
            .and_then(|value| value.to_str().ok())
            .and_then(parse_content_disposition)
            .map(|name| sanitize_filename(&name))
            .ok_or_else(|| DownloadError::missing_filename(video_url.as_str()))?;
        let content_length = response
            .headers()
            .get(CONTENT_LENGTH)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.parse::<u64>().ok());

        let temp_path = self.work_dir.join(temp_file_name(&filename));
        let final_path = self.target_dir.join(&filename);
        debug!(temp = %temp_path.display(), dest = %final_path.display(), "resolved paths");

        let mut file = File::create(&temp_path)
            .await
            .map_err(|e| DownloadError::io(temp_path.clone(), e))?;

        self.progress.start(content_length);
        let streamed = stream_to_file(
            &mut file,
            response,
            video_url.as_str(),
            &temp_path,
            self.progress.as_ref(),
        )
        .await;
        self.progress.finish();
        drop(file);

        let bytes = match streamed {
            Ok(bytes) => bytes,
            Err(error) => {
                debug!(path = %temp_path.display(), "cleaning up partial file after error");
                let _ = tokio::fs::remove_file(&temp_path).await;
                return Err(error);
            }
        };

        relocate(&temp_path, &final_path).await?;

        info!(path = %final_path.display(), bytes, "download complete");
        Ok(final_path)
    }
}

#[async_trait]
impl VideoFetcher for HttpClient {
    async fn fetch(&self, url: &str) -> Result<PathBuf, DownloadError> {
        self.download_video(url).await
    }
}

/// Streams response body to file, returning bytes written.
async fn stream_to_file(
    file: &mut File,
    response: reqwest::Response,
    url: &str,
    file_path: &Path,
    progress: &dyn ProgressReporter,
) -> Result<u64, DownloadError> {
    let mut writer = BufWriter::with_capacity(WRITE_BUFFER_BYTES, file);
    let mut stream = response.bytes_stream();
    let mut bytes_written: u64 = 0;

    while let Some(chunk_result) = stream.next().await {
        let chunk = chunk_result.map_err(|e| DownloadError::network(url, e))?;

        writer
            .write_all(&chunk)
            .await
            .map_err(|e| DownloadError::io(file_path.to_path_buf(), e))?;

        let len = chunk.len() as u64;
        bytes_written += len;
        progress.advance(len);
    }

    writer
        .flush()
        .await
        .map_err(|e| DownloadError::io(file_path.to_path_buf(), e))?;

    Ok(bytes_written)
}

/// Copies the finished temp file to its destination, then deletes it.
///
/// A failed copy removes both files; the transfer is redone next run.
/// A failed delete only warns, the destination is already complete and the
/// leftover is purged by the next run's cleanup.
async fn relocate(temp_path: &Path, final_path: &Path) -> Result<(), DownloadError> {
    if let Err(e) = tokio::fs::copy(temp_path, final_path).await {
        let _ = tokio::fs::remove_file(final_path).await;
        let _ = tokio::fs::remove_file(temp_path).await;
        return Err(DownloadError::io(final_path.to_path_buf(), e));
    }

    if let Err(e) = tokio::fs::remove_file(temp_path).await {
        warn!(path = %temp_path.display(), error = %e, "could not delete temp file");
    }
    Ok(())
}
