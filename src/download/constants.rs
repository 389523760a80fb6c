//! Constants for the download module.

/// Extension appended to a video while it is being transferred.
///
/// A file carrying it at startup was left behind by a killed run.
pub const TEMP_EXTENSION: &str = "savetv_temp";

/// Buffer size for writing transfer chunks to the temp file.
pub(crate) const WRITE_BUFFER_BYTES: usize = 256 * 1024;
