use thiserror::Error;

/// Errors that can occur while talking to the bulk-data API.
#[derive(Debug, Error)]
pub enum ClientError {
    /// An error during the HTTP request (e.g., network failure, timeout).
    #[error("API request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("API error ({status}): {body}")]
    Api {
        status: reqwest::StatusCode,
        body: String,
    },

    /// The response body could not be unpacked as a ZIP archive.
    #[error("malformed archive: {0}")]
    Archive(#[from] zip::result::ZipError),

    /// An extracted member could not be written to disk.
    #[error("I/O error")]
    Io(#[from] std::io::Error),

    /// A text response body is not valid UTF-8.
    #[error("response is not valid UTF-8")]
    Decode(#[from] std::string::FromUtf8Error),

    /// The caller identifier is not configured.
    #[error(transparent)]
    MissingEnv(#[from] shared_utils::env::MissingEnvVarError),
}
