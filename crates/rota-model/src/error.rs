//! Model error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while fetching the model artifact.
#[derive(Debug, Error)]
pub enum ProvisionError {
    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The hub answered with a non-success status code.
    #[error("hub returned status {status} for {url}")]
    Status {
        /// HTTP status code returned by the hub.
        status: u16,
        url: String,
    },

    /// Local filesystem error while creating the directory or writing the file.
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors that can occur while constructing an analysis engine from the artifact.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The artifact is not on disk (usually because the download failed).
    #[error("model artifact not found at {}", .0.display())]
    Missing(PathBuf),

    /// The file does not carry a GGUF header.
    #[error("invalid model file: {0}")]
    InvalidHeader(String),

    /// GGUF container version this loader does not understand.
    #[error("unsupported GGUF version {0}")]
    UnsupportedVersion(u32),

    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors that can occur while analyzing a roster.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// The roster file could not be read or is not valid CSV.
    #[error("could not read roster: {0}")]
    Roster(#[from] csv::Error),

    /// A required column is absent from the roster header.
    #[error("roster is missing a '{0}' column")]
    MissingColumn(&'static str),

    /// Catch-all for engines other than the built-in one.
    #[error("{0}")]
    Other(String),
}
