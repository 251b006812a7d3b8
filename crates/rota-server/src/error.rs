//! Server error types.

use std::path::PathBuf;

use rota_model::AnalysisError;
use thiserror::Error;

/// Errors that stop or disturb the HTTP layer itself.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("failed to bind {addr}: {message}")]
    Bind { addr: String, message: String },

    #[error("failed to receive request: {0}")]
    Recv(#[source] std::io::Error),

    #[error("failed to read request body: {0}")]
    Body(#[source] std::io::Error),

    #[error("failed to send response: {0}")]
    Respond(#[source] std::io::Error),

    #[error("server task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Errors raised while serving `/analyze`. Rendered inline on the form.
#[derive(Debug, Error)]
pub enum AnalyzeError {
    #[error("upload exceeds the {limit} byte limit")]
    TooLarge { limit: u64 },

    #[error("invalid form data: {0}")]
    Form(#[from] multer::Error),

    #[error("missing form field '{0}'")]
    MissingField(&'static str),

    #[error("failed to save upload to {}: {source}", path.display())]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Analysis(#[from] AnalysisError),

    #[error("analysis task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}
