//! Model artifact configuration.

use rota_core::ArtifactSpec;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::ConfigError;

fn default_repo_id() -> String {
    "bartowski/Llama-3.2-1B-Instruct-GGUF".to_string()
}

fn default_filename() -> String {
    "Llama-3.2-1B-Instruct-Q4_K_M.gguf".to_string()
}

fn default_dir() -> PathBuf {
    PathBuf::from("models")
}

fn default_revision() -> String {
    "main".to_string()
}

fn default_endpoint() -> String {
    "https://huggingface.co".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ModelConfig {
    /// Hugging Face Hub repository holding the model.
    #[serde(default = "default_repo_id")]
    pub repo_id: String,

    /// Model file inside the repository.
    #[serde(default = "default_filename")]
    pub filename: String,

    /// Local directory the model is cached in, relative to the working directory.
    #[serde(default = "default_dir")]
    pub dir: PathBuf,

    /// Repository revision (branch, tag or commit) to download from.
    #[serde(default = "default_revision")]
    pub revision: String,

    /// Hub base URL.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Access token for gated repositories. Empty means anonymous.
    #[serde(default)]
    pub token: String,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            repo_id: default_repo_id(),
            filename: default_filename(),
            dir: default_dir(),
            revision: default_revision(),
            endpoint: default_endpoint(),
            token: String::new(),
        }
    }
}

impl ModelConfig {
    /// The artifact this configuration points at.
    #[must_use]
    pub fn artifact_spec(&self) -> ArtifactSpec {
        ArtifactSpec::new(&self.repo_id, &self.filename, &self.dir)
    }

    #[must_use]
    pub fn token(&self) -> Option<&str> {
        (!self.token.is_empty()).then_some(self.token.as_str())
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        match self.repo_id.split_once('/') {
            Some((owner, name)) if !owner.is_empty() && !name.is_empty() => {}
            _ => {
                return Err(ConfigError::invalid(
                    "model.repo_id",
                    format!("expected '<owner>/<name>', got '{}'", self.repo_id),
                ));
            }
        }
        if self.filename.trim().is_empty() {
            return Err(ConfigError::invalid("model.filename", "must not be empty"));
        }
        if !self.endpoint.starts_with("http://") && !self.endpoint.starts_with("https://") {
            return Err(ConfigError::invalid(
                "model.endpoint",
                format!("expected an http(s) URL, got '{}'", self.endpoint),
            ));
        }
        Ok(())
    }
}
