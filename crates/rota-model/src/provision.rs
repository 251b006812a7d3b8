//! Model artifact provisioning.
//!
//! [`HubProvisioner`] resolves files through the Hugging Face Hub
//! `resolve` endpoint:
//!
//! ```text
//! {endpoint}/{repo_id}/resolve/{revision}/{filename}
//! ```
//!
//! Downloads stream into `<filename>.part` next to the destination and are
//! renamed into place once complete, so an interrupted download never passes
//! the presence check.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use rota_config::ModelConfig;
use rota_core::ArtifactSpec;

use crate::error::ProvisionError;

const USER_AGENT: &str = concat!("rota/", env!("CARGO_PKG_VERSION"));

/// Makes sure a model artifact is present on local disk.
pub trait ArtifactProvisioner: Send + Sync {
    /// Return the local path of `spec`, fetching it first if it is absent.
    ///
    /// # Errors
    ///
    /// Returns [`ProvisionError`] if the fetch or the local write fails.
    fn ensure_local_artifact(&self, spec: &ArtifactSpec) -> Result<PathBuf, ProvisionError>;
}

/// Fetches artifacts from a Hugging Face Hub compatible endpoint.
#[derive(Debug, Clone)]
pub struct HubProvisioner {
    endpoint: String,
    revision: String,
    token: Option<String>,
}

impl HubProvisioner {
    #[must_use]
    pub fn new(endpoint: impl Into<String>, revision: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            revision: revision.into(),
            token: None,
        }
    }

    #[must_use]
    pub fn from_config(config: &ModelConfig) -> Self {
        let provisioner = Self::new(&config.endpoint, &config.revision);
        match config.token() {
            Some(token) => provisioner.with_token(token),
            None => provisioner,
        }
    }

    /// Send `Authorization: Bearer <token>` with downloads.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Download URL for `spec`. Path segments are percent-encoded individually
    /// so the `/` in repository ids and nested file names survives.
    #[must_use]
    pub fn download_url(&self, spec: &ArtifactSpec) -> String {
        format!(
            "{}/{}/resolve/{}/{}",
            self.endpoint,
            encode_segments(&spec.repo_id),
            urlencoding::encode(&self.revision),
            encode_segments(&spec.filename)
        )
    }

    /// Stream `url` into `dest` via a `.part` file. Returns the byte count.
    fn download(&self, url: &str, dest: &Path) -> Result<u64, ProvisionError> {
        // No overall deadline: model files take minutes to arrive.
        let client = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(None::<std::time::Duration>)
            .build()?;

        let mut request = client.get(url);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        let mut response = request.send()?;
        if !response.status().is_success() {
            return Err(ProvisionError::Status {
                status: response.status().as_u16(),
                url: url.to_string(),
            });
        }

        let part = part_path(dest);
        let written = write_part(&mut response, &part).inspect_err(|_| {
            let _ = fs::remove_file(&part);
        })?;
        fs::rename(&part, dest).map_err(|source| ProvisionError::Io {
            path: dest.to_path_buf(),
            source,
        })?;
        Ok(written)
    }
}

impl ArtifactProvisioner for HubProvisioner {
    fn ensure_local_artifact(&self, spec: &ArtifactSpec) -> Result<PathBuf, ProvisionError> {
        let path = spec.local_path();
        if path.is_file() {
            tracing::debug!(path = %path.display(), "model artifact already present");
            return Ok(path);
        }

        let parent = path.parent().unwrap_or(&spec.local_dir);
        fs::create_dir_all(parent).map_err(|source| ProvisionError::Io {
            path: parent.to_path_buf(),
            source,
        })?;

        let url = self.download_url(spec);
        tracing::info!(repo_id = %spec.repo_id, filename = %spec.filename, %url, "downloading model artifact");
        let bytes = self.download(&url, &path)?;
        tracing::info!(bytes, path = %path.display(), "model artifact downloaded");
        Ok(path)
    }
}

fn write_part(response: &mut reqwest::blocking::Response, part: &Path) -> Result<u64, ProvisionError> {
    let io_error = |source| ProvisionError::Io {
        path: part.to_path_buf(),
        source,
    };
    let mut file = File::create(part).map_err(io_error)?;
    let written = response.copy_to(&mut file)?;
    file.flush().map_err(io_error)?;
    file.sync_all().map_err(io_error)?;
    Ok(written)
}

fn part_path(dest: &Path) -> PathBuf {
    let mut name = dest.file_name().unwrap_or_default().to_os_string();
    name.push(".part");
    dest.with_file_name(name)
}

fn encode_segments(path: &str) -> String {
    path.split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn download_url_follows_resolve_layout() {
        let provisioner = HubProvisioner::new("https://huggingface.co/", "main");
        let spec = ArtifactSpec::new(
            "bartowski/Llama-3.2-1B-Instruct-GGUF",
            "Llama-3.2-1B-Instruct-Q4_K_M.gguf",
            "models",
        );
        assert_eq!(
            provisioner.download_url(&spec),
            "https://huggingface.co/bartowski/Llama-3.2-1B-Instruct-GGUF/resolve/main/Llama-3.2-1B-Instruct-Q4_K_M.gguf"
        );
    }

    #[test]
    fn download_url_encodes_each_segment() {
        let provisioner = HubProvisioner::new("http://mirror.local", "v1.0");
        let spec = ArtifactSpec::new("org/my model", "q4/model file.gguf", "models");
        assert_eq!(
            provisioner.download_url(&spec),
            "http://mirror.local/org/my%20model/resolve/v1.0/q4/model%20file.gguf"
        );
    }

    #[test]
    fn part_path_appends_suffix() {
        assert_eq!(
            part_path(Path::new("models/model.gguf")),
            PathBuf::from("models/model.gguf.part")
        );
    }

    #[test]
    fn present_artifact_skips_network() {
        let dir = tempfile::tempdir().unwrap();
        let spec = ArtifactSpec::new("org/repo", "model.gguf", dir.path());
        std::fs::write(spec.local_path(), b"GGUF").unwrap();

        // Port 9 (discard) on loopback: any request would fail.
        let provisioner = HubProvisioner::new("http://127.0.0.1:9", "main");
        let path = provisioner.ensure_local_artifact(&spec).unwrap();
        assert_eq!(path, spec.local_path());
    }

    #[test]
    fn from_config_carries_token() {
        let config = ModelConfig {
            token: "hf_abc".into(),
            ..Default::default()
        };
        let provisioner = HubProvisioner::from_config(&config);
        assert_eq!(provisioner.token.as_deref(), Some("hf_abc"));
        assert_eq!(provisioner.endpoint, "https://huggingface.co");
    }
}
