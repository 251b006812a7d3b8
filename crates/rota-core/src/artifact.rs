//! Model artifact identity.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A model file identified by its hub repository, file name, and the local
/// directory it is cached in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactSpec {
    /// Hub repository id, e.g. `bartowski/Llama-3.2-1B-Instruct-GGUF`.
    pub repo_id: String,
    /// File name inside the repository.
    pub filename: String,
    /// Directory the file is downloaded into.
    pub local_dir: PathBuf,
}

impl ArtifactSpec {
    #[must_use]
    pub fn new(
        repo_id: impl Into<String>,
        filename: impl Into<String>,
        local_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            repo_id: repo_id.into(),
            filename: filename.into(),
            local_dir: local_dir.into(),
        }
    }

    /// Where the artifact lives once provisioned.
    #[must_use]
    pub fn local_path(&self) -> PathBuf {
        self.local_dir.join(&self.filename)
    }

    /// Whether the artifact is already on disk.
    #[must_use]
    pub fn is_present(&self) -> bool {
        self.local_path().is_file()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_path_joins_dir_and_filename() {
        let spec = ArtifactSpec::new("org/repo", "model.gguf", "models");
        assert_eq!(spec.local_path(), PathBuf::from("models").join("model.gguf"));
    }

    #[test]
    fn presence_follows_filesystem() {
        let dir = tempfile::tempdir().unwrap();
        let spec = ArtifactSpec::new("org/repo", "model.gguf", dir.path());
        assert!(!spec.is_present());

        std::fs::write(spec.local_path(), b"GGUF").unwrap();
        assert!(spec.is_present());
    }
}
