use anyhow::Context;
use rota_config::RotaConfig;
use rota_model::{ArtifactProvisioner, GgufHeader, HubProvisioner};
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::output::output;
use crate::progress::Progress;

#[derive(Serialize)]
struct FetchModelResponse {
    repo_id: String,
    filename: String,
    path: String,
    gguf_version: u32,
    tensor_count: u64,
    metadata_kv_count: u64,
}

/// Download the configured artifact in the foreground and report what landed.
pub async fn handle(config: &RotaConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let spec = config.model.artifact_spec();
    let provisioner = HubProvisioner::from_config(&config.model);
    let progress = Progress::spinner(&format!("fetching {}", spec.filename), flags);

    let task_spec = spec.clone();
    let fetched = tokio::task::spawn_blocking(move || provisioner.ensure_local_artifact(&task_spec))
        .await
        .context("download task failed")?;
    let path = match fetched {
        Ok(path) => {
            progress.finish_ok(&format!("{} ready", spec.filename));
            path
        }
        Err(error) => {
            progress.finish_err("download failed");
            return Err(anyhow::Error::new(error)
                .context(format!("failed to fetch {}/{}", spec.repo_id, spec.filename)));
        }
    };

    let header = GgufHeader::read_path(&path)
        .with_context(|| format!("downloaded file {} is not a usable model", path.display()))?;

    output(
        &FetchModelResponse {
            repo_id: spec.repo_id,
            filename: spec.filename,
            path: path.display().to_string(),
            gguf_version: header.version,
            tensor_count: header.tensor_count,
            metadata_kv_count: header.metadata_kv_count,
        },
        flags.format,
    )
}
