use anyhow::Context;
use rota_config::RotaConfig;
use rota_core::ShiftResults;
use rota_model::{EngineLoader, RosterLoader};

use crate::cli::{AnalyzeArgs, GlobalFlags};
use crate::output::output;

/// Load the engine from the local artifact and answer one roster question.
///
/// Never downloads; `rota fetch-model` does that.
pub async fn handle(args: AnalyzeArgs, config: &RotaConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let artifact = config.model.artifact_spec();
    if !artifact.is_present() {
        anyhow::bail!(
            "model artifact {} is missing; run `rota fetch-model` first",
            artifact.local_path().display()
        );
    }

    let AnalyzeArgs { file, date, shift } = args;
    let results = tokio::task::spawn_blocking(move || -> anyhow::Result<ShiftResults> {
        let path = artifact.local_path();
        let engine = RosterLoader
            .load(&path)
            .with_context(|| format!("failed to load model from {}", path.display()))?;
        engine
            .shift_results(&file, &date, &shift)
            .with_context(|| format!("failed to analyze {}", file.display()))
    })
    .await
    .context("analysis task failed")??;

    output(&results, flags.format)
}
