//! Background initializer: provision the model artifact, load the engine,
//! publish it through the [`ReadinessGate`].
//!
//! Runs at most once per process on the tokio blocking pool. A failed
//! download is logged and the load is attempted anyway; a failed load is
//! logged and ends the task, leaving the gate in `Initializing` with no retry.

use std::sync::{Arc, Mutex, PoisonError};

use rota_core::ArtifactSpec;
use rota_model::{ArtifactProvisioner, EngineLoader};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use crate::gate::ReadinessGate;

pub struct Initializer {
    gate: Arc<ReadinessGate>,
    provisioner: Arc<dyn ArtifactProvisioner>,
    loader: Arc<dyn EngineLoader>,
    artifact: ArtifactSpec,
    runtime: Handle,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl Initializer {
    pub fn new(
        gate: Arc<ReadinessGate>,
        provisioner: Arc<dyn ArtifactProvisioner>,
        loader: Arc<dyn EngineLoader>,
        artifact: ArtifactSpec,
        runtime: Handle,
    ) -> Self {
        Self {
            gate,
            provisioner,
            loader,
            artifact,
            runtime,
            task: Mutex::new(None),
        }
    }

    #[must_use]
    pub fn gate(&self) -> &Arc<ReadinessGate> {
        &self.gate
    }

    /// Launch the background setup unless it was already requested.
    ///
    /// Returns `true` if this call launched it. Never blocks.
    pub fn start(&self) -> bool {
        if !self.gate.try_begin_setup() {
            tracing::debug!(state = %self.gate.state(), "setup already requested");
            return false;
        }

        let job = SetupJob {
            gate: Arc::clone(&self.gate),
            provisioner: Arc::clone(&self.provisioner),
            loader: Arc::clone(&self.loader),
            artifact: self.artifact.clone(),
        };
        tracing::info!(repo_id = %self.artifact.repo_id, filename = %self.artifact.filename, "starting model setup");
        let handle = self.runtime.spawn_blocking(move || job.run());
        *self.task.lock().unwrap_or_else(PoisonError::into_inner) = Some(handle);
        true
    }

    /// Whether the background task has been launched and has not finished.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.task
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Take the join handle of the background task, if one was launched.
    pub fn take_handle(&self) -> Option<JoinHandle<()>> {
        self.task
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
    }
}

struct SetupJob {
    gate: Arc<ReadinessGate>,
    provisioner: Arc<dyn ArtifactProvisioner>,
    loader: Arc<dyn EngineLoader>,
    artifact: ArtifactSpec,
}

impl SetupJob {
    fn run(self) {
        let path = match self.provisioner.ensure_local_artifact(&self.artifact) {
            Ok(path) => path,
            Err(error) => {
                tracing::warn!(%error, "model download failed; attempting to load anyway");
                self.artifact.local_path()
            }
        };

        tracing::info!(path = %path.display(), "loading model");
        match self.loader.load(&path) {
            Ok(engine) => {
                self.gate.mark_ready(engine);
                tracing::info!("system ready");
            }
            Err(error) => {
                tracing::error!(%error, path = %path.display(), "model load failed; setup will not be retried");
            }
        }
    }
}
