//! Stub collaborators and request builders shared by the server tests.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use rota_core::{ArtifactSpec, Assignment, ShiftResults};
use rota_model::{
    AnalysisEngine, AnalysisError, ArtifactProvisioner, EngineLoader, LoadError, ProvisionError,
};
use rota_server::{App, Initializer, ReadinessGate};

pub const BOUNDARY: &str = "rota-test-boundary";

#[derive(Default)]
pub struct StubProvisioner {
    pub calls: AtomicUsize,
    pub fail: bool,
}

impl ArtifactProvisioner for StubProvisioner {
    fn ensure_local_artifact(&self, spec: &ArtifactSpec) -> Result<PathBuf, ProvisionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(ProvisionError::Status {
                status: 503,
                url: format!("http://hub.invalid/{}", spec.repo_id),
            });
        }
        Ok(spec.local_path())
    }
}

pub struct StubLoader {
    pub calls: AtomicUsize,
    pub loaded_from: Mutex<Vec<PathBuf>>,
    engine: Option<Arc<RecordingEngine>>,
}

impl EngineLoader for StubLoader {
    fn load(&self, artifact: &Path) -> Result<Arc<dyn AnalysisEngine>, LoadError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.loaded_from.lock().unwrap().push(artifact.to_path_buf());
        match &self.engine {
            Some(engine) => {
                let engine: Arc<dyn AnalysisEngine> = engine.clone();
                Ok(engine)
            }
            None => Err(LoadError::Missing(artifact.to_path_buf())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineCall {
    pub roster: PathBuf,
    pub date: String,
    pub shift: String,
}

#[derive(Default)]
pub struct RecordingEngine {
    pub calls: Mutex<Vec<EngineCall>>,
    pub failure: Option<String>,
}

impl AnalysisEngine for RecordingEngine {
    fn shift_results(
        &self,
        roster: &Path,
        date: &str,
        shift: &str,
    ) -> Result<ShiftResults, AnalysisError> {
        self.calls.lock().unwrap().push(EngineCall {
            roster: roster.to_path_buf(),
            date: date.to_string(),
            shift: shift.to_string(),
        });
        if let Some(message) = &self.failure {
            return Err(AnalysisError::Other(message.clone()));
        }
        Ok(ShiftResults::new(
            date,
            shift,
            vec![Assignment {
                name: "Ana Lima".into(),
                date: date.to_string(),
                shift: shift.to_string(),
                role: Some("Nurse".into()),
            }],
        ))
    }
}

pub struct Setup {
    pub provision_fails: bool,
    pub load_fails: bool,
    pub engine_failure: Option<&'static str>,
    pub max_upload_bytes: u64,
}

impl Default for Setup {
    fn default() -> Self {
        Self {
            provision_fails: false,
            load_fails: false,
            engine_failure: None,
            max_upload_bytes: 1024 * 1024,
        }
    }
}

pub struct Harness {
    pub app: Arc<App>,
    pub provisioner: Arc<StubProvisioner>,
    pub loader: Arc<StubLoader>,
    pub engine: Arc<RecordingEngine>,
    pub artifact: ArtifactSpec,
    pub uploads_dir: PathBuf,
    _dir: tempfile::TempDir,
}

impl Harness {
    /// Build an app around stubs. Must run inside a tokio runtime.
    pub fn new(setup: Setup) -> Self {
        let dir = tempfile::tempdir().expect("tempdir");
        let artifact = ArtifactSpec::new("acme/roster-GGUF", "roster.gguf", dir.path().join("models"));
        let uploads_dir = dir.path().join("uploads");

        let provisioner = Arc::new(StubProvisioner {
            calls: AtomicUsize::new(0),
            fail: setup.provision_fails,
        });
        let engine = Arc::new(RecordingEngine {
            calls: Mutex::new(Vec::new()),
            failure: setup.engine_failure.map(str::to_string),
        });
        let loader = Arc::new(StubLoader {
            calls: AtomicUsize::new(0),
            loaded_from: Mutex::new(Vec::new()),
            engine: (!setup.load_fails).then(|| Arc::clone(&engine)),
        });

        let dyn_provisioner: Arc<dyn ArtifactProvisioner> = provisioner.clone();
        let dyn_loader: Arc<dyn EngineLoader> = loader.clone();
        let initializer = Initializer::new(
            Arc::new(ReadinessGate::new()),
            dyn_provisioner,
            dyn_loader,
            artifact.clone(),
            tokio::runtime::Handle::current(),
        );
        let app = Arc::new(App::new(initializer, &uploads_dir, setup.max_upload_bytes));

        Self {
            app,
            provisioner,
            loader,
            engine,
            artifact,
            uploads_dir,
            _dir: dir,
        }
    }

    /// Wait for a launched background setup to finish.
    pub async fn finish_setup(&self) {
        if let Some(handle) = self.app.initializer().take_handle() {
            handle.await.expect("setup task should not panic");
        }
    }

    pub fn provision_calls(&self) -> usize {
        self.provisioner.calls.load(Ordering::SeqCst)
    }

    pub fn load_calls(&self) -> usize {
        self.loader.calls.load(Ordering::SeqCst)
    }

    pub fn engine_calls(&self) -> Vec<EngineCall> {
        self.engine.calls.lock().unwrap().clone()
    }

    pub fn uploaded_files(&self) -> Vec<PathBuf> {
        std::fs::read_dir(&self.uploads_dir)
            .map(|entries| entries.filter_map(|e| e.ok().map(|e| e.path())).collect())
            .unwrap_or_default()
    }
}

pub fn multipart_content_type() -> String {
    format!("multipart/form-data; boundary={BOUNDARY}")
}

/// Build an `/analyze` body. `file` is `(file name, contents)`.
pub fn analyze_body(file: Option<(&str, &[u8])>, date: Option<&str>, shift: Option<&str>) -> Vec<u8> {
    let mut body = Vec::new();
    if let Some((name, contents)) = file {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{name}\"\r\nContent-Type: text/csv\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(contents);
        body.extend_from_slice(b"\r\n");
    }
    for (field, value) in [("date", date), ("shift", shift)] {
        if let Some(value) = value {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{field}\"\r\n\r\n{value}\r\n"
                )
                .as_bytes(),
            );
        }
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}
