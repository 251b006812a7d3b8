//! Request routing.
//!
//! | Path | Method | Response |
//! |---|---|---|
//! | `/` | GET | loading view or main view |
//! | `/start-setup` | GET | `Started`; launches setup on first call |
//! | `/check-status` | GET | `{"ready": bool}` |
//! | `/analyze` | POST | main view with results or an inline error |
//!
//! `HEAD` is answered like `GET` on the three `GET` routes; `tiny_http`
//! drops the body.
//!
//! [`App::handle`] works on plain [`Incoming`] values so it can be exercised
//! without a socket; [`crate::http`] adapts `tiny_http` requests to it.

use std::path::PathBuf;
use std::sync::Arc;

use rota_core::ShiftResults;
use rota_model::AnalysisEngine;
use tiny_http::Method;

use crate::error::AnalyzeError;
use crate::gate::ReadinessGate;
use crate::initializer::Initializer;
use crate::upload;
use crate::views::{self, FormView};

/// Inline error shown when the form is submitted without a file.
pub const NO_FILE_SELECTED: &str = "No file selected";

/// A request as the router sees it.
#[derive(Debug, Clone)]
pub struct Incoming {
    pub method: Method,
    /// Request target, possibly with a query string.
    pub url: String,
    pub content_type: Option<String>,
    /// At most `max_upload_bytes + 1` bytes of the body.
    pub body: Vec<u8>,
}

impl Incoming {
    #[must_use]
    pub fn get(url: &str) -> Self {
        Self {
            method: Method::Get,
            url: url.to_string(),
            content_type: None,
            body: Vec::new(),
        }
    }

    #[must_use]
    pub fn post(url: &str, content_type: &str, body: Vec<u8>) -> Self {
        Self {
            method: Method::Post,
            url: url.to_string(),
            content_type: Some(content_type.to_string()),
            body,
        }
    }

    fn path(&self) -> &str {
        self.url.split('?').next().unwrap_or_default()
    }
}

/// A response as the router produces it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub status: u16,
    pub content_type: &'static str,
    pub body: String,
}

impl Reply {
    #[must_use]
    pub const fn html(body: String) -> Self {
        Self {
            status: 200,
            content_type: "text/html; charset=utf-8",
            body,
        }
    }

    #[must_use]
    pub fn text(status: u16, body: &str) -> Self {
        Self {
            status,
            content_type: "text/plain; charset=utf-8",
            body: body.to_string(),
        }
    }

    #[must_use]
    pub fn json(value: &serde_json::Value) -> Self {
        Self {
            status: 200,
            content_type: "application/json",
            body: value.to_string(),
        }
    }
}

pub struct App {
    gate: Arc<ReadinessGate>,
    initializer: Initializer,
    uploads_dir: PathBuf,
    max_upload_bytes: u64,
}

impl App {
    pub fn new(initializer: Initializer, uploads_dir: impl Into<PathBuf>, max_upload_bytes: u64) -> Self {
        Self {
            gate: Arc::clone(initializer.gate()),
            initializer,
            uploads_dir: uploads_dir.into(),
            max_upload_bytes,
        }
    }

    #[must_use]
    pub fn gate(&self) -> &ReadinessGate {
        &self.gate
    }

    #[must_use]
    pub const fn initializer(&self) -> &Initializer {
        &self.initializer
    }

    #[must_use]
    pub const fn max_upload_bytes(&self) -> u64 {
        self.max_upload_bytes
    }

    pub async fn handle(&self, incoming: Incoming) -> Reply {
        let path = incoming.path().to_owned();
        let method = incoming.method.clone();
        match (path.as_str(), &method) {
            ("/", Method::Get | Method::Head) => self.index(),
            ("/start-setup", Method::Get | Method::Head) => self.start_setup(),
            ("/check-status", Method::Get | Method::Head) => self.check_status(),
            ("/analyze", Method::Post) => self.analyze(incoming).await,
            ("/" | "/start-setup" | "/check-status" | "/analyze", _) => {
                Reply::text(405, "Method Not Allowed")
            }
            _ => Reply::text(404, "Not Found"),
        }
    }

    fn index(&self) -> Reply {
        if self.gate.is_ready() {
            Reply::html(views::main_page(FormView::default()))
        } else {
            Reply::html(views::loading_page())
        }
    }

    fn start_setup(&self) -> Reply {
        self.initializer.start();
        Reply::text(200, "Started")
    }

    fn check_status(&self) -> Reply {
        Reply::json(&serde_json::json!({ "ready": self.gate.is_ready() }))
    }

    async fn analyze(&self, incoming: Incoming) -> Reply {
        let Some(engine) = self.gate.engine() else {
            return Reply::html(views::loading_page());
        };

        match self.run_analysis(engine, incoming).await {
            Ok(Some(results)) => Reply::html(views::main_page(FormView::with_results(&results))),
            Ok(None) => Reply::html(views::main_page(FormView::with_error(NO_FILE_SELECTED))),
            Err(error) => {
                tracing::warn!(%error, "analysis request failed");
                let message = error.to_string();
                Reply::html(views::main_page(FormView::with_error(&message)))
            }
        }
    }

    /// `Ok(None)` when no usable file was attached; nothing is written then.
    async fn run_analysis(
        &self,
        engine: Arc<dyn AnalysisEngine>,
        incoming: Incoming,
    ) -> Result<Option<ShiftResults>, AnalyzeError> {
        if incoming.body.len() as u64 > self.max_upload_bytes {
            return Err(AnalyzeError::TooLarge {
                limit: self.max_upload_bytes,
            });
        }

        let form = upload::parse_form(incoming.content_type.as_deref(), incoming.body).await?;
        let date = form.date.ok_or(AnalyzeError::MissingField("date"))?;
        let shift = form.shift.ok_or(AnalyzeError::MissingField("shift"))?;
        let Some(file) = form.file else {
            return Ok(None);
        };
        let Some(file_name) = upload::stored_file_name(&file.file_name) else {
            return Ok(None);
        };

        let path = upload::persist(&self.uploads_dir, file_name, &file.contents).await?;
        tracing::info!(path = %path.display(), %date, %shift, "analyzing roster");
        let results =
            tokio::task::spawn_blocking(move || engine.shift_results(&path, &date, &shift))
                .await??;
        Ok(Some(results))
    }
}
