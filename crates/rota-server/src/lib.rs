//! # rota-server
//!
//! The web front end of Rota and the deferred-initialization protocol behind it.
//!
//! ```text
//! browser ──GET /──────────────▶ loading view (not ready)
//!         ──GET /start-setup───▶ Initializer::start ──spawn_blocking──▶ provision → load → gate.mark_ready
//!         ──GET /check-status──▶ {"ready": false} … {"ready": true}
//!         ──POST /analyze──────▶ save upload → engine.shift_results → results view
//! ```
//!
//! - [`ReadinessGate`]: the readiness state and, once ready, the engine.
//! - [`Initializer`]: the one-shot background setup task.
//! - [`App`]: routing over plain [`Incoming`] / [`Reply`] values.
//! - [`HttpServer`]: the `tiny_http` listener feeding [`App`].

pub mod error;
pub mod gate;
pub mod http;
pub mod initializer;
pub mod router;
pub mod upload;
pub mod views;

pub use error::{AnalyzeError, ServerError};
pub use gate::ReadinessGate;
pub use http::HttpServer;
pub use initializer::Initializer;
pub use router::{App, Incoming, NO_FILE_SELECTED, Reply};
