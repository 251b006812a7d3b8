//! # rota-model
//!
//! Everything between "a model name in the config" and "an engine that can
//! answer shift questions":
//!
//! - [`ArtifactProvisioner`] / [`HubProvisioner`]: make sure the model file is
//!   on local disk, downloading it from the Hugging Face Hub when absent.
//! - [`EngineLoader`] / [`AnalysisEngine`]: the seam between the server and
//!   whatever turns a roster file plus a date and shift into [`ShiftResults`].
//! - [`RosterLoader`] / [`RosterAnalyzer`]: the engine shipped with Rota. It
//!   validates the GGUF artifact header and reads CSV rosters.
//!
//! ## Blocking
//!
//! All three traits are synchronous: downloads, model loads and roster reads
//! block their own thread. From async code, run them on
//! [`tokio::task::spawn_blocking`](https://docs.rs/tokio/latest/tokio/task/fn.spawn_blocking.html).
//!
//! [`ShiftResults`]: rota_core::ShiftResults

pub mod engine;
pub mod error;
pub mod gguf;
pub mod provision;
pub mod roster;

pub use engine::{AnalysisEngine, EngineLoader};
pub use error::{AnalysisError, LoadError, ProvisionError};
pub use gguf::GgufHeader;
pub use provision::{ArtifactProvisioner, HubProvisioner};
pub use roster::{RosterAnalyzer, RosterLoader};
