//! # rota-core
//!
//! Core types shared across the Rota crates:
//! - [`ReadinessState`], the process-wide setup lifecycle
//! - [`ArtifactSpec`], the identity and local location of the model artifact
//! - [`ShiftResults`], what an analysis engine returns for one date/shift

pub mod artifact;
pub mod readiness;
pub mod results;

pub use artifact::ArtifactSpec;
pub use readiness::ReadinessState;
pub use results::{Assignment, RoleCount, ShiftResults};
