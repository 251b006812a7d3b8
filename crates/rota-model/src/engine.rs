//! Analysis engine seam.

use std::path::Path;
use std::sync::Arc;

use rota_core::ShiftResults;

use crate::error::{AnalysisError, LoadError};

/// Turns a roster file plus a date and shift into results.
///
/// Implementations are shared across request handlers, so they take `&self`
/// and must be `Send + Sync`. Calls may block.
pub trait AnalysisEngine: Send + Sync {
    /// Analyze `roster` for the given `date` and `shift`.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError`] if the roster cannot be read or analyzed.
    fn shift_results(
        &self,
        roster: &Path,
        date: &str,
        shift: &str,
    ) -> Result<ShiftResults, AnalysisError>;
}

/// Constructs an [`AnalysisEngine`] from a local model artifact.
pub trait EngineLoader: Send + Sync {
    /// Load the engine. May block for as long as the model takes to load.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError`] if the artifact is missing or unusable.
    fn load(&self, artifact: &Path) -> Result<Arc<dyn AnalysisEngine>, LoadError>;
}
