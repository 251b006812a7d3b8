//! Built-in roster engine.
//!
//! Rosters are CSV files with a header row. Recognized columns (header match
//! is case-insensitive):
//!
//! | column | aliases | required |
//! |---|---|---|
//! | `name` | `staff`, `employee` | yes |
//! | `date` | | yes |
//! | `shift` | | yes |
//! | `role` | `position` | no |
//!
//! Dates compare as calendar days when both sides parse with one of
//! [`DATE_FORMATS`], otherwise as trimmed, case-insensitive text.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::NaiveDate;
use rota_core::{Assignment, ShiftResults};

use crate::engine::{AnalysisEngine, EngineLoader};
use crate::error::{AnalysisError, LoadError};
use crate::gguf::GgufHeader;

/// Date layouts accepted in rosters and requests, tried in order.
pub const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%Y/%m/%d", "%d/%m/%Y", "%d.%m.%Y"];

const NAME_COLUMNS: &[&str] = &["name", "staff", "employee"];
const DATE_COLUMNS: &[&str] = &["date"];
const SHIFT_COLUMNS: &[&str] = &["shift"];
const ROLE_COLUMNS: &[&str] = &["role", "position"];

/// Loads a [`RosterAnalyzer`] after validating the model artifact header.
#[derive(Debug, Clone, Copy, Default)]
pub struct RosterLoader;

impl EngineLoader for RosterLoader {
    fn load(&self, artifact: &Path) -> Result<Arc<dyn AnalysisEngine>, LoadError> {
        let header = GgufHeader::read_path(artifact)?;
        tracing::info!(
            path = %artifact.display(),
            version = header.version,
            tensors = header.tensor_count,
            metadata = header.metadata_kv_count,
            "model artifact loaded"
        );
        Ok(Arc::new(RosterAnalyzer::new(artifact, header)))
    }
}

/// Answers shift questions from CSV rosters.
#[derive(Debug, Clone)]
pub struct RosterAnalyzer {
    artifact: PathBuf,
    header: GgufHeader,
}

impl RosterAnalyzer {
    #[must_use]
    pub fn new(artifact: impl Into<PathBuf>, header: GgufHeader) -> Self {
        Self {
            artifact: artifact.into(),
            header,
        }
    }

    /// Model artifact this engine was loaded from.
    #[must_use]
    pub fn artifact(&self) -> &Path {
        &self.artifact
    }

    #[must_use]
    pub const fn header(&self) -> GgufHeader {
        self.header
    }
}

impl AnalysisEngine for RosterAnalyzer {
    fn shift_results(
        &self,
        roster: &Path,
        date: &str,
        shift: &str,
    ) -> Result<ShiftResults, AnalysisError> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_path(roster)?;
        let columns = Columns::locate(reader.headers()?)?;

        let wanted_shift = shift.trim();
        let mut assignments = Vec::new();
        for record in reader.records() {
            let record = record?;
            let name = record.get(columns.name).unwrap_or_default();
            if name.is_empty() {
                continue;
            }
            let row_date = record.get(columns.date).unwrap_or_default();
            let row_shift = record.get(columns.shift).unwrap_or_default();
            if !row_shift.eq_ignore_ascii_case(wanted_shift) || !same_day(row_date, date) {
                continue;
            }

            let role = columns
                .role
                .and_then(|i| record.get(i))
                .filter(|role| !role.is_empty())
                .map(str::to_string);
            assignments.push(Assignment {
                name: name.to_string(),
                date: row_date.to_string(),
                shift: row_shift.to_string(),
                role,
            });
        }

        tracing::debug!(
            roster = %roster.display(),
            model = %self.artifact().display(),
            gguf_version = self.header().version,
            date,
            shift,
            matches = assignments.len(),
            "roster analyzed"
        );
        Ok(ShiftResults::new(date, shift, assignments))
    }
}

/// Column indices in one roster file.
#[derive(Debug, PartialEq, Eq)]
struct Columns {
    name: usize,
    date: usize,
    shift: usize,
    role: Option<usize>,
}

impl Columns {
    fn locate(headers: &csv::StringRecord) -> Result<Self, AnalysisError> {
        let find = |candidates: &[&str]| {
            headers
                .iter()
                .position(|h| candidates.iter().any(|c| h.eq_ignore_ascii_case(c)))
        };

        Ok(Self {
            name: find(NAME_COLUMNS).ok_or(AnalysisError::MissingColumn("name"))?,
            date: find(DATE_COLUMNS).ok_or(AnalysisError::MissingColumn("date"))?,
            shift: find(SHIFT_COLUMNS).ok_or(AnalysisError::MissingColumn("shift"))?,
            role: find(ROLE_COLUMNS),
        })
    }
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(value, format).ok())
}

fn same_day(a: &str, b: &str) -> bool {
    match (parse_date(a), parse_date(b)) {
        (Some(a), Some(b)) => a == b,
        _ => a.trim().eq_ignore_ascii_case(b.trim()),
    }
}
