//! Shift analysis results.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Role label used when a roster row names no role.
pub const UNASSIGNED_ROLE: &str = "unassigned";

/// One person rostered on the requested shift.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    pub name: String,
    pub date: String,
    pub shift: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

/// Headcount for one role on the requested shift.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleCount {
    pub role: String,
    pub count: usize,
}

/// Everything an analysis engine reports for a single date and shift.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftResults {
    /// The date as requested by the user.
    pub date: String,
    /// The shift as requested by the user.
    pub shift: String,
    pub assignments: Vec<Assignment>,
    /// Per-role headcount, sorted by role name.
    pub roles: Vec<RoleCount>,
}

impl ShiftResults {
    /// Build results from matching assignments, deriving the role summary.
    #[must_use]
    pub fn new(date: impl Into<String>, shift: impl Into<String>, assignments: Vec<Assignment>) -> Self {
        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for assignment in &assignments {
            let role = assignment.role.as_deref().unwrap_or(UNASSIGNED_ROLE);
            *counts.entry(role).or_default() += 1;
        }
        let roles = counts
            .into_iter()
            .map(|(role, count)| RoleCount {
                role: role.to_string(),
                count,
            })
            .collect();

        Self {
            date: date.into(),
            shift: shift.into(),
            assignments,
            roles,
        }
    }

    /// Number of people on the shift.
    #[must_use]
    pub fn headcount(&self) -> usize {
        self.assignments.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn assignment(name: &str, role: Option<&str>) -> Assignment {
        Assignment {
            name: name.to_string(),
            date: "2024-01-01".to_string(),
            shift: "morning".to_string(),
            role: role.map(str::to_string),
        }
    }

    #[test]
    fn role_summary_is_sorted_and_counts_unassigned() {
        let results = ShiftResults::new(
            "2024-01-01",
            "morning",
            vec![
                assignment("Ana", Some("nurse")),
                assignment("Ben", None),
                assignment("Cy", Some("doctor")),
                assignment("Di", Some("nurse")),
            ],
        );

        assert_eq!(
            results.roles,
            vec![
                RoleCount { role: "doctor".into(), count: 1 },
                RoleCount { role: "nurse".into(), count: 2 },
                RoleCount { role: UNASSIGNED_ROLE.into(), count: 1 },
            ]
        );
        assert_eq!(results.headcount(), 4);
    }

    #[test]
    fn empty_results() {
        let results = ShiftResults::new("2024-01-01", "night", Vec::new());
        assert!(results.is_empty());
        assert!(results.roles.is_empty());
    }

    #[test]
    fn role_omitted_from_json_when_absent() {
        let json = serde_json::to_value(assignment("Ben", None)).unwrap();
        assert!(json.get("role").is_none());
        assert_eq!(json["name"], "Ben");
    }
}
