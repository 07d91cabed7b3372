use serde::{Deserialize, Serialize};

/// A detected architectural smell, implicating one or more nodes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoherenceIssue {
    pub kind: IssueKind,
    pub severity: Severity,
    pub nodes: Vec<String>,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    CircularDependency,
    UnusedExport,
    OrphanedFile,
    GodObject,
    // Reserved for host-side detectors; never populated by the base analysis.
    UnusedImport,
    MissingType,
    AnyType,
    HighCoupling,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    /// Coherence-score penalty per issue.
    pub fn penalty(&self) -> u32 {
        match self {
            Severity::Critical => 15,
            Severity::High => 10,
            Severity::Medium => 5,
            Severity::Low => 2,
            Severity::Info => 1,
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Severity::Info => "info",
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
            Severity::Critical => "critical",
        };
        write!(f, "{}", s)
    }
}

impl std::str::FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "info" => Ok(Severity::Info),
            "low" => Ok(Severity::Low),
            "medium" => Ok(Severity::Medium),
            "high" => Ok(Severity::High),
            "critical" => Ok(Severity::Critical),
            _ => Err(format!("Unknown severity: {}", s)),
        }
    }
}

impl CoherenceIssue {
    pub fn circular_dependency(cycle: Vec<String>, display: Vec<&str>) -> Self {
        Self {
            kind: IssueKind::CircularDependency,
            severity: Severity::High,
            message: format!("Circular dependency: {}", display.join(" -> ")),
            nodes: cycle,
            suggestion: Some(
                "Break the cycle by extracting shared types into a separate module".to_string(),
            ),
        }
    }

    pub fn unused_export(node: String, symbol: &str, path: &str) -> Self {
        Self {
            kind: IssueKind::UnusedExport,
            severity: Severity::Low,
            nodes: vec![node],
            message: format!("'{}' is exported from {} but never imported", symbol, path),
            suggestion: Some(format!("Remove the export of '{}' or delete the symbol", symbol)),
        }
    }

    pub fn orphaned_file(node: String, path: &str) -> Self {
        Self {
            kind: IssueKind::OrphanedFile,
            severity: Severity::Medium,
            nodes: vec![node],
            message: format!("{} has no imports and no importers", path),
            suggestion: Some("Delete the file or wire it into the project".to_string()),
        }
    }

    pub fn god_object(node: String, path: &str, degree: usize) -> Self {
        Self {
            kind: IssueKind::GodObject,
            severity: Severity::Medium,
            nodes: vec![node],
            message: format!("{} is connected to {} other files", path, degree),
            suggestion: Some("Split responsibilities into smaller, focused modules".to_string()),
        }
    }
}

/// Reduce an issue list to a single 0–100 health score.
pub fn coherence_score(issues: &[CoherenceIssue]) -> u32 {
    let total: u32 = issues.iter().map(|i| i.severity.penalty()).sum();
    100u32.saturating_sub(total)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issue(severity: Severity) -> CoherenceIssue {
        CoherenceIssue {
            kind: IssueKind::GodObject,
            severity,
            nodes: vec![],
            message: String::new(),
            suggestion: None,
        }
    }

    #[test]
    fn score_starts_at_100() {
        assert_eq!(coherence_score(&[]), 100);
    }

    #[test]
    fn score_subtracts_fixed_penalties() {
        let issues = vec![issue(Severity::High), issue(Severity::Low)];
        assert_eq!(coherence_score(&issues), 88);
    }

    #[test]
    fn score_clamps_to_zero() {
        let issues: Vec<_> = (0..20).map(|_| issue(Severity::Critical)).collect();
        assert_eq!(coherence_score(&issues), 0);
    }

    #[test]
    fn score_is_monotonically_non_increasing() {
        let mut issues = Vec::new();
        let mut last = coherence_score(&issues);
        for severity in [Severity::Info, Severity::Low, Severity::Medium, Severity::High] {
            issues.push(issue(severity));
            let next = coherence_score(&issues);
            assert!(next <= last);
            last = next;
        }
    }
}
