use crate::model::patch::CodePatch;
use serde::{Deserialize, Serialize};

/// A proposed mutation of one node. The meaning of `symbol`, `before`, and
/// `after` depends on the change kind:
///
/// - `rename`: `before` = old name, `after` = new name
/// - `add_field`: `symbol` = field name, `after` = field type
/// - `remove_field`: `symbol` = field name
/// - `change_type`: `symbol` = field name, `before`/`after` = old/new type
/// - `delete`: `symbol` = deleted symbol (defaults to the node's name)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeChange {
    pub node_id: String,
    pub kind: ChangeKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<String>,
}

impl NodeChange {
    pub fn rename(node_id: impl Into<String>, before: impl Into<String>, after: impl Into<String>) -> Self {
        Self {
            node_id: node_id.into(),
            kind: ChangeKind::Rename,
            symbol: None,
            before: Some(before.into()),
            after: Some(after.into()),
        }
    }

    pub fn delete(node_id: impl Into<String>, symbol: impl Into<String>) -> Self {
        Self {
            node_id: node_id.into(),
            kind: ChangeKind::Delete,
            symbol: Some(symbol.into()),
            before: None,
            after: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    Rename,
    AddField,
    RemoveField,
    ChangeType,
    Delete,
    Move,
    AddParam,
    RemoveParam,
}

/// Predicted blast radius of one `NodeChange`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImpactAnalysis {
    pub change: NodeChange,
    /// First-level dependents, each evaluated with a change-kind rule.
    pub direct: Vec<ImpactedFile>,
    /// Second-level dependents, deduplicated against everything already
    /// visited and marked generically; never run through the breaking-change
    /// detectors.
    pub transitive: Vec<ImpactedFile>,
    pub breaking_changes: Vec<BreakingChange>,
    pub suggested_fixes: Vec<SuggestedFix>,
    pub risk: RiskLevel,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImpactedFile {
    pub node_id: String,
    pub path: String,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BreakingChange {
    pub path: String,
    /// 1-based source line.
    pub line: usize,
    pub reason: String,
}

/// A drafted line-level fix. Auto-fixable fixes carry a concrete replacement
/// and convert directly into a `CodePatch`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestedFix {
    pub path: String,
    pub line: usize,
    /// Full text currently on the line, indentation included, so a patch
    /// built from this fix can be inverted without losing bytes.
    pub current: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replacement: Option<String>,
    pub description: String,
    pub auto_fixable: bool,
}

impl SuggestedFix {
    pub fn into_patch(self) -> Option<CodePatch> {
        let replacement = self.replacement?;
        Some(CodePatch::new(
            self.path,
            self.line,
            self.current,
            replacement,
            self.description,
            self.auto_fixable,
        ))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
            RiskLevel::Critical => "critical",
        };
        write!(f, "{}", s)
    }
}
