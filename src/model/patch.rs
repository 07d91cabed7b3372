use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One expected-old-text → new-text replacement at a single file/line.
/// An empty replacement deletes the line. `applied`/`error` are the only
/// fields mutated by the patch engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CodePatch {
    pub id: String,
    /// Path relative to the workspace root.
    pub file: String,
    /// 1-based line number.
    pub line: usize,
    /// Text expected at the target line. The engine compares with both sides
    /// trimmed, but the full line is kept so an inverse patch restores the
    /// original bytes.
    pub expected: String,
    /// Full replacement line; empty means delete the line.
    pub replacement: String,
    pub description: String,
    pub auto_fixable: bool,
    pub applied: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CodePatch {
    pub fn new(
        file: impl Into<String>,
        line: usize,
        expected: impl Into<String>,
        replacement: impl Into<String>,
        description: impl Into<String>,
        auto_fixable: bool,
    ) -> Self {
        Self {
            id: format!("patch-{}", Uuid::new_v4()),
            file: file.into(),
            line,
            expected: expected.into(),
            replacement: replacement.into(),
            description: description.into(),
            auto_fixable,
            applied: false,
            error: None,
        }
    }

    /// Inverse patch: expected and replacement swapped, id derived from the
    /// original so a retried rollback stays identifiable.
    pub fn inverted(&self) -> Self {
        Self {
            id: format!("{}-rollback", self.id),
            file: self.file.clone(),
            line: self.line,
            expected: self.replacement.clone(),
            replacement: self.expected.clone(),
            description: format!("Rollback of: {}", self.description),
            auto_fixable: self.auto_fixable,
            applied: false,
            error: None,
        }
    }
}

/// Outcome of applying or rolling back a batch of patches.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PropagationResult {
    /// True only if zero patches failed across every file.
    pub success: bool,
    pub applied: Vec<CodePatch>,
    pub failed: Vec<CodePatch>,
    pub errors: Vec<String>,
    /// Files actually rewritten, including partially patched ones.
    pub modified_files: Vec<String>,
}
