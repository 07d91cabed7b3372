use serde::{Deserialize, Serialize};

/// Directed, typed relationship between two node ids. Both endpoints must be
/// existing node identities; edges to unresolved imports are never created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub source: String,
    pub target: String,
    pub kind: EdgeKind,
    pub weight: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl Edge {
    pub fn new(source: impl Into<String>, target: impl Into<String>, kind: EdgeKind) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            weight: kind.weight(),
            kind,
            label: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeKind {
    Imports,
    Exports,
    Calls,
    Extends,
    Implements,
    UsesType,
    Renders,
    ProvidesContext,
    ConsumesContext,
    HasField,
    References,
    /// Kinds emitted by newer hosts that this build does not know about.
    #[serde(other)]
    Unknown,
}

impl EdgeKind {
    /// Fixed type → weight lookup; unknown kinds fall back to 5.
    pub fn weight(&self) -> u32 {
        match self {
            EdgeKind::Imports => 5,
            EdgeKind::Exports => 3,
            EdgeKind::Calls => 7,
            EdgeKind::Extends => 9,
            EdgeKind::Implements => 8,
            EdgeKind::UsesType => 4,
            EdgeKind::Renders => 6,
            EdgeKind::ProvidesContext => 7,
            EdgeKind::ConsumesContext => 6,
            EdgeKind::HasField => 3,
            EdgeKind::References => 2,
            EdgeKind::Unknown => 5,
        }
    }
}
