mod change;
mod edge;
mod issue;
mod node;
mod patch;

pub use change::{
    BreakingChange, ChangeKind, ImpactAnalysis, ImpactedFile, NodeChange, RiskLevel, SuggestedFix,
};
pub use edge::{Edge, EdgeKind};
pub use issue::{CoherenceIssue, IssueKind, Severity, coherence_score};
pub use node::{
    ExportKind, ExportRecord, FieldInfo, ImportKind, ImportRecord, Node, NodeRole, Position,
    node_id,
};
pub use patch::{CodePatch, PropagationResult};

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Current snapshot schema version.
pub const SNAPSHOT_VERSION: u32 = 2;

/// A named bucket of node ids sharing a top-level directory. Only directories
/// with at least two member nodes are materialized.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Group {
    pub name: String,
    pub color: String,
    pub members: Vec<String>,
}

/// The full result of one `analyze_project` pass. Recomputed from scratch on
/// every call; the engine keeps no incremental state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphData {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
    pub groups: Vec<Group>,
    pub metadata: GraphMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphMetadata {
    pub project_root: String,
    pub file_count: usize,
    pub edge_count: usize,
    pub total_lines: usize,
    pub coherence_score: u32,
    pub issues: Vec<CoherenceIssue>,
}

/// Serializable shape a host may persist between invocations. The engine
/// itself never caches one; this is purely the integration contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphSnapshot {
    pub version: u32,
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
    pub groups: Vec<Group>,
    pub coherence_score: u32,
    pub issues: Vec<CoherenceIssue>,
    /// User-overridden node positions, keyed by node id.
    #[serde(default)]
    pub position_overrides: HashMap<String, Position>,
    /// Not-yet-created "planning" nodes sketched by the host.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub planned_nodes: Option<Vec<Node>>,
}

impl GraphSnapshot {
    pub fn from_graph(data: &GraphData) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            nodes: data.nodes.clone(),
            edges: data.edges.clone(),
            groups: data.groups.clone(),
            coherence_score: data.metadata.coherence_score,
            issues: data.metadata.issues.clone(),
            position_overrides: HashMap::new(),
            planned_nodes: None,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(raw: &str) -> serde_json::Result<Self> {
        serde_json::from_str(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_round_trips_through_json() {
        let data = GraphData {
            nodes: vec![Node::new("src/utils.ts")],
            edges: vec![Edge::new("a", "b", EdgeKind::Imports)],
            groups: vec![],
            metadata: GraphMetadata {
                project_root: "/tmp/project".to_string(),
                file_count: 1,
                edge_count: 1,
                total_lines: 10,
                coherence_score: 100,
                issues: vec![],
            },
        };

        let snapshot = GraphSnapshot::from_graph(&data);
        let json = snapshot.to_json().unwrap();
        let restored = GraphSnapshot::from_json(&json).unwrap();

        assert_eq!(restored.version, SNAPSHOT_VERSION);
        assert_eq!(restored.nodes.len(), 1);
        assert_eq!(restored.edges[0].weight, 5);
        assert_eq!(restored.coherence_score, 100);
    }
}
