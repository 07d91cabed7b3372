//! Owned dependency graph built from classified nodes.

mod resolve;
pub mod layout;

pub use resolve::resolve_specifier;

use crate::config::Config;
use crate::model::{Edge, EdgeKind, Group, ImportKind, Node};
use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::HashMap;

/// Fixed cyclic palette, assigned in bucket-discovery order.
const GROUP_PALETTE: &[&str] = &[
    "#3b82f6", "#10b981", "#f59e0b", "#8b5cf6", "#ec4899", "#14b8a6", "#ef4444", "#6366f1",
];

/// An explicitly owned graph value threaded through the pipeline stages.
/// Each analysis pass builds a fresh one; nothing here is process-global.
#[derive(Debug)]
pub struct DependencyGraph {
    graph: DiGraph<String, EdgeKind>,
    indices: HashMap<String, NodeIndex>,
    nodes: HashMap<String, Node>,
    edges: Vec<Edge>,
    groups: Vec<Group>,
    /// Node ids in the deterministic (path-sorted) build order.
    order: Vec<String>,
}

impl DependencyGraph {
    /// Link classified nodes into a directed graph. Imports are resolved
    /// against the other nodes only; externals and unresolvable specifiers
    /// produce no edge.
    pub fn build(mut nodes: Vec<Node>, config: &Config) -> Self {
        // The scanner guarantees no order; sort so identities, edges, and
        // group colors come out the same on every run.
        nodes.sort_by(|a, b| a.path.cmp(&b.path));

        let mut graph = DiGraph::new();
        let mut indices = HashMap::new();
        let mut path_to_id = HashMap::new();
        let mut order = Vec::with_capacity(nodes.len());

        for node in &nodes {
            let idx = graph.add_node(node.id.clone());
            indices.insert(node.id.clone(), idx);
            path_to_id.insert(node.path.clone(), node.id.clone());
            order.push(node.id.clone());
        }

        let mut edges = Vec::new();
        for node in &nodes {
            let from = indices[&node.id];
            for import in &node.imports {
                let Some(target_id) = resolve_specifier(
                    &import.source,
                    &node.path,
                    &config.aliases,
                    &path_to_id,
                ) else {
                    log::debug!(
                        "unresolved import '{}' in {} (no edge)",
                        import.source,
                        node.path
                    );
                    continue;
                };
                let kind = if import.kind == ImportKind::TypeOnly {
                    EdgeKind::UsesType
                } else {
                    EdgeKind::Imports
                };
                graph.add_edge(from, indices[&target_id], kind);
                edges.push(
                    Edge::new(node.id.clone(), target_id, kind).with_label(import.symbol.clone()),
                );
            }
        }

        let groups = derive_groups(&nodes);
        let nodes = nodes.into_iter().map(|n| (n.id.clone(), n)).collect();

        Self { graph, indices, nodes, edges, groups, order }
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.indices.contains_key(id)
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Node ids in deterministic build order.
    pub fn node_ids(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.order.iter().filter_map(|id| self.nodes.get(id))
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    /// Nodes with an edge targeting `id` (who depends on it).
    pub fn dependents(&self, id: &str) -> Vec<&str> {
        self.neighbors(id, Direction::Incoming)
    }

    /// Nodes `id` has an edge to (what it depends on).
    pub fn dependencies(&self, id: &str) -> Vec<&str> {
        self.neighbors(id, Direction::Outgoing)
    }

    /// All edges touching `id` in either direction.
    pub fn edges_of(&self, id: &str) -> Vec<&Edge> {
        self.edges
            .iter()
            .filter(|e| e.source == id || e.target == id)
            .collect()
    }

    /// Combined in+out degree.
    pub fn degree(&self, id: &str) -> usize {
        match self.indices.get(id) {
            Some(&idx) => {
                self.graph.neighbors_directed(idx, Direction::Incoming).count()
                    + self.graph.neighbors_directed(idx, Direction::Outgoing).count()
            }
            None => 0,
        }
    }

    fn neighbors(&self, id: &str, direction: Direction) -> Vec<&str> {
        match self.indices.get(id) {
            Some(&idx) => self
                .graph
                .neighbors_directed(idx, direction)
                .map(|n| self.graph[n].as_str())
                .collect(),
            None => Vec::new(),
        }
    }

}

/// Bucket nodes by first path segment; only buckets with at least two
/// members become visible groups.
fn derive_groups(nodes: &[Node]) -> Vec<Group> {
    let mut buckets: Vec<(String, Vec<String>)> = Vec::new();
    for node in nodes {
        let Some((segment, _)) = node.path.split_once('/') else {
            continue;
        };
        match buckets.iter_mut().find(|(name, _)| name == segment) {
            Some((_, members)) => members.push(node.id.clone()),
            None => buckets.push((segment.to_string(), vec![node.id.clone()])),
        }
    }

    buckets
        .into_iter()
        .filter(|(_, members)| members.len() >= 2)
        .enumerate()
        .map(|(i, (name, members))| Group {
            name,
            color: GROUP_PALETTE[i % GROUP_PALETTE.len()].to_string(),
            members,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::analyze_source;

    fn build(files: &[(&str, &str)]) -> DependencyGraph {
        let nodes = files
            .iter()
            .map(|(path, text)| analyze_source(path, text))
            .collect();
        DependencyGraph::build(nodes, &Config::default())
    }

    #[test]
    fn sibling_import_creates_one_weighted_edge() {
        let graph = build(&[
            ("src/utils.ts", "export function foo() {}\n"),
            ("src/main.ts", "import { foo } from './utils';\nfoo(1);\n"),
        ]);

        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edges().len(), 1);
        let edge = &graph.edges()[0];
        assert_eq!(edge.kind, EdgeKind::Imports);
        assert_eq!(edge.weight, 5);
        assert_eq!(edge.source, "src_main_ts");
        assert_eq!(edge.target, "src_utils_ts");
        assert_eq!(edge.label.as_deref(), Some("foo"));
    }

    #[test]
    fn type_only_import_uses_uses_type_edge() {
        let graph = build(&[
            ("src/shapes.ts", "export type Shape = { id: number };\n"),
            ("src/draw.ts", "import type { Shape } from './shapes';\n"),
        ]);

        assert_eq!(graph.edges().len(), 1);
        assert_eq!(graph.edges()[0].kind, EdgeKind::UsesType);
        assert_eq!(graph.edges()[0].weight, 4);
    }

    #[test]
    fn external_imports_create_no_edges() {
        let graph = build(&[("src/app.ts", "import React from 'react';\n")]);
        assert_eq!(graph.node_count(), 1);
        assert!(graph.edges().is_empty());
    }

    #[test]
    fn dependents_and_dependencies_are_inverse() {
        let graph = build(&[
            ("src/utils.ts", "export function foo() {}\n"),
            ("src/main.ts", "import { foo } from './utils';\n"),
        ]);

        assert_eq!(graph.dependents("src_utils_ts"), vec!["src_main_ts"]);
        assert_eq!(graph.dependencies("src_main_ts"), vec!["src_utils_ts"]);
        assert!(graph.dependents("src_main_ts").is_empty());
        assert_eq!(graph.degree("src_utils_ts"), 1);
    }

    #[test]
    fn groups_require_two_members() {
        let graph = build(&[
            ("src/a.ts", ""),
            ("src/b.ts", ""),
            ("scripts/one.ts", ""),
        ]);

        assert_eq!(graph.groups().len(), 1);
        assert_eq!(graph.groups()[0].name, "src");
        assert_eq!(graph.groups()[0].members.len(), 2);
        assert_eq!(graph.groups()[0].color, GROUP_PALETTE[0]);
    }

    #[test]
    fn rebuild_of_same_tree_is_identical() {
        let files = [
            ("src/utils.ts", "export function foo() {}\n"),
            ("src/main.ts", "import { foo } from './utils';\n"),
        ];
        let first = build(&files);
        // Reversed discovery order must not change anything observable.
        let reversed = [files[1], files[0]];
        let second = build(&reversed);

        let a: Vec<_> = first.node_ids().collect();
        let b: Vec<_> = second.node_ids().collect();
        assert_eq!(a, b);
        assert_eq!(first.edges(), second.edges());
    }
}
