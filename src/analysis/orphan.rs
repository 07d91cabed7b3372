//! Orphaned-file detection: no edges in either direction.

use crate::graph::DependencyGraph;
use crate::model::{CoherenceIssue, NodeRole};

pub fn detect_orphaned_files(graph: &DependencyGraph) -> Vec<CoherenceIssue> {
    graph
        .nodes()
        .filter(|node| {
            // API entry points have no graph-visible callers by design.
            node.role != NodeRole::Api && graph.degree(&node.id) == 0
        })
        .map(|node| CoherenceIssue::orphaned_file(node.id.clone(), &node.path))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::lexer::analyze_source;
    use crate::model::Severity;

    fn build(files: &[(&str, &str)]) -> DependencyGraph {
        let nodes = files.iter().map(|(p, t)| analyze_source(p, t)).collect();
        DependencyGraph::build(nodes, &Config::default())
    }

    #[test]
    fn disconnected_function_file_is_an_orphan() {
        let graph = build(&[
            ("src/loose.ts", "export function lonely() {}\n"),
            ("src/a.ts", "import { b } from './b';\n"),
            ("src/b.ts", "export const b = 1;\n"),
        ]);

        let issues = detect_orphaned_files(&graph);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, Severity::Medium);
        assert_eq!(issues[0].nodes, vec!["src_loose_ts"]);
    }

    #[test]
    fn api_routes_are_exempt() {
        let graph = build(&[(
            "src/app/api/users/route.ts",
            "export async function GET() {}\n",
        )]);
        assert!(detect_orphaned_files(&graph).is_empty());
    }
}
