//! God-object detection by combined edge degree.

use crate::graph::DependencyGraph;
use crate::model::CoherenceIssue;

/// Flag nodes whose combined in+out degree exceeds `threshold`. The
/// comparison is strict: a node at exactly the threshold passes.
pub fn detect_god_objects(graph: &DependencyGraph, threshold: usize) -> Vec<CoherenceIssue> {
    graph
        .nodes()
        .filter_map(|node| {
            let degree = graph.degree(&node.id);
            (degree > threshold)
                .then(|| CoherenceIssue::god_object(node.id.clone(), &node.path, degree))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::lexer::analyze_source;
    use crate::model::{IssueKind, Severity};

    fn hub_with_dependents(count: usize) -> DependencyGraph {
        let mut files = vec![("src/hub.ts".to_string(), "export const hub = 1;\n".to_string())];
        for i in 0..count {
            files.push((
                format!("src/user{}.ts", i),
                "import { hub } from './hub';\n".to_string(),
            ));
        }
        let nodes = files
            .iter()
            .map(|(p, t)| analyze_source(p, t))
            .collect();
        DependencyGraph::build(nodes, &Config::default())
    }

    #[test]
    fn degree_above_threshold_is_flagged() {
        let graph = hub_with_dependents(16);
        let issues = detect_god_objects(&graph, 15);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].kind, IssueKind::GodObject);
        assert_eq!(issues[0].severity, Severity::Medium);
        assert_eq!(issues[0].nodes, vec!["src_hub_ts"]);
        assert!(issues[0].message.contains("16"));
    }

    #[test]
    fn degree_at_threshold_is_not_flagged() {
        let graph = hub_with_dependents(15);
        assert!(detect_god_objects(&graph, 15).is_empty());
    }
}
