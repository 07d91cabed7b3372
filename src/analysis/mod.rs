//! Architectural health checks over a built dependency graph.

mod circular;
mod coupling;
mod exports;
mod orphan;

pub use circular::detect_circular_dependencies;
pub use coupling::detect_god_objects;
pub use exports::detect_unused_exports;
pub use orphan::detect_orphaned_files;

use crate::config::Config;
use crate::graph::DependencyGraph;
use crate::model::CoherenceIssue;

/// Run every detector in a fixed order and concatenate the findings.
pub fn detect_issues(graph: &DependencyGraph, config: &Config) -> Vec<CoherenceIssue> {
    let mut issues = detect_circular_dependencies(graph);
    issues.extend(detect_unused_exports(graph));
    issues.extend(detect_orphaned_files(graph));
    issues.extend(detect_god_objects(graph, config.thresholds.god_object_degree));
    issues
}
