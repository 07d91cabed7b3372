//! Cycle detection via an explicit, iterative depth-first traversal.
//!
//! One cycle is recorded per back-edge discovered. Several back-edges found
//! during one traversal can report overlapping cycles; that duplication is
//! intentional and not deduplicated.

use crate::graph::DependencyGraph;
use crate::model::CoherenceIssue;
use std::collections::HashSet;

pub fn detect_circular_dependencies(graph: &DependencyGraph) -> Vec<CoherenceIssue> {
    let mut issues = Vec::new();
    let mut visited: HashSet<&str> = HashSet::new();

    for start in graph.node_ids() {
        if visited.contains(start) {
            continue;
        }
        walk_from(start, graph, &mut visited, &mut issues);
    }

    issues
}

struct Frame<'g> {
    id: &'g str,
    neighbors: Vec<&'g str>,
    next: usize,
}

/// Depth-first walk with an explicit frame stack instead of recursion, so a
/// pathological dependency chain cannot exhaust the call stack. `path` and
/// `on_stack` carry the usual recursion-stack semantics.
fn walk_from<'g>(
    start: &'g str,
    graph: &'g DependencyGraph,
    visited: &mut HashSet<&'g str>,
    issues: &mut Vec<CoherenceIssue>,
) {
    let mut stack = vec![Frame { id: start, neighbors: graph.dependencies(start), next: 0 }];
    let mut path: Vec<&str> = vec![start];
    let mut on_stack: HashSet<&str> = HashSet::from([start]);
    visited.insert(start);

    while let Some(frame) = stack.last_mut() {
        if frame.next >= frame.neighbors.len() {
            let done = stack.pop().unwrap();
            on_stack.remove(done.id);
            path.pop();
            continue;
        }

        let target = frame.neighbors[frame.next];
        frame.next += 1;

        if on_stack.contains(target) {
            // Back-edge: the path slice from the target's first occurrence
            // through the current node, closed by this edge, is one cycle.
            let pos = path.iter().position(|id| *id == target).unwrap_or(0);
            let cycle: Vec<String> = path[pos..].iter().map(|id| id.to_string()).collect();
            let display: Vec<&str> = cycle
                .iter()
                .map(|id| graph.node(id).map(|n| n.name.as_str()).unwrap_or(id))
                .collect();
            issues.push(CoherenceIssue::circular_dependency(cycle.clone(), display));
        } else if !visited.contains(target) {
            visited.insert(target);
            on_stack.insert(target);
            path.push(target);
            stack.push(Frame { id: target, neighbors: graph.dependencies(target), next: 0 });
        }
    }
}
