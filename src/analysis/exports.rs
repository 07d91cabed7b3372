//! Unused-export detection by bare symbol name.
//!
//! A named export is unused if its symbol name never appears as an import
//! symbol anywhere in the project. There is no scope awareness: two
//! unrelated symbols sharing a name in different files suppress a true
//! positive. That imprecision is part of the contract.

use crate::graph::DependencyGraph;
use crate::model::{CoherenceIssue, ExportKind};
use std::collections::HashSet;

pub fn detect_unused_exports(graph: &DependencyGraph) -> Vec<CoherenceIssue> {
    let imported: HashSet<&str> = graph
        .nodes()
        .flat_map(|n| n.imports.iter().map(|i| i.symbol.as_str()))
        .collect();

    let mut issues = Vec::new();
    for node in graph.nodes() {
        for export in &node.exports {
            if export.kind == ExportKind::Default {
                continue;
            }
            if !imported.contains(export.symbol.as_str()) {
                issues.push(CoherenceIssue::unused_export(
                    node.id.clone(),
                    &export.symbol,
                    &node.path,
                ));
            }
        }
    }

    issues
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
    fn flags_never_imported_named_export() {
        let graph = build(&[("src/util.ts", "export function unusedHelper() {}\n")]);
        let issues = detect_unused_exports(&graph);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, Severity::Low);
        assert!(issues[0].message.contains("unusedHelper"));
    }

    #[test]
    fn imported_symbol_is_not_flagged() {
        let graph = build(&[
            ("src/util.ts", "export function helper() {}\n"),
            ("src/main.ts", "import { helper } from './util';\n"),
        ]);
        assert!(detect_unused_exports(&graph).is_empty());
    }

    #[test]
    fn default_exports_are_ignored() {
        let graph = build(&[("src/app.ts", "export default function main() {}\n")]);
        assert!(detect_unused_exports(&graph).is_empty());
    }

    #[test]
    fn same_name_elsewhere_suppresses_detection() {
        // Known false negative: 'helper' imported from a different file
        // shadows the unused one by name.
        let graph = build(&[
            ("src/a.ts", "export function helper() {}\n"),
            ("src/b.ts", "export function helper() {}\n"),
            ("src/main.ts", "import { helper } from './a';\n"),
        ]);
        assert!(detect_unused_exports(&graph).is_empty());
    }
}
