//! Library API for depmap.
//!
//! A `ProjectAnalyzer` owns one workspace root and rebuilds the dependency
//! graph from scratch on every `analyze_project` call; there is no
//! incremental state beyond the patch history. Queries and impact analysis
//! run against the most recently built graph.
//!
//! # Example
//!
//! ```no_run
//! use depmap::{NodeChange, ProjectAnalyzer};
//! use std::path::Path;
//!
//! let mut analyzer = ProjectAnalyzer::new(Path::new("."))?;
//! let data = analyzer.analyze_project();
//! println!("{} files, score {}", data.metadata.file_count, data.metadata.coherence_score);
//!
//! let change = NodeChange::rename("src_utils_ts", "foo", "bar");
//! let impact = analyzer.analyze_impact(&change)?;
//! println!("{} direct dependents, risk {}", impact.direct.len(), impact.risk);
//! # Ok::<(), depmap::DepmapError>(())
//! ```

use crate::analysis;
use crate::config::{Config, ConfigError};
use crate::fs::RealFs;
use crate::graph::{DependencyGraph, layout};
use crate::impact::{self, ImpactError};
use crate::lexer;
use crate::model::{
    CodePatch, Edge, GraphData, GraphMetadata, GraphSnapshot, ImpactAnalysis, Node, NodeChange,
    PropagationResult, coherence_score,
};
use crate::patch::{self, PatchEngine};
use crate::scanner;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DepmapError {
    /// The workspace root could not be found or resolved.
    #[error("Path not found: {0}")]
    PathNotFound(PathBuf),

    /// A query or impact request named a node the graph does not contain.
    #[error("Node not found: {0}")]
    NodeNotFound(String),

    /// A query ran before any `analyze_project` call.
    #[error("No analysis available; call analyze_project first")]
    NotAnalyzed,

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Impact analysis error: {0}")]
    Impact(#[from] ImpactError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug)]
pub struct ProjectAnalyzer {
    root: PathBuf,
    config: Config,
    graph: Option<DependencyGraph>,
    data: Option<GraphData>,
    engine: PatchEngine,
}

impl ProjectAnalyzer {
    /// Bind an analyzer to a workspace root. The root must exist; a missing
    /// `.depmap.toml` under it falls back to defaults.
    pub fn new(path: &Path) -> Result<Self, DepmapError> {
        let root = path
            .canonicalize()
            .map_err(|_| DepmapError::PathNotFound(path.to_path_buf()))?;
        let config = Config::load(&root)?;
        let engine = PatchEngine::new(&root).fuzz_window(config.thresholds.patch_fuzz_window);

        Ok(Self {
            root,
            config,
            graph: None,
            data: None,
            engine,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run the full pipeline: scan, classify, link, detect issues, lay out.
    /// Files that cannot be read are logged and left out of the graph.
    pub fn analyze_project(&mut self) -> &GraphData {
        let files = scanner::scan_source_files(&self.root, &self.config);

        let mut nodes = Vec::with_capacity(files.len());
        for file in files {
            let text = match std::fs::read_to_string(&file) {
                Ok(text) => text,
                Err(err) => {
                    log::warn!("skipping {}: {}", file.display(), err);
                    continue;
                }
            };
            let rel = file
                .strip_prefix(&self.root)
                .unwrap_or(&file)
                .to_string_lossy()
                .replace('\\', "/");
            nodes.push(lexer::analyze_source(&rel, &text));
        }

        nodes.sort_by(|a, b| a.path.cmp(&b.path));
        layout::assign_positions(&mut nodes);

        let graph = DependencyGraph::build(nodes, &self.config);
        let issues = analysis::detect_issues(&graph, &self.config);
        let score = coherence_score(&issues);

        let out_nodes: Vec<Node> = graph.nodes().cloned().collect();
        let total_lines = out_nodes.iter().map(|n| n.lines).sum();
        let data = GraphData {
            metadata: GraphMetadata {
                project_root: self.root.to_string_lossy().to_string(),
                file_count: out_nodes.len(),
                edge_count: graph.edges().len(),
                total_lines,
                coherence_score: score,
                issues,
            },
            edges: graph.edges().to_vec(),
            groups: graph.groups().to_vec(),
            nodes: out_nodes,
        };

        self.graph = Some(graph);
        self.data.insert(data)
    }

    /// Serializable shape of the last analysis, for the host to persist.
    pub fn snapshot(&self) -> Result<GraphSnapshot, DepmapError> {
        let data = self.data.as_ref().ok_or(DepmapError::NotAnalyzed)?;
        Ok(GraphSnapshot::from_graph(data))
    }

    pub fn get_node(&self, id: &str) -> Result<&Node, DepmapError> {
        self.graph()?
            .node(id)
            .ok_or_else(|| DepmapError::NodeNotFound(id.to_string()))
    }

    pub fn get_dependents(&self, id: &str) -> Result<Vec<&str>, DepmapError> {
        let graph = self.known(id)?;
        Ok(graph.dependents(id))
    }

    pub fn get_dependencies(&self, id: &str) -> Result<Vec<&str>, DepmapError> {
        let graph = self.known(id)?;
        Ok(graph.dependencies(id))
    }

    pub fn get_edges(&self, id: &str) -> Result<Vec<&Edge>, DepmapError> {
        let graph = self.known(id)?;
        Ok(graph.edges_of(id))
    }

    /// Predict the blast radius of a proposed change against the last built
    /// graph. Dependent file contents are read fresh from disk.
    pub fn analyze_impact(&self, change: &NodeChange) -> Result<ImpactAnalysis, DepmapError> {
        let graph = self.graph()?;
        Ok(impact::analyze_impact(graph, change, &self.root, &RealFs::new())?)
    }

    pub fn generate_rename_patches(
        &self,
        node_id: &str,
        old_name: &str,
        new_name: &str,
    ) -> Result<Vec<CodePatch>, DepmapError> {
        let graph = self.graph()?;
        Ok(patch::generate_rename_patches(
            graph,
            node_id,
            old_name,
            new_name,
            &self.root,
            &RealFs::new(),
        )?)
    }

    pub fn apply_patches(&mut self, patches: Vec<CodePatch>) -> PropagationResult {
        self.engine.apply_patches(patches)
    }

    pub fn rollback(&mut self, ids: Option<&[String]>) -> PropagationResult {
        self.engine.rollback(ids)
    }

    pub fn patch_history(&self) -> &[CodePatch] {
        self.engine.history()
    }

    pub fn clear_patch_history(&mut self) {
        self.engine.clear_history()
    }

    fn graph(&self) -> Result<&DependencyGraph, DepmapError> {
        self.graph.as_ref().ok_or(DepmapError::NotAnalyzed)
    }

    fn known(&self, id: &str) -> Result<&DependencyGraph, DepmapError> {
        let graph = self.graph()?;
        if !graph.contains(id) {
            return Err(DepmapError::NodeNotFound(id.to_string()));
        }
        Ok(graph)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }

    #[test]
    fn missing_root_is_a_hard_error() {
        let err = ProjectAnalyzer::new(Path::new("/nonexistent/depmap-root")).unwrap_err();
        assert!(matches!(err, DepmapError::PathNotFound(_)));
    }

    #[test]
    fn queries_before_analysis_fail() {
        let dir = tempfile::tempdir().unwrap();
        let analyzer = ProjectAnalyzer::new(dir.path()).unwrap();
        assert!(matches!(
            analyzer.get_node("anything"),
            Err(DepmapError::NotAnalyzed)
        ));
    }

    #[test]
    fn analyze_then_query() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "src/utils.ts", "export function foo() {}\n");
        write(
            dir.path(),
            "src/main.ts",
            "import { foo } from './utils';\nfoo(1);\n",
        );

        let mut analyzer = ProjectAnalyzer::new(dir.path()).unwrap();
        let data = analyzer.analyze_project();
        assert_eq!(data.metadata.file_count, 2);
        assert_eq!(data.metadata.edge_count, 1);

        assert_eq!(
            analyzer.get_dependents("src_utils_ts").unwrap(),
            vec!["src_main_ts"]
        );
        assert!(matches!(
            analyzer.get_dependents("src_missing_ts"),
            Err(DepmapError::NodeNotFound(_))
        ));
    }

    #[test]
    fn snapshot_reflects_the_last_analysis() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "src/a.ts", "export const a = 1;\n");

        let mut analyzer = ProjectAnalyzer::new(dir.path()).unwrap();
        assert!(matches!(analyzer.snapshot(), Err(DepmapError::NotAnalyzed)));

        analyzer.analyze_project();
        let snapshot = analyzer.snapshot().unwrap();
        assert_eq!(snapshot.nodes.len(), 1);
        assert_eq!(snapshot.version, crate::model::SNAPSHOT_VERSION);
    }

    #[test]
    fn unreadable_files_are_skipped_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "src/ok.ts", "export const ok = 1;\n");
        // Invalid UTF-8 forces a read error on this one file.
        std::fs::write(dir.path().join("src/bad.ts"), [0xffu8, 0xfe, 0x00]).unwrap();

        let mut analyzer = ProjectAnalyzer::new(dir.path()).unwrap();
        let data = analyzer.analyze_project();
        assert_eq!(data.metadata.file_count, 1);
        assert_eq!(data.nodes[0].path, "src/ok.ts");
    }
}
