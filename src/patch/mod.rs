//! Line-level patch application with fuzzy retargeting and rollback.
//!
//! Patches move `pending -> applied` or `pending -> failed`; a batch never
//! aborts on the first failure. The history list is process-local and has no
//! internal locking: callers must not run overlapping apply/rollback calls
//! against one engine, and two engines patching the same files can race.

use crate::fs::{FileSystem, RealFs};
use crate::graph::DependencyGraph;
use crate::impact::{whole_word, ImpactError};
use crate::model::{CodePatch, PropagationResult};
use std::path::{Path, PathBuf};

const MISMATCH_ERROR: &str = "code has changed, cannot apply patch";

pub struct PatchEngine {
    fs: Box<dyn FileSystem>,
    root: PathBuf,
    fuzz_window: usize,
    history: Vec<CodePatch>,
}

impl std::fmt::Debug for PatchEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PatchEngine")
            .field("root", &self.root)
            .field("fuzz_window", &self.fuzz_window)
            .field("history", &self.history)
            .finish_non_exhaustive()
    }
}

impl PatchEngine {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::with_fs(root, Box::new(RealFs::new()))
    }

    pub fn with_fs(root: impl Into<PathBuf>, fs: Box<dyn FileSystem>) -> Self {
        Self {
            fs,
            root: root.into(),
            fuzz_window: 5,
            history: Vec::new(),
        }
    }

    pub fn fuzz_window(mut self, lines: usize) -> Self {
        self.fuzz_window = lines;
        self
    }

    /// Apply a batch of patches, file by file, bottom-to-top within each
    /// file. Each file is read and written at most once; patches that
    /// succeed are written even when siblings in the same file fail.
    pub fn apply_patches(&mut self, patches: Vec<CodePatch>) -> PropagationResult {
        let result = self.apply_batch(patches);
        self.history.extend(result.applied.iter().cloned());
        result
    }

    /// Invert and re-apply history entries, newest first. With no ids the
    /// whole history is rolled back. History entries are removed only when
    /// every inverse patch succeeds, so a partial failure can be retried.
    pub fn rollback(&mut self, ids: Option<&[String]>) -> PropagationResult {
        let selected: Vec<CodePatch> = match ids {
            Some(ids) => self
                .history
                .iter()
                .filter(|p| ids.contains(&p.id))
                .cloned()
                .collect(),
            None => self.history.clone(),
        };

        let inverses: Vec<CodePatch> = selected.iter().rev().map(CodePatch::inverted).collect();
        let result = self.apply_batch(inverses);

        if result.success {
            let rolled: Vec<&str> = selected.iter().map(|p| p.id.as_str()).collect();
            self.history.retain(|p| !rolled.contains(&p.id.as_str()));
        }

        result
    }

    pub fn history(&self) -> &[CodePatch] {
        &self.history
    }

    /// The history grows without bound until the caller clears it.
    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    fn apply_batch(&self, patches: Vec<CodePatch>) -> PropagationResult {
        let mut result = PropagationResult::default();

        for (file, mut group) in group_by_file(patches) {
            let path = self.root.join(&file);

            if !self.fs.exists(&path) {
                let message = format!("file not found: {}", file);
                for mut patch in group {
                    patch.error = Some(message.clone());
                    result.failed.push(patch);
                }
                result.errors.push(message);
                continue;
            }

            let text = match self.fs.read_to_string(&path) {
                Ok(text) => text,
                Err(err) => {
                    let message = format!("failed to read {}: {}", file, err);
                    for mut patch in group {
                        patch.error = Some(message.clone());
                        result.failed.push(patch);
                    }
                    result.errors.push(message);
                    continue;
                }
            };

            let trailing_newline = text.ends_with('\n');
            let mut lines: Vec<String> = text.lines().map(String::from).collect();

            // Bottom-to-top so deletions cannot shift lines a later patch in
            // this file still points at.
            group.sort_by(|a, b| b.line.cmp(&a.line));

            let mut touched = false;
            for mut patch in group {
                match self.target_line(&patch, &lines) {
                    Ok(idx) => {
                        patch.line = idx + 1;
                        if patch.replacement.is_empty() {
                            lines.remove(idx);
                        } else {
                            lines[idx] = patch.replacement.clone();
                        }
                        patch.applied = true;
                        patch.error = None;
                        touched = true;
                        result.applied.push(patch);
                    }
                    Err(message) => {
                        result.errors.push(format!("{}: {}", file, message));
                        patch.error = Some(message);
                        result.failed.push(patch);
                    }
                }
            }

            if !touched {
                continue;
            }

            let mut output = lines.join("\n");
            if trailing_newline {
                output.push('\n');
            }
            if let Err(err) = self.fs.write(&path, &output) {
                let message = format!("failed to write {}: {}", file, err);
                result.errors.push(message.clone());
                // Nothing reached disk; reclassify this file's successes.
                let (written, kept): (Vec<_>, Vec<_>) =
                    result.applied.drain(..).partition(|p| p.file == file);
                result.applied = kept;
                for mut patch in written {
                    patch.applied = false;
                    patch.error = Some(message.clone());
                    result.failed.push(patch);
                }
                continue;
            }
            result.modified_files.push(file);
        }

        result.success = result.failed.is_empty();
        result
    }

    /// Resolve the 0-based index a patch should land on: the recorded line
    /// if its trimmed text matches, otherwise the nearest exact trimmed
    /// match within the fuzz window. Never force-applies.
    fn target_line(&self, patch: &CodePatch, lines: &[String]) -> Result<usize, String> {
        if patch.line == 0 || patch.line > lines.len() {
            return Err(format!("line {} out of range (file has {})", patch.line, lines.len()));
        }
        let idx = patch.line - 1;
        let wanted = patch.expected.trim();

        if lines[idx].trim() == wanted {
            return Ok(idx);
        }

        for offset in 1..=self.fuzz_window {
            if offset <= idx && lines[idx - offset].trim() == wanted {
                return Ok(idx - offset);
            }
            if idx + offset < lines.len() && lines[idx + offset].trim() == wanted {
                return Ok(idx + offset);
            }
        }

        Err(MISMATCH_ERROR.to_string())
    }
}

/// First-seen file order, so batch results are deterministic.
fn group_by_file(patches: Vec<CodePatch>) -> Vec<(String, Vec<CodePatch>)> {
    let mut groups: Vec<(String, Vec<CodePatch>)> = Vec::new();
    for patch in patches {
        match groups.iter_mut().find(|(file, _)| *file == patch.file) {
            Some((_, group)) => group.push(patch),
            None => groups.push((patch.file.clone(), vec![patch])),
        }
    }
    groups
}

/// Emit one rename patch per line of each direct dependent containing a
/// whole-word occurrence of `old_name`. Producer only; feeds
/// `PatchEngine::apply_patches`.
pub fn generate_rename_patches(
    graph: &DependencyGraph,
    node_id: &str,
    old_name: &str,
    new_name: &str,
    root: &Path,
    fs: &dyn FileSystem,
) -> Result<Vec<CodePatch>, ImpactError> {
    if !graph.contains(node_id) {
        return Err(ImpactError::NodeNotFound(node_id.to_string()));
    }
    let word = whole_word(old_name)?;

    let mut patches = Vec::new();
    for dep_id in graph.dependents(node_id) {
        let Some(dep) = graph.node(dep_id) else {
            continue;
        };
        let text = match fs.read_to_string(&root.join(&dep.path)) {
            Ok(text) => text,
            Err(err) => {
                log::warn!("skipping {} during rename-patch generation: {}", dep.path, err);
                continue;
            }
        };
        for (idx, line) in text.lines().enumerate() {
            if !word.is_match(line) {
                continue;
            }
            patches.push(CodePatch::new(
                dep.path.clone(),
                idx + 1,
                line,
                word.replace_all(line, new_name).into_owned(),
                format!("Rename '{}' to '{}'", old_name, new_name),
                true,
            ));
        }
    }

    Ok(patches)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::fs::mock::MockFs;
    use crate::lexer::analyze_source;
    use std::sync::Arc;

    fn engine_with(files: &[(&str, &str)]) -> (PatchEngine, Arc<MockFs>) {
        let fs = Arc::new(MockFs::with_files(files.iter().copied()));
        let engine = PatchEngine::with_fs("", Box::new(SharedFs(fs.clone())));
        (engine, fs)
    }

    struct SharedFs(Arc<MockFs>);

    impl FileSystem for SharedFs {
        fn read_to_string(&self, path: &Path) -> std::io::Result<String> {
            self.0.read_to_string(path)
        }
        fn write(&self, path: &Path, content: &str) -> std::io::Result<()> {
            self.0.write(path, content)
        }
        fn exists(&self, path: &Path) -> bool {
            self.0.exists(path)
        }
    }

    #[test]
    fn applies_a_single_replacement() {
        let (mut engine, fs) = engine_with(&[("src/main.ts", "foo(1);\nbar(2);\n")]);
        let patch = CodePatch::new("src/main.ts", 1, "foo(1);", "baz(1);", "swap", true);

        let result = engine.apply_patches(vec![patch]);
        assert!(result.success);
        assert_eq!(result.applied.len(), 1);
        assert_eq!(result.modified_files, vec!["src/main.ts"]);
        assert_eq!(
            fs.contents(Path::new("src/main.ts")).unwrap(),
            "baz(1);\nbar(2);\n"
        );
        assert_eq!(engine.history().len(), 1);
    }

    #[test]
    fn fuzzy_search_retargets_within_window() {
        let (mut engine, fs) = engine_with(&[(
            "src/main.ts",
            "// new header\n// more\nfoo(1);\n",
        )]);
        // Recorded before two lines were inserted above.
        let patch = CodePatch::new("src/main.ts", 1, "foo(1);", "bar(1);", "rename", true);

        let result = engine.apply_patches(vec![patch]);
        assert!(result.success);
        assert_eq!(result.applied[0].line, 3);
        assert!(fs.contents(Path::new("src/main.ts")).unwrap().contains("bar(1);"));
    }

    #[test]
    fn mismatch_beyond_window_fails_and_leaves_file_alone() {
        let original = "one();\ntwo();\n";
        let (mut engine, fs) = engine_with(&[("src/main.ts", original)]);
        let patch = CodePatch::new("src/main.ts", 1, "gone();", "new();", "stale", true);

        let result = engine.apply_patches(vec![patch]);
        assert!(!result.success);
        assert_eq!(result.failed.len(), 1);
        assert_eq!(result.failed[0].error.as_deref(), Some(MISMATCH_ERROR));
        assert!(result.modified_files.is_empty());
        assert_eq!(fs.contents(Path::new("src/main.ts")).unwrap(), original);
        assert!(engine.history().is_empty());
    }

    #[test]
    fn missing_file_fails_its_group_but_not_others() {
        let (mut engine, fs) = engine_with(&[("src/a.ts", "keep();\n")]);
        let good = CodePatch::new("src/a.ts", 1, "keep();", "kept();", "a", true);
        let bad = CodePatch::new("src/gone.ts", 1, "x;", "y;", "b", true);

        let result = engine.apply_patches(vec![bad, good]);
        assert!(!result.success);
        assert_eq!(result.applied.len(), 1);
        assert_eq!(result.failed.len(), 1);
        assert!(result.failed[0].error.as_deref().unwrap().contains("file not found"));
        assert_eq!(fs.contents(Path::new("src/a.ts")).unwrap(), "kept();\n");
    }

    #[test]
    fn deletions_apply_bottom_up_without_shifting() {
        let (mut engine, fs) = engine_with(&[("src/main.ts", "a;\nb;\nc;\n")]);
        let del_a = CodePatch::new("src/main.ts", 1, "a;", "", "del", true);
        let del_c = CodePatch::new("src/main.ts", 3, "c;", "", "del", true);

        let result = engine.apply_patches(vec![del_a, del_c]);
        assert!(result.success);
        assert_eq!(fs.contents(Path::new("src/main.ts")).unwrap(), "b;\n");
    }

    #[test]
    fn rollback_restores_bytes_and_drains_history() {
        let original = "  foo(1);\nbar(2);\n";
        let (mut engine, fs) = engine_with(&[("src/main.ts", original)]);
        let patch = CodePatch::new("src/main.ts", 1, "  foo(1);", "  baz(1);", "swap", true);

        assert!(engine.apply_patches(vec![patch]).success);
        let result = engine.rollback(None);
        assert!(result.success);
        assert_eq!(fs.contents(Path::new("src/main.ts")).unwrap(), original);
        assert!(engine.history().is_empty());
    }

    #[test]
    fn failed_rollback_keeps_history_for_retry() {
        let (mut engine, fs) = engine_with(&[("src/main.ts", "foo(1);\n")]);
        let patch = CodePatch::new("src/main.ts", 1, "foo(1);", "baz(1);", "swap", true);
        assert!(engine.apply_patches(vec![patch]).success);

        // Outside edit invalidates the rollback's expected text.
        fs.write(Path::new("src/main.ts"), "totally different\n").unwrap();
        let result = engine.rollback(None);
        assert!(!result.success);
        assert_eq!(engine.history().len(), 1);
    }

    #[test]
    fn rollback_of_named_subset_only() {
        let (mut engine, fs) = engine_with(&[("src/main.ts", "a();\nb();\n")]);
        let p1 = CodePatch::new("src/main.ts", 1, "a();", "a2();", "p1", true);
        let p2 = CodePatch::new("src/main.ts", 2, "b();", "b2();", "p2", true);
        let p2_id = p2.id.clone();

        assert!(engine.apply_patches(vec![p1, p2]).success);
        let result = engine.rollback(Some(&[p2_id]));
        assert!(result.success);
        assert_eq!(fs.contents(Path::new("src/main.ts")).unwrap(), "a2();\nb();\n");
        assert_eq!(engine.history().len(), 1);
    }

    #[test]
    fn clear_history_is_explicit() {
        let (mut engine, _fs) = engine_with(&[("src/main.ts", "foo();\n")]);
        let patch = CodePatch::new("src/main.ts", 1, "foo();", "bar();", "swap", true);
        engine.apply_patches(vec![patch]);
        assert_eq!(engine.history().len(), 1);
        engine.clear_history();
        assert!(engine.history().is_empty());
    }

    #[test]
    fn generates_rename_patches_from_dependents() {
        let files = [
            ("src/utils.ts", "export function foo() {}\n"),
            ("src/main.ts", "import { foo } from './utils';\nfoo(1);\n"),
        ];
        let nodes = files.iter().map(|(p, t)| analyze_source(p, t)).collect();
        let graph = DependencyGraph::build(nodes, &Config::default());
        let fs = MockFs::with_files(files.iter().copied());

        let patches =
            generate_rename_patches(&graph, "src_utils_ts", "foo", "bar", Path::new(""), &fs)
                .unwrap();
        assert_eq!(patches.len(), 2);
        assert!(patches.iter().all(|p| p.auto_fixable && !p.applied));
        let call = patches.iter().find(|p| p.line == 2).unwrap();
        assert_eq!(call.expected, "foo(1);");
        assert_eq!(call.replacement, "bar(1);");

        let missing =
            generate_rename_patches(&graph, "nope", "foo", "bar", Path::new(""), &fs);
        assert!(matches!(missing, Err(ImpactError::NodeNotFound(_))));
    }
}
