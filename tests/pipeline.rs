//! End-to-end tests for the depmap library API: analyze a real directory
//! tree on disk, predict change impact, apply patches, and roll them back.

use depmap::model::{EdgeKind, IssueKind, NodeChange, Severity};
use depmap::{CodePatch, ProjectAnalyzer, RiskLevel};
use std::path::Path;

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, content).unwrap();
}

fn read(root: &Path, rel: &str) -> String {
    std::fs::read_to_string(root.join(rel)).unwrap()
}

#[test]
fn analyze_links_two_files_with_one_imports_edge() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "src/utils.ts", "export function foo() {}\n");
    write(
        dir.path(),
        "src/main.ts",
        "import { foo } from './utils'; foo(1);\n",
    );

    let mut analyzer = ProjectAnalyzer::new(dir.path()).unwrap();
    let data = analyzer.analyze_project();

    assert_eq!(data.nodes.len(), 2);
    assert_eq!(data.edges.len(), 1);
    assert_eq!(data.edges[0].kind, EdgeKind::Imports);
    assert_eq!(data.edges[0].weight, 5);
    assert_eq!(data.edges[0].source, "src_main_ts");
    assert_eq!(data.edges[0].target, "src_utils_ts");
}

#[test]
fn rename_impact_apply_and_rollback_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let original = "import { foo } from './utils'; foo(1);\n";
    write(dir.path(), "src/utils.ts", "export function foo() {}\n");
    write(dir.path(), "src/main.ts", original);

    let mut analyzer = ProjectAnalyzer::new(dir.path()).unwrap();
    analyzer.analyze_project();

    let change = NodeChange::rename("src_utils_ts", "foo", "bar");
    let analysis = analyzer.analyze_impact(&change).unwrap();

    assert_eq!(analysis.direct.len(), 1);
    assert_eq!(analysis.direct[0].path, "src/main.ts");
    assert_eq!(analysis.suggested_fixes.len(), 1);
    let fix = &analysis.suggested_fixes[0];
    assert!(fix.auto_fixable);
    assert_eq!(
        fix.replacement.as_deref(),
        Some("import { bar } from './utils'; bar(1);")
    );

    let patches: Vec<CodePatch> = analysis
        .suggested_fixes
        .into_iter()
        .filter_map(|f| f.into_patch())
        .collect();
    let result = analyzer.apply_patches(patches);
    assert!(result.success);
    assert!(read(dir.path(), "src/main.ts").contains("bar(1);"));

    let rolled = analyzer.rollback(None);
    assert!(rolled.success);
    assert_eq!(read(dir.path(), "src/main.ts"), original);
    assert!(analyzer.patch_history().is_empty());
}

#[test]
fn generated_rename_patches_round_trip_byte_for_byte() {
    let dir = tempfile::tempdir().unwrap();
    let original = "import { foo } from './utils';\n  foo(1);\nconst x = foo();\n";
    write(dir.path(), "src/utils.ts", "export function foo() {}\n");
    write(dir.path(), "src/main.ts", original);

    let mut analyzer = ProjectAnalyzer::new(dir.path()).unwrap();
    analyzer.analyze_project();

    let patches = analyzer
        .generate_rename_patches("src_utils_ts", "foo", "bar")
        .unwrap();
    assert_eq!(patches.len(), 3);

    assert!(analyzer.apply_patches(patches).success);
    let renamed = read(dir.path(), "src/main.ts");
    assert!(!renamed.contains("foo"));
    // Indentation survives the rename.
    assert!(renamed.contains("  bar(1);"));

    assert!(analyzer.rollback(None).success);
    assert_eq!(read(dir.path(), "src/main.ts"), original);
}

#[test]
fn mutual_import_cycle_scores_ninety() {
    let dir = tempfile::tempdir().unwrap();
    write(
        dir.path(),
        "src/a.ts",
        "import { b } from './b';\nexport const a = b;\n",
    );
    write(
        dir.path(),
        "src/b.ts",
        "import { a } from './a';\nexport const b = 1;\n",
    );

    let mut analyzer = ProjectAnalyzer::new(dir.path()).unwrap();
    let data = analyzer.analyze_project();

    let cycles: Vec<_> = data
        .metadata
        .issues
        .iter()
        .filter(|i| i.kind == IssueKind::CircularDependency)
        .collect();
    assert!(!cycles.is_empty());
    assert!(cycles.iter().all(|i| i.severity == Severity::High));
    assert_eq!(data.metadata.issues.len(), 1);
    assert_eq!(data.metadata.coherence_score, 90);
}

#[test]
fn orphan_detection_exempts_api_routes() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "src/lonely.ts", "function lonely() {}\n");
    write(
        dir.path(),
        "src/app/api/users/route.ts",
        "export async function GET() {}\n",
    );

    let mut analyzer = ProjectAnalyzer::new(dir.path()).unwrap();
    let data = analyzer.analyze_project();

    let orphans: Vec<_> = data
        .metadata
        .issues
        .iter()
        .filter(|i| i.kind == IssueKind::OrphanedFile)
        .collect();
    assert_eq!(orphans.len(), 1);
    assert_eq!(orphans[0].severity, Severity::Medium);
    assert_eq!(orphans[0].nodes, vec!["src_lonely_ts"]);
}

#[test]
fn god_object_boundary_is_sixteen_edges() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "src/hub.ts", "export const hub = 1;\n");
    for i in 0..16 {
        write(
            dir.path(),
            &format!("src/user{}.ts", i),
            "import { hub } from './hub';\nexport const u = hub;\n",
        );
    }

    let mut analyzer = ProjectAnalyzer::new(dir.path()).unwrap();
    let data = analyzer.analyze_project();
    let gods: Vec<_> = data
        .metadata
        .issues
        .iter()
        .filter(|i| i.kind == IssueKind::GodObject)
        .collect();
    assert_eq!(gods.len(), 1);
    assert_eq!(gods[0].nodes, vec!["src_hub_ts"]);

    // One fewer dependent sits exactly at the threshold and passes.
    std::fs::remove_file(dir.path().join("src/user15.ts")).unwrap();
    let data = analyzer.analyze_project();
    assert!(
        !data
            .metadata
            .issues
            .iter()
            .any(|i| i.kind == IssueKind::GodObject)
    );
}

#[test]
fn stale_patch_fails_without_touching_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let original = "const a = 1;\nconst b = 2;\nconst c = 3;\n";
    write(dir.path(), "src/main.ts", original);

    let mut analyzer = ProjectAnalyzer::new(dir.path()).unwrap();
    analyzer.analyze_project();

    let patch = CodePatch::new(
        "src/main.ts",
        2,
        "const gone = 0;",
        "const back = 0;",
        "stale edit",
        true,
    );
    let result = analyzer.apply_patches(vec![patch]);

    assert!(!result.success);
    assert_eq!(result.failed.len(), 1);
    assert!(
        result.failed[0]
            .error
            .as_deref()
            .unwrap()
            .contains("code has changed")
    );
    assert!(result.modified_files.is_empty());
    assert_eq!(read(dir.path(), "src/main.ts"), original);
}

#[test]
fn deleting_an_export_is_high_risk_with_removable_imports() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "src/utils.ts", "export function helper() {}\n");
    write(
        dir.path(),
        "src/main.ts",
        "import { helper } from './utils';\nhelper();\n",
    );

    let mut analyzer = ProjectAnalyzer::new(dir.path()).unwrap();
    analyzer.analyze_project();

    let change = NodeChange::delete("src_utils_ts", "helper");
    let analysis = analyzer.analyze_impact(&change).unwrap();

    assert_eq!(analysis.breaking_changes.len(), 1);
    assert_eq!(analysis.risk, RiskLevel::High);
    let fix = &analysis.suggested_fixes[0];
    assert!(fix.auto_fixable);
    assert_eq!(fix.replacement.as_deref(), Some(""));

    // Applying the removal fix deletes the import line.
    let patches: Vec<CodePatch> = analysis
        .suggested_fixes
        .into_iter()
        .filter_map(|f| f.into_patch())
        .collect();
    assert!(analyzer.apply_patches(patches).success);
    assert_eq!(read(dir.path(), "src/main.ts"), "helper();\n");
}
