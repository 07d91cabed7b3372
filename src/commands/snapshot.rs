use crate::cli::SnapshotArgs;
use crate::style;

use super::CommandContext;

pub fn cmd_snapshot(args: SnapshotArgs) -> i32 {
    let mut ctx = match CommandContext::new(&args.path) {
        Ok(ctx) => ctx,
        Err(code) => return code,
    };

    ctx.analyzer.analyze_project();
    let snapshot = match ctx.analyzer.snapshot() {
        Ok(snapshot) => snapshot,
        Err(e) => {
            style::error(&format!("{}", e));
            return 1;
        }
    };

    let json = match snapshot.to_json() {
        Ok(json) => json,
        Err(e) => {
            style::error(&format!("Failed to serialize snapshot: {}", e));
            return 1;
        }
    };

    if let Err(e) = std::fs::write(&args.save, json) {
        style::error(&format!("Failed to save snapshot: {}", e));
        return 1;
    }

    style::success(&format!("Snapshot saved to: {}", style::path(&args.save)));
    style::section("Summary");
    println!("{}", style::metric("Files", snapshot.nodes.len()));
    println!("{}", style::metric("Edges", snapshot.edges.len()));
    println!("{}", style::metric("Issues", snapshot.issues.len()));
    println!(
        "{}",
        style::metric("Coherence score", snapshot.coherence_score)
    );

    0
}
