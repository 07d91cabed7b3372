use crate::cli::{ImpactArgs, OutputFormat};
use crate::model::NodeChange;
use crate::style;

use super::CommandContext;

pub fn cmd_impact(args: ImpactArgs) -> i32 {
    let mut ctx = match CommandContext::new(&args.path) {
        Ok(ctx) => ctx,
        Err(code) => return code,
    };

    ctx.analyzer.analyze_project();

    let change = NodeChange {
        node_id: args.node.clone(),
        kind: args.kind.into(),
        symbol: args.symbol.clone(),
        before: args.before.clone(),
        after: args.after.clone(),
    };

    let analysis = match ctx.analyzer.analyze_impact(&change) {
        Ok(analysis) => analysis,
        Err(e) => {
            style::error(&format!("{}", e));
            style::hint("Node ids are derived from relative paths, e.g. src_components_Button_tsx");
            return 1;
        }
    };

    if args.format == OutputFormat::Json {
        match serde_json::to_string_pretty(&analysis) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                style::error(&format!("Failed to serialize impact analysis: {}", e));
                return 1;
            }
        }
        return 0;
    }

    style::section(&format!("Impact of changing {}", args.node));
    println!("{}", style::metric("Risk", style::risk(analysis.risk)));
    println!("{}", style::metric("Direct dependents", analysis.direct.len()));
    println!("{}", style::metric("Transitive", analysis.transitive.len()));
    println!(
        "{}",
        style::metric("Breaking changes", analysis.breaking_changes.len())
    );

    if !analysis.direct.is_empty() {
        style::section("Directly affected");
        for file in &analysis.direct {
            println!("  {} ({})", file.path, file.reason);
        }
    }

    if !analysis.breaking_changes.is_empty() {
        style::section("Breaking");
        for change in &analysis.breaking_changes {
            println!("  {}:{} {}", change.path, change.line, change.reason);
        }
    }

    if !analysis.suggested_fixes.is_empty() {
        style::section("Suggested fixes");
        for fix in &analysis.suggested_fixes {
            let marker = if fix.auto_fixable { "auto" } else { "manual" };
            println!("  {}:{} [{}] {}", fix.path, fix.line, marker, fix.description);
        }
    }

    0
}
