use crate::cli::{AnalyzeArgs, OutputFormat};
use crate::model::GraphData;
use crate::style;

use super::CommandContext;

pub fn cmd_analyze(args: AnalyzeArgs) -> i32 {
    let mut ctx = match CommandContext::new(&args.path) {
        Ok(ctx) => ctx,
        Err(code) => return code,
    };

    let data = ctx.analyzer.analyze_project();

    match args.format {
        OutputFormat::Json => {
            let json = match serde_json::to_string_pretty(&data) {
                Ok(json) => json,
                Err(e) => {
                    style::error(&format!("Failed to serialize analysis: {}", e));
                    return 1;
                }
            };
            write_or_print(&args, &json)
        }
        OutputFormat::Text => {
            if let Some(output_path) = &args.output {
                let text = render_text(data, &args);
                if let Err(e) = std::fs::write(output_path, text) {
                    style::error(&format!("Could not write output file: {}", e));
                    return 1;
                }
                return 0;
            }
            print_summary(data, &args);
            0
        }
    }
}

fn write_or_print(args: &AnalyzeArgs, content: &str) -> i32 {
    match &args.output {
        Some(output_path) => {
            if let Err(e) = std::fs::write(output_path, content) {
                style::error(&format!("Could not write output file: {}", e));
                return 1;
            }
            0
        }
        None => {
            println!("{}", content);
            0
        }
    }
}

fn print_summary(data: &GraphData, args: &AnalyzeArgs) {
    style::section("Project");
    println!("{}", style::metric("Files", data.metadata.file_count));
    println!("{}", style::metric("Edges", data.metadata.edge_count));
    println!("{}", style::metric("Lines", data.metadata.total_lines));
    println!("{}", style::metric("Groups", data.groups.len()));
    println!(
        "{}",
        style::metric("Coherence score", data.metadata.coherence_score)
    );

    let reported: Vec<_> = data
        .metadata
        .issues
        .iter()
        .filter(|i| i.severity >= args.min_severity)
        .collect();

    if reported.is_empty() {
        style::success("No issues at or above the requested severity");
        return;
    }

    style::section(&format!("Issues ({})", reported.len()));
    for issue in reported {
        println!("{} {}", style::severity(issue.severity), issue.message);
        if let Some(suggestion) = &issue.suggestion {
            style::hint(suggestion);
        }
    }
}

fn render_text(data: &GraphData, args: &AnalyzeArgs) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "files: {}\nedges: {}\nlines: {}\ncoherence score: {}\n",
        data.metadata.file_count,
        data.metadata.edge_count,
        data.metadata.total_lines,
        data.metadata.coherence_score
    ));
    for issue in &data.metadata.issues {
        if issue.severity >= args.min_severity {
            out.push_str(&format!("[{}] {}\n", issue.severity, issue.message));
        }
    }
    out
}
