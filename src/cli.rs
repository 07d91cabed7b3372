use crate::model::{ChangeKind, Severity};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "depmap")]
#[command(about = "Dependency graph analysis and change propagation for TS/JS codebases")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path to analyze (defaults to current directory)
    /// Used when no subcommand is specified
    #[arg(default_value = ".")]
    pub path: PathBuf,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Run full project analysis (default behavior)
    Analyze(AnalyzeArgs),

    /// Predict the impact of a change to one file
    Impact(ImpactArgs),

    /// Generate rename patches across dependents, optionally applying them
    Rename(RenameArgs),

    /// Save a graph snapshot as JSON
    Snapshot(SnapshotArgs),

    /// Generate a starter .depmap.toml configuration file
    Init(InitArgs),
}

#[derive(Parser, Debug, Clone)]
pub struct AnalyzeArgs {
    /// Path to analyze (defaults to current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Minimum issue severity to report
    #[arg(long, default_value = "info")]
    pub min_severity: Severity,
}

impl Default for AnalyzeArgs {
    fn default() -> Self {
        Self {
            path: PathBuf::from("."),
            format: OutputFormat::Text,
            output: None,
            min_severity: Severity::Info,
        }
    }
}

#[derive(Parser, Debug, Clone)]
pub struct ImpactArgs {
    /// Node id of the file being changed (e.g. src_components_Button_tsx)
    pub node: String,

    /// Project path (defaults to current directory)
    #[arg(long, default_value = ".")]
    pub path: PathBuf,

    /// Kind of change being proposed
    #[arg(short, long, default_value = "rename")]
    pub kind: ChangeKindArg,

    /// Symbol the change concerns (field name, deleted export)
    #[arg(long)]
    pub symbol: Option<String>,

    /// Old value (name being renamed, old type)
    #[arg(long)]
    pub before: Option<String>,

    /// New value (new name, new type, added field's type)
    #[arg(long)]
    pub after: Option<String>,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Parser, Debug, Clone)]
pub struct RenameArgs {
    /// Node id of the file whose export is being renamed
    pub node: String,

    /// Current symbol name
    pub old_name: String,

    /// New symbol name
    pub new_name: String,

    /// Project path (defaults to current directory)
    #[arg(long, default_value = ".")]
    pub path: PathBuf,

    /// Apply the generated patches instead of just listing them
    #[arg(long)]
    pub apply: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct SnapshotArgs {
    /// Save snapshot to this file
    #[arg(long)]
    pub save: PathBuf,

    /// Path to analyze (defaults to current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,
}

#[derive(Parser, Debug, Clone)]
pub struct InitArgs {
    /// Where to create .depmap.toml (defaults to current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
pub enum ChangeKindArg {
    #[default]
    Rename,
    AddField,
    RemoveField,
    ChangeType,
    Delete,
    Move,
}

impl From<ChangeKindArg> for ChangeKind {
    fn from(kind: ChangeKindArg) -> Self {
        match kind {
            ChangeKindArg::Rename => ChangeKind::Rename,
            ChangeKindArg::AddField => ChangeKind::AddField,
            ChangeKindArg::RemoveField => ChangeKind::RemoveField,
            ChangeKindArg::ChangeType => ChangeKind::ChangeType,
            ChangeKindArg::Delete => ChangeKind::Delete,
            ChangeKindArg::Move => ChangeKind::Move,
        }
    }
}
