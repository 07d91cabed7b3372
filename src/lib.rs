pub mod analysis;
pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod fs;
pub mod graph;
pub mod impact;
pub mod lexer;
pub mod model;
pub mod patch;
pub mod scanner;
pub mod style;

pub use api::{DepmapError, ProjectAnalyzer};
pub use cli::Cli;
pub use commands::{cmd_analyze, cmd_impact, cmd_init, cmd_rename, cmd_snapshot};
pub use config::Config;
pub use model::{
    ChangeKind, CodePatch, GraphData, GraphSnapshot, ImpactAnalysis, NodeChange,
    PropagationResult, RiskLevel,
};
pub use patch::PatchEngine;
