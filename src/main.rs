use clap::Parser;
use depmap::cli::{AnalyzeArgs, Cli, Command};
use depmap::{cmd_analyze, cmd_impact, cmd_init, cmd_rename, cmd_snapshot};

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let exit_code = match cli.command {
        Some(Command::Analyze(args)) => cmd_analyze(args),
        Some(Command::Impact(args)) => cmd_impact(args),
        Some(Command::Rename(args)) => cmd_rename(args),
        Some(Command::Snapshot(args)) => cmd_snapshot(args),
        Some(Command::Init(args)) => cmd_init(args),
        None => {
            // Bare `depmap <path>` behaves like `depmap analyze <path>`
            let args = AnalyzeArgs {
                path: cli.path,
                ..Default::default()
            };
            cmd_analyze(args)
        }
    };

    std::process::exit(exit_code);
}
