mod analyze;
mod impact;
mod init;
mod rename;
mod snapshot;

pub use analyze::cmd_analyze;
pub use impact::cmd_impact;
pub use init::cmd_init;
pub use rename::cmd_rename;
pub use snapshot::cmd_snapshot;

use crate::api::ProjectAnalyzer;
use crate::style;
use std::path::Path;

/// Shared context for command execution, reducing boilerplate across commands.
pub struct CommandContext {
    pub analyzer: ProjectAnalyzer,
}

impl CommandContext {
    /// Bind an analyzer to the given root. Returns Err(exit_code) if setup
    /// fails.
    pub fn new(path: &Path) -> Result<Self, i32> {
        match ProjectAnalyzer::new(path) {
            Ok(analyzer) => Ok(Self { analyzer }),
            Err(e) => {
                style::error(&format!("{}", e));
                style::hint(&format!(
                    "Check that {} exists and is readable",
                    style::path(path)
                ));
                Err(1)
            }
        }
    }
}
