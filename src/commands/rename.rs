use crate::cli::RenameArgs;
use crate::style;

use super::CommandContext;

pub fn cmd_rename(args: RenameArgs) -> i32 {
    let mut ctx = match CommandContext::new(&args.path) {
        Ok(ctx) => ctx,
        Err(code) => return code,
    };

    ctx.analyzer.analyze_project();

    let patches = match ctx
        .analyzer
        .generate_rename_patches(&args.node, &args.old_name, &args.new_name)
    {
        Ok(patches) => patches,
        Err(e) => {
            style::error(&format!("{}", e));
            return 1;
        }
    };

    if patches.is_empty() {
        style::success(&format!(
            "No dependents reference '{}'; nothing to patch",
            args.old_name
        ));
        return 0;
    }

    if !args.apply {
        style::section(&format!("{} patch(es) drafted (use --apply to write)", patches.len()));
        for patch in &patches {
            println!("  {}:{} {}", patch.file, patch.line, patch.description);
        }
        return 0;
    }

    let result = ctx.analyzer.apply_patches(patches);
    for file in &result.modified_files {
        println!("  modified {}", file);
    }
    for error in &result.errors {
        style::warning(error);
    }

    if result.success {
        style::success(&format!("Applied {} patch(es)", result.applied.len()));
        0
    } else {
        style::error(&format!(
            "{} patch(es) applied, {} failed",
            result.applied.len(),
            result.failed.len()
        ));
        1
    }
}
