use anyhow::{Context, Result};
use tracing::info;

use avi::{cli, logging, ops};

fn main() -> Result<()> {
    let args = cli::parse();
    logging::init_logging_with_format(args.log_format);
    let options = args.options();

    let plan = match &args.target {
        None => ops::patch_in_place(&args.file, &options)
            .with_context(|| format!("failed to patch {}", args.file.display()))?,
        Some(target) => ops::patch_copy(&args.file, target, &options).with_context(|| {
            format!(
                "failed to patch {} into {}",
                args.file.display(),
                target.display()
            )
        })?,
    };

    if options.dry_run {
        info!(
            would_patch = plan.patches.len(),
            "dry run, no bytes written"
        );
    }
    Ok(())
}
