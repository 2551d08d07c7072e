//! Down command implementation

use anyhow::{Context, Result};

use crate::cli::{DownArgs, GlobalArgs};
use crate::context::RuntimeContext;

/// Revert the last `--steps` applied migrations
pub async fn execute(args: &DownArgs, global: &GlobalArgs) -> Result<()> {
    // Validate before connecting so a bad count never touches the database.
    let steps = quill_migrate::parse_steps(args.steps)?;
    let ctx = RuntimeContext::new(global).await?;
    let report = ctx
        .migrations()
        .down(steps)
        .await
        .context("Migration revert failed")?;
    if !report.is_empty() {
        println!("Reverted {} migration(s)", report.len());
    }
    Ok(())
}
