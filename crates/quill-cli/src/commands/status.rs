//! Status command implementation

use anyhow::{Context, Result};

use crate::cli::{GlobalArgs, StatusArgs};
use crate::commands::output::print_migrations;
use crate::context::RuntimeContext;

/// Show every discovered migration with its state
pub async fn execute(args: &StatusArgs, global: &GlobalArgs) -> Result<()> {
    let ctx = RuntimeContext::new(global).await?;
    let status = ctx
        .migrations()
        .status()
        .await
        .context("Failed to read migration status")?;
    print_migrations(&status, args.output)
}
