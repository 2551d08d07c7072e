//! Seed-status command implementation

use anyhow::{Context, Result};

use crate::cli::{GlobalArgs, StatusArgs};
use crate::commands::output::print_seeds;
use crate::context::RuntimeContext;

pub async fn execute(args: &StatusArgs, global: &GlobalArgs) -> Result<()> {
    let ctx = RuntimeContext::new(global).await?;
    let status = ctx
        .seeds()
        .status()
        .await
        .context("Failed to read seed status")?;
    print_seeds(&status, args.output)
}
