//! Up command implementation

use anyhow::{Context, Result};

use crate::cli::GlobalArgs;
use crate::context::RuntimeContext;

/// Apply all pending migrations
pub async fn execute(global: &GlobalArgs) -> Result<()> {
    let ctx = RuntimeContext::new(global).await?;
    let report = ctx
        .migrations()
        .up()
        .await
        .context("Migration run failed")?;
    if !report.is_empty() {
        println!("Applied {} migration(s)", report.len());
    }
    Ok(())
}
