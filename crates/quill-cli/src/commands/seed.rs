//! Seed command implementation

use anyhow::{Context, Result};

use crate::cli::GlobalArgs;
use crate::context::RuntimeContext;

/// Apply every seed that has not been applied yet
pub async fn execute(global: &GlobalArgs) -> Result<()> {
    let ctx = RuntimeContext::new(global).await?;
    let report = ctx.seeds().apply().await.context("Seed run failed")?;
    if !report.is_empty() {
        println!("Applied {} seed(s)", report.len());
    }
    Ok(())
}
