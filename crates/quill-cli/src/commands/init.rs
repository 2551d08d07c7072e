//! Init command implementation

use anyhow::{Context, Result};

use crate::cli::GlobalArgs;
use crate::context::RuntimeContext;

/// Create both directories and both tracking tables
pub async fn execute(global: &GlobalArgs) -> Result<()> {
    let ctx = RuntimeContext::new(global).await?;
    ctx.migrations()
        .init()
        .await
        .context("Failed to initialize migrations")?;
    ctx.seeds()
        .init()
        .await
        .context("Failed to initialize seeds")?;
    println!(
        "Initialized {} and {}",
        ctx.settings.migrations_dir.display(),
        ctx.settings.seeds_dir.display()
    );
    Ok(())
}
