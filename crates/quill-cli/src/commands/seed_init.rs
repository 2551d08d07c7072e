//! Seed-init command implementation

use anyhow::{Context, Result};

use crate::cli::GlobalArgs;
use crate::context::RuntimeContext;

pub async fn execute(global: &GlobalArgs) -> Result<()> {
    let ctx = RuntimeContext::new(global).await?;
    ctx.seeds()
        .init()
        .await
        .context("Failed to initialize seeds")?;
    println!("Initialized {}", ctx.settings.seeds_dir.display());
    Ok(())
}
