//! Seed-new command implementation

use anyhow::{Context, Result};

use crate::cli::{GlobalArgs, NewArgs};
use crate::context::Settings;

/// Scaffold a seed file; no database connection is opened
pub async fn execute(args: &NewArgs, global: &GlobalArgs) -> Result<()> {
    let settings = Settings::resolve(global)?;
    let path = quill_migrate::new_seed(&settings.seeds_dir, &args.name)
        .context("Failed to create seed")?;
    println!("{}", path.display());
    Ok(())
}
