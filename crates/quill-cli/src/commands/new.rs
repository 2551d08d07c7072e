//! New command implementation

use anyhow::{Context, Result};

use crate::cli::{GlobalArgs, NewArgs};
use crate::context::Settings;

/// Scaffold an up/down migration pair; no database connection is opened
pub async fn execute(args: &NewArgs, global: &GlobalArgs) -> Result<()> {
    let settings = Settings::resolve(global)?;
    let created = quill_migrate::new_migration(&settings.migrations_dir, &args.name)
        .context("Failed to create migration")?;
    println!("{}", created.up_path.display());
    println!("{}", created.down_path.display());
    Ok(())
}
