//! Rollback command implementation

use anyhow::{Context, Result};
use tw_core::MigrationVersion;

use crate::cli::{GlobalArgs, RollbackArgs};
use crate::context::RuntimeContext;

/// Execute the rollback command
pub(crate) async fn execute(args: &RollbackArgs, global: &GlobalArgs) -> Result<()> {
    let ctx = RuntimeContext::new(global).await?;
    let runner = ctx.runner();

    let target = args
        .to
        .as_deref()
        .map(MigrationVersion::parse)
        .transpose()
        .context("Invalid rollback target version")?;

    if let Some(target) = &target {
        ctx.verbose(&format!("Rolling back to version {}", target));
    } else {
        ctx.verbose("Rolling back the most recent migration");
    }

    let undone = runner
        .rollback(target.as_ref())
        .await
        .context("Rollback failed")?;

    if undone.is_empty() {
        println!("Nothing to roll back");
        return Ok(());
    }

    for migration in &undone {
        println!("Rolled back {} ({})", migration.version, migration.filename);
    }
    println!();
    println!("Rolled back {} migration(s)", undone.len());

    Ok(())
}
