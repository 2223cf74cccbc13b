//! Migrate command implementation

use anyhow::{Context, Result};
use tw_migrate::MigrateOptions;

use crate::cli::{GlobalArgs, MigrateArgs};
use crate::context::RuntimeContext;

/// Execute the migrate command
pub(crate) async fn execute(args: &MigrateArgs, global: &GlobalArgs) -> Result<()> {
    let ctx = RuntimeContext::new(global).await?;
    let runner = ctx.runner();

    let options = MigrateOptions {
        dry_run: args.dry_run,
        force: args.force,
    };

    ctx.verbose(&format!(
        "Applying migrations from {}",
        ctx.config.migrations_path_absolute(&ctx.root).display()
    ));

    let applied = runner
        .migrate(&options)
        .await
        .context("Migration run failed")?;

    if applied.is_empty() {
        println!("Nothing to migrate - schema is up to date");
        return Ok(());
    }

    for migration in &applied {
        if args.dry_run {
            println!("Would apply {} ({})", migration.version, migration.filename);
        } else {
            println!("Applied {} ({})", migration.version, migration.filename);
        }
    }

    println!();
    if args.dry_run {
        println!(
            "Dry run complete: {} migration(s) validated, no changes made",
            applied.len()
        );
    } else {
        println!("Applied {} migration(s)", applied.len());
    }

    Ok(())
}
