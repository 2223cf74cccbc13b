//! Status command implementation

use anyhow::{Context, Result};
use serde_json::json;
use tw_migrate::{Drift, DriftReport};

use crate::cli::{GlobalArgs, OutputFormat, StatusArgs};
use crate::context::RuntimeContext;

/// Execute the status command
pub(crate) async fn execute(args: &StatusArgs, global: &GlobalArgs) -> Result<()> {
    let ctx = RuntimeContext::new(global).await?;
    let runner = ctx.runner();

    ctx.verbose(&format!(
        "Reading migration status from {}",
        ctx.config.migrations_path_absolute(&ctx.root).display()
    ));

    let status = runner.status().await.context("Failed to read migration status")?;
    let drift = if args.verify {
        Some(
            runner
                .detect_drift()
                .await
                .context("Failed to verify applied migrations")?,
        )
    } else {
        None
    };

    match args.output {
        OutputFormat::Json => {
            let payload = match &drift {
                Some(reports) => json!({ "status": status, "drift": reports }),
                None => json!({ "status": status }),
            };
            println!(
                "{}",
                serde_json::to_string_pretty(&payload).context("Failed to serialize to JSON")?
            );
        }
        OutputFormat::Table => {
            println!("Current version: {}", status.current);
            match &status.last_run {
                Some(ts) => println!("Last run:        {}", ts.format("%Y-%m-%d %H:%M:%S UTC")),
                None => println!("Last run:        never"),
            }
            println!();

            if status.applied.is_empty() {
                println!("No applied migrations");
            } else {
                println!("Applied migrations:");
                for m in &status.applied {
                    println!(
                        "  {:<10} {:<30} {}",
                        m.version,
                        m.filename,
                        m.applied_at.format("%Y-%m-%d %H:%M:%S UTC")
                    );
                }
            }
            println!();

            if status.pending.is_empty() {
                println!("No pending migrations");
            } else {
                println!("Pending migrations:");
                for m in &status.pending {
                    println!("  {:<10} {}", m.version, m.filename);
                }
            }

            if let Some(reports) = &drift {
                println!();
                if reports.is_empty() {
                    println!("Verify: applied migrations match the files on disk");
                } else {
                    for report in reports {
                        println!("Warning: {}", describe_drift(report));
                    }
                }
            }
        }
    }

    Ok(())
}

fn describe_drift(report: &DriftReport) -> String {
    match &report.drift {
        Drift::ChecksumMismatch { .. } => format!(
            "migration {} ({}) was edited after being applied",
            report.version, report.filename
        ),
        Drift::FileMissing => format!(
            "migration {} ({}) is recorded as applied but missing on disk",
            report.version, report.filename
        ),
    }
}
