//! Health command implementation

use anyhow::{Context, Result};
use chrono::Utc;
use tw_health::calculate_health;

use crate::cli::{GlobalArgs, HealthArgs, OutputFormat};
use crate::context::RuntimeContext;

/// Execute the health command
pub(crate) async fn execute(args: &HealthArgs, global: &GlobalArgs) -> Result<()> {
    let ctx = RuntimeContext::new(global).await?;

    ctx.verbose(&format!("Scoring project {}", args.project_id));

    let health = calculate_health(ctx.db.as_ref(), &args.project_id, Utc::now())
        .await
        .with_context(|| format!("Failed to score project '{}'", args.project_id))?;

    match args.output {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&health).context("Failed to serialize to JSON")?
            );
        }
        OutputFormat::Table => {
            println!("Project health: {}\n", args.project_id);
            println!("  Overall   {:>3}", health.overall);
            println!("  Timeline  {:>3}", health.timeline);
            println!("  Quality   {:>3}", health.quality);
            println!("  Risk      {:>3}", health.risk);
            println!();
            println!("Components:");
            println!(
                "  Milestones on track   {}",
                if health.components.milestones_on_track {
                    "yes"
                } else {
                    "no"
                }
            );
            println!("  Output quality        {:>3}", health.components.output_quality);
            println!("  Meeting frequency     {:>3}", health.components.meeting_frequency);
            println!(
                "  Resource utilization  {:>3}",
                health.components.resource_utilization
            );
            println!("  Feedback score        {:>3}", health.components.feedback_score);
        }
    }

    Ok(())
}
