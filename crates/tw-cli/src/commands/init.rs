//! Init command implementation - scaffolds a new Trackway project

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::cli::InitArgs;

/// Execute the init command
pub(crate) async fn execute(args: &InitArgs) -> Result<()> {
    // Reject names that could cause path traversal or confusing directory names
    if args.name.contains('/')
        || args.name.contains('\\')
        || args.name.contains("..")
        || args.name.starts_with('.')
        || args.name.starts_with('-')
    {
        anyhow::bail!(
            "Invalid project name '{}': must not contain '/', '\\', '..', or start with '.' or '-'",
            args.name
        );
    }

    let project_dir = Path::new(&args.name);

    if project_dir.exists() {
        anyhow::bail!(
            "Directory '{}' already exists. Choose a different project name.",
            args.name
        );
    }

    println!("Creating new Trackway project: {}\n", args.name);

    fs::create_dir_all(project_dir.join("migrations"))
        .with_context(|| format!("Failed to create directory: {}", project_dir.display()))?;

    // Generate trackway.yml
    // Escape YAML special characters in interpolated values
    let safe_name = args.name.replace('"', "\\\"");
    let safe_db_path = args.database_path.replace('"', "\\\"");
    let config_content = format!(
        r#"name: "{name}"
version: "1.0.0"

migrations_path: "migrations"

database:
  path: "{db_path}"

targets:
  dev:
    database:
      path: "dev.duckdb"

dangerous_statements:
  - "DROP DATABASE"
  - "TRUNCATE"
  - "DELETE FROM"
"#,
        name = safe_name,
        db_path = safe_db_path,
    );
    fs::write(project_dir.join("trackway.yml"), config_content)
        .context("Failed to write trackway.yml")?;

    // Generate the initial migration with the project-tracking schema
    let init_sql = r#"-- Initial project-tracking schema
CREATE TABLE projects (
    project_id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    start_date TIMESTAMP NOT NULL,
    due_date TIMESTAMP NOT NULL
);

CREATE TABLE milestones (
    project_id TEXT NOT NULL,
    title TEXT NOT NULL,
    status TEXT NOT NULL DEFAULT 'pending'
);

CREATE TABLE outputs (
    project_id TEXT NOT NULL,
    title TEXT,
    time_allocated DOUBLE
);

CREATE TABLE meetings (
    project_id TEXT NOT NULL,
    date_time TIMESTAMP NOT NULL
);

CREATE TABLE resources (
    project_id TEXT NOT NULL,
    name TEXT,
    usage_count INTEGER DEFAULT 0
);

CREATE TABLE feedback (
    project_id TEXT NOT NULL,
    rating INTEGER NOT NULL
);

-- Rollback
DROP TABLE feedback;
DROP TABLE resources;
DROP TABLE meetings;
DROP TABLE outputs;
DROP TABLE milestones;
DROP TABLE projects;
"#;
    fs::write(project_dir.join("migrations/1.0.0_init.sql"), init_sql)
        .context("Failed to write initial migration")?;

    // Generate .gitignore
    let gitignore = "*.duckdb\n*.duckdb.wal\n";
    fs::write(project_dir.join(".gitignore"), gitignore).context("Failed to write .gitignore")?;

    println!("  Created trackway.yml");
    println!("  Created migrations/1.0.0_init.sql");
    println!("  Created .gitignore");
    println!();
    println!("Project '{}' initialized successfully!", args.name);
    println!();
    println!("Next steps:");
    println!("  cd {}", args.name);
    println!("  tw status      # Show pending migrations");
    println!("  tw migrate     # Apply them");

    Ok(())
}
