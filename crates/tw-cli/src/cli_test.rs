use super::*;
use clap::CommandFactory;

#[test]
fn verify_cli_args() {
    // Validates the entire command tree: short flag conflicts,
    // duplicate args, and other clap definition errors.
    Cli::command().debug_assert();
}

#[test]
fn test_parse_migrate_flags() {
    let cli = Cli::parse_from(["tw", "migrate", "--dry-run", "--force"]);
    match cli.command {
        Commands::Migrate(args) => {
            assert!(args.dry_run);
            assert!(args.force);
        }
        other => panic!("expected migrate, got {:?}", other),
    }
}

#[test]
fn test_parse_rollback_target() {
    let cli = Cli::parse_from(["tw", "rollback", "--to", "1.0.0"]);
    match cli.command {
        Commands::Rollback(args) => assert_eq!(args.to.as_deref(), Some("1.0.0")),
        other => panic!("expected rollback, got {:?}", other),
    }
}

#[test]
fn test_parse_global_args_after_subcommand() {
    let cli = Cli::parse_from(["tw", "status", "--verify", "-p", "proj", "-t", "prod"]);
    assert_eq!(cli.global.project_dir, "proj");
    assert_eq!(cli.global.target.as_deref(), Some("prod"));
    match cli.command {
        Commands::Status(args) => {
            assert!(args.verify);
            assert_eq!(args.output, OutputFormat::Table);
        }
        other => panic!("expected status, got {:?}", other),
    }
}

#[test]
fn test_parse_health_output_format() {
    let cli = Cli::parse_from(["tw", "health", "p1", "--output", "json"]);
    match cli.command {
        Commands::Health(args) => {
            assert_eq!(args.project_id, "p1");
            assert_eq!(args.output, OutputFormat::Json);
        }
        other => panic!("expected health, got {:?}", other),
    }
}
