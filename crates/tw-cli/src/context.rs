//! Runtime context for CLI commands

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tw_core::Config;
use tw_db::{Database, DuckDbBackend};
use tw_migrate::{MigrationLoader, MigrationRunner};

use crate::cli::GlobalArgs;

/// Runtime context containing loaded config and database connection
pub struct RuntimeContext {
    /// The loaded project configuration
    pub config: Config,

    /// Project root directory
    pub root: PathBuf,

    /// Database connection
    pub db: Arc<dyn Database>,

    /// Verbose output enabled
    pub verbose: bool,
}

impl RuntimeContext {
    /// Create a new runtime context from global arguments
    pub async fn new(args: &GlobalArgs) -> Result<Self> {
        let root = PathBuf::from(&args.project_dir);

        // Load config from custom path or project directory
        let config = if let Some(config_path) = &args.config {
            Config::load(Path::new(config_path)).context("Failed to load configuration file")?
        } else {
            Config::load_from_dir(&root).context("Failed to load project configuration")?
        };

        // Resolve the database path through the selected target
        let target = Config::resolve_target(args.target.as_deref());
        let db_config = config
            .get_database_config(target.as_deref())
            .context("Failed to resolve database target")?;
        let db_path = if db_config.path == ":memory:" || Path::new(&db_config.path).is_absolute() {
            PathBuf::from(&db_config.path)
        } else {
            root.join(&db_config.path)
        };

        let db: Arc<dyn Database> = Arc::new(
            DuckDbBackend::new(&db_path.to_string_lossy())
                .context("Failed to connect to database")?,
        );
        log::debug!("Connected to database at {}", db_path.display());

        Ok(Self {
            config,
            root,
            db,
            verbose: args.verbose,
        })
    }

    /// Print verbose output if enabled
    pub fn verbose(&self, msg: &str) {
        if self.verbose {
            eprintln!("[verbose] {}", msg);
        }
    }

    /// Build a migration runner over this context's database and config
    pub fn runner(&self) -> MigrationRunner {
        MigrationRunner::new(
            self.db.clone(),
            MigrationLoader::new(self.config.migrations_path_absolute(&self.root)),
            self.config.dangerous_statements.clone(),
        )
    }
}
