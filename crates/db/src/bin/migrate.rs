//! starter-migrate - apply, revert, inspect and scaffold schema migrations.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use starter_db::{migrations, DbPool, PoolSettings};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "starter-migrate", version, about = "Manage database schema migrations")]
struct Cli {
    /// PostgreSQL connection URL. Falls back to `DATABASE_URL` (and `.env`).
    #[arg(long, env = "DATABASE_URL", global = true, hide_env_values = true)]
    database_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Apply every pending migration
    Up,
    /// Revert the latest migration, or every migration above `--target`
    Down {
        /// Keep migrations up to and including this version (0 reverts all)
        #[arg(long)]
        target: Option<i64>,
    },
    /// List migrations with their applied state
    Status,
    /// Create an empty up/down migration pair
    New {
        /// Short description, turned into the file name
        description: String,
        /// Directory holding the migration scripts
        #[arg(long, default_value = "db/migrations")]
        dir: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,sqlx=warn")),
        )
        .init();

    let cli = Cli::parse();

    if let Command::New { description, dir } = &cli.command {
        let (up, down) = migrations::write_migration_pair(dir, description, chrono::Utc::now())
            .with_context(|| format!("Failed to create migration in {}", dir.display()))?;
        println!("Created {}", up.display());
        println!("Created {}", down.display());
        return Ok(());
    }

    let database_url = cli
        .database_url
        .context("DATABASE_URL must be set (flag, environment or .env)")?;
    let settings = PoolSettings {
        max_connections: 1,
        acquire_timeout: Duration::from_secs(10),
        log_statements: false,
    };
    let pool = starter_db::create_pool(&database_url, &settings)
        .await
        .context("Failed to connect to database")?;

    let result = run_database_command(&pool, cli.command).await;
    pool.close().await;
    result
}

async fn run_database_command(pool: &DbPool, command: Command) -> Result<()> {
    match command {
        Command::Up => {
            migrations::run_migrations(pool)
                .await
                .context("Failed to apply migrations")?;
            tracing::info!("Database is up to date");
        }
        Command::Down { target: Some(target) } => {
            migrations::revert_migrations(pool, target)
                .await
                .context("Failed to revert migrations")?;
            tracing::info!(target, "Reverted migrations above target");
        }
        Command::Down { target: None } => {
            match migrations::revert_latest(pool)
                .await
                .context("Failed to revert migration")?
            {
                Some(version) => println!("Reverted {version}"),
                None => println!("No applied migrations to revert"),
            }
        }
        Command::Status => {
            let records = migrations::migration_status(pool)
                .await
                .context("Failed to read migration history")?;
            for record in records {
                let state = match record.installed_on {
                    Some(at) => format!("applied {}", at.format("%Y-%m-%d %H:%M:%S UTC")),
                    None => "pending".to_string(),
                };
                println!("{:>14}  {:<40}  {state}", record.version, record.description);
            }
        }
        Command::New { .. } => {}
    }
    Ok(())
}
