//! Versioned, reversible schema migrations.
//!
//! Scripts live in `db/migrations/` at the repository root as
//! `<version>_<description>.up.sql` / `.down.sql` pairs and are embedded at
//! compile time. Applied versions are recorded in `_sqlx_migrations`;
//! applying an already-recorded version is a no-op.

use std::collections::HashMap;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use sqlx::migrate::{MigrateError, Migrator};
use starter_core::types::Timestamp;

use crate::DbPool;

pub static MIGRATOR: Migrator = sqlx::migrate!("../../db/migrations");

/// One known migration and whether it has been applied.
#[derive(Debug, Clone, PartialEq)]
pub struct MigrationRecord {
    pub version: i64,
    pub description: String,
    /// `None` while the migration is pending.
    pub installed_on: Option<Timestamp>,
}

impl MigrationRecord {
    pub fn is_applied(&self) -> bool {
        self.installed_on.is_some()
    }
}

/// Apply every pending migration in version order.
pub async fn run_migrations(pool: &DbPool) -> Result<(), MigrateError> {
    MIGRATOR.run(pool).await
}

/// Revert every applied migration whose version is greater than `target`.
///
/// `target = 0` reverts everything.
pub async fn revert_migrations(pool: &DbPool, target: i64) -> Result<(), MigrateError> {
    MIGRATOR.undo(pool, target).await
}

/// Revert only the most recently applied migration.
///
/// Returns the reverted version, or `None` when nothing was applied.
pub async fn revert_latest(pool: &DbPool) -> Result<Option<i64>, MigrateError> {
    let applied: Vec<i64> = migration_status(pool)
        .await?
        .into_iter()
        .filter(MigrationRecord::is_applied)
        .map(|m| m.version)
        .collect();

    let Some((&latest, rest)) = applied.split_last() else {
        return Ok(None);
    };
    let target = rest.last().copied().unwrap_or(0);

    revert_migrations(pool, target).await?;
    tracing::info!(version = latest, target, "Reverted migration");
    Ok(Some(latest))
}

/// List every embedded migration with its applied timestamp, if any.
pub async fn migration_status(pool: &DbPool) -> Result<Vec<MigrationRecord>, sqlx::Error> {
    let table: Option<String> = sqlx::query_scalar("SELECT to_regclass('_sqlx_migrations')::text")
        .fetch_one(pool)
        .await?;

    let applied: HashMap<i64, Timestamp> = if table.is_some() {
        sqlx::query_as::<_, (i64, Timestamp)>(
            "SELECT version, installed_on FROM _sqlx_migrations WHERE success ORDER BY version",
        )
        .fetch_all(pool)
        .await?
        .into_iter()
        .collect()
    } else {
        HashMap::new()
    };

    Ok(MIGRATOR
        .iter()
        .filter(|m| m.migration_type.is_up_migration())
        .map(|m| MigrationRecord {
            version: m.version,
            description: m.description.to_string(),
            installed_on: applied.get(&m.version).copied(),
        })
        .collect())
}

/// Write an empty `up`/`down` script pair into `dir`, versioned by `now`.
///
/// The description is reduced to lowercase snake_case. Existing files are
/// never overwritten.
pub fn write_migration_pair(
    dir: &Path,
    description: &str,
    now: Timestamp,
) -> io::Result<(PathBuf, PathBuf)> {
    let slug = slugify(description);
    if slug.is_empty() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "migration description must contain at least one letter or digit",
        ));
    }

    let version = now.format("%Y%m%d%H%M%S");
    let up = dir.join(format!("{version}_{slug}.up.sql"));
    let down = dir.join(format!("{version}_{slug}.down.sql"));

    std::fs::create_dir_all(dir)?;
    write_new(&up, "-- Add up migration script here\n")?;
    write_new(&down, "-- Add down migration script here\n")?;
    Ok((up, down))
}

fn write_new(path: &Path, contents: &str) -> io::Result<()> {
    let mut file = OpenOptions::new().write(true).create_new(true).open(path)?;
    file.write_all(contents.as_bytes())
}

fn slugify(description: &str) -> String {
    description
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(str::to_ascii_lowercase)
        .collect::<Vec<_>>()
        .join("_")
}
