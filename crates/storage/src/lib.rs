use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use sqlx::{
    sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteRow},
    Pool, Row, Sqlite,
};
use std::{
    fs,
    path::{Path, PathBuf},
    str::FromStr,
};
use tracing::{debug, info};

use shared::domain::ExperimentLog;

pub const EXPERIMENT_LOGS_TABLE: &str = "experiment_logs";

const SELECT_EXPERIMENT_LOGS: &str = r#"
    SELECT
        CAST(researcher AS TEXT)       AS researcher,
        CAST(chemical AS TEXT)         AS chemical,
        CAST(instrument_used AS TEXT)  AS instrument_used,
        CAST(quantity_used_ml AS REAL) AS quantity_used_ml,
        typeof(quantity_used_ml)       AS quantity_used_ml_type,
        CAST(total_cost AS REAL)       AS total_cost,
        typeof(total_cost)             AS total_cost_type,
        CAST(date AS TEXT)             AS date
    FROM experiment_logs
"#;

#[derive(Clone)]
pub struct LabStore {
    pool: Pool<Sqlite>,
}

impl LabStore {
    /// Opens an existing store read-only. Never creates the file.
    pub async fn open(database_url: &str) -> Result<Self> {
        if let Some(path) = sqlite_path(database_url) {
            if !path.exists() {
                bail!(
                    "database file '{}' does not exist (url '{database_url}')",
                    path.display()
                );
            }
        }

        let connect_options = SqliteConnectOptions::from_str(database_url)
            .with_context(|| format!("invalid database url '{database_url}'"))?
            .read_only(true)
            .create_if_missing(false);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(connect_options)
            .await
            .with_context(|| format!("failed to open database '{database_url}'"))?;
        Ok(Self { pool })
    }

    /// Opens a writable store, creating the file and the schema when missing.
    /// Rollback journaling keeps the file readable by read-only openers.
    pub async fn create(database_url: &str) -> Result<Self> {
        ensure_sqlite_parent_dir_exists(database_url)?;

        let connect_options = SqliteConnectOptions::from_str(database_url)
            .with_context(|| format!("invalid database url '{database_url}'"))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Delete);
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(connect_options)
            .await
            .with_context(|| format!("failed to create database '{database_url}'"))?;
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .context("failed to apply experiment_logs schema")?;
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }

    pub async fn health_check(&self) -> Result<()> {
        let _: i64 = sqlx::query_scalar("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .context("sqlite ping failed")?;
        Ok(())
    }

    /// True when `experiment_logs` exists as a table or a view.
    pub async fn has_experiment_logs_table(&self) -> Result<bool> {
        let name: Option<String> = sqlx::query_scalar(
            "SELECT name FROM sqlite_master WHERE type IN ('table', 'view') AND name = ?",
        )
        .bind(EXPERIMENT_LOGS_TABLE)
        .fetch_optional(&self.pool)
        .await
        .context("failed to inspect sqlite schema")?;
        Ok(name.is_some())
    }

    pub async fn load_experiment_logs(&self) -> Result<Vec<ExperimentLog>> {
        if !self.has_experiment_logs_table().await? {
            bail!("table '{EXPERIMENT_LOGS_TABLE}' not found in database");
        }

        let rows = sqlx::query(SELECT_EXPERIMENT_LOGS)
            .fetch_all(&self.pool)
            .await
            .with_context(|| format!("failed to read table '{EXPERIMENT_LOGS_TABLE}'"))?;

        let logs = rows
            .iter()
            .enumerate()
            .map(|(index, row)| {
                decode_experiment_log(row)
                    .with_context(|| format!("malformed {EXPERIMENT_LOGS_TABLE} row {}", index + 1))
            })
            .collect::<Result<Vec<_>>>()?;
        debug!(rows = logs.len(), "decoded experiment logs");
        Ok(logs)
    }

    pub async fn insert_experiment_log(&self, log: &ExperimentLog) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO experiment_logs
                (researcher, chemical, instrument_used, quantity_used_ml, total_cost, date)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&log.researcher)
        .bind(&log.chemical)
        .bind(&log.instrument_used)
        .bind(log.quantity_used_ml)
        .bind(log.total_cost)
        .bind(log.date.format("%Y-%m-%d").to_string())
        .execute(&self.pool)
        .await
        .context("failed to insert experiment log")?;
        Ok(())
    }

    pub async fn close(self) {
        self.pool.close().await;
    }
}

/// Reads the full table once and releases the connection.
pub async fn load_snapshot(database_url: &str) -> Result<Vec<ExperimentLog>> {
    let store = LabStore::open(database_url).await?;
    let loaded = store.load_experiment_logs().await;
    store.close().await;
    let logs = loaded?;
    info!(%database_url, rows = logs.len(), "loaded experiment log snapshot");
    Ok(logs)
}

fn decode_experiment_log(row: &SqliteRow) -> Result<ExperimentLog> {
    ensure_numeric(row, "quantity_used_ml")?;
    ensure_numeric(row, "total_cost")?;
    let raw_date: String = row.try_get("date")?;
    Ok(ExperimentLog {
        researcher: row.try_get("researcher")?,
        chemical: row.try_get("chemical")?,
        instrument_used: row.try_get("instrument_used")?,
        quantity_used_ml: row.try_get("quantity_used_ml")?,
        total_cost: row.try_get("total_cost")?,
        date: parse_log_date(&raw_date)?,
    })
}

/// `CAST(.. AS REAL)` turns text into 0.0, so the stored type is checked first.
fn ensure_numeric(row: &SqliteRow, column: &str) -> Result<()> {
    let stored: String = row.try_get(format!("{column}_type").as_str())?;
    if stored != "integer" && stored != "real" {
        bail!("column '{column}' holds a {stored} value, expected a number");
    }
    Ok(())
}

/// Accepts `YYYY-MM-DD` and timestamp forms; the time of day is dropped.
pub fn parse_log_date(raw: &str) -> Result<NaiveDate> {
    let day = raw.trim().split([' ', 'T']).next().unwrap_or_default();
    NaiveDate::parse_from_str(day, "%Y-%m-%d").with_context(|| format!("invalid date '{raw}'"))
}

fn ensure_sqlite_parent_dir_exists(database_url: &str) -> Result<()> {
    let Some(path) = sqlite_path(database_url) else {
        return Ok(());
    };

    let Some(parent) = path.parent() else {
        return Ok(());
    };

    fs::create_dir_all(parent).with_context(|| {
        format!(
            "failed to create parent directory '{}' for database url '{database_url}'",
            parent.display()
        )
    })?;

    Ok(())
}

fn sqlite_path(database_url: &str) -> Option<PathBuf> {
    if database_url.starts_with("sqlite::memory:") || !database_url.starts_with("sqlite:") {
        return None;
    }

    let path = database_url
        .trim_start_matches("sqlite://")
        .trim_start_matches("sqlite:")
        .split('?')
        .next()
        .unwrap_or_default();

    if path.is_empty() || path == ":memory:" {
        return None;
    }

    Some(Path::new(path).to_path_buf())
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
