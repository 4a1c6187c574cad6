use crate::db::models::{DependencyParams, ExporterParams};
use crate::error::Result;
use sqlx::{
    migrate::MigrateDatabase, query, sqlite::SqlitePoolOptions, Executor, Sqlite,
    SqlitePool,
};
use tracing::{debug, info};

/// Creates the dataset tables if they don't exist
pub async fn setup_database(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    query(
        "CREATE TABLE IF NOT EXISTS dependency (
            commodity TEXT NOT NULL,
            country TEXT NOT NULL,
            year INTEGER NOT NULL,
            import_pct REAL NOT NULL,
            PRIMARY KEY (commodity, country, year)
        )",
    )
    .execute(pool)
    .await?;

    query(
        "CREATE TABLE IF NOT EXISTS exporter (
            commodity TEXT NOT NULL,
            country TEXT NOT NULL,
            year INTEGER NOT NULL,
            partner TEXT NOT NULL,
            continent TEXT NOT NULL,
            import_value REAL NOT NULL
        )",
    )
    .execute(pool)
    .await?;

    query(
        "CREATE INDEX IF NOT EXISTS exporter_lookup
            ON exporter (commodity, country, year)",
    )
    .execute(pool)
    .await?;

    query(
        "CREATE TABLE IF NOT EXISTS region (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            country TEXT NOT NULL UNIQUE,
            geometry TEXT NOT NULL
        )",
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Opens (creating if needed) the dataset database and applies the schema
pub async fn create_database_pool(database_url: &str) -> Result<SqlitePool> {
    debug!(%database_url, "opening dataset database");

    if !Sqlite::database_exists(database_url).await? {
        info!(%database_url, "database does not exist, creating it");
        Sqlite::create_database(database_url).await?;
    }

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .after_connect(|conn, _| {
            Box::pin(async move {
                conn.execute("PRAGMA foreign_keys = ON;").await?;
                conn.execute("PRAGMA journal_mode = WAL;").await?;
                conn.execute("PRAGMA synchronous = NORMAL;").await?;
                Ok(())
            })
        })
        .connect(database_url)
        .await?;

    setup_database(&pool).await?;
    debug!("dataset schema ready");

    Ok(pool)
}

/// Inserts or replaces one dependency percentage row.
///
/// Takes any executor so the seeder can batch rows in one transaction.
pub async fn insert_dependency<'e, E>(executor: E, params: &DependencyParams) -> Result<(), sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    query(
        "INSERT OR REPLACE INTO dependency (commodity, country, year, import_pct)
         VALUES (?, ?, ?, ?)",
    )
    .bind(params.commodity.as_str())
    .bind(&params.country)
    .bind(params.year)
    .bind(params.import_pct)
    .execute(executor)
    .await?;

    Ok(())
}

/// Inserts one exporter breakdown row
pub async fn insert_exporter<'e, E>(executor: E, params: &ExporterParams) -> Result<(), sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    query(
        "INSERT INTO exporter (commodity, country, year, partner, continent, import_value)
         VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(params.commodity.as_str())
    .bind(&params.country)
    .bind(params.year)
    .bind(&params.partner)
    .bind(&params.continent)
    .bind(params.import_value)
    .execute(executor)
    .await?;

    Ok(())
}

/// Inserts a region or replaces the geometry of an existing one, keeping its row order
pub async fn upsert_region<'e, E>(executor: E, country: &str, geometry: &str) -> Result<(), sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    query(
        "INSERT INTO region (country, geometry) VALUES (?, ?)
         ON CONFLICT(country) DO UPDATE SET geometry = excluded.geometry",
    )
    .bind(country)
    .bind(geometry)
    .execute(executor)
    .await?;

    Ok(())
}

/// Removes every dataset row, used before reseeding
pub async fn clear_dataset(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    query("DELETE FROM dependency").execute(pool).await?;
    query("DELETE FROM exporter").execute(pool).await?;
    query("DELETE FROM region").execute(pool).await?;
    Ok(())
}
